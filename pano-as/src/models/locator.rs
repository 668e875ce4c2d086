//! Logical asset locators

use std::fmt;

/// Caller-supplied identifier for a directory of images
///
/// Exactly three non-empty `/`-separated segments select the nested
/// project/section/subsection layout. Any other shape is treated as a single
/// opaque directory name under the images root (legacy flat layout), even
/// when it still contains slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocator {
    /// Legacy flat layout: one directory directly under the images root
    Flat(String),
    /// Current nested layout: project/section/subsection
    Hierarchical {
        project: String,
        section: String,
        subsection: String,
    },
}

impl AssetLocator {
    /// Parse a locator string
    pub fn parse(locator: &str) -> Self {
        let segments: Vec<&str> = locator.split('/').collect();
        if segments.len() == 3 && segments.iter().all(|s| !s.is_empty()) {
            AssetLocator::Hierarchical {
                project: segments[0].to_string(),
                section: segments[1].to_string(),
                subsection: segments[2].to_string(),
            }
        } else {
            AssetLocator::Flat(locator.to_string())
        }
    }

    pub fn is_hierarchical(&self) -> bool {
        matches!(self, AssetLocator::Hierarchical { .. })
    }
}

impl fmt::Display for AssetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetLocator::Flat(name) => write!(f, "{}", name),
            AssetLocator::Hierarchical {
                project,
                section,
                subsection,
            } => write!(f, "{}/{}/{}", project, section, subsection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments_parse_hierarchical() {
        let locator = AssetLocator::parse("alpha/beta/gamma");
        assert_eq!(
            locator,
            AssetLocator::Hierarchical {
                project: "alpha".to_string(),
                section: "beta".to_string(),
                subsection: "gamma".to_string(),
            }
        );
    }

    #[test]
    fn test_single_segment_parses_flat() {
        assert_eq!(
            AssetLocator::parse("legacy-shoot"),
            AssetLocator::Flat("legacy-shoot".to_string())
        );
    }

    // Two-segment locators keep their embedded slash and fall back to the
    // flat layout; this ambiguity is intentional and load-bearing.
    #[test]
    fn test_two_segments_parse_flat_with_slash_preserved() {
        assert_eq!(
            AssetLocator::parse("alpha/beta"),
            AssetLocator::Flat("alpha/beta".to_string())
        );
    }

    #[test]
    fn test_four_segments_parse_flat() {
        assert_eq!(
            AssetLocator::parse("a/b/c/d"),
            AssetLocator::Flat("a/b/c/d".to_string())
        );
    }

    #[test]
    fn test_empty_middle_segment_parses_flat() {
        assert_eq!(
            AssetLocator::parse("alpha//gamma"),
            AssetLocator::Flat("alpha//gamma".to_string())
        );
    }

    #[test]
    fn test_display_round_trips() {
        for input in ["alpha/beta/gamma", "legacy-shoot", "a/b/c/d"] {
            assert_eq!(AssetLocator::parse(input).to_string(), input);
        }
    }
}
