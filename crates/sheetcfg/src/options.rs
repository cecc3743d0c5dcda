//! Load options

use std::fmt;
use std::sync::Arc;

/// Caller-supplied interpretation of the tag column
///
/// `tag` is the trimmed text of column 0, or `None` when that cell is blank.
pub trait RowTagPolicy: Send + Sync {
    /// Rows dropped before records are read (comment rows, disabled records)
    fn is_ignored(&self, tag: Option<&str>) -> bool;

    /// Records that only exist in test builds
    fn is_test(&self, tag: Option<&str>) -> bool;
}

/// Marker-based tag convention
///
/// By default a tag starting with `##` marks an ignored row and the tag
/// `test` (any case) marks a test-only record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConvention {
    ignore_prefixes: Vec<String>,
    test_tags: Vec<String>,
}

impl TagConvention {
    pub fn new<I, T, J, U>(ignore_prefixes: I, test_tags: J) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        J: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self {
            ignore_prefixes: ignore_prefixes.into_iter().map(Into::into).collect(),
            test_tags: test_tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for TagConvention {
    fn default() -> Self {
        Self::new(["##"], ["test"])
    }
}

impl RowTagPolicy for TagConvention {
    fn is_ignored(&self, tag: Option<&str>) -> bool {
        tag.is_some_and(|tag| {
            self.ignore_prefixes.iter().any(|p| tag.starts_with(p))
        })
    }

    fn is_test(&self, tag: Option<&str>) -> bool {
        tag.is_some_and(|tag| {
            self.test_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
        })
    }
}

/// Options for loading a sheet
#[derive(Clone)]
pub struct LoadOptions {
    /// Only build the title tree; keep description rows, skip the ignore filter
    pub header_only: bool,
    /// Tag column interpretation
    pub tags: Arc<dyn RowTagPolicy>,
}

impl LoadOptions {
    pub fn header_only(mut self, header_only: bool) -> Self {
        self.header_only = header_only;
        self
    }

    pub fn with_tags<P: RowTagPolicy + 'static>(mut self, tags: P) -> Self {
        self.tags = Arc::new(tags);
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_only: false,
            tags: Arc::new(TagConvention::default()),
        }
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("header_only", &self.header_only)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_convention() {
        let tags = TagConvention::default();
        assert!(tags.is_ignored(Some("##")));
        assert!(tags.is_ignored(Some("##type")));
        assert!(!tags.is_ignored(Some("#")));
        assert!(!tags.is_ignored(None));

        assert!(tags.is_test(Some("test")));
        assert!(tags.is_test(Some("TEST")));
        assert!(!tags.is_test(Some("testing")));
        assert!(!tags.is_test(None));
    }

    #[test]
    fn test_custom_convention() {
        let tags = TagConvention::new(["//", "skip"], ["dev", "qa"]);
        assert!(tags.is_ignored(Some("// disabled")));
        assert!(tags.is_ignored(Some("skip")));
        assert!(!tags.is_ignored(Some("##")));
        assert!(tags.is_test(Some("QA")));
    }

    #[test]
    fn test_options_builder() {
        let options = LoadOptions::default().header_only(true);
        assert!(options.header_only);
        assert!(options.tags.is_ignored(Some("##")));

        let options = options.with_tags(TagConvention::new(Vec::<String>::new(), ["x"]));
        assert!(!options.tags.is_ignored(Some("##")));
        assert!(options.tags.is_test(Some("x")));
    }
}
