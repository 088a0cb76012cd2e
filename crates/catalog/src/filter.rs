//! Channel filtering criteria.

use crate::ChannelId;

/// Criteria for [`Repository::filter_channels`](crate::Repository::filter_channels).
///
/// Every criterion is optional and they combine with AND. Keyword and
/// language values are trimmed, and a value that is empty after trimming is
/// the same as not supplying it at all.
///
/// ```
/// use lantern_catalog::ChannelFilter;
/// let filter = ChannelFilter::new().with_keyword("  ").with_language(" es ");
/// assert_eq!(filter.keyword(), None);
/// assert_eq!(filter.language(), Some("es"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    identifier: Option<ChannelId>,
    keyword: Option<String>,
    language: Option<String>,
}
impl ChannelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict candidates to the single channel with this primary key.
    pub fn with_identifier(mut self, identifier: ChannelId) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Keep channels whose name or description contains the keyword.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keyword = non_empty(keyword.as_ref());
        self
    }

    /// Keep channels whose root language, or any node or file in their tree,
    /// carries a language id containing this tag.
    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        self.language = non_empty(language.as_ref());
        self
    }

    pub fn identifier(&self) -> Option<&ChannelId> {
        self.identifier.as_ref()
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Build a `LIKE` pattern that matches `needle` anywhere in a column.
///
/// Queries pair this with `ESCAPE '\'`, so user input containing `%` or `_`
/// is matched literally rather than acting as a wildcard. SQLite's `LIKE` is
/// case-insensitive for ASCII.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
