use lantern_catalog::ChannelFilter;

/// Optional search criteria accepted by the channel endpoints.
///
/// Values are passed through untouched; trimming and dropping empty values
/// happens in [`ChannelFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelParams {
    pub keyword: Option<String>,
    pub language: Option<String>,
}
/// Collect raw query pairs. A repeated key keeps its last value and unknown
/// keys are ignored, so no query string is ever rejected.
impl FromIterator<(String, String)> for ChannelParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "keyword" => params.keyword = Some(value),
                "language" => params.language = Some(value),
                _ => {},
            }
        }
        params
    }
}
impl ChannelParams {
    pub(crate) fn to_filter(&self) -> ChannelFilter {
        let mut filter = ChannelFilter::new();
        if let Some(keyword) = &self.keyword {
            filter = filter.with_keyword(keyword);
        }
        if let Some(language) = &self.language {
            filter = filter.with_language(language);
        }
        filter
    }
}
