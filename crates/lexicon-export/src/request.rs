//! Request context used to build absolute URLs

/// The parts of the incoming request the engine needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
}

impl RequestContext {
    /// Create a context for the given scheme and host, e.g. `https://example.org`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Base URL as given
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and a path with exactly one slash
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_export::RequestContext;
    ///
    /// let ctx = RequestContext::new("http://testserver/");
    /// assert_eq!(ctx.absolute_uri("/lexicon/kgu/oxt-update"), "http://testserver/lexicon/kgu/oxt-update");
    /// ```
    pub fn absolute_uri(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
