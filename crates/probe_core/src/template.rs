use std::fmt;

use url::Url;

use crate::Identifier;

/// Token replaced by the identifier's decimal form.
pub const PLACEHOLDER: &str = "???";

pub const DEFAULT_URL_TEMPLATE: &str = "https://eaassets-a.akamaihd.net/fifa/u/f/fcm23/prod/s/static/players/players_24/p???_RS24_ICON_ETC2.eaz";

/// URL with a placeholder slot for an identifier.
///
/// A template without the placeholder is accepted; every identifier then
/// expands to the same literal URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
}

impl UrlTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(PLACEHOLDER)
    }

    pub fn expand(&self, identifier: Identifier) -> String {
        self.raw.replace(PLACEHOLDER, &identifier.to_string())
    }

    /// Expands identifier 0 and parses the result, so callers can reject a
    /// template that can never produce a fetchable URL.
    pub fn sample_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.expand(0))
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_URL_TEMPLATE)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
