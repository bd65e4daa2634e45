use std::time::Duration;

use url::Url;

use crate::errors::Result;

pub const BASE_URL: &str = "http://subhd.com";

pub const USER_AGENT: &str = concat!("SubDB/1.0 (subhd/", env!("CARGO_PKG_VERSION"), ")");

/// Timeout applied to the archive fetch, the search request has none
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Order in which search results are handed back to the caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultOrder {
    /// The site lists newest entries last, so this reverses document order
    #[default]
    NewestFirst,
    Document,
}

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub download_timeout: Duration,
    pub order: ResultOrder,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("valid base url"),
            user_agent: USER_AGENT.to_string(),
            download_timeout: DOWNLOAD_TIMEOUT,
            order: ResultOrder::default(),
        }
    }
}

impl ProviderConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn with_order(mut self, order: ResultOrder) -> Self {
        self.order = order;
        self
    }

    /// `<base>/search/<query>`, the query form-encoded (spaces become `+`)
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();

        format!("{}/search/{encoded}", self.root())
    }

    pub fn resolve_url(&self) -> String {
        format!("{}/ajax/down_ajax", self.root())
    }

    fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}
