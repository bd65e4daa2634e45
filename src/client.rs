use std::ops::Deref;

use reqwest::{Client, Response, StatusCode, header, header::HeaderValue};
use scraper::Html;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::errors::{Error, Result};

/// Long lived http session shared by every request of a provider
#[derive(Clone, Debug)]
pub struct ScraperClient(Client);

impl<'a> ScraperClient {
    #[rustfmt::skip]
    const ACCEPT: &'a str = "text/html,application/xhtml+xml,application/xml; q=0.9,*/*; q=0.8";

    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(Self::headers())
            .build()?;

        Ok(Self(client))
    }

    fn headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        headers.insert(header::ACCEPT, HeaderValue::from_static(Self::ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh"));

        headers
    }

    pub async fn get_page(&self, url: &str) -> Result<Html> {
        debug!(url, "Fetching page");

        let response = check_status(self.get(url).send().await?)?;
        let page = Html::parse_document(&response.text().await?);

        Ok(page)
    }
}

impl Deref for ScraperClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Anything other than `200 OK` fails the request
pub fn check_status(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        status => Err(Error::Request {
            status: status.as_u16(),
            url: response.url().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client() {
        let client = ScraperClient::new(&ProviderConfig::default());

        assert!(client.is_ok());
    }
}
