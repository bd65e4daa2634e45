use isolang::Language;
use scraper::{ElementRef, Html};
use serde::Deserialize;
use tracing::{debug, info};

use super::{Provider, selector};
use crate::client::{ScraperClient, check_status};
use crate::config::{ProviderConfig, ResultOrder};
use crate::errors::{Error, Result};
use crate::extract::ArchiveKind;
use crate::subtitle::Subtitle;
use crate::video::Video;

/// Body of the `down_ajax` endpoint
#[derive(Debug, Deserialize)]
struct DownAjax {
    #[serde(default)]
    success: Option<bool>,
    url: String,
}

pub struct SubHd {
    client: ScraperClient,
    config: ProviderConfig,
}

impl Provider for SubHd {
    const NAME: &'static str = "subhd";
    const LANGUAGES: &'static [Language] = &[Language::Zho];

    fn initialize(config: ProviderConfig) -> Result<Self> {
        info!(base_url = %config.base_url, "Opening {} session", Self::NAME);

        let client = ScraperClient::new(&config)?;

        Ok(Self { client, config })
    }

    fn terminate(self) {
        info!("Closing {} session", Self::NAME);
    }

    async fn query(&self, video: &Video) -> Result<Vec<Subtitle>> {
        let query = video.query();
        debug!(%video, query, "Searching subtitles");

        let search_url = self.config.search_url(&query);
        let page = self.client.get_page(&search_url).await?;

        let mut subtitles = parse_results(&page, video)?;
        if self.config.order == ResultOrder::NewestFirst {
            subtitles.reverse();
        }

        debug!(count = subtitles.len(), "Found subtitles");

        Ok(subtitles)
    }

    async fn download_subtitle(&self, subtitle: &mut Subtitle) -> Result<()> {
        let id = subtitle
            .id()
            .ok_or_else(|| Error::Parsing(format!("subtitle id from `{}`", subtitle.url)))?;

        let resolved: DownAjax = {
            let response = self
                .client
                .post(self.config.resolve_url())
                .form(&[("sub_id", id)])
                .send()
                .await?;

            check_status(response)?.json().await?
        };
        debug!(id, url = resolved.url, success = ?resolved.success, "Resolved download");

        let archive_url = self.config.base_url.join(&resolved.url)?.to_string();
        let response = self
            .client
            .get(&archive_url)
            .timeout(self.config.download_timeout)
            .send()
            .await?;
        let data = check_status(response)?.bytes().await?;

        let kind = ArchiveKind::from_url(&archive_url)?;
        let content = tokio::task::spawn_blocking(move || kind.extract(&data)).await??;

        subtitle.content = Some(content.ok_or(Error::SubtitleNotFound(archive_url))?);

        Ok(())
    }
}

/// One subtitle for each result box, in document order
fn parse_results(page: &Html, video: &Video) -> Result<Vec<Subtitle>> {
    let result_box = selector::from(r#"div[class="box"]"#);

    page.select(&result_box)
        .map(|elem| {
            let url = get_url(&elem)?;
            let release = get_release(&elem)?;
            let subber = get_subber(&elem);

            Ok(Subtitle::new(video, &subber, &release, &url))
        })
        .collect()
}

fn get_url(elem: &ElementRef) -> Result<String> {
    let a = selector::from(r#"div[class="d_title"] > a"#);

    elem.select(&a)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.to_string())
        .ok_or(Error::parsing("subtitle link"))
}

fn get_release(elem: &ElementRef) -> Result<String> {
    let span = selector::from(r#"span[data-toggle="tooltip"]"#);

    elem.select(&span)
        .next()
        .and_then(|s| s.value().attr("title"))
        .map(|title| title.to_string())
        .ok_or(Error::parsing("release description"))
}

fn get_subber(elem: &ElementRef) -> String {
    let a = selector::from(r#"div[class="d_zu"] > a"#);

    elem.select(&a)
        .next()
        .map(|a| a.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
