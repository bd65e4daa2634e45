pub mod subhd;

use isolang::Language;

use crate::config::ProviderConfig;
use crate::errors::Result;
use crate::subtitle::Subtitle;
use crate::video::Video;

pub use subhd::SubHd;

/// A subtitle source adapted to the host's search and download calls
#[allow(async_fn_in_trait)]
pub trait Provider: Sized {
    const NAME: &'static str;
    const LANGUAGES: &'static [Language];

    /// Opens the http session
    fn initialize(config: ProviderConfig) -> Result<Self>;

    /// Releases the http session
    fn terminate(self);

    async fn query(&self, video: &Video) -> Result<Vec<Subtitle>>;

    /// Results of [`Provider::query`] in one of `languages`, order preserved
    async fn list_subtitles(&self, video: &Video, languages: &[Language]) -> Result<Vec<Subtitle>> {
        let subtitles = self.query(video).await?;

        Ok(subtitles
            .into_iter()
            .filter(|s| languages.contains(&s.language))
            .collect())
    }

    /// Fills in `subtitle.content`
    async fn download_subtitle(&self, subtitle: &mut Subtitle) -> Result<()>;
}

mod selector {
    use scraper::Selector;

    pub fn from(s: &str) -> Selector {
        match Selector::parse(s) {
            Ok(s) => s,
            Err(_) => panic!("unable to parse selector {s}"),
        }
    }
}
