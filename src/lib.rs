//! SubHD subtitle provider.
//!
//! Searches `subhd.com` for chinese subtitles of a [`Video`], scores the
//! results against it and extracts the simplified chinese file out of the
//! archive the site serves.

pub mod client;
pub mod config;
pub mod errors;
pub mod extract;
pub mod guess;
pub mod provider;
pub mod subtitle;
pub mod video;

pub use config::{ProviderConfig, ResultOrder};
pub use errors::{Error, Result};
pub use provider::{Provider, SubHd};
pub use subtitle::{MatchLabel, Subtitle};
pub use video::Video;
