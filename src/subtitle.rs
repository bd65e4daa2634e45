use std::collections::BTreeSet;
use std::fmt;

use isolang::Language;
use tracing::info;

use crate::guess::{compute_guess_matches, guess_episode_info, guess_movie_info};
use crate::video::Video;

/// One dimension of agreement between a subtitle and the requested video
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchLabel {
    Series,
    Season,
    Episode,
    Year,
    Title,
    ReleaseGroup,
    Resolution,
    Format,
    VideoCodec,
    AudioCodec,
    /// Uploaded by the YYeTs release group
    Yyets,
}

impl MatchLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLabel::Series => "series",
            MatchLabel::Season => "season",
            MatchLabel::Episode => "episode",
            MatchLabel::Year => "year",
            MatchLabel::Title => "title",
            MatchLabel::ReleaseGroup => "release_group",
            MatchLabel::Resolution => "resolution",
            MatchLabel::Format => "format",
            MatchLabel::VideoCodec => "video_codec",
            MatchLabel::AudioCodec => "audio_codec",
            MatchLabel::Yyets => "yyets",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the subtitle was searched for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubtitleKind {
    Episode {
        series: String,
        season: u32,
        episode: u32,
    },
    Movie {
        title: String,
        year: Option<u32>,
    },
}

impl From<&Video> for SubtitleKind {
    fn from(video: &Video) -> Self {
        match video {
            Video::Episode(e) => SubtitleKind::Episode {
                series: e.series.clone(),
                season: e.season,
                episode: e.episode,
            },
            Video::Movie(m) => SubtitleKind::Movie {
                title: m.title.clone(),
                year: m.year,
            },
        }
    }
}

/// A search result, `content` is filled in once downloaded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtitle {
    pub language: Language,
    pub kind: SubtitleKind,
    /// Uploader or release group, may be empty
    pub subber: String,
    /// Free text release description
    pub release: String,
    /// Detail page url, its last segment identifies the subtitle
    pub url: String,
    pub content: Option<Vec<u8>>,
}

impl Subtitle {
    pub fn new(video: &Video, subber: &str, release: &str, url: &str) -> Self {
        Self {
            language: Language::Zho,
            kind: video.into(),
            subber: subber.to_string(),
            release: release.to_string(),
            url: url.to_string(),
            content: None,
        }
    }

    pub fn series(&self) -> Option<&str> {
        match &self.kind {
            SubtitleKind::Episode { series, .. } => Some(series),
            _ => None,
        }
    }

    pub fn season(&self) -> Option<u32> {
        match self.kind {
            SubtitleKind::Episode { season, .. } => Some(season),
            _ => None,
        }
    }

    pub fn episode(&self) -> Option<u32> {
        match self.kind {
            SubtitleKind::Episode { episode, .. } => Some(episode),
            _ => None,
        }
    }

    pub fn movie(&self) -> Option<&str> {
        match &self.kind {
            SubtitleKind::Movie { title, .. } => Some(title),
            _ => None,
        }
    }

    pub fn year(&self) -> Option<u32> {
        match self.kind {
            SubtitleKind::Movie { year, .. } => year,
            _ => None,
        }
    }

    /// Identifier expected by the download endpoint
    pub fn id(&self) -> Option<&str> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }

    pub fn is_yyets(&self) -> bool {
        self.subber.to_lowercase().contains("yyets")
    }

    /// Labels for every field where this subtitle agrees with `video`
    pub fn compute_matches(&self, video: &Video) -> BTreeSet<MatchLabel> {
        let mut matches = match (&self.kind, video) {
            (SubtitleKind::Episode { series, season, episode }, Video::Episode(v)) => {
                let mut matches = BTreeSet::new();
                if series.to_lowercase() == v.series.to_lowercase() {
                    matches.insert(MatchLabel::Series);
                }
                if *season == v.season {
                    matches.insert(MatchLabel::Season);
                }
                if *episode == v.episode {
                    matches.insert(MatchLabel::Episode);
                }

                let guess = guess_episode_info(&(self.release.clone() + ".mkv"));
                matches.extend(compute_guess_matches(video, &guess));
                matches
            }
            (SubtitleKind::Movie { title, year }, Video::Movie(v)) => {
                let mut matches = BTreeSet::new();
                if v.year.is_some() && *year == v.year {
                    matches.insert(MatchLabel::Year);
                }
                if *title == v.title {
                    matches.insert(MatchLabel::Title);
                }

                let guess = guess_movie_info(&(self.release.clone() + ".mkv"));
                matches.extend(compute_guess_matches(video, &guess));
                matches
            }
            (kind, video) => {
                info!(?kind, %video, "Subtitle kind does not fit the video");
                return BTreeSet::new();
            }
        };

        if self.is_yyets() {
            matches.insert(MatchLabel::Yyets);
        }

        matches
    }
}
