//! The video a caller wants subtitles for.

use std::fmt;

/// Release attributes of the local video file, compared against what the
/// guesser reads out of a subtitle's release name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub release_group: Option<String>,
    pub resolution: Option<String>,
    pub format: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Episode {
    pub series: String,
    pub season: u32,
    pub episode: u32,
    pub year: Option<u32>,
    /// Episode title
    pub title: Option<String>,
    pub release: ReleaseInfo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub year: Option<u32>,
    pub release: ReleaseInfo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Video {
    Episode(Episode),
    Movie(Movie),
}

impl Video {
    pub fn episode(series: &str, season: u32, episode: u32, year: Option<u32>) -> Self {
        Video::Episode(Episode {
            series: series.to_string(),
            season,
            episode,
            year,
            title: None,
            release: ReleaseInfo::default(),
        })
    }

    pub fn movie(title: &str, year: Option<u32>) -> Self {
        Video::Movie(Movie {
            title: title.to_string(),
            year,
            release: ReleaseInfo::default(),
        })
    }

    pub fn with_release(mut self, info: ReleaseInfo) -> Self {
        match &mut self {
            Video::Episode(e) => e.release = info,
            Video::Movie(m) => m.release = info,
        }
        self
    }

    pub fn release(&self) -> &ReleaseInfo {
        match self {
            Video::Episode(e) => &e.release,
            Video::Movie(m) => &m.release,
        }
    }

    /// Search string in the site's syntax, e.g. `Show (2010) S01 E02`
    pub fn query(&self) -> String {
        let (name, year) = match self {
            Video::Episode(e) => (&e.series, e.year),
            Video::Movie(m) => (&m.title, m.year),
        };

        let mut query = name.clone();
        if let Some(year) = year {
            query += &format!(" ({year})");
        }
        if let Video::Episode(e) = self {
            query += &format!(" S{:02} E{:02}", e.season, e.episode);
        }

        query
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Video::Episode(e) => write!(f, "{} S{:02}E{:02}", e.series, e.season, e.episode),
            Video::Movie(m) => match m.year {
                Some(year) => write!(f, "{} ({year})", m.title),
                None => write!(f, "{}", m.title),
            },
        }
    }
}
