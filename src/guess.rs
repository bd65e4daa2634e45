//! Heuristic parser for scene-style release names
//!
//! Reads names like:
//! - "The.Walking.Dead.S05E01.No.Sanctuary.720p.HDTV.x264-KILLERS"
//! - "Doctor Who (2005) S10 E01 1080p WEB-DL"
//! - "Inception.2010.1080p.BluRay.DTS.x264-ESiR"

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::subtitle::MatchLabel;
use crate::video::{ReleaseInfo, Video};

static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mkv|mp4|avi|srt|ass|ssa|sub)$").unwrap());

static SXXEXX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)[\s._\-]*\bS(\d{1,2})[\s._\-]?E(\d{1,3})\b(.*)$").unwrap()
});

static NXNN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)[\s._\-]*\b(\d{1,2})x(\d{2,3})\b(.*)$").unwrap());

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

static GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([A-Za-z0-9]+)$").unwrap());

static RESOLUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(2160|1080|720|576|480|360)([pi])\b|\b(4k)\b").unwrap());

static FORMAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(blu-?ray|bdrip|brrip|web-?dl|webrip|web|hdtv|dvdrip|dvd)\b").unwrap()
});

static VIDEO_CODEC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:[xh]\.?(264|265)|(hevc)|(xvid)|(divx))\b").unwrap());

static AUDIO_CODEC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(aac|ac3|dd5\.?1|dts|flac|mp3)\b").unwrap());

/// Tokens that end the human readable part of a release name
static TECHNICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(\d{3,4}[pi]|4k|uhd|hdr|10bit|blu-?ray|bdrip|brrip|web-?dl|webrip|web|hdtv|dvdrip|dvd|[xh]264|[xh]265|hevc|xvid|divx|aac|ac3|dts|flac|mp3|proper|repack|internal|limited|complete|19\d{2}|20\d{2})$",
    )
    .unwrap()
});

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s._]+").unwrap());

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Guess {
    pub series: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// Episode title for episodes, movie title for movies
    pub title: Option<String>,
    pub year: Option<u32>,
    pub release: ReleaseInfo,
}

/// Guesses episode metadata out of a filename
pub fn guess_episode_info(filename: &str) -> Guess {
    let (stem, release) = split_release(filename);
    let mut guess = Guess {
        release,
        ..Default::default()
    };

    let caps = SXXEXX_RE.captures(&stem).or_else(|| NXNN_RE.captures(&stem));
    if let Some(caps) = caps {
        let prefix = caps.get(1).map_or("", |m| m.as_str());

        let series = clean_name(&YEAR_RE.replace_all(prefix, ""));

        guess.year = find_year(prefix);
        guess.series = Some(series).filter(|s| !s.is_empty());
        guess.season = caps.get(2).and_then(|m| m.as_str().parse().ok());
        guess.episode = caps.get(3).and_then(|m| m.as_str().parse().ok());
        guess.title = caps.get(4).and_then(|m| leading_words(m.as_str()));
    }

    debug!(
        filename,
        series = ?guess.series,
        season = ?guess.season,
        episode = ?guess.episode,
        "Guessed episode"
    );

    guess
}

/// Guesses movie metadata out of a filename
pub fn guess_movie_info(filename: &str) -> Guess {
    let (stem, release) = split_release(filename);

    let tokens = tokenize(&stem);
    let title_len = tokens
        .iter()
        .position(|t| TECHNICAL_RE.is_match(t))
        // a title made only of a year, e.g. "2012.2009.720p"
        .map(|i| if i == 0 { 1 } else { i })
        .unwrap_or(tokens.len());

    let title = tokens[..title_len.min(tokens.len())].join(" ");
    let year = tokens[title_len.min(tokens.len())..]
        .iter()
        .take_while(|t| TECHNICAL_RE.is_match(t))
        .find_map(|t| find_year(t));

    let guess = Guess {
        title: Some(clean_name(&title)).filter(|s| !s.is_empty()),
        year,
        release,
        ..Default::default()
    };

    debug!(filename, title = ?guess.title, year = ?guess.year, "Guessed movie");

    guess
}

/// Match labels for the fields where `guess` agrees with `video`
pub fn compute_guess_matches(video: &Video, guess: &Guess) -> BTreeSet<MatchLabel> {
    let mut matches = BTreeSet::new();

    match video {
        Video::Episode(e) => {
            if guess.series.as_ref().is_some_and(|s| eq_ignore_case(s, &e.series)) {
                matches.insert(MatchLabel::Series);
            }
            if guess.season == Some(e.season) {
                matches.insert(MatchLabel::Season);
            }
            if guess.episode == Some(e.episode) {
                matches.insert(MatchLabel::Episode);
            }
            // no year on either side is a match too
            if guess.year == e.year {
                matches.insert(MatchLabel::Year);
            }
            if both_eq(&e.title, &guess.title) {
                matches.insert(MatchLabel::Title);
            }
        }
        Video::Movie(m) => {
            if m.year.is_some() && guess.year == m.year {
                matches.insert(MatchLabel::Year);
            }
            if guess.title.as_ref().is_some_and(|t| eq_ignore_case(t, &m.title)) {
                matches.insert(MatchLabel::Title);
            }
        }
    }

    let (wanted, found) = (video.release(), &guess.release);
    if both_eq(&wanted.release_group, &found.release_group) {
        matches.insert(MatchLabel::ReleaseGroup);
    }

    // normalized by the tag parsers, so compared as is
    let fields = [
        (&wanted.resolution, &found.resolution, MatchLabel::Resolution),
        (&wanted.format, &found.format, MatchLabel::Format),
        (&wanted.video_codec, &found.video_codec, MatchLabel::VideoCodec),
        (&wanted.audio_codec, &found.audio_codec, MatchLabel::AudioCodec),
    ];
    for (wanted, found, label) in fields {
        if wanted.is_some() && wanted == found {
            matches.insert(label);
        }
    }

    matches
}

/// Strips the extension and the release group, and reads the quality tags
fn split_release(filename: &str) -> (String, ReleaseInfo) {
    let mut stem = EXTENSION_RE.replace(filename.trim(), "").to_string();

    let group = GROUP_RE
        .captures(&stem)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|g| !TECHNICAL_RE.is_match(g) && !g.eq_ignore_ascii_case("dl"));
    if let Some(g) = &group {
        stem.truncate(stem.len() - g.len() - 1);
    }

    let release = ReleaseInfo {
        release_group: group,
        resolution: parse_resolution(&stem),
        format: parse_format(&stem),
        video_codec: parse_video_codec(&stem),
        audio_codec: parse_audio_codec(&stem),
    };

    (stem, release)
}

fn parse_resolution(s: &str) -> Option<String> {
    let caps = RESOLUTION_RE.captures(s)?;
    if caps.get(3).is_some() {
        return Some("2160p".into());
    }

    Some(caps[1].to_string() + &caps[2].to_lowercase())
}

fn parse_format(s: &str) -> Option<String> {
    let caps = FORMAT_RE.captures(s)?;
    let format = match caps[1].to_lowercase().as_str() {
        "bluray" | "blu-ray" | "bdrip" | "brrip" => "BluRay",
        "hdtv" => "HDTV",
        "dvd" | "dvdrip" => "DVD",
        _ => "WEB-DL",
    };

    Some(format.into())
}

fn parse_video_codec(s: &str) -> Option<String> {
    let caps = VIDEO_CODEC_RE.captures(s)?;
    let codec = match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(n), _, _) => format!("h{}", n.as_str()),
        (_, Some(_), _) => "h265".into(),
        (_, _, Some(_)) => "XviD".into(),
        _ => "DivX".into(),
    };

    Some(codec)
}

fn parse_audio_codec(s: &str) -> Option<String> {
    let caps = AUDIO_CODEC_RE.captures(s)?;
    let codec = caps[1].to_uppercase();
    let codec = if codec.starts_with("DD") { "AC3".into() } else { codec };

    Some(codec)
}

fn tokenize(s: &str) -> Vec<&str> {
    SEPARATOR_RE.split(s).filter(|t| !t.is_empty()).collect()
}

/// Words before the first technical tag, e.g. the episode title
fn leading_words(s: &str) -> Option<String> {
    let words: Vec<_> = tokenize(s)
        .into_iter()
        .take_while(|t| !TECHNICAL_RE.is_match(t))
        .collect();

    Some(words.join(" ")).filter(|w| !w.is_empty())
}

fn find_year(s: &str) -> Option<u32> {
    YEAR_RE
        .captures_iter(s)
        .last()
        .and_then(|c| c[1].parse().ok())
}

/// Separators and brackets to single spaces
fn clean_name(s: &str) -> String {
    SEPARATOR_RE
        .replace_all(s, " ")
        .replace(['(', ')', '[', ']'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['-', ' '])
        .to_string()
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn both_eq(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if eq_ignore_case(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_episode() {
        let guess = guess_episode_info("The.Walking.Dead.S05E01.No.Sanctuary.720p.HDTV.x264-KILLERS.mkv");

        assert_eq!(guess.series.as_deref(), Some("The Walking Dead"));
        assert_eq!(guess.season, Some(5));
        assert_eq!(guess.episode, Some(1));
        assert_eq!(guess.title.as_deref(), Some("No Sanctuary"));
        assert_eq!(guess.year, None);
        assert_eq!(guess.release.release_group.as_deref(), Some("KILLERS"));
        assert_eq!(guess.release.resolution.as_deref(), Some("720p"));
        assert_eq!(guess.release.format.as_deref(), Some("HDTV"));
        assert_eq!(guess.release.video_codec.as_deref(), Some("h264"));
    }

    #[test]
    fn test_guess_episode_with_year() {
        let guess = guess_episode_info("Doctor Who (2005) S10 E01 1080p WEB-DL DD5.1 H.264.mkv");

        assert_eq!(guess.series.as_deref(), Some("Doctor Who"));
        assert_eq!(guess.year, Some(2005));
        assert_eq!(guess.season, Some(10));
        assert_eq!(guess.episode, Some(1));
        assert_eq!(guess.title, None);
        assert_eq!(guess.release.release_group, None);
        assert_eq!(guess.release.format.as_deref(), Some("WEB-DL"));
        assert_eq!(guess.release.audio_codec.as_deref(), Some("AC3"));
        assert_eq!(guess.release.video_codec.as_deref(), Some("h264"));
    }

    #[test]
    fn test_guess_episode_nxnn() {
        let guess = guess_episode_info("house.3x07.hdtv.xvid-lol.mkv");

        assert_eq!(guess.series.as_deref(), Some("house"));
        assert_eq!(guess.season, Some(3));
        assert_eq!(guess.episode, Some(7));
        assert_eq!(guess.release.video_codec.as_deref(), Some("XviD"));
        assert_eq!(guess.release.release_group.as_deref(), Some("lol"));
    }

    #[test]
    fn test_guess_episode_unparsable() {
        let guess = guess_episode_info("权力的游戏 第五季 第一集.mkv");

        assert_eq!(guess.series, None);
        assert_eq!(guess.season, None);
        assert_eq!(guess.episode, None);
    }

    #[test]
    fn test_guess_movie() {
        let guess = guess_movie_info("Inception.2010.1080p.BluRay.DTS.x264-ESiR.mkv");

        assert_eq!(guess.title.as_deref(), Some("Inception"));
        assert_eq!(guess.year, Some(2010));
        assert_eq!(guess.release.resolution.as_deref(), Some("1080p"));
        assert_eq!(guess.release.format.as_deref(), Some("BluRay"));
        assert_eq!(guess.release.audio_codec.as_deref(), Some("DTS"));
        assert_eq!(guess.release.release_group.as_deref(), Some("ESiR"));
    }

    #[test]
    fn test_guess_movie_without_tags() {
        let guess = guess_movie_info("The Dark Knight.mkv");

        assert_eq!(guess.title.as_deref(), Some("The Dark Knight"));
        assert_eq!(guess.year, None);

        let guess = guess_movie_info("2012.2009.720p.mkv");
        assert_eq!(guess.title.as_deref(), Some("2012"));
        assert_eq!(guess.year, Some(2009));
    }

    #[test]
    fn test_compute_guess_matches_episode() {
        let video = Video::episode("the walking dead", 5, 1, None).with_release(ReleaseInfo {
            resolution: Some("720p".into()),
            release_group: Some("killers".into()),
            format: Some("WEB-DL".into()),
            ..Default::default()
        });
        let guess = guess_episode_info("The.Walking.Dead.S05E01.720p.HDTV.x264-KILLERS.mkv");
        let matches = compute_guess_matches(&video, &guess);

        let expected = BTreeSet::from([
            MatchLabel::Series,
            MatchLabel::Season,
            MatchLabel::Episode,
            MatchLabel::Year,
            MatchLabel::Resolution,
            MatchLabel::ReleaseGroup,
        ]);
        assert_eq!(matches, expected);
    }

    #[test]
    fn test_compute_guess_matches_release_case() {
        let video = Video::movie("Heat", None).with_release(ReleaseInfo {
            release_group: Some("esir".into()),
            resolution: Some("1080P".into()),
            format: Some("BluRay".into()),
            video_codec: Some("H264".into()),
            ..Default::default()
        });
        let guess = guess_movie_info("Heat.1995.1080p.BluRay.x264-ESiR.mkv");
        let matches = compute_guess_matches(&video, &guess);

        assert!(matches.contains(&MatchLabel::ReleaseGroup));
        assert!(matches.contains(&MatchLabel::Format));
        assert!(!matches.contains(&MatchLabel::Resolution));
        assert!(!matches.contains(&MatchLabel::VideoCodec));
    }

    #[test]
    fn test_compute_guess_matches_movie() {
        let video = Video::movie("inception", Some(2010));
        let guess = guess_movie_info("Inception.2010.1080p.BluRay.x264.mkv");
        let matches = compute_guess_matches(&video, &guess);

        assert_eq!(matches, BTreeSet::from([MatchLabel::Year, MatchLabel::Title]));

        let video = Video::movie("Inception", None);
        let matches = compute_guess_matches(&video, &guess);

        assert_eq!(matches, BTreeSet::from([MatchLabel::Title]));
    }
}
