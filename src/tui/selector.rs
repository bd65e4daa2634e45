use std::process::exit;

use anyhow::{Result, ensure};

use subhd::{Subtitle, Video};

use super::input::{Command, parse_commands, parse_input};
use super::table::{print_prompt, print_title, subtitles_table};
use crate::cli::Scored;

/// Selects from the ranked subtitles of `video`
pub fn select_subtitles(video: &Video, scored: Vec<Scored>) -> Result<Vec<Subtitle>> {
    print_title(&video.to_string());
    println!("{}", subtitles_table(&scored));
    print_prompt("Make your selection (eg: 1 2 3 or 1-3) [<enter> for the best, <q> for exit]");

    let selection = match parse_commands()? {
        Command::Default(input) => parse_input(&input, scored.len())?,
        Command::Best => vec![1],
        Command::Quit => exit(0),
    };
    println!();

    let subtitles: Vec<_> = scored
        .into_iter()
        .enumerate()
        .filter(|(i, _)| selection.contains(&(i + 1)))
        .map(|(_, s)| s.subtitle)
        .collect();

    ensure!(!subtitles.is_empty(), "Invalid input");

    Ok(subtitles)
}
