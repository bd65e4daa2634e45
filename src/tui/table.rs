use owo_colors::OwoColorize;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Modify, Style, Width,
        object::{Columns, Rows},
        themes::Colorization,
    },
};

use super::style::*;
use crate::cli::Scored;

const HEADERS: [&str; 5] = ["Index", "Subber", "Release", "Id", "Matches"];

/// Scored subtitles, one row each, indexed from 1
pub fn subtitles_table(scored: &[Scored]) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADERS);
    for row in rows(scored) {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Colorization::columns(TABLE_COLORS_SUBTITLES))
        .with(Modify::new(Rows::first()).with(TABLE_HEADER_COLOR))
        .with(Modify::new(Columns::first()).with(Alignment::center()))
        .with(Modify::new(Columns::one(2)).with(Width::wrap(60)));

    table.to_string()
}

fn rows(scored: &[Scored]) -> Vec<Vec<String>> {
    scored
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let subber = match s.subtitle.subber.as_str() {
                "" => "•".to_string(),
                subber => subber.to_string(),
            };
            let matches = s
                .matches
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            vec![
                (i + 1).to_string(),
                subber,
                s.subtitle.release.clone(),
                s.subtitle.id().unwrap_or_default().to_string(),
                matches,
            ]
        })
        .collect()
}

/// Prints a selection prompt with consistent formatting
pub fn print_prompt(instructions: &str) {
    println!("\n{} {}", "::".red(), instructions.bold());
}

/// Prints a title header with consistent formatting
pub fn print_title(title: &str) {
    let formatted = title.cyan().bold().to_string();
    println!("{formatted}\n");
}
