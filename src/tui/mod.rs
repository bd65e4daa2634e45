pub mod input;
pub mod progress;
pub mod selector;
pub mod style;
pub mod table;

use std::path::Path;

use owo_colors::OwoColorize;

use subhd::Video;

pub use progress::spinner;
pub use selector::select_subtitles;
pub use table::{print_title, subtitles_table};

pub fn print_empty(video: &Video) {
    println!("{} {}", "::".red(), format!("No subtitles found for {video}").bold());
}

pub fn print_skipped(path: &Path) {
    println!(
        "{} {} already exists, use --force to override",
        "::".yellow(),
        path.display().bold()
    );
}
