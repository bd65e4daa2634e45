use anyhow::Result;
use clap::Parser;

use subhd::{Provider, SubHd};

use super::VideoArgs;
use crate::tui;

/// List subtitles
#[derive(Parser, Debug, Default)]
#[command(arg_required_else_help(true))]
pub struct Args {
    #[command(flatten)]
    pub video: VideoArgs,
}

pub async fn execute(cmd: Args) -> Result<()> {
    let video = cmd.video.video()?;
    let provider = SubHd::initialize(cmd.video.config()?)?;

    let spinner = tui::spinner(format!("Searching {video}"));
    let res = super::search(&provider, &video).await;
    spinner.finish_and_clear();
    provider.terminate();

    let scored = res?;
    if scored.is_empty() {
        tui::print_empty(&video);
        return Ok(());
    }

    tui::print_title(&video.to_string());
    println!("{}", tui::subtitles_table(&scored));

    Ok(())
}
