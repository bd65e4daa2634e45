use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use tokio::fs;
use tracing::debug;

use subhd::{Provider, SubHd, Subtitle};

use super::VideoArgs;
use crate::tui;

/// Download subtitles
#[derive(Parser, Debug, Default)]
#[command(arg_required_else_help(true))]
pub struct Args {
    #[command(flatten)]
    pub video: VideoArgs,

    /// Root path where store files
    #[arg(default_value = ".", short, long)]
    pub dir: PathBuf,

    /// Take the best ranked subtitle without asking
    #[arg(short, long)]
    pub best: bool,

    /// Override existent files
    #[arg(short, long)]
    pub force: bool,
}

pub async fn execute(cmd: Args) -> Result<()> {
    let video = cmd.video.video()?;
    let provider = SubHd::initialize(cmd.video.config()?)?;

    let spinner = tui::spinner(format!("Searching {video}"));
    let res = super::search(&provider, &video).await;
    spinner.finish_and_clear();

    let res = match res {
        Ok(scored) if scored.is_empty() => {
            tui::print_empty(&video);
            Ok(())
        }
        Ok(scored) => {
            let selected: Vec<Subtitle> = if cmd.best {
                scored.into_iter().take(1).map(|s| s.subtitle).collect()
            } else {
                tui::select_subtitles(&video, scored)?
            };

            download_all(&provider, selected, &cmd.dir, cmd.force).await
        }
        Err(err) => Err(err),
    };
    provider.terminate();

    res
}

async fn download_all(
    provider: &SubHd,
    subtitles: Vec<Subtitle>,
    dir: &Path,
    force: bool,
) -> Result<()> {
    ensure!(!subtitles.is_empty(), "Invalid input");

    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Unable to create {}", dir.display()))?;
    }

    for mut subtitle in subtitles {
        let path = dir.join(filename(&subtitle)?);
        if path.exists() && !force {
            tui::print_skipped(&path);
            continue;
        }

        let spinner = tui::spinner(format!("Downloading {}", subtitle.url));
        let res = provider.download_subtitle(&mut subtitle).await;
        if res.is_err() {
            spinner.finish_and_clear();
        }
        res.with_context(|| format!("Unable to download {}", subtitle.url))?;

        let content = subtitle
            .content
            .as_deref()
            .context("Downloaded subtitle has no content")?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Unable to write {}", path.display()))?;

        debug!(path = %path.display(), bytes = content.len(), "Saved subtitle");
        spinner.finish_with_message(format!("{} 👍", path.display()));
    }

    Ok(())
}

/// `<id>.chs.srt`, the id being the one the site resolves downloads with
fn filename(subtitle: &Subtitle) -> Result<String> {
    let id = subtitle
        .id()
        .with_context(|| format!("No subtitle id in `{}`", subtitle.url))?;

    Ok(format!("{id}.chs.srt"))
}
