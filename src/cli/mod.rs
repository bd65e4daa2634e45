use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use subhd::{MatchLabel, Provider, ProviderConfig, ResultOrder, SubHd, Subtitle, Video};

mod download;
mod list;

/// Search and download chinese subtitles from SubHD
#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print debug logs (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// List subtitles for a series episode or a movie
    #[command(alias = "l")]
    List(list::Args),
    /// Download the chosen subtitles
    #[command(alias = "d")]
    Download(download::Args),
}

/// Parameters shared by every subcommand
#[derive(clap::Args, Debug, Default)]
pub struct VideoArgs {
    /// Series or movie name
    #[arg(required = true)]
    pub name: Vec<String>,

    /// Season number, requires `--episode`
    #[arg(short, long, requires = "episode")]
    pub season: Option<u32>,

    /// Episode number, requires `--season`
    #[arg(short, long, requires = "season")]
    pub episode: Option<u32>,

    /// Release year
    #[arg(short, long)]
    pub year: Option<u32>,

    /// Override the site address
    #[arg(long, env = "SUBHD_BASE_URL")]
    pub base_url: Option<String>,

    /// Keep results in page order instead of newest first
    #[arg(long)]
    pub document_order: bool,
}

impl VideoArgs {
    pub fn video(&self) -> Result<Video> {
        let name = self.name.join(" ");
        ensure!(!name.trim().is_empty(), "Empty video name");

        let video = match (self.season, self.episode) {
            (Some(season), Some(episode)) => Video::episode(&name, season, episode, self.year),
            _ => Video::movie(&name, self.year),
        };

        Ok(video)
    }

    pub fn config(&self) -> Result<ProviderConfig> {
        let mut config = ProviderConfig::default();

        if let Some(url) = &self.base_url {
            config = config
                .with_base_url(url)
                .with_context(|| format!("Invalid base url `{url}`"))?;
        }
        if self.document_order {
            config = config.with_order(ResultOrder::Document);
        }

        Ok(config)
    }
}

/// A search result with the labels it shares with the requested video
pub struct Scored {
    pub subtitle: Subtitle,
    pub matches: Vec<MatchLabel>,
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::List(cmd) => list::execute(cmd).await,
        Command::Download(cmd) => download::execute(cmd).await,
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "subhd=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Subtitles of `video`, best first
async fn search(provider: &SubHd, video: &Video) -> Result<Vec<Scored>> {
    let subtitles = provider
        .list_subtitles(video, SubHd::LANGUAGES)
        .await
        .with_context(|| format!("Unable to search subtitles for {video}"))?;

    Ok(rank(subtitles, video))
}

/// Stable sort on the number of matching labels, so ties keep result order
fn rank(subtitles: Vec<Subtitle>, video: &Video) -> Vec<Scored> {
    let mut scored: Vec<_> = subtitles
        .into_iter()
        .map(|subtitle| {
            let matches = subtitle.compute_matches(video).into_iter().collect();
            Scored { subtitle, matches }
        })
        .collect();

    scored.sort_by(|a, b| b.matches.len().cmp(&a.matches.len()));
    scored
}
