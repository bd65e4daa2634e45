use owo_colors::OwoColorize;

mod cli;
mod tui;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
