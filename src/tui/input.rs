use anyhow::{Result, bail, ensure};
use owo_colors::OwoColorize;
use rustyline::{ColorMode, DefaultEditor, config::Configurer};

/// Commands that can be parsed from user input
pub enum Command {
    Quit,
    Best,
    Default(String),
}

/// Parses user input commands from the terminal
pub fn parse_commands() -> Result<Command> {
    let mut rl = DefaultEditor::new()?;
    rl.set_color_mode(ColorMode::Enabled);
    let prompt = "~❯ ".red().to_string();
    let cmd = match rl.readline(&prompt).map(|line| line.trim().to_owned()) {
        Ok(line) if line.len() == 1 && line.contains(['q', 'Q']) => Command::Quit,
        Ok(line) if line.is_empty() => Command::Best,
        Ok(line) => Command::Default(line),
        Err(err) => bail!(err),
    };

    Ok(cmd)
}

/// Parses a selection string into sorted 1-based indices
///
/// Supports formats like:
/// - "1,2,3" or "1 2 3" - individual selections
/// - "1-3" - range selection
/// - "2-" - open-ended range (up to `len`)
pub fn parse_input(line: &str, len: usize) -> Result<Vec<usize>> {
    let mut selected = vec![];
    let selection = line
        .split_terminator([' ', ','])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    for s in selection {
        let (start, end) = match s.split_once('-') {
            Some((start, "")) => (start.parse()?, len),
            Some((start, end)) => (start.parse()?, end.parse()?),
            None => {
                let num = s.parse()?;
                (num, num)
            }
        };

        ensure!(start >= 1 && start <= end && end <= len, "Invalid input");
        selected.extend(start..=end);
    }

    selected.sort_unstable();
    selected.dedup();

    Ok(selected)
}
