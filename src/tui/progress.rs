use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::style::SPINNER_TEMPLATE;

/// Spinner ticking on stderr until finished
pub fn spinner(msg: String) -> ProgressBar {
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner().with_style(style).with_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}
