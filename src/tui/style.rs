use tabled::settings::Color;

/// Color scheme for table columns
pub const TABLE_COLORS_SUBTITLES: [Color; 5] = [
    Color::FG_MAGENTA,
    Color::FG_GREEN,
    Color::FG_BRIGHT_BLUE,
    Color::FG_CYAN,
    Color::FG_YELLOW,
];

pub const TABLE_HEADER_COLOR: Color = Color::FG_WHITE;

pub const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed:.magenta}] {msg:.green}";
