use crossterm::style::{Color, Stylize};

/// Print a success message in green to stderr.
pub fn success(msg: &str) {
    eprintln!("{}", msg.with(Color::Green));
}

/// Print an error message in red to stderr.
pub fn error(msg: &str) {
    eprintln!("{}", msg.with(Color::Red));
}

/// Print a warning message in yellow to stderr.
pub fn warning(msg: &str) {
    eprintln!("{}", msg.with(Color::Yellow));
}
