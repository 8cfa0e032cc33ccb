/// ANSI color helper constants for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Status color: eligible → green, not eligible → red.
pub fn color_for_status(is_eligible: bool) -> &'static str {
    if is_eligible { GREEN } else { RED }
}
