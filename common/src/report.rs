//! Console reporting: level-tagged lines via [`tracing`] plus the
//! box-drawing primitives for cycle headers, the startup preamble, and
//! the detach alert. Structural lines bypass the glyph formatter
//! through [`RAW_TARGET`].

pub mod colors;

use std::fmt::Display;

use colored::*;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 10;

/// Events with this target carry a pre-rendered `raw_msg` field and
/// must be printed verbatim by the subscriber.
pub const RAW_TARGET: &str = "reprobe::raw";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::report::info_line(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::report::success_line(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::report::warn_line(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::report::error_line(&format!($($arg)*))
    };
}

pub fn info_line(msg: &str) {
    tracing::info!("{msg}");
}

pub fn success_line(msg: &str) {
    tracing::info!("{}", msg.green());
}

pub fn warn_line(msg: &str) {
    tracing::warn!("{msg}");
}

pub fn error_line(msg: &str) {
    tracing::error!("{msg}");
}

/// Emits a pre-rendered line on [`RAW_TARGET`].
pub fn raw(msg: &str) {
    // target must be a literal here; keep in sync with RAW_TARGET
    tracing::info!(target: "reprobe::raw", raw_msg = msg);
}

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn banner(version: &str) {
    let text_content: String = format!("⟦ REPROBE v{} ⟧ ", version);
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat((TOTAL_WIDTH - text_width) / 2).bright_black();
    raw(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    raw(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    raw(&format!("{}", sep));
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    raw(&message);
}

/// Announces check `idx` of `total` before it runs.
pub fn step(idx: usize, total: usize, label: &str) {
    let idx_str: String = format!("[{}/{}]", idx, total);
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        label.color(colors::PRIMARY)
    );
    raw(&output);
}

pub fn cycle_footer(cycle: u64, passed: usize, total: usize) {
    let formatted: String = format!("⟦ CYCLE {} COMPLETE: {}/{} PASSED ⟧", cycle, passed, total);
    let text_width: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(text_width);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: String = format!(
        "{}{}{}",
        "═".repeat(left).bright_black(),
        formatted.bright_green(),
        "═".repeat(right).bright_black()
    );
    raw(&line);
    raw("");
}

/// The prominent notice for the attached -> detached edge.
pub fn detach_alert(cycle: u64) {
    fat_separator();

    let notice: String = format!("!!! CONTROLLING TERMINAL DETACHED (cycle {}) !!!", cycle);
    raw(&format!("{}", centered(&notice).red().bold()));

    let hint: &str = "local connects that fail from here on reproduce the bug";
    raw(&format!("{}", centered(hint).yellow()));

    fat_separator();
}

fn centered(text: &str) -> String {
    let width: usize = UnicodeWidthStr::width(text);
    let pad: usize = TOTAL_WIDTH.saturating_sub(width) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
