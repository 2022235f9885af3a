//! User-facing output. Every line goes out as a tracing event on
//! [`PRINT_TARGET`] so it shares the terminal with progress bars and logs.

use std::cell::Cell;

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;
use crate::terminal::format::Detail;
use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 9;

thread_local! {
    static KEY_WIDTH: Cell<usize> = const { Cell::new(0) };
}

/// `format!`-style shorthand for [`print`].
#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("")
    };
    ($($arg:tt)*) => {
        $crate::terminal::print::print(&format!($($arg)*))
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, quiet: u8) {
    if no_banner || quiet > 0 {
        return;
    }
    let title: String = format!("⟦ PINGADO v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&ruled(&title, '═', title.bright_green().bold()));
}

/// Section title centered in a thin rule.
pub fn header(title: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", title.to_uppercase());
    print(&ruled(&title, '─', title.bright_green()));
}

pub fn closing_rule() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn no_results(what: &str) {
    let msg: String = format!("∅ {what}");
    let pad: usize = TOTAL_WIDTH.saturating_sub(msg.width()) / 2;
    print("");
    print(&format!("{}{}", " ".repeat(pad), msg.red().bold()));
    print("");
}

/// Sets the key column width used by [`aligned_line`].
pub fn set_key_width<'a>(keys: impl IntoIterator<Item = &'a str>) {
    let width: usize = keys.into_iter().map(str::len).max().unwrap_or(0);
    KEY_WIDTH.set(width);
}

pub fn aligned_line(key: &str, value: ColoredString) {
    print(&key_value_line(key, KEY_WIDTH.get(), &value));
}

/// An indexed entry followed by its details as one level of branches.
pub fn tree(idx: usize, name: &str, details: &[Detail]) {
    let idx: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    print(&format!("{} {}", idx.color(colors::SEPARATOR), name.color(colors::PRIMARY)));
    for line in branch_lines(details) {
        print(&line);
    }
}

/// Pads the uncolored `plain` to [`TOTAL_WIDTH`] with `fill` on both sides and
/// puts `styled` in its place.
fn ruled(plain: &str, fill: char, styled: ColoredString) -> String {
    let free: usize = TOTAL_WIDTH.saturating_sub(plain.width());
    let left: String = fill.to_string().repeat(free / 2);
    let right: String = fill.to_string().repeat(free - free / 2);
    format!("{}{styled}{}", left.color(colors::SEPARATOR), right.color(colors::SEPARATOR))
}

fn key_value_line(key: &str, width: usize, value: &ColoredString) -> String {
    let dots: String = ".".repeat((width + 1).saturating_sub(key.len()));
    format!(
        "{} {}{}{} {value}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
    )
}

fn branch_lines(details: &[Detail]) -> Vec<String> {
    let last: usize = details.len().saturating_sub(1);
    details
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            let branch: &str = if i == last { "└─" } else { "├─" };
            let dots: String = ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.len()));
            format!(
                " {} {}{}{} {value}",
                branch.color(colors::SEPARATOR),
                key.color(colors::TEXT_DEFAULT),
                dots.color(colors::SEPARATOR),
                ":".color(colors::SEPARATOR),
            )
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
