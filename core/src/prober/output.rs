//! Reading `ping` output.
//!
//! Only the echo reply lines are interpreted; the summary lines differ too much
//! between platforms to be worth parsing.

use std::time::Duration;

const SETUP_FAILURE_MARKERS: &[&str] = &[
    "operation not permitted",
    "permission denied",
    "must be root",
    "access denied",
];

const NETWORK_FAILURE_MARKERS: &[&str] = &[
    "unreachable",
    "transmit failed",
    "could not find host",
    "unknown host",
];

/// Extracts the round-trip time of every echo reply, in output order.
///
/// Duplicate replies are skipped. A Windows `time<1ms` is read as 1 ms.
pub fn parse_rtts(output: &str) -> Vec<Duration> {
    output
        .lines()
        .filter(|line| is_reply_line(line) && !line.contains("DUP!"))
        .filter_map(extract_time)
        .collect()
}

/// True when stderr says the probe itself could not be sent.
pub fn is_setup_failure(stderr: &str) -> bool {
    let lower: String = stderr.to_ascii_lowercase();
    SETUP_FAILURE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Explains why a detailed ping produced no statistics, if the output says so.
///
/// Plain silence (every echo timed out) is not a failure and returns `None`.
pub fn failure_reason(stdout: &str, stderr: &str, replies: usize) -> Option<String> {
    if replies > 0 {
        return None;
    }

    if let Some(line) = stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
        return Some(line.to_string());
    }

    stdout
        .lines()
        .map(str::trim)
        .find(|line| {
            let lower: String = line.to_ascii_lowercase();
            NETWORK_FAILURE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(str::to_string)
}

fn is_reply_line(line: &str) -> bool {
    let lower: String = line.to_ascii_lowercase();
    lower.contains("bytes") && lower.contains(" from ")
}

fn extract_time(line: &str) -> Option<Duration> {
    let idx: usize = line.find("time=").or_else(|| line.find("time<"))?;
    let value: &str = &line[idx + "time=".len()..];
    let end: usize = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    parse_millis(&value[..end])
}

/// Parses a decimal millisecond value such as `0.045` or `11` without going
/// through floats.
fn parse_millis(s: &str) -> Option<Duration> {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    let whole: u64 = int_part.parse().ok()?;

    let mut micros: u64 = 0;
    for (idx, digit) in frac_part.chars().take(3).enumerate() {
        let digit: u64 = digit.to_digit(10)? as u64;
        micros += digit * 10u64.pow(2 - idx as u32);
    }

    Some(Duration::from_micros(whole * 1_000 + micros))
}


// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
