use colored::*;
use indicatif::ProgressStyle;
use pingado_core::sweeper::SweepProgress;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::terminal::colors;
use crate::terminal::logging::{PRINT_TARGET, PingadoFormatter};

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
    "▁▁▁▁▁",
];

/// Installs the global subscriber.
///
/// Log lines and printed output go through the indicatif writer so they land
/// above a running spinner instead of tearing it. `RUST_LOG` overrides the
/// level picked from `quiet`.
pub fn init_logging(quiet: u8) {
    let default_directive: String = match quiet {
        0 => "info".to_string(),
        _ => format!("warn,{PRINT_TARGET}=info"),
    };
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style());
    let writer = indicatif_layer.get_stdout_writer();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(PingadoFormatter)
                .with_writer(writer),
        )
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// Writes the sweep's progress into the spinner attached to `span`.
pub fn report_sweep_progress(span: &Span, progress: SweepProgress) {
    let alive: ColoredString = format!("{} hosts", progress.alive).green().bold();
    let message: String = format!(
        "Probed {}/{}, {alive} alive so far... {}",
        progress.completed,
        progress.total,
        "(press 'q' to stop)".italic().dimmed()
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();
    span.pb_set_message(&message);
}
