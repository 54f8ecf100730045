//! simple - plays a short two-port phrase through the default output
//!
//! Run with: cargo run --bin simple

mod app;

use app::Cue;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut cues = Vec::new();

    // Port 00: C major arpeggio, eighth notes at 120 bpm
    for (step, note) in [60, 64, 67, 72, 67, 64, 60, 64].into_iter().enumerate() {
        cues.extend(Cue::note(0, note, step as f64 * 250.0, 200.0));
    }

    // Port 01: root and fifth underneath
    cues.extend(Cue::note(1, 36, 0.0, 900.0));
    cues.extend(Cue::note(1, 43, 1_000.0, 900.0));

    app::play(&cues, 2_100.0)
}
