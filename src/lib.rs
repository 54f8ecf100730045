//! Multi-port polyphonic square-wave synthesizer.
//!
//! A [`PortBank`](synth::bank::PortBank) owns a fixed set of ports. Each port
//! accepts raw MIDI channel-voice bytes and schedules oscillator and gain
//! changes on an injected [`SignalGraph`](graph::SignalGraph).

pub mod config;
pub mod dsp;
pub mod engine; // Clock and time resolution
pub mod error;
pub mod graph; // Signal graph contract and the software implementation
pub mod io;
pub mod synth; // Voices, ports and the port bank

pub use config::{SynthConfig, VelocityResponse};
pub use error::{Error, Result};
pub use synth::bank::PortBank;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Port count of the full instrument set.
pub const DEFAULT_PORT_COUNT: usize = 16;

/// Per-voice peak gain. One voice on each of sixteen ports peaks at 0.48.
pub const VOICE_PEAK_GAIN: f64 = 0.03;
