//! Low-level DSP primitives used by the software signal graph.
//!
//! These stay focused on per-sample math. Scheduling and routing live in
//! `graph`.

/// Gain and summing helpers.
pub mod amplify;
/// Square-wave oscillator.
pub mod oscillator;

pub use oscillator::SquareOscillator;
