//! The signal graph the synthesizer schedules against.
//!
//! Ports only ever see the [`SignalGraph`] trait. [`SoftwareGraph`] is the
//! in-process implementation used for offline rendering, tests and the demo
//! binary; [`SharedGraph`] lets one graph be scheduled from the control
//! thread while an audio callback renders it.

/// Set-value-at-time parameter timelines.
pub mod automation;
/// Node handles, parameter references and the graph trait.
pub mod node;
/// Mutex-backed handle for cross-thread use.
pub mod shared;
/// Square oscillators and gain stages rendered in-process.
pub mod software;

pub use automation::AutomationParam;
pub use node::{NodeId, ParamKind, ParamRef, SignalGraph};
pub use shared::SharedGraph;
pub use software::SoftwareGraph;
