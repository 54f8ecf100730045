pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::graph::SignalGraph;

/// Everything ports schedule against: the signal graph and the caller clock.
///
/// One context is owned by a [`PortBank`](crate::PortBank) and lent to each
/// port for the duration of a message.
pub struct SynthContext<G, C> {
    pub graph: G,
    pub clock: C,
}

impl<G: SignalGraph, C: Clock> SynthContext<G, C> {
    pub fn new(graph: G, clock: C) -> Self {
        Self { graph, clock }
    }

    /// Audio-clock time for a message stamped `at_ms` on the caller clock.
    pub fn resolve_time(&self, at_ms: Option<f64>) -> f64 {
        scheduler::resolve_time(self.graph.current_time(), self.clock.now_ms(), at_ms)
    }
}
