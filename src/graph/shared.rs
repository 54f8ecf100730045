use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::graph::node::{NodeId, ParamRef, SignalGraph};

/// A graph shared between the control thread and an audio callback.
///
/// Scheduling calls lock for the duration of one call. The render side locks
/// once per callback through [`SharedGraph::lock`].
pub struct SharedGraph<G> {
    inner: Arc<Mutex<G>>,
}

impl<G> SharedGraph<G> {
    pub fn new(graph: G) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// A panic on the other side leaves the graph usable, so poisoning is
    /// ignored.
    pub fn lock(&self) -> MutexGuard<'_, G> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G> Clone for SharedGraph<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: SignalGraph> SignalGraph for SharedGraph<G> {
    fn current_time(&self) -> f64 {
        self.lock().current_time()
    }

    fn destination(&self) -> Option<NodeId> {
        self.lock().destination()
    }

    fn create_oscillator(&mut self, frequency: f64) -> NodeId {
        self.lock().create_oscillator(frequency)
    }

    fn create_gain(&mut self, gain: f64) -> NodeId {
        self.lock().create_gain(gain)
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        self.lock().connect(from, to)
    }

    fn set_value_at_time(&mut self, param: ParamRef, value: f64, time: f64) {
        self.lock().set_value_at_time(param, value, time)
    }

    fn cancel_scheduled_values(&mut self, param: ParamRef, time: f64) {
        self.lock().cancel_scheduled_values(param, time)
    }

    fn start(&mut self, oscillator: NodeId, time: f64) {
        self.lock().start(oscillator, time)
    }

    fn stop(&mut self, oscillator: NodeId, time: f64) {
        self.lock().stop(oscillator, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SoftwareGraph;

    #[test]
    fn clones_schedule_into_the_same_graph() {
        let mut control = SharedGraph::new(SoftwareGraph::new(48_000.0));
        let render = control.clone();

        let osc = control.create_oscillator(440.0);
        control.start(osc, 0.0);

        assert_eq!(render.lock().oscillator_count(), 1);
        assert_eq!(render.lock().started_at(osc), Some(0.0));
    }

    #[test]
    fn rendering_moves_the_shared_clock() {
        let control = SharedGraph::new(SoftwareGraph::new(48_000.0));
        let render = control.clone();

        let mut buffer = vec![0.0f32; 480];
        render.lock().render(&mut buffer);

        assert!((control.current_time() - 0.01).abs() < 1e-12);
    }
}
