/// Handle to a node owned by a [`SignalGraph`].
///
/// The generation lets a graph reuse a slot without an old handle reaching
/// the node that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> usize {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Schedulable parameters a node can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Oscillator frequency in Hz
    Frequency,
    /// Gain stage multiplier
    Gain,
}

/// A named parameter on a specific node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamRef {
    pub node: NodeId,
    pub kind: ParamKind,
}

impl ParamRef {
    pub fn frequency(node: NodeId) -> Self {
        Self {
            node,
            kind: ParamKind::Frequency,
        }
    }

    pub fn gain(node: NodeId) -> Self {
        Self {
            node,
            kind: ParamKind::Gain,
        }
    }
}

/// The audio graph the synthesizer schedules against.
///
/// The control side only creates nodes, wires them and schedules parameter
/// changes at absolute times on the graph's own clock. Rendering happens
/// elsewhere, on the graph's schedule. Calls naming a node the graph no
/// longer holds are ignored.
pub trait SignalGraph {
    /// Audio clock in seconds. Never decreases.
    fn current_time(&self) -> f64;

    /// Device output node, or `None` when the host has no usable output.
    fn destination(&self) -> Option<NodeId>;

    /// Create a square-wave oscillator at `frequency`. It is silent until started.
    fn create_oscillator(&mut self, frequency: f64) -> NodeId;

    fn create_gain(&mut self, gain: f64) -> NodeId;

    fn connect(&mut self, from: NodeId, to: NodeId);

    fn set_value_at_time(&mut self, param: ParamRef, value: f64, time: f64);

    /// Drop every pending change on `param` scheduled at or after `time`.
    fn cancel_scheduled_values(&mut self, param: ParamRef, time: f64);

    fn start(&mut self, oscillator: NodeId, time: f64);

    fn stop(&mut self, oscillator: NodeId, time: f64);
}
