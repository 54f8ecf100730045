use crate::{
    dsp::{amplify, SquareOscillator},
    graph::{
        automation::AutomationParam,
        node::{NodeId, ParamKind, ParamRef, SignalGraph},
    },
    MAX_BLOCK_SIZE,
};

enum NodeKind {
    Destination,
    Oscillator {
        osc: SquareOscillator,
        frequency: AutomationParam,
        start: Option<f64>,
        stop: Option<f64>,
    },
    Gain {
        gain: AutomationParam,
    },
}

struct Node {
    kind: NodeKind,
    inputs: Vec<NodeId>,
    /// Stages this node feeds.
    outputs: Vec<NodeId>,
    /// Holds one input at a time while summing; a gain curve afterwards.
    scratch: Vec<f32>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        let scratch = match kind {
            NodeKind::Oscillator { .. } => Vec::new(),
            _ => vec![0.0; MAX_BLOCK_SIZE],
        };
        Self {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            scratch,
        }
    }

    fn is_summing(&self) -> bool {
        !matches!(self.kind, NodeKind::Oscillator { .. })
    }

    fn is_orphaned_gain(&self) -> bool {
        matches!(self.kind, NodeKind::Gain { .. }) && self.inputs.is_empty()
    }

    fn stop_time(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Oscillator { stop, .. } => stop,
            _ => None,
        }
    }

    fn param_mut(&mut self, kind: ParamKind) -> Option<&mut AutomationParam> {
        match (&mut self.kind, kind) {
            (NodeKind::Oscillator { frequency, .. }, ParamKind::Frequency) => Some(frequency),
            (NodeKind::Gain { gain }, ParamKind::Gain) => Some(gain),
            _ => None,
        }
    }

    fn param(&self, kind: ParamKind) -> Option<&AutomationParam> {
        match (&self.kind, kind) {
            (NodeKind::Oscillator { frequency, .. }, ParamKind::Frequency) => Some(frequency),
            (NodeKind::Gain { gain }, ParamKind::Gain) => Some(gain),
            _ => None,
        }
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

fn lookup(slots: &[Slot], id: NodeId) -> Option<&Node> {
    slots
        .get(id.index())
        .filter(|slot| slot.generation == id.generation())
        .and_then(|slot| slot.node.as_ref())
}

/// In-process signal graph that renders mono `f32` audio.
///
/// Oscillators are square waves. Gain stages and the destination sum their
/// inputs; a gain stage then multiplies by its automated gain per frame.
/// Each node is expected to feed a single stage.
///
/// Slots of collected nodes are reused. Every reuse bumps the slot's
/// generation, so a handle to a collected node stays inert.
pub struct SoftwareGraph {
    sample_rate: f64,
    frames: u64,
    slots: Vec<Slot>,
    free: Vec<usize>,
    destination: NodeId,
    /// Oscillators with a stop time that have not been collected yet.
    stopping: Vec<NodeId>,
    /// Reused each block by `collect_finished`.
    due: Vec<NodeId>,
}

impl SoftwareGraph {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            frames: 0,
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeKind::Destination)),
            }],
            free: Vec::new(),
            destination: NodeId::new(0, 0),
            stopping: Vec::new(),
            due: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Render the destination into `out` and advance the clock by
    /// `out.len()` frames.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let start = self.current_time();
            self.render_node(self.destination, start, chunk);
            self.frames += chunk.len() as u64;

            let now = self.current_time();
            self.compact(now);
            self.collect_finished(now);
        }
    }

    fn render_node(&mut self, id: NodeId, start: f64, out: &mut [f32]) {
        out.fill(0.0);
        let sample_rate = self.sample_rate;
        let Some(node) = self.node_mut(id) else {
            return;
        };

        if let NodeKind::Oscillator {
            osc,
            frequency,
            start: on,
            stop: off,
        } = &mut node.kind
        {
            let Some(on) = *on else {
                return;
            };
            let off = *off;
            for (i, sample) in out.iter_mut().enumerate() {
                let t = start + i as f64 / sample_rate;
                if t >= on && off.map_or(true, |off| t < off) {
                    *sample = osc.next_sample(frequency.value_at(t), sample_rate);
                }
            }
            return;
        }

        // Taken out of the node so inputs can be rendered through `self`.
        let inputs = std::mem::take(&mut node.inputs);
        let mut scratch = std::mem::take(&mut node.scratch);
        let frames = out.len();
        // Empty when this node is re-entered through a cycle
        if scratch.len() < frames {
            scratch.resize(frames, 0.0);
        }

        for &input in &inputs {
            self.render_node(input, start, &mut scratch[..frames]);
            amplify::accumulate(out, &scratch[..frames]);
        }

        let Some(node) = self.node_mut(id) else {
            return;
        };
        if let NodeKind::Gain { gain } = &node.kind {
            for (i, g) in scratch[..frames].iter_mut().enumerate() {
                *g = gain.value_at(start + i as f64 / sample_rate) as f32;
            }
            amplify::multiply_in_place(out, &scratch[..frames]);
        }
        node.inputs = inputs;
        node.scratch = scratch;
    }

    fn compact(&mut self, now: f64) {
        for node in self.slots.iter_mut().filter_map(|slot| slot.node.as_mut()) {
            match &mut node.kind {
                NodeKind::Oscillator { frequency, .. } => frequency.compact(now),
                NodeKind::Gain { gain } => gain.compact(now),
                NodeKind::Destination => {}
            }
        }
    }

    /// Drop oscillators whose stop time has passed, along with a gain stage
    /// that was fed only by that oscillator.
    fn collect_finished(&mut self, now: f64) {
        let mut due = std::mem::take(&mut self.due);
        let slots = &self.slots;
        self.stopping.retain(|&id| match lookup(slots, id).and_then(Node::stop_time) {
            Some(stop) if stop <= now => {
                due.push(id);
                false
            }
            Some(_) => true,
            None => false,
        });

        for oscillator in due.drain(..) {
            let Some(node) = self.remove(oscillator) else {
                continue;
            };
            for &parent in &node.outputs {
                if self.node(parent).is_some_and(Node::is_orphaned_gain) {
                    self.remove(parent);
                }
            }
        }
        self.due = due;
    }

    /// Take `id` out of its slot and unlink it from its neighbours.
    fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());

        for &parent in &node.outputs {
            if let Some(parent) = self.node_mut(parent) {
                parent.inputs.retain(|&input| input != id);
            }
        }
        for &input in &node.inputs {
            if let Some(input) = self.node_mut(input) {
                input.outputs.retain(|&output| output != id);
            }
        }
        Some(node)
    }

    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId::new(index, slot.generation), node))
        })
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        lookup(&self.slots, id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(self.slots.len() - 1, 0)
    }

    /// Number of slots held, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn oscillator_count(&self) -> usize {
        self.iter_nodes()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Oscillator { .. }))
            .count()
    }

    pub fn gain_count(&self) -> usize {
        self.iter_nodes()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Gain { .. }))
            .count()
    }

    /// Current frequency of an oscillator, ignoring pending changes.
    pub fn frequency_of(&self, oscillator: NodeId) -> Option<f64> {
        self.param(ParamRef::frequency(oscillator))
            .map(|param| param.value_at(self.current_time()))
    }

    pub fn started_at(&self, oscillator: NodeId) -> Option<f64> {
        match self.node(oscillator)?.kind {
            NodeKind::Oscillator { start, .. } => start,
            _ => None,
        }
    }

    pub fn stopped_at(&self, oscillator: NodeId) -> Option<f64> {
        match self.node(oscillator)?.kind {
            NodeKind::Oscillator { stop, .. } => stop,
            _ => None,
        }
    }

    pub fn param(&self, param: ParamRef) -> Option<&AutomationParam> {
        self.node(param.node)?.param(param.kind)
    }

    pub fn inputs_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.inputs.as_slice()).unwrap_or(&[])
    }
}

impl SignalGraph for SoftwareGraph {
    fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate
    }

    fn destination(&self) -> Option<NodeId> {
        Some(self.destination)
    }

    fn create_oscillator(&mut self, frequency: f64) -> NodeId {
        self.insert(Node::new(NodeKind::Oscillator {
            osc: SquareOscillator::new(),
            frequency: AutomationParam::new(frequency),
            start: None,
            stop: None,
        }))
    }

    fn create_gain(&mut self, gain: f64) -> NodeId {
        self.insert(Node::new(NodeKind::Gain {
            gain: AutomationParam::new(gain),
        }))
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        if from == to || !self.contains(from) {
            return;
        }
        let Some(node) = self.node_mut(to) else {
            return;
        };
        if !node.is_summing() || node.inputs.contains(&from) {
            return;
        }
        node.inputs.push(from);
        if let Some(node) = self.node_mut(from) {
            node.outputs.push(to);
        }
    }

    fn set_value_at_time(&mut self, param: ParamRef, value: f64, time: f64) {
        if let Some(automation) = self
            .node_mut(param.node)
            .and_then(|node| node.param_mut(param.kind))
        {
            automation.set_value_at_time(value, time);
        }
    }

    fn cancel_scheduled_values(&mut self, param: ParamRef, time: f64) {
        if let Some(automation) = self
            .node_mut(param.node)
            .and_then(|node| node.param_mut(param.kind))
        {
            automation.cancel_from(time);
        }
    }

    fn start(&mut self, oscillator: NodeId, time: f64) {
        if let Some(Node {
            kind: NodeKind::Oscillator { start, .. },
            ..
        }) = self.node_mut(oscillator)
        {
            // An oscillator starts once; later calls are ignored.
            start.get_or_insert(time);
        }
    }

    fn stop(&mut self, oscillator: NodeId, time: f64) {
        if let Some(Node {
            kind: NodeKind::Oscillator { stop, .. },
            ..
        }) = self.node_mut(oscillator)
        {
            if stop.replace(time).is_none() {
                self.stopping.push(oscillator);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 48_000.0;

    fn voice(graph: &mut SoftwareGraph, frequency: f64, level: f64) -> (NodeId, NodeId) {
        let osc = graph.create_oscillator(frequency);
        let gain = graph.create_gain(level);
        graph.connect(osc, gain);
        let destination = graph.destination().unwrap();
        graph.connect(gain, destination);
        (osc, gain)
    }

    #[test]
    fn unstarted_oscillator_is_silent() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        voice(&mut graph, 440.0, 1.0);

        let mut buffer = vec![1.0f32; 256];
        graph.render(&mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn gain_scales_started_oscillator() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let (osc, _) = voice(&mut graph, 440.0, 0.25);
        graph.start(osc, 0.0);

        let mut buffer = vec![0.0f32; 256];
        graph.render(&mut buffer);

        assert!(buffer.iter().all(|s| s.abs() == 0.25));
    }

    #[test]
    fn scheduled_gain_takes_effect_at_its_frame() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let (osc, gain) = voice(&mut graph, 440.0, 0.0);
        graph.start(osc, 0.0);
        graph.set_value_at_time(ParamRef::gain(gain), 0.5, 100.0 / SAMPLE_RATE);

        let mut buffer = vec![0.0f32; 200];
        graph.render(&mut buffer);

        assert!(buffer[..100].iter().all(|&s| s == 0.0));
        assert!(buffer[100..].iter().all(|s| s.abs() == 0.5));
    }

    #[test]
    fn render_advances_clock() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let mut buffer = vec![0.0f32; 4_800];
        graph.render(&mut buffer);

        assert!((graph.current_time() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn stopped_voice_is_collected_after_stop_time() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let (osc, gain) = voice(&mut graph, 440.0, 1.0);
        graph.start(osc, 0.0);
        graph.stop(osc, 0.01);

        let mut buffer = vec![0.0f32; 960];
        graph.render(&mut buffer);

        assert!(buffer[..480].iter().all(|s| s.abs() == 1.0));
        assert!(buffer[480..].iter().all(|&s| s == 0.0));
        assert!(!graph.contains(osc));
        assert!(!graph.contains(gain));
        assert_eq!(graph.oscillator_count(), 0);
        assert!(graph.inputs_of(graph.destination().unwrap()).is_empty());
    }

    #[test]
    fn shared_gain_stage_survives_collection() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let bus = graph.create_gain(1.0);
        graph.connect(bus, graph.destination().unwrap());
        let osc = graph.create_oscillator(440.0);
        let gain = graph.create_gain(1.0);
        graph.connect(osc, gain);
        graph.connect(gain, bus);
        graph.start(osc, 0.0);
        graph.stop(osc, 0.0);

        let mut buffer = vec![0.0f32; 64];
        graph.render(&mut buffer);

        assert!(!graph.contains(gain));
        assert!(graph.contains(bus));
        assert!(graph.inputs_of(bus).is_empty());
    }

    #[test]
    fn collected_slot_is_reused_with_new_generation() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let old = graph.create_oscillator(440.0);
        graph.start(old, 0.0);
        graph.stop(old, 0.0);
        let mut buffer = vec![0.0f32; 64];
        graph.render(&mut buffer);
        let slots = graph.slot_count();

        let new = graph.create_oscillator(220.0);

        assert_eq!(graph.slot_count(), slots);
        assert_eq!(new.index(), old.index());
        assert_ne!(new, old);
        assert!(!graph.contains(old));
        graph.stop(old, 0.0);
        graph.set_value_at_time(ParamRef::frequency(old), 880.0, 0.0);
        assert_eq!(graph.stopped_at(new), None);
        assert_eq!(graph.frequency_of(new), Some(220.0));
    }

    #[test]
    fn repeated_voice_churn_keeps_slots_bounded() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let mut buffer = vec![0.0f32; 64];

        for _ in 0..1_000 {
            let now = graph.current_time();
            let (osc, _) = voice(&mut graph, 440.0, 1.0);
            graph.start(osc, now);
            graph.stop(osc, now);
            graph.render(&mut buffer);
        }

        assert_eq!(graph.slot_count(), 3);
        assert_eq!(graph.oscillator_count(), 0);
        assert_eq!(graph.gain_count(), 0);
    }

    #[test]
    fn cancel_removes_pending_frequency_change() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let osc = graph.create_oscillator(440.0);
        let frequency = ParamRef::frequency(osc);
        graph.set_value_at_time(frequency, 880.0, 1.0);
        graph.cancel_scheduled_values(frequency, 0.5);

        assert!(graph.param(frequency).unwrap().events().is_empty());
        assert_eq!(graph.frequency_of(osc), Some(440.0));
    }

    #[test]
    fn mismatched_params_are_ignored() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let gain = graph.create_gain(1.0);
        graph.set_value_at_time(ParamRef::frequency(gain), 100.0, 0.0);

        assert!(graph.param(ParamRef::frequency(gain)).is_none());
        assert_eq!(graph.param(ParamRef::gain(gain)).unwrap().final_value(), 1.0);
    }

    #[test]
    fn oscillators_cannot_take_inputs() {
        let mut graph = SoftwareGraph::new(SAMPLE_RATE);
        let a = graph.create_oscillator(440.0);
        let b = graph.create_oscillator(220.0);
        graph.connect(a, b);

        assert!(graph.inputs_of(b).is_empty());
    }
}
