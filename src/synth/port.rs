use crate::{
    engine::{Clock, SynthContext},
    graph::{NodeId, SignalGraph},
    io::{midi_to_synth, MidiEvent},
    synth::{
        message::SynthMessage,
        table::VoiceTable,
        voice::{VelocityGain, Voice},
    },
};

/// One addressable instrument: a voice table feeding a shared output stage.
///
/// All sixteen MIDI channels land in the same voice space.
#[derive(Debug)]
pub struct Port {
    id: String,
    name: String,
    output: NodeId,
    voices: VoiceTable,
}

impl Port {
    /// Create the port's output stage at `port_gain` and route it to
    /// `destination`.
    pub fn new<G: SignalGraph>(
        graph: &mut G,
        destination: NodeId,
        id: String,
        name: String,
        port_gain: f64,
        gain_law: VelocityGain,
    ) -> Self {
        let output = graph.create_gain(port_gain);
        graph.connect(output, destination);

        Self {
            id,
            name,
            output,
            voices: VoiceTable::new(output, gain_law),
        }
    }

    /// Handle raw message bytes stamped `at_ms` on the context clock.
    ///
    /// Anything the port does not understand is dropped without error.
    pub fn send<G: SignalGraph, C: Clock>(
        &mut self,
        ctx: &mut SynthContext<G, C>,
        message: &[u8],
        at_ms: Option<f64>,
    ) {
        let Some(msg) = MidiEvent::parse(message).and_then(midi_to_synth) else {
            tracing::trace!(port = %self.id, ?message, "ignored message");
            return;
        };

        let time = ctx.resolve_time(at_ms);
        self.dispatch(&mut ctx.graph, msg, time);
    }

    /// Apply an already decoded message at audio-clock `time`.
    pub fn dispatch<G: SignalGraph>(&mut self, graph: &mut G, msg: SynthMessage, time: f64) {
        let _span = tracing::debug_span!("port", id = %self.id).entered();
        tracing::trace!(?msg, time, "dispatch");

        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                self.voices
                    .allocate_or_trigger(graph, note, velocity, time);
            }
            SynthMessage::NoteOff { note } => self.voices.release(graph, note, time),
            SynthMessage::AllSoundOff => {
                let killed = self.voices.kill_all(graph, time);
                if killed > 0 {
                    tracing::debug!(killed, time, "all sound off");
                }
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The port's shared output gain stage.
    pub fn output(&self) -> NodeId {
        self.output
    }

    pub fn voice(&self, note: u8) -> Option<&Voice> {
        self.voices.get(note)
    }

    pub fn voices(&self) -> &VoiceTable {
        &self.voices
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}
