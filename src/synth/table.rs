use crate::{
    graph::{NodeId, SignalGraph},
    io::midi_note_to_freq,
    synth::voice::{VelocityGain, Voice},
};

/// Sparse note number to voice map for one port.
///
/// Voices are kept in allocation order. A port holds at most one voice per
/// note, so a linear scan over at most 128 entries is all the lookup needs.
#[derive(Debug)]
pub struct VoiceTable {
    output: NodeId,
    gain_law: VelocityGain,
    voices: Vec<Voice>,
}

impl VoiceTable {
    /// Voices created by this table route into `output`.
    pub fn new(output: NodeId, gain_law: VelocityGain) -> Self {
        Self {
            output,
            gain_law,
            voices: Vec::new(),
        }
    }

    /// Re-arm the voice for `note`, allocating it first if the note has no
    /// voice. Returns `true` when a voice was allocated.
    pub fn allocate_or_trigger<G: SignalGraph>(
        &mut self,
        graph: &mut G,
        note: u8,
        velocity: u8,
        time: f64,
    ) -> bool {
        let level = self.gain_law.level(velocity);

        if let Some(voice) = self.voices.iter_mut().find(|v| v.note() == note) {
            voice.trigger(graph, level, time);
            return false;
        }

        let voice = Voice::allocate(graph, self.output, note, level, time);
        tracing::debug!(
            note,
            frequency = midi_note_to_freq(i32::from(note)),
            velocity,
            level,
            time,
            oscillator = voice.oscillator().index(),
            "voice allocated"
        );
        self.voices.push(voice);
        true
    }

    /// Silence the voice for `note`. A note that never sounded is ignored.
    pub fn release<G: SignalGraph>(&mut self, graph: &mut G, note: u8, time: f64) {
        if let Some(voice) = self.voices.iter_mut().find(|v| v.note() == note) {
            voice.silence(graph, time);
        }
    }

    /// Kill every voice, newest first, and empty the table. Returns how many
    /// voices were killed.
    pub fn kill_all<G: SignalGraph>(&mut self, graph: &mut G, time: f64) -> usize {
        let killed = self.voices.len();
        while let Some(voice) = self.voices.pop() {
            voice.kill(graph, time);
        }
        killed
    }

    pub fn get(&self, note: u8) -> Option<&Voice> {
        self.voices.iter().find(|v| v.note() == note)
    }

    /// Voices in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
