use crate::{
    config::VelocityResponse,
    graph::{NodeId, ParamRef, SignalGraph},
    io::midi_note_to_freq,
};

/*
Voice Lifecycle
===============

A voice is one square oscillator feeding one gain stage, bound to a single
note number on a single port. The oscillator runs continuously from its
first note-on; notes are shaped only by scheduling the gain.

    ┌─────────────┐  note-on   ┌──────────┐  note-off  ┌──────────┐
    │ Unallocated │ ─────────→ │ Sounding │ ─────────→ │ Silenced │
    └─────────────┘            └──────────┘ ←───────── └──────────┘
           ↑                        │         note-on       │
           │                        │ all-sound-off         │
           │                        ↓                       │
           │                   ┌────────┐   all-sound-off   │
           └── next note-on ── │ Killed │ ←─────────────────┘
                               └────────┘

Unallocated has no value: it is the absence of a table entry. Killed has
none either: `kill` consumes the voice, so a killed voice cannot be
re-triggered. The next note-on for that note allocates a fresh one.

Re-triggering a live voice only re-arms the gain. Frequency, phase and
routing stay as they are.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Sounding,
    Silenced,
}

/// Velocity to gain law for one port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityGain {
    peak: f64,
    response: VelocityResponse,
}

impl VelocityGain {
    pub fn new(peak: f64, response: VelocityResponse) -> Self {
        Self { peak, response }
    }

    /// Velocities above 127 count as 127 so a voice never exceeds `peak`.
    pub fn level(&self, velocity: u8) -> f64 {
        match self.response {
            VelocityResponse::Linear => self.peak * (f64::from(velocity.min(127)) / 127.0),
            VelocityResponse::Fixed => self.peak * (127.0 / 128.0),
        }
    }
}

#[derive(Debug)]
pub struct Voice {
    note: u8,
    oscillator: NodeId,
    gain: NodeId,
    state: VoiceState,
}

impl Voice {
    /// Build the oscillator and gain pair, route it into `output` and sound
    /// it at `time`.
    pub fn allocate<G: SignalGraph>(
        graph: &mut G,
        output: NodeId,
        note: u8,
        level: f64,
        time: f64,
    ) -> Self {
        let oscillator = graph.create_oscillator(midi_note_to_freq(i32::from(note)));
        let gain = graph.create_gain(0.0);
        graph.connect(oscillator, gain);
        graph.connect(gain, output);
        graph.start(oscillator, time);
        graph.set_value_at_time(ParamRef::gain(gain), level, time);

        Self {
            note,
            oscillator,
            gain,
            state: VoiceState::Sounding,
        }
    }

    pub fn trigger<G: SignalGraph>(&mut self, graph: &mut G, level: f64, time: f64) {
        graph.set_value_at_time(ParamRef::gain(self.gain), level, time);
        self.state = VoiceState::Sounding;
    }

    /// Schedule the gain to zero. The oscillator keeps running.
    pub fn silence<G: SignalGraph>(&mut self, graph: &mut G, time: f64) {
        graph.set_value_at_time(ParamRef::gain(self.gain), 0.0, time);
        self.state = VoiceState::Silenced;
    }

    /// Cancel anything pending, silence and stop the oscillator at `time`.
    pub fn kill<G: SignalGraph>(self, graph: &mut G, time: f64) {
        let gain = ParamRef::gain(self.gain);
        graph.cancel_scheduled_values(ParamRef::frequency(self.oscillator), time);
        graph.cancel_scheduled_values(gain, time);
        graph.set_value_at_time(gain, 0.0, time);
        graph.stop(self.oscillator, time);
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn oscillator(&self) -> NodeId {
        self.oscillator
    }

    pub fn gain(&self) -> NodeId {
        self.gain
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
