// Purpose - inbound message decoding and note/frequency conversion

pub mod converter;
pub mod midi;

pub use converter::{midi_note_to_freq, midi_to_synth};
pub use midi::MidiEvent;
