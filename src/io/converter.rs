use crate::{
    io::midi::{MidiEvent, ALL_NOTES_OFF, ALL_SOUND_OFF},
    synth::message::SynthMessage,
};

/// Map a decoded MIDI event to a port-level synth message.
///
/// Channels are ignored. Everything a port does not act on maps to `None`.
pub fn midi_to_synth(midi: MidiEvent) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::ControlChange { controller, .. }
            if controller == ALL_SOUND_OFF || controller == ALL_NOTES_OFF =>
        {
            Some(SynthMessage::AllSoundOff)
        }
        _ => None,
    }
}

/// Equal-tempered frequency of a MIDI note, A4 (note 69) = 440 Hz.
///
/// Notes outside 0..=127 extrapolate the same curve.
pub fn midi_note_to_freq(note: i32) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}
