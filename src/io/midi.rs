/// Controller number that silences every voice immediately.
pub const ALL_SOUND_OFF: u8 = 120;
/// Controller number that releases every held note. Handled like
/// [`ALL_SOUND_OFF`] here.
pub const ALL_NOTES_OFF: u8 = 123;

/// A decoded channel-voice message.
///
/// Only the status nibble selects the variant; the channel is kept for
/// callers that want it but ports merge all channels into one voice space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    PolyPressure { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    PitchBend { channel: u8, value: i16 },
}

impl MidiEvent {
    /// Decode `[status, data1, data2?]`.
    ///
    /// Returns `None` for system messages, running-status data bytes and
    /// messages too short for their type. A missing trailing value on
    /// note-off or control change reads as 0.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let data1 = data.first().copied();
        let data2 = data.get(1).copied();

        let event = match status & 0xF0 {
            0x80 => MidiEvent::NoteOff {
                channel,
                key: data1?,
                velocity: data2.unwrap_or(0),
            },
            0x90 => MidiEvent::NoteOn {
                channel,
                key: data1?,
                velocity: data2?,
            },
            0xA0 => MidiEvent::PolyPressure {
                channel,
                key: data1?,
                pressure: data2?,
            },
            0xB0 => MidiEvent::ControlChange {
                channel,
                controller: data1?,
                value: data2.unwrap_or(0),
            },
            0xC0 => MidiEvent::ProgramChange {
                channel,
                program: data1?,
            },
            0xD0 => MidiEvent::ChannelPressure {
                channel,
                pressure: data1?,
            },
            0xE0 => {
                let lsb = data1? as i16 & 0x7F;
                let msb = data2? as i16 & 0x7F;
                MidiEvent::PitchBend {
                    channel,
                    value: ((msb << 7) | lsb) - 8192,
                }
            }
            _ => return None,
        };

        Some(event)
    }
}
