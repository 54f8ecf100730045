use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// What a port acts on once the raw bytes are decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    /// Stop and discard every voice on the port.
    AllSoundOff,
}

/// Raw message bytes addressed to one port of a bank.
///
/// Fixed size so it can travel through a realtime-safe queue from a MIDI
/// input thread to the control thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PortEvent {
    pub port: usize,
    bytes: [u8; 3],
    len: u8,
    /// Caller-clock timestamp in milliseconds, `None` for immediately.
    pub at: Option<f64>,
}

impl PortEvent {
    /// Bytes past the third are dropped.
    pub fn new(port: usize, message: &[u8], at: Option<f64>) -> Self {
        let len = message.len().min(3);
        let mut bytes = [0; 3];
        bytes[..len].copy_from_slice(&message[..len]);
        Self {
            port,
            bytes,
            len: len as u8,
            at,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<PortEvent>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<PortEvent> {
    fn pop(&mut self) -> Option<PortEvent> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<PortEvent> {
    fn pop(&mut self) -> Option<PortEvent> {
        self.pop_front()
    }
}
