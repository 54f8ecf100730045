// Purpose: per-port polyphonic voice management
// Ports decode messages and drive their voice table against the signal graph

pub mod bank;
pub mod message;
pub mod port;
pub mod table;
pub mod voice;

pub use bank::{create_ports, PortBank};
pub use message::{MessageReceiver, PortEvent, SynthMessage};
pub use port::Port;
pub use table::VoiceTable;
pub use voice::{VelocityGain, Voice, VoiceState};
