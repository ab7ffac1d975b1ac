/// Message types delivered by the MIDI bridge to the render thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarMessage {
    NoteOn(u8, u8), // (note, velocity)
    NoteOff(u8),
    ControlChange(u8, u8), // (controller, value)
}
