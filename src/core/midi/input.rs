use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use midir::{MidiInput, MidiInputConnection};

use crate::messaging::RadarMessage;

/// Handles MIDI input from connected devices.
///
/// Every available input port is attached so the trail aggregates whatever
/// the player has plugged in. The channel nibble is deliberately ignored:
/// note state is aggregated across all channels.
pub struct MidiBridge {
    connections: Vec<MidiInputConnection<()>>,
    port_names: Vec<String>,
    message_sender: Sender<RadarMessage>,
}

impl MidiBridge {
    /// Create a new MIDI bridge feeding the given sender.
    pub fn new(message_sender: Sender<RadarMessage>) -> Self {
        Self {
            connections: Vec::new(),
            port_names: Vec::new(),
            message_sender,
        }
    }

    /// Names of the ports currently attached.
    pub fn port_names(&self) -> &[String] {
        &self.port_names
    }

    /// Drop any existing connections and attach to every input port found.
    /// Returns the number of ports attached; zero is a valid (silent) state.
    pub fn connect_all(&mut self) -> Result<usize> {
        self.connections.clear();
        self.port_names.clear();

        let midi_in = MidiInput::new("midi-radar input")
            .context("failed to initialize MIDI input")?;

        for port in midi_in.ports() {
            let name = midi_in
                .port_name(&port)
                .unwrap_or_else(|_| "unknown port".to_string());

            // midir consumes the MidiInput on connect, so each port gets its
            // own instance.
            let port_input = match MidiInput::new("midi-radar input") {
                Ok(input) => input,
                Err(err) => {
                    log::warn!("skipping MIDI port {name}: {err}");
                    continue;
                }
            };

            let sender = self.message_sender.clone();
            match port_input.connect(
                &port,
                "midi-radar-read",
                move |_stamp, message, _| {
                    Self::handle_midi_message(message, &sender);
                },
                (),
            ) {
                Ok(conn) => {
                    log::info!("listening on MIDI port: {name}");
                    self.connections.push(conn);
                    self.port_names.push(name);
                }
                Err(err) => {
                    log::warn!("failed to connect to MIDI port {name}: {err}");
                }
            }
        }

        Ok(self.connections.len())
    }

    /// Parse a raw MIDI message and forward anything the note store consumes.
    fn handle_midi_message(message: &[u8], sender: &Sender<RadarMessage>) {
        if message.len() < 3 {
            return;
        }

        // Message type from the status byte; the channel nibble is dropped.
        let status = message[0] & 0xF0;
        let data1 = message[1];
        let data2 = message[2];

        match status {
            0x90 => {
                // Note On with velocity 0 is equivalent to Note Off.
                if data2 > 0 {
                    sender.send(RadarMessage::NoteOn(data1, data2)).ok();
                } else {
                    sender.send(RadarMessage::NoteOff(data1)).ok();
                }
            }
            0x80 => {
                sender.send(RadarMessage::NoteOff(data1)).ok();
            }
            0xB0 => {
                sender.send(RadarMessage::ControlChange(data1, data2)).ok();
            }
            _ => {
                // Other MIDI message types carry nothing the trail renders.
            }
        }
    }
}
