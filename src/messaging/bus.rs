use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use super::RadarMessage;

/// MessageBus carries MIDI events from the bridge callbacks to the render
/// thread.
///
/// The app drains the queue to completion at the top of every frame, so
/// events never interleave with rendering and the note store needs no lock.
pub struct MessageBus {
    sender: Sender<RadarMessage>,
    receiver: Receiver<RadarMessage>,
}

impl MessageBus {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();

        MessageBus { sender, receiver }
    }

    /// Get a sender that can be cloned into the midir callbacks.
    pub fn sender(&self) -> Sender<RadarMessage> {
        self.sender.clone()
    }

    /// Try to receive one pending message.
    pub fn try_receive(&self) -> Result<RadarMessage, TryRecvError> {
        self.receiver.try_recv()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_arrive_in_send_order() {
        let bus = MessageBus::new();
        let sender = bus.sender();

        sender.send(RadarMessage::NoteOn(60, 100)).unwrap();
        sender.send(RadarMessage::NoteOff(60)).unwrap();

        assert_eq!(bus.try_receive(), Ok(RadarMessage::NoteOn(60, 100)));
        assert_eq!(bus.try_receive(), Ok(RadarMessage::NoteOff(60)));
        assert!(bus.try_receive().is_err());
    }
}
