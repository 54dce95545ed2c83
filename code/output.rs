//! Where MIDI bytes leave the program.

use log::{debug, info};
use midir::MidiOutputConnection;

use crate::error::Result;
use crate::message::{describe, Channel, Control, Message};

/// Anything that accepts raw MIDI messages.
///
/// The typed `send_*` helpers encode a [`Message`] and hand the bytes to
/// [`OutputDevice::send`], so an implementation only has to move bytes.
pub trait OutputDevice {
  fn send(&mut self, bytes: &[u8]) -> Result<()>;

  /// Releases the device; nothing can be sent afterwards.
  fn close(self)
  where
    Self: Sized,
  {
  }

  fn send_message(&mut self, message: &Message) -> Result<()> {
    let bytes: [u8; 3] = message.to_bytes()?;
    debug!("send {}", describe(&bytes));
    self.send(&bytes)
  }

  fn send_note_on(&mut self, channel: Channel, note: u8, velocity: u8) -> Result<()> {
    self.send_message(&Message::NoteOn { channel, note, velocity })
  }

  fn send_note_off(&mut self, channel: Channel, note: u8, velocity: u8) -> Result<()> {
    self.send_message(&Message::NoteOff { channel, note, velocity })
  }

  fn send_control_change(&mut self, channel: Channel, control: Control, value: u8) -> Result<()> {
    self.send_message(&Message::ControlChange { channel, control, value })
  }

  fn send_pitch_bend(&mut self, channel: Channel, value: u16) -> Result<()> {
    self.send_message(&Message::PitchBend { channel, value })
  }
}

/// An open connection to a hardware or virtual MIDI output port.
pub struct MidiOut {
  conn: MidiOutputConnection,
  port_name: String,
}

impl MidiOut {
  pub fn new(conn: MidiOutputConnection, port_name: String) -> MidiOut {
    info!("opened output port '{}'", port_name);
    MidiOut { conn, port_name }
  }

  pub fn port_name(&self) -> &str {
    &self.port_name
  }
}

impl OutputDevice for MidiOut {
  fn send(&mut self, bytes: &[u8]) -> Result<()> {
    self.conn.send(bytes)?;
    Ok(())
  }

  /// Ends the connection. The port is released when this returns.
  fn close(self) {
    let _ = self.conn.close();
    info!("closed output port '{}'", self.port_name);
  }
}

impl<D: OutputDevice + ?Sized> OutputDevice for &mut D {
  fn send(&mut self, bytes: &[u8]) -> Result<()> {
    (**self).send(bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;

  /// Records every message instead of sending it anywhere.
  impl OutputDevice for Vec<Vec<u8>> {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
      self.push(bytes.to_vec());
      Ok(())
    }
  }

  #[test]
  fn typed_helpers_encode_before_sending() {
    let mut sent: Vec<Vec<u8>> = Vec::new();
    sent.send_note_on(Channel::ONE, 60, 80).unwrap();
    sent.send_control_change(Channel::ONE, Control::SUSTAIN_PEDAL, 0).unwrap();
    sent.send_pitch_bend(Channel::ONE, 8192).unwrap();
    sent.send_note_off(Channel::ONE, 60, 80).unwrap();
    assert_eq!(sent, vec![
      vec![0x90, 60, 80],
      vec![0xB0, 64, 0],
      vec![0xE0, 0x00, 0x40],
      vec![0x80, 60, 80],
    ]);
  }

  #[test]
  fn invalid_messages_never_reach_the_device() {
    let mut sent: Vec<Vec<u8>> = Vec::new();
    let result: Result<()> = sent.send_note_on(Channel::ONE, 200, 80);
    assert!(matches!(result, Err(Error::DataByteOutOfRange(200))));
    assert!(sent.is_empty());
  }
}
