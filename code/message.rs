//! Channel-voice messages sent by the demo.
//!
//! Only the three-byte messages we actually emit are modelled here: note on,
//! note off, control change and pitch bend.

use std::fmt;

use crate::error::{Error, Result};

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const CONTROL_CHANGE: u8 = 0xB0;
pub const PITCH_BEND: u8 = 0xE0;

/// 14-bit pitch bend value meaning "no bend".
pub const PITCH_BEND_CENTER: u16 = 8192;
pub const PITCH_BEND_MAX: u16 = 16383;

/// A MIDI channel, stored zero-based as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel(u8);

impl Channel {
  pub const ONE: Channel = Channel(0);

  /// Builds a channel from the 1-16 numbering players use.
  pub fn from_number(number: u8) -> Result<Channel> {
    if (1..=16).contains(&number) {
      Ok(Channel(number - 1))
    } else {
      Err(Error::InvalidChannel(number))
    }
  }

  pub fn index(self) -> u8 {
    self.0
  }
}

impl fmt::Display for Channel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0 + 1)
  }
}

/// A controller number for control-change messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control(pub u8);

impl Control {
  pub const SUSTAIN_PEDAL: Control = Control(64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
  NoteOn { channel: Channel, note: u8, velocity: u8 },
  NoteOff { channel: Channel, note: u8, velocity: u8 },
  ControlChange { channel: Channel, control: Control, value: u8 },
  PitchBend { channel: Channel, value: u16 },
}

impl Message {
  /// Encodes the message as status byte plus two data bytes.
  pub fn to_bytes(&self) -> Result<[u8; 3]> {
    match *self {
      Message::NoteOn { channel, note, velocity } =>
        Ok([NOTE_ON | channel.index(), data(note)?, data(velocity)?]),
      Message::NoteOff { channel, note, velocity } =>
        Ok([NOTE_OFF | channel.index(), data(note)?, data(velocity)?]),
      Message::ControlChange { channel, control, value } =>
        Ok([CONTROL_CHANGE | channel.index(), data(control.0)?, data(value)?]),
      Message::PitchBend { channel, value } => {
        if value > PITCH_BEND_MAX {
          return Err(Error::PitchBendOutOfRange(value));
        }
        // LSB first
        Ok([PITCH_BEND | channel.index(),
            (value & 0x7F) as u8,
            (value >> 7) as u8])
      }
    }
  }
}

fn data(byte: u8) -> Result<u8> {
  if byte > 0x7F {
    Err(Error::DataByteOutOfRange(byte as u16))
  } else {
    Ok(byte)
  }
}

pub fn status_kind(data: &[u8]) -> Option<u8> {
  data.first().map(|status| status & 0xF0)
}

pub fn channel_of(data: &[u8]) -> Option<u8> {
  data.first().map(|status| status & 0x0F)
}

pub fn is_note_on(data: &[u8]) -> bool {
  data.len() >= 3 && status_kind(data) == Some(NOTE_ON) && data[2] > 0
}

pub fn is_note_off(data: &[u8]) -> bool {
  if data.len() < 3 {
    return false;
  }
  // Note off, or note on with velocity 0
  match status_kind(data) {
    Some(NOTE_OFF) => true,
    Some(NOTE_ON) => data[2] == 0,
    _ => false,
  }
}

/// One-line reading of a raw message, for the send log.
pub fn describe(data: &[u8]) -> String {
  let channel: u8 = channel_of(data).unwrap_or(0) + 1;
  if is_note_on(data) {
    return format!("note on ch{} note {} vel {}", channel, data[1], data[2]);
  }
  if is_note_off(data) {
    return format!("note off ch{} note {}", channel, data[1]);
  }
  match (status_kind(data), data.len()) {
    (Some(CONTROL_CHANGE), 3) => format!("control ch{} cc{} = {}", channel, data[1], data[2]),
    (Some(PITCH_BEND), 3) => {
      let value: u16 = data[1] as u16 | (data[2] as u16) << 7;
      format!("pitch bend ch{} {}", channel, value)
    }
    _ => format!("{:02X?}", data),
  }
}
