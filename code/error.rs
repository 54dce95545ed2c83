use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("could not initialise MIDI client: {0}")]
  Init(#[from] midir::InitError),

  #[error("could not read MIDI port info: {0}")]
  PortInfo(#[from] midir::PortInfoError),

  #[error("could not connect to MIDI output: {0}")]
  Connect(String),

  #[error("could not send MIDI message: {0}")]
  Send(#[from] midir::SendError),

  #[error("console I/O failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("no output port matches {0}")]
  NoSuchPort(String),

  #[error("virtual MIDI ports are not supported on this platform")]
  VirtualUnsupported,

  #[error("MIDI data byte {0} is out of range (0-127)")]
  DataByteOutOfRange(u16),

  #[error("pitch bend {0} is out of range (0-16383)")]
  PitchBendOutOfRange(u16),

  #[error("speed {0} is out of range (0.01-100)")]
  SpeedOutOfRange(f64),

  #[error("MIDI channel {0} is out of range (1-16)")]
  InvalidChannel(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
