//! Scripted MIDI output demo.
//!
//! The demo is built as a list of [`script::Step`]s and then played on any
//! [`output::OutputDevice`]; the real device is a `midir` connection picked
//! through [`ports`].

pub mod config;
pub mod demo;
pub mod error;
pub mod message;
pub mod output;
pub mod ports;
pub mod script;

pub use error::{Error, Result};
