//! Finding, choosing and opening an output port.
//!
//! Selection is kept apart from `midir` so the console dialogue can be driven
//! from any reader and writer:
//!
//! - no ports at all yields `None`, never an error;
//! - a single port is used without asking;
//! - several ports are listed and the user types an index.

use std::io::{BufRead, Write};

use log::{info, warn};
use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};

use crate::error::{Error, Result};
use crate::output::MidiOut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
  /// Ask on the console when there is more than one port.
  Prompt,
  Index(usize),
  /// First port whose name contains this text.
  Name(String),
  /// Create a virtual port with this name instead of connecting to one.
  Virtual(String),
}

pub fn list_output_ports(midi_out: &MidiOutput) -> Result<Vec<String>> {
  port_names(midi_out, &midi_out.ports())
}

fn port_names(midi_out: &MidiOutput, ports: &[MidiOutputPort]) -> Result<Vec<String>> {
  let mut names: Vec<String> = Vec::with_capacity(ports.len());
  for port in ports.iter() {
    names.push(midi_out.port_name(port)?);
  }
  Ok(names)
}

pub fn choose_port<R: BufRead, W: Write>(
  names: &[String],
  selection: &PortSelection,
  input: &mut R,
  out: &mut W,
) -> Result<Option<usize>> {
  if names.is_empty() {
    return Ok(None);
  }
  match selection {
    PortSelection::Index(i) => {
      if *i < names.len() {
        Ok(Some(*i))
      } else {
        Err(Error::NoSuchPort(format!("index {}", i)))
      }
    }
    PortSelection::Name(wanted) => names
      .iter()
      .position(|name| name.contains(wanted.as_str()))
      .map(Some)
      .ok_or_else(|| Error::NoSuchPort(format!("'{}'", wanted))),
    // a virtual port is created, never picked from the list
    PortSelection::Virtual(_) => Ok(None),
    PortSelection::Prompt => {
      if names.len() == 1 {
        return Ok(Some(0));
      }
      prompt_for_port(names, input, out)
    }
  }
}

fn prompt_for_port<R: BufRead, W: Write>(
  names: &[String],
  input: &mut R,
  out: &mut W,
) -> Result<Option<usize>> {
  writeln!(out, "Output devices:")?;
  for (i, name) in names.iter().enumerate() {
    writeln!(out, "  {}: {}", i, name)?;
  }
  loop {
    write!(out, "Choose the id of an output device... ")?;
    out.flush()?;
    let mut line: String = String::new();
    if input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    match line.trim().parse::<usize>() {
      Ok(i) if i < names.len() => return Ok(Some(i)),
      _ => {
        warn!("rejected port choice {:?}", line.trim());
        writeln!(out, "Please enter a number between 0 and {}.", names.len() - 1)?;
      }
    }
  }
}

/// Connects `client_name` to the selected port.
///
/// Returns `Ok(None)` when there is nothing to connect to.
pub fn open_output<R: BufRead, W: Write>(
  client_name: &str,
  selection: &PortSelection,
  input: &mut R,
  out: &mut W,
) -> Result<Option<MidiOut>> {
  let midi_out: MidiOutput = MidiOutput::new(client_name)?;

  if let PortSelection::Virtual(port_name) = selection {
    return create_virtual(midi_out, port_name).map(Some);
  }

  let ports: Vec<MidiOutputPort> = midi_out.ports();
  let names: Vec<String> = port_names(&midi_out, &ports)?;
  info!("found {} output port(s)", names.len());
  let index: usize = match choose_port(&names, selection, input, out)? {
    Some(i) => i,
    None => return Ok(None),
  };

  let port: &MidiOutputPort = ports
    .get(index)
    .ok_or_else(|| Error::NoSuchPort(format!("index {}", index)))?;
  let conn: MidiOutputConnection = midi_out
    .connect(port, client_name)
    .map_err(|e| Error::Connect(e.to_string()))?;
  Ok(Some(MidiOut::new(conn, names[index].clone())))
}

#[cfg(unix)]
fn create_virtual(midi_out: MidiOutput, port_name: &str) -> Result<MidiOut> {
  use midir::os::unix::VirtualOutput;

  let conn: MidiOutputConnection = midi_out
    .create_virtual(port_name)
    .map_err(|e| Error::Connect(e.to_string()))?;
  println!("Created virtual MIDI port '{}'", port_name);
  println!("Use 'aconnect -l' to see ports, 'aconnect <src> <dst>' to connect.");
  Ok(MidiOut::new(conn, port_name.to_string()))
}

#[cfg(not(unix))]
fn create_virtual(_midi_out: MidiOutput, _port_name: &str) -> Result<MidiOut> {
  Err(Error::VirtualUnsupported)
}

/// Blocks until the user presses Enter (or input ends).
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
  writeln!(out, "Press Enter to continue...")?;
  out.flush()?;
  let mut line: String = String::new();
  input.read_line(&mut line)?;
  Ok(())
}
