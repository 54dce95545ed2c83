use clap::Parser;
use log::LevelFilter;

use crate::error::Result;
use crate::message::Channel;
use crate::ports::PortSelection;
use crate::script::{check_speed, DemoSettings, Timing};

/// Plays a short MIDI demo: an arpeggiated C chord that bends down, then
/// sustained chord runs up the keyboard.
#[derive(Debug, Parser, Clone)]
#[command(name = "simple_output", version)]
pub struct Args {
  /// Output port to use, by index or by part of its name (ignored with --virtual)
  #[arg(long, env = "SIMPLE_OUTPUT_PORT")]
  pub port: Option<String>,

  /// Create a virtual output port instead of connecting to an existing one
  #[arg(long = "virtual", value_name = "NAME", num_args = 0..=1,
        default_missing_value = "simple-output")]
  pub virtual_port: Option<String>,

  /// List output ports and exit
  #[arg(long)]
  pub list: bool,

  /// MIDI channel (1-16)
  #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=16))]
  pub channel: u8,

  /// Note velocity (0-127)
  #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=127))]
  pub velocity: u8,

  /// Tempo multiplier (0.01-100); 2 plays twice as fast
  #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
  pub speed: f64,

  /// Don't wait for Enter before exiting
  #[arg(long)]
  pub no_wait: bool,

  /// Incremental verbosity (`-v`, `-vv`, etc.)
  #[arg(short, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

fn parse_speed(raw: &str) -> std::result::Result<f64, String> {
  let speed: f64 = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;
  check_speed(speed).map_err(|e| e.to_string())
}

impl Args {
  pub fn selection(&self) -> PortSelection {
    if let Some(name) = &self.virtual_port {
      return PortSelection::Virtual(name.clone());
    }
    match &self.port {
      None => PortSelection::Prompt,
      Some(raw) => match raw.trim().parse::<usize>() {
        Ok(index) => PortSelection::Index(index),
        Err(_) => PortSelection::Name(raw.clone()),
      },
    }
  }

  pub fn settings(&self) -> Result<DemoSettings> {
    Ok(DemoSettings {
      channel: Channel::from_number(self.channel)?,
      velocity: self.velocity,
      timing: Timing::default(),
      speed: self.speed,
    })
  }

  /// Default filter for the logger; `RUST_LOG` still wins.
  pub fn log_level(&self) -> LevelFilter {
    match self.verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  }
}
