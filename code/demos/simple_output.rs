//! Simple Output - plays a short scripted demo on a MIDI output port
//!
//! # How to run
//!
//! ```sh
//! cargo run --bin simple_output              # pick a port on the console
//! cargo run --bin simple_output -- --list    # show output ports
//! cargo run --bin simple_output -- --virtual # create 'simple-output' instead
//! ```
//!
//! With `--virtual`, connect the new port to a synthesizer, e.g.
//! `aconnect -l` and then `aconnect <src> <dst>`.
//!
//! What you should hear:
//! - C, E, G in half second steps, held by the sustain pedal
//!   while the pitch bends down
//! - four sustained arpeggio runs up the keyboard: C, F, G, C

use clap::Parser;
use env_logger::Env;
use midir::MidiOutput;
use std::io::{self, StdinLock, Stdout};

use simple_output::config::Args;
use simple_output::demo::run_demo;
use simple_output::output::MidiOut;
use simple_output::ports::{list_output_ports, open_output};
use simple_output::script::{DemoSettings, ThreadPause};

const CLIENT_NAME: &str = "simple-output";

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let args: Args = Args::parse();
  env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level().as_str()))
    .init();

  if args.list {
    return print_ports();
  }

  let settings: DemoSettings = args.settings()?;
  let mut pause: ThreadPause = ThreadPause::new(settings.speed)?;
  let mut input: StdinLock<'static> = io::stdin().lock();
  let mut out: Stdout = io::stdout();

  let device: Option<MidiOut> =
    open_output(CLIENT_NAME, &args.selection(), &mut input, &mut out)?;
  if let Some(d) = &device {
    print_startup_message(d, &settings);
  }

  run_demo(device, &settings, &mut pause, &mut input, &mut out, !args.no_wait)?;
  Ok(())
}

fn print_startup_message(device: &MidiOut, settings: &DemoSettings) {
  println!("Simple MIDI output example.");
  println!();
  println!("Output port: '{}'", device.port_name());
  println!("  - channel: {}", settings.channel);
  println!("  - velocity: {}", settings.velocity);
  if settings.speed != 1.0 {
    println!("  - speed: {}x", settings.speed);
  }
  println!();
}

fn print_ports() -> Result<(), Box<dyn std::error::Error>> {
  let midi_out: MidiOutput = MidiOutput::new(CLIENT_NAME)?;
  let names: Vec<String> = list_output_ports(&midi_out)?;
  if names.is_empty() {
    println!("  (none found)");
  }
  for (i, name) in names.iter().enumerate() {
    println!("  [{}] {}", i, name);
  }
  Ok(())
}
