//! The demo as a list of steps, and the player that performs them.
//!
//! Building the performance as data first means the whole sequence can be
//! checked without a MIDI port or a wall clock.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::error::{Error, Result};
use crate::message::{Channel, Control, Message, PITCH_BEND_CENTER};
use crate::output::OutputDevice;

/// A0, the lowest key on an 88-key piano.
pub const LOWEST_RUN_NOTE: u8 = 21;
/// One past the highest note a keyboard run may reach.
pub const RUN_END_NOTE: u8 = 107;

const BEND_STEPS: u16 = 17;
const BEND_STEP_SIZE: u16 = 450;

static C_MAJOR: [u8; 3] = [0, 4, 7];
static F_RUN: [u8; 2] = [5, 9];
static G_RUN: [u8; 2] = [7, 11];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  Send(Message),
  Wait(Duration),
  Say(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
  pub arpeggio: Duration,
  pub bend_step: Duration,
  pub run_step: Duration,
  pub final_hold: Duration,
}

impl Default for Timing {
  fn default() -> Self {
    Timing {
      arpeggio: Duration::from_millis(500),
      bend_step: Duration::from_millis(200),
      run_step: Duration::from_millis(100),
      final_hold: Duration::from_millis(2000),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoSettings {
  pub channel: Channel,
  pub velocity: u8,
  pub timing: Timing,
  /// Every wait is divided by this.
  pub speed: f64,
}

impl Default for DemoSettings {
  fn default() -> Self {
    DemoSettings {
      channel: Channel::ONE,
      velocity: 80,
      timing: Timing::default(),
      speed: 1.0,
    }
  }
}

/// Accumulates steps that all target one channel at one velocity.
pub struct ScriptBuilder {
  channel: Channel,
  velocity: u8,
  steps: Vec<Step>,
}

impl ScriptBuilder {
  pub fn new(channel: Channel, velocity: u8) -> Self {
    ScriptBuilder { channel, velocity, steps: Vec::new() }
  }

  pub fn say(&mut self, text: &str) -> &mut Self {
    self.steps.push(Step::Say(text.to_string()));
    self
  }

  pub fn wait(&mut self, duration: Duration) -> &mut Self {
    self.steps.push(Step::Wait(duration));
    self
  }

  pub fn note_on(&mut self, note: u8) -> &mut Self {
    let (channel, velocity) = (self.channel, self.velocity);
    self.steps.push(Step::Send(Message::NoteOn { channel, note, velocity }));
    self
  }

  pub fn note_off(&mut self, note: u8) -> &mut Self {
    let (channel, velocity) = (self.channel, self.velocity);
    self.steps.push(Step::Send(Message::NoteOff { channel, note, velocity }));
    self
  }

  pub fn sustain(&mut self, value: u8) -> &mut Self {
    self.steps.push(Step::Send(Message::ControlChange {
      channel: self.channel,
      control: Control::SUSTAIN_PEDAL,
      value,
    }));
    self
  }

  pub fn pitch_bend(&mut self, value: u16) -> &mut Self {
    self.steps.push(Step::Send(Message::PitchBend { channel: self.channel, value }));
    self
  }

  /// Plays every note in the run range that `predicate` accepts, one at a
  /// time, each released as the next one starts. The last note is released
  /// after the loop; a run that matches nothing sends nothing.
  pub fn run_up_keyboard<P: Fn(u8) -> bool>(&mut self, predicate: P, between: Duration) -> &mut Self {
    let mut previous: Option<u8> = None;
    for note in LOWEST_RUN_NOTE..RUN_END_NOTE {
      if !predicate(note) {
        continue;
      }
      if let Some(prev) = previous {
        self.note_off(prev);
      }
      self.note_on(note);
      self.wait(between);
      previous = Some(note);
    }
    if let Some(prev) = previous {
      self.note_off(prev);
    }
    self
  }

  pub fn build(self) -> Vec<Step> {
    self.steps
  }
}

fn in_pitch_classes(classes: &'static [u8]) -> impl Fn(u8) -> bool {
  move |note: u8| classes.contains(&(note % 12))
}

/// The whole demo: a C chord that gets bent down, then four sustained
/// arpeggio runs up the keyboard (C, F, G, C).
pub fn demo_script(settings: &DemoSettings) -> Vec<Step> {
  let t: Timing = settings.timing;
  let mut s: ScriptBuilder = ScriptBuilder::new(settings.channel, settings.velocity);

  s.say("Playing an arpeggiated C chord and then bending it down.");
  for note in [60, 64, 67] {
    s.note_on(note).wait(t.arpeggio);
  }

  // Released notes keep ringing under the pedal.
  s.sustain(127);
  for note in [60, 64, 67] {
    s.note_off(note);
  }

  for i in 0..BEND_STEPS {
    s.pitch_bend(PITCH_BEND_CENTER - i * BEND_STEP_SIZE).wait(t.bend_step);
  }

  // Lifting the pedal silences the chord.
  s.sustain(0);

  s.say("Playing sustained chord runs up the keyboard...");
  for classes in [&C_MAJOR[..], &F_RUN[..], &G_RUN[..]] {
    s.sustain(127)
      .run_up_keyboard(in_pitch_classes(classes), t.run_step)
      .sustain(0);
  }
  s.sustain(127)
    .run_up_keyboard(in_pitch_classes(&C_MAJOR), t.run_step)
    .wait(t.final_hold)
    .sustain(0);

  s.build()
}

/// Something that can block for a while.
pub trait Pause {
  fn pause(&mut self, duration: Duration);
}

/// Slowest tempo multiplier `ThreadPause` accepts.
pub const MIN_SPEED: f64 = 0.01;
/// Fastest tempo multiplier `ThreadPause` accepts.
pub const MAX_SPEED: f64 = 100.0;

pub fn check_speed(speed: f64) -> Result<f64> {
  if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
    Ok(speed)
  } else {
    Err(Error::SpeedOutOfRange(speed))
  }
}

/// Sleeps the calling thread, scaled by a speed factor.
pub struct ThreadPause {
  speed: f64,
}

impl ThreadPause {
  pub fn new(speed: f64) -> Result<Self> {
    Ok(ThreadPause { speed: check_speed(speed)? })
  }

  /// How long `duration` lasts at this speed.
  pub fn scaled(&self, duration: Duration) -> Duration {
    duration.div_f64(self.speed)
  }
}

impl Pause for ThreadPause {
  fn pause(&mut self, duration: Duration) {
    thread::sleep(self.scaled(duration));
  }
}

/// Performs `steps` in order. Stops at the first failed send.
pub fn play<D, P, W>(steps: &[Step], device: &mut D, pause: &mut P, out: &mut W) -> Result<()>
where
  D: OutputDevice + ?Sized,
  P: Pause,
  W: Write,
{
  for (i, step) in steps.iter().enumerate() {
    match step {
      Step::Send(message) => device.send_message(message)?,
      Step::Wait(duration) => pause.pause(*duration),
      Step::Say(text) => {
        writeln!(out, "{}", text)?;
        out.flush()?;
      }
    }
    debug!("step {}/{} done", i + 1, steps.len());
  }
  Ok(())
}
