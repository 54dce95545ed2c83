//! The demo routine, from an (optional) open device to its release.

use std::io::{BufRead, Write};

use log::info;

use crate::error::Result;
use crate::output::OutputDevice;
use crate::ports::wait_for_enter;
use crate::script::{demo_script, play, DemoSettings, Pause, Step};

pub const NO_DEVICE_MESSAGE: &str = "No output devices, so can't run this example.";

/// Plays the demo on `device` and closes it, or reports that there is
/// nothing to play on. With `wait_at_end` the user confirms before we return.
pub fn run_demo<D, P, R, W>(
  device: Option<D>,
  settings: &DemoSettings,
  pause: &mut P,
  input: &mut R,
  out: &mut W,
  wait_at_end: bool,
) -> Result<()>
where
  D: OutputDevice,
  P: Pause,
  R: BufRead,
  W: Write,
{
  let mut device: D = match device {
    Some(d) => d,
    None => {
      info!("no output device selected");
      writeln!(out, "{}", NO_DEVICE_MESSAGE)?;
      if wait_at_end {
        wait_for_enter(input, out)?;
      }
      return Ok(());
    }
  };

  let steps: Vec<Step> = demo_script(settings);
  let played: Result<()> = play(&steps, &mut device, pause, out);
  device.close();
  played?;

  writeln!(out)?;
  if wait_at_end {
    wait_for_enter(input, out)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;
  use std::time::Duration;

  /// Writes into borrowed logs so they can be read after `close` consumes it.
  struct Recorder<'a> {
    sent: &'a mut Vec<Vec<u8>>,
    closes: &'a mut usize,
  }

  impl OutputDevice for Recorder<'_> {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
      self.sent.push(bytes.to_vec());
      Ok(())
    }

    fn close(self) {
      *self.closes += 1;
    }
  }

  struct NoPause;

  impl Pause for NoPause {
    fn pause(&mut self, _duration: Duration) {}
  }

  fn run(device: Option<Recorder<'_>>, typed: &str, wait: bool) -> (Result<()>, String, u64) {
    let mut input: Cursor<Vec<u8>> = Cursor::new(typed.as_bytes().to_vec());
    let mut out: Vec<u8> = Vec::new();
    let result: Result<()> =
      run_demo(device, &DemoSettings::default(), &mut NoPause, &mut input, &mut out, wait);
    (result, String::from_utf8(out).unwrap(), input.position())
  }

  #[test]
  fn without_a_device_it_says_so_and_sends_nothing() {
    let (result, printed, consumed) = run(None, "", false);
    assert!(result.is_ok());
    assert_eq!(printed, "No output devices, so can't run this example.\n");
    assert_eq!(consumed, 0);
  }

  #[test]
  fn without_a_device_it_can_still_wait_for_enter() {
    let (result, printed, consumed) = run(None, "\n", true);
    assert!(result.is_ok());
    assert_eq!(
      printed,
      "No output devices, so can't run this example.\nPress Enter to continue...\n"
    );
    assert_eq!(consumed, 1);
  }

  #[test]
  fn with_a_device_it_plays_then_closes_once() {
    let mut sent: Vec<Vec<u8>> = Vec::new();
    let mut closes: usize = 0;
    let device: Recorder = Recorder { sent: &mut sent, closes: &mut closes };
    let (result, printed, _) = run(Some(device), "", false);
    assert!(result.is_ok());
    assert_eq!(closes, 1);
    assert_eq!(sent.first(), Some(&vec![0x90, 60, 80]));
    assert_eq!(sent.last(), Some(&vec![0xB0, 64, 0]));
    assert!(!printed.contains(NO_DEVICE_MESSAGE));
    assert!(printed.starts_with("Playing an arpeggiated C chord"));
    assert!(printed.ends_with("keyboard...\n\n"));
  }
}
