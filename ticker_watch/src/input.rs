//! Keyboard event forwarding into the main select loop.
//!
//! Crossterm's `read` is blocking, so a dedicated thread polls with a short
//! timeout and forwards key presses over a crossbeam channel. The poll
//! timeout lets the thread observe the shutdown flag; it also exits when the
//! receiving side hangs up.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawns the reader thread and returns the channel it feeds.
pub fn spawn_input_thread(shutdown: Arc<AtomicBool>) -> Receiver<KeyEvent> {
    let (tx, rx) = unbounded::<KeyEvent>();

    thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Input read error: {e}");
                        break;
                    }
                },
                Err(e) => {
                    error!("Input poll error: {e}");
                    break;
                }
            }
        }
        debug!("Input thread stopping...");
    });

    rx
}
