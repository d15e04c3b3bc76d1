//! Terminal input reader.
//!
//! Blocking crossterm reads happen on their own thread so the main loop
//! can keep ticking timers while waiting for input.

use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

pub fn spawn_reader() -> Result<flume::Receiver<Event>> {
    let (tx, rx) = flume::unbounded();

    thread::Builder::new()
        .name("zcalc-input".to_string())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read terminal event: {}", e);
                        break;
                    }
                }
            }
        })
        .context("Failed to spawn input thread")?;

    Ok(rx)
}
