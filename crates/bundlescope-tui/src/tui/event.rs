use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Input events driving the record browser
#[derive(Clone, Debug)]
pub enum Event {
    /// Periodic tick, keeps the UI loop turning between key presses
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Terminal input error, surfaced to the user as a notice
    Error(String),
}

/// Pumps crossterm input into the application's event channel.
///
/// The pump runs on its own tokio task so the main loop can select over
/// terminal input and browser actions together; `shutdown` (or dropping the
/// handler) stops the task.
pub struct EventHandler {
    events_rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Spawn the input pump with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = {
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let mut input = event::EventStream::new();
                let mut ticker = tokio::time::interval(tick_rate);

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,

                        _ = ticker.tick() => {
                            let _ = events_tx.send(Event::Tick);
                        }

                        maybe_event = input.next().fuse() => {
                            match maybe_event {
                                Some(Ok(CrosstermEvent::Key(key))) => {
                                    // Ignore release events (important for Windows)
                                    if key.kind == KeyEventKind::Press {
                                        let _ = events_tx.send(Event::Key(key));
                                    }
                                }
                                Some(Ok(CrosstermEvent::Resize(w, h))) => {
                                    let _ = events_tx.send(Event::Resize(w, h));
                                }
                                Some(Ok(_)) => {}
                                Some(Err(e)) => {
                                    let _ = events_tx.send(Event::Error(e.to_string()));
                                }
                                None => break,
                            }
                        }
                    }
                }
            })
        };

        Self {
            events_rx,
            cancel,
            task,
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Stop the input pump
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}
