//! Background reader forwarding terminal events onto the editor channel.

use crate::map_key_event;
use core_events::{Event, InputEvent};
use crossterm::event::{Event as CEvent, EventStream, KeyEventKind};
use std::io;
use std::sync::Arc;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, trace, warn};

/// Requests that the input reader stop, even while it waits on the terminal.
#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn signal(&self) {
        // notify_one stores a permit, so a signal sent before the reader
        // parks is not lost.
        self.notify.notify_one();
    }
}

pub(crate) fn spawn_async_event_task(sender: Sender<Event>) -> (JoinHandle<()>, AsyncInputShutdown) {
    let shutdown = AsyncInputShutdown::new();
    let reader = InputReader {
        sender,
        stream: EventStream::new(),
        stop: shutdown.notify.clone(),
    };
    (tokio::spawn(reader.run()), shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StopReason {
    Requested,
    ReceiverGone,
    EndOfInput,
    ReadFailed,
}

impl StopReason {
    fn as_str(self) -> &'static str {
        match self {
            StopReason::Requested => "requested",
            StopReason::ReceiverGone => "channel_closed",
            StopReason::EndOfInput => "stream_ended",
            StopReason::ReadFailed => "stream_error",
        }
    }
}

/// Editor events produced by one terminal event. Key releases and events the
/// editor does not handle (mouse, focus, paste) produce none.
fn editor_events(event: &CEvent) -> Vec<Event> {
    match event {
        CEvent::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            map_key_event(key)
        }
        CEvent::Resize(w, h) => vec![Event::Input(InputEvent::Resize(*w, *h))],
        _ => Vec::new(),
    }
}

struct InputReader<S> {
    sender: Sender<Event>,
    stream: S,
    stop: Arc<Notify>,
}

impl<S> InputReader<S>
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
    async fn run(mut self) {
        info!(target: "input.thread", "input_reader_started");
        let reason = self.pump().await;
        info!(target: "input.thread", reason = reason.as_str(), "input_reader_stopped");
    }

    async fn pump(&mut self) -> StopReason {
        loop {
            let next = tokio::select! {
                biased;
                _ = self.stop.notified() => return StopReason::Requested,
                next = self.stream.next() => next,
            };
            let event = match next {
                None => return StopReason::EndOfInput,
                Some(Err(err)) => {
                    warn!(target: "input.thread", error_kind = ?err.kind(), "terminal_read_failed");
                    return StopReason::ReadFailed;
                }
                Some(Ok(event)) => event,
            };
            for out in editor_events(&event) {
                trace!(target: "input.event", ?out, "forward");
                if self.sender.send(out).await.is_err() {
                    debug!(target: "input.thread", "receiver_dropped");
                    return StopReason::ReceiverGone;
                }
            }
        }
    }
}
