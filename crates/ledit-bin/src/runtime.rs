//! Event loop: one consumer applies input and tick events to the session in
//! arrival order, then repaints when anything visible changed.

use core_actions::{dispatch, translate_key};
use core_events::{Event, InputEvent, KeyEvent};
use core_model::EditorModel;
use core_render::{RenderSink, compose_frame, text_height};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

pub(crate) enum LoopControl {
    Continue { redraw: bool },
    Break { reason: ShutdownReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownReason {
    CtrlC,
    CommandQuit,
    ChannelClosed,
}

impl ShutdownReason {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::CommandQuit => "command_quit",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

pub(crate) struct EditorRuntime<S: RenderSink> {
    model: EditorModel,
    sink: S,
    /// Terminal size as `(columns, rows)`.
    size: (u16, u16),
}

impl<S: RenderSink> EditorRuntime<S> {
    pub(crate) fn new(model: EditorModel, sink: S, size: (u16, u16)) -> Self {
        Self { model, sink, size }
    }

    /// Consume events until a quit, then return why the loop ended.
    pub(crate) async fn run(&mut self, rx: &mut mpsc::Receiver<Event>) -> ShutdownReason {
        self.render();
        while let Some(event) = rx.recv().await {
            match self.handle_event(&event) {
                LoopControl::Break { reason } => return reason,
                LoopControl::Continue { redraw: true } => self.render(),
                LoopControl::Continue { redraw: false } => {}
            }
        }
        ShutdownReason::ChannelClosed
    }

    pub(crate) fn handle_event(&mut self, event: &Event) -> LoopControl {
        match event {
            Event::Input(InputEvent::Key(key)) => self.handle_key(key),
            Event::Input(InputEvent::Resize(w, h)) => self.handle_resize(*w, *h),
            Event::Input(InputEvent::CtrlC) => LoopControl::Break {
                reason: ShutdownReason::CtrlC,
            },
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> LoopControl {
        let mode = self.model.state().mode;
        let Some(action) = translate_key(mode, key) else {
            trace!(target: "runtime", %key, ?mode, "key_unmapped");
            return LoopControl::Continue { redraw: false };
        };
        let result = dispatch(action, &mut self.model);
        if result.quit {
            return LoopControl::Break {
                reason: ShutdownReason::CommandQuit,
            };
        }
        LoopControl::Continue {
            redraw: result.dirty,
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> LoopControl {
        trace!(target: "runtime", width, height, "resize");
        self.size = (width, height);
        LoopControl::Continue { redraw: true }
    }

    /// Autosave: write only when there are unsaved edits. Runs between key
    /// events on this task, so it always sees a consistent document.
    fn handle_tick(&mut self) -> LoopControl {
        if self.model.state().dirty {
            let ok = self.model.save();
            info!(
                target: "runtime.autosave",
                ok,
                path = %self.model.state().file_name().display(),
                "autosave"
            );
        }
        LoopControl::Continue { redraw: false }
    }

    fn render(&mut self) {
        let (width, height) = self.size;
        let view = self.model.render_view(text_height(height));
        let frame = compose_frame(&view, width, height);
        if let Err(e) = self.sink.present(&frame) {
            error!(target: "render", ?e, "present_failed");
        }
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> &EditorModel {
        &self.model
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }
}

/// Background tasks feeding the event channel, torn down after the loop ends.
pub(crate) struct RuntimeTasks {
    tx: Option<mpsc::Sender<Event>>,
    input_task: Option<JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    source_handles: Vec<JoinHandle<()>>,
}

impl RuntimeTasks {
    pub(crate) fn new(
        tx: mpsc::Sender<Event>,
        input_task: JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
        source_handles: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            tx: Some(tx),
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            source_handles,
        }
    }

    pub(crate) async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(target: "runtime.shutdown", "event_source_task_stopped"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "event_source_task_cancelled")
                }
                Ok(Err(err)) => error!(target: "runtime.shutdown", ?err, "event_source_task_error"),
                Err(_) => warn!(target: "runtime.shutdown", "event_source_task_timeout"),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(target: "runtime.shutdown", "input_task_joined"),
                Err(err) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "input_task_cancelled")
                }
                Err(err) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
            }
        }

        log_shutdown_stage(reason, "complete");
    }
}
