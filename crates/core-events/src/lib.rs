//! Event types and async event sources feeding the editor loop.
//!
//! Every producer (terminal input, the autosave tick) pushes into one bounded
//! mpsc channel and a single consumer applies events in arrival order, so a
//! save never observes a half-applied edit.

use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time;

/// Capacity of the primary event channel. Producers await when it is full.
pub const EVENT_CHANNEL_CAP: usize = 1024;

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// Periodic tick; drives autosave.
    Tick,
}

/// Trait implemented by any async event producer. Implementors hold their
/// configuration and spawn one background task that pushes `Event`s into the
/// shared channel.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task. Implementors stop when
    /// `tx.send(..).await` returns Err (channel closed) and must not busy loop.
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Event sources started together once the loop is ready to consume.
#[derive(Default)]
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Start every registered source on its own clone of `tx`. The registry
    /// is drained, so calling this twice starts nothing the second time.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        self.sources
            .drain(..)
            .map(|src| {
                tracing::info!(target: "runtime.events", source = src.name(), "event_source_spawned");
                src.spawn(tx.clone())
            })
            .collect()
    }
}

/// Sends `Event::Tick` once per period, starting one full period after spawn.
/// Stops as soon as the receiving side of the channel closes.
pub struct TickEventSource {
    period: Duration,
}

impl TickEventSource {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "autosave_tick"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let period = self.period;
        tokio::spawn(async move {
            // A zero period would spin and a huge one overflows the clock.
            let start = time::Instant::now()
                .checked_add(period)
                .filter(|s| !period.is_zero() && s.checked_add(period).is_some());
            let Some(start) = start else {
                tracing::warn!(target: "runtime.events", period_secs = period.as_secs(), "tick_period_unusable");
                tx.closed().await;
                return;
            };
            let mut ticks = time::interval_at(start, period);
            ticks.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = ticks.tick() => {}
                }
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
            }
            tracing::trace!(target: "runtime.events", "tick_source_stopped");
        })
    }
}

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Interrupt (Ctrl-C), surfaced separately from ordinary keys.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// True when a control or alt modifier is held. Shift alone only
    /// selects the character and does not count.
    pub fn is_chord(&self) -> bool {
        self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
    }
}

/// Logical keys the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 1;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
    }
}

/// Renders as `Ctrl+Alt+x`, `Esc`, `Shift+Left` and so on.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, label) in [
            (KeyModifiers::CTRL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.mods.contains(flag) {
                f.write_str(label)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn key_event_display_names_modifiers_then_key() {
        assert_eq!(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CTRL).to_string(), "Ctrl+x");
        assert_eq!(
            KeyEvent::new(KeyCode::Left, KeyModifiers::ALT | KeyModifiers::SHIFT).to_string(),
            "Alt+Shift+Left"
        );
        assert_eq!(KeyEvent::plain(KeyCode::Char(' ')).to_string(), "Space");
        assert_eq!(KeyEvent::plain(KeyCode::Esc).to_string(), "Esc");
    }

    #[test]
    fn shift_alone_is_not_a_chord() {
        assert!(!KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).is_chord());
        assert!(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT).is_chord());
        assert!(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CTRL | KeyModifiers::SHIFT).is_chord());
        assert!(!KeyEvent::plain(KeyCode::Enter).is_chord());
    }

    /// Sends a fixed list of events, then finishes.
    struct Scripted(Vec<Event>);

    impl AsyncEventSource for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
            let events = self.0;
            tokio::spawn(async move {
                for ev in events {
                    if tx.send(ev).await.is_err() {
                        return;
                    }
                }
            })
        }
    }

    #[tokio::test]
    async fn registry_starts_each_source_once() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut reg = EventSourceRegistry::new();
        reg.register(Scripted(vec![Event::Input(InputEvent::CtrlC)]));
        reg.register(Scripted(vec![Event::Tick]));
        assert_eq!(reg.len(), 2);

        let handles = reg.spawn_all(&tx);
        assert!(reg.is_empty());
        assert!(reg.spawn_all(&tx).is_empty());
        for h in handles {
            h.await.unwrap();
        }
        drop(tx);

        let mut got = Vec::new();
        while let Some(ev) = rx.recv().await {
            got.push(ev);
        }
        assert_eq!(got.len(), 2);
        assert!(got.contains(&Event::Tick));
        assert!(got.contains(&Event::Input(InputEvent::CtrlC)));
    }

    #[tokio::test(start_paused = true)]
    async fn tick_waits_one_period_then_repeats() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut reg = EventSourceRegistry::new();
        reg.register(TickEventSource::new(Duration::from_secs(30)));
        let _handles = reg.spawn_all(&tx);

        time::advance(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some(Event::Tick));
        assert_eq!(rx.recv().await, Some(Event::Tick));
    }

    #[tokio::test]
    async fn unrepresentable_tick_period_idles_without_panicking() {
        for period in [Duration::ZERO, Duration::from_secs(i64::MAX as u64)] {
            let (tx, mut rx) = mpsc::channel(8);
            let handle = Box::new(TickEventSource::new(period)).spawn(tx);
            tokio::task::yield_now().await;
            assert!(rx.try_recv().is_err());
            rx.close();
            let joined = time::timeout(Duration::from_secs(1), handle)
                .await
                .expect("tick source should exit once the channel closes");
            assert!(joined.is_ok(), "tick source panicked for {period:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tick_source_stops_when_receiver_closes() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = Box::new(TickEventSource::new(Duration::from_secs(3600))).spawn(tx);
        rx.close();
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("tick source should notice the closed channel")
            .unwrap();
    }
}
