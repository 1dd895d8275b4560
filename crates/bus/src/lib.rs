use core_types::{AttemptId, NavOptions, RenderError};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Events feeding the navigation machine. Everything that belongs to one
/// transition attempt carries its `AttemptId`; the machine drops events
/// whose id no longer matches the live generation.
#[derive(Debug)]
pub enum RouterEvent<V> {
    /// Browser back/forward observed; the machine re-reads the location.
    PopState,
    /// A render produced its view.
    ViewReady { attempt: AttemptId, view: V },
    /// A render failed. Surfaces to whoever pumps the machine.
    ViewFailed {
        attempt: AttemptId,
        error: RenderError,
    },
    /// An in-progress render asked to navigate somewhere else.
    RenderNavigate {
        attempt: AttemptId,
        to: String,
        options: NavOptions,
    },
    /// A view asked to be regenerated for the current URL.
    Rerender { attempt: AttemptId },
}

pub struct Bus<V> {
    pub evt_tx: Sender<RouterEvent<V>>,
    pub evt_rx: Receiver<RouterEvent<V>>,
}

impl<V> Bus<V> {
    pub fn new() -> Self {
        let (evt_tx, evt_rx) = channel();
        Self { evt_tx, evt_rx }
    }
}

impl<V> Default for Bus<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot completion handle for a transition attempt. Sync and deferred
/// renders both finish through this, so the machine has a single commit
/// path. Completing a stale sink is harmless; the event is discarded.
#[derive(Debug)]
pub struct ViewSink<V> {
    attempt: AttemptId,
    tx: Sender<RouterEvent<V>>,
}

impl<V> ViewSink<V> {
    pub fn new(attempt: AttemptId, tx: Sender<RouterEvent<V>>) -> Self {
        Self { attempt, tx }
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn ready(self, view: V) {
        let _ = self.tx.send(RouterEvent::ViewReady {
            attempt: self.attempt,
            view,
        });
    }

    pub fn fail(self, error: RenderError) {
        let _ = self.tx.send(RouterEvent::ViewFailed {
            attempt: self.attempt,
            error,
        });
    }
}

/// Handles a render callback can invoke while (or after) producing its view.
/// Both are queued through the bus, so a render never re-enters the machine.
#[derive(Debug)]
pub struct RenderActions<V> {
    attempt: AttemptId,
    tx: Sender<RouterEvent<V>>,
}

// hand-written so V itself does not need Clone
impl<V> Clone for RenderActions<V> {
    fn clone(&self) -> Self {
        Self {
            attempt: self.attempt,
            tx: self.tx.clone(),
        }
    }
}

impl<V> RenderActions<V> {
    pub fn new(attempt: AttemptId, tx: Sender<RouterEvent<V>>) -> Self {
        Self { attempt, tx }
    }

    /// Redirect out of the render in progress. The machine marks the
    /// attempt redirected, so superseding it does not raise its cancel
    /// token.
    pub fn navigate(&self, to: &str, options: NavOptions) {
        let _ = self.tx.send(RouterEvent::RenderNavigate {
            attempt: self.attempt,
            to: to.to_string(),
            options,
        });
    }

    /// Ask for a fresh render of the current URL (a self-transition).
    pub fn rerender(&self) {
        let _ = self.tx.send(RouterEvent::Rerender {
            attempt: self.attempt,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_tags_its_event_with_the_attempt_id() {
        let bus: Bus<&'static str> = Bus::new();
        let sink = ViewSink::new(7, bus.evt_tx.clone());

        sink.ready("view");
        match bus.evt_rx.try_recv() {
            Ok(RouterEvent::ViewReady { attempt, view }) => {
                assert_eq!(attempt, 7);
                assert_eq!(view, "view");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn failed_sink_carries_the_error() {
        let bus: Bus<()> = Bus::new();
        let sink = ViewSink::new(3, bus.evt_tx.clone());

        sink.fail(RenderError::new("boom"));
        match bus.evt_rx.try_recv() {
            Ok(RouterEvent::ViewFailed { attempt, error }) => {
                assert_eq!(attempt, 3);
                assert_eq!(error, RenderError::new("boom"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn actions_queue_instead_of_reentering() {
        let bus: Bus<()> = Bus::new();
        let actions = RenderActions::new(1, bus.evt_tx.clone());

        actions.navigate("/elsewhere", NavOptions::default());
        actions.rerender();

        match bus.evt_rx.try_recv() {
            Ok(RouterEvent::RenderNavigate { attempt, to, .. }) => {
                assert_eq!(attempt, 1);
                assert_eq!(to, "/elsewhere");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            bus.evt_rx.try_recv(),
            Ok(RouterEvent::Rerender { attempt: 1 })
        ));
    }
}
