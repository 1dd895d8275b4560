//! The navigation state machine: owns the `(current, pending)` pair, drives
//! the render callback, applies history mutations, and commits or discards
//! results based on supersession.
//!
//! Every transition attempt gets a generation id; results re-enter through
//! the event bus tagged with that id, and anything stale is dropped. One
//! writer, last writer wins.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

use bus::{Bus, RenderActions, RouterEvent, ViewSink};
use core_types::{AttemptId, CancelToken, NavOptions};
use host_api::{
    HistoryHost, NotifyHandle, PopStateGuard, RenderView, RouteRenderArgs, ScrollHost,
};
use log::{debug, trace};
use url::Url;

use crate::error::NavError;
use crate::intent::{self, Disposition};
use crate::scope::NavScope;
use crate::scroll;

/// Authoritative navigation record. Exactly one writer: the router that
/// owns it. Readers go through `NavScope::snapshot` / `Router::content`.
struct NavigationState<V> {
    current: Url,
    pending: Option<Url>,
    should_scroll: bool,
    content: V,
}

/// In-flight transition bookkeeping. `redirected` suppresses the cancel
/// signal when the attempt is abandoned because its own render navigated
/// away.
struct Attempt {
    id: AttemptId,
    cancel: CancelToken,
    redirected: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MountOptions {
    /// Mount without entering a transition for the initial URL. For hosts
    /// whose initial content already matches the location (hydration).
    pub skip_initial_render: bool,
}

pub struct Router<V> {
    state: NavigationState<V>,
    nav_gen: AttemptId,
    attempt: Option<Attempt>,

    renderer: Box<dyn RenderView<V>>,
    history: Box<dyn HistoryHost>,
    scroll: Box<dyn ScrollHost>,

    evt_tx: Sender<RouterEvent<V>>,
    evt_rx: Receiver<RouterEvent<V>>,
    listeners: Vec<NotifyHandle>,

    // held for the mount lifetime; dropping it releases the listener
    _pop_state: PopStateGuard,
}

impl<V: Send + 'static> Router<V> {
    /// Mount the machine over its hosts. Seeds `current` from the host's
    /// location, subscribes to pop-state, and (unless skipped) immediately
    /// enters a transition for the initial URL.
    pub fn mount(
        mut history: Box<dyn HistoryHost>,
        scroll: Box<dyn ScrollHost>,
        renderer: Box<dyn RenderView<V>>,
        initial_content: V,
        options: MountOptions,
    ) -> Result<Self, NavError> {
        let bus = Bus::new();

        let waker_tx = bus.evt_tx.clone();
        let pop_state = history.watch_pop_state(Arc::new(move || {
            let _ = waker_tx.send(RouterEvent::PopState);
        }));

        let current = history.location();
        debug!(target: "nav.machine", "mount at {current}");

        let mut router = Self {
            state: NavigationState {
                current,
                pending: None,
                should_scroll: false,
                content: initial_content,
            },
            nav_gen: 0,
            attempt: None,
            renderer,
            history,
            scroll,
            evt_tx: bus.evt_tx,
            evt_rx: bus.evt_rx,
            listeners: Vec::new(),
            _pop_state: pop_state,
        };

        if !options.skip_initial_render {
            let url = router.state.current.clone();
            router.state.pending = Some(url.clone());
            router.begin_attempt(url)?;
        }
        Ok(router)
    }

    // -- Entry Points ---

    /// Programmatic navigation. `Ok(false)`: the disposition was external,
    /// a full-page redirect was issued and no state changed. `Ok(true)`:
    /// history was mutated and a transition is underway, superseding any
    /// previous one.
    pub fn navigate(&mut self, to: &str, options: NavOptions) -> Result<bool, NavError> {
        match intent::resolve(&self.state.current, to, options)? {
            Disposition::External(url) => {
                debug!(target: "nav.machine", "redirecting out to {url}");
                self.history.redirect(&url);
                Ok(false)
            }
            Disposition::Internal {
                url,
                replace,
                scroll,
            } => {
                if replace {
                    self.history.replace(&url);
                } else {
                    self.history.push(&url);
                }
                debug!(target: "nav.machine", "pending {url} (replace={replace})");
                self.state.pending = Some(url.clone());
                self.state.should_scroll = scroll;
                self.begin_attempt(url)?;
                Ok(true)
            }
        }
    }

    /// Browser back/forward. The browser already moved the history, so no
    /// mutation here; the new location is re-read and resolved like any
    /// other pending URL, with the default scroll policy.
    pub fn on_pop_state(&mut self) -> Result<(), NavError> {
        let url = self.history.location();
        debug!(target: "nav.machine", "pop state, pending {url}");
        self.state.pending = Some(url.clone());
        self.state.should_scroll = true;
        self.begin_attempt(url)
    }

    // -- Event Handling ---

    /// Drain the event bus. Returns whether anything changed, so hosts know
    /// to repaint. A render failure for the live attempt surfaces here.
    pub fn pump(&mut self) -> Result<bool, NavError> {
        let mut changed = false;
        while let Ok(evt) = self.evt_rx.try_recv() {
            changed |= self.on_event(evt)?;
        }
        Ok(changed)
    }

    pub fn on_event(&mut self, evt: RouterEvent<V>) -> Result<bool, NavError> {
        let current = self.nav_gen;
        match evt {
            RouterEvent::PopState => {
                self.on_pop_state()?;
                Ok(true)
            }

            RouterEvent::ViewReady { attempt, view } if attempt == current => {
                if self.attempt.is_none() {
                    return Ok(false);
                }
                self.commit(view);
                Ok(true)
            }
            RouterEvent::ViewReady { attempt, .. } => {
                debug!(target: "nav.machine", "discarding superseded view of attempt {attempt}");
                Ok(false)
            }

            RouterEvent::ViewFailed { attempt, error } if attempt == current => {
                // No Failed state: pending stays set, and only the next
                // navigation recovers the machine.
                debug!(target: "nav.machine", "attempt {attempt} failed: {error}");
                Err(NavError::Render(error))
            }
            RouterEvent::ViewFailed { attempt, error } => {
                trace!(target: "nav.machine", "superseded attempt {attempt} failed late: {error}");
                Ok(false)
            }

            RouterEvent::RenderNavigate {
                attempt,
                to,
                options,
            } if attempt == current => {
                // The render is abandoning itself on purpose; superseding
                // it must not look like a cancellation.
                if let Some(live) = self.attempt.as_mut() {
                    live.redirected = true;
                }
                self.navigate(&to, options)?;
                Ok(true)
            }
            RouterEvent::RenderNavigate { attempt, to, .. } => {
                trace!(target: "nav.machine", "ignoring navigate({to}) from stale attempt {attempt}");
                Ok(false)
            }

            RouterEvent::Rerender { attempt } if attempt == current => {
                let url = self.state.current.clone();
                trace!(target: "nav.machine", "rerender of {url}");
                self.state.pending = Some(url.clone());
                self.begin_attempt(url)?;
                Ok(true)
            }
            RouterEvent::Rerender { attempt } => {
                trace!(target: "nav.machine", "ignoring rerender from stale attempt {attempt}");
                Ok(false)
            }
        }
    }

    // -- Internal Helpers ---

    /// Start resolving the pending URL: supersede any in-flight attempt,
    /// bump the generation and hand the render callback its args.
    fn begin_attempt(&mut self, url: Url) -> Result<(), NavError> {
        if let Some(old) = self.attempt.take() {
            if old.redirected {
                trace!(target: "nav.machine", "attempt {} left via its own redirect", old.id);
            } else {
                trace!(target: "nav.machine", "cancelling superseded attempt {}", old.id);
                old.cancel.cancel();
            }
        }

        self.nav_gen = self.nav_gen.wrapping_add(1);
        let cancel = CancelToken::new();
        self.attempt = Some(Attempt {
            id: self.nav_gen,
            cancel: cancel.clone(),
            redirected: false,
        });
        self.notify();

        let args = RouteRenderArgs {
            url,
            cancel,
            sink: ViewSink::new(self.nav_gen, self.evt_tx.clone()),
            actions: RenderActions::new(self.nav_gen, self.evt_tx.clone()),
        };
        self.renderer.render(args).map_err(NavError::from)
    }

    /// The atomic step: pending becomes current, the view becomes the
    /// content, then scroll handling, then notifications.
    fn commit(&mut self, view: V) {
        let Some(url) = self.state.pending.take() else {
            return;
        };
        debug!(target: "nav.machine", "commit {url}");
        self.state.current = url;
        self.state.content = view;
        self.attempt = None;

        scroll::after_commit(
            self.scroll.as_mut(),
            &self.state.current,
            self.state.should_scroll,
        );
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener.notify_now();
        }
    }

    // -- Read Access ---

    /// Register a payload-free change notification, fired on every pending
    /// change and every commit. Readers re-query `snapshot()`.
    pub fn subscribe(&mut self, handle: NotifyHandle) {
        self.listeners.push(handle);
    }

    /// The last committed view.
    pub fn content(&self) -> &V {
        &self.state.content
    }
}

impl<V: Send + 'static> NavScope for Router<V> {
    fn current(&self) -> &Url {
        &self.state.current
    }

    fn pending(&self) -> Option<&Url> {
        self.state.pending.as_ref()
    }

    fn navigate(&mut self, to: &str, options: NavOptions) -> Result<bool, NavError> {
        Router::navigate(self, to, options)
    }
}

impl<V> Drop for Router<V> {
    fn drop(&mut self) {
        // unmount counts as supersession for the in-flight attempt
        if let Some(attempt) = self.attempt.take() {
            if !attempt.redirected {
                attempt.cancel.cancel();
            }
        }
    }
}
