//! Traits at the seams of the navigation machine: the browser-ish host
//! environment on one side, the consuming app's render callback on the
//! other. Tests and the demo plug in-memory implementations in here.

use std::sync::Arc;

use bus::{RenderActions, ViewSink};
use core_types::{CancelToken, RenderError};
use url::Url;

/// Called by the host when a browser-originated back/forward happens. The
/// payload is deliberately empty; the machine re-reads the location itself.
pub type PopStateWaker = Arc<dyn Fn() + Send + Sync>;

/// RAII handle for a pop-state subscription. Dropping it releases the
/// listener; the machine keeps it for exactly its mount lifetime, so the
/// subscription can never outlive the machine.
pub struct PopStateGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl PopStateGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// For hosts whose subscription needs no explicit release.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for PopStateGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Address bar and history stack, as seen by the machine.
///
/// `push`/`replace` are side-effect-only history mutations. `redirect` is a
/// full-page navigation away from the document; in a real browser host
/// control does not usefully return from it.
pub trait HistoryHost {
    fn location(&self) -> Url;
    fn push(&mut self, url: &Url);
    fn replace(&mut self, url: &Url);
    fn redirect(&mut self, url: &Url);
    /// Subscribe to back/forward events. The waker must be invoked on each
    /// one, until the returned guard is dropped.
    fn watch_pop_state(&mut self, waker: PopStateWaker) -> PopStateGuard;
}

/// Scroll primitives used by the coordinator after a commit.
pub trait ScrollHost {
    /// Look up the element whose identifier matches the fragment and scroll
    /// it into view. Returns false when no such element exists.
    fn scroll_to_fragment(&mut self, id: &str) -> bool;
    /// Reset the viewport to the origin (0,0).
    fn scroll_to_origin(&mut self);
}

/// Payload-free change notification, cloned out to anyone who wants to know
/// the navigation state moved. Readers re-query the snapshot; the handle
/// carries nothing.
#[derive(Clone)]
pub struct NotifyHandle(Arc<dyn Fn() + Send + Sync>);

impl NotifyHandle {
    pub fn new(notify: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(notify))
    }

    pub fn notify_now(&self) {
        (self.0)();
    }
}

/// Everything a render callback gets for one transition attempt. Valid only
/// for that attempt: once it is superseded, the sink and actions still
/// exist but anything sent through them is discarded by the machine.
pub struct RouteRenderArgs<V> {
    /// URL for which a view should be produced.
    pub url: Url,
    /// Raised if the attempt is superseded (unless it redirected itself).
    pub cancel: CancelToken,
    /// One-shot delivery of the produced view.
    pub sink: ViewSink<V>,
    /// In-render navigate / force-rerender.
    pub actions: RenderActions<V>,
}

/// The sole extension point: turn a URL into a view.
///
/// Implementations either complete `args.sink` before returning (an
/// immediate view) or hand it to deferred machinery that completes it
/// later; the machine treats both the same. An `Err` from this call is a
/// render failure surfacing synchronously. It is never caught or retried.
pub trait RenderView<V> {
    fn render(&mut self, args: RouteRenderArgs<V>) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn guard_releases_exactly_once_on_drop() {
        static RELEASED: AtomicUsize = AtomicUsize::new(0);

        let guard = PopStateGuard::new(|| {
            RELEASED.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(RELEASED.load(Ordering::SeqCst), 0);

        drop(guard);
        assert_eq!(RELEASED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn noop_guard_drops_quietly() {
        drop(PopStateGuard::noop());
    }

    #[test]
    fn notify_handle_fans_out() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let handle = NotifyHandle::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        handle.notify_now();
        handle.clone().notify_now();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
