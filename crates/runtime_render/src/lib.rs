//! Worker-thread driver for deferred view production. The machine never
//! blocks on a render; callbacks that do real work hand their sink to this
//! runtime and the finished view re-enters through the bus.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use bus::ViewSink;
use core_types::{CancelToken, RenderError};
use host_api::{RenderView, RouteRenderArgs};
use log::{debug, trace};
use url::Url;

/// Produces a view for a URL. Runs on the runtime thread.
pub type ViewProducer<V> = Arc<dyn Fn(&Url) -> Result<V, RenderError> + Send + Sync>;

pub struct RenderJob<V> {
    pub url: Url,
    pub cancel: CancelToken,
    pub sink: ViewSink<V>,
    pub produce: Box<dyn FnOnce(&Url) -> Result<V, RenderError> + Send>,
}

/// Run render jobs until every job sender is gone. Jobs whose cancel token
/// fired are skipped before work and their result dropped after it; the
/// machine discards stale results either way.
pub fn start_render_runtime<V: Send + 'static>(job_rx: Receiver<RenderJob<V>>) {
    thread::spawn(move || {
        while let Ok(job) = job_rx.recv() {
            if job.cancel.is_cancelled() {
                trace!(target: "nav.runtime", "skipping cancelled render of {}", job.url);
                continue;
            }
            match (job.produce)(&job.url) {
                Ok(view) => {
                    if job.cancel.is_cancelled() {
                        trace!(target: "nav.runtime", "dropping cancelled render of {}", job.url);
                        continue;
                    }
                    job.sink.ready(view);
                }
                Err(error) => {
                    debug!(target: "nav.runtime", "render of {} failed: {error}", job.url);
                    job.sink.fail(error);
                }
            }
        }
    });
}

/// Adapts a producer closure into the render contract: every render becomes
/// a job for the runtime thread. Producers that need in-render navigation
/// or rerender implement [`RenderView`] themselves instead.
pub struct DeferredRenderer<V> {
    job_tx: Sender<RenderJob<V>>,
    produce: ViewProducer<V>,
}

impl<V> DeferredRenderer<V> {
    pub fn new(job_tx: Sender<RenderJob<V>>, produce: ViewProducer<V>) -> Self {
        Self { job_tx, produce }
    }
}

impl<V: Send + 'static> RenderView<V> for DeferredRenderer<V> {
    fn render(&mut self, args: RouteRenderArgs<V>) -> Result<(), RenderError> {
        let RouteRenderArgs {
            url, cancel, sink, ..
        } = args;
        let produce = self.produce.clone();
        self.job_tx
            .send(RenderJob {
                url,
                cancel,
                sink,
                produce: Box::new(move |url| produce(url)),
            })
            .map_err(|_| RenderError::new("render runtime is not running"))
    }
}
