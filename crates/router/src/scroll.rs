use host_api::ScrollHost;
use log::trace;
use url::Url;

/// Scroll handling for a just-committed URL. Runs after the commit, never
/// during a pending transition, and always completes synchronously.
///
/// Fragment present: scroll its element into view, falling back to the
/// origin when the host knows no such element. No fragment: reset to the
/// origin. `should_scroll` false: leave the viewport alone.
pub fn after_commit(host: &mut dyn ScrollHost, url: &Url, should_scroll: bool) {
    if !should_scroll {
        return;
    }

    match url.fragment() {
        Some(fragment) if !fragment.is_empty() => {
            if host.scroll_to_fragment(fragment) {
                trace!(target: "nav.scroll", "scrolled #{fragment} into view");
            } else {
                trace!(target: "nav.scroll", "no element for #{fragment}, resetting viewport");
                host.scroll_to_origin();
            }
        }
        _ => host.scroll_to_origin(),
    }
}
