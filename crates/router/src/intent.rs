use core_types::NavOptions;
use log::trace;
use url::Url;

use crate::error::IntentError;

/// Classification of a navigation intent, decided from the target URL alone
/// and before any history mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Handled by the state machine.
    Internal {
        url: Url,
        replace: bool,
        scroll: bool,
    },
    /// Delegated to a full browser navigation.
    External(Url),
}

/// Resolve an href against the current URL and decide its disposition.
///
/// Cross-origin targets are external. So are same-document fragment-only
/// changes: same path and query with a different fragment always take the
/// browser's native fragment handling, one code path for all of them.
pub fn resolve(
    current: &Url,
    href: &str,
    options: NavOptions,
) -> Result<Disposition, IntentError> {
    let url = current.join(href)?;

    if url.origin() != current.origin() {
        trace!(target: "nav.intent", "{href} -> external (origin)");
        return Ok(Disposition::External(url));
    }

    if url.path() == current.path()
        && url.query() == current.query()
        && url.fragment() != current.fragment()
    {
        trace!(target: "nav.intent", "{href} -> external (fragment-only)");
        return Ok(Disposition::External(url));
    }

    Ok(Disposition::Internal {
        url,
        replace: options.replace,
        scroll: options.scroll,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(href: &str) -> Url {
        Url::parse(href).unwrap()
    }

    fn dispose(current: &str, href: &str) -> Disposition {
        resolve(&at(current), href, NavOptions::default()).unwrap()
    }

    #[test]
    fn relative_href_resolves_against_current() {
        match dispose("http://localhost/a/b", "c") {
            Disposition::Internal { url, .. } => assert_eq!(url.as_str(), "http://localhost/a/c"),
            other => panic!("expected internal, got {other:?}"),
        }
    }

    #[test]
    fn absolute_path_is_internal() {
        match dispose("http://localhost/somewhere", "/x?q=1") {
            Disposition::Internal { url, .. } => {
                assert_eq!(url.path(), "/x");
                assert_eq!(url.query(), Some("q=1"));
            }
            other => panic!("expected internal, got {other:?}"),
        }
    }

    #[test]
    fn different_origin_is_external() {
        match dispose("http://localhost/", "http://other.example/y") {
            Disposition::External(url) => assert_eq!(url.as_str(), "http://other.example/y"),
            other => panic!("expected external, got {other:?}"),
        }
        // a different port is a different origin too
        assert!(matches!(
            dispose("http://localhost/", "http://localhost:8080/"),
            Disposition::External(_)
        ));
    }

    #[test]
    fn fragment_only_change_is_external() {
        assert!(matches!(
            dispose("http://localhost/page", "#section"),
            Disposition::External(_)
        ));
        assert!(matches!(
            dispose("http://localhost/page#a", "/page#b"),
            Disposition::External(_)
        ));
    }

    #[test]
    fn same_path_with_new_query_is_internal() {
        assert!(matches!(
            dispose("http://localhost/page", "/page?tab=2"),
            Disposition::Internal { .. }
        ));
    }

    #[test]
    fn path_change_with_fragment_is_internal() {
        match dispose("http://localhost/", "/deep#deep-linked") {
            Disposition::Internal { url, .. } => {
                assert_eq!(url.fragment(), Some("deep-linked"));
            }
            other => panic!("expected internal, got {other:?}"),
        }
    }

    #[test]
    fn identical_url_is_internal() {
        // same path, query and fragment: not a fragment-only change
        assert!(matches!(
            dispose("http://localhost/page#x", "/page#x"),
            Disposition::Internal { .. }
        ));
    }

    #[test]
    fn malformed_href_fails() {
        let err = resolve(&at("http://localhost/"), "http://[bad", NavOptions::default());
        assert!(matches!(err, Err(IntentError::InvalidUrl(_))));
    }

    #[test]
    fn options_ride_along_on_internal() {
        let options = NavOptions {
            replace: true,
            scroll: false,
        };
        match resolve(&at("http://localhost/"), "/x", options).unwrap() {
            Disposition::Internal {
                replace, scroll, ..
            } => {
                assert!(replace);
                assert!(!scroll);
            }
            other => panic!("expected internal, got {other:?}"),
        }
    }
}
