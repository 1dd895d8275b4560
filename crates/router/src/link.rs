use core_types::NavOptions;
use url::Url;

use crate::error::NavError;
use crate::scope::{NavScope, RouterSnapshot};

/// What an activator should do with the browser's default behavior after a
/// click went through `Link::activate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Internal disposition: handled in-app, suppress the default.
    Handled,
    /// External disposition: let the browser navigate.
    Default,
}

/// Link activation component: an href plus optional class decoration for
/// the route it points at. The host renders it however it likes and calls
/// `activate` on click.
pub struct Link {
    pub href: String,
    pub replace: bool,
    pub scroll: bool,
    pub class: Option<String>,
    /// Applied when the link's target is the committed route.
    pub current_class: Option<String>,
    /// Applied while a transition to the link's target is underway.
    pub pending_class: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            replace: false,
            scroll: true,
            class: None,
            current_class: None,
            pending_class: None,
        }
    }

    /// Run the click through the shared navigate path. `Handled` means the
    /// disposition was internal and the browser default must be suppressed.
    pub fn activate(&self, scope: &mut dyn NavScope) -> Result<Activation, NavError> {
        let options = NavOptions {
            replace: self.replace,
            scroll: self.scroll,
        };
        if scope.navigate(&self.href, options)? {
            Ok(Activation::Handled)
        } else {
            Ok(Activation::Default)
        }
    }

    /// Space-joined class list for the activator element: the base class,
    /// plus the current/pending decorations when the snapshot says the
    /// target route is committed or underway.
    pub fn class_string(&self, snapshot: &RouterSnapshot) -> String {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(class) = &self.class {
            classes.push(class);
        }

        if let Ok(target) = snapshot.current.join(&self.href) {
            if let Some(current_class) = &self.current_class {
                if same_route(&target, &snapshot.current) {
                    classes.push(current_class);
                }
            }
            if let Some(pending_class) = &self.pending_class {
                let pending_matches = snapshot
                    .pending
                    .as_ref()
                    .is_some_and(|pending| same_route(&target, pending));
                if pending_matches {
                    classes.push(pending_class);
                }
            }
        }

        classes.join(" ")
    }
}

/// Route identity for decoration: origin, path and query. The fragment is
/// ignored, it never distinguishes routes in-app.
fn same_route(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin() && a.path() == b.path() && a.query() == b.query()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::DetachedScope;

    fn snapshot(current: &str, pending: Option<&str>) -> RouterSnapshot {
        RouterSnapshot {
            current: Url::parse(current).unwrap(),
            pending: pending.map(|p| Url::parse(p).unwrap()),
        }
    }

    fn nav_link(href: &str) -> Link {
        Link {
            class: Some("nav".into()),
            current_class: Some("active-link".into()),
            pending_class: Some("next-link".into()),
            ..Link::new(href)
        }
    }

    #[test]
    fn current_route_gets_the_current_class() {
        let link = nav_link("/x");
        let classes = link.class_string(&snapshot("http://localhost/x", None));
        assert_eq!(classes, "nav active-link");
    }

    #[test]
    fn pending_route_gets_the_pending_class() {
        let link = nav_link("/y");
        let classes = link.class_string(&snapshot(
            "http://localhost/x",
            Some("http://localhost/y"),
        ));
        assert_eq!(classes, "nav next-link");
    }

    #[test]
    fn unrelated_route_gets_only_the_base_class() {
        let link = nav_link("/z");
        let classes = link.class_string(&snapshot(
            "http://localhost/x",
            Some("http://localhost/y"),
        ));
        assert_eq!(classes, "nav");
    }

    #[test]
    fn fragment_does_not_change_route_identity() {
        let link = nav_link("/x#section");
        let classes = link.class_string(&snapshot("http://localhost/x", None));
        assert_eq!(classes, "nav active-link");
    }

    #[test]
    fn query_distinguishes_routes() {
        let link = nav_link("/x?tab=2");
        let classes = link.class_string(&snapshot("http://localhost/x", None));
        assert_eq!(classes, "nav");
    }

    #[test]
    fn activation_outside_a_router_fails_fast() {
        let mut scope = DetachedScope::new(Url::parse("http://localhost/").unwrap());
        let err = Link::new("/x").activate(&mut scope);
        assert!(matches!(err, Err(NavError::NotMounted)));
    }
}
