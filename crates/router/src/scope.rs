use core_types::NavOptions;
use url::Url;

use crate::error::NavError;

/// Immutable view of the navigation state, cheap to clone out to readers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterSnapshot {
    pub current: Url,
    pub pending: Option<Url>,
}

/// Navigation capability handed to consuming views. Always supplied
/// explicitly; there is no ambient default to fall back on.
pub trait NavScope {
    fn current(&self) -> &Url;
    fn pending(&self) -> Option<&Url>;
    fn navigate(&mut self, to: &str, options: NavOptions) -> Result<bool, NavError>;

    fn snapshot(&self) -> RouterSnapshot {
        RouterSnapshot {
            current: self.current().clone(),
            pending: self.pending().cloned(),
        }
    }
}

/// Scope for contexts with no interactive history, e.g. rendering a known
/// URL outside a mounted router. Navigating through it fails fast instead
/// of silently doing nothing.
pub struct DetachedScope {
    current: Url,
}

impl DetachedScope {
    pub fn new(current: Url) -> Self {
        Self { current }
    }
}

impl NavScope for DetachedScope {
    fn current(&self) -> &Url {
        &self.current
    }

    fn pending(&self) -> Option<&Url> {
        None
    }

    fn navigate(&mut self, _to: &str, _options: NavOptions) -> Result<bool, NavError> {
        Err(NavError::NotMounted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_scope_refuses_to_navigate() {
        let mut scope = DetachedScope::new(Url::parse("http://localhost/ssr").unwrap());
        assert_eq!(scope.current().path(), "/ssr");
        assert!(scope.pending().is_none());

        let err = scope.navigate("/x", NavOptions::default());
        assert!(matches!(err, Err(NavError::NotMounted)));
    }
}
