//! Client-side navigation controller: intercepts in-app navigation
//! intents, updates the host's history, asynchronously produces a view for
//! the target URL and manages scroll position across transitions.
//!
//! Not a route matcher. The consuming app supplies one render callback
//! ([`host_api::RenderView`]) that inspects the URL itself; this crate only
//! decides which URL wins, when it commits, and what happens around the
//! commit.

mod error;
mod intent;
mod link;
mod machine;
mod scope;
mod scroll;

pub use error::{IntentError, NavError};
pub use intent::{Disposition, resolve as resolve_intent};
pub use link::{Activation, Link};
pub use machine::{MountOptions, Router};
pub use scope::{DetachedScope, NavScope, RouterSnapshot};
pub use scroll::after_commit as scroll_after_commit;
