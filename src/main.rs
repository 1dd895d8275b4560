//! Headless demo: an in-memory history host, the deferred render runtime
//! and a scripted set of navigations, including a superseded pair and a
//! back-button re-entry. Run with RUST_LOG=trace for the machine's view of
//! the same story.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use core_types::NavOptions;
use host_api::{HistoryHost, PopStateGuard, PopStateWaker, ScrollHost};
use log::info;
use router::{Link, MountOptions, NavError, NavScope, Router};
use runtime_render::{DeferredRenderer, ViewProducer, start_render_runtime};
use url::Url;

struct DemoHistoryState {
    location: Url,
    stack: Vec<Url>,
    index: usize,
    waker: Option<PopStateWaker>,
}

struct DemoHistory {
    state: Rc<RefCell<DemoHistoryState>>,
}

impl HistoryHost for DemoHistory {
    fn location(&self) -> Url {
        self.state.borrow().location.clone()
    }

    fn push(&mut self, url: &Url) {
        let mut state = self.state.borrow_mut();
        state.location = url.clone();
        // record to the stack (truncate forward branch)
        let keep = state.index + 1;
        state.stack.truncate(keep);
        state.stack.push(url.clone());
        state.index = state.stack.len() - 1;
    }

    fn replace(&mut self, url: &Url) {
        let mut state = self.state.borrow_mut();
        state.location = url.clone();
        let index = state.index;
        state.stack[index] = url.clone();
    }

    fn redirect(&mut self, url: &Url) {
        info!("full page load: {url}");
    }

    fn watch_pop_state(&mut self, waker: PopStateWaker) -> PopStateGuard {
        self.state.borrow_mut().waker = Some(waker);
        let state = self.state.clone();
        PopStateGuard::new(move || {
            state.borrow_mut().waker = None;
        })
    }
}

/// Simulate the browser's back button: move the stack cursor, then fire the
/// pop-state waker the way a real host would.
fn go_back(state: &Rc<RefCell<DemoHistoryState>>) {
    let waker = {
        let mut state = state.borrow_mut();
        if state.index == 0 {
            return;
        }
        state.index -= 1;
        state.location = state.stack[state.index].clone();
        state.waker.clone()
    };
    if let Some(waker) = waker {
        waker();
    }
}

struct DemoScroll;

impl ScrollHost for DemoScroll {
    fn scroll_to_fragment(&mut self, id: &str) -> bool {
        info!("scrolling #{id} into view");
        true
    }

    fn scroll_to_origin(&mut self) {
        info!("scrolling viewport to origin");
    }
}

/// Pump until the machine is idle, announcing each pending URL once.
fn settle(router: &mut Router<String>) -> Result<(), NavError> {
    let mut announced: Option<Url> = None;
    loop {
        router.pump()?;
        match router.pending() {
            Some(pending) => {
                if announced.as_ref() != Some(pending) {
                    println!("Loading {pending}");
                    announced = Some(pending.clone());
                }
                thread::sleep(Duration::from_millis(10));
            }
            None => return Ok(()),
        }
    }
}

fn print_links(router: &Router<String>) {
    let snapshot = router.snapshot();
    for href in ["/", "/x", "/y"] {
        let link = Link {
            class: Some("nav".into()),
            current_class: Some("active-link".into()),
            pending_class: Some("next-link".into()),
            ..Link::new(href)
        };
        println!("  [{href}] class=\"{}\"", link.class_string(&snapshot));
    }
}

fn main() -> Result<(), NavError> {
    env_logger::init();

    let (job_tx, job_rx) = channel();
    start_render_runtime(job_rx);

    let start = Url::parse("http://localhost/").expect("demo start url");
    let history = Rc::new(RefCell::new(DemoHistoryState {
        location: start.clone(),
        stack: vec![start],
        index: 0,
        waker: None,
    }));

    let produce: ViewProducer<String> = Arc::new(|url: &Url| {
        // stand-in for real view production
        thread::sleep(Duration::from_millis(150));
        Ok(format!("Loaded path: {}", url.path()))
    });

    let mut router = Router::mount(
        Box::new(DemoHistory {
            state: history.clone(),
        }),
        Box::new(DemoScroll),
        Box::new(DeferredRenderer::new(job_tx, produce)),
        "Loading".to_string(),
        MountOptions::default(),
    )?;

    settle(&mut router)?;
    println!("{}", router.content());

    // two rapid navigations; only the second one may ever commit
    router.navigate("/x", NavOptions::default())?;
    router.navigate("/y", NavOptions::default())?;
    print_links(&router);
    settle(&mut router)?;
    println!("{}", router.content());
    print_links(&router);

    // a fragment deep-link scrolls after its commit
    router.navigate("/docs#setup", NavOptions::default())?;
    settle(&mut router)?;
    println!("{}", router.content());

    // cross-origin never enters the machine
    let handled = router.navigate("http://other.example/away", NavOptions::default())?;
    println!("handled in-app: {handled}");

    // the back button replays /y through the same machine
    go_back(&history);
    settle(&mut router)?;
    println!("After back: {}", router.content());

    Ok(())
}
