//! Scripted transport and counting limiter for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;
use volusion_core::Product;

use crate::delay::RateLimiter;
use crate::error::FetchError;
use crate::transport::Transport;
use crate::xml::encode_products;

/// Observable side effect, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Call,
    Delay,
}

type EventLog = Arc<Mutex<Vec<Event>>>;

/// Transport that replays queued responses. An exhausted queue answers
/// with an absent page or a successful post.
pub(crate) struct ScriptedTransport {
    gets: Mutex<VecDeque<Result<Option<String>, FetchError>>>,
    posts: Mutex<VecDeque<Result<(), FetchError>>>,
    get_calls: AtomicU32,
    post_calls: AtomicU32,
    posted: Mutex<Vec<String>>,
    events: EventLog,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            gets: Mutex::new(VecDeque::new()),
            posts: Mutex::new(VecDeque::new()),
            get_calls: AtomicU32::new(0),
            post_calls: AtomicU32::new(0),
            posted: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_get(self, response: Result<Option<String>, FetchError>) -> Self {
        self.gets.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn with_post(self, response: Result<(), FetchError>) -> Self {
        self.posts.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn post_calls(&self) -> u32 {
        self.post_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, _url: &Url) -> Result<Option<String>, FetchError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(Event::Call);
        self.gets.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn post(&self, _url: &Url, body: &str) -> Result<(), FetchError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(Event::Call);
        self.posted.lock().unwrap().push(body.to_string());
        self.posts.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// Rate limiter that only counts.
pub(crate) struct CountingLimiter {
    waits: AtomicU32,
    events: EventLog,
}

impl CountingLimiter {
    /// Creates a limiter that logs into the transport's event stream.
    pub(crate) fn for_transport(transport: &ScriptedTransport) -> Arc<Self> {
        Arc::new(Self {
            waits: AtomicU32::new(0),
            events: transport.events.clone(),
        })
    }

    pub(crate) fn waits(&self) -> u32 {
        self.waits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(Event::Delay);
    }
}

/// A successful page holding `(sku, quantity)` records.
pub(crate) fn page<S: AsRef<str>>(items: &[(S, i64)]) -> Result<Option<String>, FetchError> {
    let products: Vec<Product> = items
        .iter()
        .map(|(sku, quantity)| Product::new(sku.as_ref(), *quantity))
        .collect();
    encode_products(&products).map(Some)
}

/// The terminating empty page.
pub(crate) fn empty_page() -> Result<Option<String>, FetchError> {
    page::<&str>(&[])
}
