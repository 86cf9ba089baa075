//! Shared blocking HTTP session with politeness throttling and a response cache.
//!
//! One `Session` is constructed per [`Autoproxy`](crate::Autoproxy) instance and
//! passed into each client component. Every outbound request is preceded by a
//! uniform random delay inside the caller-supplied bounds; HTML/JSON GETs are
//! cached in memory and a cache hit skips both the delay and the request.

use crate::error::Result;
use rand::Rng;
use reqwest::blocking::Client;
use std::cell::RefCell;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Blocking HTTP session shared by all clients.
///
/// The underlying `reqwest` client is built lazily on first use. Interior
/// mutability lets the borrowing client wrappers (`ScryfallClient`,
/// `GalleryClient`, ...) share one session without threading `&mut` through
/// every call.
pub struct Session {
    timeout: Duration,
    client: RefCell<Option<Client>>,
    cache: RefCell<HashMap<String, String>>,
}

impl Session {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: RefCell::new(None),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Client {
        let mut slot = self.client.borrow_mut();
        if slot.is_none() {
            *slot = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()
                    .expect("failed to build HTTP client"),
            );
        }
        slot.as_ref().unwrap().clone()
    }

    /// Sleep a uniform random duration inside `wait` (seconds).
    fn throttle(&self, wait: (f64, f64)) {
        let secs = rand::thread_rng().gen_range(wait.0..wait.1);
        thread::sleep(Duration::from_secs_f64(secs));
    }

    /// Throttled GET returning the response body as text.
    ///
    /// Responses are cached by full URL; a cache hit returns immediately with
    /// no delay and no request. Status codes are not checked -- callers that
    /// scrape expect placeholder pages and error payloads as regular bodies.
    pub fn get_text(&self, url: &str, params: &[(&str, &str)], wait: (f64, f64)) -> Result<String> {
        let key = cache_key(url, params);
        if let Some(body) = self.cache.borrow().get(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(body.clone());
        }

        self.throttle(wait);
        let body = self
            .client()
            .get(url)
            .query(params)
            .send()?
            .text()?;
        self.cache.borrow_mut().insert(key, body.clone());
        Ok(body)
    }

    /// Throttled GET with extra request headers, cached like [`get_text`](Self::get_text).
    pub fn get_text_with_headers(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        wait: (f64, f64),
    ) -> Result<String> {
        let key = cache_key(url, params);
        if let Some(body) = self.cache.borrow().get(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(body.clone());
        }

        self.throttle(wait);
        let mut request = self.client().get(url).query(params);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let body = request.send()?.text()?;
        self.cache.borrow_mut().insert(key, body.clone());
        Ok(body)
    }

    /// Throttled GET returning raw bytes. Never cached -- image payloads are
    /// fetched at most once per run and would bloat the cache.
    pub fn get_bytes(&self, url: &str, wait: (f64, f64)) -> Result<Vec<u8>> {
        self.throttle(wait);
        let bytes = self.client().get(url).send()?.bytes()?;
        Ok(bytes.to_vec())
    }

    /// Throttled form POST returning the response body as text. Never cached.
    pub fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
        wait: (f64, f64),
    ) -> Result<String> {
        self.throttle(wait);
        let mut request = self.client().post(url).form(form);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let body = request.send()?.text()?;
        Ok(body)
    }
}

/// Cache key: the URL plus its query string in argument order.
fn cache_key(url: &str, params: &[(&str, &str)]) -> String {
    let mut key = String::from(url);
    for (i, (name, value)) in params.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}
