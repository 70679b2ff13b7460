use crate::domain::ports::Transport;
use crate::utils::error::{ObsError, Result};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub route: String,
    pub params: Vec<(String, String)>,
    pub payload: Option<Vec<u8>>,
}

/// In-memory transport: canned bodies per (method, route), 404 for anything else.
pub(crate) struct FakeTransport {
    replies: HashMap<(Method, String), std::result::Result<String, u16>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn reply(mut self, method: Method, route: &str, body: &str) -> Self {
        self.replies
            .insert((method, route.to_string()), Ok(body.to_string()));
        self
    }

    pub fn fail(mut self, method: Method, route: &str, status: u16) -> Self {
        self.replies.insert((method, route.to_string()), Err(status));
        self
    }

    /// Every request sleeps this long, so overlapping requests can be observed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn api_request(
        &self,
        route: &str,
        method: Method,
        params: &[(&str, &str)],
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        self.calls.lock().await.push(RecordedCall {
            method: method.clone(),
            route: route.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            payload,
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.replies.get(&(method.clone(), route.to_string())) {
            Some(Ok(body)) => Ok(body.clone().into_bytes()),
            Some(Err(status)) => Err(status_error(&method, route, *status)),
            None => Err(status_error(&method, route, 404)),
        }
    }
}

fn status_error(method: &Method, route: &str, status: u16) -> ObsError {
    ObsError::Status {
        method: method.to_string(),
        route: route.to_string(),
        status,
        code: None,
        summary: format!("canned status {}", status),
    }
}
