//! Scripted in-memory transport shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use revalid_client::{HttpRequest, HttpResponse, Transport};

enum Scripted {
    Respond {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    },
    Fail,
}

#[derive(Default)]
struct State {
    script: VecDeque<Scripted>,
    seen: Vec<HttpRequest>,
}

/// Replays queued responses in order and records every request it receives.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, headers: &[(&str, &str)], body: &str) -> &Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.append(
                HeaderName::from_bytes(name.as_bytes()).expect("header name"),
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        self.push(Scripted::Respond {
            status: StatusCode::from_u16(status).expect("status"),
            headers: map,
            body: Bytes::copy_from_slice(body.as_bytes()),
        });
        self
    }

    pub fn fail(&self) -> &Self {
        self.push(Scripted::Fail);
        self
    }

    fn push(&self, scripted: Scripted) {
        self.state.lock().expect("mock state").script.push_back(scripted);
    }

    /// Number of requests that reached the transport
    pub fn dispatches(&self) -> usize {
        self.state.lock().expect("mock state").seen.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().expect("mock state").seen.last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = revalid_client::Result<HttpResponse>> + Send {
        let result = {
            let mut state = self.state.lock().expect("mock state");
            let scripted = state.script.pop_front();
            state.seen.push(request.clone());
            scripted
        };

        async move {
            let url = request.url()?;
            match result {
                Some(Scripted::Respond {
                    status,
                    headers,
                    body,
                }) => Ok(HttpResponse::from_network(status, headers, body, url)),
                Some(Scripted::Fail) => Err(revalid_client::error::connect("connection refused", url)),
                None => panic!("unexpected dispatch to {url}"),
            }
        }
    }
}

/// Sun, 06 Nov 1994 08:49:37 GMT
pub fn epoch() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(784_111_777)
}

pub const ORIGIN: &str = "http://origin.test/";

/// Routes `revalid::*` events to the test writer; `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("revalid=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
