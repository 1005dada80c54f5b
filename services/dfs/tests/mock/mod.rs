//! Scripted in-memory transport for exercising the clients hermetically.

use adlg2_core::{Context, Error, HttpSend, Result};
use adlg2_dfs::{Client, Config};
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A request the mock saw, flattened for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: http::HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<http::Response<Bytes>>,
    requests: Vec<RecordedRequest>,
}

/// HttpSend implementation that pops pre-scripted responses in order and
/// records every request it sees. Clones share state, so tests keep a
/// handle after moving one into the [`Context`].
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        self.push_bytes_response(status, headers, body.as_bytes());
    }

    pub fn push_bytes_response(&self, status: u16, headers: &[(&str, &str)], body: &[u8]) {
        let mut builder = http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let resp = builder
            .body(Bytes::copy_from_slice(body))
            .expect("mock response must be valid");
        self.state.lock().unwrap().responses.push_back(resp);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait::async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: req.method().to_string(),
            uri: req.uri().to_string(),
            headers: req.headers().clone(),
            body: req.body().clone(),
        });
        state
            .responses
            .pop_front()
            .ok_or_else(|| Error::unexpected("mock transport has no scripted response left"))
    }
}

pub const ACCOUNT: &str = "testaccount";
pub const ENDPOINT: &str = "https://testaccount.dfs.core.windows.net";

/// Body text the service uses to report an exhausted internal time budget.
pub const TIMED_OUT_BODY: &str =
    "Server busy. Operation could not be completed within the specified time. Please retry.";

pub fn token_body(token: &str) -> String {
    format!(r#"{{"access_token":"{token}","expires_in":3600}}"#)
}

pub fn shared_key_client(mock: &MockHttpSend) -> Client {
    let ctx = Context::new().with_http_send(mock.clone());
    let config = Config {
        account_name: Some(ACCOUNT.to_string()),
        account_key: Some("dGVzdC1rZXk=".to_string()),
        ..Default::default()
    };
    Client::new(config, ctx).expect("client must build")
}

pub fn oauth_client(mock: &MockHttpSend) -> Client {
    let ctx = Context::new().with_http_send(mock.clone());
    let config = Config {
        account_name: Some(ACCOUNT.to_string()),
        tenant_id: Some("test-tenant".to_string()),
        client_id: Some("test-client".to_string()),
        client_secret: Some("test-secret".to_string()),
        ..Default::default()
    };
    Client::new(config, ctx).expect("client must build")
}
