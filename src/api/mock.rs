//! Recording backend for tests.
//!
//! `MockBackend` implements [`Backend`] by answering from a queue of canned
//! responses and recording every request it receives.
//!
//! # Example
//!
//! ```
//! use foundry::api::{ApiRequest, Backend, MockBackend};
//! use serde_json::json;
//!
//! let backend = MockBackend::new();
//! backend.respond_json(json!([{"id": 1}]));
//!
//! let response = backend.send(ApiRequest::get("/projects")).unwrap();
//! assert_eq!(response.json().unwrap()[0]["id"], 1);
//! assert_eq!(backend.requests()[0].path, "/projects");
//! ```

use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{FoundryError, Result};

use super::{ApiRequest, ApiResponse, Backend};

enum Reply {
    Ok(ApiResponse),
    Fail { status: u16, message: String },
}

/// Backend that replays queued responses.
///
/// When the queue is empty every request gets an empty `204`.
#[derive(Default)]
pub struct MockBackend {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200` response with a JSON body.
    pub fn respond_json(&self, body: Value) {
        self.respond(ApiResponse::ok_json(&body));
    }

    /// Queue an arbitrary successful response.
    pub fn respond(&self, response: ApiResponse) {
        self.replies.borrow_mut().push_back(Reply::Ok(response));
    }

    /// Queue an HTTP failure.
    pub fn fail_with(&self, status: u16, message: &str) {
        self.replies.borrow_mut().push_back(Reply::Fail {
            status,
            message: message.to_string(),
        });
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Backend for MockBackend {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let reply = self.replies.borrow_mut().pop_front();
        let (method, path) = (request.method.to_string(), request.path.clone());
        self.requests.borrow_mut().push(request);

        match reply {
            Some(Reply::Ok(response)) => Ok(response),
            Some(Reply::Fail { status, message }) => Err(FoundryError::Http {
                status,
                method,
                path,
                message,
            }),
            None => Ok(ApiResponse {
                status: 204,
                ..Default::default()
            }),
        }
    }
}
