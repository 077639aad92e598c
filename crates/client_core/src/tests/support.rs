use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::ClientError, transport::Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory transport answering each path from a queue of scripted replies.
/// An exhausted queue repeats its last reply; an unknown path is a 404.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Result<Value, ClientError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn reply(self, path: &str, reply: Result<Value, ClientError>) -> Self {
        self.replies
            .lock()
            .expect("replies")
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(self, path: &str, body: Value) -> Self {
        self.reply(path, Ok(body))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls").clone()
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        self.calls.lock().expect("calls").push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        let mut replies = self.replies.lock().expect("replies");
        let Some(queue) = replies.get_mut(path) else {
            return Err(ClientError::Http {
                status: 404,
                payload: Some(serde_json::json!({ "detail": "Not Found" })),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().expect("non-empty queue")
        } else {
            queue.front().cloned().expect("scripted reply")
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.answer("POST", path, Some(body))
    }
}

pub fn timeout_error(path: &str) -> ClientError {
    ClientError::Network {
        url: format!("http://backend.test/api{path}"),
        reason: "operation timed out".into(),
        timed_out: true,
    }
}
