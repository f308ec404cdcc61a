//! Scripted transport shared by the unit tests

use crate::dispatch::SearchTransport;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// Answers by exact path; unknown paths get an empty array.
///
/// A gated path blocks its worker until the test releases the gate.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: HashMap<String, Result<String, String>>,
    gates: Mutex<HashMap<String, Receiver<()>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(path.to_string(), Ok(body.to_string()));
        self
    }

    pub(crate) fn fail(mut self, path: &str, message: &str) -> Self {
        self.responses
            .insert(path.to_string(), Err(message.to_string()));
        self
    }

    /// Hold requests for `path` until the returned sender fires or drops
    pub(crate) fn gate(&self, path: &str) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl SearchTransport for FakeTransport {
    fn get(&self, path_and_query: &str) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .unwrap()
            .push(path_and_query.to_string());

        let gate = self.gates.lock().unwrap().remove(path_and_query);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        match self.responses.get(path_and_query) {
            Some(Ok(body)) => Ok(body.clone().into_bytes()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => Ok(b"[]".to_vec()),
        }
    }
}
