//! Mock fare source for testing without API access.
//!
//! Outcomes are scripted in advance and consumed in call order. A
//! scripted outcome may be gated on a oneshot channel so a test can hold
//! a call in flight and resolve several calls in a chosen order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::domain::{Crs, FareSearchResult};

use super::error::FareError;
use super::source::FareSource;

/// One scripted call: the outcome, and an optional gate the call awaits
/// before resolving.
struct ScriptedCall {
    outcome: Result<FareSearchResult, FareError>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<ScriptedCall>,
    calls: Vec<(Crs, Crs, DateTime<Utc>)>,
}

/// Scriptable [`FareSource`] for tests.
#[derive(Clone, Default)]
pub struct MockFareSource {
    state: Arc<Mutex<MockState>>,
}

impl MockFareSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next call to succeed immediately.
    pub fn push_success(&self, result: FareSearchResult) {
        self.push(Ok(result), None);
    }

    /// Script the next call to fail immediately.
    pub fn push_error(&self, error: FareError) {
        self.push(Err(error), None);
    }

    /// Script the next call to succeed once the returned sender fires.
    ///
    /// Dropping the sender also releases the call.
    pub fn push_gated_success(&self, result: FareSearchResult) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(result), Some(rx));
        tx
    }

    /// Script the next call to fail once the returned sender fires.
    pub fn push_gated_error(&self, error: FareError) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Err(error), Some(rx));
        tx
    }

    fn push(&self, outcome: Result<FareSearchResult, FareError>, gate: Option<oneshot::Receiver<()>>) {
        let mut state = self.state.lock().expect("mock state lock poisoned");
        state.script.push_back(ScriptedCall { outcome, gate });
    }

    /// Arguments of every call made so far, in call order.
    pub fn calls(&self) -> Vec<(Crs, Crs, DateTime<Utc>)> {
        let state = self.state.lock().expect("mock state lock poisoned");
        state.calls.clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        let state = self.state.lock().expect("mock state lock poisoned");
        state.calls.len()
    }
}

impl FareSource for MockFareSource {
    fn search(
        &self,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<FareSearchResult, FareError>> {
        // Take the scripted outcome at invocation time so the script is
        // consumed in request order, not resolution order.
        let scripted = {
            let mut state = self.state.lock().expect("mock state lock poisoned");
            state.calls.push((origin, destination, outbound));
            state.script.pop_front()
        };

        async move {
            let Some(ScriptedCall { outcome, gate }) = scripted else {
                return Err(FareError::Api {
                    status: 0,
                    message: "mock fare source: no scripted outcome for this call".to_string(),
                });
            };

            if let Some(gate) = gate {
                // A dropped sender releases the call too.
                let _ = gate.await;
            }

            outcome
        }
        .boxed()
    }
}
