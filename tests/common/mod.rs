//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use loginvm::auth::{LoginError, LoginRequest, LoginResponse, LoginService};
use parking_lot::Mutex;
use tokio::sync::oneshot;

type Outcome = Result<LoginResponse, LoginError>;

/// Login service whose calls stay pending until the test resolves them.
#[derive(Default)]
pub struct GatedLoginService {
    calls: AtomicUsize,
    requests: Mutex<Vec<LoginRequest>>,
    pending: Mutex<VecDeque<oneshot::Sender<Outcome>>>,
}

impl GatedLoginService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<LoginRequest> {
        self.requests.lock().clone()
    }

    /// Resolve the oldest pending call, waiting for one to arrive first.
    pub async fn resolve_next(&self, outcome: Outcome) {
        loop {
            let next = self.pending.lock().pop_front();
            if let Some(tx) = next {
                let _ = tx.send(outcome);
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    pub async fn succeed(&self, token: Option<&str>) {
        self.resolve_next(Ok(LoginResponse {
            token: token.map(str::to_string),
        }))
        .await;
    }

    pub async fn fail(&self, message: &str) {
        self.resolve_next(Err(LoginError::new(message))).await;
    }
}

#[async_trait]
impl LoginService for GatedLoginService {
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, LoginError> {
        let (tx, rx) = oneshot::channel();
        self.requests.lock().push(request);
        self.pending.lock().push_back(tx);
        self.calls.fetch_add(1, Ordering::SeqCst);
        rx.await
            .unwrap_or_else(|_| Err(LoginError::new("gate dropped")))
    }
}

/// Let spawned tasks on the current runtime run until they block.
///
/// Only meaningful on a current-thread runtime, like `VirtualClock::advance`.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn cards(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("card {}", i)).collect()
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

pub fn millis(n: u64) -> Duration {
    Duration::from_millis(n)
}
