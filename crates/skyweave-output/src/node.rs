//! Graph nodes backing [`Output`](crate::Output)
//!
//! A node is either pending, holding the continuations of the values
//! derived from it, or settled. Settling a node hands the result to each
//! continuation exactly once, which in turn settles the dependent nodes.

use crate::error::{OutputError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Continuation registered on a pending node.
///
/// Receives the settled result and the node's final secrecy.
pub(crate) type Continuation<T> = Box<dyn FnOnce(&Result<T>, bool) + Send>;

enum State<T> {
    Pending(Vec<Continuation<T>>),
    Settled(Result<T>),
}

pub(crate) struct Node<T> {
    state: Mutex<State<T>>,
    secret: AtomicBool,
    settled: watch::Sender<bool>,
}

impl<T: Clone + Send + Sync + 'static> Node<T> {
    pub(crate) fn pending(secret: bool) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::Pending(Vec::new())),
            secret: AtomicBool::new(secret),
            settled: watch::Sender::new(false),
        })
    }

    pub(crate) fn settled(result: Result<T>, secret: bool) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::Settled(result)),
            secret: AtomicBool::new(secret),
            settled: watch::Sender::new(true),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Continuations never run under the lock, so a poisoned lock only
        // means a panic elsewhere; the state itself is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn is_secret(&self) -> bool {
        self.secret.load(Ordering::Acquire)
    }

    /// Secrecy only ever escalates.
    pub(crate) fn mark_secret(&self) {
        self.secret.store(true, Ordering::Release);
    }

    pub(crate) fn peek(&self) -> Option<Result<T>> {
        match &*self.lock() {
            State::Pending(_) => None,
            State::Settled(result) => Some(result.clone()),
        }
    }

    /// Register a continuation, running it right away if already settled.
    pub(crate) fn subscribe(&self, continuation: Continuation<T>) {
        let result = {
            let mut state = self.lock();
            match &mut *state {
                State::Pending(continuations) => {
                    continuations.push(continuation);
                    return;
                }
                State::Settled(result) => result.clone(),
            }
        };
        continuation(&result, self.is_secret());
    }

    /// Settle the node. Returns false if it was already settled.
    fn settle(&self, result: Result<T>) -> bool {
        let continuations = {
            let mut state = self.lock();
            match &mut *state {
                State::Settled(_) => return false,
                State::Pending(continuations) => {
                    let continuations = std::mem::take(continuations);
                    *state = State::Settled(result.clone());
                    continuations
                }
            }
        };

        let secret = self.is_secret();
        for continuation in continuations {
            continuation(&result, secret);
        }
        self.settled.send_replace(true);
        true
    }

    pub(crate) async fn wait(&self) -> Result<T> {
        let mut settled = self.settled.subscribe();
        // The sender lives as long as this node, so the channel cannot close
        // while we hold `&self`.
        if settled.wait_for(|done| *done).await.is_err() {
            return Err(OutputError::Abandoned);
        }
        self.peek().unwrap_or(Err(OutputError::Abandoned))
    }
}

/// Write side of a pending output
///
/// Settles its output at most once. Dropping an unsettled resolver rejects
/// the output with [`OutputError::Abandoned`] so that nothing waits on it
/// forever.
pub struct Resolver<T: Clone + Send + Sync + 'static> {
    node: Option<Arc<Node<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Resolver<T> {
    pub(crate) fn new(node: Arc<Node<T>>) -> Self {
        Self { node: Some(node) }
    }

    /// Flag the output secret before it settles.
    pub fn mark_secret(&self) {
        if let Some(node) = &self.node {
            node.mark_secret();
        }
    }

    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: OutputError) {
        self.settle(Err(error));
    }

    pub fn settle(mut self, result: Result<T>) {
        if let Some(node) = self.node.take() {
            if !node.settle(result) {
                tracing::warn!("Ignoring second settlement of an output");
            }
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for Resolver<T> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            node.settle(Err(OutputError::Abandoned));
        }
    }
}

impl<T: Clone + Send + Sync + 'static> std::fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("settled", &self.node.is_none())
            .finish()
    }
}
