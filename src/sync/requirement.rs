//! Blocking queries from rule code.
//!
//! A `Requirement` is bound to one `QueryKind` and an `Interactor`. Calling
//! `interact` is the only place a task ever blocks: the query frame is
//! written, and the call returns once the matching response (or the null
//! response) is available.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::PlayerId;
use crate::error::SyncError;

use super::channel::AgentEnd;
use super::message::Message;
use super::query::{QueryKind, Response, TaskMeta};

/// Something that answers queries.
pub trait Interactor: std::fmt::Debug + Send + Sync {
    /// Send one query and block until its response is available.
    fn interact(&self, query: &Message) -> Result<TaskMeta, SyncError>;
}

impl Interactor for AgentEnd {
    fn interact(&self, query: &Message) -> Result<TaskMeta, SyncError> {
        self.request(query)
    }
}

/// Reusable blocking-request handle bound to a query kind.
#[derive(Clone, Debug)]
pub struct Requirement {
    kind: QueryKind,
    interactor: Arc<dyn Interactor>,
}

impl Requirement {
    #[must_use]
    pub fn new(kind: QueryKind, interactor: Arc<dyn Interactor>) -> Self {
        Self { kind, interactor }
    }

    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Ask `player` the query and wait for the response.
    ///
    /// The query frame must carry this requirement's step. The returned
    /// meta is opaque; decode it with the response type of `kind()`.
    pub fn interact(&self, player: PlayerId, query: &Message) -> Result<TaskMeta, SyncError> {
        debug_assert_eq!(query.step(), self.kind.step(), "query does not match requirement");
        debug_assert_eq!(query.user_id(), Some(player), "query names another player");

        tracing::debug!(%player, kind = ?self.kind, "interact");
        self.interactor.interact(query)
    }
}

/// Answers queries from a prepared queue of responses.
///
/// Used to drive tasks without an interface thread: responses are handed
/// out in the order they were pushed, and every query is recorded. An
/// exhausted queue behaves like a disconnected peer.
#[derive(Debug, Default)]
pub struct ReplayInteractor {
    responses: Mutex<VecDeque<TaskMeta>>,
    queries: Mutex<Vec<Message>>,
}

impl ReplayInteractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a typed response.
    pub fn push<R: Response>(&self, response: &R) -> Result<(), SyncError> {
        let meta = TaskMeta::from_response(response)?;
        self.push_meta(meta);
        Ok(())
    }

    /// Queue a raw response, e.g. a null or malformed one.
    pub fn push_meta(&self, meta: TaskMeta) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(meta);
    }

    /// Responses not yet handed out.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Queries received so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<Message> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Interactor for ReplayInteractor {
    fn interact(&self, query: &Message) -> Result<TaskMeta, SyncError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or(SyncError::Disconnected)
    }
}
