//! The single-slot channel between agent and interface.
//!
//! Frames travel over a rendezvous channel: a write completes only once
//! the interface asks for the next frame, which it does only after it has
//! finished dispatching the previous one. That is the "frame consumed"
//! half of the handshake. Replies travel back over a depth-1 channel and
//! the agent waits for one only after a query, so at most one frame is
//! ever in flight.
//!
//! The interface can reply at most once per frame: the `Reply` handle is
//! consumed by `send`, and a handle dropped without sending delivers the
//! null response so the agent is never left waiting.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::error::{DecodeError, SyncError};

use super::message::Message;
use super::query::{encode_response, Response, TaskMeta};
use super::step::Step;

struct Envelope {
    frame: Vec<u8>,
    expects_reply: bool,
}

/// Create a connected pair of channel ends.
///
/// `capacity` bounds every frame in either direction. `timeout` bounds how
/// long the agent waits for a reply; `None` waits forever.
pub fn channel(capacity: usize, timeout: Option<Duration>) -> (AgentEnd, InterfaceEnd) {
    let (frame_tx, frame_rx) = mpsc::sync_channel::<Envelope>(0);
    let (reply_tx, reply_rx) = mpsc::sync_channel::<Vec<u8>>(1);

    let agent = AgentEnd {
        capacity,
        timeout,
        frame_tx,
        reply_rx: Mutex::new(reply_rx),
    };
    let interface = InterfaceEnd {
        capacity,
        frame_rx,
        reply_tx,
    };
    (agent, interface)
}

/// The agent's end: writes frames, waits for replies.
pub struct AgentEnd {
    capacity: usize,
    timeout: Option<Duration>,
    frame_tx: SyncSender<Envelope>,
    reply_rx: Mutex<Receiver<Vec<u8>>>,
}

impl std::fmt::Debug for AgentEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentEnd")
            .field("capacity", &self.capacity)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AgentEnd {
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Write a frame that expects no reply.
    pub fn notify(&self, message: &Message) -> Result<(), SyncError> {
        debug_assert!(!message.step().expects_reply(), "{} expects a reply", message.step());
        self.write(message, false)
    }

    /// Write a query frame and block until its reply arrives.
    pub fn request(&self, message: &Message) -> Result<TaskMeta, SyncError> {
        debug_assert!(message.step().expects_reply(), "{} expects no reply", message.step());

        // Held across write and read so concurrent callers cannot interleave.
        let reply_rx = self.reply_rx.lock().unwrap_or_else(PoisonError::into_inner);
        self.write(message, true)?;

        let reply = match self.timeout {
            Some(timeout) => reply_rx.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => SyncError::Timeout(timeout),
                RecvTimeoutError::Disconnected => SyncError::Disconnected,
            })?,
            None => reply_rx.recv().map_err(|_| SyncError::Disconnected)?,
        };
        tracing::trace!(step = %message.step(), len = reply.len(), "reply read");
        Ok(TaskMeta::new(reply))
    }

    fn write(&self, message: &Message, expects_reply: bool) -> Result<(), SyncError> {
        let frame = message.encode()?;
        if frame.len() > self.capacity {
            return Err(SyncError::FrameTooLarge {
                len: frame.len(),
                max: self.capacity,
            });
        }
        tracing::trace!(step = %message.step(), len = frame.len(), "frame written");
        self.frame_tx
            .send(Envelope {
                frame,
                expects_reply,
            })
            .map_err(|_| SyncError::Disconnected)
    }
}

/// The interface's end: reads frames, replies to queries.
pub struct InterfaceEnd {
    capacity: usize,
    frame_rx: Receiver<Envelope>,
    reply_tx: SyncSender<Vec<u8>>,
}

impl std::fmt::Debug for InterfaceEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceEnd")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl InterfaceEnd {
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block until the agent writes a frame.
    ///
    /// The returned `Incoming` borrows this end, so the next frame cannot be
    /// read until the current one (and its reply handle) is finished with.
    pub fn read(&mut self) -> Result<Incoming<'_>, SyncError> {
        let envelope = self.frame_rx.recv().map_err(|_| SyncError::Disconnected)?;
        let reply = envelope.expects_reply.then(|| Reply {
            tx: &self.reply_tx,
            capacity: self.capacity,
            sent: false,
        });
        Ok(Incoming {
            frame: envelope.frame,
            reply,
        })
    }
}

/// One frame read by the interface.
#[derive(Debug)]
pub struct Incoming<'a> {
    pub frame: Vec<u8>,
    /// Present exactly when the agent is waiting for a reply.
    pub reply: Option<Reply<'a>>,
}

impl Incoming<'_> {
    /// The frame's step, read from its first byte.
    pub fn step(&self) -> Result<Step, DecodeError> {
        let tag = *self.frame.first().ok_or(DecodeError::Empty)?;
        Step::try_from(tag)
    }

    pub fn message(&self) -> Result<Message, DecodeError> {
        Message::decode(&self.frame)
    }
}

/// Single-use reply handle for one query frame.
pub struct Reply<'a> {
    tx: &'a SyncSender<Vec<u8>>,
    capacity: usize,
    sent: bool,
}

impl std::fmt::Debug for Reply<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply").field("sent", &self.sent).finish()
    }
}

impl Reply<'_> {
    /// Send the typed response.
    pub fn send<R: Response>(self, response: &R) -> Result<(), SyncError> {
        let frame = encode_response(response)?;
        self.send_raw(frame)
    }

    /// Send an already encoded response frame.
    ///
    /// An oversized frame is an error and the null response is sent instead.
    pub fn send_raw(mut self, frame: Vec<u8>) -> Result<(), SyncError> {
        if frame.len() > self.capacity {
            return Err(SyncError::FrameTooLarge {
                len: frame.len(),
                max: self.capacity,
            });
        }
        self.sent = true;
        self.tx.send(frame).map_err(|_| SyncError::Disconnected)
    }
}

impl Drop for Reply<'_> {
    fn drop(&mut self) {
        if !self.sent {
            // The agent may already be gone; nothing left to notify then.
            let _ = self.tx.try_send(Vec::new());
        }
    }
}
