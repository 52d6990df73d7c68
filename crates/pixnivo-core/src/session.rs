//! Supersession of in-flight operations.
//!
//! Every file the user selects gets a [`Ticket`] from the page's
//! [`Session`]. Selecting another file issues a newer ticket, and every
//! older ticket becomes stale. Tool operations check their ticket between
//! stages and stop with [`ToolError::Superseded`] once it is stale, so a
//! result computed for an old selection is never handed back as current.
//!
//! The generation counter is atomic so a ticket can be invalidated from
//! another thread (or a worker message handler) while an encode is running.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::tools::ToolError;

/// Issues tickets. Cloning shares the same generation counter.
#[derive(Debug, Clone, Default)]
pub struct Session {
    generation: Arc<AtomicU64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, invalidating all earlier tickets.
    pub fn select(&self) -> Ticket {
        let id = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket {
            id,
            generation: Arc::clone(&self.generation),
        }
    }

    /// Invalidate every outstanding ticket without issuing a new one
    /// (e.g. the user navigated away).
    pub fn cancel_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Proof that an operation belongs to a particular selection.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl Ticket {
    /// A ticket that is never superseded, for callers without a session.
    pub fn detached() -> Self {
        Session::new().select()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.id
    }

    /// `Err(Superseded)` once a newer selection exists.
    pub fn ensure_current(&self) -> Result<(), ToolError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(ToolError::Superseded { ticket: self.id })
        }
    }

    /// Hand `value` out only if this ticket is still current.
    pub fn commit<T>(&self, value: T) -> Result<T, ToolError> {
        match self.ensure_current() {
            Ok(()) => Ok(value),
            Err(err) => {
                log::warn!("discarding stale result for ticket {}", self.id);
                Err(err)
            }
        }
    }
}
