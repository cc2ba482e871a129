//! Optimistic update controller for togglable relations.
//!
//! One controller guards one relation: a post's like, a comment's
//! like, a follow. The boolean and its dependent counter flip locally
//! before the service call is issued; a failed call restores the
//! pre-action snapshot. While a call is in flight the relation is
//! `Pending` and further toggles are ignored - no queueing, no
//! cancellation - so at most one mutating call per relation exists at
//! any time.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use ripple_core::error::{ServiceError, ServiceResult};
use ripple_core::models::{Comment, Post, User};

/// Lifecycle of a togglable relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    IdleOff,
    IdleOn,
    Pending,
}

/// What a toggle attempt did.
#[derive(Debug)]
pub enum ToggleOutcome {
    /// The call resolved; the optimistic projection stands.
    Applied { engaged: bool, count: u32 },
    /// A call for this relation was already in flight; nothing changed.
    Ignored,
    /// The call failed; state reverted to the pre-action snapshot. The
    /// error is surfaced for a transient, dismissible notice.
    RolledBack {
        engaged: bool,
        count: u32,
        error: ServiceError,
    },
}

/// Access to the server-side counter a toggle projects onto, for
/// spotting divergence between the projection and the acknowledged
/// record.
pub trait Counted {
    fn counter(&self) -> u32;
}

impl Counted for Post {
    fn counter(&self) -> u32 {
        self.like_count
    }
}

impl Counted for Comment {
    fn counter(&self) -> u32 {
        self.like_count
    }
}

impl Counted for User {
    fn counter(&self) -> u32 {
        self.followers_count
    }
}

struct Inner {
    engaged: bool,
    count: u32,
    pending: bool,
}

/// Cheaply cloneable: clones share the same relation state, so a
/// widget and any concurrent event source race against one guard.
#[derive(Clone)]
pub struct ToggleController {
    inner: Arc<Mutex<Inner>>,
}

impl ToggleController {
    /// Initial state is the last known server truth.
    pub fn new(engaged: bool, count: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                engaged,
                count,
                pending: false,
            })),
        }
    }

    /// Like guard for a freshly loaded post.
    pub fn for_post_likes(post: &Post) -> Self {
        Self::new(false, post.like_count)
    }

    /// Like guard for a freshly loaded comment.
    pub fn for_comment_likes(comment: &Comment) -> Self {
        Self::new(false, comment.like_count)
    }

    /// Follow guard for a freshly loaded profile.
    pub fn for_follow(user: &User) -> Self {
        Self::new(false, user.followers_count)
    }

    pub async fn state(&self) -> ToggleState {
        let inner = self.inner.lock().await;
        if inner.pending {
            ToggleState::Pending
        } else if inner.engaged {
            ToggleState::IdleOn
        } else {
            ToggleState::IdleOff
        }
    }

    /// Current projection as (engaged, count).
    pub async fn snapshot(&self) -> (bool, u32) {
        let inner = self.inner.lock().await;
        (inner.engaged, inner.count)
    }

    /// Flips the relation optimistically, then drives `op` - the
    /// service call matching the new desired state - to resolution.
    ///
    /// `op` receives the desired engagement and must issue the
    /// matching mutation (`true` => engage, `false` => disengage). An
    /// `Ok` keeps the local projection even when the acknowledged
    /// record's counter disagrees; an `Err` rolls everything back.
    pub async fn toggle<F, Fut, T>(&self, op: F) -> ToggleOutcome
    where
        F: FnOnce(bool) -> Fut,
        Fut: Future<Output = ServiceResult<Option<T>>>,
        T: Counted,
    {
        let (snapshot, desired) = {
            let mut inner = self.inner.lock().await;
            if inner.pending {
                debug!("toggle ignored, relation already pending");
                return ToggleOutcome::Ignored;
            }
            let snapshot = (inner.engaged, inner.count);
            inner.engaged = !inner.engaged;
            inner.count = if inner.engaged {
                inner.count + 1
            } else {
                inner.count.saturating_sub(1)
            };
            inner.pending = true;
            (snapshot, inner.engaged)
        };

        match op(desired).await {
            Ok(ack) => {
                let mut inner = self.inner.lock().await;
                inner.pending = false;
                match ack {
                    Some(record) => {
                        let server = record.counter();
                        if server != inner.count {
                            debug!(
                                local = inner.count,
                                server, "keeping optimistic counter over server value"
                            );
                        }
                    }
                    None => debug!("toggle target gone after ack"),
                }
                ToggleOutcome::Applied {
                    engaged: inner.engaged,
                    count: inner.count,
                }
            }
            Err(error) => {
                let mut inner = self.inner.lock().await;
                inner.engaged = snapshot.0;
                inner.count = snapshot.1;
                inner.pending = false;
                warn!(%error, "toggle failed, rolled back");
                ToggleOutcome::RolledBack {
                    engaged: inner.engaged,
                    count: inner.count,
                    error,
                }
            }
        }
    }
}
