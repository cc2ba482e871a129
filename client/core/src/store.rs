//! In-memory backing store for the mock services.
//!
//! One explicitly constructed repository object shared by reference;
//! there is no ambient singleton. Services mutate the vectors in place
//! under the per-entity lock; everything returned across the store
//! boundary is a defensive copy.

use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{Comment, Message, Notification, Post, User};

const USERS_SEED: &str = include_str!("../fixtures/users.json");
const POSTS_SEED: &str = include_str!("../fixtures/posts.json");
const COMMENTS_SEED: &str = include_str!("../fixtures/comments.json");
const MESSAGES_SEED: &str = include_str!("../fixtures/messages.json");
const NOTIFICATIONS_SEED: &str = include_str!("../fixtures/notifications.json");

pub struct MockStore {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) posts: RwLock<Vec<Post>>,
    pub(crate) comments: RwLock<Vec<Comment>>,
    pub(crate) messages: RwLock<Vec<Message>>,
    pub(crate) notifications: RwLock<Vec<Notification>>,
    next_id: AtomicI64,
}

struct Seed {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    messages: Vec<Message>,
    notifications: Vec<Notification>,
}

impl Seed {
    fn load() -> Result<Self> {
        Ok(Self {
            users: serde_json::from_str(USERS_SEED).context("users fixture")?,
            posts: serde_json::from_str(POSTS_SEED).context("posts fixture")?,
            comments: serde_json::from_str(COMMENTS_SEED).context("comments fixture")?,
            messages: serde_json::from_str(MESSAGES_SEED).context("messages fixture")?,
            notifications: serde_json::from_str(NOTIFICATIONS_SEED)
                .context("notifications fixture")?,
        })
    }
}

impl MockStore {
    /// Store loaded from the embedded seed fixtures.
    pub fn seeded() -> Result<Self> {
        let seed = Seed::load()?;
        info!(
            users = seed.users.len(),
            posts = seed.posts.len(),
            comments = seed.comments.len(),
            messages = seed.messages.len(),
            notifications = seed.notifications.len(),
            "seeded mock store"
        );
        Ok(Self {
            users: RwLock::new(seed.users),
            posts: RwLock::new(seed.posts),
            comments: RwLock::new(seed.comments),
            messages: RwLock::new(seed.messages),
            notifications: RwLock::new(seed.notifications),
            next_id: AtomicI64::new(0),
        })
    }

    /// Store with no rows at all.
    pub fn empty() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
            comments: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
            notifications: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(0),
        }
    }

    /// Discard every row and re-apply the seed fixtures.
    pub async fn reset(&self) -> Result<()> {
        let seed = Seed::load()?;
        *self.users.write().await = seed.users;
        *self.posts.write().await = seed.posts;
        *self.comments.write().await = seed.comments;
        *self.messages.write().await = seed.messages;
        *self.notifications.write().await = seed.notifications;
        Ok(())
    }

    /// Next opaque entity id.
    ///
    /// Derived from the current epoch milliseconds but strictly
    /// increasing, so same-millisecond creates still get distinct ids
    /// and an id is never handed out twice. Seed ids are small decimal
    /// strings, far below any millisecond timestamp.
    pub(crate) fn allocate_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        loop {
            let prev = self.next_id.load(Ordering::Relaxed);
            if candidate <= prev {
                candidate = prev + 1;
            }
            if self
                .next_id
                .compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return candidate.to_string();
            }
        }
    }
}
