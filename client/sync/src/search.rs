//! Free-text search across the user and post services.
//!
//! The aggregator issues both lookups concurrently and pairs the
//! results; caps and result order belong to the services. The search
//! box layers keystroke debouncing on top: a query fires only after a
//! quiet period, and newer keystrokes supersede unfired ones.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use ripple_core::error::ServiceResult;
use ripple_core::models::{Post, User};
use ripple_core::services::{PostService, UserService};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }
}

#[derive(Clone)]
pub struct SearchAggregator {
    users: UserService,
    posts: PostService,
}

impl SearchAggregator {
    pub fn new(users: UserService, posts: PostService) -> Self {
        Self { users, posts }
    }

    /// Runs both searches concurrently. A blank query resolves empty
    /// without touching either service.
    pub async fn query(&self, raw: &str) -> ServiceResult<SearchResults> {
        let query = raw.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }
        let (users, posts) = tokio::join!(self.users.search_users(query), self.posts.search(query));
        Ok(SearchResults {
            users: users?,
            posts: posts?,
        })
    }
}

/// Debounced front end over a [`SearchAggregator`].
///
/// Feed it keystrokes with [`SearchBox::input`]; results arrive on the
/// receiver returned by [`SearchBox::spawn`], in firing order. A
/// keystroke inside the quiet window replaces the unfired query.
/// Dropping the box cancels whatever has not fired yet.
pub struct SearchBox {
    input_tx: mpsc::UnboundedSender<String>,
}

impl SearchBox {
    pub fn spawn(
        aggregator: SearchAggregator,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ServiceResult<SearchResults>>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                match pending.take() {
                    None => match input_rx.recv().await {
                        Some(query) => pending = Some(query),
                        None => break,
                    },
                    Some(query) => {
                        tokio::select! {
                            next = input_rx.recv() => match next {
                                Some(newer) => {
                                    debug!(superseded = %query, "keystroke within quiet window");
                                    pending = Some(newer);
                                }
                                None => break,
                            },
                            _ = tokio::time::sleep(debounce) => {
                                if results_tx.send(aggregator.query(&query).await).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        });

        (Self { input_tx }, results_rx)
    }

    /// Records a keystroke. Never blocks; the debounce task picks it up.
    pub fn input(&self, query: impl Into<String>) {
        let _ = self.input_tx.send(query.into());
    }
}
