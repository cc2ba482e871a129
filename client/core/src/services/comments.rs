/// Comment service - per-post threads and comment like counters
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::ServiceResult;
use crate::models::input::NewComment;
use crate::models::patch::CommentPatch;
use crate::models::Comment;
use crate::session::Session;
use crate::store::MockStore;

use super::Latency;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<MockStore>,
    latency: Latency,
}

impl CommentService {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Comment>> {
        self.latency.simulate(300).await;
        let comments = self.store.comments.read().await;
        Ok(comments.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Comment>> {
        self.latency.simulate(200).await;
        let comments = self.store.comments.read().await;
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    pub async fn get_by_post_id(&self, post_id: &str) -> ServiceResult<Vec<Comment>> {
        self.latency.simulate(300).await;
        let comments = self.store.comments.read().await;
        let mut thread: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        thread.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(thread)
    }

    pub async fn create(&self, new: NewComment, session: &Session) -> ServiceResult<Comment> {
        self.latency.simulate(350).await;
        let comment = Comment {
            id: self.store.allocate_id(),
            post_id: new.post_id,
            user_id: session.user_id().to_string(),
            content: new.content,
            like_count: 0,
            created_at: Utc::now(),
        };
        debug!(comment_id = %comment.id, post_id = %comment.post_id, "comment created");
        self.store.comments.write().await.insert(0, comment.clone());
        Ok(comment)
    }

    pub async fn update(&self, id: &str, patch: CommentPatch) -> ServiceResult<Option<Comment>> {
        self.latency.simulate(300).await;
        let mut comments = self.store.comments.write().await;
        match comments.iter_mut().find(|c| c.id == id) {
            Some(comment) => {
                patch.apply(comment);
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }

    /// Removes the comment only. The parent post's counter is the
    /// caller's to decrement.
    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut comments = self.store.comments.write().await;
        match comments.iter().position(|c| c.id == id) {
            Some(idx) => {
                comments.remove(idx);
                debug!(comment_id = %id, "comment deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn like_comment(&self, id: &str) -> ServiceResult<Option<Comment>> {
        self.latency.simulate(200).await;
        let mut comments = self.store.comments.write().await;
        match comments.iter_mut().find(|c| c.id == id) {
            Some(comment) => {
                comment.like_count += 1;
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }

    pub async fn unlike_comment(&self, id: &str) -> ServiceResult<Option<Comment>> {
        self.latency.simulate(200).await;
        let mut comments = self.store.comments.write().await;
        match comments.iter_mut().find(|c| c.id == id) {
            Some(comment) => {
                comment.like_count = comment.like_count.saturating_sub(1);
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }
}
