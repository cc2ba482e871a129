/// Post service - feed reads, composition, like counters, search
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::ServiceResult;
use crate::models::input::NewPost;
use crate::models::patch::PostPatch;
use crate::models::Post;
use crate::session::Session;
use crate::store::MockStore;

use super::Latency;

const TRENDING_CAP: usize = 20;
const SEARCH_CAP: usize = 20;

#[derive(Clone)]
pub struct PostService {
    store: Arc<MockStore>,
    latency: Latency,
}

impl PostService {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Full feed, newest first.
    pub async fn get_all(&self) -> ServiceResult<Vec<Post>> {
        self.latency.simulate(400).await;
        let mut posts = self.store.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Post>> {
        self.latency.simulate(200).await;
        let posts = self.store.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    pub async fn get_by_user_id(&self, user_id: &str) -> ServiceResult<Vec<Post>> {
        self.latency.simulate(300).await;
        let posts = self.store.posts.read().await;
        let mut owned: Vec<Post> = posts.iter().filter(|p| p.user_id == user_id).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    /// Top posts by engagement, recomputed on every call - there is no
    /// cached ranking. Ties land in arbitrary relative order.
    pub async fn get_trending(&self) -> ServiceResult<Vec<Post>> {
        self.latency.simulate(350).await;
        let mut posts = self.store.posts.read().await.clone();
        posts.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
        posts.truncate(TRENDING_CAP);
        Ok(posts)
    }

    /// New post owned by the session user: fresh id, zeroed counters,
    /// stamped now.
    pub async fn create(&self, new: NewPost, session: &Session) -> ServiceResult<Post> {
        self.latency.simulate(400).await;
        let post = Post {
            id: self.store.allocate_id(),
            user_id: session.user_id().to_string(),
            content: new.content,
            media_url: new.media_url,
            media_type: new.media_type,
            like_count: 0,
            comment_count: 0,
            created_at: Utc::now(),
        };
        debug!(post_id = %post.id, "post created");
        self.store.posts.write().await.insert(0, post.clone());
        Ok(post)
    }

    pub async fn update(&self, id: &str, patch: PostPatch) -> ServiceResult<Option<Post>> {
        self.latency.simulate(300).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                patch.apply(post);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter().position(|p| p.id == id) {
            Some(idx) => {
                posts.remove(idx);
                debug!(post_id = %id, "post deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn like_post(&self, id: &str) -> ServiceResult<Option<Post>> {
        self.latency.simulate(200).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.like_count += 1;
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    pub async fn unlike_post(&self, id: &str) -> ServiceResult<Option<Post>> {
        self.latency.simulate(200).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.like_count = post.like_count.saturating_sub(1);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    /// Substring match on content, newest first, capped at 20. A blank
    /// query resolves empty without a simulated round trip.
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Post>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        self.latency.simulate(300).await;
        let posts = self.store.posts.read().await;
        let mut hits: Vec<Post> = posts
            .iter()
            .filter(|p| p.content.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits.truncate(SEARCH_CAP);
        Ok(hits)
    }

    /// Comment-count linkage is a caller responsibility: the comment
    /// service never reaches back into posts.
    pub async fn increment_comment_count(&self, id: &str) -> ServiceResult<Option<Post>> {
        self.latency.simulate(200).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.comment_count += 1;
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    pub async fn decrement_comment_count(&self, id: &str) -> ServiceResult<Option<Post>> {
        self.latency.simulate(200).await;
        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.comment_count = post.comment_count.saturating_sub(1);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }
}
