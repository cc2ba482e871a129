/// User service - profiles, follow graph counters, people search
use std::sync::Arc;

use crate::error::ServiceResult;
use crate::models::patch::UserPatch;
use crate::models::User;
use crate::session::Session;
use crate::store::MockStore;

use super::Latency;

const SEARCH_CAP: usize = 10;

#[derive(Clone)]
pub struct UserService {
    store: Arc<MockStore>,
    latency: Latency,
}

impl UserService {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<User>> {
        self.latency.simulate(300).await;
        let users = self.store.users.read().await;
        Ok(users.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<User>> {
        self.latency.simulate(200).await;
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    pub async fn get_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        self.latency.simulate(200).await;
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    /// Profile of the signed-in user.
    pub async fn current(&self, session: &Session) -> ServiceResult<Option<User>> {
        self.latency.simulate(100).await;
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == session.user_id()).cloned())
    }

    /// Bumps the target's follower counter and the session user's
    /// following counter. Returns the updated target, or `None` when
    /// the target id is unknown.
    pub async fn follow_user(
        &self,
        session: &Session,
        user_id: &str,
    ) -> ServiceResult<Option<User>> {
        self.latency.simulate(300).await;
        let mut users = self.store.users.write().await;
        let Some(target_idx) = users.iter().position(|u| u.id == user_id) else {
            return Ok(None);
        };
        users[target_idx].followers_count += 1;
        if let Some(me) = users.iter_mut().find(|u| u.id == session.user_id()) {
            me.following_count += 1;
        }
        Ok(Some(users[target_idx].clone()))
    }

    pub async fn unfollow_user(
        &self,
        session: &Session,
        user_id: &str,
    ) -> ServiceResult<Option<User>> {
        self.latency.simulate(300).await;
        let mut users = self.store.users.write().await;
        let Some(target_idx) = users.iter().position(|u| u.id == user_id) else {
            return Ok(None);
        };
        users[target_idx].followers_count = users[target_idx].followers_count.saturating_sub(1);
        if let Some(me) = users.iter_mut().find(|u| u.id == session.user_id()) {
            me.following_count = me.following_count.saturating_sub(1);
        }
        Ok(Some(users[target_idx].clone()))
    }

    /// Case-insensitive substring match over username and display
    /// name, capped at 10. A blank query resolves empty without a
    /// simulated round trip.
    pub async fn search_users(&self, query: &str) -> ServiceResult<Vec<User>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        self.latency.simulate(200).await;
        let users = self.store.users.read().await;
        Ok(users
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .take(SEARCH_CAP)
            .cloned()
            .collect())
    }

    pub async fn update(&self, id: &str, patch: UserPatch) -> ServiceResult<Option<User>> {
        self.latency.simulate(300).await;
        let mut users = self.store.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                patch.apply(user);
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}
