/// Notification service - per-recipient feed and read state
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::ServiceResult;
use crate::models::input::NewNotification;
use crate::models::Notification;
use crate::store::MockStore;

use super::Latency;

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<MockStore>,
    latency: Latency,
}

impl NotificationService {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Notification>> {
        self.latency.simulate(300).await;
        let mut all = self.store.notifications.read().await.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Notification>> {
        self.latency.simulate(200).await;
        let notifications = self.store.notifications.read().await;
        Ok(notifications.iter().find(|n| n.id == id).cloned())
    }

    pub async fn get_by_user_id(&self, user_id: &str) -> ServiceResult<Vec<Notification>> {
        self.latency.simulate(300).await;
        let notifications = self.store.notifications.read().await;
        let mut inbox: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        inbox.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inbox)
    }

    pub async fn unread_count(&self, user_id: &str) -> ServiceResult<usize> {
        self.latency.simulate(200).await;
        let notifications = self.store.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count())
    }

    pub async fn create(&self, new: NewNotification) -> ServiceResult<Notification> {
        self.latency.simulate(250).await;
        let notification = Notification {
            id: self.store.allocate_id(),
            user_id: new.user_id,
            actor_id: new.actor_id,
            kind: new.kind,
            entity_id: new.entity_id,
            read: false,
            created_at: Utc::now(),
        };
        debug!(
            notification_id = %notification.id,
            kind = notification.kind.as_str(),
            "notification created"
        );
        self.store
            .notifications
            .write()
            .await
            .insert(0, notification.clone());
        Ok(notification)
    }

    pub async fn mark_as_read(&self, id: &str) -> ServiceResult<Option<Notification>> {
        self.latency.simulate(200).await;
        let mut notifications = self.store.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                Ok(Some(notification.clone()))
            }
            None => Ok(None),
        }
    }

    pub async fn mark_all_as_read(&self, user_id: &str) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut notifications = self.store.notifications.write().await;
        for notification in notifications.iter_mut() {
            if notification.user_id == user_id {
                notification.read = true;
            }
        }
        Ok(true)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut notifications = self.store.notifications.write().await;
        match notifications.iter().position(|n| n.id == id) {
            Some(idx) => {
                notifications.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
