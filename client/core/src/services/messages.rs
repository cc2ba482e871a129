/// Message service - direct messages and conversation views
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::ServiceResult;
use crate::models::input::NewMessage;
use crate::models::Message;
use crate::session::Session;
use crate::store::MockStore;

use super::Latency;

#[derive(Clone)]
pub struct MessageService {
    store: Arc<MockStore>,
    latency: Latency,
}

impl MessageService {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Message>> {
        self.latency.simulate(300).await;
        let messages = self.store.messages.read().await;
        Ok(messages.clone())
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Message>> {
        self.latency.simulate(200).await;
        let messages = self.store.messages.read().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    /// Everything exchanged between the two users, oldest first.
    pub async fn get_conversation(&self, user_a: &str, user_b: &str) -> ServiceResult<Vec<Message>> {
        self.latency.simulate(300).await;
        let messages = self.store.messages.read().await;
        let mut thread: Vec<Message> = messages
            .iter()
            .filter(|m| Self::is_between(m, user_a, user_b))
            .cloned()
            .collect();
        thread.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(thread)
    }

    /// Latest message per counterpart for the session user's inbox
    /// list, newest conversation first.
    pub async fn conversation_heads(&self, session: &Session) -> ServiceResult<Vec<Message>> {
        self.latency.simulate(300).await;
        let me = session.user_id();
        let messages = self.store.messages.read().await;
        let mut heads: HashMap<String, Message> = HashMap::new();
        for message in messages.iter() {
            let other = if message.sender_id == me {
                &message.receiver_id
            } else if message.receiver_id == me {
                &message.sender_id
            } else {
                continue;
            };
            match heads.get(other) {
                Some(head) if head.created_at >= message.created_at => {}
                _ => {
                    heads.insert(other.clone(), message.clone());
                }
            }
        }
        let mut list: Vec<Message> = heads.into_values().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    pub async fn create(&self, new: NewMessage, session: &Session) -> ServiceResult<Message> {
        self.latency.simulate(200).await;
        let message = Message {
            id: self.store.allocate_id(),
            sender_id: session.user_id().to_string(),
            receiver_id: new.receiver_id,
            content: new.content,
            read: false,
            created_at: Utc::now(),
        };
        debug!(message_id = %message.id, receiver = %message.receiver_id, "message sent");
        self.store.messages.write().await.push(message.clone());
        Ok(message)
    }

    pub async fn mark_as_read(&self, id: &str) -> ServiceResult<Option<Message>> {
        self.latency.simulate(200).await;
        let mut messages = self.store.messages.write().await;
        match messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.read = true;
                Ok(Some(message.clone()))
            }
            None => Ok(None),
        }
    }

    /// Marks both directions of the conversation read.
    pub async fn mark_conversation_as_read(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut messages = self.store.messages.write().await;
        for message in messages.iter_mut() {
            if Self::is_between(message, user_a, user_b) {
                message.read = true;
            }
        }
        Ok(true)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        self.latency.simulate(300).await;
        let mut messages = self.store.messages.write().await;
        match messages.iter().position(|m| m.id == id) {
            Some(idx) => {
                messages.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_between(message: &Message, user_a: &str, user_b: &str) -> bool {
        (message.sender_id == user_a && message.receiver_id == user_b)
            || (message.sender_id == user_b && message.receiver_id == user_a)
    }
}
