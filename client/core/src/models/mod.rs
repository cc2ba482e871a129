pub mod input;
pub mod patch;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile. Follower/following counters move with the
/// follow/unfollow operations; both saturate at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub bio: String,
    pub followers_count: u32,
    pub following_count: u32,
    pub posts_count: u32,
}

/// Post entity - rich-text content with optional attached media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    pub like_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Engagement score used by the trending feed
    pub fn engagement(&self) -> u32 {
        self.like_count + self.comment_count
    }
}

/// Comment entity - attached to a post. Deleting one does not touch
/// the parent post's comment counter; that linkage is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub like_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Direct message between two users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification delivered to a recipient about an actor's action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub actor_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub entity_id: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Media attachment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Notification type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Actor liked a post or comment
    Like,
    /// Actor commented on a post
    Comment,
    /// Actor started following the recipient
    Follow,
    /// Actor sent a direct message
    Message,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
            NotificationKind::Message => "message",
        }
    }
}
