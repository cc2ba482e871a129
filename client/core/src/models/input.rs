//! Validated composition inputs. Validation runs at the call site,
//! before anything reaches a service; a failed check never issues a
//! simulated network call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use super::{MediaType, NotificationKind};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]{3,20}$").expect("username regex"));

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(min = 1, max = 2000, message = "post content must be 1-2000 characters"))]
    pub content: String,
    #[validate(url(message = "media url must be a valid url"))]
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: String,
    #[validate(length(min = 1, max = 500, message = "comment must be 1-500 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub receiver_id: String,
    #[validate(length(min = 1, max = 1000, message = "message must be 1-1000 characters"))]
    pub content: String,
}

/// Profile-edit form. Converts into a [`super::patch::UserPatch`] once
/// it validates.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEdit {
    #[validate(regex(
        path = *USERNAME_RE,
        message = "username must be 3-20 lowercase letters, digits or underscores"
    ))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 50, message = "display name must be 1-50 characters"))]
    pub display_name: Option<String>,
    #[validate(url(message = "avatar must be a valid url"))]
    pub avatar: Option<String>,
    #[validate(length(max = 160, message = "bio is capped at 160 characters"))]
    pub bio: Option<String>,
}

impl From<ProfileEdit> for super::patch::UserPatch {
    fn from(edit: ProfileEdit) -> Self {
        Self {
            username: edit.username,
            display_name: edit.display_name,
            avatar: edit.avatar,
            bio: edit.bio,
        }
    }
}

/// Notification creation request; no free-form fields, nothing to validate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub actor_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub entity_id: String,
}
