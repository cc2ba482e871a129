//! Partial-update types. Each patch enumerates the fields a caller is
//! allowed to change; anything else in an incoming document is
//! rejected at deserialization. Absent fields leave the record as-is.

use serde::Deserialize;

use super::{Comment, MediaType, Post, User};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl UserPatch {
    pub(crate) fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(display_name) = &self.display_name {
            user.display_name = display_name.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = avatar.clone();
        }
        if let Some(bio) = &self.bio {
            user.bio = bio.clone();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostPatch {
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
}

impl PostPatch {
    pub(crate) fn apply(&self, post: &mut Post) {
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(media_url) = &self.media_url {
            post.media_url = Some(media_url.clone());
        }
        if let Some(media_type) = self.media_type {
            post.media_type = Some(media_type);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentPatch {
    pub content: Option<String>,
}

impl CommentPatch {
    pub(crate) fn apply(&self, comment: &mut Comment) {
        if let Some(content) = &self.content {
            comment.content = content.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<UserPatch>(r#"{"followersCount": 9000}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<PostPatch>(r#"{"likeCount": 9000}"#);
        assert!(err.is_err());
    }

    #[test]
    fn absent_fields_leave_record_untouched() {
        let mut user = User {
            id: "1".into(),
            username: "maya_torres".into(),
            display_name: "Maya Torres".into(),
            avatar: "https://example.com/a.png".into(),
            bio: "street photographer".into(),
            followers_count: 12,
            following_count: 3,
            posts_count: 5,
        };

        let patch: UserPatch = serde_json::from_str(r#"{"bio": "analog only"}"#).unwrap();
        patch.apply(&mut user);

        assert_eq!(user.bio, "analog only");
        assert_eq!(user.display_name, "Maya Torres");
        assert_eq!(user.followers_count, 12);
    }
}
