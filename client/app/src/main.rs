use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};
use validator::Validate;

use ripple_core::config::Config;
use ripple_core::models::input::{NewComment, NewNotification, NewPost};
use ripple_core::models::NotificationKind;
use ripple_core::services::{
    CommentService, Latency, MessageService, NotificationService, PostService, UserService,
};
use ripple_core::session::Session;
use ripple_core::store::MockStore;
use ripple_platform::{Clipboard, ClipboardError, ShareDispatcher, ShareOutcome, ShareRequest};
use ripple_sync::{SearchAggregator, SearchBox, ToggleController, ToggleOutcome};

/// Stand-in clipboard for the terminal demo; a real embedder injects
/// the host binding instead.
struct LogClipboard;

#[async_trait]
impl Clipboard for LogClipboard {
    fn is_available(&self) -> bool {
        true
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        info!(%text, "copied to clipboard");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let session = Session::new(config.session.user_id.clone());

    let store = Arc::new(MockStore::seeded()?);
    let latency = Latency::from_config(&config.latency);

    let users = UserService::new(Arc::clone(&store), latency.clone());
    let posts = PostService::new(Arc::clone(&store), latency.clone());
    let comments = CommentService::new(Arc::clone(&store), latency.clone());
    let messages = MessageService::new(Arc::clone(&store), latency.clone());
    let notifications = NotificationService::new(Arc::clone(&store), latency);

    let me = users
        .current(&session)
        .await?
        .context("session user is not in the store")?;
    info!(username = %me.username, "signed in");

    // Home feed.
    let feed = posts.get_all().await?;
    info!(count = feed.len(), "feed loaded");
    for post in feed.iter().take(3) {
        info!(id = %post.id, likes = post.like_count, comments = post.comment_count, "{}", post.content);
    }
    let top = feed.first().context("feed is empty")?;

    // Optimistic like on the top post.
    let like = ToggleController::for_post_likes(top);
    let outcome = like
        .toggle(|desired| {
            let posts = posts.clone();
            let id = top.id.clone();
            async move {
                if desired {
                    posts.like_post(&id).await
                } else {
                    posts.unlike_post(&id).await
                }
            }
        })
        .await;
    match outcome {
        ToggleOutcome::Applied { count, .. } => info!(likes = count, "post liked"),
        ToggleOutcome::Ignored => info!("like already in flight"),
        ToggleOutcome::RolledBack { error, .. } => warn!(%error, "like failed"),
    }

    // Follow the author, unless it is us.
    if top.user_id != me.id {
        if let Some(author) = users.get_by_id(&top.user_id).await? {
            let follow = ToggleController::for_follow(&author);
            let outcome = follow
                .toggle(|desired| {
                    let users = users.clone();
                    let session = session.clone();
                    let id = author.id.clone();
                    async move {
                        if desired {
                            users.follow_user(&session, &id).await
                        } else {
                            users.unfollow_user(&session, &id).await
                        }
                    }
                })
                .await;
            if let ToggleOutcome::Applied { count, .. } = outcome {
                info!(username = %author.username, followers = count, "now following");
            }
        }
    }

    // Compose: validate, publish, comment on the top post, and keep
    // the parent counter and the author's notifications in step.
    let draft = NewPost {
        content: "Trying out the new client core. #ripple".into(),
        media_url: None,
        media_type: None,
    };
    draft.validate()?;
    let published = posts.create(draft, &session).await?;
    info!(id = %published.id, "post published");

    let reply = NewComment {
        post_id: top.id.clone(),
        content: "Love this one.".into(),
    };
    reply.validate()?;
    comments.create(reply, &session).await?;
    posts.increment_comment_count(&top.id).await?;
    notifications
        .create(NewNotification {
            user_id: top.user_id.clone(),
            actor_id: me.id.clone(),
            kind: NotificationKind::Comment,
            entity_id: top.id.clone(),
        })
        .await?;

    // Debounced search: the second keystroke supersedes the first.
    let aggregator = SearchAggregator::new(users.clone(), posts.clone());
    let (search_box, mut results) = SearchBox::spawn(
        aggregator,
        Duration::from_millis(config.search.debounce_ms),
    );
    search_box.input("pho");
    search_box.input("photography");
    if let Some(found) = results.recv().await {
        let found = found?;
        info!(
            users = found.users.len(),
            posts = found.posts.len(),
            "search results for \"photography\""
        );
    }

    // Inbox and notifications.
    let heads = messages.conversation_heads(&session).await?;
    info!(conversations = heads.len(), "inbox loaded");

    let unread = notifications.unread_count(&me.id).await?;
    info!(unread, "unread notifications");

    // Share the top post; no native sheet in a terminal, so the
    // clipboard tier takes it.
    let dispatcher = ShareDispatcher::new().with_clipboard(Arc::new(LogClipboard));
    let shared = dispatcher
        .share(&ShareRequest {
            title: format!("{}'s post", me.display_name),
            text: top.content.clone(),
            url: format!("https://ripple.app/post/{}", top.id),
        })
        .await;
    if shared == ShareOutcome::ManualCopyRequired {
        warn!("no share capability available, copy the link manually");
    }

    Ok(())
}
