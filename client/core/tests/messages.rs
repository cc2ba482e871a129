use std::sync::Arc;

use ripple_core::models::input::NewMessage;
use ripple_core::services::{Latency, MessageService};
use ripple_core::session::Session;
use ripple_core::store::MockStore;

fn message_service() -> MessageService {
    let store = Arc::new(MockStore::seeded().expect("seed fixtures parse"));
    MessageService::new(store, Latency::off())
}

#[tokio::test]
async fn conversation_is_bidirectional_and_oldest_first() {
    let messages = message_service();

    let thread = messages.get_conversation("1", "2").await.unwrap();
    let ids: Vec<&str> = thread.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["301", "302", "303", "304"]);

    // Same thread regardless of argument order.
    let mirrored = messages.get_conversation("2", "1").await.unwrap();
    assert_eq!(thread, mirrored);
}

#[tokio::test]
async fn conversation_heads_keep_latest_message_per_counterpart() {
    let messages = message_service();
    let session = Session::new("1");

    let heads = messages.conversation_heads(&session).await.unwrap();
    let ids: Vec<&str> = heads.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["306", "308", "304"]);
}

#[tokio::test]
async fn create_defaults_to_unread_from_the_session_user() {
    let messages = message_service();
    let session = Session::new("1");

    let sent = messages
        .create(
            NewMessage {
                receiver_id: "6".into(),
                content: "Welcome aboard!".into(),
            },
            &session,
        )
        .await
        .unwrap();

    assert_eq!(sent.sender_id, "1");
    assert!(!sent.read);

    let thread = messages.get_conversation("1", "6").await.unwrap();
    assert_eq!(thread.last().unwrap().id, sent.id);
}

#[tokio::test]
async fn mark_conversation_as_read_covers_both_directions_only() {
    let messages = message_service();

    assert!(messages.mark_conversation_as_read("1", "2").await.unwrap());

    let thread = messages.get_conversation("1", "2").await.unwrap();
    assert!(thread.iter().all(|m| m.read));

    // An unrelated conversation is untouched.
    let other = messages.get_by_id("309").await.unwrap().unwrap();
    assert!(!other.read);
}

#[tokio::test]
async fn delete_missing_is_false() {
    let messages = message_service();
    assert!(!messages.delete("999999").await.unwrap());
}
