use std::sync::Arc;

use ripple_core::models::input::{NewComment, NewPost};
use ripple_core::services::{CommentService, Latency, PostService};
use ripple_core::session::Session;
use ripple_core::store::MockStore;

fn seeded_store() -> Arc<MockStore> {
    Arc::new(MockStore::seeded().expect("seed fixtures parse"))
}

fn post_service(store: &Arc<MockStore>) -> PostService {
    PostService::new(Arc::clone(store), Latency::off())
}

#[tokio::test]
async fn like_then_unlike_returns_counter_to_baseline() {
    let store = seeded_store();
    let posts = post_service(&store);

    let before = posts.get_by_id("101").await.unwrap().unwrap();
    assert_eq!(before.like_count, 3);

    let liked = posts.like_post("101").await.unwrap().unwrap();
    assert_eq!(liked.like_count, 4);

    let unliked = posts.unlike_post("101").await.unwrap().unwrap();
    assert_eq!(unliked.like_count, 3);
}

#[tokio::test]
async fn unlike_saturates_at_zero() {
    let store = seeded_store();
    let posts = post_service(&store);
    let session = Session::new("1");

    let fresh = posts
        .create(
            NewPost {
                content: "brand new, nobody liked this yet".into(),
                media_url: None,
                media_type: None,
            },
            &session,
        )
        .await
        .unwrap();

    let unliked = posts.unlike_post(&fresh.id).await.unwrap().unwrap();
    assert_eq!(unliked.like_count, 0);
}

#[tokio::test]
async fn trending_is_descending_by_engagement() {
    let store = seeded_store();
    let posts = post_service(&store);

    let trending = posts.get_trending().await.unwrap();
    assert!(!trending.is_empty());
    assert_eq!(trending[0].id, "106");
    for pair in trending.windows(2) {
        assert!(pair[0].engagement() >= pair[1].engagement());
    }
}

#[tokio::test]
async fn create_assigns_fresh_id_and_zeroed_counters() {
    let store = seeded_store();
    let posts = post_service(&store);
    let session = Session::new("1");

    let existing: Vec<String> = posts
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    let created = posts
        .create(
            NewPost {
                content: "Testing the new compose flow. #meta".into(),
                media_url: None,
                media_type: None,
            },
            &session,
        )
        .await
        .unwrap();

    assert!(!existing.contains(&created.id));
    assert_eq!(created.like_count, 0);
    assert_eq!(created.comment_count, 0);
    assert_eq!(created.user_id, "1");

    // Stamped now, so it leads the feed.
    let feed = posts.get_all().await.unwrap();
    assert_eq!(feed[0].id, created.id);
}

#[tokio::test]
async fn search_blank_query_is_empty() {
    let store = seeded_store();
    let posts = post_service(&store);

    assert!(posts.search("").await.unwrap().is_empty());
    assert!(posts.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_and_newest_first() {
    let store = seeded_store();
    let posts = post_service(&store);

    let hits = posts.search("PHOTOGRAPHY").await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["102", "106"]);
}

#[tokio::test]
async fn comment_count_linkage_is_driven_by_the_caller() {
    let store = seeded_store();
    let posts = post_service(&store);
    let comments = CommentService::new(Arc::clone(&store), Latency::off());
    let session = Session::new("1");

    let baseline = posts.get_by_id("103").await.unwrap().unwrap().comment_count;

    let comment = comments
        .create(
            NewComment {
                post_id: "103".into(),
                content: "Strong pace for week 9.".into(),
            },
            &session,
        )
        .await
        .unwrap();
    let bumped = posts.increment_comment_count("103").await.unwrap().unwrap();
    assert_eq!(bumped.comment_count, baseline + 1);

    assert!(comments.delete(&comment.id).await.unwrap());
    let restored = posts.decrement_comment_count("103").await.unwrap().unwrap();
    assert_eq!(restored.comment_count, baseline);
}

#[tokio::test]
async fn missing_ids_are_negative_results_not_errors() {
    let store = seeded_store();
    let posts = post_service(&store);

    assert!(posts.get_by_id("999999").await.unwrap().is_none());
    assert!(posts.like_post("999999").await.unwrap().is_none());
    assert!(!posts.delete("999999").await.unwrap());
    assert!(posts
        .update("999999", Default::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test(start_paused = true)]
async fn reads_are_never_instantaneous_with_latency_on() {
    let store = seeded_store();
    let posts = PostService::new(store, Latency::default());

    let started = tokio::time::Instant::now();
    posts.get_by_id("101").await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_millis(200));
}
