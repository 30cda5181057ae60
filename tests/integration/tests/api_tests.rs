//! API Integration Tests
//!
//! Each test spawns its own server over the in-memory backend, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use agora_core::{EntityId, PostKind, Role};
use integration_tests::{
    assert_json, assert_status, reactions_path, ErrorBody, ReactionsView, TestServer, TestUser,
};
use reqwest::StatusCode;
use tokio::task::JoinSet;

/// A community post with 3 "like" and 1 "celebrate"; `liker` is one of the likers
async fn seeded_post(server: &TestServer) -> (EntityId, TestUser) {
    let author = TestUser::new(Role::Member);
    let post = server.create_post(author.id, PostKind::Community);

    let liker = TestUser::new(Role::Member);
    server.react(post, &liker, "like").await.unwrap();
    for _ in 0..2 {
        server.react(post, &TestUser::new(Role::Member), "like").await.unwrap();
    }
    server
        .react(post, &TestUser::new(Role::Mentor), "celebrate")
        .await
        .unwrap();

    (post, liker)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api-docs/openapi.json").await.unwrap();
    let doc: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(doc["paths"]["/api/v1/reactions"]["get"].is_object());
}

// ============================================================================
// Reaction Query Tests
// ============================================================================

#[tokio::test]
async fn test_counts_ordered_by_type() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;

    let response = server
        .get_as(&reactions_path(post, Some(0), Some(10)), &liker)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(view.pairs(), vec![("celebrate", 1), ("like", 3)]);
    assert_eq!(view.reactions, vec!["like"]);
}

#[tokio::test]
async fn test_second_page_of_one() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;

    let response = server
        .get_as(&reactions_path(post, Some(1), Some(1)), &liker)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(view.pairs(), vec![("like", 3)]);
    assert_eq!(view.reactions, vec!["like"]);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;

    let response = server
        .get_as(&reactions_path(post, Some(5), Some(20)), &liker)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(view.counts.is_empty());
    assert_eq!(view.reactions, vec!["like"]);
}

#[tokio::test]
async fn test_no_reactions() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);
    let post = server.create_post(member.id, PostKind::Community);

    let response = server
        .get_as(&reactions_path(post, None, None), &member)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(view.counts.is_empty());
    assert!(view.reactions.is_empty());
}

#[tokio::test]
async fn test_visitor_rejected() {
    let server = TestServer::start().await.unwrap();
    let (post, _) = seeded_post(&server).await;

    let response = server.get(&reactions_path(post, None, None)).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();

    assert_eq!(body.error.code, "UNAUTHORIZED");
    assert_eq!(
        body.error.message,
        format!("visitor requester is not authorized for Post {post}")
    );
}

#[tokio::test]
async fn test_member_cannot_see_mentor_news() {
    let server = TestServer::start().await.unwrap();
    let mentor = TestUser::new(Role::Mentor);
    let post = server.create_post(mentor.id, PostKind::MentorNews);

    let member = TestUser::new(Role::Member);
    let response = server
        .get_as(&reactions_path(post, None, None), &member)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let other_mentor = TestUser::new(Role::Mentor);
    let response = server
        .get_as(&reactions_path(post, None, None), &other_mentor)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_access_checked_before_pagination() {
    let server = TestServer::start().await.unwrap();
    let mentor = TestUser::new(Role::Mentor);
    let post = server.create_post(mentor.id, PostKind::MentorNews);

    let member = TestUser::new(Role::Member);
    let response = server
        .get_as(&reactions_path(post, Some(-1), Some(500)), &member)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_access_checked_before_page_parsing() {
    let server = TestServer::start().await.unwrap();
    let mentor = TestUser::new(Role::Mentor);
    let post = server.create_post(mentor.id, PostKind::MentorNews);
    let member = TestUser::new(Role::Member);

    for query in ["&perPage=abc", "&page=x&perPage=5", "&perPage=99999999999999999999"] {
        let path = format!("{}{query}", reactions_path(post, None, None));
        let response = server.get_as(&path, &member).await.unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
        assert_eq!(body.error.code, "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_non_numeric_page_values() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;

    let path = format!("{}&perPage=abc", reactions_path(post, None, None));
    let response = server.get_as(&path, &liker).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert_eq!(body.error.message, "per page must be an integer");

    let path = format!("{}&perPage=99999999999999999999", reactions_path(post, None, None));
    let response = server.get_as(&path, &liker).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "per page must be less than or equal to 20");
}

#[tokio::test]
async fn test_missing_parent_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);

    let response = server
        .get_as(&reactions_path(EntityId::new(987_654), None, Some(99)), &member)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_per_page_bound_message() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;

    let response = server
        .get_as(&reactions_path(post, None, Some(21)), &liker)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "per page must be less than or equal to 20");

    let response = server
        .get_as(&reactions_path(post, None, Some(0)), &liker)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "per page must be greater than or equal to 1");

    let response = server
        .get_as(&reactions_path(post, Some(-1), None), &liker)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "page must be greater than or equal to 0");
}

#[tokio::test]
async fn test_unknown_parent_type() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);

    let response = server
        .get_as("/api/v1/reactions?parent=1&parentType=Comment", &member)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "unknown parent type: Comment");
}

#[tokio::test]
async fn test_missing_query_parameters() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);

    let response = server.get_as("/api/v1/reactions", &member).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = TestServer::start().await.unwrap();
    let (post, _) = seeded_post(&server).await;

    let response = server
        .get_with_authorization(&reactions_path(post, None, None), "Bearer not-a-jwt")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let server = TestServer::start().await.unwrap();
    let (post, _) = seeded_post(&server).await;

    let response = server
        .get_with_authorization(&reactions_path(post, None, None), "Basic dXNlcjpwYXNz")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_AUTHORIZATION_FORMAT");
}

// ============================================================================
// Reaction Write Tests
// ============================================================================

#[tokio::test]
async fn test_add_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);
    let post = server.create_post(member.id, PostKind::Community);

    server.react(post, &member, "support").await.unwrap();
    server.react(post, &member, "support").await.unwrap();

    let response = server
        .get_as(&reactions_path(post, None, None), &member)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view.pairs(), vec![("support", 1)]);
}

#[tokio::test]
async fn test_remove_reaction() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;
    let path = format!("/api/v1/reactions/Post/{post}/like");

    let response = server.delete_as(&path, &liker).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Removing again is a no-op
    let response = server.delete_as(&path, &liker).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_as(&reactions_path(post, None, None), &liker)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view.pairs(), vec![("celebrate", 1), ("like", 2)]);
    assert!(view.reactions.is_empty());
}

#[tokio::test]
async fn test_unknown_reaction_type() {
    let server = TestServer::start().await.unwrap();
    let member = TestUser::new(Role::Member);
    let post = server.create_post(member.id, PostKind::Community);

    let response = server
        .put_as(&format!("/api/v1/reactions/Post/{post}/meh"), &member)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_member_cannot_react_to_mentor_news() {
    let server = TestServer::start().await.unwrap();
    let mentor = TestUser::new(Role::Mentor);
    let post = server.create_post(mentor.id, PostKind::MentorNews);

    let member = TestUser::new(Role::Member);
    let response = server
        .put_as(&format!("/api/v1/reactions/Post/{post}/like"), &member)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_clear_requires_moderation_rights() {
    let server = TestServer::start().await.unwrap();
    let (post, liker) = seeded_post(&server).await;
    let path = format!("/api/v1/reactions/Post/{post}");

    let response = server.delete_as(&path, &liker).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = TestUser::new(Role::Admin);
    let response = server.delete_as(&path, &admin).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_as(&reactions_path(post, None, None), &liker)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(view.counts.is_empty());
    assert!(view.reactions.is_empty());
}

#[tokio::test]
async fn test_concurrent_reactions_are_counted_once_each() {
    let server = TestServer::start().await.unwrap();
    let author = TestUser::new(Role::Member);
    let post = server.create_post(author.id, PostKind::Community);
    let url = format!("{}/api/v1/reactions/Post/{post}/insightful", server.base_url());

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let token = server.token(&TestUser::new(Role::Member)).unwrap();
        // Each user fires the same reaction twice at once
        for _ in 0..2 {
            let request = server.client.put(&url).bearer_auth(&token);
            tasks.spawn(async move { request.send().await });
        }
    }
    while let Some(joined) = tasks.join_next().await {
        let response = joined.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = server
        .get_as(&reactions_path(post, None, None), &author)
        .await
        .unwrap();
    let view: ReactionsView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view.pairs(), vec![("insightful", 8)]);
}
