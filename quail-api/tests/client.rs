use quail_api::endpoints::posts::PostAction;
use quail_api::{Client, QuailApiError, Request};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_body(slug: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": 42,
            "slug": slug,
            "title": "Hello",
            "tags": "a,b",
            "published_at": "2024-01-02T10:00:00Z",
            "first_published_at": "2024-01-02T10:00:00Z"
        }
    })
}

#[tokio::test]
async fn get_me_sends_bearer_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer token-1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 1,
                "name": "Lyric",
                "email": "lyric@example.com",
                "social_ids": [{"name": "github", "value": "lyric"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "token-1");
    let me = client.send(Request::users().me()).await.unwrap();

    assert_eq!(me.data.id, 1);
    assert_eq!(me.data.name, "Lyric");
    assert_eq!(me.data.social_ids[0].value, "lyric");
}

#[tokio::test]
async fn upsert_posts_payload_to_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lists/my-list/posts"))
        .and(header("Authorization", "Bearer t"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "slug": "hello",
            "cover_image_url": "",
            "title": "Hello",
            "summary": "",
            "content": "Body\n",
            "tags": "a,b",
            "theme": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "t");
    let req = Request::posts()
        .with_list("my-list")
        .upsert()
        .slug("hello")
        .title("Hello")
        .content("Body\n")
        .tags("a,b");

    let post = client.send(req).await.unwrap();
    assert_eq!(post.data.id, 42);
    assert_eq!(post.data.tags, "a,b");
}

#[tokio::test]
async fn delete_and_state_changes_hit_post_paths() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/lists/l/posts/p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("p")))
        .expect(1)
        .mount(&server)
        .await;
    for action in ["publish", "unpublish", "deliver"] {
        Mock::given(method("PUT"))
            .and(path(format!("/lists/l/posts/p/{}", action)))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_body("p")))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = Client::new(&server.uri(), "t");
    let posts = Request::posts().with_list("l");

    client.send(posts.delete("p")).await.unwrap();
    for action in [PostAction::Publish, PostAction::Unpublish, PostAction::Deliver] {
        let post = client.send(posts.modify("p", action)).await.unwrap();
        assert_eq!(post.data.slug, "p");
    }
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/l/posts/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"code": 10404, "msg": "not found"})),
        )
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "t");
    let err = client
        .send(Request::posts().with_list("l").get("missing"))
        .await
        .unwrap_err();

    match err {
        QuailApiError::Quail(status, detail) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(detail.code, Some(10404));
            assert_eq!(detail.message, "not found");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "t");
    let err = client.send(Request::users().me()).await.unwrap_err();
    assert!(matches!(err, QuailApiError::Decode(_)));
}
