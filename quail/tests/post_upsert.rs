use chrono::Utc;
use quail::frontmatter::{parse_file, FieldMapping};
use quail::payload::build_post;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENT: &str = "---
slug: hello
title: Hello
date: 2024-01-02 10:30
tags:
  - rust
  - cli
---
# Hello

Body
";

fn date_mapping() -> FieldMapping {
    FieldMapping::from([("datetime".to_string(), "date".to_string())])
}

#[tokio::test]
async fn test_markdown_file_is_published() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lists/blog/posts"))
        .and(header("authorization", "Bearer access"))
        .and(body_json(json!({
            "slug": "hello",
            "cover_image_url": "",
            "title": "Hello",
            "summary": "",
            "content": "# Hello\n\nBody\n",
            "tags": "rust,cli",
            "theme": "",
            "datetime": "2024-01-02T10:30:00+00:00",
            "first_published_at": "2024-01-02T10:30:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 42,
                "slug": "hello",
                "title": "Hello",
                "tags": "rust,cli",
                "first_published_at": "2024-01-02T10:30:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("hello.md");
    fs::write(&file, DOCUMENT).unwrap();

    let doc = parse_file(&file, &date_mapping()).unwrap();
    let request = build_post("blog", &doc, true, Utc::now());

    let client = quail_api::Client::new(&server.uri(), "access");
    let response = client.send(request).await.unwrap();

    assert_eq!(response.data.id, 42);
    assert_eq!(response.data.slug, "hello");
}

#[tokio::test]
async fn test_draft_upsert_omits_datetime() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lists/blog/posts"))
        .and(body_json(json!({
            "slug": "hello",
            "cover_image_url": "",
            "title": "Hello",
            "summary": "",
            "content": "# Hello\n\nBody\n",
            "tags": "rust,cli",
            "theme": "",
            "first_published_at": "2024-01-02T10:30:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 42, "slug": "hello" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("hello.md");
    fs::write(&file, DOCUMENT).unwrap();

    let doc = parse_file(&file, &date_mapping()).unwrap();
    let request = build_post("blog", &doc, false, Utc::now());

    let client = quail_api::Client::new(&server.uri(), "access");
    client.send(request).await.unwrap();
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = parse_file(&dir.path().join("missing.md"), &FieldMapping::new()).unwrap_err();

    assert!(matches!(err, quail::frontmatter::ParseError::Io(_)));
}
