use super::json_content_type;
use crate::macros::setter;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;
use tower_api_client::{header::HeaderMap, Method, Request, RequestData};

// Common

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub paid_content: String,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub list_id: u64,
    /// Comma-joined tag list
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub first_published_at: Option<DateTime<FixedOffset>>,
}

/// State transitions exposed as `PUT /lists/{list}/posts/{slug}/{action}`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostAction {
    Publish,
    Unpublish,
    Deliver,
}

impl Display for PostAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Publish => f.write_str("publish"),
            Self::Unpublish => f.write_str("unpublish"),
            Self::Deliver => f.write_str("deliver"),
        }
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetPost {
    list: String,
    slug: String,
}

impl GetPost {
    pub fn new(list: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            slug: slug.into(),
        }
    }
}

impl Request for GetPost {
    type Data = ();
    type Response = PostResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lists/{}/posts/{}", self.list, self.slug).into()
    }

    fn headers(&self) -> HeaderMap {
        json_content_type()
    }
}

/// Create a post, or update the existing post with the same slug.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePost {
    #[serde(skip)]
    list: String,
    slug: String,
    cover_image_url: String,
    title: String,
    summary: String,
    content: String,
    tags: String,
    theme: String,
    /// Only sent when publishing
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime: Option<DateTime<FixedOffset>>,
    /// Omitted so the server keeps the value it already has
    #[serde(skip_serializing_if = "Option::is_none")]
    first_published_at: Option<DateTime<FixedOffset>>,
}

impl CreatePost {
    pub fn new(list: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            ..Self::default()
        }
    }

    setter!(slug: String);
    setter!(cover_image_url: String);
    setter!(title: String);
    setter!(summary: String);
    setter!(content: String);
    setter!(tags: String);
    setter!(theme: String);
    setter!(opt datetime: DateTime<FixedOffset>);
    setter!(opt first_published_at: DateTime<FixedOffset>);
}

impl Request for CreatePost {
    type Data = Self;
    type Response = PostResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lists/{}/posts", self.list).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeletePost {
    list: String,
    slug: String,
}

impl DeletePost {
    pub fn new(list: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            slug: slug.into(),
        }
    }
}

impl Request for DeletePost {
    type Data = ();
    type Response = PostResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lists/{}/posts/{}", self.list, self.slug).into()
    }

    fn headers(&self) -> HeaderMap {
        json_content_type()
    }
}

#[derive(Debug, Clone)]
pub struct ModPost {
    list: String,
    slug: String,
    action: PostAction,
}

impl ModPost {
    pub fn new(list: impl Into<String>, slug: impl Into<String>, action: PostAction) -> Self {
        Self {
            list: list.into(),
            slug: slug.into(),
            action,
        }
    }
}

impl Request for ModPost {
    type Data = ();
    type Response = PostResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lists/{}/posts/{}/{}", self.list, self.slug, self.action).into()
    }

    fn headers(&self) -> HeaderMap {
        json_content_type()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub data: Post,
}
