use super::json_content_type;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{header::HeaderMap, Request};

// Common

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_image_url: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub social_ids: Vec<SocialId>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub user_options: Option<UserOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialId {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserOptions {
    #[serde(default)]
    pub editor_layout: String,
    #[serde(default)]
    pub kind_line_break_enabled: bool,
    #[serde(default)]
    pub languages: String,
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct GetMe;

impl Request for GetMe {
    type Data = ();
    type Response = UserResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/me".into()
    }

    fn headers(&self) -> HeaderMap {
        json_content_type()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub data: User,
}
