use chrono::{DateTime, Utc};
use quail_api::{endpoints::posts::CreatePost, Request};

use crate::frontmatter::Document;

/// Build the create-or-update request for a parsed document.
///
/// `first_published_at` follows the document's datetime and is left out when
/// there is none. `datetime` is only sent when publishing, falling back to `now`.
pub fn build_post(list: &str, doc: &Document, publish: bool, now: DateTime<Utc>) -> CreatePost {
    let fm = &doc.front_matter;

    let mut post = Request::posts()
        .with_list(list)
        .upsert()
        .slug(fm.slug.as_str())
        .cover_image_url(fm.cover_image_url.as_str())
        .title(fm.title.as_str())
        .summary(fm.summary.as_str())
        .content(doc.content.as_str())
        .tags(fm.tags.as_str())
        .theme(fm.theme.as_str());

    if let Some(datetime) = fm.datetime {
        post = post.first_published_at(datetime);
    }

    if publish {
        post = post.datetime(fm.datetime.unwrap_or_else(|| now.fixed_offset()));
    }

    post
}
