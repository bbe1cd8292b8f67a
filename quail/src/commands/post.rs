use anyhow::{Context as _, Result};
use chrono::Utc;
use quail_api::{endpoints::posts::PostAction, Request};
use std::path::Path;

use super::Context;
use crate::cli::{PostCommand, PostTarget};
use crate::{frontmatter, output, payload};

pub async fn run(ctx: &mut Context, command: PostCommand) -> Result<()> {
    match command {
        PostCommand::Upsert {
            file,
            list,
            publish,
        } => upsert(ctx, &file, &list, publish).await,
        PostCommand::Delete(target) => delete(ctx, target).await,
        PostCommand::Publish(target) => modify(ctx, target, PostAction::Publish).await,
        PostCommand::Unpublish(target) => modify(ctx, target, PostAction::Unpublish).await,
        PostCommand::Deliver(target) => modify(ctx, target, PostAction::Deliver).await,
    }
}

async fn upsert(ctx: &mut Context, file: &Path, list: &str, publish: bool) -> Result<()> {
    let doc = frontmatter::parse_file(file, ctx.settings.frontmatter_mapping())
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    tracing::info!(
        path = %file.display(),
        slug = %doc.front_matter.slug,
        list,
        publish,
        "Upserting post"
    );

    let request = payload::build_post(list, &doc, publish, Utc::now());
    let client = ctx.api_client().await?;
    let response = client.send(request).await?;

    output::print(&response, ctx.format, &mut std::io::stdout())
}

async fn delete(ctx: &mut Context, target: PostTarget) -> Result<()> {
    tracing::info!(list = %target.list, slug = %target.post, "Deleting post");

    let client = ctx.api_client().await?;
    let response = client
        .send(Request::posts().with_list(target.list).delete(target.post))
        .await?;

    output::print(&response, ctx.format, &mut std::io::stdout())
}

async fn modify(ctx: &mut Context, target: PostTarget, action: PostAction) -> Result<()> {
    tracing::info!(list = %target.list, slug = %target.post, %action, "Modifying post");

    let client = ctx.api_client().await?;
    let response = client
        .send(Request::posts().with_list(target.list).modify(target.post, action))
        .await?;

    output::print(&response, ctx.format, &mut std::io::stdout())
}
