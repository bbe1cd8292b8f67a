use anyhow::Result;
use quail_api::Request;

use super::Context;
use crate::output;

pub async fn run(ctx: &mut Context) -> Result<()> {
    let client = ctx.api_client().await?;
    let response = client.send(Request::users().me()).await?;

    output::print(&response, ctx.format, &mut std::io::stdout())
}
