use anyhow::Result;

use super::Context;

pub async fn run(ctx: &mut Context) -> Result<()> {
    let client = ctx.oauth_client()?;

    let tokens = client
        .login(|url| {
            println!("Open this URL in your browser to log in:\n\n    {}\n", url);
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(error = %e, "Could not open browser");
            }
        })
        .await?;

    ctx.settings.app = tokens;
    ctx.settings.save(&ctx.config_path)?;

    tracing::info!(path = %ctx.config_path.display(), "Login successful");
    println!(
        "Login successful. Access token saved to {}",
        ctx.config_path.display()
    );
    Ok(())
}
