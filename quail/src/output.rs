use std::io::{self, Write};

use clap::ValueEnum;
use quail_api::endpoints::{posts::PostResponse, users::UserResponse};
use serde::Serialize;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value listing
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Things that know how to lay themselves out for a terminal
pub trait Render: Serialize {
    fn render_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

pub fn print<T: Render>(value: &T, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => value.render_human(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_fields(out: &mut dyn Write, title: &str, fields: &[(&str, String)]) -> io::Result<()> {
    writeln!(out, "{}:", title)?;
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        writeln!(out, "{:<width$} {}", format!("{}:", label), value, width = width + 1)?;
    }
    Ok(())
}

fn or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Render for UserResponse {
    fn render_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let user = &self.data;
        write_fields(
            out,
            "User",
            &[
                ("ID", user.id.to_string()),
                ("Name", user.name.clone()),
                ("Email", user.email.clone()),
                ("Avatar Image URL", user.avatar_image_url.clone()),
                ("Bio", user.bio.clone()),
                ("Tagline", user.tagline.clone()),
                ("Created At", user.created_at.clone()),
            ],
        )?;

        if !user.social_ids.is_empty() {
            writeln!(out, "Social IDs:")?;
            for social in &user.social_ids {
                writeln!(out, "  {}: {}", social.name, social.value)?;
            }
        }
        Ok(())
    }
}

impl Render for PostResponse {
    fn render_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let post = &self.data;
        write_fields(
            out,
            "Post",
            &[
                ("ID", post.id.to_string()),
                ("Slug", post.slug.clone()),
                ("Cover Image URL", post.cover_image_url.clone()),
                ("Title", post.title.clone()),
                ("Summary", post.summary.clone()),
                ("Published At", or_empty(post.published_at)),
                ("First Published At", or_empty(post.first_published_at)),
                ("Tags", post.tags.clone()),
                ("Theme", post.theme.clone()),
            ],
        )
    }
}
