use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "quail-cli")]
#[command(version, about = "A command-line client for Quail", long_about = None)]
pub struct Cli {
    /// Config file (default is $HOME/.config/quail-cli/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Quail API base URL
    #[arg(long, global = true, env = "QUAIL_API_BASE", default_value = quail_api::DEFAULT_API_BASE)]
    pub api_base: String,

    /// Quail auth base URL
    #[arg(long, global = true, env = "QUAIL_AUTH_BASE", default_value = quail_auth::DEFAULT_AUTH_BASE)]
    pub auth_base: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to Quail in the browser and store the tokens
    Login,

    /// Show the current user
    Me,

    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create a post from a markdown file, or update the one with the same slug
    Upsert {
        /// Markdown file with a front-matter block
        file: PathBuf,

        /// List slug
        #[arg(short, long)]
        list: String,

        /// Publish the post as well
        #[arg(long)]
        publish: bool,
    },

    /// Delete a post
    Delete(PostTarget),

    /// Publish a post
    Publish(PostTarget),

    /// Unpublish a post
    Unpublish(PostTarget),

    /// Send a post to subscribers
    Deliver(PostTarget),
}

#[derive(Args, Debug)]
pub struct PostTarget {
    /// List slug
    #[arg(short, long)]
    pub list: String,

    /// Post slug
    #[arg(short, long)]
    pub post: String,
}
