pub mod cli;
pub mod commands;
pub mod frontmatter;
pub mod logging;
pub mod output;
pub mod payload;
pub mod settings;
pub mod token;

pub use cli::Cli;
