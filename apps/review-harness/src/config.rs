//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use shared_types::Actor;

#[derive(Parser, Debug, Clone)]
#[command(name = "review-harness")]
#[command(version, about = "Run a design-review session against a page snapshot")]
pub struct Args {
    /// Page snapshot (JSON page tree)
    #[arg(long, env = "REVIEW_DOCUMENT")]
    pub document: PathBuf,

    /// Plugin data file; created on first write
    #[arg(long, env = "REVIEW_STORE")]
    pub store: PathBuf,

    /// Name of the acting user. Omit to act as an unidentified user.
    #[arg(long, env = "REVIEW_USER")]
    pub user: Option<String>,

    /// Avatar URL of the acting user
    #[arg(long, env = "REVIEW_PHOTO")]
    pub photo: Option<String>,
}

impl Args {
    /// The acting user, if a non-empty name was given
    pub fn actor(&self) -> Option<Actor> {
        self.user
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| Actor::new(name, self.photo.clone()))
    }
}
