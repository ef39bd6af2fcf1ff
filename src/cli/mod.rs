//! CLI plumbing for the conflict-labeler binary

pub mod context;
pub mod inputs;
pub mod run;
pub mod style;

use anstream::println;
use async_trait::async_trait;
use conflict_labeler::progress::ProgressCallback;
use style::{Stylize, arrow};

/// Progress callback that prints one styled line per message
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{} {}", arrow(), message.muted());
    }
}
