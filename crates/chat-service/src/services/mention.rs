//! Mention service
//!
//! Resolves `<@id>` mentions in message text against the user store.

use std::collections::HashSet;

use chat_core::markup::{extract_mentions, mention_candidates};
use chat_core::Snowflake;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Mention service
pub struct MentionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MentionService<'a> {
    /// Create a new MentionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Users mentioned in `text`, first occurrence order, no duplicates
    ///
    /// Candidates are looked up in one batch before lexing; mentions of
    /// unknown users and mentions inside code stay plain text.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn get_mentions_from_message_content(&self, text: &str) -> ServiceResult<Vec<Snowflake>> {
        let candidates = mention_candidates(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<Snowflake> = self
            .ctx
            .user_repo()
            .find_many(&candidates)
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect();

        let mentions = extract_mentions(text, &known);

        debug!(
            candidates = candidates.len(),
            mentions = mentions.len(),
            "Resolved mentions"
        );

        Ok(mentions)
    }
}
