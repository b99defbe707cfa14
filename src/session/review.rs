//! Review session

use super::log::{ConversationEntry, ConversationLog};
use crate::claims::{ClaimSet, ClaimSummary};
use crate::config::{AuditConfig, ClaimsConfig};
use crate::denial::{ClaimAnnotation, DenialAnnotator};
use crate::error::Result;
use crate::query::{AnswerResolver, Resolution};
use crate::reference::ReferenceStore;
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// One user's claim review
pub struct ReviewSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    references: Arc<ReferenceStore>,
    claims_config: ClaimsConfig,
    annotator: DenialAnnotator,
    resolver: AnswerResolver,
    claims: Option<ClaimSet>,
    log: ConversationLog,
}

impl ReviewSession {
    /// Start a session over already-loaded reference tables
    pub fn new(config: &AuditConfig, references: Arc<ReferenceStore>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            references,
            claims_config: config.claims.clone(),
            annotator: DenialAnnotator::new(&config.annotation),
            resolver: AnswerResolver::new(&config.query),
            claims: None,
            log: ConversationLog::new(),
        };
        tracing::info!(session = %session.id, "Review session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn references(&self) -> &ReferenceStore {
        &self.references
    }

    /// Ingest a claims file from disk, replacing the current claim set.
    ///
    /// On error the current claim set is kept.
    pub fn load_claims_path(&mut self, path: &Path) -> Result<&ClaimSet> {
        let set = ClaimSet::from_path(path, &self.claims_config)?;
        Ok(self.replace_claims(set))
    }

    /// Ingest an uploaded claims buffer, replacing the current claim set.
    ///
    /// On error the current claim set is kept.
    pub fn load_claims_reader<R: Read>(
        &mut self,
        reader: R,
        name: impl Into<String>,
    ) -> Result<&ClaimSet> {
        let set = ClaimSet::from_reader(reader, name, &self.claims_config)?;
        Ok(self.replace_claims(set))
    }

    fn replace_claims(&mut self, set: ClaimSet) -> &ClaimSet {
        if let Some(previous) = &self.claims {
            tracing::debug!(file = previous.name(), "Discarding previous claim set");
        }
        self.claims.insert(set)
    }

    /// Active claim set, if a file has been loaded
    pub fn claims(&self) -> Option<&ClaimSet> {
        self.claims.as_ref()
    }

    /// Total, denied and clean counts for the active claim set
    pub fn summary(&self) -> Option<ClaimSummary> {
        self.claims.as_ref().map(ClaimSet::summary)
    }

    /// Per-claim denial annotations for the active claim set
    pub fn annotations(&self) -> Vec<ClaimAnnotation<'_>> {
        match &self.claims {
            Some(set) => self
                .annotator
                .annotate_all(set.claims(), self.references.as_ref()),
            None => Vec::new(),
        }
    }

    /// Answer a question and record it in the conversation log.
    ///
    /// Without a loaded claim set only the Q&A bank and fallback apply.
    pub fn ask(&mut self, question: &str) -> Resolution<'_> {
        let claims = self.claims.as_ref().map(ClaimSet::claims).unwrap_or(&[]);
        self.resolver
            .resolve(question, claims, self.references.as_ref(), &mut self.log)
    }

    /// Conversation so far, oldest first
    pub fn history(&self) -> &[ConversationEntry] {
        self.log.all()
    }

    /// Drop the claim set and conversation, keeping the reference tables
    pub fn reset(&mut self) {
        self.claims = None;
        self.log = ConversationLog::new();
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        tracing::info!(session = %self.id, "Review session reset");
    }
}
