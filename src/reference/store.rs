//! Reference store: loading and lookup over the three reference tables

use super::types::{CitationEntry, PayerRule, QaBankEntry};
use crate::config::ReferenceConfig;
use crate::error::{Error, Result};
use crate::table::{cell, Table};

/// Lookups the annotator and resolver need from reference data.
///
/// `ReferenceStore` is the production implementation; the trait keeps the
/// consumers independent of how the tables were loaded.
pub trait ReferenceLookup {
    /// First payer rule whose payer equals `payer` exactly
    fn payer_rule(&self, payer: &str) -> Option<&PayerRule>;

    /// Every citation whose source label contains `category`, ignoring case,
    /// in load order
    fn citations_matching(&self, category: &str) -> Vec<&CitationEntry>;

    /// Answer of the first Q&A row that matches the normalized `query`
    fn qa_answer(&self, query: &str) -> Option<&str>;
}

/// Immutable store of citations, payer rules and the Q&A bank
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    citations: Vec<CitationEntry>,
    payer_rules: Vec<PayerRule>,
    qa_bank: Vec<QaBankEntry>,
}

impl ReferenceStore {
    /// Create a store from already-built rows
    pub fn new(
        citations: Vec<CitationEntry>,
        payer_rules: Vec<PayerRule>,
        qa_bank: Vec<QaBankEntry>,
    ) -> Self {
        let qa_bank = qa_bank
            .into_iter()
            .filter(|entry| !entry.question.is_empty())
            .collect();
        Self {
            citations,
            payer_rules,
            qa_bank,
        }
    }

    /// Load all reference tables.
    ///
    /// Citations and payer logic are mandatory. A missing Q&A bank file
    /// leaves the bank empty.
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let citations = Table::from_path(&config.citations_path())?;
        let payer_logic = Table::from_path(&config.payer_logic_path())?;

        let qa_path = config.qa_bank_path();
        let qa_bank = match Table::from_path(&qa_path) {
            Ok(table) => Some(table),
            Err(Error::MissingFile(path)) => {
                tracing::warn!(
                    "Q&A bank not found at {}, continuing with an empty bank",
                    path.display()
                );
                None
            }
            Err(e) => return Err(e),
        };

        let store = Self::from_tables(&citations, &payer_logic, qa_bank.as_ref())?;
        tracing::info!(
            citations = store.citations.len(),
            payer_rules = store.payer_rules.len(),
            qa_entries = store.qa_bank.len(),
            "Reference tables loaded"
        );
        Ok(store)
    }

    /// Build a store from parsed tables, checking required columns
    pub fn from_tables(
        citations: &Table,
        payer_logic: &Table,
        qa_bank: Option<&Table>,
    ) -> Result<Self> {
        let citations = parse_citations(citations)?;
        let payer_rules = parse_payer_rules(payer_logic)?;
        let qa_bank = match qa_bank {
            Some(table) => parse_qa_bank(table)?,
            None => Vec::new(),
        };
        Ok(Self::new(citations, payer_rules, qa_bank))
    }

    pub fn citations(&self) -> &[CitationEntry] {
        &self.citations
    }

    pub fn payer_rules(&self) -> &[PayerRule] {
        &self.payer_rules
    }

    pub fn qa_bank(&self) -> &[QaBankEntry] {
        &self.qa_bank
    }
}

impl ReferenceLookup for ReferenceStore {
    fn payer_rule(&self, payer: &str) -> Option<&PayerRule> {
        self.payer_rules.iter().find(|rule| rule.payer == payer)
    }

    fn citations_matching(&self, category: &str) -> Vec<&CitationEntry> {
        let category = category.to_lowercase();
        self.citations
            .iter()
            .filter(|c| c.source.to_lowercase().contains(&category))
            .collect()
    }

    fn qa_answer(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_lowercase();
        self.qa_bank
            .iter()
            .find(|entry| entry.answers(&query))
            .map(|entry| entry.answer.as_str())
    }
}

fn parse_citations(table: &Table) -> Result<Vec<CitationEntry>> {
    let source = table.column("Source")?;
    let summary = table.column("Summary of Rule")?;
    let link = table.column("Link or Document")?;

    Ok(table
        .records()
        .map(|r| CitationEntry {
            source: cell(r, source).to_string(),
            summary: cell(r, summary).to_string(),
            link: cell(r, link).to_string(),
        })
        .collect())
}

fn parse_payer_rules(table: &Table) -> Result<Vec<PayerRule>> {
    let payer = table.column("Payer")?;
    let tip = table.column("Appeals Tip")?;
    let policy = table.column("Source Policy")?;

    Ok(table
        .records()
        .map(|r| PayerRule {
            payer: cell(r, payer).to_string(),
            appeals_tip: cell(r, tip).to_string(),
            source_policy: cell(r, policy).to_string(),
        })
        .collect())
}

fn parse_qa_bank(table: &Table) -> Result<Vec<QaBankEntry>> {
    let question = table.column("Question")?;
    let answer = table.column("Answer")?;

    Ok(table
        .records()
        .map(|r| QaBankEntry::new(cell(r, question), cell(r, answer)))
        .collect())
}
