//! Claim set ingestion and queries

use super::types::{Amount, Claim, ClaimSummary};
use crate::config::ClaimsConfig;
use crate::error::Result;
use crate::table::{cell, Table};
use std::io::Read;
use std::path::Path;

const CLAIM_ID: &str = "Claim ID";
const CPT_CODE: &str = "CPT Code";
const ICD10_CODE: &str = "ICD-10 Code";
const MODIFIER: &str = "Modifier";
const PAYER: &str = "Payer";
const BILLED_AMOUNT: &str = "Billed Amount";
const ALLOWED_AMOUNT: &str = "Allowed Amount";
const DENIAL_REASON: &str = "Denial Reason";

/// The claims from one uploaded file, in file order
#[derive(Debug, Clone)]
pub struct ClaimSet {
    name: String,
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Create a set from already-normalized claims
    pub fn new(name: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            name: name.into(),
            claims,
        }
    }

    /// Ingest a claims CSV from disk
    pub fn from_path(path: &Path, config: &ClaimsConfig) -> Result<Self> {
        let table = Table::from_path(path)?;
        Self::from_table(&table, config)
    }

    /// Ingest a claims CSV from any reader (e.g. an upload buffer)
    pub fn from_reader<R: Read>(
        reader: R,
        name: impl Into<String>,
        config: &ClaimsConfig,
    ) -> Result<Self> {
        let table = Table::from_reader(reader, name)?;
        Self::from_table(&table, config)
    }

    /// Normalize every row of `table`. A missing column fails the whole file.
    pub fn from_table(table: &Table, config: &ClaimsConfig) -> Result<Self> {
        let claim_id = table.column(CLAIM_ID)?;
        let cpt = table.column(CPT_CODE)?;
        let icd10 = table.column(ICD10_CODE)?;
        let modifier = table.column(MODIFIER)?;
        let payer = table.column(PAYER)?;
        let billed = table.column(BILLED_AMOUNT)?;
        let allowed = table.column(ALLOWED_AMOUNT)?;
        let denial = table.column(DENIAL_REASON)?;

        let missing = config.missing_value.as_str();
        let claims = table
            .records()
            .map(|r| Claim {
                claim_id: cell(r, claim_id).to_string(),
                cpt_code: normalize_code(cell(r, cpt), missing),
                icd10_code: cell(r, icd10).to_string(),
                modifier: normalize_code(cell(r, modifier), missing),
                payer: cell(r, payer).to_string(),
                billed_amount: Amount::parse(cell(r, billed)),
                allowed_amount: Amount::parse(cell(r, allowed)),
                denial_reason: normalize_code(cell(r, denial), missing),
            })
            .collect();

        let set = Self::new(table.name(), claims);
        let summary = set.summary();
        tracing::info!(
            file = %set.name,
            total = summary.total,
            denied = summary.denied,
            "Claims file ingested"
        );
        Ok(set)
    }

    /// Label of the file the claims came from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims carrying a denial reason
    pub fn denied(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|c| c.is_denied())
    }

    /// Claims with no denial
    pub fn clean(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|c| !c.is_denied())
    }

    /// Total, denied and clean counts
    pub fn summary(&self) -> ClaimSummary {
        let denied = self.denied().count();
        ClaimSummary {
            total: self.claims.len(),
            denied,
            clean: self.claims.len() - denied,
        }
    }
}

/// Trim a code-like cell; blank cells become the missing-value sentinel
fn normalize_code(raw: &str, missing: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        missing.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal::Decimal;
    use std::io::Write;

    const HEADER: &str =
        "Claim ID,CPT Code,ICD-10 Code,Modifier,Payer,Billed Amount,Allowed Amount,Denial Reason";

    fn ingest(rows: &[&str]) -> Result<ClaimSet> {
        ingest_with(rows, &ClaimsConfig::default())
    }

    fn ingest_with(rows: &[&str], config: &ClaimsConfig) -> Result<ClaimSet> {
        let mut data = String::from(HEADER);
        for row in rows {
            data.push('\n');
            data.push_str(row);
        }
        ClaimSet::from_reader(data.as_bytes(), "claims.csv", config)
    }

    #[test]
    fn test_fields_are_trimmed() {
        let set = ingest(&[
            "C1, 99213 ,E11.9, 59 ,Aetna,150.00,90.00,  Modifier not valid for this CPT  ",
        ])
        .unwrap();

        let claim = &set.claims()[0];
        assert_eq!(claim.cpt_code, "99213");
        assert_eq!(claim.modifier, "59");
        assert_eq!(claim.denial_reason, "Modifier not valid for this CPT");
        assert_eq!(claim.billed_amount, Some(Amount::Parsed(Decimal::new(15000, 2))));
        assert_eq!(claim.allowed_amount, Some(Amount::Parsed(Decimal::new(9000, 2))));
    }

    #[test]
    fn test_blank_cells_use_missing_sentinel() {
        let set = ingest(&["C1,99213,E11.9,,Aetna,,,None"]).unwrap();
        let claim = &set.claims()[0];
        assert_eq!(claim.modifier, "");
        assert_eq!(claim.billed_amount, None);
        assert_eq!(claim.allowed_amount, None);

        let config = ClaimsConfig {
            missing_value: "nan".to_string(),
        };
        let set = ingest_with(&["C1,99213,E11.9,  ,Aetna,,,"], &config).unwrap();
        let claim = &set.claims()[0];
        assert_eq!(claim.modifier, "nan");
        assert_eq!(claim.denial_reason, "nan");
        assert!(claim.is_denied());
    }

    #[test]
    fn test_amount_formats() {
        let set = ingest(&["C1,99213,E11.9,,Aetna,\"$1,250.50\",$85,None"]).unwrap();
        let claim = &set.claims()[0];
        assert_eq!(claim.billed_amount, Some(Amount::Parsed(Decimal::new(125050, 2))));
        assert_eq!(claim.allowed_amount, Some(Amount::Parsed(Decimal::new(85, 0))));
    }

    #[test]
    fn test_unparsable_amount_is_kept_as_text() {
        let set = ingest(&[
            "C1,99213,E11.9,,Aetna,100,N/A,None",
            "C2,99214,E11.9,,Aetna,(100.00),80,Bundled service",
        ])
        .unwrap();

        assert_eq!(set.len(), 2);
        let first = &set.claims()[0];
        assert_eq!(first.billed_amount, Some(Amount::Parsed(Decimal::new(100, 0))));
        assert_eq!(first.allowed_amount, Some(Amount::Raw("N/A".to_string())));
        let second = &set.claims()[1];
        assert_eq!(second.billed_amount, Some(Amount::Raw("(100.00)".to_string())));
        assert_eq!(set.summary().denied, 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "Claim ID,CPT Code,ICD-10 Code,Payer,Billed Amount,Allowed Amount,Denial Reason\n\
                    C1,99213,E11.9,Aetna,100,80,None\n";
        let err = ClaimSet::from_reader(data.as_bytes(), "claims.csv", &ClaimsConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "Modifier"));
    }

    #[test]
    fn test_summary_counts() {
        let set = ingest(&[
            "C1,99213,E11.9,,Aetna,100,80,None",
            "C2,99214,E11.9,59,Aetna,100,0,Modifier not valid for this CPT",
            "C3,20610,M17.11,,Medicare,200,0,Bundled service",
            "C4,99212,Z00.00,,Cigna,75,60,None",
        ])
        .unwrap();

        assert_eq!(
            set.summary(),
            ClaimSummary {
                total: 4,
                denied: 2,
                clean: 2
            }
        );
        let denied: Vec<&str> = set.denied().map(|c| c.claim_id.as_str()).collect();
        assert_eq!(denied, vec!["C2", "C3"]);
        let clean: Vec<&str> = set.clean().map(|c| c.claim_id.as_str()).collect();
        assert_eq!(clean, vec!["C1", "C4"]);
    }

    #[test]
    fn test_lowercase_none_counts_as_denied() {
        let set = ingest(&["C1,99213,E11.9,,Aetna,100,80,none"]).unwrap();
        assert_eq!(set.summary().denied, 1);
    }

    #[test]
    fn test_empty_file_with_header() {
        let set = ingest(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(
            set.summary(),
            ClaimSummary {
                total: 0,
                denied: 0,
                clean: 0
            }
        );
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "C1,99213,E11.9,,Aetna,100,80,None").unwrap();

        let set = ClaimSet::from_path(file.path(), &ClaimsConfig::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.name(), file.path().display().to_string());
    }
}
