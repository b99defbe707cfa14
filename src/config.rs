//! Claim Audit configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Claim Audit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Reference table locations
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Claims ingestion settings
    #[serde(default)]
    pub claims: ClaimsConfig,

    /// Denial annotation settings
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Question answering settings
    #[serde(default)]
    pub query: QueryConfig,
}

impl AuditConfig {
    /// Load configuration from a TOML file, or JSON when the extension is `.json`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingFile(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        }
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else fall back to built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config file (`<config dir>/claim-audit/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("claim-audit").join("config.toml"))
    }
}

/// Locations of the reference tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Base directory that relative table paths resolve against
    pub dir: PathBuf,

    /// Citation knowledge base (mandatory)
    pub citations: PathBuf,

    /// Payer denial logic matrix (mandatory)
    pub payer_logic: PathBuf,

    /// Custom Q&A bank (optional, absent file means an empty bank)
    pub qa_bank: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            citations: PathBuf::from("Citation_Knowledge_Base.csv"),
            payer_logic: PathBuf::from("Payer_Denial_Logic_Matrix.csv"),
            qa_bank: PathBuf::from("Custom_QA_Bank.csv"),
        }
    }
}

impl ReferenceConfig {
    /// Reference config rooted at `dir` with the default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn citations_path(&self) -> PathBuf {
        self.dir.join(&self.citations)
    }

    pub fn payer_logic_path(&self) -> PathBuf {
        self.dir.join(&self.payer_logic)
    }

    pub fn qa_bank_path(&self) -> PathBuf {
        self.dir.join(&self.qa_bank)
    }
}

/// Claims ingestion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimsConfig {
    /// Text stored for blank CPT, modifier and denial-reason cells
    #[serde(default)]
    pub missing_value: String,
}

/// Denial annotation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Keyword in a denial reason that pulls in citations
    pub modifier_keyword: String,

    /// How the keyword is compared against the denial reason
    pub keyword_case: CaseSensitivity,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            modifier_keyword: "Modifier".to_string(),
            keyword_case: CaseSensitivity::Sensitive,
        }
    }
}

/// Case handling for substring checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    /// Exact byte comparison
    #[default]
    Sensitive,

    /// Both sides lower-cased before comparison
    Insensitive,
}

impl CaseSensitivity {
    /// Whether `haystack` contains `needle` under this case rule
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => haystack.contains(needle),
            CaseSensitivity::Insensitive => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Question answering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// What a blank question matches
    pub empty_query: EmptyQueryPolicy,

    /// Answer recorded when neither claims nor the Q&A bank match
    pub fallback_message: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::Ignore,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Default generic answer
pub const DEFAULT_FALLBACK_MESSAGE: &str = "No matching claims or preloaded answers found. \
Try rephrasing or using keywords like 'modifier 59' or 'global period'.";

/// Behaviour for a question that is empty after trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    /// Blank questions match no claim and no bank row
    #[default]
    Ignore,

    /// Plain substring semantics: the empty string is contained in every
    /// field, so every claim matches with the full score
    MatchAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert_eq!(config.reference.dir, PathBuf::from("."));
        assert_eq!(config.annotation.modifier_keyword, "Modifier");
        assert_eq!(config.annotation.keyword_case, CaseSensitivity::Sensitive);
        assert_eq!(config.query.empty_query, EmptyQueryPolicy::Ignore);
        assert!(config.claims.missing_value.is_empty());
    }

    #[test]
    fn test_reference_paths_resolve_against_dir() {
        let config = ReferenceConfig::in_dir("/srv/audit");
        assert_eq!(
            config.citations_path(),
            PathBuf::from("/srv/audit/Citation_Knowledge_Base.csv")
        );
        assert_eq!(
            config.payer_logic_path(),
            PathBuf::from("/srv/audit/Payer_Denial_Logic_Matrix.csv")
        );
        assert_eq!(
            config.qa_bank_path(),
            PathBuf::from("/srv/audit/Custom_QA_Bank.csv")
        );
    }

    #[test]
    fn test_case_sensitivity_contains() {
        assert!(CaseSensitivity::Sensitive.contains("Modifier 59 missing", "Modifier"));
        assert!(!CaseSensitivity::Sensitive.contains("modifier 59 missing", "Modifier"));
        assert!(CaseSensitivity::Insensitive.contains("modifier 59 missing", "Modifier"));
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[annotation]
modifier_keyword = "modifier"
keyword_case = "insensitive"

[query]
empty_query = "match_all"
fallback_message = "Nothing found."
"#
        )
        .unwrap();

        let config = AuditConfig::load(file.path()).unwrap();
        assert_eq!(config.annotation.modifier_keyword, "modifier");
        assert_eq!(config.annotation.keyword_case, CaseSensitivity::Insensitive);
        assert_eq!(config.query.empty_query, EmptyQueryPolicy::MatchAll);
        assert_eq!(config.query.fallback_message, "Nothing found.");
        // Untouched sections keep their defaults
        assert_eq!(
            config.reference.citations,
            PathBuf::from("Citation_Knowledge_Base.csv")
        );
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"claims": {{"missing_value": "nan"}}}}"#).unwrap();

        let config = AuditConfig::load(file.path()).unwrap();
        assert_eq!(config.claims.missing_value, "nan");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AuditConfig::load(Path::new("/nonexistent/claim-audit.toml")).unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[query\nempty_query = ").unwrap();
        let err = AuditConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let toml = toml::to_string_pretty(&AuditConfig::default()).unwrap();
        let parsed: AuditConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.query.fallback_message, DEFAULT_FALLBACK_MESSAGE);
    }
}
