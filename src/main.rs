//! Claim Audit - interactive denial review and claim question answering
//!
//! Text front end for a single review session: load a claims file, browse
//! denial annotations, and ask questions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use claim_audit::{
    claims::{Amount, ClaimSet},
    config::AuditConfig,
    denial::{ClaimAnnotation, Finding},
    query::{AnswerSource, Resolution},
    reference::ReferenceStore,
    session::ReviewSession,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "claim-audit")]
#[command(version)]
#[command(about = "Interactive claim denial review and question answering")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLAIM_AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive review session
    Session {
        /// Claims file to load at start
        #[arg(long)]
        claims: Option<PathBuf>,
    },

    /// Check that the reference tables load
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

const HELP: &str = "\
Commands:
  :load <file>   load a claims CSV (replaces the current one)
  :summary       total / denied / clean counts
  :claims        per-claim detail with denial guidance
  :history       conversation so far
  :reset         start over with no claims and no history
  :help          this text
  :quit          leave the session
Anything else, including unknown :words, is asked as a question.";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("claim_audit={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AuditConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Session { claims } => run_session(config, claims.as_deref())?,
        Commands::Doctor => run_doctor(&config),
        Commands::Config { default } => show_config(if default { None } else { Some(&config) })?,
    }

    Ok(())
}

/// One line of session input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Load(Option<&'a str>),
    Summary,
    Claims,
    History,
    Reset,
    /// Anything that is not a known command, `:`-prefixed or not
    Ask(&'a str),
}

impl<'a> Command<'a> {
    fn parse(input: &'a str) -> Self {
        let (head, rest) = input.split_once(' ').unwrap_or((input, ""));
        let rest = rest.trim();
        match head {
            ":quit" | ":q" => Command::Quit,
            ":help" => Command::Help,
            ":load" => Command::Load(Some(rest).filter(|p| !p.is_empty())),
            ":summary" => Command::Summary,
            ":claims" => Command::Claims,
            ":history" => Command::History,
            ":reset" => Command::Reset,
            _ => Command::Ask(input),
        }
    }
}

fn run_session(config: AuditConfig, claims: Option<&Path>) -> Result<()> {
    let references = Arc::new(ReferenceStore::load(&config.reference)?);
    let mut session = ReviewSession::new(&config, references);

    if let Some(path) = claims {
        load(&mut session, path);
    }

    println!("Claim Audit session {}", session.id());
    println!("Type :help for commands.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match Command::parse(input) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Load(Some(path)) => load(&mut session, Path::new(path)),
            Command::Load(None) => println!("Usage: :load <file>"),
            Command::Summary => match session.claims() {
                Some(set) => print_summary(set),
                None => println!("No claims file loaded."),
            },
            Command::Claims => print_annotations(&session.annotations()),
            Command::History => print_history(&session),
            Command::Reset => {
                session.reset();
                println!("Session reset ({}).", session.id());
            }
            Command::Ask(question) => {
                println!("Searching for: {question}");
                print_resolution(&session.ask(question));
            }
        }
    }

    Ok(())
}

fn load(session: &mut ReviewSession, path: &Path) {
    match session.load_claims_path(path) {
        Ok(set) => {
            println!("Loaded {} successfully.", set.name());
            print_summary(set);
        }
        Err(e) => println!("Could not load {}: {}", path.display(), e),
    }
}

fn print_summary(set: &ClaimSet) {
    let summary = set.summary();
    println!("Total Claims:             {}", summary.total);
    println!("Flagged Claims (Denials): {}", summary.denied);
    println!("Clean Claims:             {}", summary.clean);
}

fn print_annotations(annotations: &[ClaimAnnotation<'_>]) {
    if annotations.is_empty() {
        println!("No claims file loaded.");
        return;
    }
    for annotation in annotations {
        let c = annotation.claim;
        println!("---");
        println!("Claim ID: {}", c.claim_id);
        println!("  CPT Code:        {}", c.cpt_code);
        println!("  ICD-10 Code:     {}", c.icd10_code);
        println!("  Modifier:        {}", c.modifier);
        println!("  Payer:           {}", c.payer);
        println!("  Billed Amount:   {}", amount(c.billed_amount.as_ref()));
        println!("  Allowed Amount:  {}", amount(c.allowed_amount.as_ref()));
        println!("  Denial Reason:   {}", c.denial_reason);

        match &annotation.finding {
            Finding::Clean => println!("  No denial detected."),
            Finding::Denied(finding) => {
                println!("  Denial detected: {}", finding.reason);
                if let Some(rule) = &finding.payer_guidance {
                    println!("  Payer Denial Tip: {}", rule.appeals_tip);
                    println!("  Reference Policy: {}", rule.source_policy);
                }
                if !finding.citations.is_empty() {
                    println!("  Relevant Coding Citations:");
                    for cite in &finding.citations {
                        println!("    - {}: {} ({})", cite.source, cite.summary, cite.link);
                    }
                }
            }
        }
    }
}

fn amount(value: Option<&Amount>) -> String {
    value.map(Amount::to_string).unwrap_or_else(|| "-".to_string())
}

fn print_resolution(resolution: &Resolution<'_>) {
    match resolution.source {
        AnswerSource::QaBank => println!("Preloaded Answer:\n\n{}", resolution.answer),
        AnswerSource::ClaimMatches | AnswerSource::Fallback => println!("{}", resolution.answer),
    }
}

fn print_history(session: &ReviewSession) {
    if session.history().is_empty() {
        println!("No questions asked yet.");
        return;
    }
    for entry in session.history() {
        println!("Q: {}", entry.question);
        println!("A: {}", entry.answer);
        println!("---");
    }
}

fn run_doctor(config: &AuditConfig) {
    println!("Claim Audit Doctor");
    println!();

    println!("Checking configuration...");
    match AuditConfig::default_path() {
        Some(path) if path.exists() => println!("  ✓ Configuration file found: {}", path.display()),
        _ => println!("  ℹ No configuration file found (using defaults)"),
    }

    println!();
    println!("Checking reference tables...");
    let tables = [
        ("Citation knowledge base", config.reference.citations_path(), true),
        ("Payer denial logic", config.reference.payer_logic_path(), true),
        ("Q&A bank", config.reference.qa_bank_path(), false),
    ];
    for (label, path, required) in &tables {
        if path.exists() {
            println!("  ✓ {}: {}", label, path.display());
        } else if *required {
            println!("  ✗ {} missing: {}", label, path.display());
        } else {
            println!("  ℹ {} not found (optional): {}", label, path.display());
        }
    }

    println!();
    match ReferenceStore::load(&config.reference) {
        Ok(store) => println!(
            "  ✓ Loaded {} citations, {} payer rules, {} Q&A entries",
            store.citations().len(),
            store.payer_rules().len(),
            store.qa_bank().len()
        ),
        Err(e) => println!("  ✗ {}", e),
    }

    println!();
    println!("Doctor check complete!");
}

fn show_config(config: Option<&AuditConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":summary"), Command::Summary);
        assert_eq!(
            Command::parse(":load  claims.csv "),
            Command::Load(Some("claims.csv"))
        );
        assert_eq!(Command::parse(":load"), Command::Load(None));
    }

    #[test]
    fn test_unknown_colon_input_is_a_question() {
        assert_eq!(Command::parse(":59"), Command::Ask(":59"));
        assert_eq!(
            Command::parse(":modifier 59"),
            Command::Ask(":modifier 59")
        );
        assert_eq!(Command::parse("global period"), Command::Ask("global period"));
    }
}
