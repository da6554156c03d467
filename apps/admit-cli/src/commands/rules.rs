// rules.rs - `admit rules`: print the rules of a rule set.

use std::path::Path;

use admit_policy::Check;
use clap::Args;

use crate::config::{AdmitConfig, OutputFormat};

#[derive(Args)]
pub struct RulesArgs {
    /// Rule set: "current", "legacy", or a path to a rule-set file.
    #[arg(long)]
    pub ruleset: Option<String>,
    /// Output format (defaults to the config file, then text).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn execute(args: &RulesArgs, config: &AdmitConfig, project_root: &Path) -> anyhow::Result<()> {
    let ruleset = super::load_ruleset(args.ruleset.as_deref(), config, project_root)?;

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ruleset)?),
        OutputFormat::Text => {
            println!("Rule set: {} ({} rules)", ruleset.name, ruleset.rules().len());
            println!();
            for rule in ruleset.rules() {
                println!(
                    "  {:<8} {:<32} {}",
                    rule.severity,
                    rule.field,
                    describe(&rule.check)
                );
                println!("           {}", rule.message);
            }
        }
    }
    Ok(())
}

fn describe(check: &Check) -> String {
    match check {
        Check::Blank => "blank".to_string(),
        Check::ShorterThan { chars } => format!("shorter than {} chars", chars),
        Check::VagueWithin { words, chars } => {
            format!("contains [{}] under {} chars", words.join(", "), chars)
        }
        Check::NoDigitWithin { chars } => format!("no digit under {} chars", chars),
        Check::AtMost { value } => format!("<= {}", value),
        Check::Below { value } => format!("< {}", value),
        Check::Above { value } => format!("> {}", value),
        Check::Equals { value } => format!("== {}", value),
    }
}
