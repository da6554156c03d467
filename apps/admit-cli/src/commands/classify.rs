// classify.rs - `admit classify`: classify a goal draft file or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use admit_goal::{load_draft, parse_draft, DraftFormat, PartialGoal};
use admit_policy::{ClassificationTrace, StepOutcome, VerdictState};
use clap::Args;

use crate::config::{AdmitConfig, OutputFormat};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Draft file (.json, .yaml, .yml), or `-` to read JSON from stdin.
    pub draft: PathBuf,
    /// Rule set: "current", "legacy", or a path to a rule-set file.
    #[arg(long)]
    pub ruleset: Option<String>,
    /// Output format (defaults to the config file, then text).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Show every rule evaluation, not just the verdict.
    #[arg(long)]
    pub trace: bool,
    /// Exit with an error unless the draft is admissible.
    #[arg(long)]
    pub check: bool,
}

pub fn execute(args: &ClassifyArgs, config: &AdmitConfig, project_root: &Path) -> anyhow::Result<()> {
    let ruleset = super::load_ruleset(args.ruleset.as_deref(), config, project_root)?;
    let draft = read_draft(&args.draft)?;
    let trace = ruleset.classify_with_trace(&draft);

    tracing::info!(
        draft = %args.draft.display(),
        ruleset = %trace.ruleset,
        status = %trace.verdict.status(),
        "classified draft"
    );

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Json if args.trace => {
            println!("{}", serde_json::to_string_pretty(&trace)?)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trace.verdict)?),
        OutputFormat::Text => {
            print_verdict(&trace.verdict, &trace.ruleset);
            if args.trace {
                print_trace(&trace);
            }
        }
    }

    if args.check && !trace.verdict.is_admissible() {
        anyhow::bail!("goal is {}", trace.verdict.status());
    }
    Ok(())
}

fn read_draft(path: &Path) -> anyhow::Result<PartialGoal> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(parse_draft(&text, DraftFormat::Json)?);
    }
    Ok(load_draft(path)?)
}

fn print_verdict(verdict: &VerdictState, ruleset: &str) {
    println!("Status: {} (rule set: {})", verdict.status(), ruleset);

    if let Some(goal) = verdict.goal() {
        println!();
        println!("This goal is admissible.");
        println!("  Intention:    {}", goal.description);
        println!("  Observable:   {}", goal.observable_return);
        println!(
            "  Verification: {}",
            goal.external_verification.as_deref().unwrap_or("(not applicable)")
        );
        println!("  Horizon:      {} days", goal.time_horizon_days);
        println!("  Reversible:   {}", if goal.reversibility { "yes" } else { "no" });
        println!(
            "  Resources:    time {}h, energy {}, attention {}",
            goal.resource_constraints.time,
            goal.resource_constraints.energy,
            goal.resource_constraints.attention
        );
        return;
    }

    let missing = verdict.missing_fields();
    if !missing.is_empty() {
        println!();
        println!("Next constraints:");
        for field in missing {
            println!("  - {} ({})", field.label(), field);
        }
    }

    println!();
    println!("What to clarify:");
    for reason in verdict.reasons() {
        match reason.field {
            Some(field) => println!("  - {}: {}", field.label(), reason.display_message()),
            None => println!("  - {}", reason.display_message()),
        }
    }
}

fn print_trace(trace: &ClassificationTrace) {
    println!();
    println!("Rule evaluations:");
    for step in &trace.steps {
        let outcome = match step.outcome {
            StepOutcome::Fired => "FIRED",
            StepOutcome::Passed => "pass",
            StepOutcome::Skipped => "skip",
        };
        println!("  {:<6} {:<8} {}", outcome, step.severity, step.rule);
    }
}
