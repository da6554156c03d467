pub mod classify;
pub mod fields;
pub mod rules;

use std::path::Path;

use admit_policy::{RuleSet, RuleSetName};

use crate::config::AdmitConfig;

/// Pick the rule set: the `--ruleset` flag wins over the config file.
///
/// Builtin names resolve directly. Anything else is a rule-set file; a
/// relative path from the flag is taken from the working directory, one from
/// the config file from the project root.
pub fn load_ruleset(
    flag: Option<&str>,
    config: &AdmitConfig,
    project_root: &Path,
) -> anyhow::Result<RuleSet> {
    let ruleset = match flag {
        Some(spec) => RuleSet::resolve(spec)?,
        None => {
            let spec = config.classifier.ruleset.as_str();
            match spec.parse::<RuleSetName>() {
                Ok(name) => RuleSet::builtin(name),
                Err(_) => RuleSet::resolve(&project_root.join(spec).to_string_lossy())?,
            }
        }
    };
    tracing::debug!(name = %ruleset.name, rules = ruleset.rules().len(), "selected rule set");
    Ok(ruleset)
}
