use crate::output::print_json;
use anyhow::Context;
use planlint_core::config::Config;
use planlint_core::plan::Plan;
use planlint_core::validator::Validator;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(root: &Path, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let validator = Validator::new(config.denylist());

    let mut entries = Vec::new();
    let mut invalid = 0usize;

    for file in files {
        debug!("checking {}", file.display());
        let plan = Plan::load(file)
            .with_context(|| format!("failed to read plan '{}'", file.display()))?;
        let report = validator.validate(&plan);
        if !report.valid {
            invalid += 1;
        }

        if json {
            entries.push(serde_json::json!({
                "file": file.display().to_string(),
                "valid": report.valid,
                "violations": report.violations,
            }));
        } else {
            if files.len() > 1 {
                println!("{}:", file.display());
            }
            println!("{}", report.render());
        }
    }

    if json {
        print_json(&entries)?;
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} plan(s) failed validation", files.len());
    }
    Ok(())
}
