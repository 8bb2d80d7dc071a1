use crate::output::{print_json, print_table};
use anyhow::Context;
use planlint_core::plan::Plan;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let plan = Plan::load(file)
        .with_context(|| format!("failed to read plan '{}'", file.display()))?;

    if json {
        print_json(&plan)?;
        return Ok(());
    }

    if let Some(title) = &plan.title {
        println!("{title}");
    }
    let rows: Vec<Vec<String>> = plan
        .stages
        .iter()
        .map(|s| {
            let deps = if s.depends_on.is_empty() {
                "-".to_string()
            } else {
                s.depends_on
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            vec![
                s.id.to_string(),
                s.name.clone(),
                deps,
                s.criteria.len().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DEPENDS ON", "CRITERIA"], rows);
    Ok(())
}
