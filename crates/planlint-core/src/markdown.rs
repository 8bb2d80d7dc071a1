use crate::error::{PlanLintError, Result};
use crate::plan::Plan;
use crate::stage::Stage;
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Line patterns
// ---------------------------------------------------------------------------

static STAGE_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static DEPENDS_RE: OnceLock<Regex> = OnceLock::new();
static DEP_TOKEN_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_RE: OnceLock<Regex> = OnceLock::new();

/// `## Stage 3: Domain model` or `## 3. Domain model`
fn stage_heading_re() -> &'static Regex {
    STAGE_HEADING_RE.get_or_init(|| {
        Regex::new(r"^##\s+(?:[Ss]tage\s+)?(\d+)\s*[.:]?\s+(.+?)\s*$").unwrap()
    })
}

/// `Depends on: 1, 2` (also `none` / `-`)
fn depends_re() -> &'static Regex {
    DEPENDS_RE.get_or_init(|| Regex::new(r"^\s*[Dd]epends\s+on\s*:\s*(.*?)\s*$").unwrap())
}

/// A single dependency reference: `3`, `#3`, or `Stage 3`.
fn dep_token_re() -> &'static Regex {
    DEP_TOKEN_RE.get_or_init(|| Regex::new(r"^(?:[Ss]tage\s+)?#?(\d+)$").unwrap())
}

/// `- text`, `* text`, with optional `[ ]` / `[x]` checkbox.
fn bullet_re() -> &'static Regex {
    BULLET_RE.get_or_init(|| {
        Regex::new(r"^\s*[-*]\s+(?:\[[ xX]\]\s+)?(.+?)\s*$").unwrap()
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a markdown plan document.
///
/// Recognizes an optional `# title`, per-stage sections introduced by
/// `## Stage N: Name` headings (with a `Depends on:` line and bullet-list
/// criteria), and the tabular `| Stage | Name | Depends on | ... |` form.
/// Malformed stage ids and dependency references are fatal; everything the
/// parser accepts is handed to the validator as-is.
pub fn parse_plan(text: &str) -> Result<Plan> {
    let mut plan = Plan::new();
    let mut current: Option<Stage> = None;

    let mut lines = text.lines().enumerate().peekable();
    while let Some((idx, line)) = lines.next() {
        let lineno = idx + 1;

        if let Some(caps) = stage_heading_re().captures(line) {
            if let Some(stage) = current.take() {
                plan.add_stage(stage);
            }
            let id = parse_id(&caps[1], lineno)?;
            current = Some(stage_new(id, &caps[2], lineno)?);
            continue;
        }

        if plan.title.is_none() && current.is_none() {
            if let Some(rest) = line.strip_prefix("# ") {
                let title = rest.trim();
                if !title.is_empty() {
                    plan.title = Some(title.to_string());
                }
                continue;
            }
        }

        if is_table_header(line) {
            if let Some(stage) = current.take() {
                plan.add_stage(stage);
            }
            parse_table(&mut plan, line, lineno, &mut lines)?;
            continue;
        }

        let Some(stage) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = depends_re().captures(line) {
            for dep in parse_dep_list(&caps[1], lineno)? {
                stage.add_dependency(dep);
            }
        } else if let Some(caps) = bullet_re().captures(line) {
            stage.add_criterion(&caps[1]);
        }
    }

    if let Some(stage) = current.take() {
        plan.add_stage(stage);
    }

    if plan.stages.is_empty() {
        return Err(PlanLintError::NoStages);
    }
    Ok(plan)
}

fn parse_id(digits: &str, lineno: usize) -> Result<u32> {
    digits.parse::<u32>().map_err(|_| PlanLintError::Parse {
        line: lineno,
        message: format!("stage id '{digits}' is out of range"),
    })
}

fn stage_new(id: u32, name: &str, lineno: usize) -> Result<Stage> {
    Stage::new(id, name).map_err(|e| PlanLintError::Parse {
        line: lineno,
        message: e.to_string(),
    })
}

/// `1, 2, Stage 3` → ids; `none`, `-`, or blank → empty.
fn parse_dep_list(list: &str, lineno: usize) -> Result<Vec<u32>> {
    let list = list.trim();
    if list.is_empty() || list == "-" || list.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }
    let mut deps = Vec::new();
    for token in list.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let caps = dep_token_re()
            .captures(token)
            .ok_or_else(|| PlanLintError::Parse {
                line: lineno,
                message: format!("invalid dependency reference '{token}'"),
            })?;
        deps.push(parse_id(&caps[1], lineno)?);
    }
    Ok(deps)
}

// ---------------------------------------------------------------------------
// Table form
// ---------------------------------------------------------------------------

fn is_table_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('|') && trimmed.to_lowercase().contains("depends")
}

fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':'))
}

fn parse_table(
    plan: &mut Plan,
    header: &str,
    header_lineno: usize,
    lines: &mut std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'_>>>,
) -> Result<()> {
    let headers = split_row(header);
    let col = |needle: &str| {
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(needle))
    };
    let id_col = col("stage").ok_or_else(|| PlanLintError::Parse {
        line: header_lineno,
        message: "stage table is missing a 'Stage' column".to_string(),
    })?;
    let dep_col = col("depends");
    let name_col = col("name");
    let criteria_col = col("criteria");

    while let Some(&(idx, line)) = lines.peek() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with('|') {
            break;
        }
        lines.next();
        let lineno = idx + 1;
        let cells = split_row(line);
        if is_separator_row(&cells) {
            continue;
        }

        let cell = |i: Option<usize>| i.and_then(|i| cells.get(i)).map(String::as_str);

        let id_text = cell(Some(id_col)).unwrap_or_default();
        // Allow "Stage 3" in the id column as well as a bare number.
        let caps = dep_token_re()
            .captures(id_text)
            .ok_or_else(|| PlanLintError::Parse {
                line: lineno,
                message: format!("invalid stage id '{id_text}' in table row"),
            })?;
        let id = parse_id(&caps[1], lineno)?;

        let name = cell(name_col).unwrap_or_default();
        let mut stage = stage_new(id, name, lineno)?;

        if let Some(deps) = cell(dep_col) {
            for dep in parse_dep_list(deps, lineno)? {
                stage.add_dependency(dep);
            }
        }
        if let Some(criteria) = cell(criteria_col) {
            for c in criteria.split(';') {
                let c = c.trim();
                if !c.is_empty() {
                    stage.add_criterion(c);
                }
            }
        }
        plan.add_stage(stage);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_form() {
        let doc = r#"# Payments rollout

## Stage 1: Infrastructure
Depends on: none

Completion criteria:
- Config loaded from vault
- CI pipeline green on main

## Stage 2: Domain model
Depends on: 1
- [ ] Unit test coverage above 80%
- [x] Entity review recorded
"#;
        let plan = parse_plan(doc).unwrap();
        assert_eq!(plan.title.as_deref(), Some("Payments rollout"));
        assert_eq!(plan.stages.len(), 2);

        let infra = &plan.stages[0];
        assert_eq!(infra.id, 1);
        assert_eq!(infra.name, "Infrastructure");
        assert!(infra.depends_on.is_empty());
        assert_eq!(infra.criteria.len(), 2);

        let domain = &plan.stages[1];
        assert_eq!(domain.depends_on, vec![1]);
        assert_eq!(domain.criteria[0], "Unit test coverage above 80%");
    }

    #[test]
    fn numbered_heading_form() {
        let doc = "## 1. Infra\nDepends on: -\n- Config loaded\n";
        let plan = parse_plan(doc).unwrap();
        assert_eq!(plan.stages[0].id, 1);
        assert_eq!(plan.stages[0].name, "Infra");
    }

    #[test]
    fn dependency_reference_styles() {
        let doc = "## Stage 3: API\nDepends on: 1, #2, Stage 2\n- Contract tests pass\n";
        let plan = parse_plan(doc).unwrap();
        assert_eq!(plan.stages[0].depends_on, vec![1, 2]);
    }

    #[test]
    fn table_form() {
        let doc = r#"
| Stage | Name   | Depends on | Completion criteria                     |
|-------|--------|------------|-----------------------------------------|
| 1     | Infra  | -          | Config loaded                           |
| 2     | Domain | 1          | Unit tests above 80%; Contract reviewed |
"#;
        let plan = parse_plan(doc).unwrap();
        assert_eq!(plan.stages.len(), 2);
        assert_eq!(plan.stages[1].name, "Domain");
        assert_eq!(plan.stages[1].depends_on, vec![1]);
        assert_eq!(plan.stages[1].criteria.len(), 2);
    }

    #[test]
    fn invalid_dep_token_is_fatal_with_line() {
        let doc = "## Stage 1: A\nDepends on: abc\n- x in place\n";
        let err = parse_plan(doc).unwrap_err();
        match err {
            PlanLintError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("'abc'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_stage_id_is_fatal() {
        let doc = "## Stage 0: A\n- x in place\n";
        assert!(matches!(
            parse_plan(doc),
            Err(PlanLintError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn document_without_stages_is_fatal() {
        let doc = "# Just prose\n\nNothing resembling a stage here.\n";
        assert!(matches!(parse_plan(doc), Err(PlanLintError::NoStages)));
    }

    #[test]
    fn prose_between_stages_is_ignored() {
        let doc = r#"## Stage 1: Infra
Some narrative about why this stage exists.
Depends on: none
- Config loaded

More narrative that is not a bullet.
"#;
        let plan = parse_plan(doc).unwrap();
        assert_eq!(plan.stages[0].criteria, vec!["Config loaded".to_string()]);
    }

    #[test]
    fn table_missing_stage_column_is_fatal() {
        let doc = "| Phase | Depends on |\n|---|---|\n| 1 | - |\n";
        match parse_plan(doc).unwrap_err() {
            PlanLintError::Parse { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("'Stage' column"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
