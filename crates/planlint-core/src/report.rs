use crate::types::ViolationKind;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub stage_id: u32,
    /// The other stage involved, for cross-stage violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<u32>,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Human-readable multi-line summary. Presentational only.
    pub fn render(&self) -> String {
        if self.valid {
            return "plan is valid: no violations found".to_string();
        }
        let mut out = String::new();
        for v in &self.violations {
            out.push_str(&format!("stage {}: [{}] {}\n", v.stage_id, v.kind, v.detail));
            out.push_str(&format!("  hint: {}\n", v.kind.hint()));
        }
        out.push_str(&format!("{} violation(s) found", self.violations.len()));
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = Report::from_violations(Vec::new());
        assert!(report.valid);
        assert_eq!(report.render(), "plan is valid: no violations found");
    }

    #[test]
    fn render_lists_each_violation_with_hint() {
        let report = Report::from_violations(vec![
            Violation {
                kind: ViolationKind::ForwardOrSelfDependency,
                stage_id: 1,
                related_id: Some(2),
                detail: "depends on stage 2, which is not an earlier stage".to_string(),
            },
            Violation {
                kind: ViolationKind::VagueCriteria,
                stage_id: 1,
                related_id: None,
                detail: "criterion 'works' matches denylisted term 'works'".to_string(),
            },
        ]);
        assert!(!report.valid);
        let rendered = report.render();
        assert!(rendered.contains("stage 1: [forward_or_self_dependency]"));
        assert!(rendered.contains("hint: dependencies point down"));
        assert!(rendered.contains("2 violation(s) found"));
    }

    #[test]
    fn violation_json_omits_absent_related_id() {
        let v = Violation {
            kind: ViolationKind::MissingCriteria,
            stage_id: 3,
            related_id: None,
            detail: "stage 'Rollout' declares no completion criteria".to_string(),
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(!json.contains("related_id"));
        assert!(json.contains("\"missing_criteria\""));

        let parsed: Violation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }

    #[test]
    fn report_json_roundtrip() {
        let report = Report::from_violations(vec![Violation {
            kind: ViolationKind::CyclicDependency,
            stage_id: 2,
            related_id: Some(1),
            detail: "stage 2 and stage 1 form a dependency cycle".to_string(),
        }]);
        let json = serde_json::to_string(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
