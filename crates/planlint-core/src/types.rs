use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ViolationKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    DuplicateId,
    DuplicateName,
    UnknownDependency,
    ForwardOrSelfDependency,
    CyclicDependency,
    MissingCriteria,
    VagueCriteria,
}

impl ViolationKind {
    pub fn all() -> &'static [ViolationKind] {
        &[
            ViolationKind::DuplicateId,
            ViolationKind::DuplicateName,
            ViolationKind::UnknownDependency,
            ViolationKind::ForwardOrSelfDependency,
            ViolationKind::CyclicDependency,
            ViolationKind::MissingCriteria,
            ViolationKind::VagueCriteria,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::DuplicateId => "duplicate_id",
            ViolationKind::DuplicateName => "duplicate_name",
            ViolationKind::UnknownDependency => "unknown_dependency",
            ViolationKind::ForwardOrSelfDependency => "forward_or_self_dependency",
            ViolationKind::CyclicDependency => "cyclic_dependency",
            ViolationKind::MissingCriteria => "missing_criteria",
            ViolationKind::VagueCriteria => "vague_criteria",
        }
    }

    /// Corrective hint printed alongside the violation.
    pub fn hint(self) -> &'static str {
        match self {
            ViolationKind::DuplicateId => "give every stage its own id",
            ViolationKind::DuplicateName => "rename one of the stages so each component is defined once",
            ViolationKind::UnknownDependency => "reference only ids that appear in the plan",
            ViolationKind::ForwardOrSelfDependency => {
                "dependencies point down: a stage may depend only on earlier stages"
            }
            ViolationKind::CyclicDependency => {
                "break the cycle by extracting the shared piece into an earlier stage"
            }
            ViolationKind::MissingCriteria => "declare at least one verifiable completion criterion",
            ViolationKind::VagueCriteria => {
                "replace the phrase with something verifiable (a command, a metric, a checklist item)"
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViolationKind {
    type Err = crate::error::PlanLintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duplicate_id" => Ok(ViolationKind::DuplicateId),
            "duplicate_name" => Ok(ViolationKind::DuplicateName),
            "unknown_dependency" => Ok(ViolationKind::UnknownDependency),
            "forward_or_self_dependency" => Ok(ViolationKind::ForwardOrSelfDependency),
            "cyclic_dependency" => Ok(ViolationKind::CyclicDependency),
            "missing_criteria" => Ok(ViolationKind::MissingCriteria),
            "vague_criteria" => Ok(ViolationKind::VagueCriteria),
            _ => Err(crate::error::PlanLintError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        use std::str::FromStr;
        for kind in ViolationKind::all() {
            let s = kind.as_str();
            let parsed = ViolationKind::from_str(s).unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn kind_all_complete() {
        assert_eq!(ViolationKind::all().len(), 7);
    }

    #[test]
    fn unknown_kind_rejected() {
        use std::str::FromStr;
        assert!(ViolationKind::from_str("bogus").is_err());
        assert!(ViolationKind::from_str("").is_err());
    }

    #[test]
    fn every_kind_has_a_hint() {
        for kind in ViolationKind::all() {
            assert!(!kind.hint().is_empty());
        }
    }

    #[test]
    fn kind_serde_snake_case() {
        let json = serde_json::to_string(&ViolationKind::ForwardOrSelfDependency).unwrap();
        assert_eq!(json, "\"forward_or_self_dependency\"");
        let parsed: ViolationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ViolationKind::ForwardOrSelfDependency);
    }
}
