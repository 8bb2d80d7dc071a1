use crate::error::{PlanLintError, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<String>,
}

impl Stage {
    /// Build a stage, rejecting input that cannot form a valid record
    /// (zero id, blank name). Structural rules like ordering and uniqueness
    /// are the validator's job, not the constructor's.
    pub fn new(id: u32, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if id == 0 {
            return Err(PlanLintError::InvalidStageId(0));
        }
        if name.trim().is_empty() {
            return Err(PlanLintError::EmptyStageName(id));
        }
        Ok(Self {
            id,
            name,
            depends_on: Vec::new(),
            criteria: Vec::new(),
        })
    }

    /// Record a dependency. Returns `false` if already present (idempotent).
    pub fn add_dependency(&mut self, id: u32) -> bool {
        if self.depends_on.contains(&id) {
            return false;
        }
        self.depends_on.push(id);
        true
    }

    pub fn add_criterion(&mut self, text: impl Into<String>) {
        self.criteria.push(text.into());
    }

    /// Re-check the constructor invariants on a deserialized record.
    pub(crate) fn check_input(&self) -> Result<()> {
        if self.id == 0 {
            return Err(PlanLintError::InvalidStageId(0));
        }
        if self.name.trim().is_empty() {
            return Err(PlanLintError::EmptyStageName(self.id));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_id() {
        assert!(matches!(
            Stage::new(0, "Infra"),
            Err(PlanLintError::InvalidStageId(0))
        ));
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(matches!(
            Stage::new(1, "   "),
            Err(PlanLintError::EmptyStageName(1))
        ));
    }

    #[test]
    fn add_dependency_and_criterion() {
        let mut s = Stage::new(2, "Domain").unwrap();
        assert!(s.add_dependency(1));
        assert!(!s.add_dependency(1)); // idempotent
        s.add_criterion("Unit test coverage above 80%");
        assert_eq!(s.depends_on, vec![1]);
        assert_eq!(s.criteria.len(), 1);
    }

    #[test]
    fn yaml_defaults_for_missing_fields() {
        let yaml = "id: 1\nname: Infra\n";
        let s: Stage = serde_yaml::from_str(yaml).unwrap();
        assert!(s.depends_on.is_empty());
        assert!(s.criteria.is_empty());
        s.check_input().unwrap();
    }

    #[test]
    fn deserialized_zero_id_caught_by_check_input() {
        let yaml = "id: 0\nname: Infra\n";
        let s: Stage = serde_yaml::from_str(yaml).unwrap();
        assert!(s.check_input().is_err());
    }
}
