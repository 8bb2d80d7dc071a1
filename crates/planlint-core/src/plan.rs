use crate::error::{PlanLintError, Result};
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// First stage declaring `id`, if any.
    pub fn stage(&self, id: u32) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let plan: Plan = serde_yaml::from_str(data)?;
        plan.check_input()?;
        Ok(plan)
    }

    /// Read a plan document from disk. `.yaml`/`.yml` files are parsed as
    /// the structured form; anything else is treated as markdown.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PlanLintError::PlanNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&data),
            _ => crate::markdown::parse_plan(&data),
        }
    }

    fn check_input(&self) -> Result<()> {
        for stage in &self.stages {
            stage.check_input()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
