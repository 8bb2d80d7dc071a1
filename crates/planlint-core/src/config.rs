use crate::denylist::{Denylist, DEFAULT_TERMS};
use crate::error::{PlanLintError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".planlint.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DenylistConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DenylistConfig {
    /// Replaces the built-in terms entirely when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Vec<String>>,
    /// Added on top of the built-in (or replaced) terms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extend: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub denylist: DenylistConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            denylist: DenylistConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Err(PlanLintError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like `load`, but an absent config file yields the defaults so
    /// checking works with zero setup.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(PlanLintError::NotInitialized) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// The effective term set: built-ins (or `replace`) plus `extend`.
    pub fn denylist(&self) -> Denylist {
        let base: Vec<String> = match &self.denylist.replace {
            Some(terms) => terms.clone(),
            None => DEFAULT_TERMS.iter().map(|s| s.to_string()).collect(),
        };
        Denylist::new(base.into_iter().chain(self.denylist.extend.iter().cloned()))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("unknown config version {} (expected 1)", self.version),
            });
        }

        let declared: Vec<(&str, &[String])> = [
            ("denylist.replace", self.denylist.replace.as_deref()),
            ("denylist.extend", Some(self.denylist.extend.as_slice())),
        ]
        .into_iter()
        .filter_map(|(field, terms)| terms.map(|t| (field, t)))
        .collect();

        for (field, terms) in &declared {
            for term in *terms {
                if term.trim().is_empty() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("{field} contains an empty term"),
                    });
                }
            }
        }

        if matches!(&self.denylist.replace, Some(terms) if terms.iter().all(|t| t.trim().is_empty()))
        {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "denylist.replace is empty — vague-criteria checking is disabled"
                    .to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for (field, terms) in &declared {
            for term in *terms {
                let normalized = term.trim().to_lowercase();
                if !normalized.is_empty() && !seen.insert(normalized) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("{field}: term '{}' appears more than once", term.trim()),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
