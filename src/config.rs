//! Planner configuration.
//!
//! Loaded from YAML, e.g.:
//!
//! ```yaml
//! collaborators:
//!   - id: BRUNO
//!     daily_capacity_hours: 3.5
//!   - id: CLAIRE
//!     daily_capacity_hours: 7
//! urgency_override_hours: 24
//! weekdays_only: true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Collaborator, CollaboratorRegistry};
use crate::scheduler::{DEFAULT_URGENCY_WINDOW_HOURS, MAX_URGENCY_WINDOW_HOURS};
use crate::validation::validate_roster;

/// Planner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Collaborator roster, in display order.
    pub collaborators: Vec<Collaborator>,

    /// Hours before the due date during which urgent tasks bypass capacity.
    pub urgency_override_hours: i64,

    /// Restrict automatic placement to Monday..Friday.
    pub weekdays_only: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            collaborators: Vec::new(),
            urgency_override_hours: DEFAULT_URGENCY_WINDOW_HOURS,
            weekdays_only: true,
        }
    }
}

impl PlannerConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(content: &str) -> PlannerResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Loads a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            collaborators = config.collaborators.len(),
            "Loaded planner config"
        );
        Ok(config)
    }

    /// Adds a collaborator.
    pub fn with_collaborator(mut self, id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        self.collaborators
            .push(Collaborator::new(id, daily_capacity_hours));
        self
    }

    /// Sets the urgency override window.
    pub fn with_urgency_override_hours(mut self, hours: i64) -> Self {
        self.urgency_override_hours = hours;
        self
    }

    /// Builds the collaborator registry.
    pub fn registry(&self) -> CollaboratorRegistry {
        CollaboratorRegistry::new(self.collaborators.clone())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.collaborators.is_empty() {
            return Err(PlannerError::InvalidConfig(
                "at least one collaborator is required".into(),
            ));
        }
        if !(0..=MAX_URGENCY_WINDOW_HOURS).contains(&self.urgency_override_hours) {
            return Err(PlannerError::InvalidConfig(format!(
                "urgency_override_hours must be in 0..={MAX_URGENCY_WINDOW_HOURS}, got {}",
                self.urgency_override_hours
            )));
        }
        validate_roster(&self.registry()).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            PlannerError::InvalidConfig(messages.join("; "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
collaborators:
  - id: BRUNO
    daily_capacity_hours: 3.5
  - id: CLAIRE
    daily_capacity_hours: 7
urgency_override_hours: 48
"#;

    #[test]
    fn test_parse_yaml() {
        let config = PlannerConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.collaborators.len(), 2);
        assert_eq!(config.collaborators[0].id, "BRUNO");
        assert!((config.collaborators[1].daily_capacity_hours - 7.0).abs() < 1e-10);
        assert_eq!(config.urgency_override_hours, 48);
        // Defaulted
        assert!(config.weekdays_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.urgency_override_hours, 24);
        assert!(config.weekdays_only);
        assert!(matches!(config.validate(), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = PlannerConfig::from_yaml_str("collaborators: [oops").unwrap_err();
        assert!(matches!(err, PlannerError::ConfigParse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_roster() {
        let config = PlannerConfig::default()
            .with_collaborator("BRUNO", 3.5)
            .with_collaborator("BRUNO", 0.0);
        match config.validate() {
            Err(PlannerError::InvalidConfig(msg)) => {
                assert!(msg.contains("Duplicate collaborator ID"));
                assert!(msg.contains("invalid daily capacity"));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_window() {
        let config = PlannerConfig::default()
            .with_collaborator("BRUNO", 3.5)
            .with_urgency_override_hours(-1);
        assert!(matches!(config.validate(), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_window() {
        let config = PlannerConfig::from_yaml_str(
            "collaborators:\n  - id: BRUNO\n    daily_capacity_hours: 3.5\nurgency_override_hours: 9223372036854775807\n",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(PlannerError::InvalidConfig(_))));
        assert!(matches!(
            crate::Planner::from_config(&config),
            Err(PlannerError::InvalidConfig(_))
        ));

        let at_limit = PlannerConfig::default()
            .with_collaborator("BRUNO", 3.5)
            .with_urgency_override_hours(MAX_URGENCY_WINDOW_HOURS);
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlannerConfig::load("/nonexistent/planner.yml").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
