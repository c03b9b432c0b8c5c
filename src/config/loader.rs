//! Load the rule table from JSON (file or built-in default) and resolve it.

use crate::action::Action;
use crate::config::resolved::{ActionRule, ResolvedRules};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::Path;

const DEFAULT_RULES_JSON: &str = include_str!("../../config/default_rules.json");

/// Build resolved rules from config (validates first).
pub fn resolve(config: &RulesConfig) -> Result<ResolvedRules, ConfigError> {
    validate(config)?;
    let rule_for = |action: Action| -> Result<ActionRule, ConfigError> {
        let raw = config
            .actions
            .iter()
            .find(|(name, _)| name.parse::<Action>().ok() == Some(action))
            .map(|(_, rule)| rule)
            .ok_or(ConfigError::MissingRule(action.as_str()))?;
        Ok(ActionRule::new(
            action,
            raw.component.as_ref().map(|c| c.trim().to_string()),
            raw.allowed_fields.iter().cloned(),
        ))
    };
    Ok(ResolvedRules {
        create: rule_for(Action::Create)?,
        read: rule_for(Action::Read)?,
        update: rule_for(Action::Update)?,
        delete: rule_for(Action::Delete)?,
    })
}

pub fn parse_rules(json: &str) -> Result<RulesConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(format!("rule table: {}", e)))
}

/// Rule table compiled into the binary from `config/default_rules.json`.
pub fn default_rules() -> Result<ResolvedRules, ConfigError> {
    resolve(&parse_rules(DEFAULT_RULES_JSON)?)
}

pub async fn load_rules_from_path(path: &Path) -> Result<ResolvedRules, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let rules = resolve(&parse_rules(&raw)?)?;
    tracing::info!(path = %path.display(), "loaded rule table");
    Ok(rules)
}

/// Rules from `path` when given, else the built-in default.
pub async fn load_rules(path: Option<&Path>) -> Result<ResolvedRules, ConfigError> {
    match path {
        Some(p) => load_rules_from_path(p).await,
        None => {
            tracing::info!("using built-in rule table");
            default_rules()
        }
    }
}
