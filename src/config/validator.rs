//! Rule-table validation: every action covered once, field names are identifiers.

use crate::action::Action;
use crate::config::RulesConfig;
use crate::error::ConfigError;
use crate::ident::is_identifier;
use std::collections::HashSet;

pub fn validate(config: &RulesConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for (name, rule) in &config.actions {
        let action: Action = name
            .parse()
            .map_err(|_| ConfigError::UnknownAction(name.clone()))?;
        if !seen.insert(action) {
            return Err(ConfigError::Validation(format!(
                "action '{}' is listed more than once",
                action
            )));
        }

        if let Some(component) = &rule.component {
            if component.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "component tag for action '{}' must not be blank",
                    action
                )));
            }
        }

        for field in &rule.allowed_fields {
            if !is_identifier(field) {
                return Err(ConfigError::InvalidField {
                    action: action.as_str(),
                    field: field.clone(),
                });
            }
        }
    }

    for action in Action::ALL {
        if !seen.contains(&action) {
            return Err(ConfigError::MissingRule(action.as_str()));
        }
    }

    Ok(())
}
