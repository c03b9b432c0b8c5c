//! Raw rule-table types matching the JSON config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule for one action as written in the config file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionRuleConfig {
    /// Required value of the payload's `component` field. When absent any tag is accepted, but the field must still be present.
    #[serde(default)]
    pub component: Option<String>,
    /// Data fields the payload may carry. Reserved keys (`component`, `sort`, `limit`, `id`) are implied per action.
    #[serde(default)]
    pub allowed_fields: Vec<String>,
}

/// Whole rule table, keyed by action name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub actions: BTreeMap<String, ActionRuleConfig>,
}
