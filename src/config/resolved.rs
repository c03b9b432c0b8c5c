//! Resolved rule table: config validated and indexed by action for runtime use.

use crate::action::Action;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct ActionRule {
    pub action: Action,
    /// Expected `component` tag; `None` accepts any tag.
    pub component: Option<String>,
    /// Configured data fields plus the reserved keys this action accepts.
    pub allowed_fields: BTreeSet<String>,
}

impl ActionRule {
    pub fn new(action: Action, component: Option<String>, fields: impl IntoIterator<Item = String>) -> Self {
        let mut allowed_fields: BTreeSet<String> = fields.into_iter().collect();
        allowed_fields.extend(action.reserved_fields().iter().map(|f| f.to_string()));
        ActionRule {
            action,
            component,
            allowed_fields,
        }
    }

    pub fn allows(&self, field: &str) -> bool {
        self.allowed_fields.contains(field)
    }
}

/// One rule per action. Built once at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct ResolvedRules {
    pub create: ActionRule,
    pub read: ActionRule,
    pub update: ActionRule,
    pub delete: ActionRule,
}

impl ResolvedRules {
    pub fn rule(&self, action: Action) -> &ActionRule {
        match action {
            Action::Create => &self.create,
            Action::Read => &self.read,
            Action::Update => &self.update,
            Action::Delete => &self.delete,
        }
    }
}
