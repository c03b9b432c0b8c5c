//! CRUD action parsed from the inbound `action` string.

use crate::error::AppError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Payload keys this action accepts on top of its configured fields.
    pub fn reserved_fields(&self) -> &'static [&'static str] {
        match self {
            Action::Create => &["component"],
            Action::Read => &["component", "sort", "limit"],
            Action::Update | Action::Delete => &["component", "id"],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(AppError::UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions_case_insensitively() {
        assert_eq!("read".parse::<Action>().unwrap(), Action::Read);
        assert_eq!(" Update ".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("DELETE".parse::<Action>().unwrap(), Action::Delete);
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_an_error() {
        let err = "upsert".parse::<Action>().unwrap_err();
        assert!(matches!(err, AppError::UnknownAction(ref name) if name == "upsert"));
        assert!(err.to_string().contains("invalid action 'upsert'"));
    }

    #[test]
    fn only_read_reserves_sort_and_limit() {
        assert!(Action::Read.reserved_fields().contains(&"sort"));
        assert!(Action::Read.reserved_fields().contains(&"limit"));
        assert!(!Action::Create.reserved_fields().contains(&"sort"));
        assert!(Action::Delete.reserved_fields().contains(&"id"));
        assert!(!Action::Create.reserved_fields().contains(&"id"));
    }
}
