//! View-model configuration.
//!
//! Loaded from TOML by the embedding application, or built with `Default`.

use std::str::FromStr;

use serde::Deserialize;

use crate::types::{TodoQuery, TodoStatus};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewModelConfig {
    /// Base URL of the remote todo API.
    pub base_url: String,

    /// Statuses sent as the fetch filter. The server filters on them.
    pub fetch_statuses: Vec<TodoStatus>,

    /// Re-run `load` from the last fetch result whenever the tab changes.
    pub reload_on_tab_change: bool,

    /// Mark the snapshot stale after each confirmed toggle so the host
    /// refetches.
    pub refetch_after_toggle: bool,
}

impl Default for ViewModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_statuses: TodoStatus::ALL.to_vec(),
            reload_on_tab_change: false,
            refetch_after_toggle: false,
        }
    }
}

impl ViewModelConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn fetch_query(&self) -> TodoQuery {
        TodoQuery {
            statuses: self.fetch_statuses.clone(),
        }
    }
}

impl FromStr for ViewModelConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: ViewModelConfig = "".parse().unwrap();
        assert_eq!(config, ViewModelConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let config: ViewModelConfig = r#"
            base_url = "http://todo.internal:8080"
            fetch_statuses = ["pending"]
            reload_on_tab_change = true
        "#
        .parse()
        .unwrap();
        assert_eq!(config.base_url, "http://todo.internal:8080");
        assert_eq!(config.fetch_statuses, vec![TodoStatus::Pending]);
        assert!(config.reload_on_tab_change);
        assert!(!config.refetch_after_toggle);
    }

    #[test]
    fn unknown_status_in_toml_is_an_error() {
        let result: Result<ViewModelConfig, _> = r#"fetch_statuses = ["archived"]"#.parse();
        assert!(result.is_err());
    }
}
