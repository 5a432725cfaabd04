use std::env;

use crate::error::AppError;
use crate::permissions::{PolicyTable, TaskEditRule};

const DEFAULT_PUBLIC_PATHS: &str = "/health,/api/auth/login,/api/auth/registration";

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub task_update_rule: TaskEditRule,
    pub task_delete_rule: TaskEditRule,
    /// Path prefixes that may be requested without an identity.
    pub public_paths: Vec<String>,
    /// Only needed by the Postgres snapshot loader.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            task_update_rule: rule_from_env("KANBAN_TASK_UPDATE_RULE")?,
            task_delete_rule: rule_from_env("KANBAN_TASK_DELETE_RULE")?,
            public_paths: parse_paths(
                &env::var("KANBAN_PUBLIC_PATHS").unwrap_or_else(|_| DEFAULT_PUBLIC_PATHS.to_string()),
            ),
            database_url: env::var("DATABASE_URL").ok(),
        })
    }

    pub fn policy_table(&self) -> PolicyTable {
        PolicyTable::with_task_rules(self.task_update_rule, self.task_delete_rule)
    }

    pub fn database_url(&self) -> Result<&str, AppError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::ConfigError("DATABASE_URL must be set".into()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_update_rule: TaskEditRule::default(),
            task_delete_rule: TaskEditRule::default(),
            public_paths: parse_paths(DEFAULT_PUBLIC_PATHS),
            database_url: None,
        }
    }
}

fn rule_from_env(key: &str) -> Result<TaskEditRule, AppError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e: AppError| AppError::ConfigError(format!("{}: {}", key, e))),
        Err(_) => Ok(TaskEditRule::default()),
    }
}

fn parse_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const KEYS: [&str; 4] = [
        "KANBAN_TASK_UPDATE_RULE",
        "KANBAN_TASK_DELETE_RULE",
        "KANBAN_PUBLIC_PATHS",
        "DATABASE_URL",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.task_update_rule, TaskEditRule::Owner);
        assert_eq!(config.task_delete_rule, TaskEditRule::Owner);
        assert_eq!(
            config.public_paths,
            vec!["/health", "/api/auth/login", "/api/auth/registration"]
        );
        assert!(config.database_url().is_err());
        assert_eq!(config.policy_table(), PolicyTable::canonical());
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("KANBAN_TASK_UPDATE_RULE", "owner_or_assignee");
        env::set_var("KANBAN_PUBLIC_PATHS", " /health , ,/docs");
        env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.task_update_rule, TaskEditRule::OwnerOrAssignee);
        assert_eq!(config.task_delete_rule, TaskEditRule::Owner);
        assert_eq!(config.public_paths, vec!["/health", "/docs"]);
        assert_eq!(config.database_url().unwrap(), "postgres://test");

        clear_env();
    }

    #[test]
    fn test_invalid_rule_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("KANBAN_TASK_DELETE_RULE", "anyone");

        match Config::from_env() {
            Err(AppError::ConfigError(msg)) => assert!(msg.contains("KANBAN_TASK_DELETE_RULE")),
            other => panic!("expected ConfigError, got {:?}", other),
        }

        clear_env();
    }
}
