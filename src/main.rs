//! Prints the effective authorization policy.
//!
//! Reads the same environment the web application does and dumps the
//! role-to-action table as JSON, so operators can check what a given
//! `KANBAN_TASK_*_RULE` setting actually allows.

use kanban_authz::config::Config;
use kanban_authz::error::AppError;
use log::{error, info};
use serde_json::json;

fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    info!(
        "task update rule: {:?}, task delete rule: {:?}",
        config.task_update_rule, config.task_delete_rule
    );

    let output = json!({
        "public_paths": config.public_paths,
        "rules": config.policy_table().rows(),
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| AppError::InternalServerError(format!("Failed to render policy: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
