// src/mcp/tools/work_packages.rs
// Work package tools: list, create, link, delete

use super::to_pretty_json;
use crate::client::{OpenProjectApi, RELATION_FOLLOWS};
use serde_json::json;
use tracing::info;

/// List the work packages of a project
pub async fn list_work_packages(
    api: &impl OpenProjectApi,
    project_id: &str,
) -> Result<String, String> {
    info!("listing work packages for project {}", project_id);
    let work_packages = api
        .list_work_packages(project_id)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&work_packages)
}

/// Create a single work package with the default type
pub async fn create_work_package(
    api: &impl OpenProjectApi,
    project_id: &str,
    subject: &str,
    start_date: Option<&str>,
    due_date: Option<&str>,
    description: Option<&str>,
) -> Result<String, String> {
    info!("creating work package '{}' in project {}", subject, project_id);
    let work_package = api
        .create_work_package(project_id, subject, start_date, due_date, description, None)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&work_package)
}

/// Create a `follows` relation: the successor waits for the predecessor
pub async fn create_dependency(
    api: &impl OpenProjectApi,
    successor_id: i64,
    predecessor_id: i64,
) -> Result<String, String> {
    info!("creating dependency: {} follows {}", successor_id, predecessor_id);
    let relation = api
        .create_relation(successor_id, predecessor_id, RELATION_FOLLOWS)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&relation)
}

/// Delete a work package by id
pub async fn delete_work_package(
    api: &impl OpenProjectApi,
    work_package_id: i64,
) -> Result<String, String> {
    info!("deleting work package {}", work_package_id);
    api.delete_work_package(work_package_id)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&json!({ "success": true, "deleted": work_package_id }))
}
