// src/mcp/tools/projects.rs
// Project tools: list, get, create

use super::to_pretty_json;
use crate::client::OpenProjectApi;
use tracing::info;

/// List all projects visible to the API user
pub async fn list_projects(api: &impl OpenProjectApi) -> Result<String, String> {
    info!("listing all projects");
    let projects = api.list_projects().await.map_err(|e| e.to_string())?;
    to_pretty_json(&projects)
}

/// Fetch one project by slug or numeric id
pub async fn get_project(api: &impl OpenProjectApi, project_id: &str) -> Result<String, String> {
    info!("fetching project {}", project_id);
    let project = api.get_project(project_id).await.map_err(|e| e.to_string())?;
    to_pretty_json(&project)
}

/// Create a project, optionally nested under a parent
pub async fn create_project(
    api: &impl OpenProjectApi,
    name: &str,
    identifier: &str,
    description: Option<&str>,
    parent_id: Option<&str>,
) -> Result<String, String> {
    info!("creating project '{}' ({})", name, identifier);
    let project = api
        .create_project(name, identifier, description, parent_id)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&project)
}
