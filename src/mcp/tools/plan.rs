// src/mcp/tools/plan.rs
// Composite tool: create a full plan of tasks plus follow relations

use super::to_pretty_json;
use crate::client::OpenProjectApi;
use crate::plan::{TaskSpec, build_plan};
use serde_json::json;
use tracing::{info, warn};

/// Create a batch of work packages and their dependency relations.
///
/// `tasks_json` comes straight from the caller. A batch that does not parse
/// into a list of task specs is reported as a `{"success": false}` payload
/// rather than a tool error: the caller needs a result value at this
/// boundary, not a fault. Remote failures during the build still propagate.
pub async fn create_project_plan(
    api: &impl OpenProjectApi,
    project_id: &str,
    tasks_json: &str,
) -> Result<String, String> {
    info!("creating project plan in project {}", project_id);

    let specs: Vec<TaskSpec> = match serde_json::from_str(tasks_json) {
        Ok(specs) => specs,
        Err(e) => {
            warn!("rejecting malformed task batch: {}", e);
            return to_pretty_json(&json!({
                "success": false,
                "error": format!("invalid tasks JSON: {e}"),
            }));
        }
    };

    let summary = build_plan(api, project_id, &specs)
        .await
        .map_err(|e| e.to_string())?;
    to_pretty_json(&summary)
}
