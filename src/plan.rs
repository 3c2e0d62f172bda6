// src/plan.rs
// Two-phase project-plan builder: create every task, then link dependencies

use crate::client::{OpenProjectApi, RELATION_FOLLOWS};
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One entry of a plan batch.
///
/// `depends_on` holds zero-based positions into the same batch, not work
/// package ids. Indices are signed so out-of-range values (negative included)
/// survive parsing; the builder skips them instead of failing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    pub subject: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<i64>,
}

/// Manifest of a completed plan build
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub success: bool,
    pub tasks_created: usize,
    pub relations_created: usize,
    /// One id per batch position, in batch order
    pub created_identifiers: Vec<i64>,
}

/// Realize a batch of task specs as work packages plus `follows` relations.
///
/// Phase 1 creates every work package in batch order, recording ids by
/// position. Phase 2 then wires up relations; it only starts once every id
/// is known, since a dependency may reference any position in the batch.
///
/// A failure in either phase propagates immediately and nothing already
/// created is rolled back - callers clean up remotely if they need to.
pub async fn build_plan(
    api: &impl OpenProjectApi,
    project_id: &str,
    specs: &[TaskSpec],
) -> Result<PlanSummary> {
    let mut created_ids: Vec<i64> = Vec::with_capacity(specs.len());
    for spec in specs {
        let wp = api
            .create_work_package(
                project_id,
                &spec.subject,
                spec.start_date.as_deref(),
                spec.due_date.as_deref(),
                spec.description.as_deref(),
                None,
            )
            .await?;
        let id = wp.id.ok_or_else(|| ApiError::Decode {
            context: format!(
                "create work package '{}' in project {}",
                spec.subject, project_id
            ),
            detail: "created work package carries no id".to_string(),
        })?;
        info!("created work package '{}' with id {}", spec.subject, id);
        created_ids.push(id);
    }

    let mut relations_created = 0;
    for (position, spec) in specs.iter().enumerate() {
        for &index in &spec.depends_on {
            let Some(&predecessor) = usize::try_from(index)
                .ok()
                .and_then(|i| created_ids.get(i))
            else {
                warn!(
                    "ignoring out-of-range dependency index {} on '{}'",
                    index, spec.subject
                );
                continue;
            };
            let successor = created_ids[position];
            api.create_relation(successor, predecessor, RELATION_FOLLOWS)
                .await?;
            relations_created += 1;
            info!("created dependency: {} follows {}", successor, predecessor);
        }
    }

    Ok(PlanSummary {
        success: true,
        tasks_created: created_ids.len(),
        relations_created,
        created_identifiers: created_ids,
    })
}
