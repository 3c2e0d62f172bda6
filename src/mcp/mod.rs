// src/mcp/mod.rs
// MCP server: OpenProject tools over stdio

pub mod tools;

use crate::client::OpenProjectClient;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::sync::Arc;

/// MCP server state
#[derive(Clone)]
pub struct OpenProjectServer {
    pub client: Arc<OpenProjectClient>,
    tool_router: ToolRouter<Self>,
}

impl OpenProjectServer {
    pub fn new(client: Arc<OpenProjectClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// Request types for tools with parameters

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProjectRequest {
    #[schemars(description = "Project identifier (slug) or numeric ID")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateProjectRequest {
    #[schemars(description = "Display name of the project")]
    pub name: String,
    #[schemars(
        description = "URL-friendly identifier (slug), e.g. 'my-project'. Lowercase, hyphens allowed, no spaces."
    )]
    pub identifier: String,
    #[schemars(description = "Optional description of the project")]
    pub description: Option<String>,
    #[schemars(description = "Optional parent project identifier or numeric ID for sub-projects")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListWorkPackagesRequest {
    #[schemars(description = "Project identifier (slug) or numeric ID")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateWorkPackageRequest {
    #[schemars(description = "Project identifier (slug) or numeric ID")]
    pub project_id: String,
    #[schemars(description = "Title/subject of the work package")]
    pub subject: String,
    #[schemars(description = "Start date in YYYY-MM-DD format, e.g. 2025-02-15")]
    pub start_date: Option<String>,
    #[schemars(description = "Due date in YYYY-MM-DD format, e.g. 2025-02-20")]
    pub due_date: Option<String>,
    #[schemars(description = "Optional description of the task")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateDependencyRequest {
    #[schemars(description = "ID of the successor work package (the one that waits)")]
    pub successor_id: i64,
    #[schemars(
        description = "ID of the predecessor work package (the one that must complete first)"
    )]
    pub predecessor_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateProjectPlanRequest {
    #[schemars(description = "Project identifier (slug) or numeric ID")]
    pub project_id: String,
    #[schemars(
        description = "JSON array of tasks, e.g.: [{\"subject\":\"Design\",\"startDate\":\"2025-02-01\",\"dueDate\":\"2025-02-05\"},{\"subject\":\"Development\",\"startDate\":\"2025-02-06\",\"dueDate\":\"2025-02-15\",\"dependsOn\":[0]}]"
    )]
    pub tasks: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteWorkPackageRequest {
    #[schemars(description = "ID of the work package to delete")]
    pub work_package_id: i64,
}

#[tool_router]
impl OpenProjectServer {
    #[tool(
        description = "List all accessible projects in OpenProject. Returns project names, identifiers, and IDs."
    )]
    async fn list_projects(&self) -> Result<String, String> {
        tools::projects::list_projects(self.client.as_ref()).await
    }

    #[tool(description = "Get a single OpenProject project by its identifier or numeric ID.")]
    async fn get_project(
        &self,
        Parameters(req): Parameters<GetProjectRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project(self.client.as_ref(), &req.project_id).await
    }

    #[tool(
        description = "Create a new project in OpenProject. Returns the created project with its ID and identifier."
    )]
    async fn create_project(
        &self,
        Parameters(req): Parameters<CreateProjectRequest>,
    ) -> Result<String, String> {
        tools::projects::create_project(
            self.client.as_ref(),
            &req.name,
            &req.identifier,
            req.description.as_deref(),
            req.parent_id.as_deref(),
        )
        .await
    }

    #[tool(
        description = "List all work packages (tasks) in an OpenProject project. Returns IDs, subjects, dates, and status for Gantt chart planning."
    )]
    async fn list_work_packages(
        &self,
        Parameters(req): Parameters<ListWorkPackagesRequest>,
    ) -> Result<String, String> {
        tools::work_packages::list_work_packages(self.client.as_ref(), &req.project_id).await
    }

    #[tool(
        description = "Create a new work package (task) in an OpenProject project. Use this to add tasks to a Gantt chart. Returns the created work package with its ID."
    )]
    async fn create_work_package(
        &self,
        Parameters(req): Parameters<CreateWorkPackageRequest>,
    ) -> Result<String, String> {
        tools::work_packages::create_work_package(
            self.client.as_ref(),
            &req.project_id,
            &req.subject,
            req.start_date.as_deref(),
            req.due_date.as_deref(),
            req.description.as_deref(),
        )
        .await
    }

    #[tool(
        description = "Create a dependency (relation) between two work packages for Gantt scheduling. Uses the 'follows' type: the successor waits for the predecessor to complete. For example: 'Testing follows Development' means Testing starts after Development ends."
    )]
    async fn create_dependency(
        &self,
        Parameters(req): Parameters<CreateDependencyRequest>,
    ) -> Result<String, String> {
        tools::work_packages::create_dependency(
            self.client.as_ref(),
            req.successor_id,
            req.predecessor_id,
        )
        .await
    }

    #[tool(
        description = "Create a complete project plan with multiple tasks and dependencies in one call. Provide a JSON array of tasks; each task needs subject, startDate, dueDate, and optionally dependsOn (array of task indices)."
    )]
    async fn create_project_plan(
        &self,
        Parameters(req): Parameters<CreateProjectPlanRequest>,
    ) -> Result<String, String> {
        tools::plan::create_project_plan(self.client.as_ref(), &req.project_id, &req.tasks).await
    }

    #[tool(description = "Delete a work package by its ID")]
    async fn delete_work_package(
        &self,
        Parameters(req): Parameters<DeleteWorkPackageRequest>,
    ) -> Result<String, String> {
        tools::work_packages::delete_work_package(self.client.as_ref(), req.work_package_id).await
    }
}

#[tool_handler]
impl ServerHandler for OpenProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "openproject-mcp".into(),
                title: Some("OpenProject work package and Gantt planning tools".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for managing OpenProject projects, work packages, and Gantt dependencies."
                    .into(),
            ),
        }
    }
}
