// src/client.rs
// Thin client over the OpenProject v3 REST API
//
// One call is one round trip: no retries, no caching, no cross-call state.
// Request bodies are structured serde_json documents, so string escaping is
// handled by the serializer rather than by hand.

use crate::config::OpenProjectConfig;
use crate::error::{ApiError, Result};
use crate::models::{Collection, Project, Relation, WorkPackage};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error};

/// Relation type asserting that `from` starts after `to` completes
pub const RELATION_FOLLOWS: &str = "follows";

/// Remote operations the tool layer and the plan builder depend on.
///
/// Implemented by [`OpenProjectClient`]; tests substitute a scripted mock.
#[async_trait]
pub trait OpenProjectApi: Send + Sync {
    /// List all projects accessible to the API user, in service order
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Get a single project by slug or numeric id
    async fn get_project(&self, project_id: &str) -> Result<Project>;

    /// Create a project; `parent_id` nests it under an existing project
    async fn create_project(
        &self,
        name: &str,
        identifier: &str,
        description: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Project>;

    /// List all work packages in a project, in service order
    async fn list_work_packages(&self, project_id: &str) -> Result<Vec<WorkPackage>>;

    /// Create a work package; `type_id` falls back to the configured default
    async fn create_work_package(
        &self,
        project_id: &str,
        subject: &str,
        start_date: Option<&str>,
        due_date: Option<&str>,
        description: Option<&str>,
        type_id: Option<i64>,
    ) -> Result<WorkPackage>;

    /// Create a relation owned by `from_id`. For `follows`, `from_id` is the
    /// successor and `to_id` the predecessor.
    async fn create_relation(
        &self,
        from_id: i64,
        to_id: i64,
        relation_type: &str,
    ) -> Result<Relation>;

    /// Delete a work package; success is the service answering 2xx
    async fn delete_work_package(&self, work_package_id: i64) -> Result<()>;
}

/// reqwest-backed client holding the shared HTTP client and connection settings
pub struct OpenProjectClient {
    http: reqwest::Client,
    api_root: String,
    api_key: String,
    default_type_id: i64,
}

impl OpenProjectClient {
    pub fn new(config: &OpenProjectConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_root: config.api_root(),
            api_key: config.api_key.clone().unwrap_or_default(),
            default_type_id: config.default_type_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// GET a path and return the raw body of a successful response
    async fn get_text(&self, path: &str, context: &str) -> Result<String> {
        let response = self
            .http
            .get(self.url(path))
            .basic_auth("apikey", Some(&self.api_key))
            .send()
            .await?;
        read_success(response, context).await
    }

    /// POST a JSON body and return the raw body of a successful response
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        context: &str,
    ) -> Result<String> {
        debug!("{}: POST {} body {}", context, path, body);
        let response = self
            .http
            .post(self.url(path))
            .basic_auth("apikey", Some(&self.api_key))
            .json(body)
            .send()
            .await?;
        read_success(response, context).await
    }
}

/// Check the status, capturing the raw error body on non-2xx
async fn read_success(response: reqwest::Response, context: &str) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        error!("{}: {} - {}", context, status, body);
        return Err(ApiError::Request {
            context: context.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Decode a single resource from a successful response body
fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("{}: undecodable response: {}", context, e);
        ApiError::Decode {
            context: context.to_string(),
            detail: e.to_string(),
        }
    })
}

/// Unwrap a collection envelope, decoding each element independently
fn decode_elements<T: DeserializeOwned>(body: &str, context: &str) -> Result<Vec<T>> {
    let collection: Collection<serde_json::Value> = decode(body, context)?;
    let mut items = Vec::with_capacity(collection.embedded.elements.len());
    for element in collection.embedded.elements {
        items.push(serde_json::from_value(element).map_err(|e| {
            error!("{}: undecodable element: {}", context, e);
            ApiError::Decode {
                context: context.to_string(),
                detail: e.to_string(),
            }
        })?);
    }
    Ok(items)
}

/// Request body for `POST /projects`
fn project_payload(
    name: &str,
    identifier: &str,
    description: Option<&str>,
    parent_id: Option<&str>,
) -> serde_json::Value {
    let mut body = json!({
        "name": name,
        "identifier": identifier,
    });
    if let Some(description) = description {
        body["description"] = json!({ "raw": description });
    }
    if let Some(parent_id) = parent_id {
        body["_links"] = json!({
            "parent": { "href": format!("/api/v3/projects/{parent_id}") }
        });
    }
    body
}

/// Request body for `POST /projects/{id}/work_packages`.
///
/// Absent dates serialize as `null`, an absent description as an empty raw
/// string, and `scheduleManually` is always set so the service never
/// reschedules what this system creates.
fn work_package_payload(
    subject: &str,
    start_date: Option<&str>,
    due_date: Option<&str>,
    description: Option<&str>,
    type_id: i64,
) -> serde_json::Value {
    json!({
        "subject": subject,
        "description": { "raw": description.unwrap_or("") },
        "startDate": start_date,
        "dueDate": due_date,
        "scheduleManually": true,
        "_links": {
            "type": { "href": format!("/api/v3/types/{type_id}") }
        }
    })
}

/// Request body for `POST /work_packages/{from}/relations`
fn relation_payload(from_id: i64, to_id: i64, relation_type: &str) -> serde_json::Value {
    json!({
        "type": relation_type,
        "_links": {
            "from": { "href": format!("/api/v3/work_packages/{from_id}") },
            "to": { "href": format!("/api/v3/work_packages/{to_id}") }
        }
    })
}

#[async_trait]
impl OpenProjectApi for OpenProjectClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let context = "list projects";
        let body = self.get_text("/projects", context).await?;
        decode_elements(&body, context)
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        let context = format!("get project {project_id}");
        let body = self
            .get_text(&format!("/projects/{project_id}"), &context)
            .await?;
        decode(&body, &context)
    }

    async fn create_project(
        &self,
        name: &str,
        identifier: &str,
        description: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Project> {
        let context = format!("create project '{name}'");
        let payload = project_payload(name, identifier, description, parent_id);
        let body = self.post_json("/projects", &payload, &context).await?;
        decode(&body, &context)
    }

    async fn list_work_packages(&self, project_id: &str) -> Result<Vec<WorkPackage>> {
        let context = format!("list work packages for project {project_id}");
        let body = self
            .get_text(&format!("/projects/{project_id}/work_packages"), &context)
            .await?;
        decode_elements(&body, &context)
    }

    async fn create_work_package(
        &self,
        project_id: &str,
        subject: &str,
        start_date: Option<&str>,
        due_date: Option<&str>,
        description: Option<&str>,
        type_id: Option<i64>,
    ) -> Result<WorkPackage> {
        let context = format!("create work package '{subject}' in project {project_id}");
        let payload = work_package_payload(
            subject,
            start_date,
            due_date,
            description,
            type_id.unwrap_or(self.default_type_id),
        );
        let body = self
            .post_json(
                &format!("/projects/{project_id}/work_packages"),
                &payload,
                &context,
            )
            .await?;
        decode(&body, &context)
    }

    async fn create_relation(
        &self,
        from_id: i64,
        to_id: i64,
        relation_type: &str,
    ) -> Result<Relation> {
        let context = format!("create relation from {from_id} to {to_id}");
        let payload = relation_payload(from_id, to_id, relation_type);
        let body = self
            .post_json(
                &format!("/work_packages/{from_id}/relations"),
                &payload,
                &context,
            )
            .await?;
        decode(&body, &context)
    }

    async fn delete_work_package(&self, work_package_id: i64) -> Result<()> {
        let context = format!("delete work package {work_package_id}");
        let response = self
            .http
            .delete(self.url(&format!("/work_packages/{work_package_id}")))
            .basic_auth("apikey", Some(&self.api_key))
            .send()
            .await?;
        read_success(response, &context).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_payload_minimal() {
        let payload = project_payload("My Project", "my-project", None, None);
        assert_eq!(payload["name"], "My Project");
        assert_eq!(payload["identifier"], "my-project");
        assert!(payload.get("description").is_none());
        assert!(payload.get("_links").is_none());
    }

    #[test]
    fn test_project_payload_with_description_and_parent() {
        let payload = project_payload("Sub", "sub", Some("child project"), Some("42"));
        assert_eq!(payload["description"]["raw"], "child project");
        assert_eq!(payload["_links"]["parent"]["href"], "/api/v3/projects/42");
    }

    #[test]
    fn test_project_payload_escapes_special_characters() {
        let description = "line one\nsays \"hi\"\tand \\ more";
        let payload = project_payload("Q\"uote", "quote", Some(description), None);
        let text = serde_json::to_string(&payload).unwrap();

        // The serialized body must survive a parse and keep the value intact
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["description"]["raw"], description);
        assert_eq!(parsed["name"], "Q\"uote");
        assert!(text.contains("\\n"));
        assert!(text.contains("\\\""));
    }

    #[test]
    fn test_work_package_payload_defaults() {
        let payload = work_package_payload("Design", None, None, None, 1);
        assert_eq!(payload["subject"], "Design");
        assert_eq!(payload["description"]["raw"], "");
        assert!(payload["startDate"].is_null());
        assert!(payload["dueDate"].is_null());
        assert_eq!(payload["scheduleManually"], true);
        assert_eq!(payload["_links"]["type"]["href"], "/api/v3/types/1");
    }

    #[test]
    fn test_work_package_payload_with_dates() {
        let payload = work_package_payload(
            "Design",
            Some("2025-02-15"),
            Some("2025-02-20"),
            Some("kickoff"),
            7,
        );
        assert_eq!(payload["startDate"], "2025-02-15");
        assert_eq!(payload["dueDate"], "2025-02-20");
        assert_eq!(payload["description"]["raw"], "kickoff");
        assert_eq!(payload["_links"]["type"]["href"], "/api/v3/types/7");
    }

    #[test]
    fn test_relation_payload_shape() {
        let payload = relation_payload(102, 101, RELATION_FOLLOWS);
        assert_eq!(payload["type"], "follows");
        assert_eq!(
            payload["_links"]["from"]["href"],
            "/api/v3/work_packages/102"
        );
        assert_eq!(payload["_links"]["to"]["href"], "/api/v3/work_packages/101");
    }

    #[test]
    fn test_decode_elements_unwraps_envelope() {
        let body = r#"{"_embedded": {"elements": [{"id": 1}, {"id": 2}]}}"#;
        let projects: Vec<Project> = decode_elements(body, "list projects").unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, Some(1));
    }

    #[test]
    fn test_decode_elements_bad_envelope() {
        let body = r#"{"elements": []}"#;
        let result: Result<Vec<Project>> = decode_elements(body, "list projects");
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn test_decode_single_resource() {
        let body = r#"{"id": 9, "identifier": "nine"}"#;
        let project: Project = decode(body, "get project nine").unwrap();
        assert_eq!(project.id, Some(9));
    }

    #[test]
    fn test_decode_error_carries_context() {
        let result: Result<Project> = decode("not json", "get project x");
        match result {
            Err(ApiError::Decode { context, .. }) => assert_eq!(context, "get project x"),
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }
}
