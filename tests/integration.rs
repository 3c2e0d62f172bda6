//! Integration tests for the OpenProject MCP tools
//!
//! Tool functions are exercised end-to-end against the scripted in-memory
//! API from `test_utils`; no network is involved.


use openproject_mcp::mcp::tools::{plan, projects, work_packages};
use test_utils::RecordingApi;

#[tokio::test]
async fn test_list_projects_pretty_output() {
    let api = RecordingApi::new().with_project(1, "test-project", "Test Project");

    let result = projects::list_projects(&api).await.unwrap();

    assert!(result.contains("test-project"));
    assert!(result.contains("Test Project"));
    // Pretty-printed, not a single line
    assert!(result.contains('\n'));
}

#[tokio::test]
async fn test_get_project_found_and_missing() {
    let api = RecordingApi::new().with_project(1, "alpha", "Alpha");

    let found = projects::get_project(&api, "alpha").await.unwrap();
    assert!(found.contains("Alpha"));

    let missing = projects::get_project(&api, "beta").await;
    let message = missing.unwrap_err();
    assert!(message.contains("get project beta"));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn test_create_project_tool() {
    let api = RecordingApi::new();

    let result = projects::create_project(&api, "My Project", "my-project", Some("desc"), None)
        .await
        .unwrap();

    assert!(result.contains("my-project"));
    assert!(result.contains("My Project"));
    assert_eq!(api.projects.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_work_package_dates_round_trip() {
    let api = RecordingApi::new();

    let created = work_packages::create_work_package(
        &api,
        "my-project",
        "X",
        Some("2025-02-15"),
        Some("2025-02-20"),
        None,
    )
    .await
    .unwrap();
    assert!(created.contains("2025-02-15"));

    // Reading back reports the same subject and dates verbatim
    let listed = work_packages::list_work_packages(&api, "my-project")
        .await
        .unwrap();
    assert!(listed.contains("\"X\""));
    assert!(listed.contains("2025-02-15"));
    assert!(listed.contains("2025-02-20"));
}

#[tokio::test]
async fn test_create_dependency_argument_order() {
    let api = RecordingApi::new();

    let result = work_packages::create_dependency(&api, 102, 101).await.unwrap();

    assert!(result.contains("follows"));
    let pairs = api.relation_pairs.lock().unwrap();
    // Successor is the relation owner (from), predecessor is to
    assert_eq!(*pairs, vec![(102, 101, "follows".to_string())]);
}

#[tokio::test]
async fn test_delete_work_package_success_payload() {
    let api = RecordingApi::new();

    let result = work_packages::delete_work_package(&api, 42).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["deleted"], 42);
    assert_eq!(*api.deleted.lock().unwrap(), vec![42]);
}

#[tokio::test]
async fn test_delete_missing_work_package_surfaces_status() {
    let api = RecordingApi::new();
    *api.fail_delete_with.lock().unwrap() =
        Some((404, "{\"message\":\"not found\"}".to_string()));

    let result = work_packages::delete_work_package(&api, 999).await;

    let message = result.unwrap_err();
    assert!(message.contains("delete work package 999"));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn test_project_plan_end_to_end() {
    let api = RecordingApi::new();
    let tasks = r#"[
        {"subject": "Design"},
        {"subject": "Development", "dependsOn": [0]},
        {"subject": "Testing", "dependsOn": [1]}
    ]"#;

    let result = plan::create_project_plan(&api, "my-project", tasks)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["tasksCreated"], 3);
    assert_eq!(value["relationsCreated"], 2);
    assert_eq!(value["createdIdentifiers"].as_array().unwrap().len(), 3);

    // Development follows Design, Testing follows Development
    let pairs = api.relation_pairs.lock().unwrap();
    assert_eq!(
        *pairs,
        vec![
            (101, 100, "follows".to_string()),
            (102, 101, "follows".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_project_plan_malformed_batch_is_a_result_not_an_error() {
    let api = RecordingApi::new();

    let result = plan::create_project_plan(&api, "my-project", "not a json array").await;

    // The tool answers, it does not fail
    let payload = result.unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("invalid tasks JSON"));

    // Nothing was created remotely
    assert!(api.work_packages.lock().unwrap().is_empty());
    assert!(api.relations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_project_plan_out_of_range_dependency_ignored() {
    let api = RecordingApi::new();
    let tasks = r#"[
        {"subject": "Solo", "dependsOn": [7, -2]}
    ]"#;

    let result = plan::create_project_plan(&api, "my-project", tasks)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["tasksCreated"], 1);
    assert_eq!(value["relationsCreated"], 0);
}
