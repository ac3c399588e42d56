// HTTP-level tests for the API gateway against a mock server.
use mockito::{Matcher, Server};
use taskdeck::client::{ApiClient, ApiError};
use taskdeck::model::NewTask;

#[tokio::test]
async fn error_body_text_becomes_the_error_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/task")
        .with_status(500)
        .with_body("database unavailable")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client.fetch_tasks(&[]).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_a_generic_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/task")
        .with_status(500)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client.fetch_tasks(&[]).await.unwrap_err();
    let message = err.to_string();
    assert!(
        message.starts_with("HTTP 500 for "),
        "unexpected message: {}",
        message
    );
}

#[tokio::test]
async fn empty_success_body_decodes_to_the_default() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/task")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let tasks = client.fetch_tasks(&[]).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn fetch_tasks_sends_the_query_parameters() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/task")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".to_string(), "T1".to_string()),
            Matcher::UrlEncoded("scope".to_string(), "TEAM_TASKS".to_string()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let params = vec![
        ("teamId".to_string(), "T1".to_string()),
        ("scope".to_string(), "TEAM_TASKS".to_string()),
    ];
    let tasks = client.fetch_tasks(&params).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn fetch_context_joins_the_reference_lists() {
    let mut server = Server::new_async().await;
    let _teams = server
        .mock("GET", "/teams/all")
        .with_body(r#"[{"id":"T1","name":"Engineering"}]"#)
        .create_async()
        .await;
    let _scopes = server
        .mock("GET", "/task/scopes")
        .with_body(r#"["USER_TASKS","TEAM_TASKS"]"#)
        .create_async()
        .await;
    let _priorities = server
        .mock("GET", "/task/priorities")
        .with_body(r#"["LOW","HIGH"]"#)
        .create_async()
        .await;
    let _statuses = server
        .mock("GET", "/task/statuses")
        .with_body(r#"["PENDING","DONE"]"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let ctx = client.fetch_context().await.unwrap();
    assert_eq!(ctx.teams.len(), 1);
    assert_eq!(ctx.teams[0].name, "Engineering");
    assert_eq!(ctx.scopes, vec!["USER_TASKS", "TEAM_TASKS"]);
    assert_eq!(ctx.priorities, vec!["LOW", "HIGH"]);
    assert_eq!(ctx.statuses, vec!["PENDING", "DONE"]);
}

#[tokio::test]
async fn fetch_context_fails_when_any_list_fails() {
    let mut server = Server::new_async().await;
    let _teams = server
        .mock("GET", "/teams/all")
        .with_body("[]")
        .create_async()
        .await;
    let _scopes = server
        .mock("GET", "/task/scopes")
        .with_status(503)
        .with_body("warming up")
        .create_async()
        .await;
    let _priorities = server
        .mock("GET", "/task/priorities")
        .with_body("[]")
        .create_async()
        .await;
    let _statuses = server
        .mock("GET", "/task/statuses")
        .with_body("[]")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client.fetch_context().await.unwrap_err();
    assert_eq!(err.to_string(), "warming up");
}

#[tokio::test]
async fn fetch_task_decodes_the_backend_dto_shape() {
    let body = r#"{
        "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "title": "Ship release",
        "description": "Cut the release branch",
        "priority": "HIGH",
        "status": "PENDING",
        "taskDate": "2024-01-12",
        "startTime": "09:30:00",
        "endTime": "11:00:00",
        "assignees": [{"id":"u1","firstName":"Ada","lastName":"Lovelace"}],
        "team": {"id":"T1","name":"Engineering"}
    }"#;
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/task/0f8fad5b-d9cb-469f-a165-70867728950e")
        .with_body(body)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let task = client
        .fetch_task("0f8fad5b-d9cb-469f-a165-70867728950e")
        .await
        .unwrap();
    assert_eq!(task.title, "Ship release");
    assert_eq!(task.assignees[0].full_name(), "Ada Lovelace");
    assert_eq!(task.team.as_ref().unwrap().name, "Engineering");
    assert_eq!(task.date_label(), "2024-01-12");
    assert_eq!(task.time_range(), "09:30 - 11:00");
}

#[tokio::test]
async fn create_task_posts_to_the_selected_team() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/task/new")
        .match_query(Matcher::UrlEncoded("team".to_string(), "T1".to_string()))
        .match_body(Matcher::PartialJsonString(
            r#"{"title":"Ship release","priority":"HIGH","status":"PENDING","taskDate":"2024-01-12"}"#
                .to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"id":"t9","title":"Ship release","priority":"HIGH","status":"PENDING"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let new_task = NewTask {
        title: "Ship release".to_string(),
        description: None,
        priority: "HIGH".to_string(),
        status: "PENDING".to_string(),
        task_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 12),
        start_time: None,
        end_time: None,
    };
    let created = client.create_task(&new_task, Some("T1")).await.unwrap();
    assert_eq!(created.id, "t9");
    assert_eq!(created.title, "Ship release");
}

#[tokio::test]
async fn create_task_omits_blank_optional_fields() {
    let mut server = Server::new_async().await;
    // An exact body match: no description/date/time keys may be present, so
    // the server applies its own defaults.
    let _m = server
        .mock("POST", "/task/new")
        .match_body(Matcher::Json(serde_json::json!({
            "title": "Quick note",
            "priority": "LOW",
            "status": "PENDING",
        })))
        .with_status(201)
        .with_body(r#"{"id":"t1","title":"Quick note","priority":"LOW","status":"PENDING"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let new_task = NewTask {
        title: "Quick note".to_string(),
        description: None,
        priority: "LOW".to_string(),
        status: "PENDING".to_string(),
        task_date: None,
        start_time: None,
        end_time: None,
    };
    let created = client.create_task(&new_task, None).await.unwrap();
    assert_eq!(created.id, "t1");
}

#[tokio::test]
async fn generate_invite_code_posts_and_returns_the_code() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/teams/T1/generate-invite-code")
        .with_body(r#"{"code":"JOIN-1234"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let code = client.generate_invite_code("T1").await.unwrap();
    assert_eq!(code, "JOIN-1234");
}

#[tokio::test]
async fn remove_member_tolerates_an_empty_response() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/teams/T1/delete-member")
        .match_query(Matcher::UrlEncoded("userId".to_string(), "u2".to_string()))
        .with_status(200)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    client.remove_member("T1", "u2").await.unwrap();
}

#[tokio::test]
async fn fetch_team_members_decodes_the_member_list() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/teams/T1/members")
        .with_body(r#"[{"id":"u1","firstName":"Grace","lastName":"Hopper","email":"grace@example.com"}]"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let members = client.fetch_team_members("T1").await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].email, "grace@example.com");
}
