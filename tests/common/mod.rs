//! In-process fake of the HR backend for integration tests.
//!
//! Runs on its own thread and runtime so both sync (`assert_cmd`) and
//! `#[tokio::test]` tests can use it.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const SESSION_COOKIE: &str = "sid=abc123";

fn ada() -> Value {
    json!({ "id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "role": "admin" })
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|pair| pair.trim() == SESSION_COOKIE))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "ada@example.com" && body["password"] == "secret" {
        (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
            Json(json!({ "user": ada() })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    if has_session(&headers) {
        Json(json!({ "user": ada() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated" })),
        )
            .into_response()
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn dashboard(headers: HeaderMap) -> Response {
    if !has_session(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated" })),
        )
            .into_response();
    }
    Json(json!({
        "summary": {
            "total_employees": 2,
            "present_today": 1,
            "late_today": 1,
            "absent_today": 0,
            "open_tasks": 1,
            "documents": 2
        }
    }))
    .into_response()
}

fn employees_data() -> Value {
    json!([
        { "id": 1, "first_name": "Ada", "last_name": "Lovelace", "employee_code": "E001",
          "position": "Engineer", "status": "Active", "email": "ada@example.com",
          "start_date": "2020-01-15" },
        { "id": 2, "first_name": "Grace", "last_name": "Hopper", "employee_code": "E002",
          "position": "Admiral", "status": "On Leave" }
    ])
}

async fn employees() -> Json<Value> {
    Json(json!({
        "data": employees_data(),
        "pagination": { "page": 1, "pageSize": 20, "total": 2, "totalPages": 1 }
    }))
}

async fn employee(Path(id): Path<i64>) -> Response {
    match employees_data()
        .as_array()
        .and_then(|list| list.iter().find(|e| e["id"] == id).cloned())
    {
        Some(e) => Json(json!({ "employee": e })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Employee not found" })),
        )
            .into_response(),
    }
}

async fn attendance(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let month = params.get("month").cloned().unwrap_or_else(|| "2024-01".into());
    let record = if month == "2024-02" {
        json!({ "employee_id": 1, "employee_name": "Ada Lovelace", "date": "2024-02-05",
                "status": "Late", "minutes_late": 12 })
    } else {
        json!({ "employee_id": 1, "employee_name": "Ada Lovelace", "date": format!("{}-01", month),
                "status": "On time", "overtime_minutes": 30 })
    };
    Json(json!({ "data": [record] }))
}

async fn documents() -> Json<Value> {
    Json(json!({
        "data": {
            "documents": [
                { "id": 1, "title": "Leave policy", "category": "policy",
                  "file_url": "https://files.example/leave.pdf",
                  "uploaded_at": "2024-01-02T10:00:00Z" },
                { "id": 2, "title": "Onboarding checklist", "category": null,
                  "uploaded_at": "2024-01-05T09:00:00Z" }
            ]
        }
    }))
}

async fn create_document(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut doc = body;
    doc["id"] = json!(30);
    (StatusCode::CREATED, Json(json!({ "document": doc })))
}

async fn workspaces() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "People Ops" }]))
}

async fn boards() -> Json<Value> {
    Json(json!({ "boards": [{ "id": 1, "workspace_id": 1, "name": "Hiring", "member_count": 3 }] }))
}

async fn board(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({ "board": { "id": id, "workspace_id": 1, "name": "Hiring" } }))
}

async fn status_groups(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "data": [
            { "id": 11, "board_id": id, "name": "Done", "position": 2 },
            { "id": 10, "board_id": id, "name": "Doing", "position": 1 },
            { "id": 12, "board_id": id, "name": "Blocked", "position": 3 }
        ]
    }))
}

fn tasks_data() -> Value {
    json!([
        { "id": 1, "board_id": 1, "board_name": "Hiring", "status_group_id": 10,
          "title": "Screen candidates", "status": "Stuck", "end_date": "2024-03-04" },
        { "id": 2, "board_id": 1, "board_name": "Hiring", "status_group_id": 11,
          "title": "Send offer", "status": "done", "end_date": "2024-03-10T00:00:00Z" }
    ])
}

async fn tasks() -> Json<Value> {
    Json(json!({ "data": tasks_data() }))
}

async fn tasks_overview() -> Json<Value> {
    Json(json!({ "tasks": tasks_data() }))
}

async fn create_task(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut task = body;
    task["id"] = json!(50);
    (StatusCode::CREATED, Json(json!({ "task": task })))
}

async fn update_task(Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    if body["status_group_id"] == 12 {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Database unavailable" })),
        )
            .into_response();
    }
    let Some(mut task) = tasks_data()
        .as_array()
        .and_then(|list| list.iter().find(|t| t["id"] == id).cloned())
    else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Task not found" }))).into_response();
    };
    task["status_group_id"] = body["status_group_id"].clone();
    task["status"] = json!("Working on it");
    Json(json!({ "task": task })).into_response()
}

pub fn router() -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/dashboard/summary", get(dashboard))
        .route("/employees", get(employees))
        .route("/employees/{id}", get(employee))
        .route("/attendance", get(attendance))
        .route("/documents", get(documents).post(create_document))
        .route("/workspaces", get(workspaces))
        .route("/boards", get(boards))
        .route("/boards/{id}", get(board))
        .route("/boards/{id}/status-groups", get(status_groups))
        .route("/tasks", get(tasks).post(create_task))
        .route("/tasks/overview", get(tasks_overview))
        .route("/tasks/{id}", patch(update_task));
    Router::new().nest("/api", api)
}

/// Start the fake backend and return its `/api` base URL.
pub fn spawn_backend() -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, router()).await.expect("serve");
        });
    });
    let addr = rx.recv().expect("backend address");
    format!("http://{}/api", addr)
}
