//! Stub `/api/v1` server.
//!
//! Each route answers in the envelope the real backend uses for it, so the
//! whole normalization path is exercised.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use contrib_store::ClientConfig;
use serde_json::{json, Value};

pub const TOKEN: &str = "s3cret";
pub const PROJECT_COUNT: u64 = 23;

type Params = Query<HashMap<String, String>>;

fn number(params: &HashMap<String, String>, key: &str, default: u64) -> u64 {
    params
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
        .max(1)
}

/// `{ success, data: { projects, total, page, totalPages } }`.
///
/// Echoes `tags` and `search` back in every item. `search=explode` fails.
async fn projects(Query(params): Params) -> Response {
    if params.get("search").map(String::as_str) == Some("explode") {
        let body = json!({ "success": false, "message": "database unavailable" });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    let limit = number(&params, "limit", 10);
    let page = number(&params, "page", 1);
    let tags: Vec<&str> = params
        .get("tags")
        .map(|t| t.split(',').collect())
        .unwrap_or_default();
    let search = params.get("search").cloned();

    let start = (page - 1) * limit;
    let items: Vec<Value> = (start + 1..=PROJECT_COUNT.min(start + limit))
        .map(|i| {
            json!({
                "_id": format!("p{i}"),
                "title": format!("Project {i}"),
                "description": search,
                "tags": tags,
            })
        })
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "projects": items,
            "total": PROJECT_COUNT,
            "page": page,
            "totalPages": PROJECT_COUNT.div_ceil(limit),
        }
    }))
    .into_response()
}

/// Bearer-protected `{ data: { users, pagination } }`.
async fn users(headers: HeaderMap, Query(params): Params) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        let body = json!({ "message": "Not authorized, no token" });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    let level = params.get("experience_level").cloned();
    Json(json!({
        "data": {
            "users": [
                { "_id": "u1", "username": "ada", "experience_level": level },
                { "_id": "u2", "username": "linus", "experience_level": level },
            ],
            "pagination": {
                "currentPage": number(&params, "page", 1),
                "totalPages": 4,
                "totalCount": 8,
                "limit": 2,
            }
        }
    }))
    .into_response()
}

/// `{ message: { leaderboard, pagination } }`; the metric names the leader.
async fn leaderboard(Query(params): Params) -> Json<Value> {
    let metric = params.get("metric").cloned().unwrap_or_default();
    Json(json!({
        "message": {
            "leaderboard": [
                { "rank": 1, "username": format!("{metric}-leader"), "value": 120 },
                { "rank": 2, "username": "runner-up", "value": 80 },
            ],
            "pagination": { "currentPage": 1, "totalPages": 2, "totalCount": 4 }
        }
    }))
}

/// Bare array, no pagination metadata.
async fn streak_leaderboard() -> Json<Value> {
    Json(json!([
        { "rank": 1, "username": "daily", "count": 30 },
        { "rank": 2, "username": "weekly", "count": 7 },
    ]))
}

async fn unknown_envelope() -> Json<Value> {
    Json(json!({ "status": "ok", "rows": [] }))
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([]))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/v1/project/get-all", get(projects))
        .route("/api/v1/users", get(users))
        .route("/api/v1/stats/leaderboard", get(leaderboard))
        .route("/api/v1/stats/streak/leaderboard", get(streak_leaderboard))
        .route("/api/v1/odd/unknown", get(unknown_envelope))
        .route("/api/v1/odd/html", get(not_json))
        .route("/api/v1/odd/slow", get(slow))
}

/// Bind to port 0 and return the API base URL.
pub async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url)
        .with_bearer_token(TOKEN)
        .with_page_limit(10)
        .with_request_timeout(Duration::from_millis(500))
}
