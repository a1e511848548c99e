use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// What the events endpoint answers once the request passes validation.
#[derive(Clone, Debug)]
pub enum FixtureResponse {
    /// A JSON array of events. `desc` and `page` are applied to it.
    Events(Vec<Value>),
    /// A verbatim body, for example malformed JSON.
    Raw { status: u16, body: String },
    /// A Meetup-style JSON error.
    Error { status: u16, payload: Value },
}

/// Headers of every request that reached the events endpoint, in order.
pub type RequestLog = Arc<RwLock<Vec<HeaderMap>>>;

/// User agent the bot protection in front of the API lets through.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Clone, Debug)]
pub struct Fixture {
    pub api_key: String,
    pub group: String,
    pub response: FixtureResponse,
    pub requests: RequestLog,
}

impl Fixture {
    pub fn new(api_key: &str, group: &str, response: FixtureResponse) -> Self {
        Self {
            api_key: api_key.to_string(),
            group: group.to_string(),
            response,
            requests: RequestLog::default(),
        }
    }

    pub fn events(api_key: &str, group: &str, events: Vec<Value>) -> Self {
        Self::new(api_key, group, FixtureResponse::Events(events))
    }
}

pub fn app(fixture: Fixture) -> Router {
    Router::new()
        .route("/{group}/events", get(list_events))
        .route("/{group}/events/", get(list_events))
        .with_state(Arc::new(fixture))
}

pub async fn run(listener: TcpListener, fixture: Fixture) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixture)).await
}

/// Body in the shape the real API uses for failures.
pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "errors": [{ "code": code, "message": message }] })
}

/// A handful of events resembling a real group's recent past.
pub fn sample_events() -> Vec<Value> {
    vec![
        json!({
            "created": 1_577_836_800_000_i64,
            "local_date": "2020-01-15",
            "local_time": "18:30",
            "venue": { "name": "Skills Matter" },
            "name": "January meetup",
            "yes_rsvp_count": 120,
            "waitlist_count": 14,
            "rsvp_limit": 120
        }),
        json!({
            "created": 1_580_515_200_000_i64,
            "local_date": "2020-02-19",
            "local_time": "18:30",
            "venue": { "name": "CodeNode" },
            "name": "February meetup",
            "yes_rsvp_count": 87,
            "waitlist_count": 0
        }),
    ]
}

async fn list_events(
    State(fixture): State<Arc<Fixture>>,
    Path(group): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    fixture.requests.write().await.push(headers.clone());

    let user_agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    if user_agent != Some(BROWSER_USER_AGENT) {
        return error(
            StatusCode::FORBIDDEN,
            error_body("blocked", "Access denied: banned client"),
        );
    }
    match params.get("key") {
        Some(key) if *key == fixture.api_key => {}
        _ => {
            return error(
                StatusCode::UNAUTHORIZED,
                error_body("auth_fail", "Invalid api key"),
            )
        }
    }
    if group != fixture.group {
        return error(
            StatusCode::NOT_FOUND,
            error_body("group_error", "Invalid group urlname"),
        );
    }
    if let Some(scroll) = params.get("scroll") {
        if !matches!(scroll.as_str(), "recent_past" | "next_upcoming" | "future_or_past") {
            return error(
                StatusCode::BAD_REQUEST,
                error_body("invalid_param", "scroll: invalid value"),
            );
        }
    }

    match &fixture.response {
        FixtureResponse::Events(events) => {
            let mut events = events.clone();
            if params.get("desc").map(String::as_str) == Some("true") {
                events.sort_by_key(|e| std::cmp::Reverse(e["created"].as_i64().unwrap_or(0)));
            }
            if let Some(page) = params.get("page").and_then(|p| p.parse::<usize>().ok()) {
                events.truncate(page);
            }
            Json(events).into_response()
        }
        FixtureResponse::Raw { status, body } => (
            status_code(*status),
            [(header::CONTENT_TYPE, "application/json;charset=utf-8")],
            body.clone(),
        )
            .into_response(),
        FixtureResponse::Error { status, payload } => error(status_code(*status), payload.clone()),
    }
}

fn error(status: StatusCode, payload: Value) -> Response {
    (status, Json(payload)).into_response()
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
