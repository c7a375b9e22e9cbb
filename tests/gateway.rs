use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use nutrigate::app::build_app;
use nutrigate::state::AppState;

// ─── Fake upstream ──────────────────────────────────────────────────────

#[derive(Default)]
struct UpstreamState {
    daily_calls: AtomicUsize,
    foods_calls: AtomicUsize,
}

async fn upstream_list_foods(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.foods_calls.fetch_add(1, Ordering::SeqCst);
    if !headers.contains_key("authorization") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "No token" }))).into_response();
    }
    Json(json!([
        {
            "id": "7b1f1d4e-9f43-4f0f-9d8e-1c2b3a4d5e6f",
            "name": "Rolled oats",
            "serving_size_gram": 40.0,
            "calories": 150.0,
            "protein": 5.0,
            "carbs": 27.0,
            "fat": 2.5,
            "source": "external"
        }
    ]))
    .into_response()
}

async fn upstream_create_food(body: Bytes) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        [("content-type", "application/json")],
        body,
    )
}

async fn upstream_missing_food(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Food {id} not found") })),
    )
}

async fn upstream_daily(
    State(state): State<Arc<UpstreamState>>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    state.daily_calls.fetch_add(1, Ordering::SeqCst);
    // Long enough for concurrent gateway requests to overlap.
    tokio::time::sleep(Duration::from_millis(30)).await;

    if date.starts_with("2023") || date == "2024-03-03" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No data for date" })),
        )
            .into_response();
    }

    Json(json!({
        "date": date,
        "total_calories": 2100.0,
        "meals": [
            {
                "meal_log_id": "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9",
                "meal_type": "Lunch",
                "total_calories": 2100.0,
                "total_protein": 80.0,
                "total_carbs": null,
                "total_fat": 70.0
            }
        ]
    }))
    .into_response()
}

async fn spawn_upstream() -> (String, Arc<UpstreamState>) {
    let state = Arc::new(UpstreamState::default());
    let router = Router::new()
        .route("/api/foods", get(upstream_list_foods).post(upstream_create_food))
        .route("/api/foods/:id", get(upstream_missing_food))
        .route("/api/nutrition/date/:date", get(upstream_daily))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

fn gateway_for(upstream: &str) -> Router {
    build_app(AppState::for_upstream(upstream))
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", "Bearer test-token")
        .body(Body::empty())
        .unwrap()
}

// ─── Tests ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_answers_without_upstream() {
    let app = gateway_for("http://127.0.0.1:1");
    let resp = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_rejected_before_forwarding() {
    let (upstream, state) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let resp = app
        .oneshot(Request::builder().uri("/api/foods").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.foods_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn foods_list_passes_through() {
    let (upstream, _) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let resp = app.oneshot(authed("/api/foods")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body[0]["name"], "Rolled oats");
}

#[tokio::test]
async fn create_food_forwards_the_body_untouched() {
    let (upstream, _) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let payload = json!({
        "name": "Greek yogurt",
        "serving_size_gram": 170.0,
        "calories": 100.0,
        "protein": 17.0,
        "carbs": 6.0,
        "fat": 0.7,
        "source": "user"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/foods")
        .header("Authorization", "Bearer test-token")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(read_json(resp).await, payload);
}

#[tokio::test]
async fn upstream_error_bodies_are_forwarded_verbatim() {
    let (upstream, _) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let resp = app
        .oneshot(authed("/api/foods/7b1f1d4e-9f43-4f0f-9d8e-1c2b3a4d5e6f"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_json(resp).await;
    assert_eq!(
        body["message"],
        "Food 7b1f1d4e-9f43-4f0f-9d8e-1c2b3a4d5e6f not found"
    );
}

#[tokio::test]
async fn unreachable_upstream_becomes_a_502_with_a_message() {
    // Nothing listens on port 1.
    let app = gateway_for("http://127.0.0.1:1");

    let resp = app.oneshot(authed("/api/foods")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("unreachable"));
}

#[tokio::test]
async fn malformed_and_impossible_dates_never_reach_the_upstream() {
    let (upstream, state) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    for bad in ["2024-2-1", "not-a-date", "2024-02-30", "2024-13-01"] {
        let resp = app
            .clone()
            .oneshot(authed(&format!("/api/nutrition/date/{bad}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{bad}");
    }
    assert_eq!(state.daily_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrent_daily_requests_share_one_upstream_call() {
    let (upstream, state) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let (a, b) = tokio::join!(
        app.clone().oneshot(authed("/api/nutrition/date/2024-03-01")),
        app.clone().oneshot(authed("/api/nutrition/date/2024-03-01")),
    );
    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);
    assert_eq!(state.daily_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn distinct_tokens_do_not_share_a_flight() {
    let (upstream, state) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let other = Request::builder()
        .uri("/api/nutrition/date/2024-03-01")
        .header("Authorization", "Bearer another-token")
        .body(Body::empty())
        .unwrap();
    let (a, b) = tokio::join!(
        app.clone().oneshot(authed("/api/nutrition/date/2024-03-01")),
        app.clone().oneshot(other),
    );
    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);
    assert_eq!(state.daily_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn weekly_view_tolerates_missing_days() {
    let (upstream, state) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let resp = app.oneshot(authed("/api/nutrition/week/2024-03-05")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let week = read_json(resp).await;
    let week = week.as_array().unwrap();

    assert_eq!(week.len(), 7);
    assert_eq!(state.daily_calls.load(Ordering::SeqCst), 7);
    assert_eq!(week[0]["date"], "2024-02-28");
    assert_eq!(week[6]["date"], "2024-03-05");

    // 2024-03-03 is the day the upstream has nothing for.
    let missing = week.iter().find(|d| d["date"] == "2024-03-03").unwrap();
    assert_eq!(missing["total_calories"], 0.0);
    let present = week.iter().find(|d| d["date"] == "2024-03-05").unwrap();
    assert_eq!(present["total_calories"], 2100.0);
    assert_eq!(present["protein"], 80.0);
}

#[tokio::test]
async fn weekly_view_with_no_data_at_all_is_seven_zero_days() {
    let (upstream, _) = spawn_upstream().await;
    let app = gateway_for(&upstream);

    let resp = app.oneshot(authed("/api/nutrition/week/2023-05-10")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let week = read_json(resp).await;
    let week = week.as_array().unwrap();

    assert_eq!(week.len(), 7);
    assert!(week.iter().all(|d| d["total_calories"] == 0.0));
}
