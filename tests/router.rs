use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fitness_tracker::{router, AppState, Settings};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(&Settings::default()))
}

fn session_cookie(response: &axum::response::Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn first_visit_sets_cookie_and_shows_placeholder() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("fitness_session="));

    let html = body_text(response).await;
    assert!(html.contains("No data added yet. Enter your details above."));
    assert!(html.contains("Add to List"));
}

#[tokio::test]
async fn form_post_redirects_with_acknowledgment() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::post("/entries")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("date=2024-01-05&weight_kg=12&gender=Female"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/?added=1");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(
            Request::get("/?added=1")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let html = body_text(response).await;
    assert!(html.contains("Entry added!"));
    assert!(html.contains("<td>2024-01-05</td>"));
    assert!(html.contains("<td>20</td>"));
    assert!(html.contains("Fitness Progress"));
}

#[tokio::test]
async fn row_count_matches_number_of_adds() {
    let app = app();
    let mut cookie: Option<String> = None;

    for day in 1..=4 {
        let mut request = Request::post("/api/entries").header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = &cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = format!(r#"{{"date":"2024-05-0{day}","steps":{}}}"#, day * 1000);
        let response = app
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        if cookie.is_none() {
            cookie = Some(session_cookie(&response));
        }
    }

    let response = app
        .oneshot(
            Request::get("/api/entries")
                .header(header::COOKIE, cookie.unwrap())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(entries.len(), 4);
}

#[tokio::test]
async fn chart_is_not_found_for_empty_log() {
    let response = app()
        .oneshot(Request::get("/chart.svg").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_form_number_falls_back_to_default() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::post("/entries")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("date=2024-01-05&weight_kg=&steps=%20&gender=Male"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(
            Request::get("/api/entries")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["weight_kg"], 60.0);
    assert_eq!(entries[0]["steps"], 5000);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let response = app()
        .oneshot(
            Request::post("/api/entries")
                .body(Body::from(r#"{"weight_kg": 70"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unexpected_added_flag_still_renders_page() {
    for query in ["/?added=yes", "/?added=300", "/?added="] {
        let response = app()
            .oneshot(Request::get(query).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Entry added!"));
    }
}
