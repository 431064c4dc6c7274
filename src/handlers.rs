use crate::chart::{build_chart, render_svg};
use crate::errors::AppError;
use crate::form::EntryInput;
use crate::models::{Entry, SummaryResponse};
use crate::session::SESSION_COOKIE;
use crate::state::AppState;
use crate::stats::summarize;
use crate::ui::{render_index, PageView};
use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, JsonRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub added: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<IndexParams>,
) -> (CookieJar, Html<String>) {
    let today = today();
    let added = params.added.is_some();
    let (id, html) = state
        .sessions
        .with_log(session_id(&jar), |log| {
            render_index(&PageView { today, log, added })
        })
        .await;

    (with_session(jar, id), Html(html))
}

pub async fn add_entry_form(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Form<EntryInput>, FormRejection>,
) -> Result<(CookieJar, Redirect), AppError> {
    let Form(input) = payload?;
    let (id, _) = apply_add(&state, &jar, input).await;
    Ok((with_session(jar, id), Redirect::to("/?added=1")))
}

pub async fn add_entry(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<EntryInput>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<Entry>), AppError> {
    let Json(input) = payload?;
    let (id, entry) = apply_add(&state, &jar, input).await;
    Ok((StatusCode::CREATED, with_session(jar, id), Json(entry)))
}

pub async fn list_entries(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Vec<Entry>>) {
    let (id, entries) = state
        .sessions
        .with_log(session_id(&jar), |log| {
            log.chronological()
                .into_iter()
                .map(|(_, entry)| entry.clone())
                .collect::<Vec<_>>()
        })
        .await;

    (with_session(jar, id), Json(entries))
}

pub async fn get_summary(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<SummaryResponse>) {
    let (id, response) = state
        .sessions
        .with_log(session_id(&jar), |log| SummaryResponse {
            entries: log.len(),
            summary: summarize(log),
        })
        .await;

    (with_session(jar, id), Json(response))
}

pub async fn get_chart(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Response), AppError> {
    let (id, svg) = state
        .sessions
        .with_log(session_id(&jar), |log| build_chart(log).map(|chart| render_svg(&chart)))
        .await;
    let jar = with_session(jar, id);

    let Some(svg) = svg else {
        return Err(AppError::not_found("no entries to chart yet"));
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "image/svg+xml")
        .body(Body::from(svg))?;
    Ok((jar, response.into_response()))
}

async fn apply_add(state: &AppState, jar: &CookieJar, input: EntryInput) -> (Uuid, Entry) {
    let entry = input.into_entry(today());
    let (id, count) = state
        .sessions
        .with_log(session_id(jar), |log| {
            log.push(entry.clone());
            log.len()
        })
        .await;

    info!(session = %id, date = %entry.date, entries = count, "entry added");
    (id, entry)
}

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn with_session(jar: CookieJar, id: Uuid) -> CookieJar {
    if session_id(&jar) == Some(id) {
        return jar;
    }

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
