use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::db::events::{self, NewEvent};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createEvent", get(list).post(create))
        .route("/events", get(list))
        .route("/event/{id}", get(get_one).post(like))
        .route("/event/{id}/ordersummary", get(get_one))
        .route("/event/{id}/ordersummary/paymentsummary", get(get_one))
}

/// POST /createEvent — multipart form, optional `image` file. File bytes
/// are passed through to the image host; only the returned URL is stored.
/// A failed upload fails the whole create, nothing is written.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut new = NewEvent::default();
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid image field: {}", e)))?;
            if !data.is_empty() {
                image = Some((data.to_vec(), content_type));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))?;

        match name.as_str() {
            "owner" => new.owner = value,
            "title" => new.title = value,
            "description" => new.description = value,
            "organizedBy" => new.organized_by = value,
            "eventDate" => new.event_date = value,
            "eventTime" => new.event_time = value,
            "location" => new.location = value,
            "ticketPrice" => new.ticket_price = value.parse().unwrap_or_default(),
            _ => {} // unknown fields are ignored, like the original
        }
    }

    if let Some((bytes, content_type)) = image {
        new.image = state.images.upload(bytes, &content_type).await?;
    }

    let event = events::insert_event(&state.db, &new)?;
    Ok((StatusCode::CREATED, Json(event)).into_response())
}

/// GET /events and GET /createEvent — all events, unfiltered.
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let events = events::list_events(&state.db)?;
    Ok(Json(events).into_response())
}

/// GET /event/{id} and its order-summary aliases.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let event = events::find_event(&state.db, &id)?.ok_or(AppError::NotFound)?;
    Ok(Json(event).into_response())
}

/// POST /event/{id} — atomic like increment.
pub async fn like(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let event = events::like_event(&state.db, &id)?.ok_or(AppError::NotFound)?;
    Ok(Json(event).into_response())
}
