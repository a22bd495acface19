use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::TicketInput;
use crate::db::tickets;
use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets", axum::routing::post(create))
        .route("/tickets/{id}", get(list_all).delete(delete))
        .route("/tickets/user/{user_id}", get(list_for_user))
}

/// POST /tickets — store the checkout payload verbatim, QR data URL
/// included. No check that the referenced event exists or that the price
/// matches.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<TicketInput>,
) -> AppResult<Response> {
    let ticket = tickets::insert_ticket(&state.db, &input)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "ticket": ticket })),
    )
        .into_response())
}

/// GET /tickets/{id} — returns every ticket; the path id is ignored. The
/// frontend relies on this shape.
pub async fn list_all(
    State(state): State<AppState>,
    Path(_id): Path<String>,
) -> AppResult<Response> {
    let tickets = tickets::list_tickets(&state.db)?;
    Ok(Json(tickets).into_response())
}

/// GET /tickets/user/{user_id} — tickets owned by one user.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Response> {
    let tickets = tickets::tickets_for_user(&state.db, &user_id)?;
    Ok(Json(tickets).into_response())
}

/// DELETE /tickets/{id} — only the owning user may delete a ticket.
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let ticket = tickets::find_ticket(&state.db, &id)?.ok_or(AppError::NotFound)?;
    if ticket.user_id != current.id {
        return Err(AppError::Forbidden);
    }

    tickets::delete_ticket(&state.db, &id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
