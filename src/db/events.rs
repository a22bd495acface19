use rusqlite::{params, OptionalExtension, Row};

use crate::db::models::Event;
use crate::error::AppResult;
use crate::state::DbPool;

/// Fields accepted from the create-event form. The image is the hosted URL
/// (already uploaded), or empty when no file was sent.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub owner: String,
    pub title: String,
    pub description: String,
    pub organized_by: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub ticket_price: f64,
    pub image: String,
}

const EVENT_COLUMNS: &str = "id, owner, title, description, organized_by, event_date, \
     event_time, location, ticket_price, image, likes, participants, count, income";

fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        organized_by: row.get(4)?,
        event_date: row.get(5)?,
        event_time: row.get(6)?,
        location: row.get(7)?,
        ticket_price: row.get(8)?,
        image: row.get(9)?,
        likes: row.get(10)?,
        participants: row.get(11)?,
        count: row.get(12)?,
        income: row.get(13)?,
    })
}

pub fn insert_event(pool: &DbPool, new: &NewEvent) -> AppResult<Event> {
    let conn = pool.get()?;
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO events (id, owner, title, description, organized_by, event_date, \
         event_time, location, ticket_price, image) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            new.owner,
            new.title,
            new.description,
            new.organized_by,
            new.event_date,
            new.event_time,
            new.location,
            new.ticket_price,
            new.image,
        ],
    )?;

    let event = conn.query_row(
        &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
        params![id],
        row_to_event,
    )?;
    Ok(event)
}

pub fn list_events(pool: &DbPool) -> AppResult<Vec<Event>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM events ORDER BY created_at",
        EVENT_COLUMNS
    ))?;
    let events = stmt
        .query_map([], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

pub fn find_event(pool: &DbPool, id: &str) -> AppResult<Option<Event>> {
    let conn = pool.get()?;
    let event = conn
        .query_row(
            &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
            params![id],
            row_to_event,
        )
        .optional()?;
    Ok(event)
}

/// Increment the like counter in a single UPDATE so concurrent likes cannot
/// lose updates. Returns the updated event, or None when the id is unknown.
pub fn like_event(pool: &DbPool, id: &str) -> AppResult<Option<Event>> {
    let conn = pool.get()?;
    let changed = conn.execute(
        "UPDATE events SET likes = likes + 1 WHERE id = ?1",
        params![id],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let event = conn
        .query_row(
            &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
            params![id],
            row_to_event,
        )
        .optional()?;
    Ok(event)
}
