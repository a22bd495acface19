use rusqlite::{params, OptionalExtension, Row};

use crate::db::models::{Ticket, TicketDetails, TicketInput};
use crate::error::AppResult;
use crate::state::DbPool;

const TICKET_COLUMNS: &str = "id, user_id, event_id, holder_name, holder_email, \
     event_name, event_date, event_time, ticket_price, qr";

fn row_to_ticket(row: &Row) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        user_id: row.get(1)?,
        event_id: row.get(2)?,
        details: TicketDetails {
            name: row.get(3)?,
            email: row.get(4)?,
            event_name: row.get(5)?,
            event_date: row.get(6)?,
            event_time: row.get(7)?,
            ticket_price: row.get(8)?,
            qr: row.get(9)?,
        },
    })
}

pub fn insert_ticket(pool: &DbPool, input: &TicketInput) -> AppResult<Ticket> {
    let conn = pool.get()?;
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO tickets (id, user_id, event_id, holder_name, holder_email, \
         event_name, event_date, event_time, ticket_price, qr) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            input.user_id,
            input.event_id,
            input.details.name,
            input.details.email,
            input.details.event_name,
            input.details.event_date,
            input.details.event_time,
            input.details.ticket_price,
            input.details.qr,
        ],
    )?;

    let ticket = conn.query_row(
        &format!("SELECT {} FROM tickets WHERE id = ?1", TICKET_COLUMNS),
        params![id],
        row_to_ticket,
    )?;
    Ok(ticket)
}

pub fn list_tickets(pool: &DbPool) -> AppResult<Vec<Ticket>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tickets ORDER BY created_at",
        TICKET_COLUMNS
    ))?;
    let tickets = stmt
        .query_map([], row_to_ticket)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}

pub fn tickets_for_user(pool: &DbPool, user_id: &str) -> AppResult<Vec<Ticket>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tickets WHERE user_id = ?1 ORDER BY created_at",
        TICKET_COLUMNS
    ))?;
    let tickets = stmt
        .query_map(params![user_id], row_to_ticket)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}

pub fn find_ticket(pool: &DbPool, id: &str) -> AppResult<Option<Ticket>> {
    let conn = pool.get()?;
    let ticket = conn
        .query_row(
            &format!("SELECT {} FROM tickets WHERE id = ?1", TICKET_COLUMNS),
            params![id],
            row_to_ticket,
        )
        .optional()?;
    Ok(ticket)
}

/// Returns true when a row was deleted.
pub fn delete_ticket(pool: &DbPool, id: &str) -> AppResult<bool> {
    let conn = pool.get()?;
    let changed = conn.execute("DELETE FROM tickets WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2d2::Pool;
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_pool() -> DbPool {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).unwrap();
        crate::db::run_migrations(&pool).unwrap();
        pool
    }

    fn sample_input(user_id: &str) -> TicketInput {
        TicketInput {
            user_id: user_id.into(),
            event_id: "e1".into(),
            details: TicketDetails {
                name: "Alice".into(),
                email: "a@x.com".into(),
                event_name: "Rust Expo".into(),
                event_date: "2026-09-01".into(),
                event_time: "18:00".into(),
                ticket_price: 25.0,
                qr: "data:image/png;base64,AAAA".into(),
            },
        }
    }

    #[test]
    fn insert_stores_details_verbatim() {
        let pool = test_pool();
        let ticket = insert_ticket(&pool, &sample_input("u1")).unwrap();
        assert_eq!(ticket.user_id, "u1");
        assert_eq!(ticket.details.qr, "data:image/png;base64,AAAA");
        assert_eq!(ticket.details.ticket_price, 25.0);
    }

    #[test]
    fn insert_accepts_ticket_for_unknown_event() {
        // No referential check against events: a ticket referencing a
        // nonexistent event is stored as-is.
        let pool = test_pool();
        let input = TicketInput {
            event_id: "never-created".into(),
            ..sample_input("u1")
        };
        let ticket = insert_ticket(&pool, &input).unwrap();
        assert_eq!(ticket.event_id, "never-created");
    }

    #[test]
    fn tickets_for_user_filters_by_owner() {
        let pool = test_pool();
        insert_ticket(&pool, &sample_input("u1")).unwrap();
        insert_ticket(&pool, &sample_input("u1")).unwrap();
        insert_ticket(&pool, &sample_input("u2")).unwrap();

        assert_eq!(tickets_for_user(&pool, "u1").unwrap().len(), 2);
        assert_eq!(tickets_for_user(&pool, "u2").unwrap().len(), 1);
        assert!(tickets_for_user(&pool, "u3").unwrap().is_empty());
        assert_eq!(list_tickets(&pool).unwrap().len(), 3);
    }

    #[test]
    fn delete_removes_ticket_from_owner_listing() {
        let pool = test_pool();
        let ticket = insert_ticket(&pool, &sample_input("u1")).unwrap();
        insert_ticket(&pool, &sample_input("u1")).unwrap();

        assert!(delete_ticket(&pool, &ticket.id).unwrap());

        let remaining = tickets_for_user(&pool, "u1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|t| t.id != ticket.id));
    }

    #[test]
    fn delete_unknown_ticket_returns_false() {
        let pool = test_pool();
        assert!(!delete_ticket(&pool, "nope").unwrap());
    }
}
