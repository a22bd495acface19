use serde::{Deserialize, Serialize};

/// Full user row. Never serialized directly so the password hash cannot
/// leak into a response; use [`UserProfile`] for the wire shape.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "organizedBy")]
    pub organized_by: String,
    #[serde(rename = "eventDate")]
    pub event_date: String,
    #[serde(rename = "eventTime")]
    pub event_time: String,
    pub location: String,
    #[serde(rename = "ticketPrice")]
    pub ticket_price: f64,
    pub image: String,
    pub likes: i64,
    pub participants: i64,
    pub count: i64,
    pub income: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "eventid")]
    pub event_id: String,
    #[serde(rename = "ticketDetails")]
    pub details: TicketDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "eventname")]
    pub event_name: String,
    #[serde(default, rename = "eventdate")]
    pub event_date: String,
    #[serde(default, rename = "eventtime")]
    pub event_time: String,
    #[serde(default, rename = "ticketprice")]
    pub ticket_price: f64,
    #[serde(default)]
    pub qr: String,
}

/// Checkout payload as the client sends it. Stored verbatim; the server
/// does not check that the referenced event exists or that the price
/// matches.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketInput {
    #[serde(default, rename = "userid")]
    pub user_id: String,
    #[serde(default, rename = "eventid")]
    pub event_id: String,
    #[serde(default, rename = "ticketDetails")]
    pub details: TicketDetails,
}
