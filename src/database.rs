//! # MongoDB
//!
//! Document store holding every collection this service reads or writes.
//!
//! ## Collections
//! - `services`: treatment catalog, seeded once when empty
//! - `bookings`: the appointment ledger
//! - `users`: profiles upserted by email, carry the role used for gating
//! - `doctors`: admin-managed staff records
//! - `payments`: one record per confirmed charge

use mongodb::{Client, Database};

pub const SERVICES: &str = "services";
pub const BOOKINGS: &str = "bookings";
pub const USERS: &str = "users";
pub const DOCTORS: &str = "doctors";
pub const PAYMENTS: &str = "payments";

pub async fn init_mongo(uri: &str, db_name: &str) -> Database {
    let client = Client::with_uri_str(uri).await.expect("Mongo misconfigured!");

    client.database(db_name)
}
