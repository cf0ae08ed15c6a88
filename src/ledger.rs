//! Booking ledger. Append-mostly: bookings are created by admission and
//! only ever mutated by payment confirmation.
//!
//! Uniqueness of the (treatment, date, patientName) key is NOT enforced
//! here; the admission workflow owns the check-then-insert sequence.

use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};

use crate::{database::BOOKINGS, error::AppError, models::Booking};

fn bookings(db: &Database) -> Collection<Booking> {
    db.collection(BOOKINGS)
}

/// All bookings whose date label equals `date` exactly. Dates are opaque
/// strings, never parsed as calendar values.
pub async fn find_by_date(db: &Database, date: &str) -> Result<Vec<Booking>, AppError> {
    Ok(bookings(db)
        .find(doc! { "date": date })
        .await?
        .try_collect()
        .await?)
}

pub async fn find_by_patient_email(db: &Database, email: &str) -> Result<Vec<Booking>, AppError> {
    Ok(bookings(db)
        .find(doc! { "patientEmail": email })
        .await?
        .try_collect()
        .await?)
}

pub async fn find_by_id(db: &Database, id: ObjectId) -> Result<Option<Booking>, AppError> {
    Ok(bookings(db).find_one(doc! { "_id": id }).await?)
}

/// Lookup by the deduplication key.
pub async fn find_matching(
    db: &Database,
    treatment: &str,
    date: &str,
    patient_name: &str,
) -> Result<Option<Booking>, AppError> {
    Ok(bookings(db)
        .find_one(doc! {
            "treatment": treatment,
            "date": date,
            "patientName": patient_name,
        })
        .await?)
}

pub async fn insert(db: &Database, mut booking: Booking) -> Result<Booking, AppError> {
    let result = bookings(db).insert_one(&booking).await?;
    booking.id = result.inserted_id.as_object_id();

    Ok(booking)
}

/// Flip the paid flag and attach the transaction reference. NotFound when
/// the id resolves to nothing.
pub async fn mark_paid(
    db: &Database,
    id: ObjectId,
    transaction_id: &str,
) -> Result<Booking, AppError> {
    let result = bookings(db)
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "paid": true, "transactionId": transaction_id } },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("booking"));
    }

    find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("booking"))
}
