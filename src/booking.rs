//! The two write workflows over the ledger: admission of a new booking and
//! payment confirmation of an existing one.

use std::sync::Arc;

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    database::PAYMENTS,
    error::AppError,
    ledger, mailer,
    models::{Booking, PaymentRecord},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub treatment: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Admission {
    pub accepted: bool,
    pub booking: Booking,
}

fn required(field: Option<String>, name: &str) -> Result<String, AppError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Validation(format!(
            "missing required field: {name}"
        ))),
    }
}

pub fn validate(request: BookingRequest) -> Result<Booking, AppError> {
    Ok(Booking {
        id: None,
        treatment: required(request.treatment, "treatment")?,
        date: required(request.date, "date")?,
        slot: required(request.slot, "slot")?,
        patient_name: required(request.patient_name, "patientName")?,
        patient_email: required(request.patient_email, "patientEmail")?,
        paid: false,
        transaction_id: None,
    })
}

/// Validate, dedup against the ledger, persist, notify.
///
/// A resubmission (same treatment, date, patientName) is a normal outcome,
/// not an error: the existing booking comes back with `accepted: false` and
/// no mail goes out. The lookup and the insert are separate store calls, so
/// two concurrent identical submissions can both pass the lookup.
pub async fn submit(state: &Arc<AppState>, request: BookingRequest) -> Result<Admission, AppError> {
    let booking = validate(request)?;

    if let Some(existing) = ledger::find_matching(
        &state.db,
        &booking.treatment,
        &booking.date,
        &booking.patient_name,
    )
    .await?
    {
        return Ok(Admission {
            accepted: false,
            booking: existing,
        });
    }

    let stored = ledger::insert(&state.db, booking).await?;
    info!(
        "Booked {} on {} for {}",
        stored.treatment, stored.date, stored.patient_email
    );

    mailer::spawn_confirmation(state.clone(), stored.clone());

    Ok(Admission {
        accepted: true,
        booking: stored,
    })
}

/// Record the payment, then mark the booking paid.
///
/// The payment record is written before the booking is resolved; an unknown
/// booking id surfaces NotFound and leaves the record orphaned. It is linked
/// by transactionId only, so nothing else dangles.
pub async fn confirm_payment(
    state: &AppState,
    booking_id: &str,
    transaction_id: &str,
    amount: f64,
) -> Result<Booking, AppError> {
    let record = PaymentRecord {
        id: None,
        amount,
        transaction_id: transaction_id.to_string(),
        created_at: DateTime::now(),
    };
    state
        .db
        .collection::<PaymentRecord>(PAYMENTS)
        .insert_one(&record)
        .await?;

    let id = ObjectId::parse_str(booking_id).map_err(|_| AppError::NotFound("booking"))?;

    ledger::mark_paid(&state.db, id, transaction_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> BookingRequest {
        BookingRequest {
            treatment: Some("Teeth Cleaning".to_string()),
            date: Some("May 17, 2022".to_string()),
            slot: Some("9am".to_string()),
            patient_name: Some("Ada".to_string()),
            patient_email: Some("ada@example.com".to_string()),
        }
    }

    #[test]
    fn test_complete_request_becomes_unpaid_booking() {
        let booking = validate(full_request()).unwrap();

        assert_eq!(booking.treatment, "Teeth Cleaning");
        assert!(!booking.paid);
        assert!(booking.id.is_none());
        assert!(booking.transaction_id.is_none());
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut request = full_request();
        request.patient_email = None;

        match validate(request) {
            Err(AppError::Validation(message)) => assert!(message.contains("patientEmail")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut request = full_request();
        request.slot = Some("   ".to_string());

        assert!(matches!(validate(request), Err(AppError::Validation(_))));
    }
}
