//! Best-effort confirmation mail. Delivery never gates a booking response:
//! the send runs on its own task and failures only reach the log.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::{error::AppError, models::Booking, state::AppState};

pub fn spawn_confirmation(state: Arc<AppState>, booking: Booking) {
    tokio::spawn(async move {
        if let Err(err) = send_confirmation(&state, &booking).await {
            warn!(
                "Confirmation mail to {} failed: {err}",
                booking.patient_email
            );
        }
    });
}

async fn send_confirmation(state: &AppState, booking: &Booking) -> Result<(), AppError> {
    let message = json!({
        "from": state.config.mail_from,
        "to": booking.patient_email,
        "subject": format!("Your {} appointment is confirmed", booking.treatment),
        "text": format!(
            "Dear {}, your appointment for {} on {} at {} is confirmed.",
            booking.patient_name, booking.treatment, booking.date, booking.slot
        ),
    });

    state
        .http
        .post(&state.config.mail_api_url)
        .bearer_auth(&state.config.mail_api_key)
        .json(&message)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
