use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    auth::{self, AuthClaims},
    availability::{self, DEFAULT_DATE, ServiceAvailability},
    booking::{self, Admission, BookingRequest},
    catalog,
    database::{DOCTORS, USERS},
    error::AppError,
    ledger,
    models::{Booking, Doctor, User},
    payments,
    state::AppState,
};

pub async fn root() -> &'static str {
    "Hello from doctors portal"
}

pub async fn services(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(catalog::service_names(&state.db).await?))
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    date: Option<String>,
}

pub async fn available(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<ServiceAvailability>>, AppError> {
    let date = query.date.unwrap_or_else(|| {
        info!("No date given, falling back to {DEFAULT_DATE}");
        DEFAULT_DATE.to_string()
    });

    Ok(Json(availability::for_date(&state.db, &date).await?))
}

/// Upsert a profile by email and hand back a fresh bearer token. The role
/// field is never caller-assigned; new users start as plain.
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(profile): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let mut fields = to_document(&profile)
        .map_err(|_| AppError::Validation("profile must be a JSON object".to_string()))?;
    fields.remove("role");
    fields.insert("email", email.clone());

    let result = state
        .db
        .collection::<User>(USERS)
        .update_one(
            doc! { "email": &email },
            doc! { "$set": fields, "$setOnInsert": { "role": "plain" } },
        )
        .upsert(true)
        .await?;

    let token = auth::issue(&email, &state.config.jwt_secret)?;

    Ok(Json(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id,
        "token": token,
    })))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(
        state
            .db
            .collection::<User>(USERS)
            .find(doc! {})
            .await?
            .try_collect()
            .await?,
    ))
}

#[derive(Serialize)]
pub struct AdminStatus {
    admin: bool,
}

pub async fn admin_status(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    Ok(Json(AdminStatus {
        admin: auth::is_admin(&state.db, &email).await?,
    }))
}

pub async fn add_doctor(
    State(state): State<Arc<AppState>>,
    AuthClaims(claims): AuthClaims,
    Json(mut doctor): Json<Doctor>,
) -> Result<(StatusCode, Json<Doctor>), AppError> {
    auth::require_admin(&state.db, &claims.email).await?;

    let result = state
        .db
        .collection::<Doctor>(DOCTORS)
        .insert_one(&doctor)
        .await?;
    doctor.id = result.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(doctor)))
}

pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<Vec<Doctor>>, AppError> {
    auth::require_admin(&state.db, &claims.email).await?;

    Ok(Json(
        state
            .db
            .collection::<Doctor>(DOCTORS)
            .find(doc! {})
            .await?
            .try_collect()
            .await?,
    ))
}

pub async fn remove_doctor(
    State(state): State<Arc<AppState>>,
    AuthClaims(claims): AuthClaims,
    Path(email): Path<String>,
) -> Result<StatusCode, AppError> {
    auth::require_admin(&state.db, &claims.email).await?;

    let result = state
        .db
        .collection::<Doctor>(DOCTORS)
        .delete_one(doc! { "email": &email })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("doctor"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct PaymentIntentRequest {
    price: f64,
}

pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<Value>, AppError> {
    let intent = payments::create_intent(&state, request.price).await?;

    Ok(Json(json!({ "clientSecret": intent.client_secret })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    transaction_id: String,
    amount: f64,
}

pub async fn confirm_booking_payment(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    Path(id): Path<String>,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(
        booking::confirm_payment(&state, &id, &request.transaction_id, request.amount).await?,
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBookingsQuery {
    patient_email: String,
}

/// Patients can only list their own bookings: the token email must match
/// the query email.
pub async fn patient_bookings(
    State(state): State<Arc<AppState>>,
    AuthClaims(claims): AuthClaims,
    Query(query): Query<PatientBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    if claims.email != query.patient_email {
        return Err(AppError::Forbidden);
    }

    Ok(Json(
        ledger::find_by_patient_email(&state.db, &query.patient_email).await?,
    ))
}

pub async fn booking_by_id(
    State(state): State<Arc<AppState>>,
    _claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = ObjectId::parse_str(&id).map_err(|_| AppError::NotFound("booking"))?;

    ledger::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("booking"))
        .map(Json)
}

pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Admission>, AppError> {
    Ok(Json(booking::submit(&state, request).await?))
}
