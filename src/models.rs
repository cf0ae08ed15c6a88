use mongodb::bson::{DateTime, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A treatment offering and the daily slot labels it can be booked into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slots: Vec<String>,
}

/// One appointment in the booking ledger.
///
/// The tuple (treatment, date, patientName) identifies a resubmission; slot
/// and patientEmail are deliberately outside that key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub treatment: String,
    pub date: String,
    pub slot: String,
    pub patient_name: String,
    pub patient_email: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Record of a charge, linked to its booking by transactionId only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub amount: f64,
    pub transaction_id: String,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Plain,
    Admin,
}

/// A registered user, keyed by email. Profile fields are caller-supplied and
/// schemaless, so they ride along as a flattened document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing, default)]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub profile: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub specialty: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Plain).unwrap(), "\"plain\"");
    }

    #[test]
    fn test_role_defaults_to_plain() {
        assert_eq!(Role::default(), Role::Plain);
    }

    #[test]
    fn test_booking_field_names_are_camel_case() {
        let booking = Booking {
            id: None,
            treatment: "Teeth Cleaning".to_string(),
            date: "May 17, 2022".to_string(),
            slot: "9am".to_string(),
            patient_name: "Ada".to_string(),
            patient_email: "ada@example.com".to_string(),
            paid: false,
            transaction_id: None,
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert!(value.get("patientName").is_some());
        assert!(value.get("patientEmail").is_some());
        assert!(value.get("transactionId").is_none());
    }
}
