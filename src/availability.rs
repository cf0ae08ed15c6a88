//! Per-date slot availability: the catalog's slot lists minus whatever the
//! ledger already holds for that date.

use std::collections::HashSet;

use mongodb::Database;
use serde::Serialize;

use crate::{catalog, error::AppError, ledger, models::{Booking, Service}};

/// Date label substituted when the caller omits `date`. Kept from the
/// original API contract: callers relying on it get availability for this
/// fixed day rather than a rejection.
pub const DEFAULT_DATE: &str = "May 17, 2022";

#[derive(Debug, Serialize)]
pub struct ServiceAvailability {
    pub name: String,
    pub slots: Vec<String>,
}

/// Remaining open slots per service, in catalog order.
///
/// A slot is taken once a booking for the same treatment holds it on this
/// date; duplicate bookings of one slot collapse to a single exclusion.
/// Fully booked services stay in the result with an empty slot list.
pub fn open_slots(services: &[Service], bookings: &[Booking]) -> Vec<ServiceAvailability> {
    services
        .iter()
        .map(|service| {
            let taken: HashSet<&str> = bookings
                .iter()
                .filter(|booking| booking.treatment == service.name)
                .map(|booking| booking.slot.as_str())
                .collect();

            ServiceAvailability {
                name: service.name.clone(),
                slots: service
                    .slots
                    .iter()
                    .filter(|slot| !taken.contains(slot.as_str()))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

pub async fn for_date(db: &Database, date: &str) -> Result<Vec<ServiceAvailability>, AppError> {
    let services = catalog::list_services(db).await?;
    let bookings = ledger::find_by_date(db, date).await?;

    Ok(open_slots(&services, &bookings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, slots: &[&str]) -> Service {
        Service {
            id: None,
            name: name.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn booking(treatment: &str, slot: &str) -> Booking {
        Booking {
            id: None,
            treatment: treatment.to_string(),
            date: "May 17, 2022".to_string(),
            slot: slot.to_string(),
            patient_name: "Ada".to_string(),
            patient_email: "ada@example.com".to_string(),
            paid: false,
            transaction_id: None,
        }
    }

    #[test]
    fn test_no_bookings_returns_full_slot_lists() {
        let services = vec![service("Cleaning", &["9am", "10am"]), service("Surgery", &["9am"])];

        let open = open_slots(&services, &[]);

        assert_eq!(open.len(), 2);
        assert_eq!(open[0].slots, vec!["9am", "10am"]);
        assert_eq!(open[1].slots, vec!["9am"]);
    }

    #[test]
    fn test_booked_slot_is_excluded() {
        let services = vec![service("Cleaning", &["9am", "10am"])];
        let bookings = vec![booking("Cleaning", "9am")];

        let open = open_slots(&services, &bookings);

        assert_eq!(open[0].name, "Cleaning");
        assert_eq!(open[0].slots, vec!["10am"]);
    }

    #[test]
    fn test_other_service_bookings_do_not_interfere() {
        let services = vec![service("Cleaning", &["9am", "10am"]), service("Surgery", &["9am"])];
        let bookings = vec![booking("Surgery", "9am")];

        let open = open_slots(&services, &bookings);

        assert_eq!(open[0].slots, vec!["9am", "10am"]);
        assert!(open[1].slots.is_empty());
    }

    #[test]
    fn test_duplicate_slot_bookings_collapse() {
        let services = vec![service("Cleaning", &["9am", "10am", "11am"])];
        let bookings = vec![booking("Cleaning", "9am"), booking("Cleaning", "9am")];

        let open = open_slots(&services, &bookings);

        assert_eq!(open[0].slots, vec!["10am", "11am"]);
    }

    #[test]
    fn test_fully_booked_service_stays_listed() {
        let services = vec![service("Cleaning", &["9am"])];
        let bookings = vec![booking("Cleaning", "9am")];

        let open = open_slots(&services, &bookings);

        assert_eq!(open.len(), 1);
        assert!(open[0].slots.is_empty());
    }

    #[test]
    fn test_slot_ordering_is_preserved() {
        let services = vec![service("Cleaning", &["11am", "9am", "10am"])];
        let bookings = vec![booking("Cleaning", "9am")];

        let open = open_slots(&services, &bookings);

        assert_eq!(open[0].slots, vec!["11am", "10am"]);
    }
}
