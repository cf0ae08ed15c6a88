//! Treatment catalog. Read-only at request time; written once by the
//! startup seed when the collection is empty.

use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use tracing::info;

use crate::{database::SERVICES, error::AppError, models::Service};

fn services(db: &Database) -> Collection<Service> {
    db.collection(SERVICES)
}

/// Every known service with its full, unfiltered slot list, in catalog order.
pub async fn list_services(db: &Database) -> Result<Vec<Service>, AppError> {
    Ok(services(db).find(doc! {}).await?.try_collect().await?)
}

pub async fn service_names(db: &Database) -> Result<Vec<String>, AppError> {
    Ok(list_services(db)
        .await?
        .into_iter()
        .map(|service| service.name)
        .collect())
}

pub async fn seed_defaults(db: &Database) -> Result<(), AppError> {
    let collection = services(db);

    if collection.count_documents(doc! {}).await? > 0 {
        return Ok(());
    }

    let defaults = default_services();
    let count = defaults.len();
    collection.insert_many(&defaults).await?;

    info!("Seeded {count} catalog services");
    Ok(())
}

fn daily_slots() -> Vec<String> {
    [
        "08.00 AM - 08.30 AM",
        "08.30 AM - 09.00 AM",
        "09.00 AM - 09.30 AM",
        "09.30 AM - 10.00 AM",
        "10.00 AM - 10.30 AM",
        "10.30 AM - 11.00 AM",
        "11.00 AM - 11.30 AM",
        "11.30 AM - 12.00 PM",
        "01.00 PM - 01.30 PM",
        "01.30 PM - 02.00 PM",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_services() -> Vec<Service> {
    [
        "Teeth Orthodontics",
        "Cosmetic Dentistry",
        "Teeth Cleaning",
        "Cavity Protection",
        "Pediatric Dental",
        "Oral Surgery",
    ]
    .into_iter()
    .map(|name| Service {
        id: None,
        name: name.to_string(),
        slots: daily_slots(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::default_services;

    #[test]
    fn test_default_catalog_is_well_formed() {
        let services = default_services();

        assert!(!services.is_empty());
        for service in &services {
            assert!(!service.slots.is_empty());
        }

        let names: HashSet<_> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), services.len());
    }
}
