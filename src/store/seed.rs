//! Sample data for fresh deployments.
//!
//! Seeding is idempotent per collection: a collection that already holds
//! documents is left alone, so restarting against a shared backend never
//! duplicates the fixtures.

use crate::store::document::{Document, DocumentId};
use crate::store::filter::Filter;
use crate::store::{collections, Store, StoreError};

/// What the seeding pass actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub users_inserted: usize,
    pub rides_inserted: usize,
}

/// Populate empty collections with one user per role and a pending ride
/// linking the sample driver to the sample customer.
pub async fn seed_sample_data(store: &dyn Store) -> Result<SeedOutcome, StoreError> {
    let mut outcome = SeedOutcome::default();

    if store.count_documents(collections::USERS, Filter::new()).await? == 0 {
        let ids = store.insert_many(collections::USERS, sample_users()).await?;
        outcome.users_inserted = ids.len();
        tracing::info!(count = ids.len(), "Sample users inserted");
    }

    if store.count_documents(collections::RIDES, Filter::new()).await? == 0 {
        let driver = store
            .find_one(collections::USERS, Filter::new().eq("role", "driver"))
            .await?;
        let customer = store
            .find_one(collections::USERS, Filter::new().eq("role", "customer"))
            .await?;

        // Without both roles present there is nothing sensible to link.
        if let (Some(driver), Some(customer)) = (driver, customer) {
            if let (Some(driver_id), Some(customer_id)) = (driver.id(), customer.id()) {
                store
                    .insert_one(collections::RIDES, sample_ride(customer_id, driver_id))
                    .await?;
                outcome.rides_inserted = 1;
                tracing::info!("Sample ride inserted");
            }
        }
    }

    Ok(outcome)
}

fn sample_users() -> Vec<Document> {
    vec![
        Document::new()
            .with("name", "Ali Customer")
            .with("email", "ali@example.com")
            .with("password", "12345")
            .with("role", "customer"),
        Document::new()
            .with("name", "John Driver")
            .with("email", "john@example.com")
            .with("password", "abc123")
            .with("role", "driver")
            .with("available", true),
        Document::new()
            .with("name", "Admin Boss")
            .with("email", "admin@example.com")
            .with("password", "admin123")
            .with("role", "admin"),
    ]
}

fn sample_ride(customer_id: DocumentId, driver_id: DocumentId) -> Document {
    Document::new()
        .with("customerId", customer_id.to_string())
        .with("driverId", driver_id.to_string())
        .with("pickup", "KL Sentral")
        .with("destination", "Mid Valley")
        .with("status", "pending")
}
