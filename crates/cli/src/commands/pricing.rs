//! Pricing plan maintenance.

use site_server::db::PricingRepository;

use super::{CommandError, connect};

/// Delete every pricing plan.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn reset() -> Result<(), CommandError> {
    let pool = connect().await?;
    let deleted = PricingRepository::new(&pool).delete_all().await?;

    tracing::info!(deleted, "Pricing table cleared");
    Ok(())
}
