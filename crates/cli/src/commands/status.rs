//! Database status report.

use site_server::db::{
    AdminRepository, ContactRepository, PricingRepository, ProjectRepository,
    SocialLinkRepository,
};

use super::{CommandError, connect};

/// Log the number of rows in each table.
///
/// # Errors
///
/// Returns an error if a count query fails (e.g. migrations not applied).
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let counts = [
        ("admins", AdminRepository::new(&pool).count().await?),
        ("contacts", ContactRepository::new(&pool).count().await?),
        ("pricing", PricingRepository::new(&pool).count().await?),
        ("projects", ProjectRepository::new(&pool).count().await?),
        ("social_links", SocialLinkRepository::new(&pool).count().await?),
    ];

    tracing::info!("Database status");
    for (table, count) in counts {
        tracing::info!("  {table}: {count}");
    }

    Ok(())
}
