//! Admin account commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the admin, or reset its password if the username exists
//! site-cli admin upsert -u admin -p 'a-long-password'
//!
//! # Print a hash (e.g. to paste into a database by hand)
//! site-cli admin hash-password 'a-long-password'
//! ```

use site_server::db::AdminRepository;
use site_server::services::auth;

use super::{CommandError, connect};

/// Create an admin or replace the password of an existing one.
///
/// # Errors
///
/// Returns an error if hashing fails or the database cannot be written.
pub async fn upsert(username: &str, password: &str) -> Result<(), CommandError> {
    let password_hash = auth::hash_password(password)?;

    let pool = connect().await?;
    let admin = AdminRepository::new(&pool)
        .upsert(username, &password_hash)
        .await?;

    tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin account saved");
    Ok(())
}

/// Print an Argon2 hash for a password.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<(), CommandError> {
    let hash = auth::hash_password(password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{hash}");
    }
    Ok(())
}
