//! Contact-us route handlers.
//!
//! Visitors submit the form anonymously; listing and deleting submissions is
//! admin-only (enforced by the access policy middleware).

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use site_core::ContactId;

use super::DeleteResponse;
use super::extract::{ApiJson, ApiPath, present};
use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::models::{Contact, NewContact};
use crate::state::AppState;

/// Contact form submission.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl CreateContactRequest {
    fn validate(self) -> Result<NewContact> {
        match (present(self.name), present(self.email), present(self.message)) {
            (Some(name), Some(email), Some(message)) => Ok(NewContact {
                name,
                email,
                message,
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }
}

/// Response for a created contact.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub contact: Contact,
}

/// List all submissions, oldest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = ContactRepository::new(state.pool()).list().await?;
    Ok(Json(contacts))
}

/// Store a new submission.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateContactRequest>,
) -> Result<Json<ContactResponse>> {
    let new_contact = body.validate()?;
    let contact = ContactRepository::new(state.pool())
        .create(&new_contact)
        .await?;

    tracing::info!(contact_id = %contact.id, "Contact submission stored");
    Ok(Json(ContactResponse {
        success: true,
        contact,
    }))
}

/// Delete a submission.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ContactId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = ContactRepository::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_complete_submission() {
        let contact = request("Ada", "ada@example.com", "Hello").validate().unwrap();
        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.email, "ada@example.com");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(request("Ada", "", "Hello").validate().is_err());
        assert!(request("  ", "ada@example.com", "Hello").validate().is_err());

        let missing = CreateContactRequest {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            message: None,
        };
        assert!(matches!(missing.validate(), Err(AppError::BadRequest(_))));
    }
}
