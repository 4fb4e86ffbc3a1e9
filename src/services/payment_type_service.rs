use crate::api::controllers::dto::payment_type_dto::{
    CreatePaymentTypeRequest, UpdatePaymentTypeRequest,
};
use crate::data::models::payment_type::{NewPaymentType, PaymentType, UpdatePaymentType};
use crate::data::repos::implementors::payment_type_repo::PaymentTypeRepo;
use crate::data::repos::traits::repository::VersionedUpdate;
use crate::services::errors::PaymentTypeServiceError;

/// Payment profiles scoped to their owning user. Acting on another user's
/// record looks exactly like acting on a record that does not exist.
pub struct PaymentTypeService;

impl PaymentTypeService {
    pub fn new() -> Self {
        PaymentTypeService
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentType>, PaymentTypeServiceError> {
        let repo = PaymentTypeRepo::new();

        let payment_types = repo
            .get_by_user_id(user_id)
            .await
            .map_err(|_| PaymentTypeServiceError::DatabaseError)?;

        Ok(payment_types.unwrap_or_default())
    }

    pub async fn get(
        &self,
        payment_type_id: i32,
        user_id: i32,
    ) -> Result<Option<PaymentType>, PaymentTypeServiceError> {
        let repo = PaymentTypeRepo::new();

        repo.get_scoped(payment_type_id, user_id)
            .await
            .map_err(|_| PaymentTypeServiceError::DatabaseError)
    }

    pub async fn create(
        &self,
        user_id: i32,
        request: &CreatePaymentTypeRequest,
    ) -> Result<PaymentType, PaymentTypeServiceError> {
        validate_field("description", &request.description)?;
        validate_field("account_number", &request.account_number)?;

        let repo = PaymentTypeRepo::new();

        let new_payment_type = NewPaymentType {
            user_id,
            description: &request.description,
            account_number: &request.account_number,
        };

        let new_id = repo
            .add_returning_id(new_payment_type)
            .await
            .map_err(|_| PaymentTypeServiceError::DatabaseError)?;

        repo.get_scoped(new_id, user_id)
            .await
            .map_err(|_| PaymentTypeServiceError::DatabaseError)?
            .ok_or(PaymentTypeServiceError::DatabaseError)
    }

    /// Versioned edit; conflicts are reported once. A conflict on a record
    /// that no longer exists is NotFound, per the recovery rule.
    pub async fn update(
        &self,
        payment_type_id: i32,
        user_id: i32,
        request: &UpdatePaymentTypeRequest,
    ) -> Result<(), PaymentTypeServiceError> {
        if let Some(description) = request.description.as_deref() {
            validate_field("description", description)?;
        }
        if let Some(account_number) = request.account_number.as_deref() {
            validate_field("account_number", account_number)?;
        }

        let repo = PaymentTypeRepo::new();

        let form = UpdatePaymentType {
            description: request.description.as_deref(),
            account_number: request.account_number.as_deref(),
        };

        match repo
            .update_versioned(payment_type_id, user_id, request.version, form)
            .await
        {
            Ok(VersionedUpdate::Updated) => Ok(()),
            Ok(VersionedUpdate::Conflict) => Err(PaymentTypeServiceError::ConcurrencyConflict),
            Ok(VersionedUpdate::Missing) => Err(PaymentTypeServiceError::PaymentTypeNotFound),
            Err(e) => {
                tracing::error!(payment_type_id, error = %e, "payment type update failed");
                Err(PaymentTypeServiceError::DatabaseError)
            }
        }
    }

    pub async fn delete(
        &self,
        payment_type_id: i32,
        user_id: i32,
    ) -> Result<(), PaymentTypeServiceError> {
        let repo = PaymentTypeRepo::new();

        let removed = repo
            .delete_scoped(payment_type_id, user_id)
            .await
            .map_err(|_| PaymentTypeServiceError::DatabaseError)?;

        if removed {
            Ok(())
        } else {
            Err(PaymentTypeServiceError::PaymentTypeNotFound)
        }
    }
}

impl Default for PaymentTypeService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_field(name: &str, value: &str) -> Result<(), PaymentTypeServiceError> {
    if value.trim().is_empty() {
        return Err(PaymentTypeServiceError::ValidationFailed(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}
