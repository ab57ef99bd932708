use shared::{InviteRequest, InviteResponse};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::auth_service::{hash_password, validate_password};
use crate::domain::email_service::EmailService;
use crate::domain::models::profile::is_valid_phone;
use crate::domain::NAME_MISMATCH;
use crate::error::ApiError;
use crate::storage::{
    CondominiumRepository, DepartmentRepository, NewDepartment, NewProfile, NewUser,
    ProfileRepository, UserRepository,
};

/// Provisions a resident: the user account, the department and the
/// habitant profile are created as one unit, then the invitation email is
/// dispatched. The whole sequence runs inside one transaction, so a
/// failure at any step after user creation reverts all prior writes.
#[derive(Clone)]
pub struct InvitationService {
    db: DbConnection,
    email: EmailService,
}

impl InvitationService {
    pub fn new(db: DbConnection, email: EmailService) -> Self {
        Self { db, email }
    }

    pub async fn invite(&self, request: &InviteRequest) -> Result<InviteResponse, ApiError> {
        Self::validate(request)?;

        let mut tx = self.db.pool().begin().await.map_err(ApiError::from)?;

        let condominium = CondominiumRepository::find_by_name(&mut *tx, &request.name_condominium)
            .await?
            .ok_or_else(|| ApiError::Validation(NAME_MISMATCH.to_string()))?;

        let password_hash = hash_password(&request.password)?;

        let user = UserRepository::insert(
            &mut *tx,
            &NewUser {
                username: &request.username,
                first_name: &request.department_owner,
                last_name: "",
                email: &request.email,
                password_hash: &password_hash,
                is_staff: false,
            },
        )
        .await?;

        let department = DepartmentRepository::insert(
            &mut *tx,
            &NewDepartment {
                condominium_id: condominium.id,
                department_number: request.department_number,
                department_block: request.department_block,
                number_habitants: request.number_habitants,
                department_owner: &request.department_owner,
            },
        )
        .await?;

        let profile = ProfileRepository::insert(
            &mut *tx,
            &NewProfile {
                user_id: user.id,
                department_id: department.id,
                p_number: &request.p_number,
                p_number_emergency: &request.p_number_emergency,
            },
        )
        .await?;

        // Delivery happens before commit: a failed notification must not
        // leave a provisioned account whose credentials were never sent.
        self.email
            .send_invitation(&request.email, &request.username, &request.password)?;

        tx.commit().await.map_err(ApiError::from)?;

        info!("Invited {} to {}", user.username, condominium.name_condominium);

        Ok(InviteResponse {
            user: user.summary(),
            profile: profile.summary(),
            department: department.summary(),
            condominium: condominium.identity(),
        })
    }

    fn validate(request: &InviteRequest) -> Result<(), ApiError> {
        if request.username.trim().is_empty() {
            return Err(ApiError::Validation("A username is required.".to_string()));
        }

        if !request.email.contains('@') {
            return Err(ApiError::Validation(
                "A valid email address is required.".to_string(),
            ));
        }

        if request.department_owner.trim().is_empty() {
            return Err(ApiError::Validation(
                "The resident's display name is required.".to_string(),
            ));
        }

        validate_password(&request.password)?;

        if !(0..=9999).contains(&request.department_number) {
            return Err(ApiError::Validation(
                "Department number must be between 0 and 9999.".to_string(),
            ));
        }

        if !(0..=9999).contains(&request.department_block) {
            return Err(ApiError::Validation(
                "Department block must be between 0 and 9999.".to_string(),
            ));
        }

        if !(0..=4).contains(&request.number_habitants) {
            return Err(ApiError::Validation(
                "Number of habitants must be between 0 and 4.".to_string(),
            ));
        }

        for phone in [&request.p_number, &request.p_number_emergency] {
            if !is_valid_phone(phone) {
                return Err(ApiError::Validation(
                    "Phone number must be entered in the format: '+999999999'. \
                     Up to 15 digits allowed."
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}
