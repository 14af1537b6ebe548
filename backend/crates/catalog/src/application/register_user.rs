//! Register User Use Case
//!
//! Creates a user account. Open to anonymous callers.

use std::sync::Arc;

use kernel::error::{app_error::ResultExt, kind::ErrorKind};
use kernel::model::{NewUser, UserView};
use platform::password::ClearTextSecret;

use crate::application::config::CatalogConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{CatalogError, CatalogResult};

/// Register user use case
pub struct RegisterUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<CatalogConfig>,
}

impl<U> RegisterUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<CatalogConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: NewUser) -> CatalogResult<UserView> {
        // The admin name belongs to the configured administrator
        if self.config.is_admin_name(&input.username) {
            return Err(CatalogError::UsernameTaken);
        }

        let secret = ClearTextSecret::new(input.secret);
        let secret_hash = secret
            .hash(self.config.pepper())
            .map_app_err(ErrorKind::InternalServerError, "Secret hashing failed")?;

        let user = User::new(input.username, input.email, secret_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(username = %user.username, "User registered");

        Ok(user.view())
    }
}
