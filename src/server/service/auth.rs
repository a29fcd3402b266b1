//! Registration, login and current-user lookup.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, Role, User},
    service::token::TokenService,
    util::{password, validation},
};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub login: String,
    pub password: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Creates a student account and logs it in.
    ///
    /// # Returns
    /// - `Ok((token, user))` - New account with an access token
    /// - `Err(AppError::BadRequest)` - Invalid login, password, name or class
    /// - `Err(AppError::Conflict)` - Login already taken
    pub async fn register(&self, param: RegisterParam) -> Result<(String, User), AppError> {
        let login = param.login.trim().to_string();
        validation::validate_login(&login)?;
        validation::validate_password(&param.password)?;
        let name = validation::normalize_name(&param.name)?;
        let (class_grade, class_letter) =
            validation::normalize_class(param.class_grade, param.class_letter)?;

        let repo = UserRepository::new(self.db);
        if repo.find_by_login(&login).await?.is_some() {
            return Err(AppError::Conflict("Login is already taken".to_string()));
        }

        let user = repo
            .create(CreateUserParam {
                login,
                password_hash: password::hash(&param.password)?,
                name,
                class_grade,
                class_letter,
                role: Role::Student,
            })
            .await?;

        tracing::info!("Registered user {} ({})", user.login, user.id);

        let token = self.tokens.issue(&user)?;

        Ok((token, user))
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown logins and wrong passwords produce the same error.
    ///
    /// # Returns
    /// - `Ok((token, user))` - Credentials valid; `last_login_at` updated
    /// - `Err(AuthError::InvalidCredentials)` - Login unknown or password wrong
    pub async fn login(&self, login: &str, password: &str) -> Result<(String, User), AppError> {
        let repo = UserRepository::new(self.db);

        let Some(mut user) = repo.find_by_login(login.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        repo.touch_last_login(user.id).await?;
        if let Some(fresh) = repo.find_by_id(user.id).await? {
            user = fresh;
        }

        let token = self.tokens.issue(&user)?;

        Ok((token, user))
    }
}
