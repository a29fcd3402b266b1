use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    model::user::{CreateUserParam, Role},
    util::password,
};

/// Connects to the configured database and runs pending migrations.
///
/// For SQLite the parent directory of the database file is created first so a fresh checkout
/// can start without manual setup. All pending SeaORM migrations are then applied to bring the
/// schema up to date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to prepare storage, connect, or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    if let Some(path) = &config.sqlite_path {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Connected to {:?} database", config.database_kind);

    Ok(db)
}

/// Ensures at least one administrator can log in.
///
/// When no admin exists and `ADMIN_LOGIN`/`ADMIN_PASSWORD` are configured, creates that admin
/// account. Otherwise logs a warning so the operator knows the admin dashboard is unreachable.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Configuration carrying the optional bootstrap credentials
///
/// # Returns
/// - `Ok(())` - An admin exists or none could be created from configuration
/// - `Err(AppError)` - Database or hashing error
pub async fn check_for_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.admin_exists().await? {
        return Ok(());
    }

    let (Some(login), Some(admin_password)) = (&config.admin_login, &config.admin_password)
    else {
        tracing::warn!(
            "No admin account exists; set ADMIN_LOGIN and ADMIN_PASSWORD to create one on startup"
        );
        return Ok(());
    };

    if user_repo.find_by_login(login).await?.is_some() {
        tracing::warn!(
            "No admin account exists and login '{}' is taken by a student; not creating an admin",
            login
        );
        return Ok(());
    }

    user_repo
        .create(CreateUserParam {
            login: login.clone(),
            password_hash: password::hash(admin_password)?,
            name: "Administrator".to_string(),
            class_grade: None,
            class_letter: None,
            role: Role::Admin,
        })
        .await?;

    tracing::info!("Created bootstrap admin account '{}'", login);

    Ok(())
}

/// Builds the CORS layer for the API.
///
/// Restricts browsers to `CORS_ORIGIN` when it is set and allows any origin otherwise.
///
/// # Returns
/// - `Ok(CorsLayer)` - Layer allowing the API's methods plus the auth and JSON headers
/// - `Err(AppError::ConfigErr)` - `CORS_ORIGIN` is not a valid header value
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = match &config.cors_origin {
        Some(origin) => {
            let value =
                HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
                    name: "CORS_ORIGIN".to_string(),
                    value: origin.clone(),
                })?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::any(),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}
