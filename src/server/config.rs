use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_SQLITE_PATH: &str = "data/app.db";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_PORT: u16 = 3001;

/// Database backend selected by `DATABASE_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

pub struct Config {
    pub database_kind: DatabaseKind,
    pub database_url: String,
    /// SQLite file location, used to create the parent directory on startup.
    pub sqlite_path: Option<String>,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    pub port: u16,
    pub cors_origin: Option<String>,

    pub admin_login: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `DATABASE_URL` takes precedence over the per-backend variables. Empty values are treated
    /// as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable by name
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - Missing `JWT_SECRET`, missing Postgres credentials, or a
    ///   variable that fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| var(name).ok_or(ConfigError::MissingEnvVar(name.to_string()));

        let database_kind = match var("DATABASE_TYPE").as_deref() {
            None | Some("sqlite") => DatabaseKind::Sqlite,
            Some("postgresql") | Some("postgres") => DatabaseKind::Postgres,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "DATABASE_TYPE".to_string(),
                    value: other.to_string(),
                }
                .into())
            }
        };

        let mut sqlite_path = None;
        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => match database_kind {
                DatabaseKind::Sqlite => {
                    let path = var("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());
                    let url = format!("sqlite://{}?mode=rwc", path);
                    sqlite_path = Some(path);
                    url
                }
                DatabaseKind::Postgres => {
                    let host = var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                    let port = parse_or(&var, "DB_PORT", DEFAULT_POSTGRES_PORT)?;
                    format!(
                        "postgres://{}:{}@{}:{}/{}",
                        required("DB_USER")?,
                        var("DB_PASSWORD").unwrap_or_default(),
                        host,
                        port,
                        required("DB_NAME")?
                    )
                }
            },
        };

        Ok(Self {
            database_kind,
            database_url,
            sqlite_path,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_hours: parse_or(&var, "JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            port: parse_or(&var, "PORT", DEFAULT_PORT)?,
            cors_origin: var("CORS_ORIGIN"),
            admin_login: var("ADMIN_LOGIN"),
            admin_password: var("ADMIN_PASSWORD"),
        })
    }
}

fn parse_or<T, F>(var: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
