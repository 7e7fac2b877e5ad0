use anyhow::Result;
use serde::Deserialize;

/// Configuration for the auth/items service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceConfig {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadConfig,
}

/// Configuration for the metered items service.
#[derive(Debug, Clone, Deserialize)]
pub struct MeteredServiceConfig {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    pub port: u16,
    /// Allowed CORS origins. Set AUTH_ITEMS__API__CORS_ALLOWED_ORIGINS in production.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry")]
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_jwt_expiry() -> u64 { 24 }
fn default_upload_dir() -> String { "images".to_string() }
fn default_upload_max_bytes() -> usize { 10 * 1024 * 1024 }
fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const MIN_JWT_SECRET_LEN: usize = 32;

pub fn validate_auth(cfg: &AuthServiceConfig) -> Result<()> {
    if cfg.auth.jwt_secret == DEFAULT_JWT_SECRET {
        anyhow::bail!(
            "SECURITY ERROR: JWT secret must be changed from default value '{}'. \
            Set AUTH_ITEMS__AUTH__JWT_SECRET to a strong random value.",
            DEFAULT_JWT_SECRET
        );
    }

    if cfg.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        anyhow::bail!(
            "CONFIG ERROR: JWT secret must be at least {} characters (current: {})",
            MIN_JWT_SECRET_LEN,
            cfg.auth.jwt_secret.len()
        );
    }

    if cfg.uploads.dir.trim().is_empty() {
        anyhow::bail!("CONFIG ERROR: uploads.dir cannot be empty");
    }

    validate_database(&cfg.database)?;

    tracing::info!("Configuration validation passed");
    Ok(())
}

pub fn validate_metered(cfg: &MeteredServiceConfig) -> Result<()> {
    validate_database(&cfg.database)?;
    tracing::info!("Configuration validation passed");
    Ok(())
}

fn validate_database(db: &DatabaseConfig) -> Result<()> {
    if db.path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(&db.path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            anyhow::bail!(
                "CONFIG ERROR: Database directory does not exist: {}",
                parent.display()
            );
        }
    }
    Ok(())
}

pub fn load_auth() -> Result<AuthServiceConfig> {
    let cfg: AuthServiceConfig = config::Config::builder()
        .add_source(config::File::with_name("auth-items").required(false))
        .add_source(config::Environment::with_prefix("AUTH_ITEMS").separator("__"))
        .set_default("api.bind", "0.0.0.0")?
        .set_default("api.port", 8080)?
        .set_default("database.path", "./auth-items.db")?
        .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
        .set_default("auth.jwt_expiry_hours", 24)?
        .set_default("uploads.dir", "images")?
        .set_default("uploads.max_bytes", 10 * 1024 * 1024)?
        .build()?
        .try_deserialize()?;

    validate_auth(&cfg)?;

    Ok(cfg)
}

pub fn load_metered() -> Result<MeteredServiceConfig> {
    let cfg: MeteredServiceConfig = config::Config::builder()
        .add_source(config::File::with_name("metered-items").required(false))
        .add_source(config::Environment::with_prefix("METERED_ITEMS").separator("__"))
        .set_default("api.bind", "0.0.0.0")?
        .set_default("api.port", 8081)?
        .set_default("database.path", "./metered-items.db")?
        .build()?
        .try_deserialize()?;

    validate_metered(&cfg)?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config(secret: &str) -> AuthServiceConfig {
        AuthServiceConfig {
            api: ApiConfig {
                bind: default_bind(),
                port: 8080,
                cors_allowed_origins: default_cors_allowed_origins(),
            },
            database: DatabaseConfig { path: ":memory:".to_string() },
            auth: AuthConfig {
                jwt_secret: secret.to_string(),
                jwt_expiry_hours: 1,
            },
            uploads: UploadConfig {
                dir: default_upload_dir(),
                max_bytes: default_upload_max_bytes(),
            },
        }
    }

    #[test]
    fn test_default_secret_is_rejected() {
        assert!(validate_auth(&auth_config(DEFAULT_JWT_SECRET)).is_err());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        assert!(validate_auth(&auth_config("too-short")).is_err());
    }

    #[test]
    fn test_strong_secret_is_accepted() {
        let cfg = auth_config("a-sufficiently-long-secret-for-hs256-signing");
        assert!(validate_auth(&cfg).is_ok());
    }

    #[test]
    fn test_missing_database_directory_is_rejected() {
        let cfg = MeteredServiceConfig {
            api: ApiConfig {
                bind: default_bind(),
                port: 8081,
                cors_allowed_origins: Vec::new(),
            },
            database: DatabaseConfig {
                path: "/definitely/not/a/real/dir/items.db".to_string(),
            },
        };
        assert!(validate_metered(&cfg).is_err());
    }

    #[test]
    fn test_bare_filename_database_is_accepted() {
        let cfg = MeteredServiceConfig {
            api: ApiConfig {
                bind: default_bind(),
                port: 8081,
                cors_allowed_origins: Vec::new(),
            },
            database: DatabaseConfig { path: "items.db".to_string() },
        };
        assert!(validate_metered(&cfg).is_ok());
    }
}
