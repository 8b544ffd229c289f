use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
}

/// Where the auth service finds its users: a read-only list from this file,
/// or the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Memory,
    #[default]
    Database,
}

/// Credential pair for `AuthMode::Memory`, injected at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default)]
    pub users: Vec<StaticUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            jwt_secret: String::new(),
            upload_dir: default_upload_dir(),
            users: Vec::new(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` if present, otherwise start from defaults, then let
    /// environment variables override. Missing file is not an error; missing
    /// required values are caught by the per-service validators.
    pub fn load() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_from_env();
        Ok(cfg)
    }

    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if self.database.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.database.url = url;
            }
        }
        if self.auth.jwt_secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.auth.jwt_secret = secret;
            }
        }
        if let Ok(mode) = std::env::var("AUTH_MODE") {
            match mode.to_lowercase().as_str() {
                "memory" => self.auth.mode = AuthMode::Memory,
                "database" => self.auth.mode = AuthMode::Database,
                _ => {}
            }
        }
    }

    /// Required by every service that talks to the store.
    pub fn validate_database(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; set it in config.toml or via DATABASE_URL"
            ));
        }
        let lower = self.database.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        Ok(())
    }

    /// Required by the auth service regardless of mode. A missing signing
    /// secret must abort startup rather than fall back to a default.
    pub fn validate_auth(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(anyhow!(
                "auth.jwt_secret is empty; set it in config.toml or via JWT_SECRET"
            ));
        }
        match self.auth.mode {
            AuthMode::Memory => {
                if self.auth.users.is_empty() {
                    return Err(anyhow!("auth.mode = memory requires at least one [[auth.users]] entry"));
                }
                Ok(())
            }
            AuthMode::Database => self.validate_database(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.auth.mode, AuthMode::Database);
        assert_eq!(cfg.auth.upload_dir, "uploads");
    }

    #[test]
    fn parses_memory_mode_with_users() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [auth]
            mode = "memory"
            jwt_secret = "s3cret"

            [[auth.users]]
            username = "alice"
            password = "wonderland"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.auth.mode, AuthMode::Memory);
        assert_eq!(cfg.auth.users.len(), 1);
        assert!(cfg.validate_auth().is_ok());
    }

    #[test]
    fn auth_validation_requires_secret() {
        let cfg = AppConfig::default();
        assert!(cfg.validate_auth().is_err());
    }

    #[test]
    fn database_validation_rejects_non_postgres_url() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "mysql://localhost/x".into();
        assert!(cfg.validate_database().is_err());
    }
}
