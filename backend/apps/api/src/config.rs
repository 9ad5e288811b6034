//! Server configuration from the environment
//!
//! `from_lookup` takes the variable source as a closure so tests never
//! touch the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{MAX_TOKEN_TTL, MIN_TOKEN_TTL};
use platform::crypto::from_base64;
use platform::token::MIN_SECRET_LENGTH;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// HTTP layer settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
}

#[cfg(test)]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            frontend_origins: split_origins(DEFAULT_FRONTEND_ORIGINS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// `APP_ENV=production`
    pub production: bool,
    pub http: HttpConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let production = get("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"));

        let bind_addr = get("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be host:port")?;

        let http = HttpConfig {
            frontend_origins: split_origins(
                get("FRONTEND_ORIGINS").as_deref().unwrap_or(DEFAULT_FRONTEND_ORIGINS),
            ),
            request_timeout: Duration::from_secs(parse_or(
                &get,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        };

        let database_max_connections =
            parse_or(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?;

        let defaults = AuthConfig::default();
        let mut auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig {
                token_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            None if production => bail!("JWT_SECRET must be set in production"),
            None => {
                tracing::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                AuthConfig::development()
            }
        };
        if auth.token_secret.len() < MIN_SECRET_LENGTH {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LENGTH} bytes");
        }

        auth.admin_token_ttl = ttl_or(&get, "TOKEN_TTL_ADMIN_SECS", defaults.admin_token_ttl)?;
        auth.faculty_token_ttl =
            ttl_or(&get, "TOKEN_TTL_FACULTY_SECS", defaults.faculty_token_ttl)?;
        auth.student_token_ttl =
            ttl_or(&get, "TOKEN_TTL_STUDENT_SECS", defaults.student_token_ttl)?;
        auth.revoke_on_logout = parse_or(&get, "AUTH_REVOKE_ON_LOGOUT", false)?;
        auth.password_pepper = get("PASSWORD_PEPPER")
            .map(|b64| from_base64(&b64))
            .transpose()
            .context("PASSWORD_PEPPER must be base64")?;

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            production,
            http,
            auth,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

/// Token lifetime in seconds, bounded to 1 hour ..= 7 days
fn ttl_or<G>(get: &G, key: &str, default: Duration) -> anyhow::Result<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    let ttl = Duration::from_secs(parse_or(get, key, default.as_secs())?);
    if !(MIN_TOKEN_TTL..=MAX_TOKEN_TTL).contains(&ttl) {
        bail!(
            "{key} must be between {} and {} seconds",
            MIN_TOKEN_TTL.as_secs(),
            MAX_TOKEN_TTL.as_secs()
        );
    }
    Ok(ttl)
}
