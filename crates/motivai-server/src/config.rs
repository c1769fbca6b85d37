use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Fallback secret used when `SECRET_KEY` is unset. Refused in production.
pub const DEFAULT_SECRET: &str = "new-secret-key-1234567890";

/// Secrets that MUST NOT be used in production.
const PLACEHOLDER_SECRETS: &[&str] = &[DEFAULT_SECRET, "change-me", "secret"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
    Testing,
}

impl Profile {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "development" => Ok(Profile::Development),
            "production" => Ok(Profile::Production),
            "testing" => Ok(Profile::Testing),
            other => bail!("unknown MOTIVAI_CONFIG profile '{}'", other),
        }
    }

    fn default_db_path(self) -> &'static str {
        match self {
            Profile::Testing => "test.db",
            Profile::Development | Profile::Production => "motivai.db",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub debug: bool,
    pub jwt_secret: String,
    /// True when `jwt_secret` is the built-in fallback or a known placeholder.
    pub placeholder_secret: bool,
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = Profile::parse(&lookup("MOTIVAI_CONFIG").unwrap_or_default())?;

        let debug = match lookup("MOTIVAI_DEBUG") {
            Some(raw) => parse_flag(&raw)?,
            None => profile == Profile::Development,
        };

        let jwt_secret = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET.into());
        let placeholder_secret = PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str());
        if placeholder_secret && profile == Profile::Production {
            bail!("SECRET_KEY is unset or still a placeholder; refusing to start in production");
        }

        let db_path = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .map(|url| sqlite_path(&url))
            .unwrap_or_else(|| PathBuf::from(profile.default_db_path()));

        let host: IpAddr = lookup("MOTIVAI_HOST")
            .unwrap_or_else(|| "0.0.0.0".into())
            .trim()
            .parse()
            .context("MOTIVAI_HOST must be an IPv4 or IPv6 address")?;
        let port: u16 = lookup("MOTIVAI_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()?;

        Ok(Self {
            profile,
            debug,
            jwt_secret,
            placeholder_secret,
            db_path,
            host,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "motivai=debug,motivai_api=debug,motivai_db=debug,tower_http=debug"
        } else {
            "motivai=info,motivai_api=info,motivai_db=info,tower_http=info"
        }
    }
}

/// Accepts a bare path or a `sqlite://` URL (`sqlite:///motivai.db` → `motivai.db`).
fn sqlite_path(url: &str) -> PathBuf {
    match url.strip_prefix("sqlite://") {
        Some(rest) => PathBuf::from(rest.strip_prefix('/').unwrap_or(rest)),
        None => PathBuf::from(url),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{}' for MOTIVAI_DEBUG", other),
    }
}
