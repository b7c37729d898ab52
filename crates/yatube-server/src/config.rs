use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use yatube_feed::FeedSettings;

const DEV_SECRET: &str = "dev-secret-change-me";

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub feed: FeedSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = FeedSettings::default();

        let jwt_secret = var_or("YATUBE_JWT_SECRET", DEV_SECRET);
        if jwt_secret == DEV_SECRET {
            warn!("YATUBE_JWT_SECRET is unset; using the development secret");
        }

        let host = var_or("YATUBE_HOST", "0.0.0.0");
        let port: u16 = parse_var("YATUBE_PORT", 3000)?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", host, port))?;

        let page_size: usize = parse_var("YATUBE_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            anyhow::bail!("YATUBE_PAGE_SIZE must be at least 1");
        }

        Ok(Self {
            addr,
            db_path: var_or("YATUBE_DB_PATH", "yatube.db").into(),
            jwt_secret,
            feed: FeedSettings {
                page_size,
                index_cache_ttl: Duration::from_secs(parse_var(
                    "YATUBE_INDEX_CACHE_SECS",
                    defaults.index_cache_ttl.as_secs(),
                )?),
                allow_self_follow: parse_var("YATUBE_ALLOW_SELF_FOLLOW", defaults.allow_self_follow)?,
            },
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().with_context(|| format!("invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
