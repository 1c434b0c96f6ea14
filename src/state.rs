use sqlx::SqlitePool;

use crate::{
    config::{Config, NotFoundMode},
    db::{NameStore, UrlStore},
    service::{ShortenPolicy, Shortener},
};

#[derive(Clone)]
pub struct AppState {
    pub shortener: Shortener,
    pub names: NameStore,
    pub base_url: Option<String>,
    pub not_found: NotFoundMode,
}

impl AppState {
    pub fn new(pool: SqlitePool, policy: ShortenPolicy) -> Self {
        Self {
            shortener: Shortener::new(UrlStore::new(pool.clone()), policy),
            names: NameStore::new(pool),
            base_url: None,
            not_found: NotFoundMode::Inline,
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            not_found: config.not_found,
            ..Self::new(pool, config.shorten)
        }
    }

    pub fn with_shortener(mut self, shortener: Shortener) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn with_not_found(mut self, mode: NotFoundMode) -> Self {
        self.not_found = mode;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Root that short codes are appended to: the configured base URL, or
    /// `http://<host>` of the current request.
    pub fn link_root(&self, host: Option<&str>) -> String {
        match (&self.base_url, host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{host}"),
            (None, None) => "http://localhost".to_string(),
        }
    }
}
