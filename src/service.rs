use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    db::{models::UrlMapping, UrlStore},
    error::{AppError, Result, StorageError},
    utils::{generate_short_code, normalize_long_url, valid_short_code, valid_url},
};

pub type CodeSource = Arc<dyn Fn(usize) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenPolicy {
    /// Reject submissions that do not look like a URL.
    pub validate: bool,
    pub code_length: usize,
    /// Upper bound on inserts tried before giving up on code collisions.
    pub max_attempts: u32,
}

impl Default for ShortenPolicy {
    fn default() -> Self {
        Self {
            validate: true,
            code_length: crate::utils::DEFAULT_CODE_LENGTH,
            max_attempts: 5,
        }
    }
}

/// Turns submitted URLs into stored mappings and resolves codes back.
#[derive(Clone)]
pub struct Shortener {
    store: UrlStore,
    policy: ShortenPolicy,
    codes: CodeSource,
}

impl Shortener {
    pub fn new(store: UrlStore, policy: ShortenPolicy) -> Self {
        Self::with_code_source(store, policy, Arc::new(generate_short_code))
    }

    pub fn with_code_source(store: UrlStore, policy: ShortenPolicy, codes: CodeSource) -> Self {
        Self {
            store,
            policy,
            codes,
        }
    }

    pub fn store(&self) -> &UrlStore {
        &self.store
    }

    /// Normalizes and (per policy) validates `input`, then stores it under a
    /// fresh code. A colliding code is replaced with a new one until
    /// `max_attempts` inserts have been tried.
    pub async fn shorten(&self, input: &str) -> Result<UrlMapping> {
        let trimmed = input.trim();
        // an empty host can never be redirected to, even with validation off
        if trimmed.is_empty() {
            return Err(AppError::InvalidUrl(String::new()));
        }

        let long_url = normalize_long_url(trimmed);
        if self.policy.validate && !valid_url(&long_url) {
            warn!(url = %trimmed, "Invalid URL format");
            return Err(AppError::InvalidUrl(trimmed.to_string()));
        }

        for attempt in 1..=self.policy.max_attempts {
            let short_code = (self.codes)(self.policy.code_length);
            match self.store.save(&short_code, &long_url).await {
                Ok(()) => {
                    info!(short_code = %short_code, long_url = %long_url, "Created short URL");
                    return Ok(UrlMapping {
                        short_code,
                        long_url,
                    });
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(short_code = %short_code, attempt, "Short code collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.policy.max_attempts,
        })
    }

    /// Looks up the target of `short_code`. Codes that could never have been
    /// generated resolve to `None` without touching the database.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>> {
        if !valid_short_code(short_code) {
            return Ok(None);
        }
        Ok(self.store.lookup(short_code).await?)
    }
}
