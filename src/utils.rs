use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

pub const DEFAULT_CODE_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?i:https?)://)?([A-Za-z0-9-]+\.)+[A-Za-z]{2,}(:\d+)?(/\S*)?$")
        .expect("url pattern is a valid regex")
});

// generating a random short code from the thread-local rng
pub fn generate_short_code(length: usize) -> String {
    generate_short_code_with(&mut rand::rng(), length)
}

pub fn generate_short_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

// checking validity of the long url
pub fn valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

/// Trims the submitted value and defaults the scheme to `http://`.
pub fn normalize_long_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// short codes we generate are plain alphanumerics, anything else cannot exist
pub fn valid_short_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= 64 && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
