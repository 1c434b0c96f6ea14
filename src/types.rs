use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub long_url: String,
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}

#[derive(Debug, Serialize)]
pub struct UrlDetailResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}

/// Fields the shortener page can show besides the empty form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortenerView {
    pub short_url: Option<String>,
    pub error_message: Option<String>,
    pub input_value: Option<String>,
}

impl ShortenerView {
    pub fn created(short_url: String) -> Self {
        Self {
            short_url: Some(short_url),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>, input_value: Option<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            input_value,
            ..Self::default()
        }
    }
}
