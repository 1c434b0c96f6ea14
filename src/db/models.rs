use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct NameRecord {
    pub id: i64,
    pub name: String,
}
