use crate::common::raw_field::RawField;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub name: RawField,
    pub message: RawField,
    pub author_ip: RawField,
    pub created_at: DateTime<Utc>,
}

pub struct CreateMessageArgs<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub message: &'a str,
    pub author_ip: &'a str,
}

pub struct UpdateMessageArgs<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub author_ip: &'a str,
}
