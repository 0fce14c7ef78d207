use crate::common::raw_field::RawField;
use crate::entities::messages::{CreateMessageArgs, Message, UpdateMessageArgs};
use async_trait::async_trait;
use sqlx::{MySql, Pool};

const TABLE_NAME: &str = "Messages";
const READ_FIELDS: &str = "id, name, message, author_ip, created_at";

/// Row access for the `Messages` table. Every read and write only ever
/// touches active rows, and the `u64` returned by writes is the number of
/// rows affected.
#[async_trait]
pub trait MessagesRepository: Send + Sync {
    async fn create(&self, args: CreateMessageArgs<'_>) -> sqlx::Result<i64>;

    async fn fetch_all(&self) -> sqlx::Result<Vec<Message>>;

    async fn fetch_one(&self, message_id: i64) -> sqlx::Result<Option<Message>>;

    async fn fetch_password(&self, message_id: i64) -> sqlx::Result<Option<RawField>>;

    async fn update(&self, message_id: i64, args: UpdateMessageArgs<'_>) -> sqlx::Result<u64>;

    async fn update_password(&self, message_id: i64, password_hash: &str) -> sqlx::Result<u64>;

    async fn soft_delete(&self, message_id: i64) -> sqlx::Result<u64>;
}

/// MySQL reports insert ids as `u64`; ids past `i64::MAX` are an error.
fn inserted_id(last_insert_id: u64) -> sqlx::Result<i64> {
    i64::try_from(last_insert_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub struct MySqlMessagesRepository {
    db: Pool<MySql>,
}

impl MySqlMessagesRepository {
    pub fn new(db: Pool<MySql>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessagesRepository for MySqlMessagesRepository {
    async fn create(&self, args: CreateMessageArgs<'_>) -> sqlx::Result<i64> {
        const QUERY: &str = const_str::concat!(
            "INSERT INTO ",
            TABLE_NAME,
            " (name, password, message, author_ip) VALUES (?, ?, ?, ?)"
        );
        let result = sqlx::query(QUERY)
            .bind(args.name)
            .bind(args.password_hash)
            .bind(args.message)
            .bind(args.author_ip)
            .execute(&self.db)
            .await?;
        inserted_id(result.last_insert_id())
    }

    async fn fetch_all(&self) -> sqlx::Result<Vec<Message>> {
        const QUERY: &str = const_str::concat!(
            "SELECT ",
            READ_FIELDS,
            " FROM ",
            TABLE_NAME,
            " WHERE deleted_at IS NULL ORDER BY id"
        );
        sqlx::query_as(QUERY).fetch_all(&self.db).await
    }

    async fn fetch_one(&self, message_id: i64) -> sqlx::Result<Option<Message>> {
        const QUERY: &str = const_str::concat!(
            "SELECT ",
            READ_FIELDS,
            " FROM ",
            TABLE_NAME,
            " WHERE id = ? AND deleted_at IS NULL"
        );
        sqlx::query_as(QUERY)
            .bind(message_id)
            .fetch_optional(&self.db)
            .await
    }

    async fn fetch_password(&self, message_id: i64) -> sqlx::Result<Option<RawField>> {
        const QUERY: &str = const_str::concat!(
            "SELECT password FROM ",
            TABLE_NAME,
            " WHERE id = ? AND deleted_at IS NULL"
        );
        sqlx::query_scalar(QUERY)
            .bind(message_id)
            .fetch_optional(&self.db)
            .await
    }

    async fn update(&self, message_id: i64, args: UpdateMessageArgs<'_>) -> sqlx::Result<u64> {
        const QUERY: &str = const_str::concat!(
            "UPDATE ",
            TABLE_NAME,
            " SET name = ?, message = ?, author_ip = ? ",
            "WHERE id = ? AND deleted_at IS NULL"
        );
        let result = sqlx::query(QUERY)
            .bind(args.name)
            .bind(args.message)
            .bind(args.author_ip)
            .bind(message_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn update_password(&self, message_id: i64, password_hash: &str) -> sqlx::Result<u64> {
        const QUERY: &str = const_str::concat!(
            "UPDATE ",
            TABLE_NAME,
            " SET password = ? WHERE id = ? AND deleted_at IS NULL"
        );
        let result = sqlx::query(QUERY)
            .bind(password_hash)
            .bind(message_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, message_id: i64) -> sqlx::Result<u64> {
        const QUERY: &str = const_str::concat!(
            "UPDATE ",
            TABLE_NAME,
            " SET deleted_at = CURRENT_TIMESTAMP WHERE id = ? AND deleted_at IS NULL"
        );
        let result = sqlx::query(QUERY)
            .bind(message_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::inserted_id;

    #[test]
    fn insert_ids_convert_without_wrapping() {
        assert_eq!(inserted_id(42).unwrap(), 42);
        assert_eq!(inserted_id(i64::MAX as u64).unwrap(), i64::MAX);
        assert!(matches!(
            inserted_id(u64::MAX),
            Err(sqlx::Error::Decode(_))
        ));
    }
}
