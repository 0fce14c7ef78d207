#![allow(dead_code)]

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use message_board_service::api;
use message_board_service::common::raw_field::RawField;
use message_board_service::common::state::AppState;
use message_board_service::entities::messages::{CreateMessageArgs, Message, UpdateMessageArgs};
use message_board_service::repositories::messages::MessagesRepository;
use message_board_service::settings::ServiceSettings;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A row as the table would hold it, including soft-deleted ones.
#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub id: i64,
    pub name: RawField,
    pub password: RawField,
    pub message: RawField,
    pub author_ip: RawField,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl StoredMessage {
    fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    fn to_entity(&self) -> Message {
        Message {
            id: self.id,
            name: self.name.clone(),
            message: self.message.clone(),
            author_ip: self.author_ip.clone(),
            created_at: self.created_at,
        }
    }
}

/// Stores text columns as raw bytes, the way a binary collation would
/// hand them back, so the decoding path is exercised.
#[derive(Default)]
pub struct InMemoryMessages {
    rows: Mutex<Vec<StoredMessage>>,
    delay: Option<Duration>,
}

impl InMemoryMessages {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            rows: Mutex::default(),
            delay: Some(delay),
        }
    }

    pub fn row(&self, message_id: i64) -> Option<StoredMessage> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|row| row.id == message_id).cloned()
    }

    pub fn corrupt_password(&self, message_id: i64) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|row| row.id == message_id) {
            row.password = RawField::Empty;
        }
    }

    async fn stall(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MessagesRepository for InMemoryMessages {
    async fn create(&self, args: CreateMessageArgs<'_>) -> sqlx::Result<i64> {
        self.stall().await;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(StoredMessage {
            id,
            name: RawField::Bytes(args.name.as_bytes().to_vec()),
            password: RawField::Bytes(args.password_hash.as_bytes().to_vec()),
            message: RawField::Bytes(args.message.as_bytes().to_vec()),
            author_ip: RawField::Text(args.author_ip.to_string()),
            created_at: Utc::now(),
            deleted_at: None,
        });
        Ok(id)
    }

    async fn fetch_all(&self) -> sqlx::Result<Vec<Message>> {
        self.stall().await;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| row.is_active())
            .map(StoredMessage::to_entity)
            .collect())
    }

    async fn fetch_one(&self, message_id: i64) -> sqlx::Result<Option<Message>> {
        self.stall().await;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|row| row.id == message_id && row.is_active())
            .map(StoredMessage::to_entity))
    }

    async fn fetch_password(&self, message_id: i64) -> sqlx::Result<Option<RawField>> {
        self.stall().await;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|row| row.id == message_id && row.is_active())
            .map(|row| row.password.clone()))
    }

    async fn update(&self, message_id: i64, args: UpdateMessageArgs<'_>) -> sqlx::Result<u64> {
        self.stall().await;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|row| row.id == message_id && row.is_active())
        {
            Some(row) => {
                row.name = RawField::Bytes(args.name.as_bytes().to_vec());
                row.message = RawField::Bytes(args.message.as_bytes().to_vec());
                row.author_ip = RawField::Text(args.author_ip.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_password(&self, message_id: i64, password_hash: &str) -> sqlx::Result<u64> {
        self.stall().await;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|row| row.id == message_id && row.is_active())
        {
            Some(row) => {
                row.password = RawField::Bytes(password_hash.as_bytes().to_vec());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn soft_delete(&self, message_id: i64) -> sqlx::Result<u64> {
        self.stall().await;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|row| row.id == message_id && row.is_active())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        // bcrypt minimum cost
        bcrypt_cost: 4,
        query_timeout: Duration::from_secs(5),
        trust_proxy: false,
    }
}

pub fn test_state(messages: Arc<InMemoryMessages>, settings: ServiceSettings) -> AppState {
    AppState { messages, settings }
}

pub struct TestServer {
    pub base_url: String,
    pub messages: Arc<InMemoryMessages>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn_server(settings: ServiceSettings) -> Result<TestServer> {
    let messages = Arc::new(InMemoryMessages::default());
    let state = test_state(messages.clone(), settings);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let app = api::app(state).into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app).await
    });

    Ok(TestServer {
        base_url: format!("http://{addr}"),
        messages,
        client: reqwest::Client::new(),
    })
}
