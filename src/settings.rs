use crate::common::env::FromEnv;
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing::Level;

const DEFAULT_APP_PORT: u16 = 1991;
const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

pub struct AppSettings {
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub db_wait_timeout: Duration,
    pub db_query_timeout: Duration,

    pub bcrypt_cost: u32,
    pub trust_proxy: bool,
}

/// The part of the configuration the request path needs.
#[derive(Debug, Copy, Clone)]
pub struct ServiceSettings {
    pub bcrypt_cost: u32,
    pub query_timeout: Duration,
    pub trust_proxy: bool,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let level = Level::from_env_or("LOG_LEVEL", Level::INFO)?;
        let app_host = IpAddr::from_env_or("APP_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let app_port = u16::from_env_or("PORT", DEFAULT_APP_PORT)?;

        let db_host = String::from_env_or("DB_HOST", "127.0.0.1".to_string())?;
        let db_port = u16::from_env_or("DB_PORT", 3306)?;
        let db_user = env::var("DB_USER")?;
        let db_password = env::var("DB_PASSWORD")?;
        let db_name = env::var("DB_NAME")?;
        let db_max_connections = u32::from_env_or("DB_MAX_CONNECTIONS", 10)?;
        let db_wait_timeout_secs = u64::from_env_or("DB_WAIT_TIMEOUT_SECS", 5)?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);
        let db_query_timeout_secs = u64::from_env_or("DB_QUERY_TIMEOUT_SECS", 10)?;
        let db_query_timeout = Duration::from_secs(db_query_timeout_secs);

        let bcrypt_cost = u32::from_env_or("SALT_ROUNDS", DEFAULT_BCRYPT_COST)?;
        anyhow::ensure!(
            (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost),
            "SALT_ROUNDS must be between {} and {}",
            MIN_BCRYPT_COST,
            MAX_BCRYPT_COST,
        );
        let trust_proxy = bool::from_env_or("TRUST_PROXY", false)?;

        Ok(AppSettings {
            level,
            app_host,
            app_port,

            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            db_max_connections,
            db_wait_timeout,
            db_query_timeout,

            bcrypt_cost,
            trust_proxy,
        })
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            bcrypt_cost: self.bcrypt_cost,
            query_timeout: self.db_query_timeout,
            trust_proxy: self.trust_proxy,
        }
    }
}
