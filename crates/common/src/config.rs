use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Maximum number of queue items handled per batch run (default: 50)
    pub queue_batch_size: i64,

    /// Default retry budget for newly enqueued items (default: 3)
    pub queue_max_retries: i32,

    /// Base retry backoff in seconds; doubles per attempt (default: 60)
    pub retry_base_secs: u64,

    /// Backoff ceiling in seconds (default: 3600)
    pub retry_cap_secs: u64,

    /// Per-provider-call timeout in seconds (default: 15)
    pub dispatch_timeout_secs: u64,

    /// Age in seconds after which a `processing` claim from a dead run is
    /// returned to `pending` (default: 600)
    pub stale_claim_secs: u64,

    /// Shared secret required by `POST /process`; unset disables the check
    pub process_secret: Option<String>,

    /// Resend API key
    pub resend_api_key: Option<String>,

    /// Postmark server token
    pub postmark_server_token: Option<String>,

    /// Sender address used by all providers
    pub email_from: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            queue_batch_size: std::env::var("QUEUE_BATCH_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("QUEUE_BATCH_SIZE must be a valid i64"))?,
            queue_max_retries: std::env::var("QUEUE_MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("QUEUE_MAX_RETRIES must be a valid i32"))?,
            retry_base_secs: std::env::var("RETRY_BASE_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_BASE_SECS must be a valid u64"))?,
            retry_cap_secs: std::env::var("RETRY_CAP_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_CAP_SECS must be a valid u64"))?,
            dispatch_timeout_secs: std::env::var("DISPATCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DISPATCH_TIMEOUT_SECS must be a valid u64"))?,
            stale_claim_secs: std::env::var("STALE_CLAIM_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("STALE_CLAIM_SECS must be a valid u64"))?,
            process_secret: std::env::var("PROCESS_SECRET").ok(),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            postmark_server_token: std::env::var("POSTMARK_SERVER_TOKEN").ok(),
            email_from: std::env::var("EMAIL_FROM").ok(),
        })
    }
}
