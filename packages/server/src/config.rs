use config::{Config, ConfigError, Environment, File};
use raffle_common::TicketFormat;
use raffle_common::retry::RetryPolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Engine tunables.
#[derive(Debug, Deserialize, Clone)]
pub struct CampaignConfig {
    /// Ticket prefix. Default: "RAF".
    #[serde(default = "default_ticket_prefix")]
    pub ticket_prefix: String,
    /// Ticket re-rolls on collision before giving up. Default: 5.
    #[serde(default = "default_ticket_max_attempts")]
    pub ticket_max_attempts: u8,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    /// Brand color used when neither the campaign nor the tenant sets one.
    #[serde(default = "default_brand_color")]
    pub default_brand_color: String,
}

fn default_ticket_prefix() -> String {
    "RAF".into()
}
fn default_ticket_max_attempts() -> u8 {
    5
}
fn default_retry_base_delay_ms() -> u64 {
    10
}
fn default_retry_max_delay_ms() -> u64 {
    200
}
fn default_brand_color() -> String {
    "#2563EB".into()
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            ticket_prefix: default_ticket_prefix(),
            ticket_max_attempts: default_ticket_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            default_brand_color: default_brand_color(),
        }
    }
}

impl CampaignConfig {
    /// Falls back to the default format when the configured prefix is unusable.
    pub fn ticket_format(&self) -> TicketFormat {
        TicketFormat::new(&self.ticket_prefix).unwrap_or_else(|| {
            tracing::warn!(prefix = %self.ticket_prefix, "Invalid ticket prefix, using default");
            TicketFormat::default()
        })
    }

    pub fn ticket_retry(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.ticket_max_attempts,
            self.retry_base_delay_ms,
            self.retry_max_delay_ms,
        )
    }

    /// Delays between redraws after a lost selection race.
    pub fn selection_backoff(&self) -> RetryPolicy {
        RetryPolicy::new(1, self.retry_base_delay_ms, self.retry_max_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Directory uploads are written to. Default: "./media".
    #[serde(default = "default_media_dir")]
    pub dir: String,
    /// URL prefix uploads are published under. Default: "/media".
    #[serde(default = "default_media_public_base_url")]
    pub public_base_url: String,
    /// Default: 10 MiB.
    #[serde(default = "default_media_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_media_dir() -> String {
    "./media".into()
}
fn default_media_public_base_url() -> String {
    "/media".into()
}
fn default_media_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_media_dir(),
            public_base_url: default_media_public_base_url(),
            max_upload_bytes: default_media_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., RAFFLE__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("RAFFLE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
