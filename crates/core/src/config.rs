use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Generate endpoint of the model backend (Ollama-compatible).
    pub endpoint: String,
    pub model: String,
    /// Bounded deadline for a single completion.
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProvidersConfig {
    /// Which geocoding backend serves place search: "photon" or "nominatim".
    pub geocoder: String,
    pub photon_base_url: String,
    pub nominatim_base_url: String,
    pub osrm_base_url: String,
    /// Sent on every outbound provider request (OSM usage policy).
    pub user_agent: String,
    /// Minimum spacing between calls to the geocoding backend.
    pub geocoder_min_interval_ms: u64,
    /// Minimum spacing between calls to the routing backend.
    pub router_min_interval_ms: u64,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Per-caller admission for orchestration requests.
    pub chat_max_requests: u32,
    pub chat_window_secs: u64,
    /// Stricter window gating API-key provisioning.
    pub key_creation_max_requests: u32,
    pub key_creation_window_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("WAYFINDER_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Defaults first, so missing files or sections fall back cleanly.
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map WAYFINDER__SERVER__PORT=3000 to server.port
            .add_source(Environment::with_prefix("WAYFINDER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            llm: LlmConfig {
                endpoint: "http://localhost:11434/api/generate".into(),
                model: "llama3.2:3b".into(),
                timeout_secs: 60,
            },
            providers: ProvidersConfig {
                geocoder: "photon".into(),
                photon_base_url: "https://photon.komoot.io/api".into(),
                nominatim_base_url: "https://nominatim.openstreetmap.org".into(),
                osrm_base_url: "https://router.project-osrm.org".into(),
                user_agent: "wayfinder/0.1 (demo service; contact: ops@wayfinder.dev)".into(),
                geocoder_min_interval_ms: 1000,
                router_min_interval_ms: 1500,
                http_timeout_secs: 10,
            },
            cache: CacheConfig { ttl_secs: 60 },
            limits: LimitsConfig {
                chat_max_requests: 10,
                chat_window_secs: 60,
                key_creation_max_requests: 3,
                key_creation_window_secs: 3600,
            },
        }
    }
}
