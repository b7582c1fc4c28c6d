use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Dynamodb,
    Local,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::Dynamodb),
            "local" => Ok(Self::Local),
            other => Err(anyhow!("unknown store backend {other:?}, expected dynamodb or local")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Overrides the service endpoint, e.g. `http://localhost:8001` for DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            table_name: default_table_name(),
            region: None,
            endpoint_url: None,
            local_path: default_local_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Append-only file receiving the raw request/response trace.
    #[serde(default = "default_trace_file")]
    pub trace_file: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { trace_file: default_trace_file(), json: false }
    }
}

fn default_table_name() -> String { "testtable1".into() }
fn default_local_path() -> String { "data/students.json".into() }
fn default_trace_file() -> String { "crud.log".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Prefer `config.toml`; without one, build the config from environment variables.
    /// A config file that exists but does not parse is an error.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            Self::from_env()?
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Some(host) = env_var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = env_var("SERVER_PORT") {
            cfg.server.port = port.parse().map_err(|_| anyhow!("SERVER_PORT must be a port number"))?;
        }
        cfg.server.worker_threads = env_var("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok());
        if let Some(backend) = env_var("STORE_BACKEND") {
            cfg.store.backend = backend.parse()?;
        }
        if let Some(table) = env_var("STORE_TABLE_NAME") {
            cfg.store.table_name = table;
        }
        cfg.store.endpoint_url = env_var("STORE_ENDPOINT_URL");
        if let Some(path) = env_var("STORE_LOCAL_PATH") {
            cfg.store.local_path = path;
        }
        if let Some(path) = env_var("TRACE_FILE") {
            cfg.logging.trace_file = path;
        }
        cfg.logging.json = env_var("LOG_JSON").map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false);
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.normalize_and_validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StoreConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        self.table_name = self.table_name.trim().to_string();
        if self.table_name.is_empty() {
            return Err(anyhow!("store.table_name is empty"));
        }
        // 未在 TOML 中配置 endpoint 时，允许使用环境变量覆盖
        if self.endpoint_url.is_none() {
            self.endpoint_url = env_var("STORE_ENDPOINT_URL");
        }
        if let Some(url) = &self.endpoint_url {
            let lower = url.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("store.endpoint_url must start with http:// or https://"));
            }
        }
        if self.region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            self.region = None;
        }
        if self.backend == StoreBackend::Local && self.local_path.trim().is_empty() {
            return Err(anyhow!("store.local_path is required for the local backend"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.trace_file.trim().is_empty() {
            self.trace_file = default_trace_file();
        }
    }
}
