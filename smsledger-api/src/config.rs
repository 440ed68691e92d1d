use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Messaging apps whose notifications carry SMS text
pub const DEFAULT_ALLOWED_SOURCES: [&str; 3] = [
    "com.google.android.apps.messaging",
    "com.samsung.android.messaging",
    "com.android.mms",
];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: Option<ServerConfig>,
    pub cors: Option<CorsConfig>,
    pub database: Option<DatabaseConfig>,
    pub model: Option<ModelConfig>,
    pub pipeline: Option<PipelineConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            database: None,
            model: Some(ModelConfig::default()),
            pipeline: Some(PipelineConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelConfig {
    /// Newline-delimited vocabulary, one token per line
    pub vocab_path: Option<String>,
    /// Inference endpoint that scores encoded messages
    pub classifier_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vocab_path: None,
            classifier_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_allowed_sources")]
    pub allowed_sources: Vec<String>,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_classifications: usize,
    #[serde(default = "default_diagnostics_capacity")]
    pub diagnostics_capacity: usize,
}

fn default_allowed_sources() -> Vec<String> {
    DEFAULT_ALLOWED_SOURCES.iter().map(|s| s.to_string()).collect()
}

fn default_max_concurrent() -> usize {
    4
}

fn default_diagnostics_capacity() -> usize {
    256
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_sources: default_allowed_sources(),
            max_concurrent_classifications: default_max_concurrent(),
            diagnostics_capacity: default_diagnostics_capacity(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[cors]
allowed_origins = ["http://localhost:3000"]

[database]
# path = "/path/to/db.sqlite"

[model]
# vocab_path = "/path/to/vocab.txt"
# classifier_url = "http://127.0.0.1:9000/infer"
timeout_secs = 30

[pipeline]
allowed_sources = [
    "com.google.android.apps.messaging",
    "com.samsung.android.messaging",
    "com.android.mms",
]
max_concurrent_classifications = 4
diagnostics_capacity = 256
"#;

impl ApiConfig {
    /// Loads the config from `path`, or from the default location when
    /// `None`. A missing file is created with defaults first.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or(ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        })
    }

    pub fn model(&self) -> ModelConfig {
        self.model.clone().unwrap_or_default()
    }

    pub fn pipeline(&self) -> PipelineConfig {
        self.pipeline.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("smsledger").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
