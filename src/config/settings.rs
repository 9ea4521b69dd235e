use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub scylla: ScyllaConfig,
    pub firebase: FirebaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of the built single-page app; `index.html` is the shell.
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub nodes: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub credentials_path: PathBuf,
    pub project_id: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        Ok(Settings {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .map_err(|e| format!("Invalid PORT: {}", e))?,
                static_dir: env::var("STATIC_DIR")
                    .unwrap_or_else(|_| "build".to_string())
                    .into(),
            },
            scylla: ScyllaConfig {
                nodes: parse_nodes(
                    &env::var("SCYLLA_NODES").unwrap_or_else(|_| "localhost:9042".to_string()),
                ),
                keyspace: env::var("SCYLLA_KEYSPACE")
                    .unwrap_or_else(|_| "article_api".to_string()),
                username: env::var("SCYLLA_USERNAME").ok(),
                password: env::var("SCYLLA_PASSWORD").ok(),
            },
            firebase: FirebaseConfig {
                credentials_path: env::var("FIREBASE_CREDENTIALS")
                    .unwrap_or_else(|_| "./credentials.json".to_string())
                    .into(),
                project_id: env::var("FIREBASE_PROJECT_ID").ok(),
            },
        })
    }
}

fn parse_nodes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
