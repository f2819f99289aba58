use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,

    /// Directory that request paths (`./<uri>`) are resolved against.
    pub document_root: PathBuf,
    pub server_name: String,

    /// Appended to static URIs ending in `/`.
    pub index_file: String,
    /// Substring that marks a URI as a CGI program.
    pub cgi_marker: String,

    pub max_line_size: usize,

    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    /// Deadline for a CGI program. `None` waits for it indefinitely.
    #[serde(deserialize_with = "deserialize_optional_duration")]
    pub cgi_timeout: Option<Duration>,

    /// Leave HTTP/1.0 header lines unread, only scanning headers for HTTP/1.1.
    pub legacy_framing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,

            document_root: PathBuf::from("."),
            server_name: "Tiny Web Server".to_string(),

            index_file: "home.html".to_string(),
            cgi_marker: "cgi-bin".to_string(),

            max_line_size: 8192,

            read_timeout: Duration::from_secs(5),
            cgi_timeout: None,

            legacy_framing: false,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Fail to read {}: {err}", path);
                log::warn!("Fall back to default config");
                return ServerConfig::default();
            }
        };

        Self::from_toml(&content).unwrap_or_else(|err| {
            log::warn!("Fail to deserialize config file {}: {err}", path);
            log::warn!("Fall back to default config");
            ServerConfig::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ServerConfig>(content)
    }
}

pub fn set_config(cfg: ServerConfig) {
    CONFIG.set(cfg).expect("Config already set");
}

pub fn config() -> &'static ServerConfig {
    CONFIG.get().expect("Config not initialized")
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = Option::<f64>::deserialize(deserializer)?;
    Ok(secs.map(Duration::from_secs_f64))
}
