use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use url::Url;

pub const DEFAULT_SOURCE_URL: &str =
    "http://quotesondesign.com/wp-json/posts?filter[orderby]=rand";
pub const DEFAULT_DESTINATION_URL: &str = "http://192.168.2.12:8080/api/post";
pub const DEFAULT_INTERVAL_SECS: u64 = 20;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub source_url: Option<String>,
    pub destination_url: Option<String>,
    pub interval_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_body_bytes: Option<usize>,
    pub exit_on_error: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source_url: Url,
    pub destination_url: Url,
    pub interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    /// Stop the loop on the first failed cycle (the default). When false a
    /// failed cycle is logged and the next one runs as usual.
    pub exit_on_error: bool,
}

pub fn load(config_override: Option<String>) -> Result<RuntimeConfig> {
    // An explicit path has to exist; the default location is optional.
    if let Some(path_str) = config_override {
        let p = PathBuf::from(&path_str);
        if !p.is_file() {
            bail!("config file not found: {}", path_str);
        }
        return read_file(&p)?.resolve();
    }

    if let Some(path) = default_config_path() {
        if path.is_file() {
            return read_file(&path)?.resolve();
        }
    }

    debug!("no config file found, using built-in defaults");
    AppConfig::default().resolve()
}

fn read_file(path: &Path) -> Result<AppConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

pub fn parse(txt: &str) -> Result<AppConfig> {
    Ok(toml::from_str(txt)?)
}

impl AppConfig {
    pub fn resolve(self) -> Result<RuntimeConfig> {
        let source = or_default(self.source_url, "source_url", DEFAULT_SOURCE_URL.to_string());
        let destination = or_default(
            self.destination_url,
            "destination_url",
            DEFAULT_DESTINATION_URL.to_string(),
        );
        let interval_secs = or_default(self.interval_secs, "interval_secs", DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            bail!("interval_secs must be at least 1");
        }

        Ok(RuntimeConfig {
            source_url: parse_http_url("source_url", &source)?,
            destination_url: parse_http_url("destination_url", &destination)?,
            interval: Duration::from_secs(interval_secs),
            connect_timeout: Duration::from_secs(or_default(
                self.connect_timeout_secs,
                "connect_timeout_secs",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            request_timeout: Duration::from_secs(or_default(
                self.request_timeout_secs,
                "request_timeout_secs",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            max_body_bytes: or_default(
                self.max_body_bytes,
                "max_body_bytes",
                DEFAULT_MAX_BODY_BYTES,
            ),
            exit_on_error: or_default(self.exit_on_error, "exit_on_error", true),
        })
    }
}

fn or_default<T: Display>(value: Option<T>, key: &str, default: T) -> T {
    value.unwrap_or_else(|| {
        debug!(key, default = %default, "not set in config, using default");
        default
    })
}

fn parse_http_url(key: &str, candidate: &str) -> Result<Url> {
    let url = Url::parse(candidate.trim())
        .with_context(|| format!("{} is not a valid url: {}", key, candidate))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("{} must be http or https, got {}", key, other),
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("quote-poster");
        p.push("config.toml");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("quote-poster");
        p.push("config.toml");
        return Some(p);
    }
    None
}
