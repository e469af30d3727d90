use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use url::Url;

use crate::errors::AppError;

pub const CONFIG_FILE: &str = "config.env";

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_DATABASE: &str = "CompanyPresentationApi";
const DEFAULT_USER_ID: &str = "SA";
const DEFAULT_TRUST_SERVER_CERTIFICATE: &str = "true";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PAGE_SIZE: &str = "50";

/// Resolved, immutable settings shared by every utility.
///
/// Each key comes from the config file first, then the process environment,
/// then a built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub api_base_url: String,
    pub page_size: u32,
}

#[derive(Clone, PartialEq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub user_id: String,
    pub password: String,
    pub trust_server_certificate: bool,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .field("trust_server_certificate", &self.trust_server_certificate)
            .finish()
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.trust_server_certificate {
            PgSslMode::Prefer
        } else {
            PgSslMode::VerifyFull
        };

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .database(&self.database)
            .username(&self.user_id)
            .ssl_mode(ssl_mode);

        if let Some(port) = self.port {
            options = options.port(port);
        }
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        options
    }
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = read_config_file(path.as_ref())?;
        let settings = Self::resolve(&file, |key| std::env::var(key).ok())?;
        info!("Configuration resolved: {:?}", settings);
        Ok(settings)
    }

    /// Applies the file -> environment -> default chain to every key.
    pub fn resolve<F>(file: &HashMap<String, String>, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str, default: &str| -> String {
            file.get(key)
                .cloned()
                .or_else(|| env(key))
                .unwrap_or_else(|| default.to_string())
        };

        let (host, port) = split_host_port(&lookup("DB_SERVER", DEFAULT_SERVER))?;
        let trust_server_certificate = parse_bool(
            "DB_TRUST_SERVER_CERTIFICATE",
            &lookup("DB_TRUST_SERVER_CERTIFICATE", DEFAULT_TRUST_SERVER_CERTIFICATE),
        )?;

        let api_base_url = lookup("API_BASE_URL", DEFAULT_API_BASE_URL);
        Url::parse(&api_base_url)?;

        let raw_page_size = lookup("PAGE_SIZE", DEFAULT_PAGE_SIZE);
        let page_size = match raw_page_size.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                return Err(AppError::ConfigError(format!(
                    "PAGE_SIZE must be a positive integer, got '{}'",
                    raw_page_size
                )))
            }
        };

        Ok(Settings {
            database: DatabaseSettings {
                host,
                port,
                database: lookup("DB_DATABASE", DEFAULT_DATABASE),
                user_id: lookup("DB_USER_ID", DEFAULT_USER_ID),
                password: lookup("DB_PASSWORD", ""),
                trust_server_certificate,
            },
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            page_size,
        })
    }
}

/// Reads `key=value` pairs without exporting them into the process
/// environment, so file values can take precedence over it.
fn read_config_file(path: &Path) -> Result<HashMap<String, String>, AppError> {
    if !path.exists() {
        warn!(
            "Config file '{}' not found. Using environment variables.",
            path.display()
        );
        return Ok(HashMap::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|err| AppError::ConfigError(format!("{}: {}", path.display(), err)))?;
    Ok(parse_config(&contents))
}

/// Splits each line on its first `=` and trims both halves. Values are kept
/// verbatim: no quoting, no `$VAR` expansion, no trailing comments. Blank
/// lines, `#` lines and lines without `=` are skipped.
fn parse_config(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => debug!("Skipping config line without '=': {}", line),
        }
    }
    values
}

/// `host`, `host:port`, `host,port` or `[v6-address]:port`, with an optional
/// `tcp:` prefix. A bare IPv6 address is taken as the host.
fn split_host_port(server: &str) -> Result<(String, Option<u16>), AppError> {
    let server = server.trim();
    let server = match server.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tcp:") => &server[4..],
        _ => server,
    };

    let (host, port) = if let Some((host, port)) = server.rsplit_once(',') {
        (host, Some(port))
    } else if let Some(rest) = server.strip_prefix('[') {
        match rest.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (server, None),
        }
    } else if server.matches(':').count() == 1 {
        match server.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (server, None),
        }
    } else {
        (server, None)
    };

    let port = match port {
        Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
            AppError::ConfigError(format!("DB_SERVER has an invalid port: '{}'", server))
        })?),
        None => None,
    };
    Ok((host.trim().to_string(), port))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(AppError::ConfigError(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}
