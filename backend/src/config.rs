use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

pub const DEFAULT_MODEL_PATH: &str = "models/renewable_energy_adoption.onnx";

/// Server settings, read from the environment with fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 1,
            static_dir: PathBuf::from("./static"),
        }
    }
}

impl ServerConfig {
    /// `MODEL_PATH`, `HOST`, `PORT`, `WORKERS` and `STATIC_DIR`. A first
    /// command-line argument takes precedence over `MODEL_PATH`.
    pub fn from_env() -> Self {
        let model_arg = std::env::args().nth(1);
        Self::from_lookup(model_arg, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(model_arg: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let model_path = model_arg
            .or_else(|| lookup("MODEL_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let workers = parse_or("WORKERS", lookup("WORKERS"), defaults.workers).max(1);
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Self {
            model_path,
            host,
            port,
            workers,
            static_dir,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, value, default);
            default
        }),
    }
}
