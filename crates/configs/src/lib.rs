use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prices: PricesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            log_format: default_log_format(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }
fn default_log_format() -> String { "compact".into() }

/// Initial contents of the price list. An empty `seed` means the built-in one.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PricesConfig {
    #[serde(default)]
    pub seed: Vec<SeedItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedItem {
    pub name: String,
    pub price: f64,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise `SERVER_HOST` / `SERVER_PORT` /
    /// `TOKIO_WORKER_THREADS` / `LOG_FORMAT` on top of the defaults.
    /// A config file that exists but does not parse is an error.
    pub fn load_or_env() -> Result<Self> {
        if std::path::Path::new(&config_path()).exists() {
            return Self::load_and_validate();
        }
        let mut cfg = AppConfig { server: ServerConfig::from_env(), ..Default::default() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.prices.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("SERVER_HOST").unwrap_or(defaults.host);
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(defaults.worker_threads);
        let log_format = std::env::var("LOG_FORMAT").unwrap_or(defaults.log_format);
        Self { host, port, worker_threads, log_format }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        let fmt = self.log_format.trim().to_ascii_lowercase();
        if fmt != "json" && fmt != "compact" {
            return Err(anyhow!("server.log_format must be \"compact\" or \"json\", got {:?}", self.log_format));
        }
        self.log_format = fmt;
        Ok(())
    }
}

impl PricesConfig {
    pub fn validate(&self) -> Result<()> {
        for item in &self.seed {
            if item.name.trim().is_empty() {
                return Err(anyhow!("prices.seed entries need a non-empty name"));
            }
            if !item.price.is_finite() {
                return Err(anyhow!("prices.seed price for {:?} must be a finite number", item.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.log_format, "compact");
        assert!(cfg.prices.seed.is_empty());
    }

    #[test]
    fn reads_server_and_seed() {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8088
            worker_threads = 0
            log_format = "JSON"

            [[prices.seed]]
            name = "kiwi"
            price = 2.5

            [[prices.seed]]
            name = "plum"
            price = 4
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.log_format, "json");
        assert_eq!(
            cfg.prices.seed,
            vec![
                SeedItem { name: "kiwi".into(), price: 2.5 },
                SeedItem { name: "plum".into(), price: 4.0 },
            ]
        );
    }

    #[test]
    fn rejects_port_zero() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut cfg = parse("[server]\nlog_format = \"xml\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_blank_seed_name() {
        let mut cfg = parse("[[prices.seed]]\nname = \" \"\nprice = 1\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_non_finite_seed_price() {
        let mut cfg = parse("[[prices.seed]]\nname = \"x\"\nprice = nan\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
