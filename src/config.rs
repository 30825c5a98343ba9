/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset, products live in process memory.
    pub redis_url: Option<String>,
    pub products_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            redis_url: None,
            products_key: "produtos".to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        Config {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            redis_url: non_empty("REDIS_URL"),
            products_key: non_empty("PRODUCTS_KEY").unwrap_or(defaults.products_key),
        }
    }
}
