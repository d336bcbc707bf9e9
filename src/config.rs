use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8000),
        };
        Ok(Self {
            database_url,
            max_connections,
            server,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_optional_vars_are_bad() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/accounts");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "many");
        std::env::set_var("APP_PORT", "not-a-port");
        std::env::remove_var("APP_HOST");

        let cfg = AppConfig::from_env().expect("config should load");
        assert_eq!(cfg.database_url, "postgres://localhost/accounts");
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
    }
}
