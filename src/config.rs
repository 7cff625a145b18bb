use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection_string: Option<String>,
    pub max_connections: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            max_connections: Some(10),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        // MATRICES_SERVER__PORT, MATRICES_DATABASE__CONNECTION_STRING, ...
        config = config.add_source(
            config::Environment::with_prefix("MATRICES")
                .separator("__")
                .prefix_separator("_"),
        );

        // Plain PORT is what container platforms inject
        config = config.set_override_option("server.port", std::env::var("PORT").ok())?;

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the database URL from config or the DATABASE_URL environment variable.
    ///
    /// `None` leaves the connection to the libpq `PG*` variables
    /// (`PGHOST`, `PGUSER`, `PGDATABASE`, ...).
    pub fn database_url(&self) -> Option<String> {
        self.database
            .connection_string
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }

    pub fn max_connections(&self) -> u32 {
        self.database.max_connections.unwrap_or(10)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
