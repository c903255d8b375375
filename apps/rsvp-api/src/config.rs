//! Environment-driven configuration for the RSVP API.

use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};
use database::mongodb::MongoConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load everything from the environment.
    ///
    /// A missing connection string is the only hard failure; every other
    /// setting has a default.
    pub fn from_env() -> eyre::Result<Self> {
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            cors,
        })
    }
}
