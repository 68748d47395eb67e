use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

pub const ENV_PREFIX: &str = "COURSE_API_";

static GLOBAL_ERROR_LOGGING: AtomicBool = AtomicBool::new(false);

/// Runtime settings. Defaults are overridden by `COURSE_API_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub enable_global_error_logging: bool,
    /// Seed document to load at bootstrap; the bundled one is used when unset.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:fsjstd-restapi.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            enable_global_error_logging: false,
            seed_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Publish process-wide flags that are read outside of request state.
    pub fn apply_globals(&self) {
        GLOBAL_ERROR_LOGGING.store(self.enable_global_error_logging, Ordering::Relaxed);
    }
}

pub fn global_error_logging() -> bool {
    GLOBAL_ERROR_LOGGING.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_layout() {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(cfg.database_url, "sqlite:fsjstd-restapi.db");
        assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
        assert!(!cfg.enable_global_error_logging);
        assert!(cfg.seed_path.is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("COURSE_API_LISTEN_ADDR", "127.0.0.1:9000");
            jail.set_env("COURSE_API_ENABLE_GLOBAL_ERROR_LOGGING", "true");
            jail.set_env("COURSE_API_SEED_PATH", "/tmp/seed.json");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert!(cfg.enable_global_error_logging);
            assert_eq!(cfg.seed_path, Some(PathBuf::from("/tmp/seed.json")));
            Ok(())
        });
    }
}
