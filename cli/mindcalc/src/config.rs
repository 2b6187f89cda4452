use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub sessions_collection: String,
    pub drill: DrillConfig,
    pub log_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrillConfig {
    pub default_count: usize,
    pub answer_window_secs: u64,
    pub clear_screen: bool,
    pub operand_min: u32,
    pub operand_max: u32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            default_count: 10,
            answer_window_secs: 5,
            clear_screen: true,
            operand_min: 100,
            operand_max: 999,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: "mongodb://127.0.0.1:27017".to_string(),
            mongo_database: "mindCalcDB".to_string(),
            sessions_collection: "trainings".to_string(),
            drill: DrillConfig::default(),
            log_json: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first (two levels up from the crate), local .env as fallback
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
        let defaults = DrillConfig::default();

        // config/*.toml + ENV overrides (prefix: APP_, nested with __)
        let settings = config::Config::builder()
            .set_default("database.sessions_collection", "trainings")?
            .set_default("drill.default_count", defaults.default_count as u64)?
            .set_default("drill.answer_window_secs", defaults.answer_window_secs)?
            .set_default("drill.clear_screen", defaults.clear_screen)?
            .set_default("drill.operand_min", defaults.operand_min as u64)?
            .set_default("drill.operand_max", defaults.operand_max as u64)?
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mongo_uri = settings
            .get_string("database.mongo_uri")
            .or_else(|_| env::var("MONGO_URI"))
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());

        let mongo_database = settings
            .get_string("database.mongo_database")
            .or_else(|_| env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "mindCalcDB".to_string());

        let sessions_collection = settings.get_string("database.sessions_collection")?;

        let drill = DrillConfig {
            default_count: settings.get_int("drill.default_count")?.try_into().map_err(|_| {
                config::ConfigError::Message("drill.default_count must be non-negative".into())
            })?,
            answer_window_secs: settings
                .get_int("drill.answer_window_secs")?
                .try_into()
                .map_err(|_| {
                    config::ConfigError::Message(
                        "drill.answer_window_secs must be non-negative".into(),
                    )
                })?,
            clear_screen: settings.get_bool("drill.clear_screen")?,
            operand_min: read_operand(&settings, "drill.operand_min")?,
            operand_max: read_operand(&settings, "drill.operand_max")?,
        };

        if drill.operand_min > drill.operand_max {
            return Err(config::ConfigError::Message(format!(
                "drill.operand_min ({}) is greater than drill.operand_max ({})",
                drill.operand_min, drill.operand_max
            )));
        }

        let log_json = settings
            .get_bool("logging.json")
            .ok()
            .or_else(|| env::var("LOG_JSON").ok().map(|v| v == "1" || v == "true"))
            .unwrap_or(false);

        Ok(Config {
            mongo_uri,
            mongo_database,
            sessions_collection,
            drill,
            log_json,
        })
    }
}

fn read_operand(settings: &config::Config, key: &str) -> Result<u32, config::ConfigError> {
    settings
        .get_int(key)?
        .try_into()
        .map_err(|_| config::ConfigError::Message(format!("{} must fit in 0..=4294967295", key)))
}
