use bowl_picks_core::SeasonYear;
use chrono::{Datelike, Utc};

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Rolling log file location; without it only stderr is logged.
#[derive(Clone, Debug, PartialEq)]
pub struct LogFiles {
    pub file_path: String,
    pub archive_pattern: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database_path: Option<String>,
    pub pool_password: Option<String>,
    pub admin_password: Option<String>,
    pub participants: Vec<String>,
    pub schedule_year: i32,
    pub odds_api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub log_files: Option<LogFiles>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn comma_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |key: &str| non_empty(lookup(key));

        let http_port = var("BOWL_PICKS_HTTP_PORT")
            .ok_or("BOWL_PICKS_HTTP_PORT must be set")?
            .parse::<u16>()
            .map_err(|e| format!("BOWL_PICKS_HTTP_PORT must be a valid u16: {}", e))?;

        let schedule_year = match var("BOWL_PICKS_SCHEDULE_YEAR") {
            Some(year) => year
                .parse::<i32>()
                .map_err(|e| format!("BOWL_PICKS_SCHEDULE_YEAR must be a year: {}", e))?,
            None => Utc::now().year(),
        };
        if !SeasonYear(schedule_year).is_valid() {
            return Err(format!(
                "BOWL_PICKS_SCHEDULE_YEAR must be between {} and {}",
                SeasonYear::MIN,
                SeasonYear::MAX
            ));
        }

        let log_files = match (var("LOG_FILE_PATH"), var("LOG_ARCHIVE_PATTERN")) {
            (Some(file_path), Some(archive_pattern)) => Some(LogFiles {
                file_path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => return Err("LOG_FILE_PATH and LOG_ARCHIVE_PATTERN must be set together".into()),
        };

        Ok(ServerConfig {
            http_host: var("BOWL_PICKS_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
            http_port,
            database_path: var("BOWL_PICKS_DB"),
            pool_password: var("BOWL_PICKS_POOL_PASSWORD"),
            admin_password: var("BOWL_PICKS_ADMIN_PASSWORD"),
            participants: comma_list(lookup("BOWL_PICKS_PARTICIPANTS")),
            schedule_year,
            odds_api_key: var("ODDS_API_KEY"),
            cors_origins: comma_list(lookup("BOWL_PICKS_CORS_ORIGINS")),
            log_files,
        })
    }
}
