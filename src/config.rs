use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub currency_symbol: String,
    /// Head count used for the per-person estimate while the roster is empty
    pub default_head_count: usize,
    /// Names loaded into an empty roster on request
    pub default_roster: Vec<String>,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        let default_head_count = env::var("DEFAULT_HEAD_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(4);

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "€".to_string()),
            default_head_count,
            default_roster: env::var("DEFAULT_ROSTER")
                .ok()
                .map(|v| parse_roster(&v))
                .filter(|names| !names.is_empty())
                .unwrap_or_else(|| (1..=default_head_count).map(|n| format!("Member {}", n)).collect()),
        }
    }
}

/// Comma separated names, blanks dropped.
fn parse_roster(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_list_skips_blank_names() {
        assert_eq!(parse_roster(" Ala, ,Bartek,,Celina "), vec!["Ala", "Bartek", "Celina"]);
        assert!(parse_roster(" , ").is_empty());
    }
}
