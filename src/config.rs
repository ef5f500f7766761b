// src/config.rs

use std::{env, str::FromStr};

use dotenvy::dotenv;

/// Game rules handed to the scoring core by the request handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    /// Whether a second submission replaces the first instead of being refused.
    pub allow_multiple_submissions: bool,
    /// Scalar applied to a raw score before crediting the student's points.
    pub points_multiplier: f64,
    /// Number of students shown on a class leaderboard.
    pub leaderboard_size: i64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            allow_multiple_submissions: false,
            points_multiplier: 1.0,
            leaderboard_size: 10,
        }
    }
}

/// Switches checked by the API access guard.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessSettings {
    pub enable_mobile_api: bool,
    pub maintenance_mode: bool,
    pub maintenance_message: String,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            enable_mobile_api: true,
            maintenance_mode: false,
            maintenance_message: "We'll be back shortly.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub game: GameSettings,
    pub access: AccessSettings,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            bind_addr,
            game: GameSettings::from_lookup(|key| env::var(key).ok()),
            access: AccessSettings::from_lookup(|key| env::var(key).ok()),
        }
    }
}

/// Log filter directives from `RUST_LOG`, `info` when unset.
pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

impl GameSettings {
    /// Reads settings through `lookup`, keeping defaults for anything unset or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let allow_multiple_submissions = lookup("ALLOW_MULTIPLE_SUBMISSIONS")
            .map(|v| to_bool(&v))
            .unwrap_or(defaults.allow_multiple_submissions);

        let points_multiplier = parse_or(
            "POINTS_MULTIPLIER",
            lookup("POINTS_MULTIPLIER"),
            defaults.points_multiplier,
            |m: &f64| m.is_finite() && *m >= 0.0,
        );

        let leaderboard_size = parse_or(
            "LEADERBOARD_SIZE",
            lookup("LEADERBOARD_SIZE"),
            defaults.leaderboard_size,
            |n: &i64| *n > 0,
        );

        Self {
            allow_multiple_submissions,
            points_multiplier,
            leaderboard_size,
        }
    }
}

impl AccessSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            enable_mobile_api: lookup("ENABLE_MOBILE_API")
                .map(|v| to_bool(&v))
                .unwrap_or(defaults.enable_mobile_api),
            maintenance_mode: lookup("MAINTENANCE_MODE")
                .map(|v| to_bool(&v))
                .unwrap_or(defaults.maintenance_mode),
            maintenance_message: lookup("MAINTENANCE_MESSAGE")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.maintenance_message),
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) are true, everything else is false.
pub fn to_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(GameSettings::from_lookup(lookup(&[])), GameSettings::default());
        assert_eq!(AccessSettings::from_lookup(lookup(&[])), AccessSettings::default());
    }

    #[test]
    fn reads_game_settings() {
        let game = GameSettings::from_lookup(lookup(&[
            ("ALLOW_MULTIPLE_SUBMISSIONS", "Yes"),
            ("POINTS_MULTIPLIER", "1.5"),
            ("LEADERBOARD_SIZE", "3"),
        ]));

        assert!(game.allow_multiple_submissions);
        assert_eq!(game.points_multiplier, 1.5);
        assert_eq!(game.leaderboard_size, 3);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let game = GameSettings::from_lookup(lookup(&[
            ("POINTS_MULTIPLIER", "-2"),
            ("LEADERBOARD_SIZE", "ten"),
        ]));
        assert_eq!(game.points_multiplier, 1.0);
        assert_eq!(game.leaderboard_size, 10);

        let game = GameSettings::from_lookup(lookup(&[
            ("POINTS_MULTIPLIER", "NaN"),
            ("LEADERBOARD_SIZE", "0"),
        ]));
        assert_eq!(game.points_multiplier, 1.0);
        assert_eq!(game.leaderboard_size, 10);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn invalid_setting_logs_a_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let game = tracing::subscriber::with_default(subscriber, || {
            GameSettings::from_lookup(lookup(&[("POINTS_MULTIPLIER", "lots")]))
        });

        assert_eq!(game.points_multiplier, 1.0);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(
            output.contains("Ignoring invalid POINTS_MULTIPLIER=\"lots\", using 1.0"),
            "{output}"
        );
    }

    #[test]
    fn bool_parsing() {
        for truthy in ["1", "true", "TRUE", "yes", "on", " On "] {
            assert!(to_bool(truthy), "{truthy}");
        }
        for falsy in ["0", "false", "no", "off", "", "enabled"] {
            assert!(!to_bool(falsy), "{falsy}");
        }
    }

    #[test]
    fn blank_maintenance_message_keeps_default() {
        let access = AccessSettings::from_lookup(lookup(&[
            ("MAINTENANCE_MODE", "true"),
            ("MAINTENANCE_MESSAGE", "  "),
        ]));
        assert!(access.maintenance_mode);
        assert_eq!(access.maintenance_message, "We'll be back shortly.");
    }
}
