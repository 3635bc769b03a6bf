use std::env;

use crate::types::{SortKey, SortOrder, SortSpec};
use crate::view::TableOptions;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            report: ReportConfig::from_env(),
            log: LogConfig::from_env(),
        }
    }
}

/// Initial sort and table formatting of the report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportConfig {
    sort_key: Option<SortKey>,
    sort_order: SortOrder,
    table: TableOptions,
}

impl ReportConfig {
    const SORT_KEY_VAR: &'static str = "TOTE_REPORT_SORT_KEY";
    const SORT_ORDER_VAR: &'static str = "TOTE_REPORT_SORT_ORDER";
    const DECIMALS_VAR: &'static str = "TOTE_REPORT_UTILIZATION_DECIMALS";
    const SHOW_HIDDEN_VAR: &'static str = "TOTE_REPORT_SHOW_HIDDEN";

    fn from_env() -> Self {
        let sort_key = env_string(Self::SORT_KEY_VAR).and_then(|raw| match raw.parse::<SortKey>() {
            Ok(key) => Some(key),
            Err(err) => {
                eprintln!(
                    "⚠️ {} ignored: {}. Keeping the producer's order.",
                    Self::SORT_KEY_VAR,
                    err
                );
                None
            }
        });

        let sort_order = env_string(Self::SORT_ORDER_VAR)
            .and_then(|raw| match raw.parse::<SortOrder>() {
                Ok(order) => Some(order),
                Err(err) => {
                    eprintln!(
                        "⚠️ {} ignored: {}. Using {}.",
                        Self::SORT_ORDER_VAR,
                        err,
                        SortOrder::default()
                    );
                    None
                }
            })
            .unwrap_or_default();

        let decimals = load_usize_with_warning(
            Self::DECIMALS_VAR,
            TableOptions::DEFAULT_DECIMALS,
            |value| value <= TableOptions::MAX_DECIMALS,
            "must be between 0 and 6",
        );

        let show_hidden = env_string(Self::SHOW_HIDDEN_VAR)
            .and_then(|raw| parse_bool(&raw, Self::SHOW_HIDDEN_VAR))
            .unwrap_or(false);

        Self {
            sort_key,
            sort_order,
            table: TableOptions {
                decimals,
                show_hidden,
            },
        }
    }

    /// Sort applied right after loading, if any.
    pub fn initial_sort(&self) -> Option<SortSpec> {
        self.sort_key.map(|key| SortSpec::new(key, self.sort_order))
    }

    pub fn table_options(&self) -> TableOptions {
        self.table
    }

    /// Applies command line overrides on top of the environment values.
    pub fn with_overrides(
        mut self,
        sort_key: Option<SortKey>,
        sort_order: Option<SortOrder>,
        decimals: Option<usize>,
        show_hidden: bool,
    ) -> Self {
        if sort_key.is_some() {
            self.sort_key = sort_key;
        }
        if let Some(order) = sort_order {
            self.sort_order = order;
        }
        if let Some(decimals) = decimals {
            self.table.decimals = decimals.min(TableOptions::MAX_DECIMALS);
        }
        self.table.show_hidden |= show_hidden;
        self
    }
}

/// Log filter for the tracing subscriber.
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    filter: String,
}

impl LogConfig {
    pub const FILTER_VAR: &'static str = "TOTE_REPORT_LOG";
    pub const DEFAULT_FILTER: &'static str = "tote_report=warn";

    fn from_env() -> Self {
        Self {
            filter: env_string(Self::FILTER_VAR)
                .unwrap_or_else(|| Self::DEFAULT_FILTER.to_string()),
        }
    }

    /// Filter directives, e.g. `tote_report=debug`.
    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: Self::DEFAULT_FILTER.to_string(),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            eprintln!(
                "⚠️ Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}

fn load_usize_with_warning(
    var_name: &str,
    default: usize,
    validator: impl Fn(usize) -> bool,
    invalid_hint: &str,
) -> usize {
    match env_string(var_name) {
        Some(raw) => parse_usize(&raw, var_name, default, validator, invalid_hint),
        None => default,
    }
}

fn parse_usize(
    raw: &str,
    var_name: &str,
    default: usize,
    validator: impl Fn(usize) -> bool,
    invalid_hint: &str,
) -> usize {
    match raw.parse::<usize>() {
        Ok(value) if validator(value) => value,
        Ok(_) => {
            eprintln!(
                "⚠️ {} contains invalid value '{}': {}. Using {}.",
                var_name, raw, invalid_hint, default
            );
            default
        }
        Err(err) => {
            eprintln!(
                "⚠️ Could not parse {} ('{}') as number: {}. Using {}.",
                var_name, raw, err, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_true_values() {
        assert_eq!(parse_bool("1", "TEST_VAR"), Some(true));
        assert_eq!(parse_bool("true", "TEST_VAR"), Some(true));
        assert_eq!(parse_bool("yes", "TEST_VAR"), Some(true));
        assert_eq!(parse_bool("ON", "TEST_VAR"), Some(true));
        assert_eq!(parse_bool(" true ", "TEST_VAR"), Some(true));
    }

    #[test]
    fn test_parse_bool_false_values() {
        assert_eq!(parse_bool("0", "TEST_VAR"), Some(false));
        assert_eq!(parse_bool("No", "TEST_VAR"), Some(false));
        assert_eq!(parse_bool("  off  ", "TEST_VAR"), Some(false));
    }

    #[test]
    fn test_parse_bool_invalid_values() {
        assert_eq!(parse_bool("maybe", "TEST_VAR"), None);
        assert_eq!(parse_bool("", "TEST_VAR"), None);
    }

    #[test]
    fn test_parse_usize_validation() {
        let max = |v: usize| v <= TableOptions::MAX_DECIMALS;
        assert_eq!(parse_usize("3", "TEST_VAR", 2, max, "hint"), 3);
        assert_eq!(parse_usize("0", "TEST_VAR", 2, max, "hint"), 0);
        assert_eq!(parse_usize("9", "TEST_VAR", 2, max, "hint"), 2);
        assert_eq!(parse_usize("-1", "TEST_VAR", 2, max, "hint"), 2);
        assert_eq!(parse_usize("two", "TEST_VAR", 2, max, "hint"), 2);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = ReportConfig::default().with_overrides(
            Some(SortKey::VolumeUtilization),
            Some(SortOrder::Descending),
            Some(12),
            true,
        );

        assert_eq!(
            config.initial_sort(),
            Some(SortSpec::new(SortKey::VolumeUtilization, SortOrder::Descending))
        );
        assert_eq!(config.table_options().decimals, TableOptions::MAX_DECIMALS);
        assert!(config.table_options().show_hidden);
    }

    #[test]
    fn test_default_has_no_initial_sort() {
        let config = ReportConfig::default();
        assert_eq!(config.initial_sort(), None);
        assert_eq!(config.table_options(), TableOptions::default());
        assert_eq!(LogConfig::default().filter(), LogConfig::DEFAULT_FILTER);
    }
}
