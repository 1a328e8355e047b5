use std::sync::OnceLock;

/// Process-wide settings read once from the environment.
///
/// `PJSON_LOG` overrides the log filter (`EnvFilter` syntax) and
/// `PJSON_PRETTY` turns on pretty-printed JSON output by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: Option<String>,
    pub pretty: bool,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Returns the global settings, reading the environment on first call.
    pub fn get() -> &'static Settings {
        SETTINGS.get_or_init(|| Settings::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_filter: lookup("PJSON_LOG").filter(|v| !v.trim().is_empty()),
            pretty: lookup("PJSON_PRETTY").is_some_and(|v| is_truthy(&v)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(
            settings(&[]),
            Settings {
                log_filter: None,
                pretty: false
            }
        );
    }

    #[test]
    fn reads_log_filter() {
        let s = settings(&[("PJSON_LOG", "parsable_json=trace")]);
        assert_eq!(s.log_filter.as_deref(), Some("parsable_json=trace"));
    }

    #[test]
    fn blank_log_filter_is_ignored() {
        assert_eq!(settings(&[("PJSON_LOG", "  ")]).log_filter, None);
    }

    #[test]
    fn pretty_accepts_common_truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            assert!(settings(&[("PJSON_PRETTY", value)]).pretty, "{value}");
        }
        for value in ["0", "false", "no", ""] {
            assert!(!settings(&[("PJSON_PRETTY", value)]).pretty, "{value}");
        }
    }
}
