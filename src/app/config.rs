//! Application configuration
//!
//! Process-level settings that apply before a generator exists.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Explicit filter directive, wins over `verbose`
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_level: None,
        }
    }

    pub fn with_log_level(mut self, log_level: Option<String>) -> Self {
        self.log_level = log_level.filter(|level| !level.trim().is_empty());
        self
    }

    /// Get the log filter based on the explicit level or verbosity
    pub fn log_level(&self) -> String {
        if let Some(level) = &self.log_level {
            return level.to_lowercase();
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(2).log_level(), "trace");
        assert_eq!(AppConfig::new(5).log_level(), "trace");
    }

    #[test]
    fn test_explicit_level_wins() {
        let config = AppConfig::new(2).with_log_level(Some("ERROR".to_string()));
        assert_eq!(config.log_level(), "error");

        let config = AppConfig::new(1).with_log_level(Some("  ".to_string()));
        assert_eq!(config.log_level(), "debug");
    }
}
