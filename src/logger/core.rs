/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug level requires --debug-<tag> (or --debug-all)
/// 4. Verbose level requires --verbose
use super::config::{get_logger_config, is_debug_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    match level {
        LogLevel::Debug => is_debug_enabled_for_tag(config, tag),
        LogLevel::Verbose => config.min_level == LogLevel::Verbose,
        _ => true,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&get_logger_config(), &tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::super::config::config_from_flags;
    use super::*;

    #[test]
    fn test_errors_always_logged() {
        let config = config_from_flags(&[], false, true);
        assert!(should_log(&config, &LogTag::Api, LogLevel::Error));
        assert!(should_log(&config, &LogTag::Api, LogLevel::Warning));
        assert!(!should_log(&config, &LogTag::Api, LogLevel::Info));
    }

    #[test]
    fn test_debug_gated_per_tag() {
        let config = config_from_flags(&["notifier".to_string()], false, false);
        assert!(should_log(&config, &LogTag::Notifier, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Api, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Notifier, LogLevel::Verbose));

        let config = config_from_flags(&["all".to_string()], false, false);
        assert!(should_log(&config, &LogTag::Api, LogLevel::Debug));
    }

    #[test]
    fn test_verbose_requires_flag() {
        let config = config_from_flags(&[], true, false);
        assert!(should_log(&config, &LogTag::System, LogLevel::Verbose));
        assert!(should_log(&config, &LogTag::System, LogLevel::Info));
    }
}
