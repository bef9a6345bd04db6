/// Log tags identify the subsystem a log line comes from
///
/// Each tag has a debug key used by the `--debug-<key>` command-line flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Telegram,
    Notifier,
    Subscriptions,
    Commands,
}

impl LogTag {
    pub const ALL: [LogTag; 7] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Api,
        LogTag::Telegram,
        LogTag::Notifier,
        LogTag::Subscriptions,
        LogTag::Commands,
    ];

    /// Key used by `--debug-<key>`
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Api => "api",
            LogTag::Telegram => "telegram",
            LogTag::Notifier => "notifier",
            LogTag::Subscriptions => "subscriptions",
            LogTag::Commands => "commands",
        }
        .to_string()
    }

    /// Uppercase label without ANSI colors (file output)
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Subscriptions => "SUBS".to_string(),
            other => other.to_debug_key().to_uppercase(),
        }
    }

    pub fn from_debug_key(key: &str) -> Option<LogTag> {
        LogTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key)
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_key_roundtrip_for_every_tag() {
        for tag in LogTag::ALL {
            assert_eq!(LogTag::from_debug_key(&tag.to_debug_key()), Some(tag));
        }
        assert_eq!(LogTag::from_debug_key("pool"), None);
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(LogTag::Notifier.to_plain_string(), "NOTIFIER");
        assert_eq!(LogTag::Subscriptions.to_plain_string(), "SUBS");
    }
}
