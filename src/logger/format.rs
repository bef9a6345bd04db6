//! Log formatting and output with ANSI colors and text wrapping
//!
//! Handles:
//! - Colorized console output with tag and level columns
//! - Word wrapping of long messages with aligned continuation lines
//! - Mirroring every line to the log file
//! - Broken pipe handling for piped output

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Column widths for alignment
const TAG_WIDTH: usize = 13;
const LEVEL_WIDTH: usize = 7;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let base_line = format!(
        "{} [{}] [{}] ",
        time.dimmed(),
        format_tag(&tag),
        format_level(level)
    );
    // time + space + "[tag] " + "[level] "
    let prefix_width = time.len() + 1 + TAG_WIDTH + 3 + LEVEL_WIDTH + 3;
    let available = MAX_LINE_LENGTH.saturating_sub(prefix_width).max(40);

    let chunks = wrap_text(message, available);
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let plain_tag = tag.to_plain_string();

    for (i, chunk) in chunks.iter().enumerate() {
        let console_line = if i == 0 {
            format!("{}{}", base_line, colorize_message(level, chunk))
        } else {
            format!("{}{}", " ".repeat(prefix_width), colorize_message(level, chunk))
        };
        print_stdout_safe(&console_line);

        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            plain_tag,
            level.as_str(),
            chunk
        ));
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Api => label.bright_blue().bold(),
        LogTag::Telegram => label.bright_cyan().bold(),
        LogTag::Notifier => label.bright_green().bold(),
        LogTag::Subscriptions => label.bright_magenta().bold(),
        LogTag::Commands => label.cyan().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.bright_green(),
        LogLevel::Debug => label.bright_black(),
        LogLevel::Verbose => label.dimmed(),
    }
}

fn colorize_message(level: LogLevel, message: &str) -> ColoredString {
    match level {
        LogLevel::Error => message.red(),
        LogLevel::Warning => message.yellow(),
        LogLevel::Debug | LogLevel::Verbose => message.dimmed(),
        LogLevel::Info => message.normal(),
    }
}

/// Print to stdout, ignoring broken pipes (e.g. `frizmonitor | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout().lock();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
}

/// Wrap text at word boundaries, keeping explicit newlines
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in line.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_width) {
                    result.push(piece.iter().collect());
                }
            } else if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current, word.to_string()));
                current_len = word_len;
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_message() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world".to_string()]);
    }

    #[test]
    fn test_wrap_at_word_boundary() {
        let wrapped = wrap_text("aaaa bbbb cccc", 9);
        assert_eq!(wrapped, vec!["aaaa bbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn test_wrap_breaks_long_word_and_keeps_newlines() {
        let wrapped = wrap_text("abcdefghij\nxy", 4);
        assert_eq!(wrapped, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
