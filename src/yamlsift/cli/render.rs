//! Terminal rendering for command results.
//!
//! Renderers return strings; handlers decide where they go. Listings are
//! aligned on display width so wide keys (CJK, emoji) line up.

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use yamlsift::api::{CmdMessage, FlatEntry, FormField, KindInfo, MessageLevel};
use yamlsift::collect::MatchSet;
use yamlsift::config::SiftConfig;

const LINE_WIDTH: usize = 100;
const MAX_PATH_COLUMN: usize = 48;

/// Status messages go to stderr so stdout stays a clean document.
pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_matches(matches: &MatchSet) -> String {
    let keyword_width = matches.all().map(|m| m.keyword.width()).max().unwrap_or(0);
    let paths: Vec<String> = matches.all().map(|m| m.path.to_string()).collect();
    let path_width = column_width(paths.iter().map(String::as_str));

    let mut output = String::new();
    for (kind, list) in matches.iter() {
        if list.is_empty() {
            continue;
        }
        output.push_str(&format!("{}\n", kind.bold()));
        for m in list {
            let keyword = pad(&m.keyword, keyword_width);
            let path = pad(&truncate_to_width(&m.path.to_string(), path_width), path_width);
            let used = 2 + keyword_width + 2 + path_width + 2;
            let value = truncate_to_width(&m.value.display_inline(), LINE_WIDTH.saturating_sub(used));
            output.push_str(&format!(
                "  {}  {}  {}\n",
                keyword.yellow(),
                path.cyan(),
                value
            ));
        }
    }
    output
}

pub(super) fn render_fields(fields: &[FormField]) -> String {
    let name_width = column_width(fields.iter().map(|f| f.name.as_str()));
    let mut output = String::new();
    for field in fields {
        let name = pad(&truncate_to_width(&field.name, name_width), name_width);
        output.push_str(&format!(
            "{}  [{}]  {}\n",
            name.cyan(),
            field.input_type,
            field.placeholder.dimmed()
        ));
    }
    output
}

pub(super) fn render_entries(entries: &[FlatEntry]) -> String {
    let path_width = column_width(entries.iter().map(|e| e.path.as_str()));
    let mut output = String::new();
    for entry in entries {
        let path = pad(&truncate_to_width(&entry.path, path_width), path_width);
        let available = LINE_WIDTH.saturating_sub(path_width + 2);
        let value = truncate_to_width(&entry.value, available);
        let value = if entry.kind == "scalar" {
            value.normal()
        } else {
            value.dimmed()
        };
        output.push_str(&format!("{}  {}\n", path.cyan(), value));
    }
    output
}

pub(super) fn render_kinds(kinds: &[KindInfo]) -> String {
    let mut output = String::new();
    for kind in kinds {
        output.push_str(&format!(
            "{} {}\n",
            kind.name.bold(),
            format!("({} keywords)", kind.keyword_count()).dimmed()
        ));
        for (section, keywords) in &kind.sections {
            match section {
                Some(section) => {
                    output.push_str(&format!("  {}: {}\n", section.yellow(), keywords.join(", ")))
                }
                None => output.push_str(&format!("  {}\n", keywords.join(", "))),
            }
        }
    }
    output
}

pub(super) fn render_config(config: &SiftConfig) -> String {
    let lines: Vec<String> = config
        .list_all()
        .into_iter()
        .map(|(k, v)| format!("{} = {}", k, v))
        .collect();
    render_text_list(&lines, "No configuration values.")
}

pub(super) fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// JSON rendering of a match set: one object per match, in order.
pub(super) fn matches_to_json(matches: &MatchSet) -> serde_json::Value {
    serde_json::Value::Array(
        matches
            .iter()
            .flat_map(|(kind, list)| {
                list.iter().map(move |m| {
                    serde_json::json!({
                        "kind": kind,
                        "keyword": m.keyword,
                        "path": m.path.to_string(),
                        "value": m.value,
                    })
                })
            })
            .collect(),
    )
}

fn column_width<'a>(items: impl Iterator<Item = &'a str>) -> usize {
    items.map(|s| s.width()).max().unwrap_or(0).min(MAX_PATH_COLUMN)
}

fn pad(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
