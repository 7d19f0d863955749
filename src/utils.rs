pub fn trim_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Splits a comma separated INI value, dropping blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter_map(trim_line)
        .map(str::to_string)
        .collect()
}

/// Interprets the boolean words accepted by INI readers.
pub fn parse_ini_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Removes every Markdown code fence marker, including a `json` language tag.
pub fn strip_code_fences(content: &str) -> String {
    content.trim().replace("```json", "").replace("```", "")
}
