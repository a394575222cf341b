use std::path::Path;

/// Display casing for a directory name.
///
/// Short names, and names up to seven bytes without a lowercase vowel, are
/// taken to be acronyms and upper-cased entirely ("css" -> "CSS"). Anything
/// else only has its first character upper-cased ("linux" -> "Linux").
pub fn format_name(name: &str) -> String {
    let has_vowel = name.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));

    if name.len() < 3 || (!has_vowel && name.len() <= 7) {
        return name.to_ascii_uppercase();
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut converted = String::with_capacity(name.len());
            converted.push(first.to_ascii_uppercase());
            converted.push_str(chars.as_str());
            converted
        }
        None => String::new(),
    }
}

/// File size in kilobytes, one decimal, comma-grouped: `1,234.6 kB`.
pub fn format_size(bytes: u64) -> String {
    // Halves round up.
    let tenths = bytes.saturating_add(50) / 100;
    let whole = (tenths / 10).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{} kB", grouped, tenths % 10)
}

/// Site-relative source of a file, always with exactly one leading slash.
pub fn src_from_file(file: &Path, site_root: &Path) -> String {
    let relative = file.strip_prefix(site_root).unwrap_or(file);
    let relative = relative.to_string_lossy();
    format!("/{}", relative.trim_start_matches('/'))
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
