use crate::strip_rename::PatternSet;

/// Find the substring to strip from the given filename.
///
/// Regex rules are checked first in listed order,
/// returning the first capture group if the regex has one and the whole match otherwise.
/// Literal rules are only checked if no regex matches.
#[must_use]
pub fn find(patterns: &PatternSet, filename: &str) -> Option<String> {
    for regex in &patterns.regex {
        if let Some(captures) = regex.captures(filename) {
            let matched = captures.get(1).or_else(|| captures.get(0)).map(|m| m.as_str());
            if let Some(text) = matched.filter(|text| !text.is_empty()) {
                return Some(text.to_string());
            }
        }
    }

    patterns
        .direct
        .iter()
        .find(|direct| !direct.is_empty() && filename.contains(direct.as_str()))
        .cloned()
}
