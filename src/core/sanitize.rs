// src/core/sanitize.rs

/// Collapse every whitespace run (including NBSP) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop the first whitespace-separated token ("Miér. 15 ene. 2024" → "15 ene. 2024").
/// `None` when fewer than `min_tokens` tokens are present.
pub fn drop_first_token(s: &str, min_tokens: usize) -> Option<String> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() < min_tokens.max(1) {
        return None;
    }
    Some(parts[1..].join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs() {
        assert_eq!(normalize_ws("  Miér.\n 15\u{a0}ene.\t2024 "), "Miér. 15 ene. 2024");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn drops_weekday() {
        assert_eq!(drop_first_token("Miér. 15 ene. 2024", 3).as_deref(), Some("15 ene. 2024"));
        assert_eq!(drop_first_token("Miér. 15", 3), None);
        assert_eq!(drop_first_token("", 0), None);
    }
}
