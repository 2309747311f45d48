//! Lexical extraction of a JSON object from free-form completion text.

/// Locate the first balanced brace-delimited object substring in `text`.
///
/// Tolerates leading and trailing prose. String literals and escapes are
/// respected, so braces inside quoted values do not affect balancing.
/// Returns `None` when no opening brace exists or the braces never balance.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
