//! SQL identifier quoting.

/// Render a column name as a quoted SQL identifier, doubling embedded `"`.
///
/// The input is not otherwise validated: column names come from the
/// compile-time translation tables in the store layer, which are trusted.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_simple() {
        assert_eq!(quote("num_employees"), r#""num_employees""#);
    }

    #[test]
    fn quote_preserves_case() {
        assert_eq!(quote("logoUrl"), r#""logoUrl""#);
    }

    #[test]
    fn quote_escapes_embedded_quote() {
        assert_eq!(quote(r#"has"quote"#), r#""has""quote""#);
    }
}
