//! Placeholder rewriting between the two supported SQL dialects.
//!
//! Query templates are written once and rewritten for the active backend:
//! `?` placeholders become `$1`, `$2`, … for PostgreSQL, and `$n`
//! placeholders become `?` for SQLite. Text inside single-quoted string
//! literals is never rewritten.

use super::BackendKind;

/// Rewrite a canonical template for the given backend.
pub(super) fn for_backend(template: &str, kind: BackendKind) -> String {
    match kind {
        BackendKind::Postgres => number_placeholders(template),
        BackendKind::Sqlite => strip_placeholder_numbers(template),
    }
}

/// Replace each `?` outside string literals with `$1`, `$2`, … in order of
/// appearance.
fn number_placeholders(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut in_literal = false;
    let mut next = 1_u32;

    for ch in template.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                out.push('$');
                out.push_str(&next.to_string());
                next += 1;
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Replace each `$n` outside string literals with `?`.
fn strip_placeholder_numbers(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut in_literal = false;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '$' if !in_literal && chars.peek().is_some_and(char::is_ascii_digit) => {
                while chars.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                }

                out.push('?');
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_placeholders_in_order() {
        let sql = number_placeholders("SELECT * FROM t WHERE a = ? AND b = ?");

        assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND b = $2");
    }

    #[test]
    fn test_leaves_question_marks_inside_literals() {
        let sql = number_placeholders("SELECT * FROM t WHERE a = '?' AND b = ?");

        assert_eq!(sql, "SELECT * FROM t WHERE a = '?' AND b = $1");
    }

    #[test]
    fn test_strips_numbered_placeholders() {
        let sql = strip_placeholder_numbers("UPDATE t SET a = $1, b = $12 WHERE id = $2");

        assert_eq!(sql, "UPDATE t SET a = ?, b = ? WHERE id = ?");
    }

    #[test]
    fn test_leaves_dollar_signs_inside_literals() {
        let sql = strip_placeholder_numbers("SELECT '$1' AS tag FROM t WHERE id = $1");

        assert_eq!(sql, "SELECT '$1' AS tag FROM t WHERE id = ?");
    }

    #[test]
    fn test_bare_dollar_sign_is_untouched() {
        let sql = strip_placeholder_numbers("SELECT price || '$' FROM t WHERE id = $1");

        assert_eq!(sql, "SELECT price || '$' FROM t WHERE id = ?");
    }

    #[test]
    fn test_canonical_template_is_stable_per_backend() {
        let template = "INSERT INTO t (a, b) VALUES (?, ?)";

        assert_eq!(
            for_backend(template, BackendKind::Postgres),
            "INSERT INTO t (a, b) VALUES ($1, $2)"
        );
        assert_eq!(for_backend(template, BackendKind::Sqlite), template);
    }
}
