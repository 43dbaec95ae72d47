//! Value rendering.
//!
//! `to_text` is the language's observable textual form. It is used for
//! printed output, for error messages, for `+` concatenation and for the
//! text-to-number coercion, so its output must stay stable.

use std::fmt::Write;

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::Value;

/// Render a value.
///
/// With `quote`, strings are rendered as a double-quoted, escaped literal.
/// List items are always rendered quoted, whatever `quote` says.
pub fn to_text(value: &Value, quote: bool) -> String {
    match value {
        Value::String(s) if quote => quote_str(s),
        Value::String(s) => s.to_string(),
        Value::Number(n) => number_text(*n),
        Value::Boolean(true) => "yes".to_string(),
        Value::Boolean(false) => "no".to_string(),
        Value::Nil => "unknown".to_string(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(|item| to_text(item, true)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::FunctionRef(f) => format!("<function {}>", f.name),
    }
}

/// Shortest round-trip decimal form, never in exponent notation.
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-infinity".to_string()
    } else {
        // `Display` for f64 is shortest round-trip and never uses an exponent.
        format!("{n}")
    }
}

/// Double-quote and escape a string.
///
/// Printable characters are kept as-is; the usual C escapes are used where
/// they exist, `\xNN` for other ASCII controls and `\uNNNN`/`\UNNNNNNNN`
/// for everything else that is not printable (separators other than the
/// ASCII space, format characters, unassigned code points).
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if u32::from(c) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if !is_printable(c) => {
                let code = u32::from(c);
                let _ = if code < 0x1_0000 {
                    write!(out, "\\u{code:04x}")
                } else {
                    write!(out, "\\U{code:08x}")
                };
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space.
fn is_printable(c: char) -> bool {
    c == ' '
        || !matches!(
            get_general_category(c),
            GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
                | GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::Surrogate
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
        )
}
