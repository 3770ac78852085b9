//! `${name}` placeholder substitution for message text.
//!
//! Placeholders are filled from a result's arguments. Unknown names and
//! non-scalar values are left verbatim; `$${name}` produces a literal
//! `${name}`.

use serde_json::Value;

use crate::check::Arguments;

/// A segment of a message template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Split a template into literal and placeholder segments.
pub fn parse_placeholders(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }

        match chars.peek() {
            // Only `$${` is an escape; other doubled dollars are literal.
            Some('$') => {
                let mut ahead = chars.clone();
                ahead.next();
                if ahead.peek() == Some(&'{') {
                    chars.next();
                }
                literal.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if closed {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                } else {
                    literal.push_str("${");
                    literal.push_str(&name);
                }
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(", ")),
        Value::Null | Value::Object(_) => None,
    }
}

/// Replace `${name}` placeholders with argument values.
pub fn interpolate(template: &str, arguments: &Arguments) -> String {
    let mut out = String::with_capacity(template.len());

    for segment in parse_placeholders(template) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Placeholder(name) => {
                match arguments.get(name.trim()).and_then(scalar_text) {
                    Some(text) => out.push_str(&text),
                    None => {
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn parses_literals_and_placeholders() {
        assert_eq!(
            parse_placeholders("Use ${link} now"),
            vec![
                Segment::Literal("Use ".into()),
                Segment::Placeholder("link".into()),
                Segment::Literal(" now".into()),
            ]
        );
    }

    #[test]
    fn escaped_placeholder_is_literal() {
        let out = interpolate("cost: $${price}", &Arguments::new());
        assert_eq!(out, "cost: ${price}");
    }

    #[test]
    fn substitutes_scalars() {
        let arguments = args(json!({"file": "README.txt", "count": 2, "ok": false}));
        assert_eq!(
            interpolate("${file} x${count} ${ok}", &arguments),
            "README.txt x2 false"
        );
    }

    #[test]
    fn joins_scalar_lists() {
        let arguments = args(json!({"list": ["Thumbnail", "Large"]}));
        assert_eq!(interpolate("Styles: ${list}", &arguments), "Styles: Thumbnail, Large");
    }

    #[test]
    fn unknown_and_structured_placeholders_stay_verbatim() {
        let arguments = args(json!({"nested": {"a": 1}}));
        assert_eq!(
            interpolate("${missing} ${nested}", &arguments),
            "${missing} ${nested}"
        );
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(interpolate("oops ${name", &Arguments::new()), "oops ${name");
    }

    #[test]
    fn lone_dollar_is_kept() {
        assert_eq!(interpolate("$5 fee", &Arguments::new()), "$5 fee");
    }

    #[test]
    fn doubled_dollar_without_brace_is_kept() {
        assert_eq!(interpolate("$$5 fee", &Arguments::new()), "$$5 fee");
    }
}
