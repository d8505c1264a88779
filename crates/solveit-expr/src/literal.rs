//! Numeric literal normalisation.
//!
//! evalexpr keeps integer literals as integers, so `1/2` would evaluate to
//! `0`. Every literal is rewritten as a plain float before parsing: `2`
//! becomes `2.0` and `1e-3` becomes `0.001`. Digits inside identifiers such
//! as `log10` are left alone.

/// Rewrites every numeric literal in `text` as a float literal.
pub(crate) fn normalize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_identifier_start(c) {
            while i < chars.len() && is_identifier_char(chars[i]) {
                out.push(chars[i]);
                i += 1;
            }
        } else if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) {
            let end = literal_end(&chars, i);
            let literal: String = chars[i..end].iter().collect();
            out.push_str(&float_literal(&literal));
            i = end;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(char::is_ascii_digit)
}

/// Index one past the end of the literal starting at `start`.
fn literal_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }

    // Exponent only when digits follow, so `2e` stays a literal and a name
    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

fn float_literal(literal: &str) -> String {
    match literal.parse::<f64>() {
        Ok(value) => {
            let mut text = value.to_string();
            if !text.contains('.') && !text.contains("inf") && !text.contains("NaN") {
                text.push_str(".0");
            }
            text
        }
        // Left for the parser to report
        Err(_) => literal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_become_floats() {
        assert_eq!(normalize("1/2"), "1.0/2.0");
        assert_eq!(normalize("x^2 - 3*x + 10"), "x^2.0 - 3.0*x + 10.0");
    }

    #[test]
    fn test_floats_unchanged() {
        assert_eq!(normalize("0.5*x"), "0.5*x");
        assert_eq!(normalize(".25 + x"), "0.25 + x");
    }

    #[test]
    fn test_scientific_literals() {
        assert_eq!(normalize("1e-3"), "0.001");
        assert_eq!(normalize("2.5E2*x"), "250.0*x");
        assert_eq!(normalize("x - 1e+1"), "x - 10.0");
    }

    #[test]
    fn test_identifiers_untouched() {
        assert_eq!(normalize("log10(x) + log2(x)"), "log10(x) + log2(x)");
        assert_eq!(normalize("x_1"), "x_1");
        assert_eq!(normalize("exp(2*x)"), "exp(2.0*x)");
    }

    #[test]
    fn test_euler_constant_is_not_an_exponent() {
        assert_eq!(normalize("e^x - 2"), "e^x - 2.0");
        assert_eq!(normalize("2*e"), "2.0*e");
    }
}
