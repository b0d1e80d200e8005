//! Numbering labels for the three nesting levels: decimal, lowercase
//! letters, lowercase roman numerals. Past the letter budget (26) or the
//! roman budget (20) the label falls back to the decimal index at that
//! level, so deep lists stay unambiguous instead of wrapping.

const ROMAN_BUDGET: usize = 20;

/// Fixed indent step per nesting level in the plain-text rendering.
pub const INDENT: &str = "   ";

/// Label for the 1-based `index` at `level`. Levels above 3 reuse the
/// roman style.
pub fn label(level: u8, index: usize) -> String {
    match level {
        0 | 1 => format!("{index}."),
        2 => letter_label(index),
        _ => roman_label(index),
    }
}

pub fn indent_for(level: u8) -> String {
    INDENT.repeat(level.saturating_sub(1) as usize)
}

fn letter_label(index: usize) -> String {
    match index {
        1..=26 => {
            let letter = (b'a' + (index - 1) as u8) as char;
            format!("{letter}.")
        }
        _ => format!("{index}."),
    }
}

fn roman_label(index: usize) -> String {
    if index == 0 || index > ROMAN_BUDGET {
        return format!("{index}.");
    }
    format!("{}.", to_roman(index))
}

fn to_roman(mut n: usize) -> String {
    const PAIRS: &[(usize, &str)] = &[(10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i")];
    let mut out = String::new();
    for &(value, glyph) in PAIRS {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_is_decimal() {
        assert_eq!(label(1, 1), "1.");
        assert_eq!(label(1, 12), "12.");
    }

    #[test]
    fn level_two_is_letters() {
        assert_eq!(label(2, 1), "a.");
        assert_eq!(label(2, 26), "z.");
    }

    #[test]
    fn level_three_is_roman() {
        assert_eq!(label(3, 1), "i.");
        assert_eq!(label(3, 2), "ii.");
        assert_eq!(label(3, 4), "iv.");
        assert_eq!(label(3, 9), "ix.");
        assert_eq!(label(3, 14), "xiv.");
        assert_eq!(label(3, 20), "xx.");
    }

    #[test]
    fn overflow_falls_back_to_decimal() {
        assert_eq!(label(2, 27), "27.");
        assert_eq!(label(3, 21), "21.");
    }

    #[test]
    fn indent_grows_per_level() {
        assert_eq!(indent_for(1), "");
        assert_eq!(indent_for(2), INDENT);
        assert_eq!(indent_for(3), INDENT.repeat(2));
    }
}
