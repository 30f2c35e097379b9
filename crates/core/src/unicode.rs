//! Unicode normalization: escaped code points and "smart" punctuation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

static ESCAPED_CODE_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").unwrap());

/// Punctuation and symbol characters rewritten by [`handle_unicode`], with their replacements.
pub const SYMBOL_TABLE: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2013}', "&ndash;"),
    ('\u{2014}', "&mdash;"),
    ('\u{2026}', "..."),
    ('\u{00A9}', "&copy;"),
    ('\u{00AE}', "&reg;"),
    ('\u{2122}', "&trade;"),
];

static SYMBOLS: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| SYMBOL_TABLE.iter().copied().collect());

/// Returns the replacement for `c` if it is one of the mapped symbols.
pub fn symbol_replacement(c: char) -> Option<&'static str> {
    SYMBOLS.get(&c).copied()
}

/// Decodes literal `\uXXXX` escapes (backslash, `u`, four hex digits) into characters.
///
/// A high-surrogate escape directly followed by a low-surrogate escape is combined
/// into one character. An unpaired surrogate has no `char` representation and
/// decodes to U+FFFD. Sequences with fewer than four hex digits are left as they are.
pub fn decode_escaped_unicode(input: &str) -> Cow<'_, str> {
    if !input.contains("\\u") {
        return Cow::Borrowed(input);
    }

    let escapes: Vec<(usize, usize, u32)> = ESCAPED_CODE_POINT
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let code_point = u32::from_str_radix(&caps[1], 16).ok()?;
            Some((whole.start(), whole.end(), code_point))
        })
        .collect();

    if escapes.is_empty() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    let mut i = 0;
    while i < escapes.len() {
        let (start, end, code_point) = escapes[i];
        out.push_str(&input[last..start]);

        let (decoded, consumed_end, step) = match escapes.get(i + 1) {
            Some(&(next_start, next_end, low))
                if is_high_surrogate(code_point)
                    && next_start == end
                    && is_low_surrogate(low) =>
            {
                let combined = 0x10000 + ((code_point - 0xD800) << 10) + (low - 0xDC00);
                (char::from_u32(combined), next_end, 2)
            }
            _ => (char::from_u32(code_point), end, 1),
        };

        out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));

        last = consumed_end;
        i += step;
    }
    out.push_str(&input[last..]);

    Cow::Owned(out)
}

/// Replaces every character found in [`SYMBOL_TABLE`] with its mapped replacement.
pub fn handle_unicode(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| SYMBOLS.contains_key(&c)) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match symbol_replacement(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn is_high_surrogate(code_point: u32) -> bool {
    (0xD800..=0xDBFF).contains(&code_point)
}

fn is_low_surrogate(code_point: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&code_point)
}
