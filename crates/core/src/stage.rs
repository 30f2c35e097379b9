//! Rewrite stages of the formatting pipeline.
//!
//! Each stage is a pure text rewrite. Stages run strictly in order and later
//! stages see the markup inserted by earlier ones (italic matching can span an
//! inserted `<b>` tag, for example), so the order in [`Builtin::PLAIN`] and
//! [`Builtin::UNICODE`] must not change.

use crate::FormatFault;
use crate::unicode::{decode_escaped_unicode, handle_unicode};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Any character except a line terminator (`\n`, `\r`, U+2028, U+2029).
const LINE_CHAR: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Whitespace, line terminators included. U+FEFF counts, U+0085 does not.
const SPACE: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?:\A|\n)\* ({LINE_CHAR}*)")).unwrap());
static LIST_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?:<li>{LINE_CHAR}*?</li>)+")).unwrap());
static LIST_SEAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"</ul>{SPACE}*<ul>")).unwrap());
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\*\*({LINE_CHAR}*?)\*\*")).unwrap());
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\*({LINE_CHAR}*?)\*|_({LINE_CHAR}*?)_")).unwrap());
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"`({LINE_CHAR}*?)`")).unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\[([^\]]+)\]\(({LINE_CHAR}*?)\)")).unwrap());
static HEADER: Lazy<Regex> = Lazy::new(|| {
    let pattern = [r"(\A|[\n\r\x{2028}\x{2029}])(#{1,6})", SPACE, "*(", LINE_CHAR, "*)"];
    Regex::new(&pattern.concat()).unwrap()
});

/// A single ordered rewrite step.
pub trait Stage: Send + Sync {
    /// Short name used in logs and fault messages.
    fn name(&self) -> &str;

    /// Rewrite `input`, borrowing it back unchanged when there is nothing to do.
    fn apply<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, FormatFault>;
}

/// The built-in stages, in the order the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Strip leading and trailing whitespace.
    Trim,
    /// Decode literal `\uXXXX` escapes.
    DecodeEscapes,
    /// Replace smart punctuation with ASCII or HTML entities.
    Symbols,
    /// Literal `\n\n` becomes a paragraph boundary.
    ParagraphBreaks,
    /// Literal `\n` becomes `<br>`.
    LineBreaks,
    /// `* item` lines become `<li>` elements.
    ListItems,
    /// Runs of `<li>` elements are wrapped in `<ul>`.
    ListWrap,
    /// Adjacent `</ul><ul>` seams are removed.
    ListMerge,
    /// `**bold**`.
    Bold,
    /// `*italic*` and `_italic_`.
    Italic,
    /// `` `code` ``.
    InlineCode,
    /// `[label](target)`.
    Links,
    /// `#` to `######` headings.
    Headers,
    /// Wrap the whole result in `<p>` unless it already starts with one.
    OuterParagraph,
}

impl Builtin {
    /// Stage order of the plain pipeline.
    pub const PLAIN: &'static [Builtin] = &[
        Builtin::Trim,
        Builtin::ParagraphBreaks,
        Builtin::LineBreaks,
        Builtin::ListItems,
        Builtin::ListWrap,
        Builtin::ListMerge,
        Builtin::Bold,
        Builtin::Italic,
        Builtin::InlineCode,
        Builtin::Links,
        Builtin::Headers,
        Builtin::OuterParagraph,
    ];

    /// Stage order of the Unicode-aware pipeline.
    pub const UNICODE: &'static [Builtin] = &[
        Builtin::Trim,
        Builtin::DecodeEscapes,
        Builtin::Symbols,
        Builtin::ParagraphBreaks,
        Builtin::LineBreaks,
        Builtin::ListItems,
        Builtin::ListWrap,
        Builtin::ListMerge,
        Builtin::Bold,
        Builtin::Italic,
        Builtin::InlineCode,
        Builtin::Links,
        Builtin::Headers,
        Builtin::OuterParagraph,
    ];
}

impl Stage for Builtin {
    fn name(&self) -> &str {
        match self {
            Builtin::Trim => "trim",
            Builtin::DecodeEscapes => "decode-escapes",
            Builtin::Symbols => "symbols",
            Builtin::ParagraphBreaks => "paragraph-breaks",
            Builtin::LineBreaks => "line-breaks",
            Builtin::ListItems => "list-items",
            Builtin::ListWrap => "list-wrap",
            Builtin::ListMerge => "list-merge",
            Builtin::Bold => "bold",
            Builtin::Italic => "italic",
            Builtin::InlineCode => "inline-code",
            Builtin::Links => "links",
            Builtin::Headers => "headers",
            Builtin::OuterParagraph => "outer-paragraph",
        }
    }

    fn apply<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, FormatFault> {
        Ok(match self {
            Builtin::Trim => Cow::Borrowed(trim(input)),
            Builtin::DecodeEscapes => decode_escaped_unicode(input),
            Builtin::Symbols => handle_unicode(input),
            Builtin::ParagraphBreaks => paragraph_breaks(input),
            Builtin::LineBreaks => line_breaks(input),
            Builtin::ListItems => list_items(input),
            Builtin::ListWrap => list_wrap(input),
            Builtin::ListMerge => list_merge(input),
            Builtin::Bold => bold(input),
            Builtin::Italic => italic(input),
            Builtin::InlineCode => inline_code(input),
            Builtin::Links => links(input),
            Builtin::Headers => headers(input),
            Builtin::OuterParagraph => outer_paragraph(input),
        })
    }
}

/// A caller-supplied stage built from a closure.
pub struct FnStage<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named [`Stage`].
pub fn custom_stage<F>(name: impl Into<String>, f: F) -> FnStage<F>
where
    F: Fn(&str) -> Result<String, FormatFault> + Send + Sync,
{
    FnStage {
        name: name.into(),
        f,
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&str) -> Result<String, FormatFault> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, FormatFault> {
        (self.f)(input).map(Cow::Owned)
    }
}

/// Strips surrounding whitespace, including U+FEFF but not U+0085.
pub fn trim(input: &str) -> &str {
    input.trim_matches(is_space)
}

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t'
            | '\n'
            | '\u{B}'
            | '\u{C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Replaces the literal escape pair `\n\n` with `</p><p>`.
pub fn paragraph_breaks(input: &str) -> Cow<'_, str> {
    replace_literal(input, r"\n\n", "</p><p>")
}

/// Replaces each remaining literal `\n` escape with `<br>`.
pub fn line_breaks(input: &str) -> Cow<'_, str> {
    replace_literal(input, r"\n", "<br>")
}

/// Turns `* text` at the start of the input or after a newline into `<li>text</li>`.
///
/// The newline before the marker is consumed. A line that ends in `\r`, U+2028
/// or U+2029 rather than `\n` or the end of input is not an item.
pub fn list_items(input: &str) -> Cow<'_, str> {
    LIST_ITEM.replace_all(input, |caps: &Captures<'_>| {
        let whole = &caps[0];
        let end = caps.get(0).map_or(input.len(), |m| m.end());
        let rest = &input[end..];
        if rest.is_empty() || rest.starts_with('\n') {
            format!("<li>{}</li>", &caps[1])
        } else {
            whole.to_string()
        }
    })
}

/// Wraps each maximal run of `<li>` elements in a single `<ul>`.
pub fn list_wrap(input: &str) -> Cow<'_, str> {
    LIST_RUN.replace_all(input, "<ul>${0}</ul>")
}

/// Removes `</ul>` / `<ul>` seams so that neighbouring lists read as one.
pub fn list_merge(input: &str) -> Cow<'_, str> {
    LIST_SEAM.replace_all(input, "")
}

/// Replaces `**x**` with `<b>x</b>`.
pub fn bold(input: &str) -> Cow<'_, str> {
    BOLD.replace_all(input, "<b>${1}</b>")
}

/// Italicises `*x*` and `_x_`; the closing delimiter must match the opening one.
pub fn italic(input: &str) -> Cow<'_, str> {
    ITALIC.replace_all(input, "<i>${1}${2}</i>")
}

/// Replaces `` `x` `` with `<code>x</code>`.
pub fn inline_code(input: &str) -> Cow<'_, str> {
    INLINE_CODE.replace_all(input, "<code>${1}</code>")
}

/// Replaces `[label](target)` with an anchor.
pub fn links(input: &str) -> Cow<'_, str> {
    LINK.replace_all(input, "<a href=\"${2}\">${1}</a>")
}

/// Turns lines starting with one to six `#` into `<h1>`..`<h6>`.
///
/// A line starts at the beginning of the input or after `\n`, `\r`, U+2028 or
/// U+2029; the terminator is kept. Whitespace after the hashes is dropped, even
/// across line ends, and the rest of that line is the heading.
pub fn headers(input: &str) -> Cow<'_, str> {
    HEADER.replace_all(input, |caps: &Captures<'_>| {
        let level = caps[2].len();
        format!("{}<h{level}>{}</h{level}>", &caps[1], &caps[3])
    })
}

/// Wraps the text in `<p>` unless it already starts with `<p>`.
pub fn outer_paragraph(input: &str) -> Cow<'_, str> {
    if input.starts_with("<p>") {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("<p>{input}</p>"))
    }
}

fn replace_literal<'a>(input: &'a str, from: &str, to: &str) -> Cow<'a, str> {
    if input.contains(from) {
        Cow::Owned(input.replace(from, to))
    } else {
        Cow::Borrowed(input)
    }
}
