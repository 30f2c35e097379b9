use insta::assert_snapshot;
use livemark_core::{FormatFault, Formatter, custom_stage, format_plain, format_unicode};

#[test]
fn heading_levels() {
    assert_snapshot!(format_plain("# Title"), @"<p><h1>Title</h1></p>");
    assert_snapshot!(format_plain("###### Sub"), @"<p><h6>Sub</h6></p>");
    assert_snapshot!(format_plain("####### Too Many"), @"<p><h6># Too Many</h6></p>");
}

#[test]
fn list_becomes_single_ul() {
    let out = format_plain("* a\n* b");
    assert_snapshot!(out, @"<p><ul><li>a</li><li>b</li></ul></p>");
    assert_eq!(out.matches("<ul>").count(), 1);
}

#[test]
fn lists_split_by_blank_line_are_merged() {
    let out = format_plain("* a\n\n* b");
    assert_snapshot!(out, @"<p><ul><li>a</li><li>b</li></ul></p>");
    assert_eq!(out.matches("<ul>").count(), 1);
}

#[test]
fn bold_resolves_before_italic() {
    assert_snapshot!(
        format_plain("**bold** and *italic*"),
        @"<p><b>bold</b> and <i>italic</i></p>"
    );
    assert_snapshot!(
        format_plain("*a **b** c*"),
        @"<p><i>a <b>b</b> c</i></p>"
    );
}

#[test]
fn link_extraction() {
    assert_snapshot!(
        format_plain("[Go](https://go.dev)"),
        @r#"<p><a href="https://go.dev">Go</a></p>"#
    );
}

#[test]
fn escaped_breaks() {
    assert_snapshot!(
        format_plain(r"First\n\nSecond\nline"),
        @"<p>First</p><p>Second<br>line</p>"
    );
    assert_snapshot!(format_plain(r"\n\nlead"), @"<p></p><p>lead</p>");
}

#[test]
fn unmatched_delimiters_pass_through() {
    assert_snapshot!(
        format_plain("a * b ` c [d](e"),
        @"<p>a * b ` c [d](e</p>"
    );
}

#[test]
fn italic_runs_before_headers() {
    assert_snapshot!(
        format_plain("## snake_case_name"),
        @"<p><h2>snake<i>case</i>name</h2></p>"
    );
}

#[test]
fn headings_end_at_any_line_separator() {
    assert_eq!(
        format_plain("# a\u{2028}b"),
        "<p><h1>a</h1>\u{2028}b</p>"
    );
    assert_eq!(
        format_plain("intro\u{2029}## Next"),
        "<p>intro\u{2029}<h2>Next</h2></p>"
    );
}

#[test]
fn mixed_document() {
    let input = "# Notes\nIntro with `code`\n* one\n* two **strong**\nTail _end_";
    assert_eq!(
        format_plain(input),
        "<p><h1>Notes</h1>\nIntro with <code>code</code><ul><li>one</li><li>two <b>strong</b></li></ul>\nTail <i>end</i></p>"
    );
}

#[test]
fn unicode_variant_normalizes_before_markdown() {
    assert_snapshot!(
        format_unicode("It\u{2019}s \\u201Cgood\\u201D"),
        @r#"<p>It's "good"</p>"#
    );
    assert_snapshot!(
        format_unicode(r"\u00A9 2024 \u2014 *all* rights"),
        @"<p>&copy; 2024 &mdash; <i>all</i> rights</p>"
    );
}

#[test]
fn decoded_markers_take_part_in_markdown() {
    assert_snapshot!(format_unicode(r"\u002Aloud\u002A"), @"<p><i>loud</i></p>");
    assert_snapshot!(format_plain(r"\u002Aloud\u002A"), @r"<p>\u002Aloud\u002A</p>");
}

#[test]
fn always_returns_a_paragraph() {
    let inputs = [
        "",
        "   ",
        "*",
        "**",
        "`",
        "[",
        "](",
        "#",
        "_",
        "* ",
        "\u{FEFF}",
        r"\u",
        r"\uD800",
        "\r\n\r\n",
        "<script>",
    ];
    for input in inputs {
        assert!(format_plain(input).starts_with("<p>"), "plain {:?}", input);
        assert!(format_unicode(input).starts_with("<p"), "unicode {:?}", input);
    }
}

#[test]
fn formatting_trimmed_input_agrees() {
    let inputs = ["  # Title  ", "\n* a\n* b\n", "\t**x** ", " plain "];
    for input in inputs {
        assert_eq!(format_plain(input), format_plain(input.trim()));
        assert_eq!(format_unicode(input), format_unicode(input.trim()));
    }
}

#[test]
fn faulting_stage_yields_error_fragment() {
    let mut formatter = Formatter::plain();
    formatter.add_stage(custom_stage("hostile", |input: &str| {
        Err(FormatFault::stage("hostile", format!("refused {} bytes", input.len())))
    }));
    assert_snapshot!(
        formatter.format("abc"),
        @r#"<p style="color: red;">Error formatting input: stage 'hostile' failed: refused 10 bytes</p>"#
    );
}
