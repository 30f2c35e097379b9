use livemark_wasm::{Preview, format, format_many, format_plain, format_unicode};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Serialize)]
struct Config {
    #[serde(rename = "handleUnicode")]
    handle_unicode: bool,
}

#[derive(Serialize)]
struct Input {
    id: String,
    source: String,
}

#[derive(Deserialize, Debug)]
struct Output {
    id: String,
    html: String,
    error: Option<String>,
}

fn config(handle_unicode: bool) -> JsValue {
    serde_wasm_bindgen::to_value(&Config { handle_unicode }).expect("serialize config")
}

#[wasm_bindgen_test]
fn plain_entry_point() {
    assert_eq!(format_plain("# Title"), "<p><h1>Title</h1></p>");
}

#[wasm_bindgen_test]
fn unicode_entry_point() {
    assert_eq!(format_unicode("a\u{2026}"), "<p>a...</p>");
}

#[wasm_bindgen_test]
fn format_defaults_to_plain() {
    assert_eq!(format("\u{2122}", JsValue::UNDEFINED), "<p>\u{2122}</p>");
    assert_eq!(format("\u{2122}", JsValue::NULL), "<p>\u{2122}</p>");
    assert_eq!(format("\u{2122}", JsValue::from_str("nonsense")), "<p>\u{2122}</p>");
}

#[wasm_bindgen_test]
fn format_reads_handle_unicode() {
    assert_eq!(format("\u{2122}", config(true)), "<p>&trade;</p>");
    assert_eq!(format("\u{2122}", config(false)), "<p>\u{2122}</p>");
}

#[wasm_bindgen_test]
fn format_many_keeps_order() {
    let inputs = vec![
        Input {
            id: "a".to_string(),
            source: "*x*".to_string(),
        },
        Input {
            id: "b".to_string(),
            source: r"\uDC00".to_string(),
        },
    ];
    let value = serde_wasm_bindgen::to_value(&inputs).expect("serialize inputs");
    let out = format_many(value, config(true)).expect("format_many should succeed");
    let out: Vec<Output> = serde_wasm_bindgen::from_value(out).expect("deserialize results");

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, "a");
    assert_eq!(out[0].html, "<p><i>x</i></p>");
    assert!(out[0].error.is_none());
    assert_eq!(out[1].id, "b");
    assert_eq!(out[1].html, "<p>\u{FFFD}</p>");
    assert!(out[1].error.is_none());
}

#[wasm_bindgen_test]
fn format_many_rejects_non_arrays() {
    assert!(format_many(JsValue::from_f64(3.0), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn preview_renders_per_keystroke() {
    let preview = Preview::new("modelA".to_string(), "outputA".to_string(), false);
    assert_eq!(preview.input_id(), "modelA");
    assert_eq!(preview.output_id(), "outputA");
    assert!(!preview.handle_unicode());
    assert_eq!(preview.on_input_changed("*"), "<p>*</p>");
    assert_eq!(preview.on_input_changed("**b**"), "<p><b>b</b></p>");
}
