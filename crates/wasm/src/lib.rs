use livemark_core::{
    BatchInput, BatchResult, FormatOptions, Formatter, PreviewBinding, PreviewPane, Variant,
};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Options
// ============================================================================

fn parse_options(config: JsValue) -> FormatOptions {
    if config.is_undefined() || config.is_null() {
        return FormatOptions::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_else(|err| {
        log::warn!("ignoring invalid format options: {}", err);
        FormatOptions::default()
    })
}

// ============================================================================
// Format API
// ============================================================================

/// Formats input with the plain pipeline.
#[wasm_bindgen(js_name = formatPlain)]
pub fn format_plain(input: &str) -> String {
    livemark_core::format_plain(input)
}

/// Formats input with the Unicode-aware pipeline.
#[wasm_bindgen(js_name = formatUnicode)]
pub fn format_unicode(input: &str) -> String {
    livemark_core::format_unicode(input)
}

/// Formats input with the pipeline chosen by `config`.
///
/// `config` is an optional object: `{ handleUnicode: boolean }`. Missing or
/// malformed options fall back to the plain pipeline.
#[wasm_bindgen]
pub fn format(input: &str, config: JsValue) -> String {
    livemark_core::format_with(input, &parse_options(config))
}

/// Formats an array of `{ id, source }` objects in order.
///
/// Returns an array of `{ id, html, error? }`. A faulting input carries the
/// error fragment as `html` and does not stop the others.
#[wasm_bindgen(js_name = formatMany)]
pub fn format_many(inputs: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let inputs: Vec<BatchInput> = serde_wasm_bindgen::from_value(inputs)
        .map_err(|e| JsError::new(&format!("Invalid inputs: {}", e)))?;
    let formatter = Formatter::for_variant(parse_options(config).variant());

    // The browser has no rayon pool; format sequentially.
    let results: Vec<BatchResult> = inputs
        .into_iter()
        .map(|input| {
            let outcome = formatter.try_format(&input.source);
            BatchResult::from_outcome(input.id, outcome)
        })
        .collect();

    serde_wasm_bindgen::to_value(&results)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Preview binding
// ============================================================================

/// One textarea wired to one output element.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { Preview } from './livemark_wasm';
///
/// for (const [input, output] of [["modelA", "outputA"], ["modelB", "outputB"]]) {
///   const preview = new Preview(input, output, false);
///   document.getElementById(input).addEventListener("input", (e) => {
///     document.getElementById(preview.outputId).innerHTML =
///       preview.onInputChanged(e.target.value);
///   });
/// }
/// ```
#[wasm_bindgen]
pub struct Preview {
    pane: PreviewPane,
}

#[wasm_bindgen]
impl Preview {
    /// Creates a preview for `input_id`, rendering into `output_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(input_id: String, output_id: String, handle_unicode: bool) -> Preview {
        let variant = if handle_unicode {
            Variant::Unicode
        } else {
            Variant::Plain
        };
        Preview {
            pane: PreviewPane::new(input_id, output_id, variant),
        }
    }

    /// Identifier of the input element.
    #[wasm_bindgen(getter, js_name = inputId)]
    pub fn input_id(&self) -> String {
        self.pane.input_id.clone()
    }

    /// Identifier of the output element.
    #[wasm_bindgen(getter, js_name = outputId)]
    pub fn output_id(&self) -> String {
        self.pane.output_id.clone()
    }

    /// Whether this preview runs the Unicode-aware pipeline.
    #[wasm_bindgen(getter, js_name = handleUnicode)]
    pub fn handle_unicode(&self) -> bool {
        self.pane.variant == Variant::Unicode
    }

    /// HTML for the current input value; assign it as rendered markup.
    #[wasm_bindgen(js_name = onInputChanged)]
    pub fn on_input_changed(&self, raw_text: &str) -> String {
        self.pane.on_input_changed(raw_text)
    }
}
