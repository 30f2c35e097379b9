//! Host binding boundary between an input surface and a rendered preview.
//!
//! The host (a browser page, a terminal UI, a service) calls
//! [`PreviewBinding::on_input_changed`] on every edit and renders the returned
//! HTML as markup. Each call is independent and supersedes the previous result.

use crate::pipeline::{Variant, format_variant};

/// Something that turns raw input into preview HTML.
pub trait PreviewBinding {
    /// Produce the HTML for the current input text.
    fn on_input_changed(&self, raw_text: &str) -> String;
}

impl<F> PreviewBinding for F
where
    F: Fn(&str) -> String,
{
    fn on_input_changed(&self, raw_text: &str) -> String {
        (self)(raw_text)
    }
}

/// One input surface wired to one output surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPane {
    /// Identifier of the input element.
    pub input_id: String,
    /// Identifier of the output element.
    pub output_id: String,
    /// Pipeline used for this pane.
    pub variant: Variant,
}

impl PreviewPane {
    /// Create a pane.
    pub fn new(input_id: impl Into<String>, output_id: impl Into<String>, variant: Variant) -> Self {
        Self {
            input_id: input_id.into(),
            output_id: output_id.into(),
            variant,
        }
    }
}

impl PreviewBinding for PreviewPane {
    fn on_input_changed(&self, raw_text: &str) -> String {
        format_variant(raw_text, self.variant)
    }
}

/// A rendered update for one output surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewUpdate<'a> {
    /// Output element to update.
    pub output_id: &'a str,
    /// HTML to assign as rendered content.
    pub html: String,
}

/// The two side-by-side panes of the preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPair {
    panes: [PreviewPane; 2],
}

impl PreviewPair {
    /// Pair two panes.
    pub fn new(first: PreviewPane, second: PreviewPane) -> Self {
        Self {
            panes: [first, second],
        }
    }

    /// The page's default wiring: `modelA` to `outputA`, `modelB` to `outputB`.
    pub fn with_variant(variant: Variant) -> Self {
        Self::new(
            PreviewPane::new("modelA", "outputA", variant),
            PreviewPane::new("modelB", "outputB", variant),
        )
    }

    /// Both panes, in page order.
    pub fn panes(&self) -> &[PreviewPane] {
        &self.panes
    }

    /// Handle an input event from `input_id`; `None` if no pane listens to it.
    pub fn dispatch(&self, input_id: &str, raw_text: &str) -> Option<PreviewUpdate<'_>> {
        let pane = self.panes.iter().find(|pane| pane.input_id == input_id)?;
        Some(PreviewUpdate {
            output_id: &pane.output_id,
            html: pane.on_input_changed(raw_text),
        })
    }
}

impl Default for PreviewPair {
    fn default() -> Self {
        Self::with_variant(Variant::Plain)
    }
}
