//! The ordered formatting pipeline and its public entry points.

use crate::FormatFault;
use crate::stage::{Builtin, Stage};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

static PLAIN: Lazy<Formatter> = Lazy::new(Formatter::plain);
static UNICODE: Lazy<Formatter> = Lazy::new(Formatter::unicode);

/// Which built-in stage list a formatter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Markdown stages only.
    #[default]
    Plain,
    /// Escape decoding and symbol substitution before the markdown stages.
    Unicode,
}

impl Variant {
    /// The built-in stages for this variant, in order.
    pub fn stages(self) -> &'static [Builtin] {
        match self {
            Variant::Plain => Builtin::PLAIN,
            Variant::Unicode => Builtin::UNICODE,
        }
    }
}

/// Per-call options accepted by host bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Run the Unicode normalization stages.
    #[serde(default, alias = "handleUnicode")]
    pub handle_unicode: bool,
}

impl FormatOptions {
    /// The pipeline variant these options select.
    pub fn variant(&self) -> Variant {
        if self.handle_unicode {
            Variant::Unicode
        } else {
            Variant::Plain
        }
    }
}

/// An ordered list of stages applied one after another.
pub struct Formatter {
    stages: Vec<Box<dyn Stage>>,
}

impl Formatter {
    /// A formatter with no stages.
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// The plain pipeline.
    pub fn plain() -> Self {
        Self::for_variant(Variant::Plain)
    }

    /// The Unicode-aware pipeline.
    pub fn unicode() -> Self {
        Self::for_variant(Variant::Unicode)
    }

    /// The built-in pipeline for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        let mut formatter = Self::empty();
        for stage in variant.stages() {
            formatter.add_stage(*stage);
        }
        formatter
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) {
        self.stages.push(Box::new(stage));
    }

    /// Insert a stage at `index`, shifting later stages back.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    pub fn insert_stage<S: Stage + 'static>(&mut self, index: usize, stage: S) {
        self.stages.insert(index, Box::new(stage));
    }

    /// Stage names in run order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage, stopping at the first fault.
    pub fn try_format(&self, input: &str) -> Result<String, FormatFault> {
        let mut current = input.to_string();
        for stage in &self.stages {
            let replacement = match stage.apply(&current)? {
                Cow::Owned(rewritten) => Some(rewritten),
                // Trim hands back a shorter slice of the same buffer.
                Cow::Borrowed(slice) if slice.len() != current.len() => Some(slice.to_string()),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = replacement {
                log::debug!("stage '{}' rewrote input", stage.name());
                current = rewritten;
            }
        }
        Ok(current)
    }

    /// Run the pipeline; a fault becomes the red error fragment.
    pub fn format(&self, input: &str) -> String {
        self.try_format(input).unwrap_or_else(|fault| {
            log::warn!("formatting failed: {}", fault);
            fault.to_fragment()
        })
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::plain()
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Format `input` with the plain pipeline.
pub fn format_plain(input: &str) -> String {
    PLAIN.format(input)
}

/// Format `input` with the Unicode-aware pipeline.
pub fn format_unicode(input: &str) -> String {
    UNICODE.format(input)
}

/// Format `input` with the pipeline selected by `variant`.
pub fn format_variant(input: &str, variant: Variant) -> String {
    match variant {
        Variant::Plain => format_plain(input),
        Variant::Unicode => format_unicode(input),
    }
}

/// Format `input` with the pipeline selected by `options`.
pub fn format_with(input: &str, options: &FormatOptions) -> String {
    format_variant(input, options.variant())
}
