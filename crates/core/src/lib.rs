#![deny(missing_docs)]
//! livemark core: a small Markdown-like dialect rendered to HTML for live preview.

/// Batch formatting across a thread pool.
pub mod batch;
/// Host binding boundary for preview surfaces.
pub mod binding;
/// Core error type.
pub mod error;
/// The ordered formatting pipeline and its entry points.
pub mod pipeline;
/// Individual rewrite stages.
pub mod stage;
/// Escaped code point decoding and smart punctuation mapping.
pub mod unicode;

pub use batch::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, format_batch,
    format_batch_with,
};
pub use binding::{PreviewBinding, PreviewPair, PreviewPane, PreviewUpdate};
pub use error::{ERROR_FRAGMENT_PREFIX, FormatFault};
pub use pipeline::{
    FormatOptions, Formatter, Variant, format_plain, format_unicode, format_variant, format_with,
};
pub use stage::{Builtin, FnStage, Stage, custom_stage};
pub use unicode::{SYMBOL_TABLE, decode_escaped_unicode, handle_unicode};
