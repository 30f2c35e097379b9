//! Batch formatting across a rayon thread pool.

use crate::FormatFault;
use crate::pipeline::{Formatter, Variant};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// A single text to format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInput {
    /// Caller-chosen identifier echoed in the result.
    pub id: String,
    /// Raw input text.
    pub source: String,
}

/// Result for a single input of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered HTML; the error fragment when formatting failed.
    pub html: String,
    /// Fault message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResult {
    /// Build the result for `id` from a pipeline outcome.
    ///
    /// A fault is rendered into `html` and its message kept in `error`.
    pub fn from_outcome(id: String, outcome: Result<String, FormatFault>) -> Self {
        match outcome {
            Ok(html) => Self {
                id,
                html,
                error: None,
            },
            Err(fault) => Self {
                id,
                html: fault.to_fragment(),
                error: Some(fault.to_string()),
            },
        }
    }
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Total number of inputs processed.
    pub total: u32,
    /// Number of inputs formatted without a fault.
    pub succeeded: u32,
    /// Number of inputs that faulted.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the global rayon pool.
    #[serde(default)]
    pub max_threads: Option<u32>,
    /// Pipeline variant applied to every input.
    #[serde(default)]
    pub variant: Variant,
}

/// All results, in input order, plus statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProcessingResult {
    /// Individual results for each input.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Format every input in parallel with the variant named in `options`.
pub fn format_batch(inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchProcessingResult {
    format_batch_with(&Formatter::for_variant(options.variant), inputs, options)
}

/// Format every input in parallel with a caller-supplied formatter.
///
/// `options.variant` is ignored; the formatter's own stages are used.
pub fn format_batch_with(
    formatter: &Formatter,
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
) -> BatchProcessingResult {
    let start = Instant::now();

    let pool = match options.max_threads {
        Some(max_threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .map_err(|err| log::warn!("falling back to the global pool: {}", err))
            .ok(),
        None => None,
    };

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let outcome = formatter.try_format(&input.source);
        match &outcome {
            Ok(_) => succeeded.fetch_add(1, Ordering::Relaxed),
            Err(fault) => {
                log::warn!("formatting '{}' failed: {}", input.id, fault);
                failed.fetch_add(1, Ordering::Relaxed)
            }
        };
        BatchResult::from_outcome(input.id, outcome)
    };

    let results: Vec<BatchResult> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}
