use thiserror::Error;

/// Prefix shared by every rendered fault fragment.
pub const ERROR_FRAGMENT_PREFIX: &str = "<p style=\"color: red;\">Error formatting input: ";

/// Errors raised by a formatting stage.
///
/// Faults never cross the public `format_*` functions: they are rendered into
/// an error fragment by [`FormatFault::to_fragment`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatFault {
    /// A stage reported a failure while rewriting text.
    #[error("stage '{stage}' failed: {message}")]
    Stage {
        /// Name of the failing stage.
        stage: String,
        /// Failure description.
        message: String,
    },
}

impl FormatFault {
    /// Create a stage failure.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Render the fault as the red inline error fragment shown in place of output.
    pub fn to_fragment(&self) -> String {
        format!("{}{}</p>", ERROR_FRAGMENT_PREFIX, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_embeds_message() {
        let fault = FormatFault::stage("links", "boom");
        assert_eq!(
            fault.to_fragment(),
            "<p style=\"color: red;\">Error formatting input: stage 'links' failed: boom</p>"
        );
    }

    #[test]
    fn display_names_the_stage() {
        assert_eq!(
            FormatFault::stage("headers", "bad level").to_string(),
            "stage 'headers' failed: bad level"
        );
    }
}
