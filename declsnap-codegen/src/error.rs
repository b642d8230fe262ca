//! Errors raised while assembling generated units.

use thiserror::Error;

/// Failures of the code generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("malformed scope '{scope}': {reason}")]
    MalformedScope { scope: String, reason: &'static str },

    #[error("a unit named '{hint_name}' has already been generated")]
    DuplicateUnit { hint_name: String },

    #[error("{kind} was raised. Message: {message} Trace: {trace}")]
    EmissionFailure {
        /// Identity of the work item that failed.
        item: String,
        kind: &'static str,
        message: String,
        trace: String,
    },
}

impl GenerateError {
    pub(crate) fn malformed(scope: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedScope {
            scope: scope.into(),
            reason,
        }
    }

    /// Short name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedScope { .. } => "MalformedScope",
            Self::DuplicateUnit { .. } => "DuplicateUnit",
            Self::EmissionFailure { .. } => "EmissionFailure",
        }
    }

    /// Collapse an arbitrary failure into a single-line emission failure for `item`.
    pub fn emission_failure(item: impl Into<String>, report: &eyre::Report) -> Self {
        let kind = report
            .chain()
            .find_map(|cause| cause.downcast_ref::<GenerateError>())
            .map(GenerateError::kind)
            .unwrap_or("Error");

        let trace = report
            .chain()
            .skip(1)
            .map(|cause| single_line(&cause.to_string()))
            .collect::<Vec<_>>()
            .join(" - ");

        Self::EmissionFailure {
            item: item.into(),
            kind,
            message: single_line(&report.to_string()),
            trace,
        }
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", "").replace(['\r', '\n'], "")
}

#[cfg(test)]
mod tests {
    use eyre::WrapErr;

    use super::*;

    #[test]
    fn test_flattens_message_and_chain() {
        let result: eyre::Result<()> = Err(GenerateError::malformed("", "empty name"))
            .wrap_err("while writing\nscope headers");
        let report = result.unwrap_err();

        let err = GenerateError::emission_failure("Baz.Bar()", &report);
        assert_eq!(err.kind(), "EmissionFailure");
        assert_eq!(
            err.to_string(),
            "MalformedScope was raised. Message: while writingscope headers \
             Trace: malformed scope '': empty name"
        );
    }

    #[test]
    fn test_foreign_errors_are_generic() {
        let report = eyre::eyre!("boom");
        let err = GenerateError::emission_failure("Baz.Bar()", &report);
        match err {
            GenerateError::EmissionFailure {
                item, kind, trace, ..
            } => {
                assert_eq!(item, "Baz.Bar()");
                assert_eq!(kind, "Error");
                assert!(trace.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
