// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_core::{ExitCode, MachineError};
use hanzi_explorer_ingest::IngestError;
use hanzi_explorer_model::FieldError;
use hanzi_explorer_store::{MutationError, StoreError};

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn new(exit_code: ExitCode, machine: MachineError) -> Self {
        Self { exit_code, machine }
    }

    pub(crate) fn usage(message: &str) -> Self {
        Self::new(ExitCode::Usage, MachineError::new("usage_error", message))
    }

    pub(crate) fn internal(message: String) -> Self {
        Self::new(
            ExitCode::Internal,
            MachineError::new("internal_error", &message),
        )
    }

    fn fields(exit_code: ExitCode, code: &str, message: &str, fields: &[FieldError]) -> Self {
        let machine = fields.iter().fold(MachineError::new(code, message), |m, f| {
            m.with_detail(&f.field, &f.reason)
        });
        Self::new(exit_code, machine)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        let machine = MachineError::new("store_error", &value.message)
            .with_detail("store_code", value.code.as_str());
        Self::new(ExitCode::DependencyFailure, machine)
    }
}

impl From<MutationError> for CliError {
    fn from(value: MutationError) -> Self {
        match value {
            MutationError::NotFound { entity, key } => Self::new(
                ExitCode::Validation,
                MachineError::new("not_found", &format!("{entity} not found"))
                    .with_detail("key", &key),
            ),
            MutationError::DuplicateKey { fields } => {
                Self::fields(ExitCode::Validation, "duplicate_key", "duplicate key", &fields)
            }
            MutationError::Validation { fields } => Self::fields(
                ExitCode::Validation,
                "validation_error",
                "validation failed",
                &fields,
            ),
            MutationError::Store(err) => err.into(),
        }
    }
}

impl From<IngestError> for CliError {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::Malformed(reason) => Self::new(
                ExitCode::Validation,
                MachineError::new("malformed_import", &reason),
            ),
            IngestError::DuplicateKey { glyphs } => Self::new(
                ExitCode::Validation,
                MachineError::new("duplicate_key", "characters already exist")
                    .with_detail("glyphs", &glyphs.join(",")),
            ),
            IngestError::Io(reason) => Self::new(
                ExitCode::DependencyFailure,
                MachineError::new("io_error", &reason),
            ),
            IngestError::Store(err) => err.into(),
        }
    }
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
        for (key, value) in &error.machine.details {
            eprintln!("  {key}: {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_collisions_are_validation_failures() {
        let err = CliError::from(IngestError::DuplicateKey {
            glyphs: vec!["一".to_string(), "二".to_string()],
        });
        assert_eq!(err.exit_code, ExitCode::Validation);
        assert_eq!(err.machine.code, "duplicate_key");
        assert_eq!(err.machine.details.get("glyphs").map(String::as_str), Some("一,二"));
    }

    #[test]
    fn store_failures_are_dependency_failures() {
        let err = CliError::from(MutationError::Store(StoreError::backend("disk full")));
        assert_eq!(err.exit_code, ExitCode::DependencyFailure);
        assert_eq!(err.machine.code, "store_error");
    }

    #[test]
    fn field_errors_become_details() {
        let err = CliError::from(MutationError::Validation {
            fields: vec![FieldError::new("email", "must contain '@'")],
        });
        assert_eq!(err.exit_code, ExitCode::Validation);
        assert!(err.machine.details.contains_key("email"));
    }
}
