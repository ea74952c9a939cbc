use thiserror::Error;

/// Main error type for the gate sheet crate.
/// Aggregates errors from the spreadsheet adapter and the record builder.
#[derive(Error, Debug)]
pub enum GateSheetError {
    #[error("{0}")]
    WithContextError(String),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),

    // Gate module errors
    #[error("{0}")]
    GateError(#[from] crate::gate::GateError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, GateSheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| GateSheetError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateError;

    #[test]
    fn with_prefix_wraps_message() {
        let result: Result<(), GateSheetError> = Err(GateError::NotLoaded.into());
        let error = result.with_prefix("summary").unwrap_err();
        assert_eq!(
            error.to_string(),
            "summary: No gate records loaded, run a successful build first"
        );
    }

    #[test]
    fn with_prefix_keeps_ok() {
        let result: Result<u8, GateSheetError> = Ok(7);
        assert_eq!(result.with_prefix("unused").unwrap(), 7);
    }
}
