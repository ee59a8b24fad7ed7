use thiserror::Error;

/// Matching engine error types
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_line() {
        let err = AuthError::ParseErrorAtLine {
            line: 7,
            message: "Invalid rule format: bogus".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("line 7"), "got: {}", display);
        assert!(display.contains("bogus"), "got: {}", display);
    }

    #[test]
    fn test_invalid_mask_display_includes_mask() {
        let err = AuthError::InvalidMask("@".into());
        let display = format!("{}", err);
        assert!(display.contains('@'), "got: {}", display);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AuthError = io.into();
        assert!(matches!(err, AuthError::IoError(_)));
    }
}
