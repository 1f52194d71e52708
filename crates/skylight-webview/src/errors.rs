#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("toolkit initialization failed: {0}")]
    Init(String),

    #[error("script execution failed: {0}")]
    Script(String),

    #[error("toolkit error: {0}")]
    Toolkit(String),
}

impl From<wry::Error> for ShellError {
    fn from(e: wry::Error) -> Self {
        ShellError::Toolkit(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_display() {
        let err = ShellError::Init("engine unavailable".into());
        assert_eq!(
            err.to_string(),
            "toolkit initialization failed: engine unavailable"
        );
    }

    #[test]
    fn script_error_display() {
        let err = ShellError::Script("ReferenceError: x is not defined".into());
        assert_eq!(
            err.to_string(),
            "script execution failed: ReferenceError: x is not defined"
        );
    }

    #[test]
    fn toolkit_error_display() {
        let err = ShellError::Toolkit("surface gone".into());
        assert_eq!(err.to_string(), "toolkit error: surface gone");
    }
}
