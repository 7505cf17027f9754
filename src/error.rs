use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Missing configuration: environment variable {0} is not set")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ImportError {
    /// Errors that stop the run before any row is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::MissingConfig(_)
                | ImportError::InvalidConfig(_)
                | ImportError::Spreadsheet(_)
                | ImportError::Io(_)
        )
    }
}

pub type ImportResult<T> = Result<T, ImportError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> ImportResult<T>;
    fn with_context<F>(self, f: F) -> ImportResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> ImportResult<T> {
        self.map_err(|e| ImportError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ImportResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ImportError::Unknown(format!("{}: {}", f(), e)))
    }
}

#[macro_export]
macro_rules! import_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::ImportError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::ImportError::$error_type(format!($fmt, $($arg)*))
    };
}
