//! Errors raised while querying interfaces or writing the report.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Socket or output writer failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An NLMSG_ERROR reply with a non-zero code. `errno` is positive.
    #[error("{}{message} (errno {errno})", prefix(.context))]
    Kernel {
        errno: i32,
        message: String,
        /// What was being asked for when the kernel refused.
        context: Option<String>,
    },

    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// The kernel answered without a link record.
    #[error("interface not found: {name}")]
    InterfaceNotFound { name: String },
}

fn prefix(context: &Option<String>) -> String {
    context.as_deref().map(|c| format!("{c}: ")).unwrap_or_default()
}

impl Error {
    /// Build from the negative code carried in an NLMSG_ERROR payload.
    pub fn from_errno(code: i32) -> Self {
        let errno = code.saturating_abs();
        Self::Kernel {
            errno,
            message: io::Error::from_raw_os_error(errno).to_string(),
            context: None,
        }
    }

    /// Attach what was being queried. Only kernel errors take context.
    pub fn with_context(self, what: impl Into<String>) -> Self {
        match self {
            Self::Kernel { errno, message, .. } => Self::Kernel {
                errno,
                message,
                context: Some(what.into()),
            },
            other => other,
        }
    }

    /// ENOENT/ENODEV replies, or a reply with no link record at all.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } => *errno == libc::ENOENT || *errno == libc::ENODEV,
            Self::InterfaceNotFound { .. } => true,
            _ => false,
        }
    }

    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}
