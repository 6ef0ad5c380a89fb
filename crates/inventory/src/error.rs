use std::path::{Path, PathBuf};

use thiserror::Error;

use stockledger_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Inventory store operation error.
///
/// Storage failures (I/O, unreadable file) sit next to the domain outcomes an
/// operation can report (not found, bad stored value, not enough stock), so a
/// caller matches on one type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a valid inventory document.
    #[error("inventory file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The domain outcome behind this error, if it is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_domain().is_some_and(DomainError::is_not_found)
    }
}
