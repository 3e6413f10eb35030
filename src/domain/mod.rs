use thiserror::Error;
use validator::ValidationErrors;

pub mod aggregation;
pub mod assignment;
pub mod category;
pub mod todo;

#[cfg(test)]
pub(crate) mod test_util;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input was invalid: {0}")]
    Invalid(ValidationErrors),
    #[error("{0} does not exist")]
    DoesNotExist(String),
    #[error("failed to {action} due to a communication failure: {cause}")]
    RetrieveFailure {
        action: String,
        #[source]
        cause: anyhow::Error,
    },
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Invalid(value)
    }
}


/// Converts driven port failures into domain errors tagged with the [action] being
/// attempted, so callers can tell roughly where a request broke down
pub(crate) trait PortResultExt<T> {
    fn trying_to(self, action: &str) -> Result<T, Error>;
}

impl<T> PortResultExt<T> for Result<T, anyhow::Error> {
    fn trying_to(self, action: &str) -> Result<T, Error> {
        self.map_err(|cause| Error::RetrieveFailure {
            action: action.into(),
            cause,
        })
    }
}

/// Outcome of a set-membership write against a link relation (todo to actor, todo to category)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    Added,
    Removed,
    /// The link set already looked the way the write asked for
    Unchanged,
}
