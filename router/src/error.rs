use core::fmt;

use std::error;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Route path is empty or does not start with `/`.
    MissingLeadingSlash,
    /// Parameters must be registered with a name.
    UnnamedParam,
    /// Catch-all segment is not exactly `*` or is not the last segment of the route.
    InvalidCatchAll,
    /// A parameter with a different name is already registered at the same position.
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLeadingSlash => f.write_str("route must start with '/'"),
            Self::UnnamedParam => f.write_str("parameters must be registered with a name"),
            Self::InvalidCatchAll => f.write_str("catch-all segment must be a single '*' at the end of a route"),
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion failed due to conflict with previously registered route: {with}",
                )
            }
        }
    }
}

impl error::Error for InsertError {}

/// Errors collected while merging one router into another.
///
/// Registrations that failed are skipped and every other registration is kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeError(pub(crate) Vec<InsertError>);

impl MergeError {
    /// Returns a list of [`InsertError`] for every insertion that failed during the merge.
    pub fn into_errors(self) -> Vec<InsertError> {
        self.0
    }
}

impl core::ops::Deref for MergeError {
    type Target = Vec<InsertError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in self.0.iter() {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

impl error::Error for MergeError {}
