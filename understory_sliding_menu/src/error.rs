// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the sliding menu components.

use alloc::string::String;

use crate::animator::AnimatorCapabilities;

/// Broad classification of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a value the operation cannot accept.
    InvalidArgument,
    /// Content the host was asked to load does not exist.
    ResourceNotFound,
    /// The operation is not valid in the current state.
    InvalidState,
}

/// Errors reported by the sliding menu.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A maximum slide distance was not a finite number greater than zero.
    #[error("max distance must be a finite number greater than zero, got {0}")]
    InvalidMaxDistance(f64),
    /// A page operation was given an empty page identifier.
    #[error("cannot set an undefined page")]
    MissingPage,
    /// An animator was registered under an empty key.
    #[error("animator key must not be empty")]
    EmptyAnimatorKey,
    /// An animator does not provide every capability a sliding menu drives.
    #[error("animator `{key}` is missing required capabilities {missing:?}")]
    NonConformingAnimator {
        /// Key the animator was registered under.
        key: String,
        /// Capabilities the animator lacks.
        missing: AnimatorCapabilities,
    },
    /// A configuration attribute could not be parsed.
    #[error("invalid value {value:?} for attribute `{attribute}`")]
    InvalidAttribute {
        /// Attribute name.
        attribute: &'static str,
        /// Raw attribute value.
        value: String,
    },
    /// The host could not find the requested page.
    #[error("page is not found: {0}")]
    PageNotFound(String),
    /// [`DoorLock::lock`](crate::lock::DoorLock::lock) was called while already locked.
    #[error("door lock is already held")]
    AlreadyLocked,
}

impl Error {
    /// Returns the broad classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMaxDistance(_)
            | Self::MissingPage
            | Self::EmptyAnimatorKey
            | Self::NonConformingAnimator { .. }
            | Self::InvalidAttribute { .. } => ErrorKind::InvalidArgument,
            Self::PageNotFound(_) => ErrorKind::ResourceNotFound,
            Self::AlreadyLocked => ErrorKind::InvalidState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(Error::InvalidMaxDistance(0.0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::MissingPage.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::PageNotFound("menu.html".into()).kind(),
            ErrorKind::ResourceNotFound
        );
        assert_eq!(Error::AlreadyLocked.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = Error::InvalidAttribute {
            attribute: "max-slide-distance",
            value: "wide".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"wide\" for attribute `max-slide-distance`"
        );
        assert_eq!(
            Error::PageNotFound("main.html".into()).to_string(),
            "page is not found: main.html"
        );
    }
}
