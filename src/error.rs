//! Error handling for the navigator.
//!
//! Errors fall into three groups:
//!
//! - **Argument errors** ([`NavigationError::MissingArgument`],
//!   [`NavigationError::InvalidAddress`]): the caller passed something
//!   unusable. Returned as `Err` before any work starts.
//! - **Resolution errors** ([`ResolveError`]): no view matched or the
//!   target refused activation. Reported through
//!   [`NavigationResult::Failed`] and the `navigation_failed` channel, never
//!   as `Err`.
//! - **History-bounds errors** ([`NavigationError::NoHistory`]): `go_back` or
//!   `go_forward` with nothing to go to. Returned as `Err`; nothing changes.
//!
//! # Examples
//!
//! ```
//! use region_navigator::{HistoryDirection, NavigationError, ResolveError};
//!
//! let err = NavigationError::NoHistory { direction: HistoryDirection::Back };
//! assert_eq!(err.to_string(), "no back history");
//!
//! let err = ResolveError::NotFound { address: "app://bogus".into() };
//! assert_eq!(err.to_string(), "no view registered for 'app://bogus'");
//! ```

use crate::address::AddressError;
use crate::context::{NavigationContext, NavigationMode};
use std::fmt;
use thiserror::Error;

/// Direction of a journal replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryDirection {
    Back,
    Forward,
}

impl HistoryDirection {
    /// The navigation mode a replay in this direction runs under.
    pub const fn mode(self) -> NavigationMode {
        match self {
            Self::Back => NavigationMode::Back,
            Self::Forward => NavigationMode::Forward,
        }
    }
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Back => f.write_str("back"),
            Self::Forward => f.write_str("forward"),
        }
    }
}

/// Why an address could not be turned into an active view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing is registered for the address.
    #[error("no view registered for '{address}'")]
    NotFound { address: String },

    /// The target view-model refused activation.
    #[error("navigation to '{address}' rejected: {reason}")]
    Rejected { address: String, reason: String },

    /// The view could not be constructed.
    #[error("failed to create view for '{address}': {message}")]
    Failed { address: String, message: String },
}

/// Errors returned synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A required input was absent.
    #[error("missing required argument '{name}'")]
    MissingArgument { name: &'static str },

    /// The address text could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(AddressError),

    /// No journal entry exists in the requested direction.
    #[error("no {direction} history")]
    NoHistory { direction: HistoryDirection },
}

impl From<AddressError> for NavigationError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::Empty => Self::MissingArgument { name: "address" },
            other => Self::InvalidAddress(other),
        }
    }
}

/// Outcome of a navigation that got past argument checks.
#[derive(Debug, Clone)]
pub enum NavigationResult {
    /// The view is shown and the journal advanced.
    Success {
        context: NavigationContext,
        mode: NavigationMode,
    },
    /// Resolution failed; nothing changed.
    Failed {
        context: NavigationContext,
        mode: NavigationMode,
        error: ResolveError,
    },
    /// The navigation was superseded or its token cancelled; nothing changed.
    Cancelled {
        context: NavigationContext,
        mode: NavigationMode,
    },
}

impl NavigationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The request this outcome belongs to.
    pub fn context(&self) -> &NavigationContext {
        match self {
            Self::Success { context, .. }
            | Self::Failed { context, .. }
            | Self::Cancelled { context, .. } => context,
        }
    }

    pub fn mode(&self) -> NavigationMode {
        match self {
            Self::Success { mode, .. } | Self::Failed { mode, .. } | Self::Cancelled { mode, .. } => {
                *mode
            }
        }
    }

    /// The resolution error, if navigation failed.
    pub fn error(&self) -> Option<&ResolveError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Convert into a `Result`, treating failure and cancellation as errors.
    ///
    /// Cancellation maps to `None` in the error slot.
    pub fn into_result(self) -> Result<NavigationContext, Option<ResolveError>> {
        match self {
            Self::Success { context, .. } => Ok(context),
            Self::Failed { error, .. } => Err(Some(error)),
            Self::Cancelled { .. } => Err(None),
        }
    }
}
