//! View-model lifecycle hooks.
//!
//! A view-model opts into navigation callbacks by implementing
//! [`NavigationAware`] and being returned as
//! [`ResolvedView::view_model`](crate::ResolvedView). The capability is fixed
//! when the view is resolved; the service never inspects types afterwards.
//!
//! # Call order
//!
//! For a navigation from view-model `A` to view-model `B`:
//!
//! 1. `B.confirm_navigation_to`: may suspend, may reject
//! 2. `A.on_navigated_from`
//! 3. the host shows `B`'s view
//! 4. `B.on_navigated_to`
//!
//! Steps 2-4 run only if step 1 accepted and the navigation was not
//! superseded while suspended. `on_navigated_from` cannot stop navigation.

use crate::context::{NavigationContext, NavigationMode};
use async_trait::async_trait;

/// Answer of [`NavigationAware::confirm_navigation_to`].
///
/// # Example
///
/// ```
/// use region_navigator::Activation;
///
/// assert!(Activation::accept().is_accept());
/// let rejected = Activation::reject("record locked");
/// assert_eq!(rejected.reason(), Some("record locked"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Allow the view to become active.
    Accept,

    /// Refuse activation.
    Reject {
        /// Human-readable reason, carried into the failure event.
        reason: String,
    },
}

impl Activation {
    pub fn accept() -> Self {
        Self::Accept
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Reject { reason } => Some(reason),
            Self::Accept => None,
        }
    }
}

/// Optional capability of a view-model that wants navigation callbacks.
///
/// All methods have no-op defaults. `confirm_navigation_to` is asynchronous
/// so a view-model can load data before agreeing to be shown; the other two
/// run synchronously inside the service's commit.
///
/// # Example
///
/// ```
/// use region_navigator::{Activation, NavigationAware, NavigationContext, NavigationMode};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct CustomerDetails {
///     customer_id: Mutex<Option<u64>>,
/// }
///
/// #[async_trait::async_trait]
/// impl NavigationAware for CustomerDetails {
///     async fn confirm_navigation_to(
///         &self,
///         context: &NavigationContext,
///         _mode: NavigationMode,
///     ) -> Activation {
///         match context.parameters().get_as::<u64>("id") {
///             Some(_) => Activation::accept(),
///             None => Activation::reject("missing customer id"),
///         }
///     }
///
///     fn on_navigated_to(&self, context: &NavigationContext, _mode: NavigationMode) {
///         *self.customer_id.lock().unwrap() = context.parameters().get_as("id");
///     }
/// }
/// ```
#[async_trait]
pub trait NavigationAware: Send + Sync + 'static {
    /// Called before the view becomes active. Returning
    /// [`Activation::Reject`] fails the navigation with
    /// [`ResolveError::Rejected`](crate::ResolveError::Rejected).
    async fn confirm_navigation_to(
        &self,
        _context: &NavigationContext,
        _mode: NavigationMode,
    ) -> Activation {
        Activation::Accept
    }

    /// Called on the outgoing view-model with the *incoming* context.
    fn on_navigated_from(&self, _context: &NavigationContext, _mode: NavigationMode) {}

    /// Called on the incoming view-model after its view is shown.
    fn on_navigated_to(&self, _context: &NavigationContext, _mode: NavigationMode) {}
}
