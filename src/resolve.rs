//! Address-to-view resolution.
//!
//! The service asks a [`ViewResolver`] for the view behind every
//! [`NavigationContext`]. Resolution is asynchronous: a resolver may load
//! data or construct heavy views before answering, and the service does not
//! touch its journal until the answer arrives.
//!
//! [`ViewRegistry`](crate::ViewRegistry) is the ready-made implementation.
//! For one-off cases use [`resolver_fn`].

use crate::context::NavigationContext;
use crate::error::ResolveError;
use crate::view::ResolvedView;
use async_trait::async_trait;
use std::sync::Arc;

/// Maps a navigation request to a view.
#[async_trait]
pub trait ViewResolver: Send + Sync + 'static {
    /// Produce the view for `context`, or explain why there is none.
    async fn resolve(&self, context: &NavigationContext) -> Result<ResolvedView, ResolveError>;
}

#[async_trait]
impl<T: ViewResolver + ?Sized> ViewResolver for Arc<T> {
    async fn resolve(&self, context: &NavigationContext) -> Result<ResolvedView, ResolveError> {
        (**self).resolve(context).await
    }
}

/// Create a synchronous resolver from a closure.
///
/// # Example
///
/// ```
/// use region_navigator::{resolver_fn, ResolveError};
///
/// let resolver = resolver_fn(|context| {
///     Err(ResolveError::NotFound {
///         address: context.address().to_string(),
///     })
/// });
/// ```
pub const fn resolver_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&NavigationContext) -> Result<ResolvedView, ResolveError> + Send + Sync + 'static,
{
    FnResolver { f }
}

/// Resolver created by [`resolver_fn`].
pub struct FnResolver<F> {
    f: F,
}

#[async_trait]
impl<F> ViewResolver for FnResolver<F>
where
    F: Fn(&NavigationContext) -> Result<ResolvedView, ResolveError> + Send + Sync + 'static,
{
    async fn resolve(&self, context: &NavigationContext) -> Result<ResolvedView, ResolveError> {
        (self.f)(context)
    }
}

impl<F> std::fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}
