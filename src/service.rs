//! The per-region navigation service.
//!
//! [`NavigationService`] ties the pieces together: it resolves an address
//! through its [`ViewResolver`], asks the incoming view-model to confirm,
//! shows the view through its [`ViewHost`], records the request in its
//! [`Journal`] and publishes events.
//!
//! # Pipeline
//!
//! 1. Argument check (`navigate_str` only): fails before anything else runs
//! 2. Resolve the view (async)
//! 3. `confirm_navigation_to` on the incoming view-model (async)
//! 4. Commit, atomically with respect to other commits and `clear()`:
//!    - `on_navigated_from` on the outgoing view-model
//!    - host shows the new view
//!    - `on_navigated_to` on the incoming view-model
//!    - journal update
//!    - `active_view_changed`, then `navigated`
//!
//! A failure in step 2 or 3 fires `navigation_failed` and changes nothing.
//!
//! # Supersession
//!
//! Every navigation takes a fresh id. Starting another navigation, or
//! calling [`clear`](NavigationService::clear), makes older ids stale; a
//! stale navigation, or one whose [`CancellationToken`] fired, ends as
//! [`NavigationResult::Cancelled`] without touching any state or firing any
//! event.
//!
//! # Example
//!
//! ```
//! use region_navigator::{ContentSlot, NavigationService, ResolvedView, View, ViewRegistry};
//! use std::any::Any;
//!
//! struct Page;
//!
//! impl View for Page {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = ViewRegistry::new();
//! registry
//!     .register_view("app", "customers", |_| ResolvedView::new(Page))
//!     .register_view("app", "customers/:id", |_| ResolvedView::new(Page));
//!
//! let service = NavigationService::new(registry, ContentSlot::new());
//! pollster::block_on(async {
//!     service.navigate_str("app://customers").await.unwrap();
//!     service.navigate_str("app://customers/123").await.unwrap();
//!     service.go_back().await.unwrap();
//! });
//!
//! assert_eq!(service.current_address().unwrap().as_str(), "app://customers");
//! assert!(service.can_go_forward());
//! ```

use crate::address::Address;
use crate::config::NavigatorConfig;
use crate::context::{NavigationContext, NavigationMode, ServiceHandle};
use crate::error::{HistoryDirection, NavigationError, NavigationResult, ResolveError};
use crate::events::{ActiveViewChanged, EventChannel, Navigated, NavigationFailed, SubscriptionId};
use crate::journal::{Journal, NavigatorState};
use crate::lifecycle::{Activation, NavigationAware};
use crate::resolve::ViewResolver;
use crate::view::{ResolvedView, ViewHandle, ViewHost};
use crate::{debug_log, info_log, trace_log, warn_log};
use futures::future::{self, Either};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What the service knows about the displayed view.
///
/// The view itself is only referenced weakly; its view-model is called only
/// while the view is alive.
#[derive(Clone)]
struct ActiveView {
    handle: ViewHandle,
    view_model: Option<Arc<dyn NavigationAware>>,
}

struct RegionState {
    journal: Journal,
    active: Option<ActiveView>,
    /// Bumped whenever `active` changes.
    active_generation: u64,
}

pub(crate) struct ServiceInner {
    region: Arc<str>,
    resolver: Arc<dyn ViewResolver>,
    host: Arc<dyn ViewHost>,
    /// Journal and active view. Re-entrant so callbacks and subscribers
    /// running inside a commit can still read the service.
    state: ReentrantMutex<RefCell<RegionState>>,
    /// Navigation id counter; a navigation whose id is no longer current is stale.
    navigation_id: AtomicU64,
    active_view_changed: EventChannel<ActiveViewChanged>,
    navigated: EventChannel<Navigated>,
    navigation_failed: EventChannel<NavigationFailed>,
}

/// Navigation service for one region.
///
/// Cloning is cheap; clones drive the same region.
#[derive(Clone)]
pub struct NavigationService {
    inner: Arc<ServiceInner>,
}

impl NavigationService {
    /// Create a service for the default region with default settings.
    pub fn new<R, H>(resolver: R, host: H) -> Self
    where
        R: ViewResolver,
        H: ViewHost,
    {
        Self::with_config(NavigatorConfig::default(), resolver, host)
    }

    /// Create a service with explicit settings.
    pub fn with_config<R, H>(config: NavigatorConfig, resolver: R, host: H) -> Self
    where
        R: ViewResolver,
        H: ViewHost,
    {
        info_log!(
            "Creating navigation service for region '{}' (journal capacity {})",
            config.region_name(),
            config.capacity()
        );
        Self {
            inner: Arc::new(ServiceInner {
                region: Arc::from(config.region_name()),
                resolver: Arc::new(resolver),
                host: Arc::new(host),
                state: ReentrantMutex::new(RefCell::new(RegionState {
                    journal: Journal::with_capacity(config.capacity()),
                    active: None,
                    active_generation: 0,
                })),
                navigation_id: AtomicU64::new(0),
                active_view_changed: EventChannel::new(),
                navigated: EventChannel::new(),
                navigation_failed: EventChannel::new(),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<ServiceInner>) -> Self {
        Self { inner }
    }

    /// Non-owning handle to this service, as carried by every context.
    pub fn handle(&self) -> ServiceHandle {
        ServiceHandle::new(Arc::clone(&self.inner.region), Arc::downgrade(&self.inner))
    }

    pub fn region(&self) -> &str {
        &self.inner.region
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `address`.
    ///
    /// Resolution failures are reported as [`NavigationResult::Failed`] and
    /// on the `navigation_failed` channel.
    pub async fn navigate(&self, address: Address) -> NavigationResult {
        self.navigate_inner(address, None).await
    }

    /// Parse `target` and navigate to it.
    ///
    /// A blank target fails with [`NavigationError::MissingArgument`] and an
    /// unparsable one with [`NavigationError::InvalidAddress`], both before
    /// the first suspension point and without firing any event.
    pub async fn navigate_str(&self, target: &str) -> Result<NavigationResult, NavigationError> {
        let address = Address::parse(target).map_err(NavigationError::from)?;
        Ok(self.navigate_inner(address, None).await)
    }

    /// Navigate to `address`, abandoning the attempt once `token` is cancelled.
    pub async fn navigate_with_token(
        &self,
        address: Address,
        token: CancellationToken,
    ) -> NavigationResult {
        self.navigate_inner(address, Some(&token)).await
    }

    /// Replay the previous journal entry.
    ///
    /// Returns [`NavigationError::NoHistory`] when there is none.
    pub async fn go_back(&self) -> Result<NavigationResult, NavigationError> {
        self.replay(HistoryDirection::Back, None).await
    }

    /// Replay the next journal entry.
    ///
    /// Returns [`NavigationError::NoHistory`] when there is none.
    pub async fn go_forward(&self) -> Result<NavigationResult, NavigationError> {
        self.replay(HistoryDirection::Forward, None).await
    }

    /// [`go_back`](Self::go_back) with a cancellation token.
    pub async fn go_back_with_token(
        &self,
        token: CancellationToken,
    ) -> Result<NavigationResult, NavigationError> {
        self.replay(HistoryDirection::Back, Some(&token)).await
    }

    /// [`go_forward`](Self::go_forward) with a cancellation token.
    pub async fn go_forward_with_token(
        &self,
        token: CancellationToken,
    ) -> Result<NavigationResult, NavigationError> {
        self.replay(HistoryDirection::Forward, Some(&token)).await
    }

    /// Empty the journal. The displayed view stays; pending navigations
    /// become stale. Calling it again has no further effect.
    pub fn clear(&self) {
        let guard = self.inner.state.lock();
        let stale = self.start_navigation();
        let mut state = guard.borrow_mut();
        let dropped = state.journal.len();
        state.journal.clear();
        debug_log!(
            "Region '{}' journal cleared ({} entries dropped, navigations before #{} stale)",
            self.inner.region,
            dropped,
            stale
        );
    }

    async fn navigate_inner(
        &self,
        address: Address,
        token: Option<&CancellationToken>,
    ) -> NavigationResult {
        let (nav_id, context) = {
            let _guard = self.inner.state.lock();
            (self.start_navigation(), NavigationContext::new(self.handle(), address))
        };
        self.run_pipeline(nav_id, context, NavigationMode::New, token)
            .await
    }

    async fn replay(
        &self,
        direction: HistoryDirection,
        token: Option<&CancellationToken>,
    ) -> Result<NavigationResult, NavigationError> {
        let (nav_id, context) = {
            let guard = self.inner.state.lock();
            let state = guard.borrow();
            let target = match direction {
                HistoryDirection::Back => state.journal.peek_back(),
                HistoryDirection::Forward => state.journal.peek_forward(),
            };
            let Some(context) = target.cloned() else {
                debug_log!("Region '{}' has no {} history", self.inner.region, direction);
                return Err(NavigationError::NoHistory { direction });
            };
            (self.start_navigation(), context)
        };
        Ok(self
            .run_pipeline(nav_id, context, direction.mode(), token)
            .await)
    }

    /// Steps 2-4 of the pipeline.
    async fn run_pipeline(
        &self,
        nav_id: u64,
        context: NavigationContext,
        mode: NavigationMode,
        token: Option<&CancellationToken>,
    ) -> NavigationResult {
        info_log!(
            "Navigation #{} ({}) in region '{}' to '{}'",
            nav_id,
            mode,
            self.inner.region,
            context.address()
        );

        let resolution = until_cancelled(token, self.inner.resolver.resolve(&context)).await;
        let resolved = match resolution {
            None => return self.cancelled(nav_id, context, mode),
            Some(Ok(resolved)) => resolved,
            Some(Err(error)) => return self.fail(nav_id, context, mode, error, token),
        };
        trace_log!("Navigation #{} resolved {:?}", nav_id, resolved);

        if let Some(view_model) = &resolved.view_model {
            let confirmation =
                until_cancelled(token, view_model.confirm_navigation_to(&context, mode)).await;
            match confirmation {
                None => return self.cancelled(nav_id, context, mode),
                Some(Activation::Accept) => {}
                Some(Activation::Reject { reason }) => {
                    let error = ResolveError::Rejected {
                        address: context.address().to_string(),
                        reason,
                    };
                    return self.fail(nav_id, context, mode, error, token);
                }
            }
        }

        self.commit(nav_id, context, mode, resolved, token)
    }

    fn commit(
        &self,
        nav_id: u64,
        context: NavigationContext,
        mode: NavigationMode,
        resolved: ResolvedView,
        token: Option<&CancellationToken>,
    ) -> NavigationResult {
        let guard = self.inner.state.lock();
        if self.is_stale(nav_id, token) {
            return self.cancelled(nav_id, context, mode);
        }
        if !Self::replay_target_present(&guard.borrow().journal, &context, mode) {
            let error = Self::missing_entry(&context);
            return self.fail(nav_id, context, mode, error, token);
        }

        let (previous, generation) = {
            let state = guard.borrow();
            (state.active.clone(), state.active_generation)
        };
        let outgoing = previous
            .as_ref()
            .filter(|active| active.handle.is_alive())
            .and_then(|active| active.view_model.clone());

        // No RefCell borrow is held while user code runs; each callback may
        // clear the journal or start another navigation.
        if let Some(view_model) = &outgoing {
            view_model.on_navigated_from(&context, mode);
            if self.is_stale(nav_id, token) {
                return self.cancelled(nav_id, context, mode);
            }
        }

        let incoming = ActiveView {
            handle: ViewHandle::new(&resolved.view),
            view_model: resolved.view_model.clone(),
        };
        self.inner.host.show(Arc::clone(&resolved.view));
        if let Some(view_model) = &resolved.view_model {
            view_model.on_navigated_to(&context, mode);
        }

        let mut state = guard.borrow_mut();
        if state.active_generation != generation {
            // A navigation started from a callback already committed its own view.
            drop(state);
            return self.cancelled(nav_id, context, mode);
        }

        let stale = self.is_stale(nav_id, token);
        let recorded = !stale
            && match mode {
                NavigationMode::New => {
                    state.journal.record(context.clone());
                    true
                }
                NavigationMode::Back => state.journal.move_back().is_some(),
                NavigationMode::Forward => state.journal.move_forward().is_some(),
            };

        // The host shows the new view whether or not the journal moved.
        state.active = Some(incoming.clone());
        state.active_generation += 1;
        drop(state);

        self.inner.active_view_changed.emit(&ActiveViewChanged {
            old: previous.map(|active| active.handle),
            new: incoming.handle,
        });

        if stale {
            return self.cancelled(nav_id, context, mode);
        }
        if !recorded {
            let error = Self::missing_entry(&context);
            return self.fail(nav_id, context, mode, error, token);
        }

        self.inner.navigated.emit(&Navigated {
            context: context.clone(),
            mode,
        });

        info_log!(
            "Navigation #{} complete: region '{}' now at '{}'",
            nav_id,
            self.inner.region,
            context.address()
        );
        drop(guard);
        NavigationResult::Success { context, mode }
    }

    /// For a replay, whether the adjacent journal entry is still `context`.
    fn replay_target_present(
        journal: &Journal,
        context: &NavigationContext,
        mode: NavigationMode,
    ) -> bool {
        let target = match mode {
            NavigationMode::New => return true,
            NavigationMode::Back => journal.peek_back(),
            NavigationMode::Forward => journal.peek_forward(),
        };
        target.is_some_and(|entry| entry.ptr_eq(context))
    }

    fn missing_entry(context: &NavigationContext) -> ResolveError {
        ResolveError::Failed {
            address: context.address().to_string(),
            message: "history entry is no longer in the journal".to_string(),
        }
    }

    fn fail(
        &self,
        nav_id: u64,
        context: NavigationContext,
        mode: NavigationMode,
        error: ResolveError,
        token: Option<&CancellationToken>,
    ) -> NavigationResult {
        let _guard = self.inner.state.lock();
        if self.is_stale(nav_id, token) {
            return self.cancelled(nav_id, context, mode);
        }

        warn_log!("Navigation #{} to '{}' failed: {}", nav_id, context.address(), error);
        self.inner.navigation_failed.emit(&NavigationFailed {
            context: context.clone(),
            mode,
            error: error.clone(),
        });
        NavigationResult::Failed {
            context,
            mode,
            error,
        }
    }

    fn cancelled(
        &self,
        nav_id: u64,
        context: NavigationContext,
        mode: NavigationMode,
    ) -> NavigationResult {
        debug_log!(
            "Navigation #{} to '{}' discarded (superseded or cancelled)",
            nav_id,
            context.address()
        );
        NavigationResult::Cancelled { context, mode }
    }

    /// Start a new navigation and return its id, making older ones stale.
    fn start_navigation(&self) -> u64 {
        self.inner.navigation_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, nav_id: u64, token: Option<&CancellationToken>) -> bool {
        self.inner.navigation_id.load(Ordering::SeqCst) != nav_id
            || token.is_some_and(CancellationToken::is_cancelled)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn can_go_back(&self) -> bool {
        self.with_state(|state| state.journal.can_go_back())
    }

    pub fn can_go_forward(&self) -> bool {
        self.with_state(|state| state.journal.can_go_forward())
    }

    pub fn state(&self) -> NavigatorState {
        self.with_state(|state| state.journal.state())
    }

    /// The context of the current journal entry.
    pub fn current_context(&self) -> Option<NavigationContext> {
        self.with_state(|state| state.journal.current().cloned())
    }

    pub fn current_address(&self) -> Option<Address> {
        self.current_context().map(|context| context.address().clone())
    }

    /// Handle to the displayed view. Survives `clear()`.
    pub fn active_view(&self) -> Option<ViewHandle> {
        self.with_state(|state| state.active.as_ref().map(|active| active.handle.clone()))
    }

    /// Back history, oldest first.
    pub fn back_history(&self) -> Vec<NavigationContext> {
        self.with_state(|state| state.journal.back_entries().to_vec())
    }

    /// Forward history, nearest first.
    pub fn forward_history(&self) -> Vec<NavigationContext> {
        self.with_state(|state| state.journal.forward_entries().to_vec())
    }

    /// Number of journal entries, current one included.
    pub fn journal_len(&self) -> usize {
        self.with_state(|state| state.journal.len())
    }

    fn with_state<T>(&self, f: impl FnOnce(&RegionState) -> T) -> T {
        let guard = self.inner.state.lock();
        let state = guard.borrow();
        f(&state)
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn active_view_changed(&self) -> &EventChannel<ActiveViewChanged> {
        &self.inner.active_view_changed
    }

    pub fn navigated(&self) -> &EventChannel<Navigated> {
        &self.inner.navigated
    }

    pub fn navigation_failed(&self) -> &EventChannel<NavigationFailed> {
        &self.inner.navigation_failed
    }

    /// Subscribe to view changes.
    pub fn on_active_view_changed<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&ActiveViewChanged) + Send + Sync + 'static,
    {
        self.inner.active_view_changed.subscribe(f)
    }

    /// Subscribe to completed navigations.
    pub fn on_navigated<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Navigated) + Send + Sync + 'static,
    {
        self.inner.navigated.subscribe(f)
    }

    /// Subscribe to failed navigations.
    pub fn on_navigation_failed<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&NavigationFailed) + Send + Sync + 'static,
    {
        self.inner.navigation_failed.subscribe(f)
    }
}

impl fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationService")
            .field("region", &self.inner.region)
            .field("state", &self.state())
            .field("current", &self.current_address())
            .field("journal_len", &self.journal_len())
            .finish_non_exhaustive()
    }
}

/// Drive `fut` to completion unless `token` fires first.
async fn until_cancelled<F: Future>(token: Option<&CancellationToken>, fut: F) -> Option<F::Output> {
    let Some(token) = token else {
        return Some(fut.await);
    };
    if token.is_cancelled() {
        return None;
    }

    let cancelled = token.cancelled();
    futures::pin_mut!(fut, cancelled);
    match future::select(fut, cancelled).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
