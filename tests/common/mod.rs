//! Test utilities for navigation tests
//!
//! Provides views, recording view-models, a recording host and an event
//! recorder shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use region_navigator::*;
use std::any::Any;
use std::sync::Arc;

/// Route crate logs to the test output (`RUST_LOG=debug cargo test`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A view that only knows its name.
pub struct TestView {
    name: String,
}

impl TestView {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl View for TestView {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared, ordered log of everything that happened during a test.
#[derive(Clone, Default)]
pub struct Log {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

/// View-model that writes its callbacks to a [`Log`] and can veto navigation.
pub struct RecordingViewModel {
    name: String,
    log: Log,
    reject_with: Option<String>,
}

impl RecordingViewModel {
    pub fn new(name: impl Into<String>, log: &Log) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            reject_with: None,
        }
    }

    pub fn rejecting(name: impl Into<String>, log: &Log, reason: &str) -> Self {
        Self {
            reject_with: Some(reason.to_string()),
            ..Self::new(name, log)
        }
    }
}

#[async_trait::async_trait]
impl NavigationAware for RecordingViewModel {
    async fn confirm_navigation_to(
        &self,
        _context: &NavigationContext,
        mode: NavigationMode,
    ) -> Activation {
        self.log.push(format!("{}:confirm:{}", self.name, mode));
        match &self.reject_with {
            Some(reason) => Activation::reject(reason.as_str()),
            None => Activation::accept(),
        }
    }

    fn on_navigated_from(&self, context: &NavigationContext, mode: NavigationMode) {
        self.log
            .push(format!("{}:from:{}:{}", self.name, mode, context.address().path()));
    }

    fn on_navigated_to(&self, context: &NavigationContext, mode: NavigationMode) {
        self.log
            .push(format!("{}:to:{}:{}", self.name, mode, context.address().path()));
    }
}

/// Host that logs every view it is asked to show.
///
/// It keeps every shown view alive (like a tab strip) until [`unload`] is
/// called, so event subscribers can still inspect the outgoing view.
///
/// [`unload`]: RecordingHost::unload
pub struct RecordingHost {
    log: Log,
    views: Mutex<Vec<Arc<dyn View>>>,
}

impl RecordingHost {
    pub fn new(log: &Log) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            views: Mutex::new(Vec::new()),
        })
    }

    /// Name of the view shown last.
    pub fn shown(&self) -> Option<String> {
        self.views.lock().last().map(|view| view.name().to_string())
    }

    /// Drop every view the host holds.
    pub fn unload(&self) {
        self.views.lock().clear();
    }
}

impl ViewHost for RecordingHost {
    fn show(&self, view: Arc<dyn View>) {
        self.log.push(format!("host:show:{}", view.name()));
        self.views.lock().push(view);
    }
}

/// Registry with `app://customers`, `app://customers/:id` and
/// `app://customers/:id/products`.
pub fn customer_registry() -> ViewRegistry {
    let registry = ViewRegistry::new();
    registry
        .register_view("app", "customers", |_| ResolvedView::new(TestView::new("customers")))
        .register_view("app", "customers/:id", |params| {
            ResolvedView::new(TestView::new(format!(
                "customer-{}",
                params.get("id").unwrap_or_default()
            )))
        })
        .register_view("app", "customers/:id/products", |params| {
            ResolvedView::new(TestView::new(format!(
                "products-{}",
                params.get("id").unwrap_or_default()
            )))
        });
    registry
}

/// Registry whose views carry a [`RecordingViewModel`] named after the path.
pub fn aware_registry(log: &Log) -> ViewRegistry {
    let registry = ViewRegistry::new();
    let log = log.clone();
    registry.register("app", "*", move |context, _params| {
        let name = context.address().path().to_string();
        let view_model = if name == "locked" {
            RecordingViewModel::rejecting(name.as_str(), &log, "locked")
        } else {
            RecordingViewModel::new(name.as_str(), &log)
        };
        Ok(ResolvedView::new(TestView::new(name)).with_view_model(Arc::new(view_model)))
    });
    registry
}

/// Service over [`customer_registry`] with a recording host.
pub fn customer_service(log: &Log) -> (NavigationService, Arc<RecordingHost>) {
    init_logging();
    let host = RecordingHost::new(log);
    (NavigationService::new(customer_registry(), Arc::clone(&host)), host)
}

/// Subscribe to all three event channels, writing one line per event.
pub fn record_events(service: &NavigationService, log: &Log) {
    let events = log.clone();
    service.on_active_view_changed(move |event| {
        let old = event
            .old
            .as_ref()
            .and_then(ViewHandle::upgrade)
            .map_or_else(|| "-".to_string(), |view| view.name().to_string());
        let new = event
            .new
            .upgrade()
            .map_or_else(|| "-".to_string(), |view| view.name().to_string());
        events.push(format!("event:active:{old}->{new}"));
    });

    let events = log.clone();
    service.on_navigated(move |event| {
        events.push(format!("event:navigated:{}:{}", event.mode, event.context.address()));
    });

    let events = log.clone();
    service.on_navigation_failed(move |event| {
        events.push(format!("event:failed:{}:{}", event.mode, event.context.address()));
    });
}

/// Navigate and unwrap the argument check.
pub async fn go(service: &NavigationService, target: &str) -> NavigationResult {
    service
        .navigate_str(target)
        .await
        .unwrap_or_else(|err| panic!("navigate_str({target}) failed: {err}"))
}

pub fn addresses(contexts: &[NavigationContext]) -> Vec<String> {
    contexts.iter().map(|c| c.address().to_string()).collect()
}
