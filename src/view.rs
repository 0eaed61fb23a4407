//! Views, view handles and the hosting surface.
//!
//! The navigator never owns a view. A [`ViewResolver`](crate::ViewResolver)
//! hands out a [`ResolvedView`], the [`ViewHost`] takes ownership when the
//! view is shown, and the service only keeps a [`ViewHandle`] (a weak
//! reference) to whatever is active.

use crate::lifecycle::NavigationAware;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Something a region can display.
///
/// ```
/// use region_navigator::View;
/// use std::any::Any;
///
/// struct CustomerList;
///
/// impl View for CustomerList {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// assert!(CustomerList.name().ends_with("CustomerList"));
/// ```
pub trait View: Send + Sync + 'static {
    /// Name used in logs. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Access to the concrete type for hosts that need to downcast.
    fn as_any(&self) -> &dyn Any;
}

/// Identity of a live view instance.
///
/// Two handles with the same id refer to the same allocation. The id stays
/// unique while any handle to the view exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(usize);

impl ViewId {
    /// Identity of the view behind `view`.
    pub fn of(view: &Arc<dyn View>) -> Self {
        Self(Arc::as_ptr(view).cast::<()>() as usize)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{:x}", self.0)
    }
}

/// Non-owning reference to a view.
#[derive(Clone)]
pub struct ViewHandle {
    id: ViewId,
    view: Weak<dyn View>,
}

impl ViewHandle {
    pub fn new(view: &Arc<dyn View>) -> Self {
        Self {
            id: ViewId::of(view),
            view: Arc::downgrade(view),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Get the view if its owner still holds it.
    pub fn upgrade(&self) -> Option<Arc<dyn View>> {
        self.view.upgrade()
    }

    /// Return `true` while the view has not been dropped by its owner.
    pub fn is_alive(&self) -> bool {
        self.view.strong_count() > 0
    }
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ViewHandle {}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ViewHandle");
        debug.field("id", &self.id);
        match self.view.upgrade() {
            Some(view) => debug.field("name", &view.name()),
            None => debug.field("name", &"<dropped>"),
        };
        debug.finish()
    }
}

/// A view ready to be shown, plus its optional navigation-aware view-model.
#[derive(Clone)]
pub struct ResolvedView {
    pub view: Arc<dyn View>,
    pub view_model: Option<Arc<dyn NavigationAware>>,
}

impl ResolvedView {
    /// A view without lifecycle callbacks.
    pub fn new(view: impl View) -> Self {
        Self::from_arc(Arc::new(view))
    }

    /// Wrap an already shared view.
    pub fn from_arc(view: Arc<dyn View>) -> Self {
        Self {
            view,
            view_model: None,
        }
    }

    /// Attach a navigation-aware view-model.
    pub fn with_view_model(mut self, view_model: Arc<dyn NavigationAware>) -> Self {
        self.view_model = Some(view_model);
        self
    }

    pub fn id(&self) -> ViewId {
        ViewId::of(&self.view)
    }
}

impl fmt::Debug for ResolvedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedView")
            .field("view", &self.view.name())
            .field("navigation_aware", &self.view_model.is_some())
            .finish()
    }
}

/// The surface that actually displays a region's content.
pub trait ViewHost: Send + Sync + 'static {
    /// Make `view` the visible content. The host takes ownership.
    fn show(&self, view: Arc<dyn View>);
}

impl<T: ViewHost + ?Sized> ViewHost for Arc<T> {
    fn show(&self, view: Arc<dyn View>) {
        (**self).show(view);
    }
}

/// Create a host from a closure.
///
/// ```
/// use region_navigator::{host_fn, View};
///
/// let host = host_fn(|view| println!("showing {}", view.name()));
/// ```
pub const fn host_fn<F>(f: F) -> FnHost<F>
where
    F: Fn(Arc<dyn View>) + Send + Sync + 'static,
{
    FnHost { f }
}

/// Host created by [`host_fn`].
pub struct FnHost<F> {
    f: F,
}

impl<F> ViewHost for FnHost<F>
where
    F: Fn(Arc<dyn View>) + Send + Sync + 'static,
{
    fn show(&self, view: Arc<dyn View>) {
        (self.f)(view);
    }
}

/// A single-slot host that keeps the last shown view.
///
/// Handy for headless regions and tests. Dropping the slot's content is the
/// only thing that ends a view's life.
#[derive(Default)]
pub struct ContentSlot {
    content: Mutex<Option<Arc<dyn View>>>,
}

impl ContentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently shown.
    pub fn content(&self) -> Option<Arc<dyn View>> {
        self.content.lock().clone()
    }

    /// Drop the current content.
    pub fn unload(&self) -> Option<Arc<dyn View>> {
        self.content.lock().take()
    }
}

impl ViewHost for ContentSlot {
    fn show(&self, view: Arc<dyn View>) {
        *self.content.lock() = Some(view);
    }
}

impl fmt::Debug for ContentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.content.lock();
        f.debug_struct("ContentSlot")
            .field("content", &content.as_ref().map(|v| v.name().to_string()))
            .finish()
    }
}
