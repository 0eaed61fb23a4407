//! # region-navigator
//!
//! Region navigation for desktop-style applications, independent of any UI
//! toolkit.
//!
//! A *region* is a content area whose view is swapped by navigation. Each
//! region is driven by a [`NavigationService`] that:
//!
//! - resolves an [`Address`] such as `app://customers/123?tab=orders` to a
//!   view through a [`ViewResolver`] (usually a [`ViewRegistry`])
//! - lets the incoming view-model veto the navigation ([`NavigationAware`])
//! - hands the view to a [`ViewHost`] and records the request in a bounded
//!   back/forward [`Journal`]
//! - publishes [`ActiveViewChanged`], [`Navigated`] and [`NavigationFailed`]
//!   events
//!
//! ## Quick start
//!
//! ```
//! use region_navigator::{ContentSlot, NavigationService, ResolvedView, View, ViewRegistry};
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! struct CustomerList;
//! struct CustomerDetails(String);
//!
//! impl View for CustomerList {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! impl View for CustomerDetails {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = ViewRegistry::new();
//! registry
//!     .register_view("app", "customers", |_| ResolvedView::new(CustomerList))
//!     .register_view("app", "customers/:id", |params| {
//!         ResolvedView::new(CustomerDetails(params.get("id").unwrap_or_default().to_string()))
//!     });
//!
//! let slot = Arc::new(ContentSlot::new());
//! let service = NavigationService::new(registry, Arc::clone(&slot));
//! service.on_navigated(|event| println!("now at {}", event.context.address()));
//!
//! pollster::block_on(async {
//!     let result = service.navigate_str("app://customers/123?tab=orders").await.unwrap();
//!     assert!(result.is_success());
//!     assert_eq!(result.context().parameters().get("tab"), Some("orders"));
//! });
//!
//! let shown = slot.content().unwrap();
//! assert_eq!(shown.as_any().downcast_ref::<CustomerDetails>().unwrap().0, "123");
//! ```
//!
//! ## Features
//!
//! - `log` (default): log through the `log` crate
//! - `tracing`: log through the `tracing` crate instead
//! - `cache` (default): LRU cache for registry pattern matches

#![cfg_attr(docsrs, feature(doc_cfg))]

// Logging abstraction (must be declared before other modules use the macros)
#[macro_use]
mod logging;

pub mod address;
#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod journal;
pub mod lifecycle;
pub mod matching;
pub mod params;
pub mod region;
pub mod registry;
pub mod resolve;
pub mod service;
pub mod view;

pub use address::{Address, AddressError};
pub use config::{NavigatorConfig, DEFAULT_REGION};
pub use context::{NavigationContext, NavigationMode, ServiceHandle};
pub use error::{HistoryDirection, NavigationError, NavigationResult, ResolveError};
pub use events::{ActiveViewChanged, EventChannel, Navigated, NavigationFailed, SubscriptionId};
pub use journal::{Journal, NavigatorState, DEFAULT_JOURNAL_CAPACITY};
pub use lifecycle::{Activation, NavigationAware};
pub use params::{QueryParams, RouteParams};
pub use region::RegionManager;
pub use registry::ViewRegistry;
pub use resolve::{resolver_fn, FnResolver, ViewResolver};
pub use service::NavigationService;
pub use view::{host_fn, ContentSlot, FnHost, ResolvedView, View, ViewHandle, ViewHost, ViewId};

pub use tokio_util::sync::CancellationToken;
