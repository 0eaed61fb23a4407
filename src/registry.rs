//! Pattern-based view registry.
//!
//! [`ViewRegistry`] is the stock [`ViewResolver`]: it maps a scheme plus a
//! path pattern (see [`matching`](crate::matching)) to a factory that builds
//! the view. The first registered entry that matches wins.
//!
//! ```
//! use region_navigator::{Address, NavigationContext, ResolvedView, View, ViewRegistry, ViewResolver};
//! use std::any::Any;
//!
//! struct CustomerDetails {
//!     id: u64,
//! }
//!
//! impl View for CustomerDetails {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = ViewRegistry::new();
//! registry.register_view("app", "customers/:id", |params| {
//!     ResolvedView::new(CustomerDetails {
//!         id: params.get_as("id").unwrap_or_default(),
//!     })
//! });
//!
//! let context = NavigationContext::detached(Address::parse("app://customers/7").unwrap());
//! let resolved = pollster::block_on(registry.resolve(&context)).unwrap();
//! let view = resolved.view.as_any().downcast_ref::<CustomerDetails>().unwrap();
//! assert_eq!(view.id, 7);
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, CachedMatch, MatchCache};
use crate::context::NavigationContext;
use crate::error::ResolveError;
use crate::matching::match_pattern;
use crate::params::RouteParams;
use crate::resolve::ViewResolver;
use crate::view::ResolvedView;
use crate::{debug_log, info_log, trace_log};
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
#[cfg(feature = "cache")]
use parking_lot::Mutex;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;

type SyncFactory =
    dyn Fn(&NavigationContext, &RouteParams) -> Result<ResolvedView, ResolveError> + Send + Sync;
type AsyncFactory = dyn Fn(NavigationContext, RouteParams) -> BoxFuture<'static, Result<ResolvedView, ResolveError>>
    + Send
    + Sync;

#[derive(Clone)]
enum Factory {
    Sync(Arc<SyncFactory>),
    Async(Arc<AsyncFactory>),
}

struct RegistryEntry {
    scheme: String,
    pattern: String,
    factory: Factory,
}

/// Registry of view factories keyed by scheme and path pattern.
///
/// Registration takes `&self`, so a registry can keep growing after it has
/// been handed to a service behind an `Arc`.
pub struct ViewRegistry {
    entries: RwLock<Vec<Arc<RegistryEntry>>>,
    #[cfg(feature = "cache")]
    cache: Mutex<MatchCache>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            #[cfg(feature = "cache")]
            cache: Mutex::new(MatchCache::new()),
        }
    }

    /// Register an infallible, synchronous factory.
    pub fn register_view<F>(&self, scheme: &str, pattern: &str, factory: F) -> &Self
    where
        F: Fn(&RouteParams) -> ResolvedView + Send + Sync + 'static,
    {
        self.register(scheme, pattern, move |_context, params| Ok(factory(params)))
    }

    /// Register a synchronous factory that can fail.
    pub fn register<F>(&self, scheme: &str, pattern: &str, factory: F) -> &Self
    where
        F: Fn(&NavigationContext, &RouteParams) -> Result<ResolvedView, ResolveError>
            + Send
            + Sync
            + 'static,
    {
        self.push_entry(scheme, pattern, Factory::Sync(Arc::new(factory)))
    }

    /// Register an asynchronous factory.
    pub fn register_async<F, Fut>(&self, scheme: &str, pattern: &str, factory: F) -> &Self
    where
        F: Fn(NavigationContext, RouteParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResolvedView, ResolveError>> + Send + 'static,
    {
        let factory = move |context: NavigationContext,
                            params: RouteParams|
              -> BoxFuture<'static, Result<ResolvedView, ResolveError>> {
            factory(context, params).boxed()
        };
        self.push_entry(scheme, pattern, Factory::Async(Arc::new(factory)))
    }

    fn push_entry(&self, scheme: &str, pattern: &str, factory: Factory) -> &Self {
        let entry = RegistryEntry {
            scheme: scheme.to_ascii_lowercase(),
            pattern: pattern.trim_matches('/').to_string(),
            factory,
        };
        info_log!("Registered view '{}://{}'", entry.scheme, entry.pattern);

        #[cfg(feature = "cache")]
        let mut cache = self.cache.lock();
        self.entries.write().push(Arc::new(entry));
        #[cfg(feature = "cache")]
        cache.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered `(scheme, pattern)` pairs in match order.
    pub fn patterns(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .map(|e| (e.scheme.clone(), e.pattern.clone()))
            .collect()
    }

    /// Find the entry for `scheme`/`path` and its captured parameters.
    ///
    /// Lock order is cache, then entries, here and in `push_entry`.
    fn find(&self, scheme: &str, path: &str) -> Option<(Arc<RegistryEntry>, RouteParams)> {
        #[cfg(feature = "cache")]
        let mut cache = self.cache.lock();
        #[cfg(feature = "cache")]
        let key = format!("{scheme}:{path}");

        #[cfg(feature = "cache")]
        if let Some(cached) = cache.get(&key) {
            let entries = self.entries.read();
            return cached.and_then(|m| Some((Arc::clone(entries.get(m.entry)?), m.params)));
        }

        let entries = self.entries.read();
        trace_log!("Matching '{}:{}' against {} entries", scheme, path, entries.len());
        let found = entries.iter().enumerate().find_map(|(index, entry)| {
            if entry.scheme != scheme {
                return None;
            }
            match_pattern(&entry.pattern, path).map(|params| (index, params))
        });

        #[cfg(feature = "cache")]
        cache.insert(
            key,
            found.as_ref().map(|(index, params)| CachedMatch {
                entry: *index,
                params: params.clone(),
            }),
        );

        found.map(|(index, params)| (Arc::clone(&entries[index]), params))
    }

    /// Match statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats().clone()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("patterns", &self.patterns())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ViewResolver for ViewRegistry {
    async fn resolve(&self, context: &NavigationContext) -> Result<ResolvedView, ResolveError> {
        let address = context.address();
        let Some((entry, params)) = self.find(address.scheme(), address.path()) else {
            debug_log!("No view registered for '{}'", address);
            return Err(ResolveError::NotFound {
                address: address.to_string(),
            });
        };

        debug_log!(
            "'{}' matched '{}://{}' ({} param(s))",
            address,
            entry.scheme,
            entry.pattern,
            params.len()
        );

        // Clone the factory out so no registry lock is held while it runs.
        match entry.factory.clone() {
            Factory::Sync(factory) => factory(context, &params),
            Factory::Async(factory) => factory(context.clone(), params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::view::View;
    use std::any::Any;

    struct Named(String);

    impl View for Named {
        fn name(&self) -> &str {
            &self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn ctx(text: &str) -> NavigationContext {
        NavigationContext::detached(Address::parse(text).unwrap())
    }

    fn resolve_name(registry: &ViewRegistry, text: &str) -> Result<String, ResolveError> {
        pollster::block_on(registry.resolve(&ctx(text))).map(|r| r.view.name().to_string())
    }

    fn sample() -> ViewRegistry {
        let registry = ViewRegistry::new();
        registry
            .register_view("app", "customers", |_| {
                ResolvedView::new(Named("customer-list".into()))
            })
            .register_view("app", "customers/:id", |params| {
                ResolvedView::new(Named(format!("customer-{}", params.get("id").unwrap_or("?"))))
            })
            .register_view("admin", "customers", |_| {
                ResolvedView::new(Named("admin-customers".into()))
            });
        registry
    }

    #[test]
    fn test_resolves_by_scheme_and_pattern() {
        let registry = sample();
        assert_eq!(resolve_name(&registry, "app://customers").unwrap(), "customer-list");
        assert_eq!(resolve_name(&registry, "app://customers/123").unwrap(), "customer-123");
        assert_eq!(resolve_name(&registry, "admin://customers").unwrap(), "admin-customers");
    }

    #[test]
    fn test_unknown_address_is_not_found() {
        let registry = sample();
        assert_eq!(
            resolve_name(&registry, "app://bogus-scheme").unwrap_err(),
            ResolveError::NotFound {
                address: "app://bogus-scheme".to_string()
            }
        );
        assert!(matches!(
            resolve_name(&registry, "other://customers"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = ViewRegistry::new();
        registry
            .register_view("app", "products/:id", |_| ResolvedView::new(Named("generic".into())))
            .register_view("app", "products/new", |_| ResolvedView::new(Named("create".into())));

        assert_eq!(resolve_name(&registry, "app://products/new").unwrap(), "generic");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_fallible_factory() {
        let registry = ViewRegistry::new();
        registry.register("app", "licenses/:key", |context, params| {
            match params.get("key") {
                Some("expired") => Err(ResolveError::Failed {
                    address: context.address().to_string(),
                    message: "license expired".into(),
                }),
                _ => Ok(ResolvedView::new(Named("license".into()))),
            }
        });

        assert!(resolve_name(&registry, "app://licenses/abc").is_ok());
        assert!(matches!(
            resolve_name(&registry, "app://licenses/expired"),
            Err(ResolveError::Failed { .. })
        ));
    }

    #[test]
    fn test_async_factory_sees_query() {
        let registry = ViewRegistry::new();
        registry.register_async("app", "offerings", |context, _params| async move {
            let page = context.parameters().get_as::<u32>("page").unwrap_or(1);
            Ok(ResolvedView::new(Named(format!("offerings-p{page}"))))
        });

        assert_eq!(
            resolve_name(&registry, "app://offerings?page=4").unwrap(),
            "offerings-p4"
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let registry = ViewRegistry::new();
        registry.register_view("APP", "/home/", |_| ResolvedView::new(Named("home".into())));
        assert_eq!(registry.patterns(), vec![("app".to_string(), "home".to_string())]);
        assert_eq!(resolve_name(&registry, "app://home").unwrap(), "home");
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_cache_hits_and_invalidation() {
        let registry = sample();
        resolve_name(&registry, "app://customers/1").unwrap();
        resolve_name(&registry, "app://customers/1").unwrap();
        resolve_name(&registry, "app://nowhere").unwrap_err();
        resolve_name(&registry, "app://nowhere").unwrap_err();

        let stats = registry.cache_stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);

        registry.register_view("app", "nowhere", |_| ResolvedView::new(Named("found".into())));
        assert_eq!(resolve_name(&registry, "app://nowhere").unwrap(), "found");
        assert!(registry.cache_stats().invalidations >= 1);
    }
}
