//! Navigation requests.
//!
//! A [`NavigationContext`] is created for every [`navigate`] call and is
//! never modified afterwards. The journal keeps the same context and
//! back/forward navigation replays it unchanged, so a view-model sees the
//! exact address and parameters it was first opened with.
//!
//! [`navigate`]: crate::NavigationService::navigate

use crate::address::Address;
use crate::params::QueryParams;
use crate::service::{NavigationService, ServiceInner};
use std::fmt;
use std::sync::{Arc, Weak};

/// How a navigation was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationMode {
    /// A fresh `navigate` call. Truncates forward history.
    New,
    /// Replay of the previous journal entry.
    Back,
    /// Replay of the next journal entry.
    Forward,
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::Back => f.write_str("back"),
            Self::Forward => f.write_str("forward"),
        }
    }
}

/// Non-owning reference to the service that created a context.
///
/// View-models use it to start follow-up navigations from inside a
/// callback without keeping the region alive.
#[derive(Clone)]
pub struct ServiceHandle {
    region: Arc<str>,
    inner: Weak<ServiceInner>,
}

impl ServiceHandle {
    pub(crate) fn new(region: Arc<str>, inner: Weak<ServiceInner>) -> Self {
        Self { region, inner }
    }

    /// A handle that belongs to no service.
    ///
    /// Useful for resolving views outside a region, e.g. in tests.
    pub fn detached() -> Self {
        Self {
            region: Arc::from(""),
            inner: Weak::new(),
        }
    }

    /// Name of the region this handle points to (empty when detached).
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Get the service back, if it is still alive.
    pub fn upgrade(&self) -> Option<NavigationService> {
        self.inner.upgrade().map(NavigationService::from_inner)
    }

    /// Return `true` if both handles point to the same service.
    pub fn same_service(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("region", &self.region)
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Immutable record of one navigation request.
///
/// Cloning is cheap; clones share the same record.
#[derive(Clone)]
pub struct NavigationContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    service: ServiceHandle,
    address: Address,
}

impl NavigationContext {
    /// Create a context for `address` issued by `service`.
    pub fn new(service: ServiceHandle, address: Address) -> Self {
        Self {
            inner: Arc::new(ContextInner { service, address }),
        }
    }

    /// Create a context that belongs to no service.
    pub fn detached(address: Address) -> Self {
        Self::new(ServiceHandle::detached(), address)
    }

    /// Handle of the issuing service.
    pub fn service(&self) -> &ServiceHandle {
        &self.inner.service
    }

    /// The requested address.
    pub fn address(&self) -> &Address {
        &self.inner.address
    }

    /// Query parameters parsed from the address.
    pub fn parameters(&self) -> &QueryParams {
        self.inner.address.query()
    }

    /// Return `true` if both values are the same record (not just equal addresses).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("region", &self.inner.service.region())
            .field("address", &self.inner.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_context() {
        let address = Address::parse("app://customers?page=3").unwrap();
        let context = NavigationContext::detached(address.clone());

        assert_eq!(context.address(), &address);
        assert_eq!(context.parameters().get("page"), Some("3"));
        assert_eq!(context.service().region(), "");
        assert!(context.service().upgrade().is_none());
    }

    #[test]
    fn test_clone_shares_record() {
        let context = NavigationContext::detached(Address::parse("app://a").unwrap());
        let copy = context.clone();
        let other = NavigationContext::detached(Address::parse("app://a").unwrap());

        assert!(context.ptr_eq(&copy));
        assert!(!context.ptr_eq(&other));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(NavigationMode::New.to_string(), "new");
        assert_eq!(NavigationMode::Back.to_string(), "back");
        assert_eq!(NavigationMode::Forward.to_string(), "forward");
    }
}
