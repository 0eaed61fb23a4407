//! Named regions.
//!
//! An application with several content areas (main page, sidebar, dialogs)
//! runs one [`NavigationService`] per area. [`RegionManager`] keeps them by
//! name so any part of the application can navigate a region it does not
//! own.

use crate::service::NavigationService;
use crate::{debug_log, warn_log};
use std::collections::HashMap;

/// Lookup table of navigation services keyed by region name.
///
/// # Example
///
/// ```
/// use region_navigator::{ContentSlot, NavigationService, NavigatorConfig, RegionManager, ViewRegistry};
///
/// let mut regions = RegionManager::new();
/// let config = NavigatorConfig::new().region("sidebar");
/// regions.register(NavigationService::with_config(config, ViewRegistry::new(), ContentSlot::new()));
///
/// assert!(regions.contains("sidebar"));
/// assert_eq!(regions.get("sidebar").unwrap().region(), "sidebar");
/// ```
#[derive(Debug, Default)]
pub struct RegionManager {
    regions: HashMap<String, NavigationService>,
}

impl RegionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service under its own region name.
    ///
    /// Returns the service previously registered under that name, if any.
    pub fn register(&mut self, service: NavigationService) -> Option<NavigationService> {
        let name = service.region().to_string();
        let previous = self.regions.insert(name.clone(), service);
        if previous.is_some() {
            warn_log!("Region '{}' registered twice; the previous service was replaced", name);
        } else {
            debug_log!("Region '{}' registered", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&NavigationService> {
        self.regions.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NavigationService> {
        let removed = self.regions.remove(name);
        if removed.is_some() {
            debug_log!("Region '{}' removed", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Registered region names, sorted.
    pub fn region_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
