//! Service configuration.

use crate::journal::DEFAULT_JOURNAL_CAPACITY;

/// Region name used when none is configured.
pub const DEFAULT_REGION: &str = "main";

/// Settings for a [`NavigationService`](crate::NavigationService).
///
/// # Example
///
/// ```
/// use region_navigator::NavigatorConfig;
///
/// let config = NavigatorConfig::new()
///     .region("sidebar")
///     .journal_capacity(20);
/// assert_eq!(config.region_name(), "sidebar");
/// assert_eq!(config.capacity(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    region: String,
    journal_capacity: usize,
}

impl NavigatorConfig {
    pub fn new() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }

    /// Name of the region the service drives.
    pub fn region(mut self, name: impl Into<String>) -> Self {
        self.region = name.into();
        self
    }

    /// Maximum number of journal entries. Values below one are raised to one.
    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity.max(1);
        self
    }

    pub fn region_name(&self) -> &str {
        &self.region
    }

    pub fn capacity(&self) -> usize {
        self.journal_capacity
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
