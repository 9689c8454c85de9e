//! Admin UI page registration.
//!
//! Rendering belongs to the UI host; the extension only contributes the
//! page identifier.

use crate::error::{ExtensionError, Result};
use dashmap::DashSet;

/// Identifier the admin page is registered under with the UI host.
pub const ADMIN_PAGE_ID: &str = "extension-name-admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUiPage {
    page_id: String,
}

impl Default for AdminUiPage {
    fn default() -> Self {
        Self::new(ADMIN_PAGE_ID)
    }
}

impl AdminUiPage {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }
}

/// Accepts page registrations. Page identifiers are unique per host.
pub trait UiHost: Send + Sync + 'static {
    fn register_page(&self, page: &AdminUiPage) -> Result<()>;
}

/// In-process [`UiHost`] used when the extension runs standalone.
#[derive(Debug, Default)]
pub struct UiRegistry {
    pages: DashSet<String>,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page_id: &str) -> bool {
        self.pages.contains(page_id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl UiHost for UiRegistry {
    fn register_page(&self, page: &AdminUiPage) -> Result<()> {
        if !self.pages.insert(page.page_id().to_string()) {
            return Err(ExtensionError::DuplicatePage {
                page_id: page.page_id().to_string(),
            });
        }
        tracing::info!(page_id = page.page_id(), "admin page registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_id() {
        let page = AdminUiPage::default();
        assert_eq!(page.page_id(), "extension-name-admin");
    }

    #[test]
    fn page_ids_are_unique() {
        let registry = UiRegistry::new();
        let page = AdminUiPage::new("extension-name-admin");

        registry.register_page(&page).unwrap();
        let err = registry.register_page(&page).unwrap_err();

        assert!(matches!(err, ExtensionError::DuplicatePage { ref page_id } if page_id == "extension-name-admin"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("extension-name-admin"));
    }
}
