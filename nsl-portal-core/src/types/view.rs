//! View related type definitions

use serde::{Deserialize, Serialize};

/// Mutually exclusive UI views of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Landing page
    Home,
    /// Password table
    PasswordManager,
    /// Update check / download / install
    UpdateCenter,
    /// An external system rendered by the embedded browser
    EmbeddedSystem,
}

impl View {
    /// Every view, in sidebar order
    pub const ALL: [Self; 4] = [
        Self::Home,
        Self::PasswordManager,
        Self::UpdateCenter,
        Self::EmbeddedSystem,
    ];
}

/// An externally hosted system opened in the embedded browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Catalog id (empty for ad-hoc navigations)
    #[serde(default)]
    pub id: String,
    /// Display title
    pub name: String,
    /// Address loaded in the embedded browser
    pub url: String,
    /// Sidebar submenu group to open while this system is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
}

impl Destination {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            url: url.into(),
            menu_id: None,
        }
    }

    #[must_use]
    pub fn with_menu(mut self, menu_id: impl Into<String>) -> Self {
        self.menu_id = Some(menu_id.into());
        self
    }
}

/// Target of a view transition, carrying the parameters the target needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Home,
    PasswordManager,
    UpdateCenter,
    EmbeddedSystem(Destination),
}

impl ViewRequest {
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            Self::Home => View::Home,
            Self::PasswordManager => View::PasswordManager,
            Self::UpdateCenter => View::UpdateCenter,
            Self::EmbeddedSystem(_) => View::EmbeddedSystem,
        }
    }
}
