//! Portal configuration model
//!
//! Every field has a default, so an empty JSON object is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Destination, View};

/// View shown right after startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialView {
    #[default]
    Home,
    /// Run the update check on launch
    UpdateCenter,
}

/// Sidebar geometry and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SidebarConfig {
    pub open_width: f64,
    pub collapsed_width: f64,
    /// Duration of the collapse/expand CSS transition
    pub transition_ms: u64,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            open_width: 310.0,
            collapsed_width: 64.0,
            transition_ms: 310,
        }
    }
}

impl SidebarConfig {
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Maps destinations containing `token` to the canonical storage `domain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    pub token: String,
    pub domain: String,
}

impl DomainRule {
    #[must_use]
    pub fn new(token: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            domain: domain.into(),
        }
    }
}

/// Titles of the views that are not embedded systems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewTitles {
    pub home: String,
    pub password_manager: String,
    pub update_center: String,
    /// Fallback when a destination has no name
    pub embedded_system: String,
}

impl Default for ViewTitles {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            password_manager: "Password Manager".to_string(),
            update_center: "Update Center".to_string(),
            embedded_system: "System".to_string(),
        }
    }
}

impl ViewTitles {
    #[must_use]
    pub fn for_view(&self, view: View) -> &str {
        match view {
            View::Home => &self.home,
            View::PasswordManager => &self.password_manager,
            View::UpdateCenter => &self.update_center,
            View::EmbeddedSystem => &self.embedded_system,
        }
    }
}

/// Portal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalConfig {
    /// Element id of the embedded browser mount region
    pub mount_id: String,
    pub sidebar: SidebarConfig,
    /// Extra pause between the focus acknowledgment and the credential prompt
    pub focus_settle_ms: u64,
    pub initial_view: InitialView,
    /// Ordered classification rules; the first matching token wins
    pub domain_rules: Vec<DomainRule>,
    /// Canonical domain used when no rule matches
    pub default_domain: String,
    /// Embedded systems offered in the sidebar
    pub destinations: Vec<Destination>,
    pub titles: ViewTitles,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            mount_id: "browser-mount-point".to_string(),
            sidebar: SidebarConfig::default(),
            focus_settle_ms: 0,
            initial_view: InitialView::Home,
            domain_rules: vec![
                DomainRule::new("quanlytruonghoc", "hcm.quanlytruonghoc.edu.vn"),
                DomainRule::new("taphuan", "taphuan.csdl.edu.vn"),
                DomainRule::new("temis", "temis.csdl.edu.vn"),
            ],
            default_domain: "truong.hcm.edu.vn".to_string(),
            destinations: default_destinations(),
            titles: ViewTitles::default(),
        }
    }
}

fn default_destinations() -> Vec<Destination> {
    let entry = |id: &str, name: &str, url: &str| Destination {
        id: id.to_string(),
        ..Destination::new(name, url)
    };
    vec![
        entry("qlth", "School Management", "https://hcm.quanlytruonghoc.edu.vn/")
            .with_menu("menu-qlth"),
        entry("csdl", "Education Database", "https://truong.hcm.edu.vn/").with_menu("menu-csdl"),
        entry("taphuan", "Training", "https://taphuan.csdl.edu.vn/"),
        entry("temis", "Temis: Standards Evaluation", "https://temis.csdl.edu.vn/"),
    ]
}

impl PortalConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoreError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.mount_id.trim().is_empty() {
            return Err(CoreError::ConfigError("mountId must not be empty".to_string()));
        }
        let sidebar = &self.sidebar;
        if !(sidebar.open_width > 0.0 && sidebar.collapsed_width > 0.0) {
            return Err(CoreError::ConfigError(
                "sidebar widths must be positive".to_string(),
            ));
        }
        if self.default_domain.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "defaultDomain must not be empty".to_string(),
            ));
        }
        if let Some(rule) = self
            .domain_rules
            .iter()
            .find(|r| r.token.trim().is_empty() || r.domain.trim().is_empty())
        {
            return Err(CoreError::ConfigError(format!(
                "invalid domain rule: {rule:?}"
            )));
        }
        for dest in &self.destinations {
            url::Url::parse(&dest.url).map_err(|e| {
                CoreError::ConfigError(format!("destination {} has invalid url: {e}", dest.id))
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn focus_settle(&self) -> Duration {
        Duration::from_millis(self.focus_settle_ms)
    }

    /// Look up a destination by catalog id
    #[must_use]
    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }
}
