//! Shell UI abstract Trait

use crate::error::CoreResult;
use crate::types::{AccountDraft, LayoutBox, PasswordTable, UpdateState, UserMessage, View};

/// The application window's own UI (view containers, sidebar, password table)
///
/// Calls are fire-and-forget UI mutations; they never block on user input.
pub trait ShellSurface: Send + Sync {
    /// Show or hide the container of `view`
    fn set_view_visible(&self, view: View, visible: bool);

    /// Current layout of the element with `element_id`, `None` if it does not exist
    fn layout_of(&self, element_id: &str) -> Option<LayoutBox>;

    /// Displayed page title
    fn set_title(&self, title: &str);

    /// Collapse or expand the sidebar (starts the CSS transition)
    fn set_sidebar_collapsed(&self, collapsed: bool);

    /// Open or close one submenu group
    fn set_submenu_open(&self, menu_id: &str, open: bool);

    fn render_password_table(&self, table: &PasswordTable);

    fn open_account_editor(&self, draft: &AccountDraft);

    fn close_account_editor(&self);

    fn render_update_state(&self, state: &UpdateState);

    fn show_message(&self, message: &UserMessage);

    fn copy_to_clipboard(&self, text: &str) -> CoreResult<()>;
}
