//! Layout geometry exchanged with the shell and the browser host

use serde::{Deserialize, Serialize};

/// Integer pixel rectangle of the embedded browser mount region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Raw layout box of an element as measured by the shell (fractional CSS pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Whether the element is currently displayed
    pub visible: bool,
}

impl LayoutBox {
    /// Round to whole pixels. Returns `None` when the element is hidden.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_mount_rect(&self) -> Option<MountRect> {
        if !self.visible {
            return None;
        }
        Some(MountRect {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
            width: self.width.round().max(0.0) as u32,
            height: self.height.round().max(0.0) as u32,
        })
    }
}
