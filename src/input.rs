//! Pointer input mapping
//!
//! The field is drawn centered in the canvas at a uniform scale, so display
//! coordinates map back to field coordinates through the same letterbox the
//! renderer uses.

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Placement of the logical field inside a display surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldViewport {
    /// Display pixels per field pixel
    pub scale: f32,
    /// Display-space position of the field's top-left corner
    pub offset_x: f32,
    pub offset_y: f32,
}

impl FieldViewport {
    /// Fit the field inside `width` x `height`, preserving aspect ratio
    ///
    /// A degenerate surface yields the identity mapping.
    pub fn fit(width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self {
                scale: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            };
        }
        let scale = (width / FIELD_WIDTH).min(height / FIELD_HEIGHT);
        Self {
            scale,
            offset_x: (width - FIELD_WIDTH * scale) / 2.0,
            offset_y: (height - FIELD_HEIGHT * scale) / 2.0,
        }
    }

    /// Display-space x to field x (not clamped; paddles clamp themselves)
    pub fn to_field_x(&self, display_x: f32) -> f32 {
        (display_x - self.offset_x) / self.scale
    }

    /// Field point to display space
    pub fn to_display(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }
}

/// Map a pointer's client x onto the field, given the canvas's client rect
///
/// Only the horizontal coordinate matters; vertical pointer motion is ignored.
pub fn pointer_to_field_x(
    client_x: f32,
    rect_left: f32,
    rect_width: f32,
    rect_height: f32,
) -> f32 {
    FieldViewport::fit(rect_width, rect_height).to_field_x(client_x - rect_left)
}
