//! Controls configuration
//!
//! Serializable settings for the transform controls, in the same
//! shape as the rest of the editor's config surface so they can live
//! in the same RON file.

use serde::{Deserialize, Serialize};

/// Gizmo handle colors (RGBA).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GizmoStyle {
    /// X axis handle color.
    pub x_color: [f32; 4],
    /// Y axis handle color.
    pub y_color: [f32; 4],
    /// Z axis handle color.
    pub z_color: [f32; 4],
    /// Screen-space rotation ring color.
    pub screen_color: [f32; 4],
    /// Color applied to the active handle.
    pub highlight_color: [f32; 4],
    /// Opacity of planar pads.
    pub pad_opacity: f32,
}

impl GizmoStyle {
    /// Dark theme handle colors.
    pub fn dark() -> Self {
        Self {
            x_color: [1.0, 0.2, 0.2, 1.0],
            y_color: [0.2, 1.0, 0.2, 1.0],
            z_color: [0.2, 0.2, 1.0, 1.0],
            screen_color: [0.8, 0.8, 0.8, 0.6],
            highlight_color: [1.0, 1.0, 0.0, 1.0],
            pad_opacity: 0.5,
        }
    }

    /// Light theme handle colors.
    pub fn light() -> Self {
        Self {
            x_color: [0.8, 0.1, 0.1, 1.0],
            y_color: [0.1, 0.7, 0.1, 1.0],
            z_color: [0.1, 0.1, 0.8, 1.0],
            screen_color: [0.4, 0.4, 0.4, 0.6],
            highlight_color: [0.9, 0.8, 0.0, 1.0],
            pad_opacity: 0.5,
        }
    }
}

impl Default for GizmoStyle {
    fn default() -> Self {
        Self::dark()
    }
}

/// Transform controls configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Gates all pointer interaction.
    pub enabled: bool,
    /// Gates gizmo rendering (and therefore picking).
    pub visible: bool,
    /// Gizmo visual scale multiplier; must be positive.
    pub size: f32,
    /// Handle colors.
    pub style: GizmoStyle,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            size: 1.0,
            style: GizmoStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_round_trip() {
        let config = ControlsConfig {
            size: 1.5,
            style: GizmoStyle::light(),
            ..Default::default()
        };

        let text = ron::to_string(&config).unwrap();
        let back: ControlsConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
