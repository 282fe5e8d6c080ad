//! Navigation theme values
//!
//! A plain value passed down through configuration. Widgets read colors from
//! the theme they were built with; there is no global theme state.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavTheme {
    /// One decorative drawer layer per color, back to front
    pub layer_colors: Vec<String>,
    /// Highlight for the active entry
    pub accent_color: String,
    /// Drawer toggle color while closed
    pub menu_button_color: String,
    /// Drawer toggle color while open
    pub open_menu_button_color: String,
}

impl Default for NavTheme {
    fn default() -> Self {
        Self {
            layer_colors: vec!["#B19EEF".to_string(), "#5227FF".to_string()],
            accent_color: "#5227FF".to_string(),
            menu_button_color: "#ffffff".to_string(),
            open_menu_button_color: "#000000".to_string(),
        }
    }
}

impl NavTheme {
    /// Toggle color for the given open state
    pub fn toggle_color(&self, open: bool) -> &str {
        if open {
            &self.open_menu_button_color
        } else {
            &self.menu_button_color
        }
    }
}
