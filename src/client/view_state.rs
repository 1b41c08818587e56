//! Viewer state: selected model, scale, rotation and theme.
//!
//! Only the selected model survives a reload, through a [`KeyValueStore`].

use super::kv::{KeyValueStore, KvError};
use crate::constants::SELECTED_MODEL_KEY;

/// Smallest scale, in tenths.
pub const MIN_SCALE_TENTHS: u8 = 6;
/// Largest scale, in tenths.
pub const MAX_SCALE_TENTHS: u8 = 18;
const DEFAULT_SCALE_TENTHS: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Glyph shown on the theme toggle button.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Dark => "🌙",
            Self::Light => "🌞",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    selected_model: Option<String>,
    // Tenths avoid float drift across repeated steps
    scale_tenths: u8,
    auto_rotate: bool,
    theme: Theme,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_model: None,
            scale_tenths: DEFAULT_SCALE_TENTHS,
            auto_rotate: false,
            theme: Theme::default(),
        }
    }
}

impl ViewState {
    /// Fresh state with the last selected model restored.
    pub fn restore<K: KeyValueStore + ?Sized>(store: &K) -> Self {
        Self {
            selected_model: store.get(SELECTED_MODEL_KEY).filter(|m| !m.is_empty()),
            ..Self::default()
        }
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// Switch to the model at `src` and persist the choice.
    ///
    /// Returns the toast text, e.g. `Loaded: chair.glb`.
    ///
    /// # Errors
    ///
    /// Returns an error if the choice cannot be persisted. The selection is
    /// applied regardless.
    pub fn select_model<K: KeyValueStore + ?Sized>(
        &mut self,
        src: &str,
        store: &K,
    ) -> Result<String, KvError> {
        self.selected_model = Some(src.to_string());
        store.set(SELECTED_MODEL_KEY, src)?;
        let file = src.rsplit('/').next().unwrap_or(src);
        Ok(format!("Loaded: {file}"))
    }

    pub fn scale(&self) -> f32 {
        f32::from(self.scale_tenths) / 10.0
    }

    /// CSS transform applied to the viewer element.
    pub fn transform(&self) -> String {
        format!("scale({})", self.scale())
    }

    pub fn scale_up(&mut self) -> f32 {
        self.scale_tenths = (self.scale_tenths + 1).min(MAX_SCALE_TENTHS);
        self.scale()
    }

    pub fn scale_down(&mut self) -> f32 {
        self.scale_tenths = self.scale_tenths.saturating_sub(1).max(MIN_SCALE_TENTHS);
        self.scale()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Flip auto-rotation. Returns the toast text.
    pub fn toggle_rotation(&mut self) -> &'static str {
        self.auto_rotate = !self.auto_rotate;
        if self.auto_rotate {
            "Rotation on"
        } else {
            "Rotation off"
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme. Returns the new toggle glyph.
    pub fn toggle_theme(&mut self) -> &'static str {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.theme.indicator()
    }
}
