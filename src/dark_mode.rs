use crate::color::Rgb;
use crate::params::{LightParams, ParameterPanel};
use crate::state::SceneState;

/// Light mode preset; equals the scene's startup lighting
pub const LIGHT_PRESET: LightParams = LightParams {
    dir_light_intensity: 1.96,
    dir_light_color: Rgb::from_hex(0xe8c37b),
    amb_light_intensity: 0.82,
    amb_light_color: Rgb::from_hex(0xa0a0fc),
    bg_color: Rgb::from_hex(0xc8f0f9),
};

/// Dark mode preset; intensities intentionally match the light preset
pub const DARK_PRESET: LightParams = LightParams {
    dir_light_intensity: 1.96,
    dir_light_color: Rgb::from_hex(0x555555),
    amb_light_intensity: 0.82,
    amb_light_color: Rgb::from_hex(0x333333),
    bg_color: Rgb::from_hex(0x000000),
};

/// Two-state switch between [`LIGHT_PRESET`] and [`DARK_PRESET`]
#[derive(Debug, Default)]
pub struct DarkModeToggle {
    is_dark: bool,
}

impl DarkModeToggle {
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn preset(&self) -> &'static LightParams {
        if self.is_dark {
            &DARK_PRESET
        } else {
            &LIGHT_PRESET
        }
    }

    /// Writes the current preset into the panel, refreshes it and applies it
    pub fn sync(&self, panel: &mut ParameterPanel, scene: &mut SceneState) {
        panel.overwrite(*self.preset());
        panel.update_display();
        panel.apply(scene);
    }

    /// Flips the mode and syncs the new preset
    pub fn toggle(&mut self, panel: &mut ParameterPanel, scene: &mut SceneState) {
        self.is_dark = !self.is_dark;
        log::info!(
            "Switched to {} mode",
            if self.is_dark { "dark" } else { "light" }
        );
        self.sync(panel, scene);
    }
}
