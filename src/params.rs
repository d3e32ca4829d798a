//! Light and color parameters edited through the panel.
//!
//! [`LightParams`] is the value model behind the panel. Each [`ParameterBinding`]
//! is a keyed accessor into it; every accepted write is followed by
//! [`apply_parameters`], so the scene never lags the panel by a frame.

use crate::color::Rgb;
use crate::error::{Result, ViewerError};
use crate::state::SceneState;

/// The five values bound to the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightParams {
    pub dir_light_intensity: f32,
    pub dir_light_color: Rgb,
    pub amb_light_intensity: f32,
    pub amb_light_color: Rgb,
    pub bg_color: Rgb,
}

impl LightParams {
    /// Current values read back from the scene.
    pub fn from_scene(scene: &SceneState) -> Self {
        LightParams {
            dir_light_intensity: scene.sun.intensity,
            dir_light_color: scene.sun.color,
            amb_light_intensity: scene.ambient.intensity,
            amb_light_color: scene.ambient.color,
            bg_color: scene.background,
        }
    }
}

/// Copies every bound value into the scene in one step.
pub fn apply_parameters(params: &LightParams, scene: &mut SceneState) {
    scene.sun.intensity = params.dir_light_intensity;
    scene.sun.color = params.dir_light_color;
    scene.ambient.intensity = params.amb_light_intensity;
    scene.ambient.color = params.amb_light_color;
    scene.background = params.bg_color;
}

/// A single parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(Rgb),
}

impl ParamValue {
    fn kind(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "numeric",
            ParamValue::Color(_) => "color",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v:.4}"),
            ParamValue::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Inclusive slider range with its step size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// How a binding reads and writes its field, typed by value kind.
#[derive(Clone, Copy)]
pub enum Control {
    /// Numeric slider over `range`.
    Slider {
        range: Range,
        get: fn(&LightParams) -> f32,
        set: fn(&mut LightParams, f32),
    },
    /// Color swatch.
    Swatch {
        get: fn(&LightParams) -> Rgb,
        set: fn(&mut LightParams, Rgb),
    },
}

/// Keyed accessor into [`LightParams`].
#[derive(Clone, Copy)]
pub struct ParameterBinding {
    pub key: &'static str,
    pub label: &'static str,
    pub control: Control,
}

impl std::fmt::Debug for ParameterBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterBinding")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("range", &self.range())
            .finish()
    }
}

impl ParameterBinding {
    pub fn get(&self, params: &LightParams) -> ParamValue {
        match self.control {
            Control::Slider { get, .. } => ParamValue::Number(get(params)),
            Control::Swatch { get, .. } => ParamValue::Color(get(params)),
        }
    }

    /// Slider range; `None` for color swatches.
    pub fn range(&self) -> Option<Range> {
        match self.control {
            Control::Slider { range, .. } => Some(range),
            Control::Swatch { .. } => None,
        }
    }

    /// Checks kind and range, then writes; a rejected value never reaches the params.
    fn write(&self, params: &mut LightParams, value: ParamValue) -> Result<()> {
        match (self.control, value) {
            (Control::Slider { range, set, .. }, ParamValue::Number(v)) => {
                if !range.contains(v) {
                    return Err(ViewerError::RangeViolation {
                        key: self.key,
                        value: v,
                        min: range.min,
                        max: range.max,
                    });
                }
                set(params, v);
                Ok(())
            }
            (Control::Swatch { set, .. }, ParamValue::Color(c)) => {
                set(params, c);
                Ok(())
            }
            (_, value) => Err(ViewerError::KindMismatch {
                key: self.key,
                given: value.kind(),
            }),
        }
    }
}

const BINDING_COUNT: usize = 5;

/// Panel bindings in display order.
pub static BINDINGS: [ParameterBinding; BINDING_COUNT] = [
    ParameterBinding {
        key: "dirLightIntensity",
        label: "Dir Intensity",
        control: Control::Slider {
            range: Range {
                min: 0.0,
                max: 10.0,
                step: 0.0001,
            },
            get: |p| p.dir_light_intensity,
            set: |p, v| p.dir_light_intensity = v,
        },
    },
    ParameterBinding {
        key: "dirLightColor",
        label: "Dir Color",
        control: Control::Swatch {
            get: |p| p.dir_light_color,
            set: |p, c| p.dir_light_color = c,
        },
    },
    ParameterBinding {
        key: "ambLightIntensity",
        label: "Amb Intensity",
        control: Control::Slider {
            range: Range {
                min: 0.0,
                max: 10.0,
                step: 0.001,
            },
            get: |p| p.amb_light_intensity,
            set: |p, v| p.amb_light_intensity = v,
        },
    },
    ParameterBinding {
        key: "ambLightColor",
        label: "Amb Color",
        control: Control::Swatch {
            get: |p| p.amb_light_color,
            set: |p, c| p.amb_light_color = c,
        },
    },
    ParameterBinding {
        key: "bgColor",
        label: "Background Color",
        control: Control::Swatch {
            get: |p| p.bg_color,
            set: |p, c| p.bg_color = c,
        },
    },
];

/// Parameter values plus the values the panel widget currently shows.
#[derive(Debug)]
pub struct ParameterPanel {
    params: LightParams,
    displayed: [ParamValue; BINDING_COUNT],
}

impl ParameterPanel {
    pub fn new(params: LightParams) -> Self {
        let mut panel = ParameterPanel {
            params,
            displayed: [ParamValue::Number(0.0); BINDING_COUNT],
        };
        panel.update_display();
        panel
    }

    pub fn binding(&self, key: &str) -> Option<&'static ParameterBinding> {
        BINDINGS.iter().find(|b| b.key == key)
    }

    pub fn params(&self) -> &LightParams {
        &self.params
    }

    /// Current value behind `key`.
    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.binding(key).map(|b| b.get(&self.params))
    }

    /// Value the widget last displayed for the binding at `index`.
    pub fn displayed(&self, index: usize) -> Option<ParamValue> {
        self.displayed.get(index).copied()
    }

    /// User edit of one binding; on success the scene is updated before returning.
    pub fn set(&mut self, key: &str, value: ParamValue, scene: &mut SceneState) -> Result<()> {
        let index = BINDINGS
            .iter()
            .position(|b| b.key == key)
            .ok_or_else(|| ViewerError::UnknownParameter(key.to_string()))?;
        if let Err(err) = BINDINGS[index].write(&mut self.params, value) {
            log::warn!("Rejected parameter write: {err}");
            return Err(err);
        }
        self.displayed[index] = value;
        apply_parameters(&self.params, scene);
        Ok(())
    }

    /// Replaces every value at once without touching the display.
    pub fn overwrite(&mut self, params: LightParams) {
        self.params = params;
    }

    /// Refreshes the displayed values from the params.
    pub fn update_display(&mut self) {
        for (slot, binding) in self.displayed.iter_mut().zip(BINDINGS.iter()) {
            *slot = binding.get(&self.params);
        }
    }

    pub fn apply(&self, scene: &mut SceneState) {
        apply_parameters(&self.params, scene);
    }
}
