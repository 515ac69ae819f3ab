use std::str::FromStr;

use palette::{Srgb, Srgba, WithAlpha};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
#[error("invalid color {0:?}")]
pub struct InvalidColor(String);

/// Look of the route polyline: a colored line over an optional darker casing.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    line_color: Srgba<f32>,
    line_width_px: f32,
    casing: Option<(Srgba<f32>, f32)>,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self::solid(Srgba::new(0.0, 0.478, 1.0, 1.0), 5.0)
            .with_casing(Srgba::new(0.0, 0.302, 0.639, 1.0), 2.0)
    }
}

impl RouteStyle {
    pub fn solid(line_color: Srgba<f32>, line_width_px: f32) -> Self {
        Self {
            line_color,
            line_width_px: line_width_px.max(0.0),
            casing: None,
        }
    }

    /// Opaque line from a "#rrggbb" color.
    pub fn from_hex(hex: &str, line_width_px: f32) -> Result<Self, InvalidColor> {
        let color = Srgb::<u8>::from_str(hex.trim()).map_err(|_| InvalidColor(hex.to_owned()))?;
        Ok(Self::solid(
            color.into_format::<f32>().with_alpha(1.0),
            line_width_px,
        ))
    }

    /// Border drawn `width_px` wider than the line on each side.
    pub fn with_casing(mut self, color: Srgba<f32>, width_px: f32) -> Self {
        self.casing = Some((color, width_px.max(0.0)));
        self
    }

    /// MapLibre line layers reading from `source_id`, bottom-most first.
    pub fn layers(&self, source_id: &str) -> Vec<Value> {
        let mut layers = Vec::with_capacity(2);

        if let Some((color, width_px)) = self.casing {
            layers.push(line_layer(
                &format!("{source_id}-casing"),
                source_id,
                color,
                self.line_width_px + 2.0 * width_px,
            ));
        }
        layers.push(line_layer(
            &format!("{source_id}-line"),
            source_id,
            self.line_color,
            self.line_width_px,
        ));

        layers
    }
}

fn line_layer(id: &str, source_id: &str, color: Srgba<f32>, width_px: f32) -> Value {
    json!({
        "id": id,
        "type": "line",
        "source": source_id,
        "layout": { "line-join": "round", "line-cap": "round" },
        "paint": {
            "line-color": hex(color),
            "line-opacity": color.alpha,
            "line-width": width_px,
        }
    })
}

fn hex(color: Srgba<f32>) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}
