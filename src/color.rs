use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use screentime_viewer::data::Value;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Category colours: value → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a chart to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Value, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from categories in display order.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a Value>) -> Self {
        let categories: Vec<&Value> = categories.into_iter().collect();
        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &Value) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging map for correlation coefficients
// ---------------------------------------------------------------------------

/// Blue (-1) through light grey (0) to red (+1), blended in linear RGB.
pub fn coolwarm(coefficient: f64) -> Color32 {
    let cold: LinSrgb = Srgb::new(59u8, 76, 192).into_format::<f32>().into_linear();
    let neutral: LinSrgb = Srgb::new(221u8, 221, 221).into_format::<f32>().into_linear();
    let warm: LinSrgb = Srgb::new(180u8, 4, 38).into_format::<f32>().into_linear();

    let t = coefficient.clamp(-1.0, 1.0) as f32;
    let mixed = if t < 0.0 {
        neutral.mix(cold, -t)
    } else {
        neutral.mix(warm, t)
    };
    let rgb: Srgb = mixed.into_color();
    to_color32(rgb)
}

/// Colour of a heatmap cell whose coefficient is undefined.
pub const UNDEFINED_CELL: Color32 = Color32::from_gray(120);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_category_is_grey() {
        let phone = Value::Text("Phone".into());
        let map = ColorMap::new([&phone]);
        assert_ne!(map.color_for(&phone), Color32::GRAY);
        assert_eq!(map.color_for(&Value::Text("TV".into())), Color32::GRAY);
    }

    #[test]
    fn test_coolwarm_ends() {
        let cold = coolwarm(-1.0);
        let warm = coolwarm(1.0);
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert_eq!(coolwarm(0.0), Color32::from_rgb(221, 221, 221));
    }
}
