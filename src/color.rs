use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sequential scale: value → shade of blue
// ---------------------------------------------------------------------------

/// Maps values in `[min, max]` to blues, light for low and dark for high.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    min: f64,
    max: f64,
}

impl SequentialScale {
    const HUE: f32 = 210.0;
    const LIGHTEST: f32 = 0.85;
    const DARKEST: f32 = 0.30;

    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        SequentialScale { min, max }
    }

    /// Position of `value` in the range, 0..=1. A degenerate range maps to 1.
    pub fn position(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if !range.is_finite() || range <= 0.0 {
            return 1.0;
        }
        (((value - self.min) / range).clamp(0.0, 1.0)) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        let lightness = Self::LIGHTEST + (Self::DARKEST - Self::LIGHTEST) * t;
        hsl_to_color32(Hsl::new(Self::HUE, 0.70, lightness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn higher_values_get_darker_blues() {
        let scale = SequentialScale::new([50_000.0, 100_000.0, 150_000.0]);
        assert_eq!(scale.position(50_000.0), 0.0);
        assert_eq!(scale.position(150_000.0), 1.0);

        let low = scale.color_for(50_000.0);
        let high = scale.color_for(150_000.0);
        let brightness = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(brightness(high) < brightness(low));
        assert!(high.b() > high.r());
    }

    #[test]
    fn single_value_scale_is_total() {
        let scale = SequentialScale::new([10.0]);
        assert_eq!(scale.position(10.0), 1.0);
    }
}
