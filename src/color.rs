use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = hue_offset + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome colours shared by every chart
// ---------------------------------------------------------------------------

/// One fixed colour per stroke outcome, so all four charts agree.
#[derive(Debug, Clone)]
pub struct OutcomeColors {
    colors: [Color32; 2],
}

impl Default for OutcomeColors {
    fn default() -> Self {
        // Blue-ish for "no stroke", then the opposite hue for "stroke".
        let palette = generate_palette(2, 210.0);
        OutcomeColors {
            colors: [palette[0], palette[1]],
        }
    }
}

impl OutcomeColors {
    pub fn color_for(&self, outcome: Outcome) -> Color32 {
        self.colors[outcome.code() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(5, 0.0).len(), 5);
    }

    #[test]
    fn outcomes_get_distinct_colors() {
        let colors = OutcomeColors::default();
        assert_ne!(
            colors.color_for(Outcome::NoStroke),
            colors.color_for(Outcome::Stroke)
        );
    }
}
