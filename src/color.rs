use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill for the type bar chart.
pub const BAR_COLOR: Color32 = Color32::from_rgb(0x4b, 0x57, 0x2f);

/// Fill for countries without any matching dinosaur.
pub const NO_DATA_COLOR: Color32 = Color32::WHITE;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Sequential scale: species count → Color32
// ---------------------------------------------------------------------------

/// Light grey → teal ramp over `1..=max` species.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesScale {
    max: usize,
}

impl SpeciesScale {
    const HUE: f32 = 180.0;

    /// Scale sized for the largest count present.
    pub fn new<I: IntoIterator<Item = Option<usize>>>(counts: I) -> Self {
        let max = counts.into_iter().flatten().max().unwrap_or(0);
        SpeciesScale { max }
    }

    /// Colour for a count; `None` means no data.
    pub fn color_for(&self, count: Option<usize>) -> Color32 {
        let Some(n) = count else {
            return NO_DATA_COLOR;
        };
        let t = if self.max <= 1 {
            1.0
        } else {
            (n.saturating_sub(1)) as f32 / (self.max - 1) as f32
        };
        let t = t.clamp(0.0, 1.0);
        // Saturation and lightness move together from pale grey to deep teal.
        let hsl = Hsl::new(Self::HUE, 0.05 + 0.55 * t, 0.85 - 0.50 * t);
        hsl_to_color32(hsl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn test_no_data_is_white() {
        let scale = SpeciesScale::new([Some(3), None]);
        assert_eq!(scale.color_for(None), NO_DATA_COLOR);
        assert_ne!(scale.color_for(Some(1)), NO_DATA_COLOR);
    }

    #[test]
    fn test_more_species_is_darker() {
        let scale = SpeciesScale::new([Some(1), Some(5), Some(10)]);
        let few = scale.color_for(Some(1));
        let many = scale.color_for(Some(10));
        assert!(lightness(many) < lightness(few));
    }

    #[test]
    fn test_single_value_scale() {
        // With one distinct count every country gets the deepest shade.
        let single = SpeciesScale::new([Some(1)]);
        let wide = SpeciesScale::new([Some(5)]);
        assert!(lightness(single.color_for(Some(1))) < lightness(wide.color_for(Some(1))));
        let empty = SpeciesScale::new(std::iter::empty());
        assert_ne!(empty.color_for(Some(2)), NO_DATA_COLOR);
    }
}
