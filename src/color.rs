use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Hex code of the single data series (scatter markers, violin body).
pub const SERIES_HEX: &str = "#1f77b4";

/// Opacity of the violin body.
pub const VIOLIN_ALPHA: f64 = 0.3;

/// Lightness of the horizontal grid lines.
const GRID_LIGHTNESS: f32 = 0.69;

/// Colour of the data series.
pub fn series_color() -> RGBColor {
    let rgb = Srgb::<u8>::from_str(SERIES_HEX).unwrap_or_else(|_| Srgb::new(0x1f, 0x77, 0xb4));
    RGBColor(rgb.red, rgb.green, rgb.blue)
}

/// Neutral grey used for grid lines.
pub fn grid_color() -> RGBColor {
    let hsl = Hsl::new(0.0, 0.0, GRID_LIGHTNESS);
    let rgb: Srgb = hsl.into_color();
    to_rgb8(rgb)
}

/// Component values in `0.0..=1.0`, the form PDF colour operators take.
pub fn unit_components(rgb: (u8, u8, u8)) -> [f32; 3] {
    let c: Srgb<f32> = Srgb::new(rgb.0, rgb.1, rgb.2).into_format();
    [c.red, c.green, c.blue]
}

fn to_rgb8(rgb: Srgb) -> RGBColor {
    RGBColor(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_color_matches_hex() {
        assert_eq!(series_color(), RGBColor(0x1f, 0x77, 0xb4));
    }

    #[test]
    fn grid_is_neutral_grey() {
        let RGBColor(r, g, b) = grid_color();
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((170..=185).contains(&r));
    }

    #[test]
    fn unit_components_scale() {
        assert_eq!(unit_components((0, 0, 0)), [0.0, 0.0, 0.0]);
        assert_eq!(unit_components((255, 255, 255)), [1.0, 1.0, 1.0]);
        let [r, _, _] = unit_components((51, 0, 0));
        assert!((r - 0.2).abs() < 1e-6);
    }
}
