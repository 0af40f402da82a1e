//! Colour scales.

use egui::Color32;

/// Qualitative palette for energy categories.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Blue
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Light Green
    Color32::from_rgb(255, 151, 255), // Magenta
    Color32::from_rgb(254, 203, 82),  // Yellow
];

/// Sequential red-white-blue scale used for the pie slices.
pub const RDBU: [Color32; 11] = [
    Color32::from_rgb(103, 0, 31),
    Color32::from_rgb(178, 24, 43),
    Color32::from_rgb(214, 96, 77),
    Color32::from_rgb(244, 165, 130),
    Color32::from_rgb(253, 219, 199),
    Color32::from_rgb(247, 247, 247),
    Color32::from_rgb(209, 229, 240),
    Color32::from_rgb(146, 197, 222),
    Color32::from_rgb(67, 147, 195),
    Color32::from_rgb(33, 102, 172),
    Color32::from_rgb(5, 48, 97),
];

/// Viridis stops, evenly spaced over [0, 1].
pub const VIRIDIS: [Color32; 10] = [
    Color32::from_rgb(68, 1, 84),
    Color32::from_rgb(72, 40, 120),
    Color32::from_rgb(62, 73, 137),
    Color32::from_rgb(49, 104, 142),
    Color32::from_rgb(38, 130, 142),
    Color32::from_rgb(31, 158, 137),
    Color32::from_rgb(53, 183, 121),
    Color32::from_rgb(110, 206, 88),
    Color32::from_rgb(181, 222, 43),
    Color32::from_rgb(253, 231, 37),
];

/// Colour for the category at `index` in sorted category order.
pub fn category_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Continuous Viridis colour for `value` within `[min, max]`.
///
/// A degenerate range maps everything to the low end.
pub fn viridis(value: f64, min: f64, max: f64) -> Color32 {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = (scaled - lower as f64) as f32;
    lerp_color(VIRIDIS[lower], VIRIDIS[upper], frac)
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0, 0.0, 10.0), VIRIDIS[0]);
        assert_eq!(viridis(10.0, 0.0, 10.0), VIRIDIS[9]);
        assert_eq!(viridis(-5.0, 0.0, 10.0), VIRIDIS[0]);
        assert_eq!(viridis(50.0, 0.0, 10.0), VIRIDIS[9]);
    }

    #[test]
    fn test_viridis_degenerate_range() {
        assert_eq!(viridis(3.0, 3.0, 3.0), VIRIDIS[0]);
    }

    #[test]
    fn test_viridis_interpolates_between_stops() {
        let c = viridis(0.25, 0.0, 9.0);
        assert_ne!(c, VIRIDIS[0]);
        assert!(c.g() > VIRIDIS[0].g() && c.g() < VIRIDIS[1].g());
        assert!(c.b() > VIRIDIS[0].b() && c.b() < VIRIDIS[1].b());
    }

    #[test]
    fn test_viridis_green_increases() {
        let greens: Vec<u8> = (0..=10).map(|v| viridis(v as f64, 0.0, 10.0).g()).collect();
        assert!(greens.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_category_color_wraps() {
        assert_eq!(category_color(0), PALETTE[0]);
        assert_eq!(category_color(12), PALETTE[2]);
    }
}
