use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_color((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Fixed colours for the survey rounds and for deltas
// ---------------------------------------------------------------------------

/// Bar colours for the NFHS 4 / NFHS 5 comparison, in that order.
pub fn survey_colors() -> [Color32; 2] {
    [hsl_color(210.0, 0.55, 0.60), hsl_color(30.0, 0.80, 0.55)]
}

/// Green for a rise, red for a fall, grey for no change.
pub fn delta_color(change: f64) -> Color32 {
    if change > 0.0 {
        Color32::from_rgb(46, 160, 67)
    } else if change < 0.0 {
        Color32::from_rgb(218, 54, 51)
    } else {
        Color32::GRAY
    }
}
