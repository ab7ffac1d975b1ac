use egui::Color32;

/// Hues assigned to the twelve pitch classes, on a 0-100 wheel. Don't
/// overthink these.
pub const NOTE_HUES: [f32; 12] = [
    0.0, 9.0, 14.0, 25.0, 51.0, 58.0, 63.0, 68.0, 73.0, 81.0, 85.0, 91.0,
];

/// Hue for a note, indexed by pitch class.
pub fn note_hue(note: u8) -> f32 {
    NOTE_HUES[(note % 12) as usize]
}

/// HSB color with all three components on a 0-100 scale. Brightness carries
/// the recency fade: on the black background, dimmer reads as older.
pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Color32 {
    let h = (hue.clamp(0.0, 100.0) / 100.0) * 360.0;
    let s = saturation.clamp(0.0, 100.0) / 100.0;
    let v = brightness.clamp(0.0, 100.0) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (x, 0.0, c),
        h if h < 300.0 => (0.0, x, c),
        _ => (c, 0.0, x),
    };

    Color32::from_rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hue_full_saturation_is_red() {
        assert_eq!(hsb(0.0, 100.0, 100.0), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn zero_brightness_is_black() {
        assert_eq!(hsb(50.0, 100.0, 0.0), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert_eq!(hsb(25.0, 0.0, 50.0), Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn octaves_share_a_hue() {
        assert_eq!(note_hue(60), note_hue(72));
        assert_eq!(note_hue(21), note_hue(33));
    }
}
