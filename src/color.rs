use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB triple, converted to egui or plotters colours at draw time.
pub type Rgb = [u8; 3];

const GRAY: Rgb = [160, 160, 160];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Channel colours
// ---------------------------------------------------------------------------

/// Fixed colour per channel for the whole run, so a channel keeps its colour
/// across panels and between the viewer and exported files.
#[derive(Debug, Clone)]
pub struct ChannelPalette {
    /// Channels with their colour, in source column order.
    entries: Vec<(String, Rgb)>,
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ChannelPalette {
    /// Assign colours in channel order.
    pub fn new(channels: &[String]) -> Self {
        let entries: Vec<(String, Rgb)> = channels
            .iter()
            .cloned()
            .zip(generate_palette(channels.len()))
            .collect();
        let mapping = entries.iter().cloned().collect();
        ChannelPalette {
            entries,
            mapping,
            default_color: GRAY,
        }
    }

    /// Look up the colour for a channel.
    pub fn color_for(&self, channel: &str) -> Rgb {
        self.mapping
            .get(channel)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (channel → colour) in source column order.
    pub fn legend_entries(&self) -> &[(String, Rgb)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_channel_is_gray() {
        let palette = ChannelPalette::new(&["E".to_string(), "H".to_string()]);
        assert_ne!(palette.color_for("E"), palette.color_for("H"));
        assert_eq!(palette.color_for("B"), GRAY);
        assert_eq!(palette.legend_entries().len(), 2);
    }

    #[test]
    fn test_legend_keeps_column_order() {
        let channels: Vec<String> = ["H", "E", "Ey", "Ex"].iter().map(|s| s.to_string()).collect();
        let palette = ChannelPalette::new(&channels);
        let names: Vec<&str> = palette
            .legend_entries()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["H", "E", "Ey", "Ex"]);
        assert_eq!(palette.legend_entries()[0].1, palette.color_for("H"));
    }
}
