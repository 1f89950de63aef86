//! Decoration palettes: sRGB to linear conversion and random color picks.

use rand::Rng;

/// Color used when a palette is empty.
const FALLBACK: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Convert one sRGB channel to linear.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGBA color from an sRGB triple, alpha 1.
#[must_use]
pub fn linear_rgba(srgb: [f32; 3]) -> [f32; 4] {
    [
        srgb_to_linear(srgb[0]),
        srgb_to_linear(srgb[1]),
        srgb_to_linear(srgb[2]),
        1.0,
    ]
}

/// Weighted color palette in linear space.
///
/// Weighting is by repetition: an entry listed twice is picked twice as
/// often. There is no separate weight field.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<[f32; 4]>,
}

impl Palette {
    /// Palette from sRGB triples as authored in the options.
    #[must_use]
    pub fn from_srgb(entries: &[[f32; 3]]) -> Self {
        Self {
            colors: entries.iter().copied().map(linear_rgba).collect(),
        }
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in authoring order.
    #[must_use]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Uniform pick over entries. An empty palette yields white.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 4] {
        if self.colors.is_empty() {
            return FALLBACK;
        }
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }

    #[test]
    fn duplicates_bias_frequency() {
        let red = [1.0, 0.0, 0.0];
        let blue = [0.0, 0.0, 1.0];
        let palette = Palette::from_srgb(&[red, red, red, blue]);
        let mut rng = StdRng::seed_from_u64(7);

        let reds = (0..4000)
            .filter(|_| palette.pick(&mut rng)[0] > 0.5)
            .count();
        // Expect ~3000; generous band for a statistical check.
        assert!((2700..3300).contains(&reds), "got {reds} reds");
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        let palette = Palette::from_srgb(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(palette.pick(&mut rng), FALLBACK);
    }
}
