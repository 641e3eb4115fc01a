// Color assignment strategies for category series

use crate::color::ColorValue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Translucency applied to marker colors so overlapping points stay visible
pub const MARKER_ALPHA: f64 = 0.2;

/// Produces one color per category. The color at position `i` belongs to
/// the category at position `i`; exactly `count` colors are returned.
pub trait ColorAssigner {
    fn assign_colors(&mut self, count: usize) -> Vec<ColorValue>;
}

impl<C: ColorAssigner + ?Sized> ColorAssigner for Box<C> {
    fn assign_colors(&mut self, count: usize) -> Vec<ColorValue> {
        (**self).assign_colors(count)
    }
}

/// Deterministic palette that cycles through a fixed list of colors
#[derive(Debug, Clone)]
pub struct PaletteColorAssigner {
    colors: Vec<ColorValue>,
    alpha: f64,
}

impl PaletteColorAssigner {
    /// Palette from explicit colors. An empty list falls back to Category10.
    pub fn new(colors: Vec<ColorValue>, alpha: f64) -> Self {
        if colors.is_empty() {
            return Self::category10().with_alpha(alpha);
        }
        Self { colors, alpha }
    }

    /// Category10 colors (D3-inspired)
    pub fn category10() -> Self {
        PaletteColorAssigner {
            colors: vec![
                ColorValue::rgb(31, 119, 180),  // blue
                ColorValue::rgb(255, 127, 14),  // orange
                ColorValue::rgb(44, 160, 44),   // green
                ColorValue::rgb(214, 39, 40),   // red
                ColorValue::rgb(148, 103, 189), // purple
                ColorValue::rgb(140, 86, 75),   // brown
                ColorValue::rgb(227, 119, 194), // pink
                ColorValue::rgb(127, 127, 127), // gray
                ColorValue::rgb(188, 189, 34),  // olive
                ColorValue::rgb(23, 190, 207),  // cyan
            ],
            alpha: MARKER_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Color for a specific index (wraps around if index > palette size)
    pub fn get_color(&self, index: usize) -> ColorValue {
        self.colors[index % self.colors.len()].with_alpha(self.alpha)
    }
}

impl Default for PaletteColorAssigner {
    fn default() -> Self {
        Self::category10()
    }
}

impl ColorAssigner for PaletteColorAssigner {
    fn assign_colors(&mut self, count: usize) -> Vec<ColorValue> {
        (0..count).map(|i| self.get_color(i)).collect()
    }
}

/// Random dark blues, redrawn on every call.
///
/// The hue stays in the blue band (179-257 degrees) with high saturation and
/// low brightness, so the category-to-color mapping changes between renders
/// of the same data unless a seed is given.
#[derive(Debug, Clone)]
pub struct RandomColorAssigner {
    rng: StdRng,
    alpha: f64,
}

impl RandomColorAssigner {
    const HUE_RANGE: (f64, f64) = (179.0, 257.0);
    const SATURATION_RANGE: (f64, f64) = (0.9, 1.0);
    const BRIGHTNESS_RANGE: (f64, f64) = (0.35, 0.55);

    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            alpha: MARKER_ALPHA,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            alpha: MARKER_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    fn next_color(&mut self) -> ColorValue {
        let h = self.rng.gen_range(Self::HUE_RANGE.0..=Self::HUE_RANGE.1);
        let s = self
            .rng
            .gen_range(Self::SATURATION_RANGE.0..=Self::SATURATION_RANGE.1);
        let v = self
            .rng
            .gen_range(Self::BRIGHTNESS_RANGE.0..=Self::BRIGHTNESS_RANGE.1);
        ColorValue::from_hsv(h, s, v, self.alpha)
    }
}

impl Default for RandomColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAssigner for RandomColorAssigner {
    fn assign_colors(&mut self, count: usize) -> Vec<ColorValue> {
        (0..count).map(|_| self.next_color()).collect()
    }
}
