use std::fmt::{Display, Formatter};

use image::Rgba;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }

    pub fn hex(&self) -> &'static str {
        self.select("#000000", "#e0e0e0")
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        match c {
            Color::Dark => DARK,
            Color::Light => LIGHT,
        }
    }
}

pub const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const LIGHT: Rgba<u8> = Rgba([224, 224, 224, 255]);
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Geometry
//------------------------------------------------------------------------------

/// Fixed canvas and module dimensions. Encoder and decoder must share these exactly.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub module_w: u32,
    pub module_h: u32,
    pub gap_x: u32,
    pub gap_y: u32,
}

impl Geometry {
    pub const fn new(
        width: u32,
        height: u32,
        module_w: u32,
        module_h: u32,
        gap_x: u32,
        gap_y: u32,
    ) -> Self {
        Self { width, height, module_w, module_h, gap_x, gap_y }
    }

    pub fn stride_x(&self) -> u32 {
        self.module_w.saturating_add(self.gap_x)
    }

    pub fn stride_y(&self) -> u32 {
        self.module_h.saturating_add(self.gap_y)
    }

    /// Positive dimensions, and one stride past either canvas edge still fits in a `u32`.
    pub fn is_valid(&self) -> bool {
        if ![self.width, self.height, self.module_w, self.module_h].iter().all(|&v| v > 0) {
            return false;
        }
        let end_x = self.module_w.checked_add(self.gap_x).and_then(|s| self.width.checked_add(s));
        let end_y = self.module_h.checked_add(self.gap_y).and_then(|s| self.height.checked_add(s));
        end_x.is_some() && end_y.is_some()
    }

    /// Pixel sampled by the reader for the module whose top-left corner is at (x, y).
    pub fn center_of(&self, x: u32, y: u32) -> (u32, u32) {
        (x + self.module_w / 2, y + self.module_h / 2)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(1000, 1200, 16, 7, 10, 15)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Canvas: {}x{}, Module: {}x{}, Gap: {}x{} }}",
            self.width, self.height, self.module_w, self.module_h, self.gap_x, self.gap_y
        )
    }
}

// Reserved zone
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Zone {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub label: String,
}

impl Zone {
    pub fn new(label: &str, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h, label: label.to_string() }
    }

    /// The four branding zones of the reference layout.
    pub fn reference() -> Vec<Zone> {
        vec![
            Zone::new("F", 50, 50, 80, 100),
            Zone::new("Z", 870, 50, 80, 100),
            Zone::new("X", 460, 1060, 80, 100),
            Zone::new("FZX", 465, 545, 175, 110),
        ]
    }

    // Minkowski expanded overlap test with ZONE_BUFFER on every side
    pub fn collides(&self, x: u32, y: u32, module_w: u32, module_h: u32) -> bool {
        let (x, y) = (x as i64, y as i64);
        let (zx, zy, zw, zh) = (self.x as i64, self.y as i64, self.w as i64, self.h as i64);
        let (mw, mh) = (module_w as i64, module_h as i64);
        let b = ZONE_BUFFER as i64;

        x < zx + zw + b && x + mw > zx - b && y < zy + zh + b && y + mh > zy - b
    }
}

#[cfg(test)]
mod geometry_tests {
    use test_case::test_case;

    use super::Geometry;

    #[test_case(Geometry::default(), true; "reference")]
    #[test_case(Geometry::new(0, 1200, 16, 7, 10, 15), false; "zero width")]
    #[test_case(Geometry::new(1000, 1200, 16, 0, 10, 15), false; "zero module height")]
    #[test_case(Geometry::new(1000, 1200, 16, 7, u32::MAX, 15), false; "gap x overflows stride")]
    #[test_case(Geometry::new(1000, 1200, 16, 7, 10, u32::MAX - 3), false; "gap y overflows stride")]
    #[test_case(Geometry::new(u32::MAX - 20, 1200, 16, 7, 10, 15), false; "width plus stride overflows")]
    #[test_case(Geometry::new(1000, u32::MAX, 16, 7, 10, 15), false; "height plus stride overflows")]
    fn test_is_valid(geo: Geometry, exp: bool) {
        assert_eq!(geo.is_valid(), exp);
    }

    #[test]
    fn test_stride_saturates() {
        let geo = Geometry::new(1000, 1200, 16, 7, u32::MAX, 15);
        assert_eq!(geo.stride_x(), u32::MAX);
        assert_eq!(geo.stride_y(), 22);
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const INSET: u32 = 25;
pub const ZONE_BUFFER: u32 = 10;
pub const MODULE_RADIUS: u32 = 3;
pub const ZONE_RADIUS: u32 = 12;
pub const ZONE_BORDER: u32 = 4;
pub const DEFAULT_MARKER: &str = "<END>";
