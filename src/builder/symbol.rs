use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::common::metadata::*;

// Module
//------------------------------------------------------------------------------

/// A single colored data cell, in canvas coordinates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Module {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub color: Color,
}

impl Module {
    pub fn new(x: u32, y: u32, w: u32, h: u32, color: Color) -> Self {
        Self { x, y, w, h, color }
    }
}

// Symbol
// Paint-independent result of an encode: every data cell with its color, in data index order,
// plus the reserved zones. Raster, vector and text renderings are all derived from this.
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    geo: Geometry,
    zones: Vec<Zone>,
    modules: Vec<Module>,
}

impl Symbol {
    pub(crate) fn new(geo: Geometry, zones: Vec<Zone>, modules: Vec<Module>) -> Self {
        Self { geo, zones, modules }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geo
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.color == Color::Dark).count()
    }
}

// Label painter
//------------------------------------------------------------------------------

/// Draws the text of a reserved zone. Glyph rendering needs a font, which the codec does not
/// carry, so callers plug one in here.
pub trait LabelPainter {
    fn paint_label(&self, canvas: &mut RgbaImage, zone: &Zone);
}

/// Leaves zones blank.
pub struct NoLabels;

impl LabelPainter for NoLabels {
    fn paint_label(&self, _canvas: &mut RgbaImage, _zone: &Zone) {}
}

// Render
//------------------------------------------------------------------------------

impl Symbol {
    pub fn to_image(&self) -> RgbaImage {
        self.to_image_with(&NoLabels)
    }

    pub fn to_image_with(&self, labels: &dyn LabelPainter) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.geo.width, self.geo.height);
        self.paint(&mut canvas, labels);
        canvas
    }

    pub fn paint(&self, canvas: &mut RgbaImage, labels: &dyn LabelPainter) {
        canvas.pixels_mut().for_each(|p| *p = PAPER);

        for m in self.modules.iter() {
            fill_rounded_rect(
                canvas,
                m.x as i32,
                m.y as i32,
                m.w,
                m.h,
                MODULE_RADIUS,
                m.color.into(),
            );
        }

        // Border is stroked centered on the zone outline
        let half = (ZONE_BORDER / 2) as i32;
        for z in self.zones.iter() {
            let (x, y) = (z.x as i32, z.y as i32);
            fill_rounded_rect(
                canvas,
                x - half,
                y - half,
                z.w + ZONE_BORDER,
                z.h + ZONE_BORDER,
                ZONE_RADIUS + ZONE_BORDER / 2,
                DARK,
            );
            fill_rounded_rect(
                canvas,
                x + half,
                y + half,
                z.w.saturating_sub(ZONE_BORDER),
                z.h.saturating_sub(ZONE_BORDER),
                ZONE_RADIUS.saturating_sub(ZONE_BORDER / 2),
                PAPER,
            );
            labels.paint_label(canvas, z);
        }
    }

    pub fn to_svg(&self) -> String {
        let (w, h) = (self.geo.width, self.geo.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        svg.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);

        for m in self.modules.iter() {
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{MODULE_RADIUS}" fill="{}"/>"#,
                m.x,
                m.y,
                m.w,
                m.h,
                m.color.hex()
            ));
        }

        for z in self.zones.iter() {
            svg.push_str(&format!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" rx="{ZONE_RADIUS}" fill="#ffffff" stroke="#000000" stroke-width="{ZONE_BORDER}"/>"##,
                z.x, z.y, z.w, z.h
            ));
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="Arial" font-weight="bold" font-size="50" text-anchor="middle" fill="black">{}</text>"#,
                z.x as f32 + z.w as f32 / 2.0,
                z.y as f32 + z.h as f32 / 2.0 + 15.0,
                escape_xml(&z.label)
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// One character per grid position: dark modules as '█', light ones as '░' and reserved
    /// positions as blanks.
    pub fn to_str(&self) -> String {
        let (sx, sy) = (self.geo.stride_x(), self.geo.stride_y());
        let x_end = self.geo.width.saturating_sub(INSET);
        let y_end = self.geo.height.saturating_sub(INSET);

        let mut modules = self.modules.iter().peekable();
        let mut res = String::new();
        for y in (INSET..y_end).step_by(sy as usize) {
            for x in (INSET..x_end).step_by(sx as usize) {
                match modules.next_if(|m| (m.x, m.y) == (x, y)) {
                    Some(m) => res.push(m.color.select('█', '░')),
                    None => res.push(' '),
                }
            }
            res.push('\n');
        }
        res
    }
}

// Fills a rectangle whose corners are rounded with radius r
fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    r: u32,
    color: Rgba<u8>,
) {
    if w == 0 || h == 0 {
        return;
    }

    let r = r.min((w - 1) / 2).min((h - 1) / 2);
    if r == 0 {
        draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
        return;
    }

    let ri = r as i32;
    if w > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x + ri, y).of_size(w - 2 * r, h), color);
    }
    if h > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x, y + ri).of_size(w, h - 2 * r), color);
    }

    let (x1, y1) = (x + w as i32 - 1 - ri, y + h as i32 - 1 - ri);
    for center in [(x + ri, y + ri), (x1, y + ri), (x + ri, y1), (x1, y1)] {
        draw_filled_circle_mut(canvas, center, ri, color);
    }
}

fn escape_xml(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            _ => res.push(c),
        }
    }
    res
}

#[cfg(test)]
mod render_tests {
    use image::{Rgba, RgbaImage};

    use super::{escape_xml, fill_rounded_rect, LabelPainter};
    use crate::codec::Codec;
    use crate::common::{Color, Geometry, Zone, DARK, LIGHT, PAPER};
    use crate::CodecBuilder;

    #[test]
    fn test_rounded_rect_corners() {
        let mut canvas = RgbaImage::from_pixel(20, 20, PAPER);
        fill_rounded_rect(&mut canvas, 2, 2, 16, 7, 3, DARK);
        // Corner pixel is cut, edges and center are filled
        assert_eq!(*canvas.get_pixel(2, 2), PAPER);
        assert_eq!(*canvas.get_pixel(10, 2), DARK);
        assert_eq!(*canvas.get_pixel(2, 5), DARK);
        assert_eq!(*canvas.get_pixel(10, 5), DARK);
        assert_eq!(*canvas.get_pixel(17, 8), PAPER);
        assert_eq!(*canvas.get_pixel(18, 5), PAPER);
    }

    #[test]
    fn test_module_centers_carry_color() {
        let codec = Codec::default();
        let sym = codec.encode("center");
        let img = sym.to_image();
        for m in sym.modules() {
            let (cx, cy) = codec.geometry().center_of(m.x, m.y);
            let exp: Rgba<u8> = m.color.into();
            assert_eq!(*img.get_pixel(cx, cy), exp);
        }
    }

    #[test]
    fn test_zone_is_payload_independent() {
        let codec = Codec::default();
        let a = codec.encode("alpha").to_image();
        let b = codec.encode("a completely different payload").to_image();
        for z in codec.zones() {
            for y in z.y - 2..z.y + z.h + 2 {
                for x in z.x - 2..z.x + z.w + 2 {
                    assert_eq!(a.get_pixel(x, y), b.get_pixel(x, y));
                }
            }
            // Border and interior
            assert_eq!(*a.get_pixel(z.x + z.w / 2, z.y), DARK);
            assert_eq!(*a.get_pixel(z.x + z.w / 2, z.y + z.h / 2), PAPER);
        }
    }

    #[test]
    fn test_background_outside_modules() {
        let img = Codec::default().encode("bg").to_image();
        assert_eq!(*img.get_pixel(0, 0), PAPER);
        assert_eq!(*img.get_pixel(999, 1199), PAPER);
        // Horizontal gap between the first two modules
        assert_eq!(*img.get_pixel(45, 28), PAPER);
    }

    struct Marker;

    impl LabelPainter for Marker {
        fn paint_label(&self, canvas: &mut RgbaImage, zone: &Zone) {
            canvas.put_pixel(zone.x + zone.w / 2, zone.y + zone.h / 2, LIGHT);
        }
    }

    #[test]
    fn test_label_painter_is_invoked() {
        let sym = Codec::default().encode("labels");
        let img = sym.to_image_with(&Marker);
        for z in sym.zones() {
            assert_eq!(*img.get_pixel(z.x + z.w / 2, z.y + z.h / 2), LIGHT);
        }
    }

    #[test]
    fn test_svg() {
        let codec = CodecBuilder::new()
            .geometry(Geometry::new(100, 80, 16, 7, 10, 15))
            .zones(vec![Zone::new("A&B", 60, 40, 20, 20)])
            .build()
            .unwrap();
        let sym = codec.encode("");
        let svg = sym.to_svg();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80""#));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"rx="3""#).count(), sym.modules().len());
        let first = sym.modules()[0];
        assert!(svg.contains(&format!(
            r#"<rect x="{}" y="{}" width="16" height="7" rx="3" fill="{}"/>"#,
            first.x,
            first.y,
            first.color.hex()
        )));
        assert!(svg.contains(r#"stroke-width="4""#));
        assert!(svg.contains(">A&amp;B</text>"));
    }

    #[test]
    fn test_svg_label_centered() {
        let svg = Codec::default().encode("").to_svg();
        assert!(svg.contains(r#"<text x="90" y="115" "#));
        // FZX is 175 wide
        assert!(svg.contains(r#"<text x="552.5" y="615" "#));
    }

    #[test]
    fn test_to_str() {
        let codec = CodecBuilder::new()
            .geometry(Geometry::new(120, 100, 16, 7, 10, 15))
            .zones(vec![Zone::new("Z", 70, 60, 10, 10)])
            .build()
            .unwrap();
        let sym = codec.encode("");
        let s = sym.to_str();
        let lines: Vec<_> = s.lines().collect();
        // x 25, 51, 77; y 25, 47, 69
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() == 3));
        assert_eq!(s.chars().filter(|&c| c == ' ').count(), 9 - sym.modules().len());
        let first = sym.modules()[0].color.select('█', '░');
        assert_eq!(lines[0].chars().next(), Some(first));
        assert_eq!(Color::Dark.select('█', '░'), '█');
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}
