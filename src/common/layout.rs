use super::metadata::{Geometry, Zone, INSET};

// Iterator over data cells of the canvas
// Scans rows top to bottom and, within a row, columns left to right, starting INSET away from
// the top-left corner and stopping before INSET from the far edges. Cells colliding with any
// reserved zone are skipped without consuming a data index. The order is the addressing scheme
// shared by builder and reader; changing it breaks every previously printed code.
//------------------------------------------------------------------------------

#[derive(Clone)]
pub struct CellIter<'a> {
    x: u32,
    y: u32,
    x_end: u32,
    y_end: u32,
    geo: Geometry,
    zones: &'a [Zone],
}

impl<'a> CellIter<'a> {
    pub fn new(geo: Geometry, zones: &'a [Zone]) -> Self {
        let x_end = geo.width.saturating_sub(INSET);
        let y_end = geo.height.saturating_sub(INSET);
        Self { x: INSET, y: INSET, x_end, y_end, geo, zones }
    }

    fn is_reserved(&self, x: u32, y: u32) -> bool {
        self.zones.iter().any(|z| z.collides(x, y, self.geo.module_w, self.geo.module_h))
    }

    fn advance(&mut self) {
        self.x = self.x.saturating_add(self.geo.stride_x());
        if self.x >= self.x_end {
            self.x = INSET;
            self.y = self.y.saturating_add(self.geo.stride_y());
        }
    }
}

impl Iterator for CellIter<'_> {
    type Item = (u32, u32);
    fn next(&mut self) -> Option<Self::Item> {
        while self.y < self.y_end && self.x < self.x_end {
            let (x, y) = (self.x, self.y);
            self.advance();
            if !self.is_reserved(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}

/// Ordered data cell coordinates; the position in the returned vector is the data index.
pub fn compute_data_cells(geo: &Geometry, zones: &[Zone]) -> Vec<(u32, u32)> {
    if !geo.is_valid() {
        return Vec::new();
    }
    CellIter::new(*geo, zones).collect()
}
