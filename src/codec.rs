use std::fmt::{Display, Formatter};

use crate::common::{compute_data_cells, Geometry, Zone, DEFAULT_MARKER};

// Codec
// Immutable pairing of geometry, reserved zones and end marker. The data cell layout is derived
// once at construction and shared by every encode and decode call, so a codec value can be used
// from several threads at once.
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    geo: Geometry,
    zones: Vec<Zone>,
    marker: String,
    cells: Vec<(u32, u32)>,
}

impl Codec {
    pub(crate) fn from_parts(geo: Geometry, zones: Vec<Zone>, marker: String) -> Self {
        let cells = compute_data_cells(&geo, &zones);
        Self { geo, zones, marker, cells }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geo
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Data cell coordinates in data index order.
    pub fn cells(&self) -> &[(u32, u32)] {
        &self.cells
    }

    /// Number of bits a single, non-repeated message can occupy.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Whether `text` and the marker fit in the grid without wrapping around.
    pub fn fits(&self, text: &str) -> bool {
        (text.len() + self.marker.len()) << 3 <= self.capacity()
    }
}

impl Default for Codec {
    /// Reference layout: 1000x1200 canvas, four branding zones and the `<END>` marker.
    fn default() -> Self {
        Self::from_parts(Geometry::default(), Zone::reference(), DEFAULT_MARKER.to_string())
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Geometry: {}, Zones: {}, Cells: {}, Marker: {:?} }}",
            self.geo,
            self.zones.len(),
            self.cells.len(),
            self.marker
        )
    }
}
