mod symbol;

pub use symbol::{LabelPainter, Module, NoLabels, Symbol};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::codec::Codec;
use crate::common::{pack, CodecError, CodecResult, Color, Geometry, Zone, DEFAULT_MARKER};

// Codec builder
//------------------------------------------------------------------------------

pub struct CodecBuilder {
    geo: Geometry,
    zones: Vec<Zone>,
    marker: String,
}

impl CodecBuilder {
    pub fn new() -> Self {
        Self { geo: Geometry::default(), zones: Zone::reference(), marker: DEFAULT_MARKER.into() }
    }

    pub fn geometry(&mut self, geo: Geometry) -> &mut Self {
        self.geo = geo;
        self
    }

    pub fn zones(&mut self, zones: Vec<Zone>) -> &mut Self {
        self.zones = zones;
        self
    }

    pub fn zone(&mut self, zone: Zone) -> &mut Self {
        self.zones.push(zone);
        self
    }

    pub fn clear_zones(&mut self) -> &mut Self {
        self.zones.clear();
        self
    }

    pub fn marker(&mut self, marker: &str) -> &mut Self {
        self.marker = marker.to_string();
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Geometry: {}, Zones: {}, Marker: {:?} }}",
            self.geo,
            self.zones.len(),
            self.marker
        )
    }

    pub fn build(&self) -> CodecResult<Codec> {
        debug!("Building codec {}", self.metadata());
        if !self.geo.is_valid() {
            return Err(CodecError::InvalidGeometry);
        }
        if self.marker.is_empty() {
            return Err(CodecError::EmptyMarker);
        }

        let codec = Codec::from_parts(self.geo, self.zones.clone(), self.marker.clone());
        if codec.cells().is_empty() {
            return Err(CodecError::NoDataCells);
        }

        debug!("Codec ready with {} data cells", codec.capacity());
        Ok(codec)
    }
}

impl Default for CodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}


// Encoder
//------------------------------------------------------------------------------

impl Codec {
    /// Assigns a color to every data cell. The packed payload is repeated from the start when it
    /// is shorter than the grid and silently wraps when it is longer.
    pub fn encode(&self, text: &str) -> Symbol {
        debug!("Packing {} bytes of text", text.len());
        let bits = pack(text, self.marker());
        if bits.len() > self.capacity() {
            warn!(
                "Payload of {} bits exceeds grid capacity of {} bits, tail will be lost",
                bits.len(),
                self.capacity()
            );
        }

        debug!("Assigning {} bits to {} data cells", bits.len(), self.capacity());
        let geo = self.geometry();
        let modules = self
            .cells()
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                Module::new(x, y, geo.module_w, geo.module_h, Color::from_bit(bits.get_cyclic(i)))
            })
            .collect();

        Symbol::new(*geo, self.zones().to_vec(), modules)
    }

    /// Paints the code for `text` onto `canvas`, which must be exactly the codec's canvas size.
    pub fn render_into(&self, canvas: &mut RgbaImage, text: &str) {
        debug_assert_eq!(
            canvas.dimensions(),
            (self.geometry().width, self.geometry().height),
            "Canvas dimensions must match codec geometry"
        );
        self.encode(text).paint(canvas, &NoLabels);
    }
}
