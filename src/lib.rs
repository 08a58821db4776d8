//! # gridmark
//!
//! A Rust library for generating and reading branded module-grid codes. Text is packed into a
//! fixed-size canvas of small two-colored modules that flow around a handful of reserved
//! branding zones, and recovered later by sampling an image of that canvas.
//!
//! ## Features
//!
//! - **Code Generation**: Turn any UTF-8 text into a deterministic grid of dark and light modules
//! - **Code Reading**: Sample stills, video frames or raw RGBA buffers of any resolution
//! - **Reserved Zones**: Keep logo areas free of data with a fixed safety margin
//! - **Export**: Raster (`image`), SVG and terminal previews from the same module list
//!
//! ## Quick Start
//!
//! ### Generating a code
//!
//! ```rust
//! use gridmark::Codec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reference layout: 1000x1200 canvas with four branding zones and the `<END>` marker
//! let codec = Codec::default();
//!
//! let symbol = codec.encode("Hello, World!");
//! let img = symbol.to_image();
//! assert_eq!(img.dimensions(), (1000, 1200));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a code
//!
//! ```rust
//! use gridmark::Codec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = Codec::default();
//! let img = codec.encode("Hello, World!").to_image();
//!
//! let text = codec.decode(&img)?;
//! assert_eq!(text, "Hello, World!");
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom layout
//!
//! ```rust
//! use gridmark::{CodecBuilder, Geometry, Zone};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = CodecBuilder::new()
//!     .geometry(Geometry::new(640, 480, 8, 8, 4, 4))
//!     .zones(vec![Zone::new("LOGO", 270, 190, 100, 100)])
//!     .marker("#EOF#")
//!     .build()?;
//!
//! assert!(codec.fits("short message"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! Modules are placed on a fixed lattice scanned row by row, starting 25 px in from the top-left
//! corner. A lattice cell that comes within 10 px of a reserved zone is skipped and does not
//! consume a bit. The payload is the UTF-8 text followed by the end marker, 8 bits per byte with
//! the most significant bit first, repeated until every module has a color.
//!
//! There is no error correction: the end marker is the only integrity check, and a frame whose
//! samples don't contain it is reported as [`CodecError::NoMarkerFound`].

pub mod builder;
mod codec;
pub(crate) mod common;
pub mod reader;

pub use builder::{CodecBuilder, LabelPainter, Module, NoLabels, Symbol};
pub use codec::Codec;
pub use common::{
    compute_data_cells, pack, unpack, BitStream, CellIter, CodecError, CodecResult, Color,
    Geometry, SampleFault, Zone, DEFAULT_MARKER, INSET, ZONE_BUFFER,
};
pub use reader::{PixelSource, RawFrame, Scan, Scanner, DARK_THRESHOLD};
