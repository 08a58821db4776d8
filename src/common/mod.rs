pub mod bitstream;
pub mod error;
pub mod layout;
pub mod metadata;

pub use bitstream::*;
pub use error::*;
pub use layout::*;
pub use metadata::*;
