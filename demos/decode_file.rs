use std::error::Error;

use gridmark::{Codec, CodecError};

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "./gridmark.png".to_string());
    let codec = Codec::default();

    match codec.decode_file(&path) {
        Ok(text) => println!("Decoded message: {text}"),
        Err(CodecError::NoMarkerFound) => println!("No code found in the image: {path}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
