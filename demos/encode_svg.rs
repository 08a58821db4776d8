use std::error::Error;

use gridmark::{CodecBuilder, Geometry, Zone};

fn main() -> Result<(), Box<dyn Error>> {
    // Smaller canvas with a single centered logo zone
    let codec = CodecBuilder::new()
        .geometry(Geometry::new(640, 480, 8, 8, 4, 4))
        .zones(vec![Zone::new("LOGO", 270, 190, 100, 100)])
        .marker("#EOF#")
        .build()?;

    let data = "Vector export keeps every module sharp";
    if !codec.fits(data) {
        return Err("Data does not fit in the grid".into());
    }

    let symbol = codec.encode(data);
    std::fs::write("./gridmark.svg", symbol.to_svg())?;
    println!("{}", symbol.to_str());

    println!("Code saved to: gridmark.svg");
    Ok(())
}
