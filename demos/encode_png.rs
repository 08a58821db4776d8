use std::error::Error;

use gridmark::Codec;

fn main() -> Result<(), Box<dyn Error>> {
    // Reference layout with the default `<END>` marker
    let codec = Codec::default();

    let img = codec.encode("Hello, World!").to_image();
    img.save("./gridmark.png")?;

    println!("Code saved to: gridmark.png");
    Ok(())
}
