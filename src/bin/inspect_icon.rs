use anyhow::{Context, Result};
use image::io::Reader as ImageReader;
use sparkleboop_icon::{read_chunks, Header};

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "android/app/src/main/res/mipmap-xxxhdpi/ic_launcher.png".to_string());

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {path}"))?;
    println!("Checking icon: {}", path);
    println!("File size: {} bytes", bytes.len());

    let chunks = read_chunks(&bytes).with_context(|| format!("{path} is not a well-formed PNG"))?;
    println!("\nChunks:");
    for chunk in &chunks {
        println!(
            "  {} {:>8} bytes  crc {:#010x} ✓",
            chunk.tag_str(),
            chunk.data.len(),
            chunk.crc
        );
    }

    let header = chunks
        .first()
        .filter(|chunk| &chunk.tag == b"IHDR")
        .and_then(|chunk| Header::parse(&chunk.data))
        .context("First chunk is not a valid IHDR")?;
    println!(
        "\nHeader: {}x{}, bit depth {}, color type {}, interlace {}",
        header.width, header.height, header.bit_depth, header.color_type, header.interlace
    );

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .context("Failed to decode image")?;
    let rgba_img = img.to_rgba8();

    let total = rgba_img.width() as usize * rgba_img.height() as usize;
    let transparent = rgba_img.pixels().filter(|p| p[3] == 0).count();
    println!("\nCoverage:");
    println!("  {} transparent pixels", transparent);
    println!("  {} visible pixels", total - transparent);

    if (img.width(), img.height()) != (header.width, header.height) {
        anyhow::bail!(
            "Decoded size {}x{} disagrees with IHDR {}x{}",
            img.width(),
            img.height(),
            header.width,
            header.height
        );
    }

    println!("\n✓ Icon looks good!");
    Ok(())
}
