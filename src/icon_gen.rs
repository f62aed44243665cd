use crate::densities::{Density, DensityTable};
use crate::gem;
use anyhow::{Context, Result};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// File name of the launcher icon inside every density folder.
pub const LAUNCHER_FILE_NAME: &str = "ic_launcher.png";

/// Render the launcher icon for every density and write it to
/// `<res_dir>/<folder>/ic_launcher.png`.
pub fn generate_icons(res_dir: &Path, densities: &DensityTable) -> Result<()> {
    for density in densities.iter() {
        generate_launcher_icon(res_dir, density)?;
    }

    println!("\nDone! All icons generated.");
    Ok(())
}

fn generate_launcher_icon(res_dir: &Path, density: &Density) -> Result<()> {
    let Density { folder, size } = density;
    println!("Generating {folder}/{LAUNCHER_FILE_NAME} ({size}x{size})...");

    let mipmap_dir = res_dir.join(folder);
    create_dir_all(&mipmap_dir)
        .with_context(|| format!("Can't create directory {}", mipmap_dir.display()))?;

    let png = gem::render_icon(*size)
        .with_context(|| format!("Failed to render {size}x{size} icon for {folder}"))?;

    let output_path = mipmap_dir.join(LAUNCHER_FILE_NAME);
    save_png(&png, &output_path)?;
    println!(
        "  ✓ Generated {folder}/{LAUNCHER_FILE_NAME} ({} bytes)",
        png.len()
    );

    Ok(())
}

fn save_png(png: &[u8], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(png).context("Failed to write PNG")?;
    out.flush().context("Failed to write PNG")?;
    Ok(())
}
