use anyhow::Result;
use sparkleboop_icon::{icon_gen, DensityTable};
use std::path::PathBuf;

/// Resource directory of the Android app module, relative to the project root.
const DEFAULT_RES_DIR: &str = "android/app/src/main/res";

fn main() -> Result<()> {
    env_logger::init();

    // Positional only: [RES_DIR] [DENSITIES_JSON]
    let mut args = std::env::args_os().skip(1);
    let res_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RES_DIR));
    let densities = match args.next() {
        Some(path) => DensityTable::from_path(&PathBuf::from(path))?,
        None => DensityTable::defaults()?,
    };

    icon_gen::generate_icons(&res_dir, &densities)
}
