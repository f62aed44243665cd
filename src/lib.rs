//! sparkleboop-icon - procedural launcher icon generator
//!
//! Renders the Sparkleboop gem emblem at any edge length and encodes it as a
//! PNG, then lays the results out in an Android `res/` tree, one
//! `mipmap-*/ic_launcher.png` per screen density.

pub mod densities;
pub mod error;
pub mod gem;
pub mod icon_gen;
pub mod png;

pub use densities::{Density, DensityTable};
pub use error::{IconError, Result};
pub use gem::{render_icon, synthesize, Diamond, RoundedRect};
pub use png::{encode, encode_image, read_chunks, Chunk, Header, PngWriter};
