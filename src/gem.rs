//! Procedural renderer for the Sparkleboop gem emblem.
//!
//! Every pixel is a pure function of its coordinates and the icon size: a
//! rounded-rectangle canvas with a vertical gradient and a soft glow, a
//! faceted diamond in the middle, and a specular highlight on its upper right.
//! A second pass then stamps small star-shaped accents around the gem.

use crate::error::{IconError, Result};
use crate::png;
use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Canvas
const BG_TOP: Rgba<u8> = Rgba([48, 10, 80, 255]);
const BG_BOTTOM: Rgba<u8> = Rgba([20, 5, 45, 255]);
const GLOW: Rgba<u8> = Rgba([80, 30, 120, 255]);

// Gem
const GEM_HIGHLIGHT: Rgba<u8> = Rgba([255, 200, 240, 255]);
const GEM_TOP: Rgba<u8> = Rgba([255, 100, 180, 255]);
const GEM_MID: Rgba<u8> = Rgba([220, 50, 140, 255]);
const GEM_BOTTOM: Rgba<u8> = Rgba([180, 30, 100, 255]);
const FACET_GLEAM: Rgba<u8> = Rgba([255, 220, 245, 255]);
const FACET_LIGHT: Rgba<u8> = Rgba([255, 150, 210, 255]);

/// Amount subtracted from R, G and B on the shaded left facet
/// (a 0.15 darkening of 60, 60 and 40 levels).
const LEFT_FACET_SHADE: [u8; 3] = [9, 9, 6];

/// Normalized centers of the accent sparkles drawn after the main pass.
const ACCENTS: [(f64, f64); 6] = [
    (0.22, 0.25),
    (0.78, 0.30),
    (0.18, 0.70),
    (0.82, 0.65),
    (0.35, 0.15),
    (0.70, 0.80),
];

/// Linear interpolation between two channel values, truncated toward zero.
pub fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + (b - a) * t) as u8
}

/// Blend two colors channel by channel, alpha included.
pub fn blend(from: Rgba<u8>, to: Rgba<u8>, t: f64) -> Rgba<u8> {
    Rgba(std::array::from_fn(|i| lerp(from.0[i], to.0[i], t)))
}

fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2)).sqrt()
}

/// Axis-aligned rectangle with circular corners of the given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub radius: f64,
}

impl RoundedRect {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        if px < self.x1 || px > self.x2 || py < self.y1 || py > self.y2 {
            return false;
        }

        let left = self.x1 + self.radius;
        let right = self.x2 - self.radius;
        let top = self.y1 + self.radius;
        let bottom = self.y2 - self.radius;

        let in_corner_column = px < left || px > right;
        let in_corner_row = py < top || py > bottom;
        if !(in_corner_column && in_corner_row) {
            return true;
        }

        // Inside a corner square: test against that corner's arc.
        let arc_x = if px < left { left } else { right };
        let arc_y = if py < top { top } else { bottom };
        distance(px, py, arc_x, arc_y) <= self.radius
    }
}

/// Rhombus centered on `(cx, cy)` with the given full width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diamond {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

impl Diamond {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = (px - self.cx).abs() / (self.width / 2.0);
        let dy = (py - self.cy).abs() / (self.height / 2.0);
        dx + dy <= 1.0
    }
}

/// Canvas mask for an icon of the given edge length.
pub fn canvas(size: u32) -> RoundedRect {
    let s = f64::from(size);
    let margin = s * 0.02;
    RoundedRect {
        x1: margin,
        y1: margin,
        x2: s - 1.0 - margin,
        y2: s - 1.0 - margin,
        radius: s * 0.18,
    }
}

/// Outline of the gem for an icon of the given edge length.
pub fn gem(size: u32) -> Diamond {
    let s = f64::from(size);
    let center = s / 2.0;
    Diamond {
        cx: center,
        cy: center * 0.95,
        width: s * 0.52,
        height: s * 0.58,
    }
}

/// Size-dependent geometry shared by every pixel of one icon.
struct Layout {
    size: f64,
    canvas: RoundedRect,
    gem: Diamond,
    sparkle_x: f64,
    sparkle_y: f64,
    sparkle_radius: f64,
}

impl Layout {
    fn new(size: u32) -> Self {
        let s = f64::from(size);
        let gem = gem(size);
        Self {
            size: s,
            canvas: canvas(size),
            gem,
            sparkle_x: gem.cx + s * 0.1,
            sparkle_y: gem.cy - s * 0.15,
            sparkle_radius: s * 0.04,
        }
    }

    fn shade(&self, x: u32, y: u32) -> Rgba<u8> {
        let (px, py) = (f64::from(x), f64::from(y));
        if !self.canvas.contains(px, py) {
            return TRANSPARENT;
        }

        let (nx, ny) = (px / self.size, py / self.size);
        let mut color = blend(BG_TOP, BG_BOTTOM, ny);

        let glow = distance(nx, ny, 0.5, 0.45) / 0.5;
        if glow < 1.0 {
            color = blend(color, GLOW, ((1.0 - glow) * 0.4).max(0.0));
        }

        if self.gem.contains(px, py) {
            color = self.shade_gem(px, py);
        }

        let sd = distance(px, py, self.sparkle_x, self.sparkle_y);
        if sd < self.sparkle_radius {
            let t = 1.0 - sd / self.sparkle_radius;
            color = blend(color, WHITE, t * 0.9);
        }

        color
    }

    fn shade_gem(&self, px: f64, py: f64) -> Rgba<u8> {
        let gem = self.gem;
        let half_w = gem.width / 2.0;
        let half_h = gem.height / 2.0;

        let local_y = ((py - (gem.cy - half_h)) / gem.height).clamp(0.0, 1.0);
        let mut color = if local_y < 0.35 {
            blend(GEM_HIGHLIGHT, GEM_TOP, local_y / 0.35)
        } else if local_y < 0.65 {
            blend(GEM_TOP, GEM_MID, (local_y - 0.35) / 0.3)
        } else {
            blend(GEM_MID, GEM_BOTTOM, (local_y - 0.65) / 0.35)
        };

        let rx = (px - gem.cx) / half_w;
        let ry = (py - gem.cy) / half_h;

        // Crown
        if ry < 0.0 && rx.abs() < 0.3 - ry * 0.3 {
            color = blend(color, FACET_GLEAM, 0.3);
        }

        // Shaded left flank
        if rx < -0.1 && ry.abs() < 0.5 {
            let [dr, dg, db] = LEFT_FACET_SHADE;
            color = Rgba([
                color[0].saturating_sub(dr),
                color[1].saturating_sub(dg),
                color[2].saturating_sub(db),
                255,
            ]);
        }

        // Girdle
        if (ry - 0.05).abs() < 0.03 {
            color = blend(color, FACET_LIGHT, 0.5);
        }

        // Crown edges
        if (rx + ry * 0.8).abs() < 0.04 && ry < 0.05 {
            color = blend(color, FACET_LIGHT, 0.4);
        }
        if (rx - ry * 0.8).abs() < 0.04 && ry < 0.05 {
            color = blend(color, FACET_LIGHT, 0.4);
        }

        // Pavilion edges
        if (rx * 0.6 + ry * 0.5 - 0.05).abs() < 0.04 && ry > 0.05 {
            color = blend(color, FACET_LIGHT, 0.3);
        }
        if (rx * 0.6 - ry * 0.5 + 0.05).abs() < 0.04 && ry > 0.05 {
            color = blend(color, FACET_LIGHT, 0.3);
        }

        color
    }
}

/// Whether offset `(dx, dy)` from an accent center belongs to its star shape:
/// a square core of half-width `r` plus a thin cross reaching out to `2r`.
fn in_accent_shape(dx: i64, dy: i64, r: i64) -> bool {
    let (adx, ady) = (dx.abs(), dy.abs());
    if adx <= r && ady <= r {
        return true;
    }
    (adx <= 1 && ady <= r * 2) || (ady <= 1 && adx <= r * 2)
}

fn overlay_accents(img: &mut RgbaImage, size: u32) {
    let s = f64::from(size);
    let edge = i64::from(size);
    let r = ((s * 0.015) as i64).max(1);
    let reach = r * 3;

    for &(sx, sy) in &ACCENTS {
        let (ax, ay) = ((sx * s) as i64, (sy * s) as i64);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (px, py) = (ax + dx, ay + dy);
                if px < 0 || px >= edge || py < 0 || py >= edge {
                    continue;
                }
                let pixel = img.get_pixel_mut(px as u32, py as u32);
                // Accents stay inside the canvas.
                if pixel[3] == 0 || !in_accent_shape(dx, dy, r) {
                    continue;
                }
                let d = ((dx * dx + dy * dy) as f64).sqrt() / reach as f64;
                let t = (1.0 - d).max(0.0) * 0.7;
                *pixel = blend(*pixel, WHITE, t);
            }
        }
    }
}

/// Render the gem icon as a `size`×`size` RGBA buffer.
///
/// Fails with [`IconError::InvalidSize`] for a zero size, or one whose pixel
/// buffer would not be addressable, before anything is allocated.
pub fn synthesize(size: u32) -> Result<RgbaImage> {
    let addressable = (size as usize)
        .checked_mul(size as usize)
        .and_then(|n| n.checked_mul(4))
        .is_some();
    if size == 0 || !addressable {
        return Err(IconError::InvalidSize(size));
    }

    let layout = Layout::new(size);
    let mut img = RgbaImage::new(size, size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = layout.shade(x, y);
    }
    overlay_accents(&mut img, size);

    log::debug!("synthesized {size}x{size} gem icon");
    Ok(img)
}

/// Render the gem icon and encode it as PNG bytes.
pub fn render_icon(size: u32) -> Result<Vec<u8>> {
    let img = synthesize(size)?;
    png::encode_image(&img)
}
