//! Zoomfolder application icon generator.
//!
//! Produces a procedural icon: three icicle rows of shrinking coloured bars
//! on a dark rounded tile, rendered at any resolution as RGBA pixels.

/// Row bands as `(top, bottom)` fractions of the icon height.
const ROWS: [(f32, f32); 3] = [(0.16, 0.38), (0.42, 0.64), (0.68, 0.90)];

/// Bars per row as `(left, right, colour)` fractions of the icon width.
const BARS: [&[(f32, f32, [u8; 3])]; 3] = [
    &[(0.12, 0.60, [0, 188, 176]), (0.62, 0.88, [255, 87, 80])],
    &[
        (0.12, 0.40, [30, 136, 229]),
        (0.42, 0.60, [255, 179, 0]),
        (0.62, 0.78, [126, 87, 194]),
    ],
    &[
        (0.12, 0.26, [124, 179, 66]),
        (0.28, 0.40, [236, 64, 122]),
        (0.42, 0.52, [56, 189, 248]),
        (0.62, 0.70, [255, 109, 0]),
    ],
];

const TILE: [u8; 3] = [36, 36, 54];

/// Generate the icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    egui::IconData {
        rgba: render_icon(size),
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let corner = s * 0.18;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    for y in 0..size {
        for x in 0..size {
            let px = (x as f32 + 0.5) / s;
            let py = (y as f32 + 0.5) / s;
            let coverage = tile_coverage(x as f32 + 0.5, y as f32 + 0.5, s, corner);
            if coverage <= 0.0 {
                continue;
            }

            let colour = ROWS
                .iter()
                .zip(BARS.iter())
                .find(|((top, bottom), _)| py >= *top && py < *bottom)
                .and_then(|(_, bars)| {
                    bars.iter()
                        .find(|(left, right, _)| px >= *left && px < *right)
                        .map(|(_, _, c)| *c)
                })
                .unwrap_or(TILE);

            let i = ((y * size + x) * 4) as usize;
            pixels[i..i + 3].copy_from_slice(&colour);
            pixels[i + 3] = (coverage * 255.0) as u8;
        }
    }
    pixels
}

/// Anti-aliased coverage of a rounded square tile at pixel centre `(x, y)`.
fn tile_coverage(x: f32, y: f32, size: f32, corner: f32) -> f32 {
    let cx = x.clamp(corner, size - corner);
    let cy = y.clamp(corner, size - corner);
    let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
    (corner - dist + 0.5).clamp(0.0, 1.0)
}
