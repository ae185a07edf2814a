//! Anti-aliased drawing primitives on an RGBA canvas.

use super::{Canvas, Color};

fn set_pixel(canvas: &mut Canvas<'_>, x: i32, y: i32, color: Color, alpha: f32) {
    if x < 0 || y < 0 || x as usize >= canvas.width || y as usize >= canvas.height {
        return;
    }
    let idx = (y as usize * canvas.width + x as usize) * 4;
    let Some(dst) = canvas.frame.get_mut(idx..idx + 4) else {
        return;
    };
    let a = alpha.clamp(0.0, 1.0);
    let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
    let out = [
        blend(color.r, dst[0]),
        blend(color.g, dst[1]),
        blend(color.b, dst[2]),
        0xff,
    ];
    dst.copy_from_slice(&out);
}

pub(super) fn draw_thick_line_aa(
    canvas: &mut Canvas<'_>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thickness: f32,
    color: Color,
) {
    let pad = thickness.ceil() as i32 + 1;
    let min_x = x0.min(x1) - pad;
    let max_x = x0.max(x1) + pad;
    let min_y = y0.min(y1) - pad;
    let max_y = y0.max(y1) + pad;
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let len_sq = dx * dx + dy * dy;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 - x0 as f32;
            let py = y as f32 - y0 as f32;
            // zero-length lines degrade to a dot
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = x0 as f32 + t * dx;
            let ly = y0 as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa);
            }
        }
    }
}

pub(super) fn draw_circle(canvas: &mut Canvas<'_>, cx: i32, cy: i32, radius: f64, color: Color) {
    let extent = radius.ceil() as i32 + 1;
    for y in -extent..=extent {
        for x in -extent..=extent {
            let dist = ((x * x + y * y) as f64).sqrt();
            let aa = (1.0 - (dist - radius).max(0.0)).clamp(0.0, 1.0);
            if aa > 0.0 {
                set_pixel(canvas, cx + x, cy + y, color, aa as f32);
            }
        }
    }
}

pub(super) fn draw_ring(
    canvas: &mut Canvas<'_>,
    cx: i32,
    cy: i32,
    radius: f64,
    thickness: f32,
    color: Color,
) {
    let half = thickness as f64 / 2.0;
    let extent = (radius + half).ceil() as i32 + 1;
    for y in -extent..=extent {
        for x in -extent..=extent {
            let dist = ((x * x + y * y) as f64).sqrt();
            let aa = (1.0 - ((dist - radius).abs() - half).max(0.0)).clamp(0.0, 1.0);
            if aa > 0.0 {
                set_pixel(canvas, cx + x, cy + y, color, aa as f32);
            }
        }
    }
}
