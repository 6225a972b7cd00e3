use crate::color::Rgba;
use crate::raster::{draw_marker, fill_sphere, footprint, PixelBuffer};
use crate::sim::Body;
use crate::view::View;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: u32,
    pub y: u32,
    pub level: u8,
}

pub fn build_stars(w: u32, h: u32, count: usize, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(count);
    if w == 0 || h == 0 {
        return stars;
    }
    for _ in 0..count {
        stars.push(Star {
            x: rng.gen_range(0..w),
            y: rng.gen_range(0..h),
            level: rng.gen_range(60..=200),
        });
    }
    stars
}

/// Clear, backdrop, then each body in list order. Returns how many bodies were drawn.
pub fn render_frame(
    buf: &mut PixelBuffer,
    bodies: &[Body],
    stars: &[Star],
    view: &View,
    markers: bool,
) -> usize {
    buf.clear(Rgba::BLACK);

    for s in stars {
        buf.put(
            s.x as i64,
            s.y as i64,
            Rgba::new(s.level, s.level, s.level, 0xFF),
        );
    }

    let mut drawn = 0;
    for b in bodies {
        if markers {
            if let Some(fp) = footprint(b, view) {
                draw_marker(buf, fp.center, Rgba::MARKER);
            }
        }
        if fill_sphere(buf, b, view) {
            drawn += 1;
        }
    }
    drawn
}
