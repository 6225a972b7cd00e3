use crate::color::Rgba;
use crate::math::Vec3;
use crate::sim::Body;
use crate::view::View;

/// Row-major grid of packed `0xRRGGBBAA` pixels. Writes outside the grid are dropped.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    w: u32,
    h: u32,
    px: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Rgba::BLACK.to_packed(); (w as usize) * (h as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub fn clear(&mut self, c: Rgba) {
        self.px.fill(c.to_packed());
    }

    pub fn put(&mut self, x: i64, y: i64, c: Rgba) {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return;
        }
        let i = self.idx(x as u32, y as u32);
        self.px[i] = c.to_packed();
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return None;
        }
        Some(Rgba::from_packed(self.px[self.idx(x as u32, y as u32)]))
    }

    /// Clipped to the buffer; any origin is accepted.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, c: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.w as i64);
        let y1 = y.saturating_add(h).min(self.h as i64);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.put(xx, yy, c);
            }
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.px
    }
}

/// 4x4 square centered on a body's projected position.
pub fn draw_marker(buf: &mut PixelBuffer, screen: Vec3, c: Rgba) {
    buf.fill_rect((screen.x - 2.0) as i64, (screen.y - 2.0) as i64, 4, 4, c);
}

/// Where a body lands on screen this frame, or `None` when it is culled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub center: Vec3,
    pub radius: f64,
}

pub fn footprint(body: &Body, view: &View) -> Option<Footprint> {
    let cam = view.world_to_camera(body.position);
    if !view.projection.is_visible(cam) {
        return None;
    }
    let center = view.project_to_screen(cam);
    let radius = view.screen_radius(body.radius, cam.z);
    if !center.is_finite() || !radius.is_finite() {
        return None;
    }
    Some(Footprint { center, radius })
}

/// Rasterize `body` as a lit disc. Returns false when it is culled or has no size.
///
/// The per-pixel normal is the orthographic unit-sphere normal
/// `(dx, -dy, dz) / r`; the light direction stays in world orientation.
pub fn fill_sphere(buf: &mut PixelBuffer, body: &Body, view: &View) -> bool {
    let Some(Footprint { center, radius }) = footprint(body, view) else {
        return false;
    };
    if radius <= 0.0 {
        return false;
    }
    let r2 = radius * radius;
    let to_light = view.light_direction(body.position);

    // bounding box, clipped to the buffer
    let max_x = buf.width() as i64 - 1;
    let max_y = buf.height() as i64 - 1;
    let x0 = ((center.x - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64).min(max_x);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let y1 = ((center.y + radius).ceil() as i64).min(max_y);

    for y in y0..=y1 {
        let dy = y as f64 - center.y;
        for x in x0..=x1 {
            let dx = x as f64 - center.x;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let dz = (r2 - d2).max(0.0).sqrt();
            let normal = Vec3::new(dx / radius, -dy / radius, dz / radius);
            buf.put(x, y, view.shader.shade(body.color, normal, to_light));
        }
    }
    true
}
