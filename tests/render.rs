use orbitview::raster::{draw_marker, footprint};
use orbitview::render::build_stars;
use orbitview::{
    fill_sphere, render_frame, Body, Camera, PixelBuffer, Projection, Rgba, Settings, Shader,
    Vec3, View,
};

/// Camera 100 units in front of the origin, no rotation, unit scales.
fn test_view() -> View {
    View {
        camera: Camera::new(Vec3::new(0.0, 0.0, -100.0), 0.0, 0.0),
        light: Vec3::new(0.0, 0.0, 1000.0),
        scale: 1.0,
        radius_scale: 1.0,
        projection: Projection::new(200, 200),
        shader: Shader::default(),
    }
}

fn sphere(x: f64, y: f64, z: f64, radius: f64, color: Rgba) -> Body {
    Body {
        name: "s".to_string(),
        position: Vec3::new(x, y, z),
        velocity: Vec3::ZERO,
        radius,
        mass: 1.0,
        color,
    }
}

fn count_non_black(buf: &PixelBuffer) -> usize {
    let black = Rgba::BLACK.to_packed();
    buf.pixels().iter().filter(|&&p| p != black).count()
}

// ==================================================================================
// Projection
// ==================================================================================

#[test]
fn deeper_points_shrink() {
    let view = test_view();
    let mut prev_factor = f64::MAX;
    let mut prev_radius = f64::MAX;
    for i in 0..50 {
        let depth = 1.0 + i as f64 * 37.5;
        let f = view.projection.perspective_factor(depth);
        let r = view.screen_radius(10.0, depth);
        assert!(f < prev_factor, "factor not decreasing at depth {depth}");
        assert!(r < prev_radius, "radius not decreasing at depth {depth}");
        prev_factor = f;
        prev_radius = r;
    }
}

#[test]
fn scale_reaches_both_position_and_radius() {
    let mut view = test_view();
    view.scale = 1e-5;
    view.radius_scale = 300.0;
    view.camera.position = Vec3::new(0.0, 0.0, -9610.0);

    let cam = view.world_to_camera(Vec3::new(384_400_000.0, 0.0, 0.0));
    assert!((cam.x - 3844.0).abs() < 1e-6);
    assert!((cam.z - 9610.0).abs() < 1e-6);

    let f = 500.0 / (500.0 + 9610.0);
    let r = view.screen_radius(1_737_000.0, cam.z);
    assert!((r - 17.37 * 300.0 * f).abs() < 1e-6);
}

#[test]
fn camera_rotation_moves_the_projection() {
    let mut view = test_view();
    let p = Vec3::new(20.0, 0.0, 0.0);
    let before = view.project_to_screen(view.world_to_camera(p));
    view.camera.rotate(0.3, 0.0);
    let after = view.project_to_screen(view.world_to_camera(p));
    assert!((before.x - after.x).abs() > 1.0);
}

// ==================================================================================
// Shading
// ==================================================================================

#[test]
fn shading_stays_between_ambient_and_base() {
    let shader = Shader::default();
    let base = Rgba::new(255, 131, 7, 0x42);
    let dirs = [-1.0, -0.5, 0.0, 0.3, 1.0];
    for &nx in &dirs {
        for &ny in &dirs {
            for &nz in &dirs {
                for &lx in &dirs {
                    for &lz in &dirs {
                        let n = Vec3::new(nx, ny, nz);
                        let l = Vec3::new(lx, 0.7, lz);
                        let out = shader.shade(base, n, l);
                        for (c, o) in [(base.r, out.r), (base.g, out.g), (base.b, out.b)] {
                            assert!(o <= c);
                            assert!(o as f64 >= (shader.ambient * c as f64).floor());
                        }
                        assert_eq!(out.a, base.a);
                    }
                }
            }
        }
    }
}

// ==================================================================================
// Rasterizer
// ==================================================================================

#[test]
fn sphere_covers_its_disc() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    let body = sphere(0.0, 0.0, 0.0, 12.0, Rgba::WHITE);

    assert!(fill_sphere(&mut buf, &body, &view));

    // depth 100: factor 500/600, radius 10 px, centered
    let fp = footprint(&body, &view).unwrap();
    assert_eq!((fp.center.x, fp.center.y), (100.0, 100.0));
    assert!((fp.radius - 10.0).abs() < 1e-9);

    let lit = count_non_black(&buf);
    let area = std::f64::consts::PI * 100.0;
    assert!((lit as f64 - area).abs() < 0.15 * area, "lit {lit}");

    assert_ne!(buf.get(100, 100), Some(Rgba::BLACK));
    assert_ne!(buf.get(110, 100), Some(Rgba::BLACK));
    assert_eq!(buf.get(111, 100), Some(Rgba::BLACK));
    assert_eq!(buf.get(100, 89), Some(Rgba::BLACK));
}

#[test]
fn center_pixel_uses_outward_normal() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    let body = sphere(0.0, 0.0, 0.0, 12.0, Rgba::new(200, 100, 40, 0xFF));
    fill_sphere(&mut buf, &body, &view);

    let want = view
        .shader
        .shade(body.color, Vec3::new(0.0, 0.0, 1.0), view.light_direction(body.position));
    assert_eq!(buf.get(100, 100), Some(want));
    // the light sits straight down +z, so the center is fully lit
    assert_eq!(want, body.color);
}

#[test]
fn light_on_the_camera_side_leaves_only_ambient() {
    // normals point away from the camera while the light direction stays in world space
    let mut view = test_view();
    view.light = Vec3::new(0.0, 0.0, -1000.0);
    let mut buf = PixelBuffer::new(200, 200);
    let body = sphere(0.0, 0.0, 0.0, 12.0, Rgba::WHITE);
    fill_sphere(&mut buf, &body, &view);
    assert_eq!(buf.get(100, 100), Some(Rgba::new(25, 25, 25, 0xFF)));
    assert_eq!(buf.get(105, 103), Some(Rgba::new(25, 25, 25, 0xFF)));
}

#[test]
fn body_behind_camera_is_culled() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    let body = sphere(0.0, 0.0, -150.0, 30.0, Rgba::WHITE);
    assert!(footprint(&body, &view).is_none());
    assert!(!fill_sphere(&mut buf, &body, &view));
    assert_eq!(count_non_black(&buf), 0);

    // just inside the near plane is still culled
    let near = sphere(0.0, 0.0, -99.5, 1.0, Rgba::WHITE);
    assert!(!fill_sphere(&mut buf, &near, &view));
}

#[test]
fn off_screen_pixels_are_dropped() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    // center projects to x = -20, radius 50 px: only the right part lands in the buffer
    let body = sphere(-144.0, 0.0, 0.0, 60.0, Rgba::WHITE);
    assert!(fill_sphere(&mut buf, &body, &view));
    assert!(count_non_black(&buf) > 0);
    assert_eq!(buf.get(0, 100).map(|c| c == Rgba::BLACK), Some(false));
    assert_eq!(buf.get(31, 100), Some(Rgba::BLACK));

    buf.put(-1, 5, Rgba::WHITE);
    buf.put(200, 5, Rgba::WHITE);
    buf.put(5, 200, Rgba::WHITE);
    assert_eq!(buf.get(-1, 5), None);
}

#[test]
fn huge_close_sphere_is_clipped_to_the_buffer() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    let body = sphere(0.0, 0.0, -98.0, 1.0e6, Rgba::WHITE);
    assert!(fill_sphere(&mut buf, &body, &view));
    assert_eq!(count_non_black(&buf), 200 * 200);
}

// ==================================================================================
// Frame composition
// ==================================================================================

#[test]
fn frame_clears_then_draws_each_visible_body() {
    let view = test_view();
    let mut buf = PixelBuffer::new(200, 200);
    buf.clear(Rgba::WHITE);

    let bodies = vec![
        sphere(-50.0, 0.0, 0.0, 6.0, Rgba::WHITE),
        sphere(50.0, 0.0, 0.0, 6.0, Rgba::WHITE),
        sphere(0.0, 0.0, -500.0, 6.0, Rgba::WHITE),
    ];
    let drawn = render_frame(&mut buf, &bodies, &[], &view, false);
    assert_eq!(drawn, 2);
    assert_eq!(buf.get(0, 0), Some(Rgba::BLACK));
    assert_ne!(buf.get(100 - 42, 100), Some(Rgba::BLACK));
    assert_ne!(buf.get(100 + 42, 100), Some(Rgba::BLACK));
}

#[test]
fn markers_sit_on_the_projected_center() {
    let mut view = test_view();
    view.radius_scale = 0.0;
    let mut buf = PixelBuffer::new(200, 200);
    let bodies = vec![sphere(0.0, 0.0, 0.0, 5.0, Rgba::WHITE)];

    // zero radius draws no disc, only the marker
    let drawn = render_frame(&mut buf, &bodies, &[], &view, true);
    assert_eq!(drawn, 0);
    assert_eq!(count_non_black(&buf), 16);
    assert_eq!(buf.get(98, 98), Some(Rgba::MARKER));
    assert_eq!(buf.get(101, 101), Some(Rgba::MARKER));

    let mut plain = PixelBuffer::new(10, 10);
    draw_marker(&mut plain, Vec3::new(0.0, 0.0, 1.0), Rgba::MARKER);
    assert_eq!(count_non_black(&plain), 4);
}

#[test]
fn markers_for_far_off_screen_bodies_are_dropped() {
    let bodies = orbitview::scenario::parse_scenario(
        r#"{ "bodies": [
            { "position": [1e30, 0, 0], "radius": 6371000, "mass": 1 },
            { "position": [-1e30, 0, 0], "radius": 6371000, "mass": 1 }
        ] }"#,
    )
    .unwrap();
    let settings = Settings::default();
    let view = settings.view();

    // centers are finite but far outside any i64-addressable pixel
    let fp = footprint(&bodies[0], &view).unwrap();
    assert!(fp.center.x > 1e20);

    let mut buf = PixelBuffer::new(settings.width, settings.height);
    render_frame(&mut buf, &bodies, &[], &view, true);
    assert_eq!(count_non_black(&buf), 0);

    buf.fill_rect(i64::MAX - 1, 0, 4, 4, Rgba::MARKER);
    buf.fill_rect(i64::MIN, i64::MIN, 4, 4, Rgba::MARKER);
    assert_eq!(count_non_black(&buf), 0);
    buf.fill_rect(-2, -2, 4, 4, Rgba::MARKER);
    assert_eq!(count_non_black(&buf), 4);
}

#[test]
fn stars_are_seeded_and_in_bounds() {
    let a = build_stars(300, 200, 100, 7);
    let b = build_stars(300, 200, 100, 7);
    assert_eq!(a, b);
    assert!(a.iter().all(|s| s.x < 300 && s.y < 200));
    assert!(build_stars(0, 200, 100, 7).is_empty());

    let mut buf = PixelBuffer::new(300, 200);
    let drawn = render_frame(&mut buf, &[], &a, &test_view(), false);
    assert_eq!(drawn, 0);
    assert!(count_non_black(&buf) > 0);
}

#[test]
fn default_scene_draws_both_bodies() {
    let settings = Settings::default();
    let view = settings.view();
    let mut buf = PixelBuffer::new(settings.width, settings.height);
    let bodies = orbitview::scenario::earth_moon();
    assert_eq!(render_frame(&mut buf, &bodies, &[], &view, false), 2);
}
