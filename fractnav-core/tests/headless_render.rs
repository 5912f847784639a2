use fractnav_core::{
    escape, Complex, CoordinateSystem, EscapeParams, Mandelbrot, PixelRect, UpdateFn,
    ViewportMapper, ZoomHistory,
};

/// Escape every pixel of `screen` over `plane` into a flat row-major Vec.
fn render_grid<F: UpdateFn>(
    screen: &CoordinateSystem<i32>,
    plane: &CoordinateSystem<f64>,
    params: &EscapeParams,
    f: &F,
) -> Vec<u32> {
    let mut out = Vec::with_capacity(screen.size().max(0) as usize);
    for i in screen.y_min()..screen.y_max() {
        for j in screen.x_min()..screen.x_max() {
            let c = ViewportMapper::scale(screen, plane, Complex::new(j as f64, i as f64));
            out.push(escape(c, params, f));
        }
    }
    out
}

#[test]
fn four_by_four_grid_over_the_standard_square() {
    let screen = CoordinateSystem::new(0, 4, 0, 4);
    let plane = CoordinateSystem::new(-2.0, 2.0, -2.0, 2.0);
    let params = EscapeParams::new(50, 2.0).unwrap();

    let grid = render_grid(&screen, &plane, &params, &Mandelbrot);
    assert_eq!(grid.len(), 16);

    // Pixel (2, 2) sits exactly on the origin.
    assert_eq!(grid[2 * 4 + 2], 50);
    // Pixel (0, 0) is (-2, -2).
    assert!(grid[0] <= 5);
    for &n in &grid {
        assert!(n >= 1 && n <= 50);
    }
}

#[test]
fn zoomed_view_stays_consistent_with_history() {
    let screen = CoordinateSystem::new(0, 64, 0, 64);
    let mut plane = CoordinateSystem::new(-2.2, 1.2, -1.7, 1.7);
    let params = EscapeParams::default();

    let (x0, x1, y0, y1) = (plane.x_min(), plane.x_max(), plane.y_min(), plane.y_max());
    plane.zoom(1.0, x0, x1, y0, y1);
    let first = render_grid(&screen, &plane, &params, &Mandelbrot);

    let rect = PixelRect { x1: 16, x2: 48, y1: 16, y2: 48 };
    let target = ViewportMapper::pixel_rect_to_plane(&screen, &plane, rect);
    plane.zoom(1.0, target.x1, target.x2, target.y1, target.y2);
    let second = render_grid(&screen, &plane, &params, &Mandelbrot);

    assert_ne!(first, second, "zooming must change the rendered field");
    assert_eq!(plane.history().len(), 2);

    let reloaded = ZoomHistory::parse(plane.history().serialize());
    assert_eq!(reloaded.len(), 2);
    assert!((reloaded.entries()[1].x1 - target.x1).abs() < 1e-12);
}

#[test]
fn degenerate_screen_yields_empty_grid() {
    let screen = CoordinateSystem::new(0, 0, 0, 10);
    let plane = CoordinateSystem::new(-2.0, 2.0, -2.0, 2.0);
    let grid = render_grid(&screen, &plane, &EscapeParams::default(), &Mandelbrot);
    assert!(grid.is_empty());
}
