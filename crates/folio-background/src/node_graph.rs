//! Decorative node graph shown beside the hero banner.

use folio_core::{Rgb, hsl_to_rgb};

use crate::surface::{BlendMode, GradientStop, Surface};

/// Design space the node coordinates live in.
const VIEW_BOX: (f32, f32) = (600.0, 400.0);

/// (x, y, radius) in view-box units.
const NODES: [(f32, f32, f32); 8] = [
    (150.0, 120.0, 8.0),
    (280.0, 80.0, 6.0),
    (350.0, 180.0, 10.0),
    (200.0, 220.0, 7.0),
    (420.0, 100.0, 5.0),
    (100.0, 200.0, 6.0),
    (480.0, 200.0, 8.0),
    (300.0, 280.0, 6.0),
];

/// Node index pairs.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 3),
    (1, 2),
    (1, 4),
    (2, 3),
    (2, 6),
    (3, 5),
    (3, 7),
    (4, 6),
    (5, 0),
    (6, 7),
    (7, 2),
];

/// Gradient across the graph, left to right.
fn gradient_color(u: f32) -> Rgb {
    let start = hsl_to_rgb(24.0, 0.95, 0.58);
    let end = hsl_to_rgb(35.0, 0.95, 0.60);
    start.lerp(end, u)
}

/// Fit the view box into the surface, centered, preserving aspect.
fn fit(surface: &Surface) -> (f32, f32, f32) {
    let w = surface.layout_width();
    let h = surface.layout_height();
    let k = (w / VIEW_BOX.0).min(h / VIEW_BOX.1);
    let ox = (w - VIEW_BOX.0 * k) / 2.0;
    let oy = (h - VIEW_BOX.1 * k) / 2.0;
    (k, ox, oy)
}

/// Draw the graph at simulated time `t` (pass 0 for a static frame).
pub fn draw_node_graph(surface: &mut Surface, t: f32) {
    surface.clear();
    let (k, ox, oy) = fit(surface);
    if k <= 0.0 {
        return;
    }
    let project = |(x, y): (f32, f32)| (ox + x * k, oy + y * k);

    for (i, &(a, b)) in EDGES.iter().enumerate() {
        let (ax, ay, _) = NODES[a];
        let (bx, by, _) = NODES[b];
        let u = ((ax + bx) / 2.0) / VIEW_BOX.0;
        let shimmer = 0.35 + 0.15 * (t * 1.5 + i as f32 * 0.7).sin();
        surface.stroke_polyline(
            &[project((ax, ay)), project((bx, by))],
            gradient_color(u),
            shimmer,
            BlendMode::Screen,
        );
    }

    for (i, &(x, y, r)) in NODES.iter().enumerate() {
        let (cx, cy) = project((x, y));
        let pulse = 1.0 + 0.2 * (t * 2.0 + i as f32).sin();
        let radius = r * k * pulse;
        let color = gradient_color(x / VIEW_BOX.0);
        let glow = [
            GradientStop::new(0.0, color, 0.6),
            GradientStop::new(1.0, Rgb::default(), 0.0),
        ];
        surface.fill_radial_gradient(cx, cy, radius, radius * 3.0, &glow, BlendMode::Lighter);
        let core = [GradientStop::new(0.0, color, 1.0)];
        surface.fill_radial_gradient(cx, cy, radius, radius, &core, BlendMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_draws_nodes_inside_surface() {
        let mut s = Surface::new(120.0, 80.0, 1.0).expect("surface");
        draw_node_graph(&mut s, 0.0);
        assert!(!s.is_blank());
        // Node 3 sits at (350, 180) of 600x400, scaled by 0.2.
        assert!(s.pixel(70, 36)[3] > 0.9);
    }

    #[test]
    fn test_graph_is_static_at_fixed_time() {
        let mut a = Surface::new(60.0, 40.0, 1.0).expect("surface");
        let mut b = a.clone();
        draw_node_graph(&mut a, 0.0);
        draw_node_graph(&mut b, 0.0);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color(0.0), hsl_to_rgb(24.0, 0.95, 0.58));
        assert_eq!(gradient_color(1.0), hsl_to_rgb(35.0, 0.95, 0.60));
    }
}
