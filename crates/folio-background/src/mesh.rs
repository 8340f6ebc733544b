//! Wavy grid-line overlay drawn on top of the glow.

use std::f32::consts::PI;

/// Pointer displacement in layout pixels at full interaction strength.
const POINTER_PULL_PX: f32 = 18.0;

/// One horizontal scan line of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRow {
    /// Stroke alpha for this row.
    pub alpha: f32,
    /// Displaced sample points in layout pixels.
    pub points: Vec<(f32, f32)>,
}

/// Inputs for tracing the mesh on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInput {
    pub width: f32,
    pub height: f32,
    /// Grid spacing in layout pixels, already clamped.
    pub step: f32,
    pub opacity: f32,
    pub intensity: f32,
    /// Simulated time.
    pub time: f32,
    /// Normalized pointer position and pull strength, when it applies.
    pub pointer: Option<(f32, f32, f32)>,
}

impl MeshInput {
    /// Pointer tuple for [`MeshInput::pointer`], or `None` when inactive.
    pub fn pointer_pull(x: f32, y: f32, interact: f32) -> Option<(f32, f32, f32)> {
        Some((x, y, interact * POINTER_PULL_PX))
    }
}

/// Trace every mesh row for one frame.
pub fn trace_rows(input: &MeshInput) -> Vec<MeshRow> {
    let MeshInput {
        width: w,
        height: h,
        step,
        opacity,
        intensity,
        time: t,
        pointer,
    } = *input;
    if w <= 0.0 || h <= 0.0 || step <= 0.0 {
        return Vec::new();
    }
    let amp = 10.0 + 14.0 * intensity;
    let (mx, my, pull) = match pointer {
        Some((x, y, pull)) => ((x - 0.5) * 2.0, (y - 0.5) * 2.0, pull),
        None => (0.0, 0.0, 0.0),
    };

    let mut rows = Vec::new();
    let mut y = 0.0;
    while y <= h {
        let fade = (y / h).clamp(0.0, 1.0);
        let ny = y / h;
        let mut points = Vec::new();
        let mut x = 0.0;
        while x <= w {
            let nx = x / w;
            let wobble = ((nx * 6.0 + t * 0.9) * PI).sin() + ((ny * 5.0 + t * 0.7) * PI).cos();
            let px = x + wobble * amp + mx * pull * (1.0 - fade);
            let py = y + (nx * 8.0 + t).sin() * (amp * 0.55) + my * pull * (1.0 - fade);
            points.push((px, py));
            x += step;
        }
        rows.push(MeshRow {
            alpha: opacity * (0.25 + 0.75 * fade),
            points,
        });
        y += step;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pointer: Option<(f32, f32, f32)>) -> MeshInput {
        MeshInput {
            width: 200.0,
            height: 100.0,
            step: 26.0,
            opacity: 0.2,
            intensity: 1.0,
            time: 1.3,
            pointer,
        }
    }

    #[test]
    fn test_row_and_sample_counts_follow_step() {
        let rows = trace_rows(&input(None));
        // y = 0, 26, 52, 78
        assert_eq!(rows.len(), 4);
        // x = 0, 26, ..., 182
        assert!(rows.iter().all(|r| r.points.len() == 8));
    }

    #[test]
    fn test_alpha_grows_toward_bottom() {
        let rows = trace_rows(&input(None));
        assert!((rows[0].alpha - 0.05).abs() < 1e-6);
        assert!(rows.windows(2).all(|p| p[1].alpha > p[0].alpha));
    }

    #[test]
    fn test_pointer_displaces_top_rows_more() {
        let still = trace_rows(&input(None));
        let pulled = trace_rows(&input(MeshInput::pointer_pull(1.0, 1.0, 1.0)));
        let top_shift = pulled[0].points[3].0 - still[0].points[3].0;
        let low_shift = pulled[3].points[3].0 - still[3].points[3].0;
        assert!((top_shift - 18.0).abs() < 1e-3);
        assert!(low_shift < top_shift);
    }

    #[test]
    fn test_centered_pointer_has_no_pull() {
        let still = trace_rows(&input(None));
        let centered = trace_rows(&input(MeshInput::pointer_pull(0.5, 0.5, 1.0)));
        assert_eq!(still, centered);
    }

    #[test]
    fn test_degenerate_size_traces_nothing() {
        let mut i = input(None);
        i.height = 0.0;
        assert!(trace_rows(&i).is_empty());
    }
}
