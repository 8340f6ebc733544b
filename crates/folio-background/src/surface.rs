//! Software drawing surface.
//!
//! Pixels are premultiplied RGBA in `0.0..=1.0`. Every drawing call takes
//! layout coordinates and applies the surface's scale factor, so callers
//! never deal with device pixels directly.

use folio_core::Rgb;

/// Premultiplied RGBA.
pub type Pixel = [f32; 4];

const TRANSPARENT: Pixel = [0.0; 4];

/// How a source pixel combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    SourceOver,
    /// Additive, saturating at 1.
    Lighter,
    Screen,
    /// Keep the destination only where the source is opaque.
    DestinationIn,
}

impl BlendMode {
    #[inline]
    pub fn apply(self, dst: Pixel, src: Pixel) -> Pixel {
        match self {
            BlendMode::SourceOver => {
                let k = 1.0 - src[3];
                [
                    src[0] + dst[0] * k,
                    src[1] + dst[1] * k,
                    src[2] + dst[2] * k,
                    src[3] + dst[3] * k,
                ]
            }
            BlendMode::Lighter => [
                (src[0] + dst[0]).min(1.0),
                (src[1] + dst[1]).min(1.0),
                (src[2] + dst[2]).min(1.0),
                (src[3] + dst[3]).min(1.0),
            ],
            BlendMode::Screen => [
                src[0] + dst[0] - src[0] * dst[0],
                src[1] + dst[1] - src[1] * dst[1],
                src[2] + dst[2] - src[2] * dst[2],
                src[3] + dst[3] - src[3] * dst[3],
            ],
            BlendMode::DestinationIn => {
                let a = src[3];
                [dst[0] * a, dst[1] * a, dst[2] * a, dst[3] * a]
            }
        }
    }
}

/// One color stop of a gradient. `alpha` is straight (not premultiplied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgb, alpha: f32) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }

    fn premultiplied(&self) -> Pixel {
        let [r, g, b] = self.color.to_unit();
        let a = self.alpha.clamp(0.0, 1.0);
        [r * a, g * a, b * a, a]
    }
}

/// Sample a stop list at `t`, interpolating in premultiplied space.
fn sample_stops(stops: &[(f32, Pixel)], t: f32) -> Pixel {
    let Some(&(first_offset, first)) = stops.first() else {
        return TRANSPARENT;
    };
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = o1 - o0;
            let k = if span <= f32::EPSILON { 1.0 } else { (t - o0) / span };
            return [
                c0[0] + (c1[0] - c0[0]) * k,
                c0[1] + (c1[1] - c0[1]) * k,
                c0[2] + (c1[2] - c0[2]) * k,
                c0[3] + (c1[3] - c0[3]) * k,
            ];
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or(TRANSPARENT)
}

/// An RGBA raster sized in device pixels.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    scale: f32,
    pixels: Vec<Pixel>,
    /// Per-pixel stroke coverage, reused between strokes.
    coverage: Vec<f32>,
}

impl Surface {
    /// Allocate a surface for a layout box. Returns `None` for an empty box.
    pub fn new(layout_width: f32, layout_height: f32, scale: f32) -> Option<Self> {
        if !(layout_width.is_finite() && layout_height.is_finite() && scale.is_finite()) {
            return None;
        }
        let width = (layout_width * scale).floor();
        let height = (layout_height * scale).floor();
        if width < 1.0 || height < 1.0 {
            return None;
        }
        let (width, height) = (width as usize, height as usize);
        Some(Self {
            width,
            height,
            scale,
            pixels: vec![TRANSPARENT; width * height],
            coverage: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Width in layout pixels.
    pub fn layout_width(&self) -> f32 {
        self.width as f32 / self.scale
    }

    /// Height in layout pixels.
    pub fn layout_height(&self) -> f32 {
        self.height as f32 / self.scale
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] <= 0.0)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// Composite another surface of the same size onto this one.
    pub fn composite(&mut self, layer: &Surface, mode: BlendMode) {
        if layer.width != self.width || layer.height != self.height {
            return;
        }
        for (dst, src) in self.pixels.iter_mut().zip(&layer.pixels) {
            *dst = mode.apply(*dst, *src);
        }
    }

    /// Fill a disc of radius `r_outer` with a concentric radial gradient.
    ///
    /// Offset 0 maps to `r_inner`, offset 1 to `r_outer`; points inside the
    /// inner radius take the first stop.
    pub fn fill_radial_gradient(
        &mut self,
        cx: f32,
        cy: f32,
        r_inner: f32,
        r_outer: f32,
        stops: &[GradientStop],
        mode: BlendMode,
    ) {
        if r_outer <= 0.0 || stops.is_empty() {
            return;
        }
        let s = self.scale;
        let (cx, cy, r0, r1) = (cx * s, cy * s, r_inner * s, r_outer * s);
        let span = (r1 - r0).max(f32::EPSILON);
        let premul: Vec<(f32, Pixel)> = stops
            .iter()
            .map(|stop| (stop.offset, stop.premultiplied()))
            .collect();

        let x_start = (cx - r1).floor().max(0.0) as usize;
        let y_start = (cy - r1).floor().max(0.0) as usize;
        let x_end = ((cx + r1).ceil().max(0.0) as usize).min(self.width);
        let y_end = ((cy + r1).ceil().max(0.0) as usize).min(self.height);
        let r1_sq = r1 * r1;

        for y in y_start..y_end {
            let dy = y as f32 + 0.5 - cy;
            let row = y * self.width;
            for x in x_start..x_end {
                let dx = x as f32 + 0.5 - cx;
                let d_sq = dx * dx + dy * dy;
                if d_sq > r1_sq {
                    continue;
                }
                let t = ((d_sq.sqrt() - r0) / span).clamp(0.0, 1.0);
                let src = sample_stops(&premul, t);
                let dst = &mut self.pixels[row + x];
                *dst = mode.apply(*dst, src);
            }
        }
    }

    /// Approximate a gaussian blur with standard deviation `radius` (layout px).
    pub fn blur(&mut self, radius: f32) {
        let sigma = radius * self.scale;
        if sigma < 0.5 {
            return;
        }
        let mut scratch = vec![TRANSPARENT; self.pixels.len()];
        for box_size in boxes_for_gauss(sigma, 3) {
            let r = (box_size - 1) / 2;
            box_blur_h(&self.pixels, &mut scratch, self.width, self.height, r);
            box_blur_v(&scratch, &mut self.pixels, self.width, self.height, r);
        }
    }

    /// Stroke an open polyline, one layout pixel wide.
    pub fn stroke_polyline(
        &mut self,
        points: &[(f32, f32)],
        color: Rgb,
        alpha: f32,
        mode: BlendMode,
    ) {
        if points.len() < 2 || alpha <= 0.0 {
            return;
        }
        if self.coverage.len() != self.pixels.len() {
            self.coverage = vec![0.0; self.pixels.len()];
        }

        let s = self.scale;
        let passes = s.round().max(1.0) as i32;
        let mut bounds = Bounds::empty();
        for pair in points.windows(2) {
            let (x0, y0) = (pair[0].0 * s, pair[0].1 * s);
            let (x1, y1) = (pair[1].0 * s, pair[1].1 * s);
            for pass in 0..passes {
                let offset = pass as f32 - (passes - 1) as f32 / 2.0;
                self.plot_wu_line(x0, y0, x1, y1, offset, &mut bounds);
            }
        }

        let [r, g, b] = color.to_unit();
        let Some((bx0, by0, bx1, by1)) = bounds.range() else {
            return;
        };
        for y in by0..=by1 {
            let row = y * self.width;
            for x in bx0..=bx1 {
                let idx = row + x;
                let c = std::mem::take(&mut self.coverage[idx]);
                if c <= 0.0 {
                    continue;
                }
                let a = (c.min(1.0) * alpha).clamp(0.0, 1.0);
                let src = [r * a, g * a, b * a, a];
                self.pixels[idx] = mode.apply(self.pixels[idx], src);
            }
        }
    }

    /// Fade the top edge: alpha ramps from 0 at the top to 1 at
    /// `top_fade * height` and stays opaque below. Applied destination-in.
    pub fn apply_fade_mask(&mut self, top_fade: f32) {
        let top_fade = top_fade.clamp(0.0, 1.0);
        if top_fade <= 0.0 {
            return;
        }
        for y in 0..self.height {
            let frac = (y as f32 + 0.5) / self.height as f32;
            let a = (frac / top_fade).min(1.0);
            if a >= 1.0 {
                continue;
            }
            let mask = [0.0, 0.0, 0.0, a];
            let row = y * self.width;
            for px in &mut self.pixels[row..row + self.width] {
                *px = BlendMode::DestinationIn.apply(*px, mask);
            }
        }
    }

    fn plot_wu_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        offset: f32,
        bounds: &mut Bounds,
    ) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let gradient = if dx.abs() < f32::EPSILON {
            0.0
        } else {
            (y1 - y0) / dx
        };

        let x_start = x0.round() as i64;
        let x_end = x1.round() as i64;
        for x in x_start..=x_end {
            // Sample at the pixel center on the major axis.
            let y = y0 + gradient * (x as f32 + 0.5 - x0) + offset - 0.5;
            let y_floor = y.floor();
            let frac = y - y_floor;
            let yi = y_floor as i64;
            if steep {
                self.cover(yi, x, 1.0 - frac, bounds);
                self.cover(yi + 1, x, frac, bounds);
            } else {
                self.cover(x, yi, 1.0 - frac, bounds);
                self.cover(x, yi + 1, frac, bounds);
            }
        }
    }

    #[inline]
    fn cover(&mut self, x: i64, y: i64, amount: f32, bounds: &mut Bounds) {
        if amount <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let c = &mut self.coverage[y * self.width + x];
        *c = c.max(amount);
        bounds.include(x, y);
    }
}

/// Dirty rectangle of a stroke.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            x0: usize::MAX,
            y0: usize::MAX,
            x1: 0,
            y1: 0,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }

    fn range(self) -> Option<(usize, usize, usize, usize)> {
        (self.x0 <= self.x1 && self.y0 <= self.y1).then_some((self.x0, self.y0, self.x1, self.y1))
    }
}

/// Box widths whose successive application approximates a gaussian.
fn boxes_for_gauss(sigma: f32, n: usize) -> Vec<usize> {
    let n_f = n as f32;
    let w_ideal = (12.0 * sigma * sigma / n_f + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wl_f = wl as f32;
    let m_ideal =
        (12.0 * sigma * sigma - n_f * wl_f * wl_f - 4.0 * n_f * wl_f - 3.0 * n_f) / (-4.0 * wl_f - 4.0);
    let m = m_ideal.round().max(0.0) as usize;
    (0..n)
        .map(|i| if i < m { wl as usize } else { wu as usize })
        .collect()
}

/// Horizontal running-sum box blur; pixels outside the surface are transparent.
fn box_blur_h(src: &[Pixel], dst: &mut [Pixel], width: usize, height: usize, r: usize) {
    if r == 0 {
        dst.copy_from_slice(src);
        return;
    }
    let norm = 1.0 / (2 * r + 1) as f32;
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out = &mut dst[y * width..(y + 1) * width];
        let mut acc = [0.0f32; 4];
        for px in row.iter().take(r.min(width)) {
            add(&mut acc, px);
        }
        for x in 0..width {
            if x + r < width {
                add(&mut acc, &row[x + r]);
            }
            if x > r {
                sub(&mut acc, &row[x - r - 1]);
            }
            out[x] = [acc[0] * norm, acc[1] * norm, acc[2] * norm, acc[3] * norm];
        }
    }
}

/// Vertical counterpart of [`box_blur_h`].
fn box_blur_v(src: &[Pixel], dst: &mut [Pixel], width: usize, height: usize, r: usize) {
    if r == 0 {
        dst.copy_from_slice(src);
        return;
    }
    let norm = 1.0 / (2 * r + 1) as f32;
    for x in 0..width {
        let mut acc = [0.0f32; 4];
        for y in 0..r.min(height) {
            add(&mut acc, &src[y * width + x]);
        }
        for y in 0..height {
            if y + r < height {
                add(&mut acc, &src[(y + r) * width + x]);
            }
            if y > r {
                sub(&mut acc, &src[(y - r - 1) * width + x]);
            }
            dst[y * width + x] = [acc[0] * norm, acc[1] * norm, acc[2] * norm, acc[3] * norm];
        }
    }
}

#[inline]
fn add(acc: &mut [f32; 4], px: &Pixel) {
    for (a, p) in acc.iter_mut().zip(px) {
        *a += p;
    }
}

#[inline]
fn sub(acc: &mut [f32; 4], px: &Pixel) {
    for (a, p) in acc.iter_mut().zip(px) {
        *a = (*a - p).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn stops(alpha: f32) -> [GradientStop; 3] {
        [
            GradientStop::new(0.0, WHITE, alpha),
            GradientStop::new(0.6, WHITE, alpha / 2.0),
            GradientStop::new(1.0, Rgb::default(), 0.0),
        ]
    }

    #[test]
    fn test_empty_layout_has_no_surface() {
        assert!(Surface::new(0.0, 10.0, 1.0).is_none());
        assert!(Surface::new(10.0, 0.4, 2.0).is_none());
        assert!(Surface::new(f32::NAN, 10.0, 1.0).is_none());
    }

    #[test]
    fn test_scale_multiplies_device_size() {
        let s = Surface::new(40.0, 24.0, 2.0).expect("surface");
        assert_eq!((s.width(), s.height()), (80, 48));
        assert_eq!(s.layout_width(), 40.0);
    }

    #[test]
    fn test_blend_modes() {
        let dst = [0.5, 0.5, 0.5, 0.5];
        let src = [0.6, 0.0, 0.2, 0.6];
        assert_eq!(BlendMode::Lighter.apply(dst, src), [1.0, 0.5, 0.7, 1.0]);
        let screen = BlendMode::Screen.apply(dst, src);
        assert!((screen[0] - 0.8).abs() < 1e-6);
        let masked = BlendMode::DestinationIn.apply(dst, [0.0, 0.0, 0.0, 0.5]);
        assert_eq!(masked, [0.25, 0.25, 0.25, 0.25]);
        let over = BlendMode::SourceOver.apply(dst, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(over, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_radial_gradient_falls_off() {
        let mut s = Surface::new(64.0, 64.0, 1.0).expect("surface");
        s.fill_radial_gradient(32.0, 32.0, 2.0, 20.0, &stops(0.28), BlendMode::Lighter);
        let center = s.pixel(32, 32)[3];
        let mid = s.pixel(32 + 10, 32)[3];
        let edge = s.pixel(32 + 19, 32)[3];
        assert!((center - 0.28).abs() < 1e-3);
        assert!(center > mid && mid > edge);
        assert_eq!(s.pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn test_blur_spreads_and_roughly_conserves_energy() {
        let mut s = Surface::new(64.0, 64.0, 1.0).expect("surface");
        s.fill_radial_gradient(32.0, 32.0, 0.0, 4.0, &stops(1.0), BlendMode::SourceOver);
        let before: f32 = s.pixels().iter().map(|p| p[3]).sum();
        s.blur(4.0);
        let after: f32 = s.pixels().iter().map(|p| p[3]).sum();
        assert!(s.pixel(32 + 8, 32)[3] > 0.0);
        assert!((before - after).abs() / before < 0.05);
    }

    #[test]
    fn test_zero_blur_is_identity() {
        let mut s = Surface::new(16.0, 16.0, 1.0).expect("surface");
        s.fill_radial_gradient(8.0, 8.0, 0.0, 4.0, &stops(1.0), BlendMode::SourceOver);
        let copy = s.pixels().to_vec();
        s.blur(0.0);
        assert_eq!(s.pixels(), copy.as_slice());
    }

    #[test]
    fn test_stroke_touches_line_pixels_only() {
        let mut s = Surface::new(32.0, 16.0, 1.0).expect("surface");
        s.stroke_polyline(&[(0.0, 8.5), (31.0, 8.5)], WHITE, 0.5, BlendMode::Screen);
        assert!(s.pixel(10, 8)[3] > 0.45);
        assert_eq!(s.pixel(10, 7), TRANSPARENT);
        assert_eq!(s.pixel(10, 2), TRANSPARENT);
        // Coverage scratch is reset after the stroke.
        s.clear();
        s.stroke_polyline(&[(0.0, 2.5), (31.0, 2.5)], WHITE, 0.5, BlendMode::Screen);
        assert_eq!(s.pixel(10, 8), TRANSPARENT);
    }

    #[test]
    fn test_fade_mask_clears_top_keeps_bottom() {
        let mut s = Surface::new(8.0, 100.0, 1.0).expect("surface");
        s.fill_radial_gradient(4.0, 50.0, 200.0, 300.0, &stops(1.0), BlendMode::SourceOver);
        s.apply_fade_mask(0.5);
        assert!(s.pixel(4, 0)[3] < 0.02);
        assert!(s.pixel(4, 25)[3] > 0.4 && s.pixel(4, 25)[3] < 0.6);
        assert_eq!(s.pixel(4, 80)[3], 1.0);
    }

    #[test]
    fn test_boxes_for_gauss_widths_are_odd() {
        for sigma in [1.0, 4.0, 10.0, 24.0] {
            let boxes = boxes_for_gauss(sigma, 3);
            assert_eq!(boxes.len(), 3);
            assert!(boxes.iter().all(|b| b % 2 == 1));
        }
    }
}
