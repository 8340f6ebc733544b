//! The aurora mesh animator.

use folio_core::{AuroraConfig, EffectiveParams, Rgb};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::blob::{Blob, spawn_blobs};
use crate::mesh::{MeshInput, trace_rows};
use crate::schedule::FramePacer;
use crate::surface::{BlendMode, GradientStop, Surface};

/// Longest simulated step, in seconds, one drawn frame may advance.
pub const MAX_STEP_SECS: f32 = 0.05;

/// Inner gradient radius as a fraction of the blob radius.
const INNER_RADIUS: f32 = 0.12;

/// Layout size of the box the animation fills.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// What a call to [`AuroraMesh::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Too early for the frame cap; nothing changed.
    Dropped,
    /// A frame was drawn.
    Drawn,
    /// Nothing to do: no surface, or the static frame was already drawn.
    Idle,
}

/// Mutable per-mount state besides the blobs and pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    /// Layout size of the container.
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    /// Simulated time accumulator.
    pub time: f32,
    /// Normalized pointer position.
    pub pointer: (f32, f32),
    pub pointer_active: bool,
}

/// Animated gradient field with a wavy mesh overlay.
#[derive(Debug)]
pub struct AuroraMesh {
    params: EffectiveParams,
    reduced_motion: bool,
    state: SurfaceState,
    surface: Option<Surface>,
    glow: Option<Surface>,
    blobs: Vec<Blob>,
    pacer: FramePacer,
    rng: StdRng,
    frames_drawn: u64,
    static_frame_done: bool,
}

impl AuroraMesh {
    /// Mount with an entropy-seeded generator.
    pub fn mount(
        config: &AuroraConfig,
        reduced_motion: bool,
        container: Container,
        now_ms: f64,
    ) -> Self {
        Self::mount_with_rng(
            config,
            reduced_motion,
            container,
            now_ms,
            StdRng::from_entropy(),
        )
    }

    /// Mount with a fixed seed, for reproducible output.
    pub fn mount_seeded(
        config: &AuroraConfig,
        reduced_motion: bool,
        container: Container,
        now_ms: f64,
        seed: u64,
    ) -> Self {
        Self::mount_with_rng(
            config,
            reduced_motion,
            container,
            now_ms,
            StdRng::seed_from_u64(seed),
        )
    }

    fn mount_with_rng(
        config: &AuroraConfig,
        reduced_motion: bool,
        container: Container,
        now_ms: f64,
        rng: StdRng,
    ) -> Self {
        let params = config.effective();
        let pacer = FramePacer::new(params.min_frame_ms, now_ms);
        let mut mesh = Self {
            state: SurfaceState {
                width: 0.0,
                height: 0.0,
                scale: params.scale,
                time: 0.0,
                pointer: (0.5, 0.5),
                pointer_active: false,
            },
            params,
            reduced_motion,
            surface: None,
            glow: None,
            blobs: Vec::new(),
            pacer,
            rng,
            frames_drawn: 0,
            static_frame_done: false,
        };
        mesh.resize(container);
        debug!(
            blobs = mesh.blobs.len(),
            reduced_motion,
            max_fps = mesh.params.max_fps,
            accent = %mesh.params.accent(),
            "aurora mounted"
        );
        mesh
    }

    /// Re-measure the container, reallocate the surface and respawn blobs.
    ///
    /// In reduced motion a fresh surface gets one new static frame.
    pub fn resize(&mut self, container: Container) {
        self.state.width = container.width.max(0.0);
        self.state.height = container.height.max(0.0);
        self.surface = Surface::new(self.state.width, self.state.height, self.params.scale);
        self.glow = self.surface.clone();
        self.blobs = spawn_blobs(&mut self.rng, &self.params);
        if self.reduced_motion {
            self.static_frame_done = false;
        }
        trace!(
            width = self.state.width,
            height = self.state.height,
            has_surface = self.surface.is_some(),
            "aurora resized"
        );
    }

    /// Record a pointer position in normalized container coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.state.pointer = (x, y);
        self.state.pointer_active = true;
    }

    pub fn pointer_leave(&mut self) {
        self.state.pointer_active = false;
    }

    /// Whether another tick should be scheduled.
    pub fn wants_frame(&self) -> bool {
        self.surface.is_some() && !(self.reduced_motion && self.static_frame_done)
    }

    /// Wall-clock time at which the next frame may be drawn.
    pub fn next_due_ms(&self) -> f64 {
        self.pacer.next_due_ms()
    }

    /// Run one animation tick at wall-clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if !self.wants_frame() {
            return TickOutcome::Idle;
        }
        let Some(elapsed_ms) = self.pacer.try_claim(now_ms) else {
            return TickOutcome::Dropped;
        };

        let dt = if self.reduced_motion {
            0.0
        } else {
            (elapsed_ms as f32 / 1000.0).min(MAX_STEP_SECS)
        };
        self.state.time += dt * self.params.speed;

        self.draw(dt);
        self.frames_drawn += 1;
        if self.reduced_motion {
            self.static_frame_done = true;
        }
        TickOutcome::Drawn
    }

    fn draw(&mut self, dt: f32) {
        let (Some(surface), Some(glow)) = (self.surface.as_mut(), self.glow.as_mut()) else {
            return;
        };
        let p = &self.params;
        let st = &self.state;
        let (w, h) = (st.width, st.height);

        surface.clear();
        glow.clear();

        let attraction = (!self.reduced_motion && p.interact > 0.0 && st.pointer_active)
            .then_some(st.pointer);

        for blob in &mut self.blobs {
            blob.integrate(dt);
            if let Some((px, py)) = attraction {
                blob.attract(px, py, p.interact, dt);
            }

            let radius = blob.breathing_radius(st.time);
            let stops = [
                GradientStop::new(0.0, blob.color, 0.28 * p.intensity),
                GradientStop::new(0.6, blob.color, 0.14 * p.intensity),
                GradientStop::new(1.0, Rgb::default(), 0.0),
            ];
            glow.fill_radial_gradient(
                blob.x * w,
                blob.y * h,
                radius * INNER_RADIUS,
                radius,
                &stops,
                BlendMode::Lighter,
            );
        }
        glow.blur(p.blur_px);
        surface.composite(glow, BlendMode::Lighter);

        let pointer = (st.pointer_active && !self.reduced_motion)
            .then(|| MeshInput::pointer_pull(st.pointer.0, st.pointer.1, p.interact))
            .flatten();
        let rows = trace_rows(&MeshInput {
            width: w,
            height: h,
            step: p.mesh_step,
            opacity: p.mesh_opacity,
            intensity: p.intensity,
            time: st.time,
            pointer,
        });
        let accent = p.accent();
        for row in &rows {
            surface.stroke_polyline(&row.points, accent, row.alpha, BlendMode::Screen);
        }

        surface.apply_fade_mask(p.top_fade);
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn params(&self) -> &EffectiveParams {
        &self.params
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}
