//! Moving glow sources.

use folio_core::{EffectiveParams, Rgb};
use rand::Rng;

/// Normalized band a blob may occupy before it bounces back.
pub const BAND: (f32, f32) = (-0.1, 1.1);

/// Scales velocity into normalized units per simulated second.
const VELOCITY_SCALE: f32 = 0.22;

/// Pointer pull numerator factor and distance softening.
const PULL_STRENGTH: f32 = 0.14;
const PULL_SOFTENING: f32 = 0.12;

/// Per-step velocity retention while the pointer is attracting.
pub const DRAG: f32 = 0.988;

/// A single glowing light source.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Base radius in layout pixels.
    pub radius: f32,
    pub color: Rgb,
}

/// Which axes bounced during one integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Blob {
    /// Spawn the blob at `index` with random position, velocity and size.
    pub fn spawn<R: Rng>(rng: &mut R, index: usize, params: &EffectiveParams) -> Self {
        Self {
            x: rng.gen_range(0.05..=0.95),
            y: rng.gen_range(0.15..=0.95),
            vx: rng.gen_range(-0.25..=0.25),
            vy: rng.gen_range(-0.22..=0.22),
            radius: params.blob_radius * rng.gen_range(0.7..=1.15),
            color: params.blob_color(index),
        }
    }

    /// Advance by `dt` simulated seconds, bouncing off the band edges.
    pub fn integrate(&mut self, dt: f32) -> Bounce {
        self.x += self.vx * dt * VELOCITY_SCALE;
        self.y += self.vy * dt * VELOCITY_SCALE;
        Bounce {
            x: reflect(&mut self.x, &mut self.vx),
            y: reflect(&mut self.y, &mut self.vy),
        }
    }

    /// Pull towards the pointer at `(px, py)`, then apply drag.
    pub fn attract(&mut self, px: f32, py: f32, interact: f32, dt: f32) {
        let dx = px - self.x;
        let dy = py - self.y;
        let d2 = dx * dx + dy * dy;
        let pull = interact * PULL_STRENGTH / (PULL_SOFTENING + d2);
        self.vx += dx * pull * dt;
        self.vy += dy * pull * dt;
        self.vx *= DRAG;
        self.vy *= DRAG;
    }

    /// Radius with a slow breathing modulation at simulated time `t`.
    pub fn breathing_radius(&self, t: f32) -> f32 {
        self.radius * (1.0 + (t + self.radius * 0.001).sin() * 0.05)
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// Bounce one axis. The velocity flips only while it still points outward,
/// so a blob that is already heading back is never flipped twice.
fn reflect(pos: &mut f32, vel: &mut f32) -> bool {
    let (lo, hi) = BAND;
    if *pos < lo {
        *pos = (2.0 * lo - *pos).min(hi);
        if *vel < 0.0 {
            *vel = -*vel;
            return true;
        }
    } else if *pos > hi {
        *pos = (2.0 * hi - *pos).max(lo);
        if *vel > 0.0 {
            *vel = -*vel;
            return true;
        }
    }
    false
}

/// Build the full blob set for the current parameters.
pub fn spawn_blobs<R: Rng>(rng: &mut R, params: &EffectiveParams) -> Vec<Blob> {
    (0..params.blob_count)
        .map(|i| Blob::spawn(rng, i, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AuroraConfig;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn blob(x: f32, y: f32, vx: f32, vy: f32) -> Blob {
        Blob {
            x,
            y,
            vx,
            vy,
            radius: 100.0,
            color: Rgb::default(),
        }
    }

    #[test]
    fn test_spawn_ranges_and_round_robin_colors() {
        let params = AuroraConfig {
            blob_count: 7,
            ..Default::default()
        }
        .effective();
        let mut rng = StdRng::seed_from_u64(7);
        let blobs = spawn_blobs(&mut rng, &params);
        assert_eq!(blobs.len(), 7);
        for (i, b) in blobs.iter().enumerate() {
            assert!((0.05..=0.95).contains(&b.x));
            assert!((0.15..=0.95).contains(&b.y));
            assert!((-0.25..=0.25).contains(&b.vx));
            assert!((-0.22..=0.22).contains(&b.vy));
            assert!(b.radius >= 160.0 * 0.7 - 1e-3 && b.radius <= 160.0 * 1.15 + 1e-3);
            assert_eq!(b.color, params.palette[i % 3]);
        }
    }

    #[test]
    fn test_bounce_flips_once_per_crossing() {
        let mut b = blob(1.099, 0.5, 0.25, 0.0);
        let mut flips = 0;
        for _ in 0..10 {
            if b.integrate(0.05).x {
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert!(b.vx < 0.0);
        assert!(b.x <= BAND.1);
    }

    #[test]
    fn test_inward_velocity_outside_band_is_not_flipped() {
        let mut b = blob(-0.2, 0.5, 0.1, 0.0);
        let bounce = b.integrate(0.0);
        assert!(!bounce.x);
        assert_eq!(b.vx, 0.1);
        assert!(b.x >= BAND.0);
    }

    #[test]
    fn test_attraction_pulls_toward_pointer() {
        let mut b = blob(0.2, 0.5, 0.0, 0.0);
        b.attract(0.8, 0.5, 1.0, 0.05);
        assert!(b.vx > 0.0);
        assert_eq!(b.vy, 0.0);
    }

    #[test]
    fn test_breathing_stays_within_five_percent() {
        let b = blob(0.5, 0.5, 0.0, 0.0);
        for i in 0..100 {
            let r = b.breathing_radius(i as f32 * 0.3);
            assert!(r >= 95.0 - 1e-3 && r <= 105.0 + 1e-3);
        }
    }

    proptest! {
        #[test]
        fn prop_positions_stay_in_band(
            x in 0.05f32..0.95,
            y in 0.15f32..0.95,
            vx in -0.25f32..0.25,
            vy in -0.22f32..0.22,
            px in 0.0f32..1.0,
            py in 0.0f32..1.0,
            steps in 1usize..400,
        ) {
            let mut b = blob(x, y, vx, vy);
            for _ in 0..steps {
                b.integrate(0.05);
                b.attract(px, py, 1.0, 0.05);
                prop_assert!(b.x >= BAND.0 && b.x <= BAND.1);
                prop_assert!(b.y >= BAND.0 && b.y <= BAND.1);
            }
        }
    }
}
