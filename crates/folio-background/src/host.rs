//! Mount/unmount lifecycle around an [`AuroraMesh`].

use std::time::Duration;

use folio_core::AuroraConfig;
use tracing::debug;

use crate::animator::{AuroraMesh, Container, TickOutcome};
use crate::schedule::CancelToken;
use crate::surface::Surface;

/// Owns a mounted animation, its pending frame request and its teardown token.
///
/// The host is the only thing the event loop talks to. Once [`unmount`] has
/// run, every method is a no-op and no frame stays pending.
///
/// [`unmount`]: AnimationHost::unmount
#[derive(Debug)]
pub struct AnimationHost {
    mesh: Option<AuroraMesh>,
    token: CancelToken,
    /// Wall-clock time of the next requested frame.
    pending: Option<f64>,
}

impl AnimationHost {
    /// Mount an animation. `reduced_motion_env` is the raw environment
    /// preference; it is read here once and never again.
    pub fn mount(
        config: &AuroraConfig,
        reduced_motion_env: Option<&str>,
        container: Container,
        now_ms: f64,
    ) -> Self {
        let reduced = config.motion.is_reduced(reduced_motion_env);
        Self::from_mesh(AuroraMesh::mount(config, reduced, container, now_ms))
    }

    /// Wrap an already mounted animator.
    pub fn from_mesh(mesh: AuroraMesh) -> Self {
        let mut host = Self {
            mesh: Some(mesh),
            token: CancelToken::new(),
            pending: None,
        };
        host.rearm();
        host
    }

    /// Token cancelled on unmount.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled() && self.mesh.is_some()
    }

    fn live_mesh(&mut self) -> Option<&mut AuroraMesh> {
        if self.token.is_cancelled() {
            return None;
        }
        self.mesh.as_mut()
    }

    fn rearm(&mut self) {
        self.pending = match self.mesh.as_ref() {
            Some(mesh) if !self.token.is_cancelled() && mesh.wants_frame() => {
                Some(mesh.next_due_ms())
            }
            _ => None,
        };
    }

    pub fn on_resize(&mut self, container: Container) {
        if let Some(mesh) = self.live_mesh() {
            mesh.resize(container);
        }
        self.rearm();
    }

    /// Pointer moved to normalized container coordinates.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if let Some(mesh) = self.live_mesh() {
            mesh.pointer_move(x, y);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(mesh) = self.live_mesh() {
            mesh.pointer_leave();
        }
    }

    /// Run the pending frame callback, if any, and re-arm.
    pub fn poll(&mut self, now_ms: f64) -> TickOutcome {
        if self.pending.is_none() {
            return TickOutcome::Idle;
        }
        let outcome = match self.live_mesh() {
            Some(mesh) => mesh.tick(now_ms),
            None => TickOutcome::Idle,
        };
        self.rearm();
        outcome
    }

    /// How long the event loop may sleep before the next frame is due.
    pub fn next_wakeup(&self, now_ms: f64) -> Option<Duration> {
        self.pending
            .map(|due| Duration::from_secs_f64(((due - now_ms).max(0.0)) / 1000.0))
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn surface(&self) -> Option<&Surface> {
        if self.token.is_cancelled() {
            return None;
        }
        self.mesh.as_ref().and_then(AuroraMesh::surface)
    }

    pub fn mesh(&self) -> Option<&AuroraMesh> {
        self.mesh.as_ref()
    }

    /// Cancel the pending frame and stop routing events. Idempotent.
    pub fn unmount(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.pending = None;
        if let Some(mesh) = self.mesh.take() {
            debug!(frames = mesh.frames_drawn(), "aurora unmounted");
        }
    }
}

impl Drop for AnimationHost {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Motion;

    fn config() -> AuroraConfig {
        AuroraConfig {
            blob_count: 3,
            blob_radius: 20.0,
            ..Default::default()
        }
    }

    fn host(cfg: &AuroraConfig) -> AnimationHost {
        let mesh = AuroraMesh::mount_seeded(cfg, false, Container::new(64.0, 48.0), 0.0, 1);
        AnimationHost::from_mesh(mesh)
    }

    #[test]
    fn test_mount_requests_first_frame() {
        let h = host(&config());
        assert!(h.has_pending_frame());
        let wait = h.next_wakeup(0.0).expect("pending");
        assert!(wait <= Duration::from_millis(19));
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut h = host(&config());
        let token = h.token();
        h.unmount();
        assert!(token.is_cancelled());
        assert!(!h.has_pending_frame());
        assert!(h.next_wakeup(0.0).is_none());
        assert!(h.surface().is_none());
        assert_eq!(h.poll(1_000.0), TickOutcome::Idle);
        h.on_resize(Container::new(10.0, 10.0));
        h.on_pointer_move(0.5, 0.5);
        assert!(!h.has_pending_frame());
        assert!(!h.is_mounted());
        h.unmount();
    }

    #[test]
    fn test_reduced_motion_stops_requesting_frames() {
        let cfg = AuroraConfig {
            motion: Motion::Reduced,
            ..config()
        };
        let mut h = AnimationHost::mount(&cfg, None, Container::new(64.0, 48.0), 0.0);
        assert_eq!(h.poll(100.0), TickOutcome::Drawn);
        assert!(!h.has_pending_frame());
        assert_eq!(h.poll(200.0), TickOutcome::Idle);
    }

    #[test]
    fn test_env_flag_enables_reduced_motion() {
        let h = AnimationHost::mount(&config(), Some("1"), Container::new(64.0, 48.0), 0.0);
        assert!(h.mesh().is_some_and(AuroraMesh::is_reduced_motion));
    }

    #[test]
    fn test_resize_after_static_frame_rearms_once() {
        let cfg = AuroraConfig {
            motion: Motion::Reduced,
            ..config()
        };
        let mut h = AnimationHost::mount(&cfg, None, Container::new(64.0, 48.0), 0.0);
        h.poll(100.0);
        h.on_resize(Container::new(32.0, 32.0));
        assert!(h.has_pending_frame());
        assert_eq!(h.poll(200.0), TickOutcome::Drawn);
        assert!(!h.has_pending_frame());
    }

    #[test]
    fn test_empty_container_has_no_pending_frame() {
        let h = AnimationHost::mount(&config(), None, Container::default(), 0.0);
        assert!(!h.has_pending_frame());
        assert!(h.surface().is_none());
    }
}
