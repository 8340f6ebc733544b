//! Aurora mesh background for the folio portfolio.
//!
//! A handful of blurred, drifting light blobs painted additively, a wavy
//! grid-line mesh screened on top, and a fade mask that blends the top edge
//! into the page. Everything is rasterized on a small software surface and
//! presented on terminal cells with half blocks.
//!
//! The animator never schedules itself: [`AnimationHost`] tracks the pending
//! frame and its [`CancelToken`], and the application's event loop asks it
//! when to wake up next.

mod animator;
mod blob;
mod host;
mod mesh;
mod node_graph;
mod present;
mod schedule;
mod surface;

pub use animator::{AuroraMesh, Container, MAX_STEP_SECS, SurfaceState, TickOutcome};
pub use blob::{BAND, Blob, Bounce, DRAG, spawn_blobs};
pub use host::AnimationHost;
pub use mesh::{MeshInput, MeshRow, trace_rows};
pub use node_graph::draw_node_graph;
pub use present::{AuroraWidget, CELL_LAYOUT_PX, cell_colors, container_for, normalized_position};
pub use schedule::{CancelToken, FramePacer};
pub use surface::{BlendMode, GradientStop, Pixel, Surface};
