//! View math for the icicle display: camera, layout, and hit testing.
//!
//! Nothing here touches the GUI toolkit. Callers lock the scan tree, call
//! [`animate_sizes`], then [`layout`] and [`hit_test`] against the same
//! [`CameraView`] so the two agree for the frame.
pub mod animate;
pub mod camera;
pub mod geometry;
pub mod layout;

pub use animate::{animate_sizes, snap_sizes};
pub use camera::{Camera, CameraView, ZoomDirection};
pub use geometry::{ScreenRect, Viewport};
pub use hit_test::hit_test;
pub use layout::{layout, layout_rows, LaidOutRow};
