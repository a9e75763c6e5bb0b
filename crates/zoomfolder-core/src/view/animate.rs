//! Smooth size transitions for growing directories.
use super::camera::smoothing_fraction;
use crate::model::DirTree;

/// Rate constant for displayed-size smoothing, per second.
pub const SIZE_RATE: f32 = 8.0;

/// Bytes of difference still counted as "moving".
const SETTLE_BYTES: f64 = 0.5;

/// Move every node's displayed size toward its true size.
///
/// Returns `true` while any node is still visibly catching up. Every node
/// uses the same fraction, so a parent's displayed size never falls below
/// the sum of its children's.
pub fn animate_sizes(tree: &mut DirTree, dt: f32) -> bool {
    let t = f64::from(smoothing_fraction(SIZE_RATE, dt));
    if t >= 1.0 {
        snap_sizes(tree);
        return false;
    }

    let mut moving = false;
    for node in &mut tree.nodes {
        let target = node.size as f64;
        node.display_size += (target - node.display_size) * t;
        if (target - node.display_size).abs() > SETTLE_BYTES {
            moving = true;
        }
    }
    moving
}

/// Jump every displayed size to the true size.
pub fn snap_sizes(tree: &mut DirTree) {
    for node in &mut tree.nodes {
        node.display_size = node.size as f64;
    }
}
