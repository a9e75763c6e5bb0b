//! Icicle layout: one row per depth, widths proportional to displayed size.
use super::camera::CameraView;
use super::geometry::{is_culled, place, root_spans, ScreenRect, Span, Viewport};
use crate::model::{DirTree, NodeIndex};

/// One rectangle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaidOutRow {
    pub node: NodeIndex,
    /// 0 for the root's children.
    pub depth: u32,
    pub rect: ScreenRect,
}

/// Emit every visible rectangle to `sink`, parents before their children.
///
/// Subtrees whose row lies outside the viewport horizontally or below it are
/// skipped. Rows scrolled above the top are not emitted but their children
/// are still visited.
pub fn layout<F>(tree: &DirTree, camera: &CameraView, viewport: Viewport, mut sink: F)
where
    F: FnMut(LaidOutRow),
{
    for span in root_spans(tree, viewport.width, camera.zoom) {
        layout_node(tree, span, 0, camera, &viewport, &mut sink);
    }
}

/// [`layout`] collected into a `Vec`.
pub fn layout_rows(tree: &DirTree, camera: &CameraView, viewport: Viewport) -> Vec<LaidOutRow> {
    let mut rows = Vec::new();
    layout(tree, camera, viewport, |row| rows.push(row));
    rows
}

fn layout_node<F>(
    tree: &DirTree,
    span: Span,
    depth: u32,
    camera: &CameraView,
    viewport: &Viewport,
    sink: &mut F,
) where
    F: FnMut(LaidOutRow),
{
    let placement = place(tree, span.node, span.x, depth, span.width, camera);
    if is_culled(&placement.rect, viewport) {
        return;
    }
    if placement.rect.bottom() >= 0.0 {
        sink(LaidOutRow {
            node: span.node,
            depth,
            rect: placement.rect,
        });
    }
    for child in placement.children {
        layout_node(tree, child, depth + 1, camera, viewport, sink);
    }
}
