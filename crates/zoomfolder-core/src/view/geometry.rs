//! Screen geometry shared by layout and hit testing.
//!
//! [`place`] is the only code that turns a node and its world span into a
//! screen rectangle and child spans. Both traversals go through it, so what
//! is hit is always exactly what was drawn.
use super::camera::CameraView;
use crate::model::{DirTree, NodeIndex};
use std::slice;

/// Row height in world units.
pub const ROW_HEIGHT: f32 = 28.0;

/// Vertical gap between rows in world units.
pub const ROW_GAP: f32 = 2.0;

pub const ROW_STRIDE: f32 = ROW_HEIGHT + ROW_GAP;

/// Children narrower than this many screen pixels are not visited.
pub const MIN_SPAN: f32 = 0.5;

/// Drawable area, with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Half-open containment: left and top edges inside, right and bottom out.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Horizontal world-space extent assigned to one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub node: NodeIndex,
    pub x: f32,
    pub width: f32,
}

/// A node's screen rectangle and the spans of its visible children.
pub struct Placement<'t> {
    pub rect: ScreenRect,
    pub children: ChildSpans<'t>,
}

/// World-space width a child receives out of its parent's width.
#[inline]
pub fn span_width(parent_width: f32, child_display: f64, parent_display: f64) -> f32 {
    if parent_display > 0.0 {
        (f64::from(parent_width) * (child_display / parent_display)) as f32
    } else {
        0.0
    }
}

/// Top of the row at `depth`, in world units.
#[inline]
pub fn row_y(depth: u32) -> f32 {
    depth as f32 * ROW_STRIDE
}

/// Iterator over a node's children, left to right, in world space.
///
/// Children are laid out in child-list order. A child whose on-screen width
/// is below [`MIN_SPAN`] is not yielded but still occupies its share, so the
/// positions of later siblings do not depend on zoom.
///
/// Spans never leave the parent's `[x, x + width)`. Mid-scan a child can be
/// larger than its parent, whose total only grows when the walk of that
/// parent returns; such a child is cut at the parent's right edge.
pub struct ChildSpans<'t> {
    tree: &'t DirTree,
    children: slice::Iter<'t, NodeIndex>,
    parent_display: f64,
    x: f32,
    end: f32,
    width: f32,
    zoom: f32,
}

impl Iterator for ChildSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            let &child = self.children.next()?;
            let display = self.tree.node(child).display_size;
            let remaining = (self.end - self.x).max(0.0);
            let width = span_width(self.width, display, self.parent_display).min(remaining);
            let x = self.x;
            self.x += width;
            if width * self.zoom >= MIN_SPAN {
                return Some(Span {
                    node: child,
                    x,
                    width,
                });
            }
        }
    }
}

/// Spans for the children of `node`, which itself covers `[x, x + width)`.
pub fn child_spans<'t>(
    tree: &'t DirTree,
    node: NodeIndex,
    x: f32,
    width: f32,
    zoom: f32,
) -> ChildSpans<'t> {
    ChildSpans {
        tree,
        children: tree.children(node).iter(),
        parent_display: tree.node(node).display_size,
        x,
        end: x + width,
        width,
        zoom,
    }
}

/// Spans for the top row: the root's children across the full viewport width.
///
/// The root itself is never drawn.
pub fn root_spans(tree: &DirTree, viewport_width: f32, zoom: f32) -> ChildSpans<'_> {
    child_spans(tree, tree.root(), 0.0, viewport_width, zoom)
}

/// Screen rectangle of `node` at `depth` covering world `[x, x + width)`,
/// plus the spans of its children.
pub fn place<'t>(
    tree: &'t DirTree,
    node: NodeIndex,
    x: f32,
    depth: u32,
    width: f32,
    camera: &CameraView,
) -> Placement<'t> {
    let rect = ScreenRect {
        x: camera.to_screen_x(x),
        y: camera.to_screen_y(row_y(depth)),
        w: width * camera.zoom,
        h: ROW_HEIGHT * camera.zoom,
    };
    Placement {
        rect,
        children: child_spans(tree, node, x, width, camera.zoom),
    }
}

/// `true` if nothing at or below this rectangle can be visible.
///
/// Rows below the viewport cull their whole subtree since descendants only
/// ever sit lower. Rows above the top are not culled.
#[inline]
pub fn is_culled(rect: &ScreenRect, viewport: &Viewport) -> bool {
    rect.right() < 0.0 || rect.x > viewport.width || rect.y > viewport.height
}
