//! Property tests for the camera, layout and hit testing working together.
use proptest::prelude::*;
use zoomfolder_core::model::{DirTree, NodeIndex};
use zoomfolder_core::view::{
    hit_test, layout_rows, snap_sizes, Camera, CameraView, Viewport, ZoomDirection,
};

const W: f32 = 1280.0;
const H: f32 = 720.0;

// ── Helpers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Gesture {
    Zoom { x: f32, y: f32, zoom_in: bool },
    Drag { dx: f32, dy: f32 },
    Frame { dt: f32 },
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0.0f32..W, 0.0f32..H, any::<bool>())
            .prop_map(|(x, y, zoom_in)| Gesture::Zoom { x, y, zoom_in }),
        (-400.0f32..400.0, -400.0f32..400.0).prop_map(|(dx, dy)| Gesture::Drag { dx, dy }),
        (0.0f32..0.05).prop_map(|dt| Gesture::Frame { dt }),
    ]
}

fn apply(camera: &mut Camera, gestures: &[Gesture]) {
    camera.press();
    for g in gestures {
        match *g {
            Gesture::Zoom { x, y, zoom_in } => {
                let dir = if zoom_in {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                camera.zoom_at(x, y, dir, W);
            }
            Gesture::Drag { dx, dy } => {
                camera.drag(dx, dy, W);
            }
            Gesture::Frame { dt } => camera.update(dt),
        }
    }
    camera.release();
}

/// Build a tree from `(parent choice, own bytes)` pairs. Each new directory
/// hangs off an existing one, then sizes are rolled up and sorted the way a
/// finished scan leaves them.
fn build_tree(items: &[(usize, u64)]) -> DirTree {
    let mut tree = DirTree::new("/root");
    for (i, &(choice, bytes)) in items.iter().enumerate() {
        let parent = NodeIndex::new(choice % tree.len());
        let child = tree.add_child(parent, &format!("d{i}")).unwrap();
        tree.add_file(child, bytes);
    }
    for i in (1..tree.len()).rev() {
        let child = NodeIndex::new(i);
        if let Some(parent) = tree.node(child).parent {
            tree.absorb_child(parent, child);
        }
    }
    for i in 0..tree.len() {
        tree.sort_children(NodeIndex::new(i));
        tree.mark_complete(NodeIndex::new(i));
    }
    snap_sizes(&mut tree);
    tree
}

fn tree_items() -> impl Strategy<Value = Vec<(usize, u64)>> {
    prop::collection::vec((any::<usize>(), 0u64..1_000_000), 1..60)
}

// ── Camera ───────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn zoom_in_keeps_world_point_under_pointer(
        history in prop::collection::vec(gesture(), 0..20),
        x in 0.0f32..W,
        y in 0.0f32..H,
        ticks in 1usize..30,
    ) {
        let mut camera = Camera::new();
        apply(&mut camera, &history);

        let before = camera.target().to_world(x, y);
        for _ in 0..ticks {
            camera.zoom_at(x, y, ZoomDirection::In, W);
        }
        let after = camera.target().to_world(x, y);

        prop_assert!((before.0 - after.0).abs() < 1e-2, "{before:?} vs {after:?}");
        prop_assert!((before.1 - after.1).abs() < 1e-2, "{before:?} vs {after:?}");
    }

    #[test]
    fn target_stays_within_pan_and_zoom_bounds(
        history in prop::collection::vec(gesture(), 0..40),
    ) {
        let mut camera = Camera::new();
        apply(&mut camera, &history);
        let t = camera.target();

        prop_assert!((1.0..=100.0).contains(&t.zoom));
        prop_assert!(t.offset_y <= 0.0);
        prop_assert!(t.offset_x <= 0.0);
        prop_assert!(t.offset_x >= W / t.zoom - W - 1e-3);
    }

    #[test]
    fn current_view_converges_on_target(
        history in prop::collection::vec(gesture(), 0..20),
    ) {
        let mut camera = Camera::new();
        apply(&mut camera, &history);
        for _ in 0..600 {
            camera.update(1.0 / 60.0);
        }
        prop_assert!(camera.is_settled());
    }
}

// ── Layout and hit testing ───────────────────────────────────────────────────

/// Build a tree the way a running scan leaves it. Each entry is
/// `(parent choice, own bytes, finished)`; only finished directories are
/// folded into their parent, so a walking directory can be smaller than the
/// children it already shows.
fn build_partial_tree(items: &[(usize, u64, bool)]) -> DirTree {
    let mut tree = DirTree::new("/root");
    for (i, &(choice, bytes, _)) in items.iter().enumerate() {
        let parent = NodeIndex::new(choice % tree.len());
        let child = tree.add_child(parent, &format!("d{i}")).unwrap();
        tree.add_file(child, bytes);
    }
    for i in (1..tree.len()).rev() {
        let child = NodeIndex::new(i);
        let finished = items[i - 1].2;
        if let (true, Some(parent)) = (finished, tree.node(child).parent) {
            tree.absorb_child(parent, child);
            tree.mark_complete(child);
        }
    }
    snap_sizes(&mut tree);
    tree
}

fn partial_items() -> impl Strategy<Value = Vec<(usize, u64, bool)>> {
    prop::collection::vec((any::<usize>(), 0u64..1_000_000, any::<bool>()), 1..60)
}

fn settled_view(history: &[Gesture]) -> CameraView {
    let mut camera = Camera::new();
    apply(&mut camera, history);
    camera.update(1.0);
    camera.view()
}

fn check_drawn_rows_hit_themselves(
    tree: &DirTree,
    view: &CameraView,
) -> Result<(), TestCaseError> {
    let viewport = Viewport::new(W, H);
    for row in layout_rows(tree, view, viewport) {
        let (cx, cy) = row.rect.center();
        if !viewport.contains(cx, cy) {
            continue;
        }
        prop_assert_eq!(hit_test(tree, view, viewport, cx, cy), Some(row.node));
    }
    Ok(())
}

fn check_hits_are_drawn(
    tree: &DirTree,
    view: &CameraView,
    points: &[(f32, f32)],
) -> Result<(), TestCaseError> {
    let viewport = Viewport::new(W, H);
    let rows = layout_rows(tree, view, viewport);
    for &(x, y) in points {
        // Neighbouring edges are computed separately and may differ in
        // the last bit.
        let near_edge = rows
            .iter()
            .any(|r| (x - r.rect.x).abs() < 1e-2 || (x - r.rect.right()).abs() < 1e-2);
        if near_edge {
            continue;
        }
        let drawn = rows.iter().find(|r| r.rect.contains(x, y)).map(|r| r.node);
        prop_assert_eq!(hit_test(tree, view, viewport, x, y), drawn);
    }
    Ok(())
}

fn check_children_fit(tree: &DirTree, view: &CameraView) -> Result<(), TestCaseError> {
    let rows = layout_rows(tree, view, Viewport::new(W, H));
    for row in &rows {
        let Some(parent) = tree.node(row.node).parent else { continue };
        if let Some(p) = rows.iter().find(|r| r.node == parent) {
            prop_assert!(row.rect.x >= p.rect.x - 1e-2);
            prop_assert!(row.rect.right() <= p.rect.right() + 1e-2);
            prop_assert_eq!(row.depth, p.depth + 1);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_drawn_row_hits_itself_at_its_centre(
        items in tree_items(),
        history in prop::collection::vec(gesture(), 0..12),
    ) {
        check_drawn_rows_hit_themselves(&build_tree(&items), &settled_view(&history))?;
    }

    #[test]
    fn every_hit_is_a_drawn_row_containing_the_point(
        items in tree_items(),
        history in prop::collection::vec(gesture(), 0..12),
        points in prop::collection::vec((0.0f32..W, 0.0f32..H), 1..40),
    ) {
        check_hits_are_drawn(&build_tree(&items), &settled_view(&history), &points)?;
    }

    #[test]
    fn children_never_outgrow_their_parent(items in tree_items()) {
        check_children_fit(&build_tree(&items), &CameraView::HOME)?;
    }
}

// ── Mid-scan trees ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn mid_scan_drawn_rows_hit_themselves(
        items in partial_items(),
        history in prop::collection::vec(gesture(), 0..12),
    ) {
        check_drawn_rows_hit_themselves(&build_partial_tree(&items), &settled_view(&history))?;
    }

    #[test]
    fn mid_scan_hits_are_drawn_rows(
        items in partial_items(),
        history in prop::collection::vec(gesture(), 0..12),
        points in prop::collection::vec((0.0f32..W, 0.0f32..H), 1..40),
    ) {
        check_hits_are_drawn(&build_partial_tree(&items), &settled_view(&history), &points)?;
    }

    #[test]
    fn mid_scan_children_stay_inside_their_parent(
        items in partial_items(),
        history in prop::collection::vec(gesture(), 0..12),
    ) {
        check_children_fit(&build_partial_tree(&items), &settled_view(&history))?;
    }
}

#[test]
fn empty_tree_never_hits() {
    let tree = DirTree::new("/root");
    let view = CameraView::HOME;
    let viewport = Viewport::new(W, H);
    assert!(layout_rows(&tree, &view, viewport).is_empty());
    assert_eq!(hit_test(&tree, &view, viewport, 10.0, 10.0), None);
}
