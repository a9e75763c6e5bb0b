//! Icicle canvas: input mapping, painting and the hover tooltip.
//!
//! Per frame: feed pointer input to the camera, advance it, then take the
//! scan lock once for size animation, hit testing and layout. Everything
//! drawn comes from [`layout`], and the hover from [`hit_test`], both against
//! the same camera view.
use egui::{pos2, vec2, Align2, FontId, Mesh, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui};
use zoomfolder_core::model::size::{format_count, format_size};
use zoomfolder_core::model::DirTree;
use zoomfolder_core::view::{
    animate_sizes, hit_test, layout, LaidOutRow, Viewport, ZoomDirection,
};

use crate::state::{AppState, HoverInfo};
use crate::theme::{hover_color, outline_color, row_color, ZoomfolderTheme};

/// Longest frame step fed to the animations, in seconds.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Scroll distance egui reports for one mouse wheel notch.
const POINTS_PER_WHEEL_TICK: f32 = 50.0;
const MAX_TICKS_PER_FRAME: usize = 10;

const GRID_SPACING: f32 = 24.0;

const LABEL_PAD: f32 = 4.0;
/// Rows at least this wide get a name label.
const LABEL_MIN_WIDTH: f32 = 40.0;
/// Rows at least this wide also show their size.
const SIZE_LABEL_MIN_WIDTH: f32 = 120.0;
const LABEL_FONT_SIZE: f32 = 13.0;

/// Number of zoom ticks in one frame's vertical scroll.
fn wheel_ticks(scroll_y: f32) -> usize {
    if scroll_y == 0.0 {
        return 0;
    }
    ((scroll_y.abs() / POINTS_PER_WHEEL_TICK).round() as usize).clamp(1, MAX_TICKS_PER_FRAME)
}

/// Draw the canvas filling the remaining space of `ui`.
pub fn icicle(ui: &mut Ui, state: &mut AppState, theme: &ZoomfolderTheme) {
    let (bounds, _response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let painter = ui.painter_at(bounds);
    paint_background(&painter, bounds, theme);

    let viewport = Viewport::new(bounds.width(), bounds.height());
    let origin = bounds.min;

    // ── Input ──────────────────────────────────────────────────────
    let (dt, scroll_y, hover_pos, delta, pressed, released) = ui.input(|i| {
        (
            i.stable_dt.min(MAX_FRAME_DT),
            i.raw_scroll_delta.y,
            i.pointer.hover_pos(),
            i.pointer.delta(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
        )
    });
    let local = hover_pos
        .filter(|p| bounds.contains(*p))
        .map(|p| p - origin);

    let camera = &mut state.camera;
    if pressed && local.is_some() {
        camera.press();
    }
    if released {
        camera.release();
    }
    if delta != egui::Vec2::ZERO {
        camera.drag(delta.x, delta.y, viewport.width);
    }
    if let Some(p) = local {
        let direction = if scroll_y > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        for _ in 0..wheel_ticks(scroll_y) {
            camera.zoom_at(p.x, p.y, direction, viewport.width);
        }
    }
    camera.update(dt);
    let view = camera.view();

    // ── Locked section ─────────────────────────────────────────────
    let Some(handle) = state.scan.as_ref() else {
        state.hovered = None;
        return;
    };
    let mut scan = handle.lock();
    state.animating = animate_sizes(&mut scan.tree, dt);

    let tree = &scan.tree;
    let hovered = local.and_then(|p| hit_test(tree, &view, viewport, p.x, p.y));
    layout(tree, &view, viewport, |row| {
        paint_row(&painter, origin, tree, row, hovered == Some(row.node), theme);
    });
    state.hovered = hovered.map(|node| HoverInfo::from_node(tree.node(node)));
    drop(scan);

    if let Some(info) = &state.hovered {
        show_tooltip(ui, info, theme);
    }
}

fn paint_row(
    painter: &Painter,
    origin: Pos2,
    tree: &DirTree,
    row: LaidOutRow,
    hovered: bool,
    theme: &ZoomfolderTheme,
) {
    let node = tree.node(row.node);
    let rect = Rect::from_min_size(
        origin + vec2(row.rect.x, row.rect.y),
        vec2(row.rect.w, row.rect.h),
    );

    let base = row_color(&node.name);
    let (fill, outline) = if hovered {
        (hover_color(base), theme.hover_outline)
    } else {
        (base, outline_color(base))
    };
    painter.rect_filled(rect, 0.0, fill);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, outline), egui::StrokeKind::Inside);

    if row.rect.w <= LABEL_MIN_WIDTH {
        return;
    }
    let text = if row.rect.w > SIZE_LABEL_MIN_WIDTH {
        format!("{} {}", node.name, format_size(node.size))
    } else {
        node.name.to_string()
    };

    // Keep the label on screen when the row starts left of the canvas.
    let clip = rect.shrink2(vec2(LABEL_PAD, 0.0)).intersect(painter.clip_rect());
    if clip.width() <= 0.0 {
        return;
    }
    painter.with_clip_rect(clip).text(
        pos2(clip.left(), rect.center().y),
        Align2::LEFT_CENTER,
        text,
        FontId::proportional(LABEL_FONT_SIZE),
        theme.label,
    );
}

/// Vertical gradient with a dot grid on top.
fn paint_background(painter: &Painter, bounds: Rect, theme: &ZoomfolderTheme) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(bounds.left_top(), theme.background_top);
    mesh.colored_vertex(bounds.right_top(), theme.background_top);
    mesh.colored_vertex(bounds.right_bottom(), theme.background_bottom);
    mesh.colored_vertex(bounds.left_bottom(), theme.background_bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));

    let mut y = bounds.top() + GRID_SPACING;
    while y < bounds.bottom() {
        let mut x = bounds.left() + GRID_SPACING;
        while x < bounds.right() {
            painter.rect_filled(
                Rect::from_center_size(pos2(x, y), vec2(1.0, 1.0)),
                0.0,
                theme.grid_dot,
            );
            x += GRID_SPACING;
        }
        y += GRID_SPACING;
    }
}

fn show_tooltip(ui: &Ui, info: &HoverInfo, theme: &ZoomfolderTheme) {
    let id = ui.id().with("icicle");
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        egui::LayerId::new(egui::Order::Tooltip, id),
        id.with("icicle_tip"),
        |ui| {
            ui.label(
                egui::RichText::new(&info.name)
                    .strong()
                    .size(12.0)
                    .color(theme.text_primary),
            );
            ui.label(
                egui::RichText::new(format!(
                    "{}  {} files",
                    format_size(info.size),
                    format_count(u64::from(info.file_count)),
                ))
                .color(theme.text_muted),
            );
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_ticks_rounds_and_caps() {
        assert_eq!(wheel_ticks(0.0), 0);
        assert_eq!(wheel_ticks(3.0), 1);
        assert_eq!(wheel_ticks(-50.0), 1);
        assert_eq!(wheel_ticks(120.0), 2);
        assert_eq!(wheel_ticks(100_000.0), MAX_TICKS_PER_FRAME);
    }
}
