mod common;

use canvas_paint::{PaintConfig, PixelBuffer, RasterSurface, Tool, ToolbarEvent, build_canvas};
use common::{Op, marker, recording_dispatcher};
use egui::{PointerButton, pos2};

const PRIMARY: PointerButton = PointerButton::Primary;

#[test]
fn test_construction_syncs_full_style() {
    let dispatcher = recording_dispatcher();
    assert_eq!(
        dispatcher.surface().borrow().ops,
        vec![
            Op::StrokeColor("#000".to_string()),
            Op::FillColor("#000".to_string()),
            Op::LineWidth(1.0),
            Op::GlobalAlpha(1.0),
        ]
    );
}

#[test]
fn test_freehand_draws_one_segment_per_move() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.surface().borrow_mut().take_ops();

    let moves = [pos2(10.0, 0.0), pos2(20.0, 5.0), pos2(30.0, 5.0)];
    dispatcher.pointer_down(pos2(0.0, 0.0), PRIMARY);
    for at in moves {
        dispatcher.pointer_move(at);
    }

    let ops = dispatcher.surface().borrow().drawing_ops();
    assert_eq!(ops.iter().filter(|op| **op == Op::Stroke).count(), moves.len());
    assert_eq!(
        &ops[..4],
        &[Op::BeginPath, Op::MoveTo(pos2(0.0, 0.0)), Op::LineTo(pos2(10.0, 0.0)), Op::Stroke]
    );
    // Each segment starts where the previous one ended.
    assert_eq!(
        &ops[4..8],
        &[Op::BeginPath, Op::MoveTo(pos2(10.0, 0.0)), Op::LineTo(pos2(20.0, 5.0)), Op::Stroke]
    );
    assert!(!ops.iter().any(|op| matches!(op, Op::Restore(_))));
    assert_eq!(dispatcher.state().anchor(), pos2(30.0, 5.0));

    dispatcher.pointer_up(pos2(30.0, 5.0), PRIMARY);
    assert!(!dispatcher.state().is_active());
    assert_eq!(dispatcher.state().anchor(), pos2(30.0, 5.0));
    assert_eq!(dispatcher.committed_strokes(), 1);
}

#[test]
fn test_filled_circle_restores_stroke_start() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.apply(ToolbarEvent::ToolSelected(Tool::FilledCircle));
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.pointer_down(pos2(10.0, 10.0), PRIMARY);
    dispatcher.pointer_move(pos2(40.0, 40.0));
    dispatcher.pointer_up(pos2(40.0, 40.0), PRIMARY);

    let ops = dispatcher.surface().borrow().drawing_ops();
    let last = &ops[ops.len() - 4..];
    assert_eq!(last[0], Op::Restore(0));
    assert_eq!(last[1], Op::BeginPath);
    match last[2] {
        Op::Arc { center, radius } => {
            assert_eq!(center, pos2(10.0, 10.0));
            assert!((radius - 42.43).abs() < 0.01);
        }
        ref other => panic!("expected an arc, got {other:?}"),
    }
    assert_eq!(last[3], Op::Fill);
    assert!(!ops.contains(&Op::Stroke));

    // The press took snapshot 0 and the release snapshot 1, which is now the base.
    let taken = dispatcher.surface().borrow().snapshots_taken();
    assert_eq!(taken, 2);
    assert_eq!(dispatcher.state().pre_snapshot().map(marker), Some(taken - 1));
    assert!(!dispatcher.state().is_active());
}

#[test]
fn test_every_shape_preview_erases_to_the_same_base() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.apply(ToolbarEvent::ToolSelected(Tool::StraightLine));
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.pointer_down(pos2(5.0, 5.0), PRIMARY);
    for at in [pos2(10.0, 10.0), pos2(50.0, 20.0), pos2(15.0, 80.0)] {
        dispatcher.pointer_move(at);
    }
    dispatcher.pointer_up(pos2(60.0, 60.0), PRIMARY);

    let ops = dispatcher.surface().borrow().drawing_ops();
    let restores: Vec<_> = ops.iter().filter(|op| matches!(op, Op::Restore(_))).collect();
    assert_eq!(restores.len(), 4);
    assert!(restores.iter().all(|op| **op == Op::Restore(0)));
    assert_eq!(
        &ops[ops.len() - 5..],
        &[
            Op::Restore(0),
            Op::BeginPath,
            Op::MoveTo(pos2(5.0, 5.0)),
            Op::LineTo(pos2(60.0, 60.0)),
            Op::Stroke
        ]
    );
}

#[test]
fn test_zero_radius_circle_renders_nothing() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.apply(ToolbarEvent::ToolSelected(Tool::Circle));
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.pointer_down(pos2(5.0, 5.0), PRIMARY);
    dispatcher.pointer_up(pos2(5.0, 5.0), PRIMARY);

    assert_eq!(dispatcher.surface().borrow().drawing_ops(), vec![Op::Restore(0)]);
    assert_eq!(dispatcher.committed_strokes(), 1);
}

#[test]
fn test_style_change_applies_to_next_render_only() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.apply(ToolbarEvent::ColorChanged("#ff0000".to_string()));
    dispatcher.pointer_down(pos2(0.0, 0.0), PRIMARY);
    dispatcher.pointer_move(pos2(10.0, 0.0));
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.apply(ToolbarEvent::ColorChanged("#00ff00".to_string()));
    dispatcher.apply(ToolbarEvent::LineWidthChanged(6.0));
    dispatcher.pointer_move(pos2(20.0, 0.0));

    assert_eq!(
        dispatcher.surface().borrow().ops,
        vec![
            Op::StrokeColor("#00ff00".to_string()),
            Op::FillColor("#00ff00".to_string()),
            Op::LineWidth(6.0),
            Op::BeginPath,
            Op::MoveTo(pos2(10.0, 0.0)),
            Op::LineTo(pos2(20.0, 0.0)),
            Op::Stroke,
        ]
    );
}

#[test]
fn test_non_primary_and_idle_events_are_ignored() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.pointer_down(pos2(5.0, 5.0), PointerButton::Secondary);
    assert!(!dispatcher.state().is_active());
    dispatcher.pointer_move(pos2(15.0, 5.0));
    dispatcher.pointer_up(pos2(15.0, 5.0), PRIMARY);

    let surface = dispatcher.surface().borrow();
    assert!(surface.ops.is_empty());
    assert_eq!(surface.snapshots_taken(), 0);
    assert_eq!(dispatcher.committed_strokes(), 0);
}

#[test]
fn test_secondary_release_does_not_end_the_gesture() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.pointer_down(pos2(5.0, 5.0), PRIMARY);
    dispatcher.pointer_up(pos2(6.0, 5.0), PointerButton::Middle);
    assert!(dispatcher.state().is_active());
}

#[test]
fn test_tool_switch_mid_gesture_uses_new_tool() {
    let mut dispatcher = recording_dispatcher();
    dispatcher.pointer_down(pos2(10.0, 10.0), PRIMARY);
    dispatcher.apply(ToolbarEvent::ToolSelected(Tool::Circle));
    assert!(dispatcher.state().is_active());
    dispatcher.surface().borrow_mut().take_ops();

    dispatcher.pointer_move(pos2(13.0, 14.0));

    assert_eq!(
        dispatcher.surface().borrow().drawing_ops(),
        vec![
            Op::Restore(0),
            Op::BeginPath,
            Op::Arc { center: pos2(10.0, 10.0), radius: 5.0 },
            Op::Stroke
        ]
    );
}

#[test]
fn test_shape_result_ignores_intermediate_moves() {
    let mut config = PaintConfig::default();
    config.canvas.width = 80;
    config.canvas.height = 60;
    config.style.tool = Tool::Circle;
    config.style.line_width = 3.0;

    let mut wandering = build_canvas(&config).unwrap();
    wandering.pointer_down(pos2(30.0, 30.0), PRIMARY);
    for at in [pos2(70.0, 50.0), pos2(31.0, 29.0), pos2(5.0, 55.0)] {
        wandering.pointer_move(at);
    }
    wandering.pointer_up(pos2(45.0, 30.0), PRIMARY);

    let mut direct = build_canvas(&config).unwrap();
    direct.pointer_down(pos2(30.0, 30.0), PRIMARY);
    direct.pointer_up(pos2(45.0, 30.0), PRIMARY);

    assert_eq!(wandering.surface().borrow().snapshot(), direct.surface().borrow().snapshot());
    assert_ne!(direct.surface().borrow().pixel(45, 30)[3], 0);
}

#[test]
fn test_click_without_drag_leaves_no_mark_for_every_tool() {
    for tool in Tool::ALL {
        for line_width in [1.0, 8.0] {
            let mut config = PaintConfig::default();
            config.canvas.width = 40;
            config.canvas.height = 40;
            config.style.tool = tool;
            config.style.line_width = line_width;

            let mut dispatcher = build_canvas(&config).unwrap();
            dispatcher.pointer_down(pos2(20.0, 20.0), PRIMARY);
            dispatcher.pointer_up(pos2(20.0, 20.0), PRIMARY);

            assert_eq!(
                dispatcher.surface().borrow().snapshot(),
                PixelBuffer::new(40, 40),
                "{tool} at width {line_width} left a mark"
            );
            assert_eq!(dispatcher.committed_strokes(), 1);
        }
    }
}

#[test]
fn test_thick_circle_outline_is_solid() {
    let mut config = PaintConfig::default();
    config.canvas.width = 80;
    config.canvas.height = 80;
    config.style.tool = Tool::Circle;
    config.style.line_width = 30.0;

    let mut dispatcher = build_canvas(&config).unwrap();
    dispatcher.pointer_down(pos2(40.0, 40.0), PRIMARY);
    dispatcher.pointer_move(pos2(70.0, 70.0));
    dispatcher.pointer_up(pos2(45.0, 40.0), PRIMARY);

    // Radius 5, half width 15: a solid disc of radius 20 with no ring left
    // over from the larger preview.
    let surface = dispatcher.surface().borrow();
    for y in 0..80 {
        for x in 0..80 {
            let d = (pos2(x as f32 + 0.5, y as f32 + 0.5) - pos2(40.0, 40.0)).length();
            let alpha = surface.pixel(x, y)[3];
            if d <= 19.0 {
                assert!(alpha > 200, "hole at ({x}, {y}), {d:.2} from center");
            } else if d >= 21.0 {
                assert_eq!(alpha, 0, "stray paint at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_style_set_before_stroke_is_used() {
    let mut config = PaintConfig::default();
    config.canvas.width = 40;
    config.canvas.height = 20;
    config.style.color = "#ff0000".to_string();
    config.style.line_width = 4.0;

    let mut dispatcher = build_canvas(&config).unwrap();
    dispatcher.pointer_down(pos2(5.0, 10.0), PRIMARY);
    dispatcher.pointer_move(pos2(35.0, 10.0));
    dispatcher.pointer_up(pos2(35.0, 10.0), PRIMARY);

    let surface = dispatcher.surface().borrow();
    assert_eq!(surface.pixel(20, 9), image::Rgba([255, 0, 0, 255]));
    assert_eq!(surface.pixel(20, 2)[3], 0);
}
