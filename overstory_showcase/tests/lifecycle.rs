// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle tests for a single `Showcase` driven by a recording host.

mod common;

use std::time::Duration;

use common::{Call, FakeHost, Log};
use kurbo::{Point, Rect};
use overstory_showcase::{
    AnimationId, Cutout, FocusShape, HostEvent, HostId, PaintOp, Phase, RecordingPainter,
    ShowOutcome, ShowcaseBuilder, ShowcaseKey, Stage, TargetId, TouchOutcome, TransitionKind,
};

const TARGET: TargetId = TargetId(1);
const INNER: TargetId = TargetId(2);

fn square_host() -> FakeHost {
    FakeHost::new()
        .with_target(TARGET, Rect::new(100.0, 100.0, 200.0, 200.0))
        .with_target(INNER, Rect::new(140.0, 140.0, 160.0, 160.0))
}

fn circle_radius(cutout: Option<Cutout>) -> f64 {
    match cutout {
        Some(Cutout::Circle(c)) => c.radius,
        other => panic!("expected a circular cut-out, got {other:?}"),
    }
}

#[test]
fn scenario_target_gets_a_scaled_circle() {
    let mut stage: Stage = Stage::default();
    let mut host = FakeHost::new().with_target(TARGET, Rect::new(120.0, 120.0, 240.0, 200.0));
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .focus_circle_radius_factor(1.2)
        .build();

    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Shown);
    assert_eq!(showcase.phase(), Phase::Visible);

    let focus = showcase.layout().unwrap().focus.unwrap();
    assert_eq!(focus.center(), Point::new(180.0, 160.0));
    let expected = 120.0_f64.hypot(80.0) / 2.0 * 1.2;
    assert!((focus.radius().unwrap() - expected).abs() < 1e-9);
    assert_eq!(host.attached().len(), 1);
    assert!(stage.is_visible(HostId(1)));
}

#[test]
fn status_bar_shifts_center_unless_fitting_system_windows() {
    let bounds = Rect::new(120.0, 120.0, 240.0, 200.0);

    let mut stage: Stage = Stage::default();
    let mut host = FakeHost::new().with_target(TARGET, bounds);
    host.metrics = host.metrics.with_status_bar(24.0);
    let mut shifted = ShowcaseBuilder::new().focus_on(TARGET).build();
    shifted.show(&mut stage, &mut host);
    let layout = *shifted.layout().unwrap();
    assert_eq!(layout.center, Point::new(180.0, 136.0));
    assert_eq!(layout.overlay.height, 1896.0);
    shifted.remove_view(&mut stage, &mut host);

    let mut fitted = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .fit_system_windows(true)
        .build();
    fitted.show(&mut stage, &mut host);
    let layout = *fitted.layout().unwrap();
    assert_eq!(layout.center, Point::new(180.0, 160.0));
    assert_eq!(layout.overlay.height, 1920.0);
}

#[test]
fn zero_size_target_waits_for_layout() {
    let mut stage: Stage = Stage::default();
    let mut host = FakeHost::new().with_target(TARGET, Rect::ZERO);
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();

    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Deferred);
    assert_eq!(showcase.phase(), Phase::AwaitingLayout);
    let key = showcase.key().unwrap();
    assert_eq!(host.calls, [Call::WaitLayout(key, TARGET)]);

    // Still not laid out: keep waiting.
    showcase.handle(HostEvent::TargetLaidOut, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::AwaitingLayout);
    assert!(host.attached().is_empty());

    host.targets.insert(TARGET, Rect::new(0.0, 0.0, 40.0, 30.0));
    showcase.handle(HostEvent::TargetLaidOut, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::Visible);
    assert!(host.calls.contains(&Call::CancelLayout(key, TARGET)));
    assert_eq!(host.attached(), [key]);
    assert_eq!(
        showcase.layout().unwrap().focus.unwrap().radius(),
        Some(25.0)
    );

    // A late duplicate notification changes nothing.
    showcase.handle(HostEvent::TargetLaidOut, &mut stage, &mut host);
    assert_eq!(host.attached(), [key]);
}

#[test]
fn explicit_position_does_not_wait_for_layout() {
    let mut stage: Stage = Stage::default();
    let mut host = FakeHost::new().with_target(TARGET, Rect::ZERO);
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .focus_rect_at_position(300.0, 400.0, 100.0, 50.0)
        .build();

    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Shown);
    let focus = showcase.layout().unwrap().focus.unwrap();
    assert_eq!(focus.shape(), FocusShape::RoundedRectangle);
    assert_eq!(focus.rect(), Some(Rect::new(250.0, 375.0, 350.0, 425.0)));
}

#[test]
fn delay_defers_attach_until_elapsed() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .delay(Duration::from_millis(300))
        .build();

    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Deferred);
    assert_eq!(showcase.phase(), Phase::PendingAttach);
    let key = showcase.key().unwrap();
    assert_eq!(host.calls, [Call::Delay(key, Duration::from_millis(300))]);
    assert!(!stage.is_visible(HostId(1)));

    showcase.handle(HostEvent::DelayElapsed, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::Visible);
    assert_eq!(host.attached(), [key]);

    // Stale delay once visible.
    showcase.handle(HostEvent::DelayElapsed, &mut stage, &mut host);
    assert_eq!(host.attached(), [key]);
}

#[test]
fn shown_before_is_skipped_without_attaching() {
    let mut stage: Stage = Stage::default();
    stage.registry_mut().mark_shown("intro");
    let log = Log::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .show_once("intro")
        .dismiss_listener(log.dismiss_listener())
        .build();

    assert!(showcase.is_shown_before(&stage));
    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Skipped);
    assert_eq!(showcase.phase(), Phase::Skipped);
    assert!(host.calls.is_empty());
    assert_eq!(log.entries(), ["skipped:intro"]);
}

#[test]
fn show_once_persists_and_reset_allows_again() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();

    let mut first = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .show_once("intro")
        .build();
    assert!(!first.is_shown_before(&stage));
    first.show(&mut stage, &mut host);
    assert!(stage.is_shown_before("intro"));
    first.remove_view(&mut stage, &mut host);

    let mut second = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .show_once("intro")
        .build();
    assert_eq!(second.show(&mut stage, &mut host), ShowOutcome::Skipped);

    stage.reset_show_once("intro");
    let mut third = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .show_once("intro")
        .build();
    assert_eq!(third.show(&mut stage, &mut host), ShowOutcome::Shown);
    assert_eq!(host.attached().len(), 2);
}

#[test]
fn precondition_violations_are_ignored() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();

    assert!(!showcase.hide(&mut host));
    assert!(!showcase.remove_view(&mut stage, &mut host));
    showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::Created);
    assert!(host.calls.is_empty());

    showcase.show(&mut stage, &mut host);
    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Ignored);
    assert_eq!(host.attached().len(), 1);
}

#[test]
fn one_visible_showcase_per_host() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut first = ShowcaseBuilder::new().focus_on(TARGET).build();
    let mut second = ShowcaseBuilder::new().focus_on(TARGET).build();

    assert_eq!(first.show(&mut stage, &mut host), ShowOutcome::Shown);
    assert_eq!(second.show(&mut stage, &mut host), ShowOutcome::Blocked);
    assert_eq!(second.phase(), Phase::Created);
    assert_eq!(host.attached().len(), 1);

    // Another window is independent.
    let mut other = square_host();
    other.id = HostId(2);
    let mut third = ShowcaseBuilder::new().focus_on(TARGET).build();
    assert_eq!(third.show(&mut stage, &mut other), ShowOutcome::Shown);

    first.hide(&mut host);
    first.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);
    assert_eq!(second.show(&mut stage, &mut host), ShowOutcome::Shown);
}

#[test]
fn hide_then_exit_finishes_removal() {
    let mut stage: Stage = Stage::default();
    let log = Log::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .show_once("tour")
        .dismiss_listener(log.dismiss_listener())
        .animation_listener(log.animation_listener())
        .build();

    showcase.show(&mut stage, &mut host);
    showcase.handle(HostEvent::EnterAnimationFinished, &mut stage, &mut host);
    assert!(showcase.hide(&mut host));
    assert_eq!(showcase.phase(), Phase::Dismissing);
    assert!(stage.is_visible(HostId(1)));
    assert!(host.detached().is_empty());

    showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::Removed);
    assert!(!stage.is_visible(HostId(1)));
    assert_eq!(host.detached(), [showcase.key().unwrap()]);
    assert_eq!(log.entries(), ["enter_end", "dismiss:tour", "exit_end"]);

    showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);
    assert_eq!(log.entries().len(), 3);
}

#[test]
fn remove_view_detaches_without_animation() {
    let mut stage: Stage = Stage::default();
    let log = Log::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .dismiss_listener(log.dismiss_listener())
        .animation_listener(log.animation_listener())
        .build();

    showcase.show(&mut stage, &mut host);
    let animations = host.transitions().len();
    assert!(showcase.remove_view(&mut stage, &mut host));
    assert_eq!(showcase.phase(), Phase::Removed);
    assert_eq!(host.transitions().len(), animations);
    assert_eq!(log.entries(), ["dismiss:-"]);
}

#[test]
fn custom_animations_do_not_notify_the_animation_listener() {
    let mut stage: Stage = Stage::default();
    let log = Log::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .enter_animation(AnimationId(1))
        .exit_animation(AnimationId(2))
        .animation_listener(log.animation_listener())
        .build();

    showcase.show(&mut stage, &mut host);
    showcase.handle(HostEvent::EnterAnimationFinished, &mut stage, &mut host);
    showcase.hide(&mut host);
    showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);

    let kinds: Vec<_> = host.transitions().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TransitionKind::Custom(AnimationId(1)),
            TransitionKind::Custom(AnimationId(2))
        ]
    );
    assert!(log.entries().is_empty());
    assert_eq!(showcase.phase(), Phase::Removed);
}

#[test]
fn reveal_needs_host_support_and_a_focus() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    host.reveal = true;

    let mut focused = ShowcaseBuilder::new().focus_on(TARGET).build();
    focused.show(&mut stage, &mut host);
    assert!(matches!(
        focused.transition().unwrap().kind,
        TransitionKind::CircularReveal { from_radius, .. } if from_radius == 50.0
    ));
    focused.remove_view(&mut stage, &mut host);

    let mut unfocused = ShowcaseBuilder::new().title("Welcome").build();
    unfocused.show(&mut stage, &mut host);
    assert!(matches!(
        unfocused.transition().unwrap().kind,
        TransitionKind::Fade { .. }
    ));
}

#[test]
fn hide_current_is_serviced_on_next_frame() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();

    assert!(!stage.hide_current(&mut host));
    showcase.show(&mut stage, &mut host);
    let key = showcase.key().unwrap();
    let frames = host.count(|c| *c == Call::Frame(key));

    assert!(stage.hide_current(&mut host));
    assert_eq!(host.count(|c| *c == Call::Frame(key)), frames + 1);
    assert_eq!(showcase.phase(), Phase::Visible);

    let mut painter = RecordingPainter::new();
    showcase.paint_frame(&mut painter, &mut stage, &mut host);
    assert_eq!(showcase.phase(), Phase::Dismissing);

    showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut host);
    assert!(!stage.is_visible(HostId(1)));
}

#[test]
fn touch_policy() {
    let inside = Point::new(150.0, 150.0);
    let outside = Point::new(10.0, 10.0);
    let mut stage: Stage = Stage::default();

    // Default: any touch dismisses.
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();
    assert_eq!(
        showcase.pointer_down(inside, &mut host),
        TouchOutcome::PassThrough,
        "not shown yet, nothing intercepts"
    );
    showcase.show(&mut stage, &mut host);
    assert_eq!(
        showcase.handle(HostEvent::PointerDown(inside), &mut stage, &mut host),
        Some(TouchOutcome::Dismissed)
    );
    assert_eq!(
        showcase.pointer_down(inside, &mut host),
        TouchOutcome::Consumed
    );
    showcase.remove_view(&mut stage, &mut host);

    // Pass-through inside the hole, close outside.
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .enable_touch_on_focused_view(true)
        .build();
    showcase.show(&mut stage, &mut host);
    assert_eq!(
        showcase.pointer_down(inside, &mut host),
        TouchOutcome::PassThrough
    );
    assert_eq!(showcase.phase(), Phase::Visible);
    assert_eq!(
        showcase.pointer_down(outside, &mut host),
        TouchOutcome::Dismissed
    );
    showcase.remove_view(&mut stage, &mut host);

    // Neither close nor pass-through: everything is swallowed.
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .close_on_touch(false)
        .build();
    showcase.show(&mut stage, &mut host);
    assert_eq!(
        showcase.pointer_down(inside, &mut host),
        TouchOutcome::Consumed
    );
    assert_eq!(
        showcase.pointer_down(outside, &mut host),
        TouchOutcome::Consumed
    );
    assert_eq!(showcase.phase(), Phase::Visible);
}

#[test]
fn clickable_target_narrows_pass_through() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .clickable_on(INNER)
        .enable_touch_on_focused_view(true)
        .build();
    showcase.show(&mut stage, &mut host);

    let spec = host
        .calls
        .iter()
        .find_map(|c| match c {
            Call::Attach(_, spec) => Some(*spec),
            _ => None,
        })
        .unwrap();
    assert!(!spec.consumes_touches);

    assert_eq!(
        showcase.pointer_down(Point::new(150.0, 150.0), &mut host),
        TouchOutcome::PassThrough
    );
    // In the hole but off the clickable element.
    assert_eq!(
        showcase.pointer_down(Point::new(180.0, 150.0), &mut host),
        TouchOutcome::Consumed
    );
    assert_eq!(showcase.phase(), Phase::Visible);
}

#[test]
fn frames_breathe_and_keep_requesting() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();
    showcase.show(&mut stage, &mut host);

    let mut painter = RecordingPainter::new();
    assert!(showcase.paint_frame(&mut painter, &mut stage, &mut host));
    let rest = circle_radius(painter.last_cutout());
    assert!(showcase.paint_frame(&mut painter, &mut stage, &mut host));
    let grown = circle_radius(painter.last_cutout());
    assert_eq!(grown, rest + 1.0);
    assert_eq!(rest, 100.0_f64.hypot(100.0) / 2.0);
}

#[test]
fn disabled_pulse_paints_once_per_request() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .disable_focus_animation()
        .build();
    showcase.show(&mut stage, &mut host);

    let mut painter = RecordingPainter::new();
    assert!(!showcase.paint_frame(&mut painter, &mut stage, &mut host));
    assert!(!showcase.paint_frame(&mut painter, &mut stage, &mut host));
    let radii: Vec<_> = painter
        .ops()
        .iter()
        .filter_map(|op| match op {
            PaintOp::Clear(Cutout::Circle(c)) => Some(c.radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), 2);
    assert_eq!(radii[0], radii[1]);
}

#[test]
fn no_target_no_position_only_dims() {
    let mut stage: Stage = Stage::default();
    let mut host = FakeHost::new();
    let mut showcase = ShowcaseBuilder::new().title("Hello").build();
    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Shown);
    assert!(!showcase.layout().unwrap().has_focus());

    let mut painter = RecordingPainter::new();
    assert!(!showcase.paint_frame(&mut painter, &mut stage, &mut host));
    assert_eq!(painter.ops().len(), 1);
    assert!(matches!(painter.ops()[0], PaintOp::Background { .. }));
}

#[test]
fn content_is_attached_and_reported() {
    let mut stage: Stage = Stage::default();
    let log = Log::default();
    let mut host = square_host();
    let content_log = log.clone();
    let mut showcase = ShowcaseBuilder::new()
        .focus_on(TARGET)
        .custom_view_with_listener(
            overstory_showcase::ContentId(9),
            move |key: ShowcaseKey, _content: &overstory_showcase::Content| {
                content_log.push(format!("content:{}", key.get()));
            },
        )
        .enable_auto_text_position()
        .build();
    showcase.show(&mut stage, &mut host);

    let key = showcase.key().unwrap();
    assert_eq!(log.entries(), [format!("content:{}", key.get())]);
    let region = host
        .calls
        .iter()
        .find_map(|c| match c {
            Call::Content(_, region) => Some(*region),
            _ => None,
        })
        .unwrap()
        .unwrap();
    // More room below the hole than above it.
    assert!(region.y0 > 150.0);
    assert_eq!(region.y1, 1920.0);
}

#[test]
fn finishing_host_never_attaches() {
    let mut stage: Stage = Stage::default();
    let mut host = square_host();
    host.finishing = true;
    let mut showcase = ShowcaseBuilder::new().focus_on(TARGET).build();
    assert_eq!(showcase.show(&mut stage, &mut host), ShowOutcome::Ignored);
    assert!(host.attached().is_empty());
    assert!(!stage.is_visible(HostId(1)));
}
