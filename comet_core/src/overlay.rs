// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay state machine.
//!
//! [`Overlay`] owns every piece of mutable cursor state: the latest pointer
//! sample, the current [`Variant`], visibility, and the three smoothed
//! layers. Backends drive it from two sources on one thread:
//!
//! - pointer callbacks ([`on_pointer_move`](Overlay::on_pointer_move),
//!   [`on_pointer_over`](Overlay::on_pointer_over), and the document
//!   enter/leave pair), which only overwrite fields;
//! - the display tick ([`render`](Overlay::render)), which advances the
//!   filters toward the *latest* sample and hands the resulting
//!   [`FrameChanges`] to a [`Presenter`].
//!
//! Intermediate samples between two ticks are dropped; only the most recent
//! one is ever rendered.
//!
//! # Lifecycle
//!
//! ```text
//!            mount(Hover)
//!   Inactive ───────────► Active
//!      ▲                    │
//!      └────── unmount ─────┘
//! ```
//!
//! `mount` with [`PointerCapability::NoHover`] leaves the overlay inactive.
//! While inactive every handler is a no-op and [`tick`](Overlay::tick)
//! returns `None`, so an event delivered after teardown cannot write
//! anything. Each mount starts from fresh state.

use kurbo::Point;

use crate::backend::{FrameChanges, Presenter};
use crate::capability::PointerCapability;
use crate::classify::classify;
use crate::config::OverlayConfig;
use crate::element::ElementInfo;
use crate::smoothing::{LayerKind, Smoother};
use crate::time::{Duration, HostTime};
use crate::timing::FrameTick;
use crate::trace::{
    FrameEvent, MountEvent, Tracer, UnmountEvent, VariantEvent, VisibilityCause, VisibilityEvent,
};
use crate::variant::{Variant, VariantStyle};

/// Whether the overlay is subscribed and ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No listeners, no loop.
    Inactive,
    /// Listeners attached, loop running.
    Active,
}

/// A three-layer cursor overlay.
#[derive(Clone, Debug)]
pub struct Overlay {
    config: OverlayConfig,
    lifecycle: Lifecycle,
    sample: Point,
    sampled: bool,
    variant: Variant,
    visible: bool,
    smoother: Smoother,
    /// Visibility as of the last frame handed to a presenter.
    presented_visible: bool,
    /// The variant changed since its style was last presented.
    style_dirty: bool,
    frames: u64,
    last_tick: Option<HostTime>,
}

impl Overlay {
    /// Creates an inactive overlay.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Inactive,
            sample: Point::ZERO,
            sampled: false,
            variant: Variant::Default,
            visible: false,
            smoother: Self::fresh_smoother(&config),
            presented_visible: false,
            style_dirty: true,
            frames: 0,
            last_tick: None,
        }
    }

    fn fresh_smoother(config: &OverlayConfig) -> Smoother {
        let f = &config.factors;
        Smoother::new(
            Point::ZERO,
            f.get(LayerKind::Lead),
            f.get(LayerKind::Ring),
            f.get(LayerKind::Trail),
        )
    }

    fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Runs the capability gate and activates the overlay if it passes.
    ///
    /// Returns whether the overlay is active afterwards. Mounting an active
    /// overlay is a no-op.
    pub fn mount(&mut self, capability: PointerCapability, tracer: &mut Tracer<'_>) -> bool {
        if self.is_active() {
            return true;
        }
        let activated = capability.supports_overlay();
        tracer.mount(&MountEvent {
            capability,
            activated,
        });
        if activated {
            self.reset();
            self.lifecycle = Lifecycle::Active;
        }
        activated
    }

    /// Deactivates the overlay and discards all per-mount state.
    pub fn unmount(&mut self, tracer: &mut Tracer<'_>) {
        if !self.is_active() {
            return;
        }
        tracer.unmount(&UnmountEvent {
            frames: self.frames,
        });
        self.reset();
    }

    /// Records the latest pointer position in viewport coordinates.
    ///
    /// Shows the overlay if it was hidden.
    pub fn on_pointer_move(&mut self, position: Point, tracer: &mut Tracer<'_>) {
        if !self.is_active() {
            return;
        }
        self.sample = position;
        self.sampled = true;
        if !self.visible {
            self.set_visible(true, VisibilityCause::PointerMove, tracer);
        }
    }

    /// Reclassifies the hovered path, target-first.
    ///
    /// Returns `true` if the variant changed.
    pub fn on_pointer_over(&mut self, path: &[ElementInfo], tracer: &mut Tracer<'_>) -> bool {
        if !self.is_active() {
            return false;
        }
        let next = classify(path);
        if next == self.variant {
            return false;
        }
        tracer.variant(&VariantEvent {
            previous: self.variant,
            current: next,
        });
        self.variant = next;
        self.style_dirty = true;
        true
    }

    /// Hides the overlay when the pointer leaves the document.
    pub fn on_pointer_leave_document(&mut self, tracer: &mut Tracer<'_>) {
        if self.is_active() && self.visible {
            self.set_visible(false, VisibilityCause::DocumentLeave, tracer);
        }
    }

    /// Shows the overlay again when the pointer re-enters the document.
    ///
    /// Before the first pointer move there is no position to draw at, so
    /// the overlay stays hidden until one arrives.
    pub fn on_pointer_enter_document(&mut self, tracer: &mut Tracer<'_>) {
        if self.is_active() && self.sampled && !self.visible {
            self.set_visible(true, VisibilityCause::DocumentEnter, tracer);
        }
    }

    fn set_visible(&mut self, visible: bool, cause: VisibilityCause, tracer: &mut Tracer<'_>) {
        self.visible = visible;
        tracer.visibility(&VisibilityEvent { visible, cause });
    }

    /// Advances the smoothing filters one frame and computes what changed.
    ///
    /// Returns `None` while inactive. Layers keep converging while hidden,
    /// so re-showing them does not snap.
    pub fn tick(&mut self, tick: &FrameTick, tracer: &mut Tracer<'_>) -> Option<FrameChanges> {
        if !self.is_active() {
            return None;
        }
        self.smoother.advance(self.sample);

        let since_last = self.last_tick.map_or(Duration::ZERO, |prev| {
            tick.now.saturating_duration_since(prev)
        });
        self.last_tick = Some(tick.now);
        self.frames += 1;

        let shown = (self.visible != self.presented_visible).then_some(self.visible);
        self.presented_visible = self.visible;

        let (style, origins) = if self.visible {
            let style = self.style_dirty.then_some(*self.style());
            self.style_dirty = false;
            (style, Some(self.origins()))
        } else {
            (None, None)
        };

        tracer.frame(&FrameEvent {
            frame_index: tick.frame_index,
            now: tick.now,
            since_last,
            target: self.sample,
            positions: self.smoother.positions(),
            visible: self.visible,
        });

        Some(FrameChanges {
            frame_index: tick.frame_index,
            shown,
            style,
            origins,
        })
    }

    /// Ticks and applies the result to `presenter`.
    ///
    /// Frames that require no writes are not forwarded. Returns `false` if
    /// the overlay is inactive.
    pub fn render(
        &mut self,
        tick: &FrameTick,
        presenter: &mut impl Presenter,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(changes) = self.tick(tick, tracer) else {
            return false;
        };
        if !changes.is_empty() {
            presenter.apply(&changes);
        }
        true
    }

    /// Top-left corners, centering each layer on its smoothed position.
    fn origins(&self) -> [Point; 3] {
        let style = self.style();
        let sizes = [
            style.lead_size,
            style.ring_size(),
            self.config.trail.size(),
        ];
        let centers = self.smoother.positions();
        [0, 1, 2].map(|i| centers[i] - sizes[i].to_vec2() * 0.5)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` while mounted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Returns `true` if the layers should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The current hover variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Style of the current variant.
    #[must_use]
    pub fn style(&self) -> &VariantStyle {
        self.config.styles.get(self.variant)
    }

    /// The latest raw pointer sample.
    #[must_use]
    pub fn sample(&self) -> Point {
        self.sample
    }

    /// Smoothed center of one layer.
    #[must_use]
    pub fn layer_position(&self, layer: LayerKind) -> Point {
        self.smoother.layer(layer).position()
    }

    /// The configuration this overlay was built with.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::config::LayerFactors;
    use crate::element::{Markers, Tag};
    use crate::variant::StyleTable;

    #[derive(Default)]
    struct RecordingPresenter {
        frames: Vec<FrameChanges>,
    }

    impl Presenter for RecordingPresenter {
        fn apply(&mut self, changes: &FrameChanges) {
            self.frames.push(*changes);
        }
    }

    fn tick(i: u64) -> FrameTick {
        FrameTick::new(HostTime(i * 16_667), i)
    }

    fn mounted(config: OverlayConfig) -> Overlay {
        let mut overlay = Overlay::new(config);
        assert!(overlay.mount(PointerCapability::Hover, &mut Tracer::none()));
        overlay
    }

    #[test]
    fn starts_inactive_and_hidden() {
        let overlay = Overlay::new(OverlayConfig::STANDARD);
        assert_eq!(overlay.lifecycle(), Lifecycle::Inactive);
        assert!(!overlay.is_visible());
        assert_eq!(overlay.variant(), Variant::Default);
    }

    #[test]
    fn layers_follow_the_recurrence() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let t = &mut Tracer::none();
        let moves = [
            Point::new(120.0, 80.0),
            Point::new(121.0, 82.0),
            Point::new(400.0, 10.0),
            Point::new(33.0, 700.0),
        ];
        let factors = [0.15, 0.12, 0.08];
        let mut expected = [Point::ZERO; 3];

        let mut frame = 0;
        for p in moves {
            overlay.on_pointer_move(p, t);
            for _ in 0..5 {
                overlay.tick(&tick(frame), t);
                frame += 1;
                for (e, f) in expected.iter_mut().zip(factors) {
                    e.x += (p.x - e.x) * f;
                    e.y += (p.y - e.y) * f;
                }
            }
        }

        for kind in LayerKind::ALL {
            let got = overlay.layer_position(kind);
            let want = expected[kind.index()];
            assert!(got.distance(want) < 1e-9, "{kind:?}: {got:?} vs {want:?}");
        }
    }

    #[test]
    fn only_the_latest_sample_between_ticks_counts() {
        let mut a = mounted(OverlayConfig::STANDARD);
        let mut b = mounted(OverlayConfig::STANDARD);
        let t = &mut Tracer::none();

        for x in 0..50 {
            a.on_pointer_move(Point::new(f64::from(x), 5.0), t);
        }
        b.on_pointer_move(Point::new(49.0, 5.0), t);
        a.tick(&tick(0), t);
        b.tick(&tick(0), t);

        for kind in LayerKind::ALL {
            assert_eq!(a.layer_position(kind), b.layer_position(kind));
        }
    }

    #[test]
    fn no_hover_never_activates_or_renders() {
        let mut overlay = Overlay::new(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();

        let button = [ElementInfo::new(Tag::Button)];

        assert!(!overlay.mount(PointerCapability::NoHover, t));
        overlay.on_pointer_move(Point::new(10.0, 10.0), t);
        overlay.on_pointer_enter_document(t);
        assert!(!overlay.on_pointer_over(&button, t));
        for i in 0..10 {
            assert!(!overlay.render(&tick(i), &mut presenter, t));
        }

        assert!(presenter.frames.is_empty());
        assert!(!overlay.is_visible());
        assert_eq!(overlay.sample(), Point::ZERO);
        assert_eq!(overlay.variant(), Variant::Default);
    }

    #[test]
    fn first_move_shows_once_then_leave_and_enter_toggle() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();

        // Nothing to draw before the first move.
        overlay.render(&tick(0), &mut presenter, t);
        assert!(presenter.frames.is_empty());

        overlay.on_pointer_move(Point::new(200.0, 150.0), t);
        assert!(overlay.is_visible());
        overlay.render(&tick(1), &mut presenter, t);
        overlay.on_pointer_move(Point::new(210.0, 160.0), t);
        overlay.render(&tick(2), &mut presenter, t);
        overlay.on_pointer_move(Point::new(220.0, 170.0), t);
        overlay.render(&tick(3), &mut presenter, t);

        let shows: Vec<_> = presenter.frames.iter().filter_map(|f| f.shown).collect();
        assert_eq!(shows, [true]);
        assert!(presenter.frames[0].style.is_some(), "initial style written");
        assert!(presenter.frames[1].style.is_none());

        overlay.on_pointer_leave_document(t);
        assert!(!overlay.is_visible());
        overlay.render(&tick(4), &mut presenter, t);
        let last = presenter.frames.last().unwrap();
        assert_eq!(last.shown, Some(false));
        assert!(last.origins.is_none());

        let before = overlay.layer_position(LayerKind::Trail);
        overlay.on_pointer_enter_document(t);
        assert!(overlay.is_visible());
        overlay.render(&tick(5), &mut presenter, t);
        let last = presenter.frames.last().unwrap();
        assert_eq!(last.shown, Some(true));

        // Positions carried on from where they were, not from the origin.
        let after = overlay.layer_position(LayerKind::Trail);
        let expected_x = before.x + (220.0 - before.x) * 0.08;
        assert!((after.x - expected_x).abs() < 1e-9);
    }

    #[test]
    fn enter_before_any_move_stays_hidden() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        overlay.on_pointer_enter_document(&mut Tracer::none());
        assert!(!overlay.is_visible());
    }

    #[test]
    fn hidden_frames_write_nothing() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();

        overlay.on_pointer_move(Point::new(1.0, 1.0), t);
        overlay.render(&tick(0), &mut presenter, t);
        overlay.on_pointer_leave_document(t);
        for i in 1..20 {
            overlay.render(&tick(i), &mut presenter, t);
        }
        // One visible frame plus the single hide.
        assert_eq!(presenter.frames.len(), 2);
    }

    #[test]
    fn style_is_written_only_on_variant_change() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();
        let button = [ElementInfo::PLAIN, ElementInfo::new(Tag::Button)];

        overlay.on_pointer_move(Point::new(50.0, 50.0), t);
        overlay.render(&tick(0), &mut presenter, t);

        assert!(overlay.on_pointer_over(&button, t));
        assert!(
            !overlay.on_pointer_over(&button, t),
            "same class, no change"
        );
        overlay.render(&tick(1), &mut presenter, t);
        overlay.render(&tick(2), &mut presenter, t);

        let styles: Vec<_> = presenter.frames.iter().filter_map(|f| f.style).collect();
        assert_eq!(
            styles,
            [
                StyleTable::STANDARD.default,
                StyleTable::STANDARD.control
            ]
        );
    }

    #[test]
    fn variant_change_while_hidden_is_written_on_show() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();

        overlay.on_pointer_move(Point::new(5.0, 5.0), t);
        overlay.render(&tick(0), &mut presenter, t);
        overlay.on_pointer_leave_document(t);
        overlay.on_pointer_over(&[ElementInfo::PLAIN.with_markers(Markers::CARD)], t);
        overlay.render(&tick(1), &mut presenter, t);
        assert!(presenter.frames.last().unwrap().style.is_none());

        overlay.on_pointer_enter_document(t);
        overlay.render(&tick(2), &mut presenter, t);
        assert_eq!(
            presenter.frames.last().unwrap().style,
            Some(StyleTable::STANDARD.card)
        );
    }

    #[test]
    fn origins_center_each_layer() {
        let factors = LayerFactors::new(1.0, 0.5, 0.25).unwrap();
        let mut overlay = mounted(OverlayConfig::STANDARD.with_factors(factors));
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();
        let p = Point::new(300.0, 200.0);

        overlay.on_pointer_move(p, t);
        overlay.render(&tick(0), &mut presenter, t);
        let frame = presenter.frames[0];
        assert_eq!(
            frame.origin(LayerKind::Lead),
            Some(Point::new(284.0, 184.0))
        );
        // Ring is halfway there with a 48px diameter.
        assert_eq!(frame.origin(LayerKind::Ring), Some(Point::new(126.0, 76.0)));
        // Trail is a quarter of the way with an 8px diameter.
        assert_eq!(frame.origin(LayerKind::Trail), Some(Point::new(71.0, 46.0)));

        overlay.on_pointer_over(&[ElementInfo::new(Tag::Button)], t);
        overlay.render(&tick(1), &mut presenter, t);
        let frame = presenter.frames[1];
        assert_eq!(
            frame.origin(LayerKind::Lead),
            Some(Point::new(276.0, 176.0))
        );
    }

    #[test]
    fn events_after_unmount_write_nothing() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let mut presenter = RecordingPresenter::default();
        let t = &mut Tracer::none();

        overlay.on_pointer_move(Point::new(10.0, 20.0), t);
        overlay.render(&tick(0), &mut presenter, t);
        let written = presenter.frames.len();

        overlay.unmount(t);
        assert_eq!(overlay.lifecycle(), Lifecycle::Inactive);

        // Events still queued in the host arrive after teardown.
        overlay.on_pointer_move(Point::new(999.0, 999.0), t);
        overlay.on_pointer_over(&[ElementInfo::new(Tag::Anchor)], t);
        overlay.on_pointer_leave_document(t);
        overlay.on_pointer_enter_document(t);
        assert!(overlay.tick(&tick(1), t).is_none());
        assert!(!overlay.render(&tick(2), &mut presenter, t));

        assert_eq!(presenter.frames.len(), written);
        assert_eq!(overlay.sample(), Point::ZERO);
        assert_eq!(overlay.layer_position(LayerKind::Lead), Point::ZERO);
        assert_eq!(overlay.variant(), Variant::Default);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn remount_starts_fresh() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let t = &mut Tracer::none();
        overlay.on_pointer_move(Point::new(10.0, 20.0), t);
        overlay.on_pointer_over(&[ElementInfo::new(Tag::Anchor)], t);
        overlay.tick(&tick(0), t);
        overlay.unmount(t);

        assert!(overlay.mount(PointerCapability::Hover, t));
        assert!(!overlay.is_visible());
        assert_eq!(overlay.variant(), Variant::Default);
        assert_eq!(overlay.layer_position(LayerKind::Ring), Point::ZERO);
        let first = overlay.tick(&tick(0), t).unwrap();
        assert_eq!(first.shown, None);
    }

    #[test]
    fn double_mount_keeps_state() {
        let mut overlay = mounted(OverlayConfig::STANDARD);
        let t = &mut Tracer::none();
        overlay.on_pointer_move(Point::new(10.0, 20.0), t);
        assert!(overlay.mount(PointerCapability::Hover, t));
        assert_eq!(overlay.sample(), Point::new(10.0, 20.0));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_reports_each_transition_once() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log {
            mounts: Vec<bool>,
            visibility: Vec<(bool, VisibilityCause)>,
            variants: Vec<Variant>,
            frames: u64,
            unmounted_after: Option<u64>,
        }
        impl TraceSink for Log {
            fn on_mount(&mut self, e: &MountEvent) {
                self.mounts.push(e.activated);
            }
            fn on_visibility(&mut self, e: &VisibilityEvent) {
                self.visibility.push((e.visible, e.cause));
            }
            fn on_variant(&mut self, e: &VariantEvent) {
                self.variants.push(e.current);
            }
            fn on_frame(&mut self, _: &FrameEvent) {
                self.frames += 1;
            }
            fn on_unmount(&mut self, e: &UnmountEvent) {
                self.unmounted_after = Some(e.frames);
            }
        }

        let mut log = Log::default();
        {
            let t = &mut Tracer::new(&mut log);
            let mut overlay = Overlay::new(OverlayConfig::STANDARD);
            overlay.mount(PointerCapability::Hover, t);
            for i in 0..3_u32 {
                overlay.on_pointer_move(Point::new(f64::from(i), 0.0), t);
                overlay.tick(&tick(u64::from(i)), t);
            }
            overlay.on_pointer_over(&[ElementInfo::new(Tag::Anchor)], t);
            overlay.on_pointer_leave_document(t);
            overlay.on_pointer_enter_document(t);
            overlay.unmount(t);
        }

        assert_eq!(log.mounts, [true]);
        assert_eq!(
            log.visibility,
            [
                (true, VisibilityCause::PointerMove),
                (false, VisibilityCause::DocumentLeave),
                (true, VisibilityCause::DocumentEnter),
            ]
        );
        assert_eq!(log.variants, [Variant::Link]);
        assert_eq!(log.frames, 3);
        assert_eq!(log.unmounted_after, Some(3));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn never_activated_overlay_traces_nothing() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Count(u32);
        impl TraceSink for Count {
            fn on_mount(&mut self, _: &MountEvent) {
                self.0 += 1;
            }
            fn on_unmount(&mut self, _: &UnmountEvent) {
                self.0 += 1;
            }
            fn on_visibility(&mut self, _: &VisibilityEvent) {
                self.0 += 1;
            }
            fn on_variant(&mut self, _: &VariantEvent) {
                self.0 += 1;
            }
            fn on_frame(&mut self, _: &FrameEvent) {
                self.0 += 1;
            }
        }

        // Events delivered while a host is still wiring up, followed by a
        // teardown before activation, leave the sink untouched.
        let mut count = Count::default();
        {
            let t = &mut Tracer::new(&mut count);
            let mut overlay = Overlay::new(OverlayConfig::STANDARD);
            overlay.on_pointer_move(Point::new(4.0, 4.0), t);
            overlay.on_pointer_over(&[ElementInfo::new(Tag::Button)], t);
            overlay.on_pointer_leave_document(t);
            overlay.on_pointer_enter_document(t);
            assert!(overlay.tick(&tick(0), t).is_none());
            overlay.unmount(t);
        }
        assert_eq!(count.0, 0);

        let mut overlay = Overlay::new(OverlayConfig::STANDARD);
        overlay.mount(PointerCapability::Hover, &mut Tracer::new(&mut count));
        assert_eq!(count.0, 1, "only the mount itself is traced");
    }
}
