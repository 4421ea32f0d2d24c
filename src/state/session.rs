//! Measurement session: the surface-initialised flag plus the two-point
//! recorder, as one explicit value.
//!
//! Transitions are pure. Each returns the next session together with the
//! [`Effect`]s the view has to perform (drawing, readout, timer), so the state
//! machine can be driven without a canvas.

use crate::config::MeasureConfig;
use crate::model::{Point, PointerClick, SurfaceSize, format_label, format_readout};
use crate::state::mapper::map_click;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    OnePoint,
    /// Two points recorded, distance shown, waiting for the reset timer.
    Measured,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Set the canvas backing width/height.
    ResizeSurface(SurfaceSize),
    /// Clear the whole canvas.
    ClearSurface(SurfaceSize),
    DrawMarker(Point),
    DrawSegment { from: Point, to: Point },
    DrawLabel { at: Point, text: String },
    ShowReadout(String),
    /// Call [`MeasureSession::reset`] with `cycle` after `delay_ms`.
    ScheduleReset { delay_ms: u32, cycle: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub session: MeasureSession,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(session: &MeasureSession) -> Self {
        Self {
            session: session.clone(),
            effects: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasureSession {
    /// `Some` once the surface has been sized for the current stream.
    surface: Option<SurfaceSize>,
    points: Vec<Point>,
    /// Bumped whenever the point sequence is discarded so a late reset from
    /// an older cycle cannot wipe a newer one.
    cycle: u64,
}

impl MeasureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.points.len() {
            0 => Phase::Empty,
            1 => Phase::OnePoint,
            _ => Phase::Measured,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// A new stream was attached: the surface must be sized again.
    pub fn begin_stream(&self) -> Transition {
        Transition {
            session: MeasureSession {
                surface: None,
                points: Vec::new(),
                cycle: self.cycle + 1,
            },
            effects: Vec::new(),
        }
    }

    /// Sizes the surface to the video's intrinsic resolution. Runs once per
    /// stream; later calls (e.g. the `play` fallback after `loadedmetadata`)
    /// and calls without a usable size are no-ops.
    pub fn initialize_surface(&self, intrinsic: Option<SurfaceSize>) -> Transition {
        let size = match (self.surface, intrinsic) {
            (None, Some(size)) => size,
            _ => return Transition::unchanged(self),
        };
        Transition {
            session: MeasureSession {
                surface: Some(size),
                points: Vec::new(),
                cycle: self.cycle,
            },
            effects: vec![Effect::ResizeSurface(size), Effect::ClearSurface(size)],
        }
    }

    /// Clears the overlay and empties the point sequence. Stale cycles are
    /// ignored.
    pub fn reset(&self, cycle: u64) -> Transition {
        if cycle != self.cycle {
            return Transition::unchanged(self);
        }
        let effects = self
            .surface
            .map(|size| vec![Effect::ClearSurface(size)])
            .unwrap_or_default();
        Transition {
            session: MeasureSession {
                surface: self.surface,
                points: Vec::new(),
                cycle: self.cycle + 1,
            },
            effects,
        }
    }
}

/// Click handling for the recorder.
///
/// Ignored before the surface is sized, when the click cannot be mapped, and
/// while two points are already held. Otherwise the mapped point is recorded
/// and marked; the second point also draws the segment and its label, updates
/// the readout and schedules the reset.
pub fn handle_click(
    session: &MeasureSession,
    click: &PointerClick,
    cfg: &MeasureConfig,
) -> Transition {
    let Some(surface) = session.surface else {
        return Transition::unchanged(session);
    };
    if session.phase() == Phase::Measured {
        return Transition::unchanged(session);
    }
    let Some(point) = map_click(surface, click) else {
        return Transition::unchanged(session);
    };

    let mut next = session.clone();
    next.points.push(point);
    let mut effects = vec![Effect::DrawMarker(point)];

    if let [a, b] = next.points.as_slice() {
        let (a, b) = (*a, *b);
        let d = a.distance_to(&b);
        let mid = a.midpoint(&b);
        effects.push(Effect::ShowReadout(format_readout(d, cfg.readout_decimals)));
        effects.push(Effect::DrawSegment { from: a, to: b });
        effects.push(Effect::DrawLabel {
            at: Point::new(mid.x, mid.y - cfg.label.offset_y),
            text: format_label(d, cfg.label.decimals, &cfg.label.suffix),
        });
        effects.push(Effect::ScheduleReset {
            delay_ms: cfg.reset_delay_ms,
            cycle: next.cycle,
        });
    }

    Transition {
        session: next,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewportRect;

    const HD: SurfaceSize = SurfaceSize {
        width: 1280,
        height: 720,
    };

    // canvas displayed at its backing size, so clicks map 1:1
    fn click(x: f64, y: f64) -> PointerClick {
        PointerClick {
            client_x: x,
            client_y: y,
            rect: ViewportRect {
                left: 0.0,
                top: 0.0,
                width: 1280.0,
                height: 720.0,
            },
        }
    }

    fn ready() -> MeasureSession {
        MeasureSession::new().initialize_surface(Some(HD)).session
    }

    #[test]
    fn initialization_sizes_and_clears_once() {
        let t = MeasureSession::new().initialize_surface(Some(HD));
        assert!(t.session.is_initialized());
        assert_eq!(
            t.effects,
            vec![Effect::ResizeSurface(HD), Effect::ClearSurface(HD)]
        );

        // play fallback after loadedmetadata
        let again = t.session.initialize_surface(Some(SurfaceSize {
            width: 640,
            height: 480,
        }));
        assert_eq!(again.session.surface(), Some(HD));
        assert!(again.effects.is_empty());
    }

    #[test]
    fn initialization_waits_for_a_real_size() {
        let t = MeasureSession::new().initialize_surface(None);
        assert!(!t.session.is_initialized());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn click_before_sizing_is_ignored() {
        let cfg = MeasureConfig::default();
        let t = handle_click(&MeasureSession::new(), &click(10.0, 10.0), &cfg);
        assert!(t.session.points().is_empty());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn first_click_draws_a_marker() {
        let cfg = MeasureConfig::default();
        let t = handle_click(&ready(), &click(10.0, 20.0), &cfg);
        assert_eq!(t.session.phase(), Phase::OnePoint);
        assert_eq!(t.effects, vec![Effect::DrawMarker(Point::new(10.0, 20.0))]);
    }

    #[test]
    fn second_click_measures() {
        let cfg = MeasureConfig::default();
        let s = handle_click(&ready(), &click(0.0, 0.0), &cfg).session;
        let t = handle_click(&s, &click(3.0, 4.0), &cfg);
        assert_eq!(t.session.phase(), Phase::Measured);
        assert_eq!(
            t.effects,
            vec![
                Effect::DrawMarker(Point::new(3.0, 4.0)),
                Effect::ShowReadout("5.00".to_string()),
                Effect::DrawSegment {
                    from: Point::new(0.0, 0.0),
                    to: Point::new(3.0, 4.0)
                },
                Effect::DrawLabel {
                    at: Point::new(1.5, 2.0 - 10.0),
                    text: "5.0px".to_string()
                },
                Effect::ScheduleReset {
                    delay_ms: 2000,
                    cycle: s.cycle()
                },
            ]
        );
    }

    #[test]
    fn scaled_clicks_are_measured_in_backing_pixels() {
        let cfg = MeasureConfig::default();
        let half = |x: f64, y: f64| PointerClick {
            client_x: x,
            client_y: y,
            rect: ViewportRect {
                left: 0.0,
                top: 0.0,
                width: 640.0,
                height: 360.0,
            },
        };
        let s = handle_click(&ready(), &half(0.0, 0.0), &cfg).session;
        let t = handle_click(&s, &half(3.0, 4.0), &cfg);
        assert!(t.effects.contains(&Effect::ShowReadout("10.00".to_string())));
    }

    fn shown_at(width: f64, height: f64) -> impl Fn(f64, f64) -> PointerClick {
        move |x, y| PointerClick {
            client_x: x,
            client_y: y,
            rect: ViewportRect {
                left: 0.0,
                top: 0.0,
                width,
                height,
            },
        }
    }

    #[test]
    fn tie_distances_round_up_in_label_and_readout() {
        let cfg = MeasureConfig::default();

        // 1280 backing shown at 1024: one CSS px is 1.25 backing px
        let at = shown_at(1024.0, 576.0);
        let s = handle_click(&ready(), &at(0.0, 0.0), &cfg).session;
        let t = handle_click(&s, &at(1.0, 0.0), &cfg);
        assert!(t.effects.contains(&Effect::ShowReadout("1.25".to_string())));
        assert!(t.effects.iter().any(|e| matches!(
            e,
            Effect::DrawLabel { text, .. } if text == "1.3px"
        )));

        // shown at 2048: one CSS px is 0.625 backing px
        let at = shown_at(2048.0, 1152.0);
        let s = handle_click(&ready(), &at(0.0, 0.0), &cfg).session;
        let t = handle_click(&s, &at(1.0, 0.0), &cfg);
        assert!(t.effects.contains(&Effect::ShowReadout("0.63".to_string())));
    }

    #[test]
    fn fractional_clicks_are_scaled_without_truncation() {
        let cfg = MeasureConfig::default();
        let at = shown_at(640.0, 360.0);
        let t = handle_click(&ready(), &at(160.5, 90.25), &cfg);
        assert_eq!(t.session.points(), &[Point::new(321.0, 180.5)]);
    }

    #[test]
    fn third_click_before_reset_has_no_effect() {
        let cfg = MeasureConfig::default();
        let s = handle_click(&ready(), &click(0.0, 0.0), &cfg).session;
        let s = handle_click(&s, &click(3.0, 4.0), &cfg).session;
        let t = handle_click(&s, &click(100.0, 100.0), &cfg);
        assert_eq!(t.session, s);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn reset_clears_and_starts_a_new_cycle() {
        let cfg = MeasureConfig::default();
        let s = handle_click(&ready(), &click(0.0, 0.0), &cfg).session;
        let measured = handle_click(&s, &click(3.0, 4.0), &cfg);
        let cycle = match measured.effects.last() {
            Some(Effect::ScheduleReset { cycle, .. }) => *cycle,
            other => panic!("expected reset to be scheduled, got {:?}", other),
        };

        let t = measured.session.reset(cycle);
        assert_eq!(t.session.phase(), Phase::Empty);
        assert_eq!(t.effects, vec![Effect::ClearSurface(HD)]);

        let next = handle_click(&t.session, &click(7.0, 8.0), &cfg);
        assert_eq!(next.session.phase(), Phase::OnePoint);
        assert_eq!(next.effects, vec![Effect::DrawMarker(Point::new(7.0, 8.0))]);
    }

    #[test]
    fn stale_reset_is_ignored() {
        let cfg = MeasureConfig::default();
        let s = handle_click(&ready(), &click(0.0, 0.0), &cfg).session;
        let old_cycle = s.cycle();
        let s = s.begin_stream().session.initialize_surface(Some(HD)).session;
        let s = handle_click(&s, &click(5.0, 5.0), &cfg).session;
        let t = s.reset(old_cycle);
        assert_eq!(t.session.points(), &[Point::new(5.0, 5.0)]);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn new_stream_requires_sizing_again() {
        let s = ready().begin_stream().session;
        assert!(!s.is_initialized());
        let t = s.initialize_surface(Some(SurfaceSize {
            width: 640,
            height: 480,
        }));
        assert_eq!(
            t.session.surface(),
            Some(SurfaceSize {
                width: 640,
                height: 480
            })
        );
    }
}
