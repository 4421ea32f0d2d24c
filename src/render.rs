// Applies session effects to the overlay canvas
use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::MeasureConfig;
use crate::model::Point;
use crate::state::Effect;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Performs the drawing effects. Readout and timer effects are left to the
/// caller.
pub fn draw_effects(canvas: &HtmlCanvasElement, effects: &[Effect], cfg: &MeasureConfig) {
    for effect in effects {
        match effect {
            Effect::ResizeSurface(size) => {
                // resizing a canvas resets its context state, so do it first
                canvas.set_width(size.width);
                canvas.set_height(size.height);
            }
            Effect::ClearSurface(size) => {
                if let Some(ctx) = context_2d(canvas) {
                    ctx.clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
                }
            }
            Effect::DrawMarker(p) => {
                if let Some(ctx) = context_2d(canvas) {
                    draw_marker(&ctx, *p, cfg);
                }
            }
            Effect::DrawSegment { from, to } => {
                if let Some(ctx) = context_2d(canvas) {
                    draw_segment(&ctx, *from, *to, cfg);
                }
            }
            Effect::DrawLabel { at, text } => {
                if let Some(ctx) = context_2d(canvas) {
                    ctx.set_font(&cfg.label.font);
                    ctx.set_fill_style_str(&cfg.label.color);
                    ctx.set_text_align("center");
                    ctx.fill_text(text, at.x, at.y).ok();
                }
            }
            Effect::ShowReadout(_) | Effect::ScheduleReset { .. } => {}
        }
    }
}

fn draw_marker(ctx: &CanvasRenderingContext2d, p: Point, cfg: &MeasureConfig) {
    let m = &cfg.marker;
    ctx.set_fill_style_str(&m.fill);
    ctx.begin_path();
    ctx.arc(p.x, p.y, m.radius, 0.0, 2.0 * PI).ok();
    ctx.fill();
    ctx.set_stroke_style_str(&m.outline);
    ctx.set_line_width(m.outline_width);
    ctx.stroke();
}

fn draw_segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point, cfg: &MeasureConfig) {
    ctx.set_stroke_style_str(&cfg.line.color);
    ctx.set_line_width(cfg.line.width);
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}
