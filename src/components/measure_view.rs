use std::cell::RefCell;
use std::rc::Rc;
use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlCanvasElement, HtmlVideoElement, MouseEvent};
use yew::prelude::*;

use crate::camera::start_camera;
use crate::config::MeasureConfig;
use crate::error::CameraAccessError;
use crate::model::{client_coord, PointerClick, SurfaceSize, ViewportRect};
use crate::render::draw_effects;
use crate::state::{handle_click, Effect, MeasureSession, Transition};
use crate::util::{clog, timeout_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct MeasureViewProps {
    pub config: Rc<MeasureConfig>,
    pub on_readout: Callback<String>,
    pub on_camera_error: Callback<CameraAccessError>,
}

fn client_coords(e: &MouseEvent) -> (f64, f64) {
    let precise = |key: &str| {
        js_sys::Reflect::get(e, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    };
    (
        client_coord(precise("clientX"), e.client_x()),
        client_coord(precise("clientY"), e.client_y()),
    )
}

fn schedule_reset(
    delay_ms: u32,
    cycle: u64,
    session: Rc<RefCell<MeasureSession>>,
    canvas: HtmlCanvasElement,
    cfg: Rc<MeasureConfig>,
) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(move || {
        let t = session.borrow().reset(cycle);
        if t.effects.is_empty() {
            return;
        }
        draw_effects(&canvas, &t.effects, &cfg);
        *session.borrow_mut() = t.session;
        clog(&format!(
            "overlay reset, next cycle {}",
            session.borrow().cycle()
        ));
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        timeout_ms(delay_ms),
    );
}

#[function_component(MeasureView)]
pub fn measure_view(props: &MeasureViewProps) -> Html {
    let video_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(MeasureSession::new);

    {
        let video_ref = video_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        let cfg = props.config.clone();
        let on_readout = props.on_readout.clone();
        let on_camera_error = props.on_camera_error.clone();

        use_effect_with((), move |_| {
            let mut listeners: Vec<EventListener> = Vec::new();
            let nodes = video_ref
                .cast::<HtmlVideoElement>()
                .zip(canvas_ref.cast::<HtmlCanvasElement>());

            if let Some((video, canvas)) = nodes {
                // Commit a transition: store the session, then perform its effects.
                let apply: Rc<dyn Fn(Transition)> = {
                    let canvas = canvas.clone();
                    let session = session.clone();
                    let cfg = cfg.clone();
                    Rc::new(move |t: Transition| {
                        *session.borrow_mut() = t.session;
                        draw_effects(&canvas, &t.effects, &cfg);
                        for effect in &t.effects {
                            match effect {
                                Effect::ShowReadout(text) => {
                                    clog(&format!(
                                        "measured {:?} -> {}",
                                        session.borrow().points(),
                                        text
                                    ));
                                    on_readout.emit(text.clone());
                                }
                                Effect::ScheduleReset { delay_ms, cycle } => schedule_reset(
                                    *delay_ms,
                                    *cycle,
                                    session.clone(),
                                    canvas.clone(),
                                    cfg.clone(),
                                ),
                                _ => {}
                            }
                        }
                    })
                };

                let init_surface: Rc<dyn Fn()> = {
                    let video = video.clone();
                    let session = session.clone();
                    let apply = apply.clone();
                    Rc::new(move || {
                        if session.borrow().is_initialized() {
                            return;
                        }
                        let intrinsic =
                            SurfaceSize::from_intrinsic(video.video_width(), video.video_height());
                        let t = session.borrow().initialize_surface(intrinsic);
                        apply(t);
                        if let Some(size) = session.borrow().surface() {
                            clog(&format!("overlay sized to {}x{}", size.width, size.height));
                        }
                    })
                };

                {
                    let init_surface = init_surface.clone();
                    listeners.push(EventListener::new(&video, "loadedmetadata", move |_| {
                        init_surface()
                    }));
                }
                {
                    // fallback in case loadedmetadata was missed; the session guard
                    // makes it a no-op otherwise
                    let init_surface = init_surface.clone();
                    listeners.push(EventListener::new(&video, "play", move |_| init_surface()));
                }
                {
                    let canvas_el = canvas.clone();
                    let session = session.clone();
                    let cfg = cfg.clone();
                    let apply = apply.clone();
                    listeners.push(EventListener::new(&canvas, "click", move |e: &Event| {
                        let Some(me) = e.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let (client_x, client_y) = client_coords(me);
                        let r = canvas_el.get_bounding_client_rect();
                        let click = PointerClick {
                            client_x,
                            client_y,
                            rect: ViewportRect {
                                left: r.left(),
                                top: r.top(),
                                width: r.width(),
                                height: r.height(),
                            },
                        };
                        let t = handle_click(&session.borrow(), &click, &cfg);
                        apply(t);
                    }));
                }

                // Camera acquisition is the only suspending step.
                let t = session.borrow().begin_stream();
                *session.borrow_mut() = t.session;
                let camera_cfg = cfg.camera.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match start_camera(&video, &camera_cfg).await {
                        Ok(_) => init_surface(),
                        Err(e) => on_camera_error.emit(e),
                    }
                });
            }

            move || drop(listeners)
        });
    }

    html! {<div style="position:relative; display:inline-block; max-width:100%; line-height:0;">
        <video ref={video_ref} id="camera" style="display:block; max-width:100%; height:auto; background:#000;"></video>
        <canvas ref={canvas_ref} id="overlay" style="position:absolute; top:0; left:0; width:100%; height:100%; cursor:crosshair;"></canvas>
    </div>}
}
