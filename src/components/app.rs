use super::{distance_readout::DistanceReadout, info_panel::InfoPanel, measure_view::MeasureView};
use crate::config::MeasureConfig;
use crate::error::CameraAccessError;
use std::rc::Rc;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Stored overrides are read once per page load
    let config = use_state(|| Rc::new(MeasureConfig::load()));
    let readout = use_state(|| None::<String>);
    let camera_error = use_state(|| None::<CameraAccessError>);

    let on_readout = {
        let readout = readout.clone();
        Callback::from(move |text: String| readout.set(Some(text)))
    };
    let on_camera_error = {
        let camera_error = camera_error.clone();
        Callback::from(move |err: CameraAccessError| camera_error.set(Some(err)))
    };

    html! {
        <div style="padding:16px; max-width:1320px; margin:0 auto; font-family:sans-serif; color:#e6edf3; background:#0e1116; min-height:100vh; box-sizing:border-box;">
            <h2 style="margin:0 0 12px 0; color:#58a6ff;">{"Camera Distance Measure"}</h2>
            <MeasureView
                config={(*config).clone()}
                on_readout={on_readout}
                on_camera_error={on_camera_error}
            />
            <DistanceReadout value={(*readout).clone()} />
            <InfoPanel error={(*camera_error).clone()} />
        </div>
    }
}
