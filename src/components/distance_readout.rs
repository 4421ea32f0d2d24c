use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DistanceReadoutProps {
    /// Latest measurement, already formatted. `None` until the first one.
    pub value: Option<String>,
}

#[function_component]
pub fn DistanceReadout(props: &DistanceReadoutProps) -> Html {
    let label_style = "font-weight:500; opacity:0.85;";
    let value_style = "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600; color:#3fb950;";
    html! {
        <div style="display:flex; align-items:center; gap:8px; margin-top:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; font-size:16px;">
            <span style={label_style}>{"Distance:"}</span>
            <span id="distance" style={value_style}>{ props.value.clone().unwrap_or_else(|| "-".to_string()) }</span>
            <span style={label_style}>{"pixels"}</span>
        </div>
    }
}
