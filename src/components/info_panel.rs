use crate::error::{CameraAccessError, CAMERA_REMEDIATION};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InfoPanelProps {
    pub error: Option<CameraAccessError>,
}

/// Usage hint, replaced by the failure and its checklist when the camera
/// could not be opened.
#[function_component(InfoPanel)]
pub fn info_panel(props: &InfoPanelProps) -> Html {
    let panel_style = "margin-top:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; font-size:14px; line-height:1.4;";
    match &props.error {
        Some(err) => html! {
            <div id="info" style={panel_style}>
                <p style="margin:0 0 8px 0; color:#f85149; font-weight:600;">{ err.user_message() }</p>
                <p style="margin:0 0 4px 0;">{"Please ensure you have:"}</p>
                <ol style="margin:0 0 0 18px; padding:0;">
                    { for CAMERA_REMEDIATION.iter().map(|item| html! { <li>{ *item }</li> }) }
                </ol>
            </div>
        },
        None => html! {
            <div id="info" style={panel_style}>
                <p style="margin:0;">{"Click two points on the video to measure the distance between them. The overlay clears itself shortly after each measurement."}</p>
            </div>
        },
    }
}
