//! Camera acquisition: one awaited `getUserMedia` request that either yields a
//! live stream bound to the `<video>` element or a [`CameraAccessError`].

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlVideoElement, MediaDevices, MediaStream, MediaStreamConstraints};

use crate::config::CameraConfig;
use crate::error::CameraAccessError;
use crate::util::{cerr, clog};

#[derive(Serialize, Debug, PartialEq)]
struct Ideal {
    ideal: u32,
}

#[derive(Serialize, Debug, PartialEq)]
struct VideoConstraints {
    width: Ideal,
    height: Ideal,
}

/// JSON form of the constraint dictionary passed to `getUserMedia`.
#[derive(Serialize, Debug, PartialEq)]
pub struct MediaConstraints {
    video: VideoConstraints,
}

impl MediaConstraints {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            video: VideoConstraints {
                width: Ideal {
                    ideal: cfg.ideal_width,
                },
                height: Ideal {
                    ideal: cfg.ideal_height,
                },
            },
        }
    }

    fn to_js(&self) -> Result<MediaStreamConstraints, CameraAccessError> {
        let json = serde_json::to_string(&self.video)
            .map_err(|e| CameraAccessError::Other(e.to_string()))?;
        let video = js_sys::JSON::parse(&json).map_err(|e| describe(&e))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);
        Ok(constraints)
    }
}

/// Requests the camera and starts playback on `video`. The raw browser error
/// is logged to the console before being classified.
pub async fn start_camera(
    video: &HtmlVideoElement,
    cfg: &CameraConfig,
) -> Result<MediaStream, CameraAccessError> {
    let devices = web_sys::window()
        .and_then(|win| win.navigator().media_devices().ok())
        .ok_or_else(|| {
            CameraAccessError::Unsupported(
                "camera capture is not available in this context".to_string(),
            )
        })?;
    let constraints = MediaConstraints::from_config(cfg).to_js()?;
    match request_stream(&devices, &constraints, video).await {
        Ok(stream) => {
            clog(&format!(
                "camera stream attached (ideal {}x{})",
                cfg.ideal_width, cfg.ideal_height
            ));
            Ok(stream)
        }
        Err(raw) => {
            cerr("Error accessing camera:", &raw);
            Err(describe(&raw))
        }
    }
}

async fn request_stream(
    devices: &MediaDevices,
    constraints: &MediaStreamConstraints,
    video: &HtmlVideoElement,
) -> Result<MediaStream, JsValue> {
    let stream = JsFuture::from(devices.get_user_media_with_constraints(constraints)?)
        .await?
        .dyn_into::<MediaStream>()?;
    video.set_muted(true);
    video.set_autoplay(true);
    let _ = video.set_attribute("playsinline", "");
    video.set_src_object(Some(&stream));
    // autoplay normally starts it; an explicit play() covers browsers that wait
    if let Ok(p) = video.play() {
        let _ = JsFuture::from(p).await;
    }
    Ok(stream)
}

/// Maps a thrown value to the error taxonomy.
fn describe(raw: &JsValue) -> CameraAccessError {
    if let Some(ex) = raw.dyn_ref::<DomException>() {
        return CameraAccessError::from_dom(&ex.name(), &ex.message());
    }
    if let Some(err) = raw.dyn_ref::<js_sys::Error>() {
        return CameraAccessError::Other(String::from(err.message()));
    }
    CameraAccessError::Other(
        raw.as_string()
            .unwrap_or_else(|| "unknown camera failure".to_string()),
    )
}
