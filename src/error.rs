use thiserror::Error;

/// Items shown under every camera failure.
pub const CAMERA_REMEDIATION: [&str; 3] = [
    "Allowed camera permissions",
    "A working camera connected",
    "No other apps using the camera",
];

/// Failure to obtain a camera stream. All variants are reported to the user
/// the same way; the split only exists for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraAccessError {
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    NoDevice(String),
    #[error("{0}")]
    DeviceBusy(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("{0}")]
    Other(String),
}

impl CameraAccessError {
    /// Classifies a `DOMException` by its `name`.
    pub fn from_dom(name: &str, message: &str) -> Self {
        let message = if message.is_empty() {
            name.to_string()
        } else {
            message.to_string()
        };
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                Self::PermissionDenied(message)
            }
            "NotFoundError" | "OverconstrainedError" | "DevicesNotFoundError" => {
                Self::NoDevice(message)
            }
            "NotReadableError" | "AbortError" | "TrackStartError" => Self::DeviceBusy(message),
            _ => Self::Other(message),
        }
    }

    /// Headline shown in the info panel.
    pub fn user_message(&self) -> String {
        format!("Camera Error: {}", self)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_are_classified() {
        assert!(matches!(
            CameraAccessError::from_dom("NotAllowedError", "Permission denied"),
            CameraAccessError::PermissionDenied(_)
        ));
        assert!(matches!(
            CameraAccessError::from_dom("NotFoundError", "Requested device not found"),
            CameraAccessError::NoDevice(_)
        ));
        assert!(matches!(
            CameraAccessError::from_dom("NotReadableError", "Could not start video source"),
            CameraAccessError::DeviceBusy(_)
        ));
        assert!(matches!(
            CameraAccessError::from_dom("TypeError", "bad constraints"),
            CameraAccessError::Other(_)
        ));
    }

    #[test]
    fn user_message_names_the_cause() {
        let e = CameraAccessError::from_dom("NotAllowedError", "Permission denied");
        assert_eq!(e.user_message(), "Camera Error: Permission denied");
    }

    #[test]
    fn empty_message_falls_back_to_name() {
        let e = CameraAccessError::from_dom("NotReadableError", "");
        assert_eq!(e.user_message(), "Camera Error: NotReadableError");
    }

    #[test]
    fn remediation_has_three_items() {
        assert_eq!(CAMERA_REMEDIATION.len(), 3);
        assert!(CAMERA_REMEDIATION.iter().all(|s| !s.is_empty()));
    }
}
