//! # Camera Permission Gate
//!
//! Queries and requests the camera capability from the host platform. The
//! gate never opens a stream itself; it only decides whether the live feed
//! may be started. On denial the expected recovery path is the user opening
//! the system settings for the app, which is an explicit user action — the
//! pipeline never re-prompts automatically.

use async_trait::async_trait;
use log::info;

use crate::error::{CaptureError, CaptureResult};

/// Platform decision for the camera capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

/// Host-platform camera permission surface.
#[async_trait]
pub trait PermissionGate: Send {
    /// Query the current capability status. Pure read, no prompt.
    async fn check_status(&self) -> PermissionStatus;

    /// Trigger the platform's native prompt. Resolves immediately if the
    /// decision was already made; at most one prompt per call.
    async fn request_access(&mut self) -> PermissionStatus;

    /// Deep-link out of the app to the OS permission screen for this app.
    /// Fire-and-forget; no return value is consumed.
    fn open_system_settings(&self);
}

/// Check-then-request flow used before every feed start. Returns `Ok` only
/// when the capability ends up granted; the caller must not open the feed
/// otherwise.
pub async fn ensure_camera_access(gate: &mut dyn PermissionGate) -> CaptureResult<()> {
    if gate.check_status().await == PermissionStatus::Granted {
        return Ok(());
    }

    match gate.request_access().await {
        PermissionStatus::Granted => Ok(()),
        _ => Err(CaptureError::permission(
            "camera access blocked; open system settings to enable it",
        )),
    }
}

/// Permission gate for desktop hosts, where camera access is not mediated
/// by a per-app prompt. Always granted; the settings deep link is a no-op
/// beyond an informational log line.
#[derive(Debug, Default)]
pub struct HostPermissions;

#[async_trait]
impl PermissionGate for HostPermissions {
    async fn check_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_access(&mut self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn open_system_settings(&self) {
        info!("no system permission screen on this host; nothing to open");
    }
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedGate;
    use super::*;

    #[tokio::test]
    async fn test_granted_without_prompt() {
        let mut gate = ScriptedGate::new(PermissionStatus::Granted, PermissionStatus::Denied);
        ensure_camera_access(&mut gate).await.unwrap();
        assert_eq!(gate.prompts, 0);
    }

    #[tokio::test]
    async fn test_undetermined_prompts_once() {
        let mut gate =
            ScriptedGate::new(PermissionStatus::Undetermined, PermissionStatus::Granted);
        ensure_camera_access(&mut gate).await.unwrap();
        assert_eq!(gate.prompts, 1);
    }

    #[tokio::test]
    async fn test_denied_after_prompt() {
        let mut gate = ScriptedGate::new(PermissionStatus::Denied, PermissionStatus::Denied);
        let error = ensure_camera_access(&mut gate).await.unwrap_err();
        assert_eq!(error.category(), "permission");
        assert!(error.needs_user_action());
        assert_eq!(gate.prompts, 1);
    }

    #[test]
    fn test_settings_link_reaches_the_gate() {
        let gate = ScriptedGate::new(PermissionStatus::Denied, PermissionStatus::Denied);
        assert!(!gate.settings_opened());
        gate.open_system_settings();
        assert!(gate.settings_opened());
    }
}
