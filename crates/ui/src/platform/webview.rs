use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dioxus::document::eval;
use dioxus::prelude::spawn;

use services::{Haptics, HostEnvironment, HostError};

/// Looks for a mini-app SDK object the embedding page may inject.
const SDK_LOOKUP: &str = "const sdk = window.miniapp || window.sdk;";

fn detect_script() -> String {
    format!(
        r#"{SDK_LOOKUP}
        if (!sdk || typeof sdk.isInMiniApp !== "function") return false;
        return !!(await sdk.isInMiniApp());"#
    )
}

fn ready_script() -> String {
    format!(
        r#"{SDK_LOOKUP}
        if (!sdk || !sdk.actions || typeof sdk.actions.ready !== "function") {{
            throw new Error("mini app sdk not present");
        }}
        await sdk.actions.ready();
        return true;"#
    )
}

pub(crate) fn vibrate_script(pattern: &[u32]) -> String {
    let pattern = pattern
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r"if (typeof navigator.vibrate !== 'function') return false;
        navigator.vibrate([{pattern}]);
        return true;"
    )
}

/// Host capability backed by scripts evaluated in the webview.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewHost;

#[async_trait(?Send)]
impl HostEnvironment for WebviewHost {
    async fn is_embedded(&self) -> Result<bool, HostError> {
        eval(&detect_script())
            .join::<bool>()
            .await
            .map_err(|err| HostError::Failed(format!("{err:?}")))
    }

    async fn signal_ready(&self) -> Result<(), HostError> {
        eval(&ready_script())
            .join::<bool>()
            .await
            .map(|_| ())
            .map_err(|err| HostError::Failed(format!("{err:?}")))
    }
}

/// Vibration through `navigator.vibrate`.
///
/// The pattern is dispatched without waiting for the webview. Once a script
/// reports that `navigator.vibrate` is missing, later calls return
/// `HostError::Unavailable` up front. Must be called inside the Dioxus runtime.
#[derive(Debug, Clone, Default)]
pub struct WebviewHaptics {
    unsupported: Arc<AtomicBool>,
}

impl WebviewHaptics {
    fn mark_unsupported(&self) {
        if !self.unsupported.swap(true, Ordering::Relaxed) {
            tracing::debug!("navigator.vibrate missing, haptics disabled");
        }
    }
}

impl Haptics for WebviewHaptics {
    fn vibrate(&self, pattern: &[u32]) -> Result<(), HostError> {
        if pattern.is_empty() || self.unsupported.load(Ordering::Relaxed) {
            return Err(HostError::Unavailable);
        }
        let pending = eval(&vibrate_script(pattern));
        let haptics = self.clone();
        spawn(async move {
            match pending.join::<bool>().await {
                Ok(true) => {}
                Ok(false) => haptics.mark_unsupported(),
                Err(err) => tracing::debug!(error = ?err, "vibrate script failed"),
            }
        });
        Ok(())
    }
}
