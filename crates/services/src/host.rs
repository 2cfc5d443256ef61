//! Best-effort integration with an embedding "mini app" host.
//!
//! Detection failures read as "not embedded" and readiness failures are
//! dropped. Nothing here can stop the widget from starting.

use async_trait::async_trait;

use crate::error::HostError;

/// Toast shown before the host handshake has finished.
pub const DEFAULT_READY_TEXT: &str = "ready \u{2713}";

/// Where the widget is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostMode {
    #[default]
    Web,
    MiniApp,
}

impl HostMode {
    #[must_use]
    pub fn is_mini(self) -> bool {
        matches!(self, HostMode::MiniApp)
    }

    /// Short label for the environment pill.
    #[must_use]
    pub fn pill_label(self) -> &'static str {
        match self {
            HostMode::Web => "WEB",
            HostMode::MiniApp => "MINI",
        }
    }

    #[must_use]
    pub fn ready_text(self) -> &'static str {
        match self {
            HostMode::Web => "web mode \u{2713}",
            HostMode::MiniApp => "mini app detected \u{2713}",
        }
    }
}

/// Capability exposed by an embedding host shell.
#[async_trait(?Send)]
pub trait HostEnvironment {
    /// Whether the widget is embedded in a host shell.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host cannot be queried.
    async fn is_embedded(&self) -> Result<bool, HostError>;

    /// Tell the host the widget is ready to be shown.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the signal cannot be delivered.
    async fn signal_ready(&self) -> Result<(), HostError>;
}

/// Stand-alone mode: never embedded, readiness always accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

#[async_trait(?Send)]
impl HostEnvironment for NoHost {
    async fn is_embedded(&self) -> Result<bool, HostError> {
        Ok(false)
    }

    async fn signal_ready(&self) -> Result<(), HostError> {
        Ok(())
    }
}

/// Ask the host where we are running; any failure means `HostMode::Web`.
pub async fn detect_host(host: &dyn HostEnvironment) -> HostMode {
    match host.is_embedded().await {
        Ok(true) => HostMode::MiniApp,
        Ok(false) => HostMode::Web,
        Err(err) => {
            tracing::debug!(error = %err, "host detection failed, assuming web");
            HostMode::Web
        }
    }
}

/// Signal readiness, ignoring failures. Returns whether the host accepted it.
pub async fn signal_ready(host: &dyn HostEnvironment) -> bool {
    match host.signal_ready().await {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "ready signal failed");
            false
        }
    }
}

/// Startup handshake: detect the host, then always signal readiness.
pub async fn handshake(host: &dyn HostEnvironment) -> HostMode {
    let mode = detect_host(host).await;
    let accepted = signal_ready(host).await;
    tracing::info!(mode = mode.pill_label(), ready_accepted = accepted, "host handshake done");
    mode
}
