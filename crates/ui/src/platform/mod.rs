use std::sync::Arc;

use services::{Haptics, HostEnvironment};

mod webview;

pub type HostRef = Arc<dyn HostEnvironment + Send + Sync>;
pub type HapticsRef = Arc<dyn Haptics + Send + Sync>;

pub use webview::{WebviewHaptics, WebviewHost};
