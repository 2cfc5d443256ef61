mod flash_vm;
mod hud_vm;

pub use flash_vm::{FlashIntent, FlashScreen, FlashVm, intent_for_key, map_flash, start_flash};
pub use hud_vm::{HudVm, map_hud};
