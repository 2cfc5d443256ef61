mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use service::FlashSession;
pub use view::{AnswerOutcome, SessionSnapshot};
