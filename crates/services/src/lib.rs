#![forbid(unsafe_code)]

pub mod counters_service;
pub mod error;
pub mod feedback;
pub mod host;
pub mod sessions;

pub use counters_service::CountersService;
pub use error::{HostError, SessionError};
pub use feedback::{Feedback, Haptics, NoHaptics, buzz};
pub use host::{HostEnvironment, HostMode, NoHost, detect_host, handshake, signal_ready};
pub use sessions::{AnswerOutcome, FlashSession, SessionSnapshot};
