pub mod actions;
pub mod chat;
pub mod contact;
pub mod intent;
pub mod models;

pub use actions::{dispatch, ActionOutcome, NavigationKind, NavigationTarget, QuickReplyAction};
pub use chat::{ChatSession, THINKING_DELAY};
pub use intent::{classify, respond};
pub use models::*;
