//! Chat domain: dialogue steps, session state, field extractors and
//! scripted replies.

pub mod extractors;
pub mod fallback;
pub mod replies;
mod session;
mod step;

pub use session::{ChatContext, ChatSession, FormDraft};
pub use step::ChatStep;
