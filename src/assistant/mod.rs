//! The contextual response engine behind the chat assistant.
//!
//! One request flows strictly one way:
//! message + history → [`matcher`] → [`history`] → [`context`] → [`reply`].
//! Every step is a pure function of its inputs; the only I/O is the Groq
//! call inside [`reply::generate`], which degrades to the rule-based
//! fallback on any failure.

pub mod context;
pub mod groq;
pub mod history;
pub mod matcher;
pub mod reply;
