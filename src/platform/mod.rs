//! Browser platform integrations
//!
//! Handles the browser side of the external collaborators:
//! - Speech synthesis for score narration

pub mod speech;

pub use speech::WebSpeaker;
