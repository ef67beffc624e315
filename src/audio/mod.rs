//! Sound: music selection and the rodio-backed speaker.

pub mod music;
pub mod speaker;
