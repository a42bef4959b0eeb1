pub mod relay;
pub mod speech_to_text;
