/// YT ScriptGen
///
/// Turns timestamped video transcripts into structured script artifacts:
/// subtitle exports, section scripts, generated titles, outlines and
/// standalone opening/ending narrations, all framed by a configurable
/// channel persona.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod narration;
pub mod outline;
pub mod script;
pub mod styling;
pub mod summary;
pub mod title;
pub mod transcript;
pub mod translate;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::dispatch::{GeneratedDocument, ScriptFormat, ScriptGenerator};
pub use crate::error::{Result, ScriptGenError};
pub use crate::llm::{HttpLlmProvider, Llm};
pub use crate::outline::{Outline, OutlineSection, SubsectionRole};
pub use crate::script::ScriptSection;
pub use crate::summary::Summary;
pub use crate::transcript::{
    FetchedTranscript, HttpTranscriptSource, TranscriptEntry, TranscriptSource,
};
pub use crate::translate::{HttpTranslator, Translator};
