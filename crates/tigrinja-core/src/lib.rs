pub mod api;
pub mod bindings;
pub mod config;
pub mod format;
pub mod i18n;
pub mod language;
pub mod opener;
pub mod preferences;
pub mod session;
pub mod state;
pub mod transcript;

// Re-export main types for convenience
pub use api::ApiClient;
pub use bindings::{default_bindings, render_bindings, Binding, BindingTarget, LabelSet};
pub use config::Config;
pub use format::{format, format_html, FormattedBlock, Inline, RichText};
pub use language::{ReplyLanguage, UiLanguage};
pub use opener::{NoopOpener, SystemOpener, UrlOpener};
pub use preferences::{ConfigStore, MemoryStore, PreferenceStore, UiLanguageState};
pub use session::{dispatch, ChatSession, Completion, Outcome, PendingRequest, RequestKind, Submission};
pub use state::{ChatMessage, ChatRole};
pub use transcript::{Transcript, TranscriptNode};
