pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod navigation;
pub mod provider;
pub mod syntax;
pub mod text;

pub use config::{LanguageConfig, NavigatorSettings};
pub use document::{Document, TextLine};
pub use error::{NavError, NavResult};
pub use navigation::{GoTo, Motion, Navigator, NodeRules};
pub use provider::{ProviderHandle, TreeProvider, TreeSitterProvider};
pub use text::{Position, Range};
