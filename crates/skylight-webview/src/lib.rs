//! Embeddable webview shell over a native browser engine.
//!
//! Wraps `winit` + `wry` to provide:
//! - A single-owner [`WebViewShell`] façade over window + surface lifecycle
//! - Typed, single-slot lifecycle callbacks (document-loaded, script-finished, close)
//! - A settings map forwarded to the engine at surface construction
//! - Asynchronous script evaluation with result delivery on the loop thread
//! - Blocking and stepped event-loop pump modes
//!
//! The engine boundary is the [`Toolkit`] trait; [`WryToolkit`] is the real
//! collaborator, and the façade's ordering properties are tested against an
//! in-memory fake.

pub mod backend;
pub mod callbacks;
pub mod errors;
pub mod events;
pub mod runtime;
pub mod settings;
pub mod shell;
pub mod toolkit;

pub use backend::WryToolkit;
pub use callbacks::CallbackTable;
pub use errors::ShellError;
pub use events::{LoadState, ToolkitEvent};
pub use settings::{SettingValue, Settings};
pub use shell::WebViewShell;
pub use toolkit::{Command, LoopStatus, PumpMode, Toolkit};

pub type Result<T> = std::result::Result<T, ShellError>;
