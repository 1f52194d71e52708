//! The collaborator seam between the shell and the host toolkit.
//!
//! The shell never talks to the engine directly: it submits [`Command`]s and
//! receives [`ToolkitEvent`]s from [`Toolkit::pump`]. The real collaborator
//! is [`crate::backend::WryToolkit`]; tests drive the shell with an
//! in-memory fake.

use std::path::PathBuf;

use crate::events::ToolkitEvent;
use crate::settings::SettingValue;
use crate::Result;

/// A forwarded configuration, navigation, scripting, or teardown request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the window's default size in pixels.
    SetDefaultSize { width: u32, height: u32 },
    /// Set the window title.
    SetTitle(String),
    /// Forward a named flag to the surface's settings object.
    SetSetting { name: String, value: SettingValue },
    /// Directory the engine's extension subsystem loads from. Must be
    /// forwarded before the first navigation.
    SetExtensionDirectory(PathBuf),
    /// Start an asynchronous navigation.
    LoadUrl(String),
    /// Submit script text for asynchronous evaluation on the surface.
    EvaluateScript(String),
    /// Open the engine's developer inspector. No-op if the build lacks one.
    ShowInspector,
    /// Release the browser surface. Issued by the shell before the close
    /// callback runs.
    DestroySurface,
}

/// How a single pump iteration waits for work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpMode {
    /// Block until the toolkit has events to deliver.
    Wait,
    /// Perform one iteration without blocking.
    Poll,
}

/// Whether the toolkit's loop is still running after a pump iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Ended,
}

/// The host toolkit: windowing, rendering, and scripting, owned elsewhere.
///
/// Contract: `create` realizes the window / scroll container / browser
/// surface chain as one unit; events are delivered on the calling thread
/// during `pump`; once `pump` returns [`LoopStatus::Ended`] no further
/// events are produced.
pub trait Toolkit {
    /// Initialize the engine and realize the resource chain.
    fn create(&mut self) -> Result<()>;

    /// Forward a request to the engine.
    fn submit(&mut self, command: Command) -> Result<()>;

    /// Run one slice of the event loop, appending any notifications that
    /// occurred to `events`.
    fn pump(&mut self, mode: PumpMode, events: &mut Vec<ToolkitEvent>) -> LoopStatus;
}
