//! The webview shell façade.
//!
//! `WebViewShell` owns the toolkit collaborator and the callback table, and
//! forwards every operation across the [`Toolkit`] seam. The only genuine
//! logic here is event dispatch: translating toolkit notifications into the
//! registered callbacks with the documented ordering guarantees.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::callbacks::CallbackTable;
use crate::events::{LoadState, ToolkitEvent};
use crate::settings::SettingValue;
use crate::toolkit::{Command, LoopStatus, PumpMode, Toolkit};
use crate::Result;

/// Façade over a window + scroll container + embedded browser surface.
///
/// The three resources are created together by [`WebViewShell::create`] and
/// destroyed together when the window closes; the surface is released
/// strictly before the close callback runs. All callbacks execute on the
/// loop thread during [`run`](WebViewShell::run) /
/// [`run_with`](WebViewShell::run_with) iterations.
pub struct WebViewShell<T: Toolkit> {
    toolkit: T,
    callbacks: CallbackTable,
    /// Extension directory, if configured. Forwarded so the engine's shared
    /// context picks it up when the extension subsystem initializes.
    extension_dir: Option<PathBuf>,
    /// Current URL (best-effort tracking).
    current_url: Option<String>,
    /// How many submitted scripts failed. Each failure is logged once and
    /// produces no callback.
    script_failures: u64,
    closed: bool,
}

impl<T: Toolkit> std::fmt::Debug for WebViewShell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The callback table holds `dyn FnMut` slots that cannot be
        // formatted, so it is omitted.
        f.debug_struct("WebViewShell")
            .field("extension_dir", &self.extension_dir)
            .field("current_url", &self.current_url)
            .field("script_failures", &self.script_failures)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl<T: Toolkit> WebViewShell<T> {
    /// Initialize the toolkit and realize the window, scroll container, and
    /// browser surface as one containment chain.
    ///
    /// Fails with [`ShellError::Init`](crate::ShellError::Init) when the
    /// engine cannot be initialized.
    pub fn create(mut toolkit: T) -> Result<Self> {
        toolkit.create()?;
        Ok(Self {
            toolkit,
            callbacks: CallbackTable::new(),
            extension_dir: None,
            current_url: None,
            script_failures: 0,
            closed: false,
        })
    }

    /// Configure the directory the engine loads extensions from.
    ///
    /// Must be called before the first navigation; the engine reads it when
    /// its extension subsystem initializes and setting it later has no
    /// defined effect.
    pub fn set_extension_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        self.extension_dir = Some(path.clone());
        self.toolkit.submit(Command::SetExtensionDirectory(path))
    }

    /// Set the window's default size in pixels.
    pub fn set_default_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.toolkit.submit(Command::SetDefaultSize { width, height })
    }

    /// Set the window title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.toolkit.submit(Command::SetTitle(title.into()))
    }

    /// Forward a named flag to the surface's settings object.
    ///
    /// Unknown names are accepted and forwarded; errors, if any, surface
    /// from the engine rather than being validated here.
    pub fn set_setting(
        &mut self,
        name: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Result<()> {
        self.toolkit.submit(Command::SetSetting {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Start navigating to `url`. Does not block; completion is observed via
    /// [`on_document_loaded`](WebViewShell::on_document_loaded).
    pub fn load_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        self.current_url = Some(url.clone());
        self.toolkit.submit(Command::LoadUrl(url))
    }

    /// Submit script text for asynchronous evaluation on the surface.
    ///
    /// On success the registered script-finished callback receives the
    /// result value; a failed evaluation is logged and swallowed without
    /// invoking any callback. Once submitted, a script cannot be aborted.
    pub fn execute_script(&mut self, code: impl Into<String>) -> Result<()> {
        self.toolkit.submit(Command::EvaluateScript(code.into()))
    }

    /// Open the engine's developer inspector. No-op when the underlying
    /// build does not support one.
    pub fn show_inspector(&mut self) -> Result<()> {
        self.toolkit.submit(Command::ShowInspector)
    }

    /// Register the callback invoked when a navigation finishes loading.
    /// Replaces any prior registration.
    pub fn on_document_loaded(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.set_document_loaded(callback);
    }

    /// Register the callback invoked with each successful script result.
    /// Replaces any prior registration.
    pub fn on_script_finished(&mut self, callback: impl FnMut(serde_json::Value) + 'static) {
        self.callbacks.set_script_finished(callback);
    }

    /// Register the callback invoked once the window is destroyed. The
    /// browser surface is released before the callback executes. Replaces
    /// any prior registration.
    pub fn on_close(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.set_closed(callback);
    }

    /// Block the calling thread, pumping the toolkit's event loop until the
    /// window closes.
    pub fn run(&mut self) -> Result<()> {
        let mut events = Vec::new();
        loop {
            let status = self.toolkit.pump(PumpMode::Wait, &mut events);
            for event in events.drain(..) {
                self.dispatch(event);
            }
            if self.closed || status == LoopStatus::Ended {
                return Ok(());
            }
        }
    }

    /// Pump one non-blocking loop iteration at a time, invoking `step` with
    /// the shell after each one, until the toolkit reports the loop ended.
    pub fn run_with<F>(&mut self, mut step: F) -> Result<()>
    where
        F: FnMut(&mut Self),
    {
        let mut events = Vec::new();
        loop {
            let status = self.toolkit.pump(PumpMode::Poll, &mut events);
            for event in events.drain(..) {
                self.dispatch(event);
            }
            if self.closed || status == LoopStatus::Ended {
                return Ok(());
            }
            step(self);
        }
    }

    /// The URL of the last navigation, best-effort.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// The configured extension directory, if any.
    pub fn extension_directory(&self) -> Option<&Path> {
        self.extension_dir.as_deref()
    }

    /// How many submitted scripts have failed so far.
    pub fn script_failures(&self) -> u64 {
        self.script_failures
    }

    /// Whether the window has been destroyed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Access the underlying toolkit collaborator.
    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    fn dispatch(&mut self, event: ToolkitEvent) {
        match event {
            ToolkitEvent::LoadStateChanged { state, url } => {
                debug!(?state, %url, "load state changed");
                self.current_url = Some(url);
                // Only the finished edge is observable; other states are
                // internal progress.
                if state == LoadState::Finished {
                    self.callbacks.document_loaded();
                }
            }
            ToolkitEvent::ScriptSucceeded(value) => {
                self.callbacks.script_finished(value);
            }
            ToolkitEvent::ScriptFailed(message) => {
                self.script_failures += 1;
                warn!(%message, "script evaluation failed");
            }
            ToolkitEvent::CloseRequested => {
                if self.closed {
                    return;
                }
                // Release the surface first, then notify.
                if let Err(e) = self.toolkit.submit(Command::DestroySurface) {
                    warn!(error = %e, "surface teardown failed");
                }
                self.closed = true;
                self.callbacks.closed();
            }
        }
    }
}
