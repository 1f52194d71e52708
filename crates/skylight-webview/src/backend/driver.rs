//! Window and surface realization behind the winit application handler.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};
use wry::{WebView, WebViewBuilder};

use crate::events::{LoadState, ToolkitEvent};
use crate::settings::{SettingValue, Settings};
use crate::toolkit::Command;
use crate::Result;

const DEFAULT_TITLE: &str = "Skylight";
const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// Window/surface configuration staged until winit resumes the application.
#[derive(Default)]
struct Staged {
    title: Option<String>,
    size: Option<(u32, u32)>,
    settings: Settings,
    extension_dir: Option<PathBuf>,
    url: Option<String>,
    scripts: Vec<String>,
    show_inspector: bool,
}

/// `ApplicationHandler` that owns the window and the child webview.
pub(super) struct ShellDriver {
    staged: Staged,
    window: Option<Window>,
    webview: Option<WebView>,
    /// Engine notifications pending delivery to the shell. The engine's
    /// handler closures are `'static`, hence the shared drain; both ends
    /// run on the loop thread.
    drain: Arc<Mutex<Vec<ToolkitEvent>>>,
    destroyed: bool,
}

impl ShellDriver {
    pub(super) fn new() -> Self {
        Self {
            staged: Staged::default(),
            window: None,
            webview: None,
            drain: Arc::new(Mutex::new(Vec::new())),
            destroyed: false,
        }
    }

    /// Apply a shell command: live against the realized resources, staged
    /// otherwise.
    pub(super) fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetTitle(title) => {
                if let Some(window) = &self.window {
                    window.set_title(&title);
                }
                self.staged.title = Some(title);
            }
            Command::SetDefaultSize { width, height } => {
                if let Some(window) = &self.window {
                    let _ = window.request_inner_size(LogicalSize::new(
                        f64::from(width),
                        f64::from(height),
                    ));
                }
                self.staged.size = Some((width, height));
            }
            Command::SetSetting { name, value } => {
                if self.webview.is_some() {
                    debug!(%name, "setting changed after surface construction; engine keeps the built value");
                }
                self.staged.settings.set(name, value);
            }
            Command::SetExtensionDirectory(path) => {
                if self.webview.is_some() {
                    warn!("extension directory set after the surface was built has no effect");
                }
                self.staged.extension_dir = Some(path);
            }
            Command::LoadUrl(url) => match &self.webview {
                Some(webview) => webview.load_url(&url)?,
                None => self.staged.url = Some(url),
            },
            Command::EvaluateScript(code) => match &self.webview {
                Some(webview) => self.submit_script(webview, &code),
                None => self.staged.scripts.push(code),
            },
            Command::ShowInspector => match &self.webview {
                Some(webview) => webview.open_devtools(),
                None => self.staged.show_inspector = true,
            },
            Command::DestroySurface => {
                self.webview = None;
                self.destroyed = true;
                debug!("browser surface released");
            }
        }
        Ok(())
    }

    pub(super) fn drain_into(&self, events: &mut Vec<ToolkitEvent>) {
        if let Ok(mut pending) = self.drain.lock() {
            events.append(&mut pending);
        }
    }

    /// Submit script text to the engine. Completion comes back through the
    /// drain: the payload is parsed in `classify_script_payload`, failures
    /// are reported as events and never invoke a result callback.
    fn submit_script(&self, webview: &WebView, code: &str) {
        let drain = Arc::clone(&self.drain);
        let submitted = webview.evaluate_script_with_callback(code, move |payload| {
            let event = classify_script_payload(&payload);
            if let Ok(mut pending) = drain.lock() {
                pending.push(event);
            }
        });
        if let Err(e) = submitted {
            if let Ok(mut pending) = self.drain.lock() {
                pending.push(ToolkitEvent::ScriptFailed(e.to_string()));
            }
        }
    }

    fn build_surface(&mut self, window: &Window) -> Result<WebView> {
        let size = window.inner_size();
        let mut builder = WebViewBuilder::new()
            .with_bounds(full_window_bounds(size.width, size.height))
            .with_focused(true);

        builder = apply_settings(builder, &self.staged.settings);

        #[cfg(target_os = "linux")]
        if let Some(dir) = &self.staged.extension_dir {
            use wry::WebViewBuilderExtUnix;
            builder = builder.with_extension_path(dir.clone());
        }
        #[cfg(not(target_os = "linux"))]
        if let Some(dir) = &self.staged.extension_dir {
            debug!(path = %dir.display(), "extension directory is not supported on this platform");
        }

        let load_drain = Arc::clone(&self.drain);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = LoadState::from(event);
            debug!(?state, %url, "page load");
            if let Ok(mut pending) = load_drain.lock() {
                pending.push(ToolkitEvent::LoadStateChanged { state, url });
            }
        });

        if let Some(url) = &self.staged.url {
            builder = builder.with_url(url);
        } else {
            builder = builder.with_html("<html><body></body></html>");
        }

        let webview = builder.build_as_child(window)?;

        for code in std::mem::take(&mut self.staged.scripts) {
            self.submit_script(&webview, &code);
        }
        if self.staged.show_inspector {
            webview.open_devtools();
        }

        Ok(webview)
    }
}

impl ApplicationHandler for ShellDriver {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.destroyed {
            return;
        }

        let (width, height) = self.staged.size.unwrap_or(DEFAULT_SIZE);
        let attrs = WindowAttributes::default()
            .with_title(
                self.staged
                    .title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            )
            .with_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.build_surface(&window) {
            Ok(webview) => self.webview = Some(webview),
            Err(e) => {
                error!(error = %e, "failed to build browser surface");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        debug!("window created and surface attached");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                debug!("window close requested");
                if let Ok(mut pending) = self.drain.lock() {
                    pending.push(ToolkitEvent::CloseRequested);
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(webview) = &self.webview {
                        if let Err(e) =
                            webview.set_bounds(full_window_bounds(size.width, size.height))
                        {
                            warn!(error = %e, "failed to resize surface");
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

/// The surface fills its window; the engine scrolls the document itself.
fn full_window_bounds(width: u32, height: u32) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(width, height)),
    }
}

/// Translate the settings map into engine builder flags. Names without an
/// engine mapping are left for the engine to reject or ignore.
fn apply_settings<'a>(mut builder: WebViewBuilder<'a>, settings: &Settings) -> WebViewBuilder<'a> {
    for (name, value) in settings.iter() {
        builder = match (name, value) {
            ("user-agent", SettingValue::Text(ua)) => builder.with_user_agent(ua),
            ("enable-developer-extras", SettingValue::Bool(on)) => builder.with_devtools(*on),
            ("transparent", SettingValue::Bool(on)) => builder.with_transparent(*on),
            ("autoplay", SettingValue::Bool(on)) => builder.with_autoplay(*on),
            ("clipboard", SettingValue::Bool(on)) => builder.with_clipboard(*on),
            ("incognito", SettingValue::Bool(on)) => builder.with_incognito(*on),
            (name, value) => {
                debug!(%name, ?value, "setting has no engine mapping");
                builder
            }
        };
    }
    builder
}

/// The engine reports script completion as a JSON payload; anything that
/// does not parse is a failed evaluation.
fn classify_script_payload(payload: &str) -> ToolkitEvent {
    if payload.is_empty() {
        return ToolkitEvent::ScriptFailed("script produced no result".into());
    }
    match serde_json::from_str(payload) {
        Ok(value) => ToolkitEvent::ScriptSucceeded(value),
        Err(_) => ToolkitEvent::ScriptFailed(payload.to_string()),
    }
}
