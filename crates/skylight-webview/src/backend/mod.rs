//! The real toolkit collaborator: `winit` windowing + `wry` browser surface.

use std::time::Duration;

use tracing::debug;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

use crate::errors::ShellError;
use crate::events::ToolkitEvent;
use crate::runtime;
use crate::toolkit::{Command, LoopStatus, PumpMode, Toolkit};
use crate::Result;

mod driver;

use driver::ShellDriver;

/// Toolkit implementation over `winit` + `wry`.
///
/// winit realizes windows only once its loop runs, so commands submitted
/// before the first pump are staged by the driver and applied when the
/// window and surface come up. Engine notifications are pushed into a drain
/// by the surface's handler closures and handed to the shell after each
/// pump iteration; both ends run on the loop thread.
pub struct WryToolkit {
    event_loop: Option<EventLoop<()>>,
    driver: ShellDriver,
}

impl WryToolkit {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            driver: ShellDriver::new(),
        }
    }
}

impl Default for WryToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for WryToolkit {
    fn create(&mut self) -> Result<()> {
        if self.event_loop.is_some() {
            return Ok(());
        }
        runtime::init()?;
        runtime::acquire_loop()?;
        match EventLoop::new() {
            Ok(event_loop) => {
                self.event_loop = Some(event_loop);
                Ok(())
            }
            Err(e) => {
                runtime::release_loop();
                Err(ShellError::Init(e.to_string()))
            }
        }
    }

    fn submit(&mut self, command: Command) -> Result<()> {
        self.driver.handle(command)
    }

    fn pump(&mut self, mode: PumpMode, events: &mut Vec<ToolkitEvent>) -> LoopStatus {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return LoopStatus::Ended;
        };

        let timeout = match mode {
            PumpMode::Wait => None,
            PumpMode::Poll => Some(Duration::ZERO),
        };
        let status = event_loop.pump_app_events(timeout, &mut self.driver);
        self.driver.drain_into(events);

        match status {
            PumpStatus::Exit(code) => {
                debug!(code, "event loop ended");
                LoopStatus::Ended
            }
            PumpStatus::Continue => LoopStatus::Continue,
        }
    }
}

impl Drop for WryToolkit {
    fn drop(&mut self) {
        if self.event_loop.take().is_some() {
            runtime::release_loop();
        }
    }
}
