use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    raw_window_handle::HasDisplayHandle,
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::{AppConfig, WindowConfig};
use crate::vulkan::Instance;

struct AppState {
    // Field order is teardown order: the instance goes before its window.
    instance: Instance,
    window: Window,
}

struct App {
    config: AppConfig,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        log::debug!("Creating window...");
        let window = event_loop.create_window(window_attributes(&self.config.window))?;

        let display_handle = event_loop.display_handle()?.as_raw();
        let instance = Instance::new(&self.config.instance, display_handle)?;

        if instance.validation_enabled() {
            log::info!("Validation layers enabled");
        }

        Ok(AppState { instance, window })
    }

    fn teardown(&mut self) {
        if let Some(AppState { instance, window }) = self.state.take() {
            drop(instance);
            log::debug!("Destroying window...");
            drop(window);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => {
                log::debug!("Polling for window events...");
                self.state = Some(state);
            }
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Opens the window, brings up the Vulkan instance and polls events until the
/// window is closed.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    let result = event_loop.run_app(&mut app);

    app.teardown();

    if let Some(err) = app.error.take() {
        return Err(err.context("failed to initialize"));
    }

    Ok(result?)
}
