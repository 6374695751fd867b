use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;
use crate::core::{App as CoreApp, AppControl, WindowCtx};
use crate::input::{translate_window_event, InputState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial inner size in physical pixels.
    pub initial_size: PixelSize,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tracer".to_string(),
            initial_size: PixelSize::new(512, 384),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// The loop sleeps between events; frames are only produced on
    /// `RedrawRequested`.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, app);
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    window: Arc<Window>,
    input: InputState,
}

impl WindowEntry {
    fn ctx(&self) -> WindowCtx<'_> {
        WindowCtx {
            id: self.window.id(),
            window: &self.window,
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    window: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size: PhysicalSize<u32> = self.config.initial_size.into();
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(size)
            .with_resizable(self.config.resizable);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        log::info!(
            "window '{}' created at {}x{}",
            self.config.title,
            size.width,
            size.height
        );

        self.app
            .on_window_created(Arc::clone(&window))
            .context("application failed to set up its window")?;

        window.request_redraw();
        self.window = Some(WindowEntry {
            window,
            input: InputState::default(),
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows: the app is called while the entry is borrowed.
        let (app, entry) = (&mut self.app, &mut self.window);
        let Some(entry) = entry.as_mut().filter(|e| e.window.id() == window_id) else {
            return;
        };

        let mut control = AppControl::Continue;

        if let Some(ev) = translate_window_event(&entry.input, &event) {
            entry.input.apply_event(&ev);
            control = app.on_input(&entry.ctx(), &ev);
        }

        match &event {
            WindowEvent::CloseRequested => control = AppControl::Exit,

            WindowEvent::Resized(new_size) => {
                if control == AppControl::Continue {
                    control = app.on_resize(&entry.ctx(), (*new_size).into());
                }
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                if control == AppControl::Continue {
                    control = app.on_resize(&entry.ctx(), new_size.into());
                }
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if control == AppControl::Continue {
                    control = app.on_redraw(&entry.ctx());
                }
            }

            _ => {}
        }

        if control == AppControl::Exit {
            log::info!("exit requested");
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
        }
    }
}
