mod config;
mod error;
mod input;
mod model;
mod presenter;
mod transport;
mod utils;
mod validator;

use winit::dpi::PhysicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowBuilder};

use settings_path::*;
use slog::{info, o, trace, warn, Logger};
use sloggers::{file::FileLoggerBuilder, types::TimeZone, Build};
use std::path::Path;

use error::init::InitError;
use error::log_init::LogInitError;
use sloggers::types::Severity;
use winit::error::OsError;

use crate::config::Settings;
use crate::input::{selection_from_path, Input, InputEvent};
use crate::model::manager::{AppEvent, Command, SubmissionManager};
use crate::presenter::{Presenter, View, APP_TITLE};
use crate::transport::http::HttpService;
use crate::utils::{pick_file, show_error_message};
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Instant;

type Manager = SubmissionManager<HttpService, EventLoopProxy<AppEvent>>;

fn main() {
    let (logger, event_loop, presenter, manager) = init().unwrap_or_else(|e| {
        let message = format!("Initialization error occurred: {}", e);
        eprintln!("{}", message);
        show_error_message("Initialization error", message.as_str());
        std::process::exit(1);
    });

    info!(logger, "Initialization done");
    run(logger, event_loop, presenter, manager)
}

/// Basis structures initialization
fn init() -> Result<(Logger, EventLoop<AppEvent>, Presenter, Manager), InitError> {
    let mut save_path = default_settings_path()?;
    save_path.push("CvUploader");

    // Init logger
    let logger = init_logger(&save_path)?;
    info!(logger, "=============== START NEW SESSION ===============");
    trace!(logger, "Logger initilized");

    let settings = Settings::load(&save_path)?;
    info!(logger, "Settings loaded: {:?}", settings);

    // Init event loop
    let event_loop = EventLoop::with_user_event();
    trace!(logger, "Event loop initialized");

    // Init window
    let window = init_window(&event_loop)?;
    trace!(logger, "Window initialized");

    let service = HttpService::new(
        &settings.base_url,
        settings.request_timeout(),
        logger.new(o!("part" => "http")),
    )?;
    info!(logger, "Submissions go to {}", service.upload_url());
    let manager = SubmissionManager::new(
        settings.animation,
        Arc::new(service),
        event_loop.create_proxy(),
        logger.new(o!("part" => "manager")),
    );
    let presenter = Presenter::new(window, logger.new(o!("part" => "presenter")));

    Ok((logger, event_loop, presenter, manager))
}

/// Window initialization
fn init_window(event_loop: &EventLoop<AppEvent>) -> Result<Window, OsError> {
    let window_builder = WindowBuilder::default()
        .with_title(APP_TITLE)
        .with_inner_size(PhysicalSize::new(800, 200));
    let window = window_builder.build(event_loop)?;
    Ok(window)
}

/// Logger initialization
fn init_logger(save_path: &Path) -> Result<Logger, LogInitError> {
    let log_dir = save_path.join("logs");
    let log_path = log_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;
    let logger = FileLoggerBuilder::new(log_path)
        .timezone(TimeZone::Local)
        .rotate_size(10 * 2u64.pow(20))
        .level(Severity::Trace)
        .build()?;
    Ok(logger)
}

/// Drives the submission from window events, worker completions and the
/// animation deadline.
fn run(
    logger: Logger,
    event_loop: EventLoop<AppEvent>,
    mut presenter: Presenter,
    mut manager: Manager,
) -> ! {
    event_loop.run(move |event, _, control_flow| {
        if let ControlFlow::Exit = *control_flow {
            return;
        }

        if let Event::NewEvents(_) = event {
            manager.tick(Instant::now());
        }

        if let Ok(input) = Input::try_from(&event) {
            if !dispatch(input, &mut manager, &logger) {
                info!(logger, "Exiting...");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        match event {
            Event::UserEvent(app_event) => manager.handle_event(app_event),
            Event::MainEventsCleared => presenter.present(View::of(manager.submission())),
            _ => {}
        }

        *control_flow = match manager.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    })
}

/// Turns an input into a manager command. Returns `false` on exit.
fn dispatch(input: Input, manager: &mut Manager, logger: &Logger) -> bool {
    let now = input.happen_at();
    let command = match input.into_event() {
        InputEvent::Exit => return false,
        InputEvent::Browse => {
            if manager.is_busy() {
                warn!(logger, "File dialog suppressed: submission in progress");
                return true;
            }
            match pick_file() {
                Some(path) => Command::Select(selection_from_path(&path, logger)),
                None => {
                    trace!(logger, "File dialog cancelled");
                    return true;
                }
            }
        }
        InputEvent::Dropped(path) => Command::Select(selection_from_path(&path, logger)),
        InputEvent::Submit => Command::Submit,
        InputEvent::Reset => Command::Reset,
    };

    if manager.handle_command(command, now).is_err() {
        trace!(logger, "Command left the submission unchanged");
    }
    true
}
