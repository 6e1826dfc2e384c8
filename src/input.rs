use crate::validator::Selection;
use slog::{debug, warn, Logger};
use std::convert::TryFrom;
use std::path::{Path, PathBuf};
use std::time::Instant;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};

#[derive(Debug, Clone)]
pub struct Input {
    happen_at: Instant,
    event: InputEvent,
}

impl Input {
    pub fn happen_at(&self) -> Instant {
        self.happen_at
    }

    pub fn into_event(self) -> InputEvent {
        self.event
    }
}

impl From<InputEvent> for Input {
    fn from(event: InputEvent) -> Self {
        Self {
            happen_at: Instant::now(),
            event,
        }
    }
}

/// User intents recognized from window events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Open the file dialog.
    Browse,
    Dropped(PathBuf),
    Submit,
    Reset,
    Exit,
}

impl InputEvent {
    fn from_key(key: VirtualKeyCode) -> Option<Self> {
        match key {
            VirtualKeyCode::O | VirtualKeyCode::Space => Some(InputEvent::Browse),
            VirtualKeyCode::Return => Some(InputEvent::Submit),
            VirtualKeyCode::R | VirtualKeyCode::Back => Some(InputEvent::Reset),
            VirtualKeyCode::Escape => Some(InputEvent::Exit),
            _ => None,
        }
    }
}

impl<T> TryFrom<&Event<'_, T>> for Input {
    type Error = ();

    fn try_from(event: &Event<T>) -> Result<Self, Self::Error> {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => InputEvent::from_key(*key).map(Input::from).ok_or(()),
                WindowEvent::DroppedFile(path) => Ok(InputEvent::Dropped(path.clone()).into()),
                WindowEvent::CloseRequested => Ok(InputEvent::Exit.into()),
                _ => Err(()),
            },
            _ => Err(()),
        }
    }
}

/// Reads name and size of a picked file. Unreadable files count as no file.
pub fn selection_from_path(path: &Path, logger: &Logger) -> Option<Selection> {
    match Selection::from_path(path) {
        Ok(selection) => {
            debug!(
                logger,
                "Picked {} ({} bytes)",
                selection.name(),
                selection.size()
            );
            Some(selection)
        }
        Err(e) => {
            warn!(logger, "Can't read {}: {}", path.display(), e);
            None
        }
    }
}
