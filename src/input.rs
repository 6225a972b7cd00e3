use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

// arrow keys turn the camera as much as a drag of this many pixels
const KEY_ROTATE_PX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Command {
    /// Drag delta in logical buffer pixels.
    Rotate { dx: f64, dy: f64 },
    /// Wheel notches; positive moves the camera forward.
    Zoom(f64),
    TogglePause,
    ToggleMarkers,
    WarpFaster,
    WarpSlower,
    Reset,
    Quit,
}

/// Remembers the last drag position so mouse motion can be turned into deltas.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DragTracker {
    last: Option<(u16, u16)>,
}

impl DragTracker {
    /// `px_per_cell` converts one column/row of motion into buffer pixels.
    pub(crate) fn map(&mut self, m: MouseEvent, px_per_cell: (f64, f64)) -> Option<Command> {
        match m.kind {
            MouseEventKind::Down(MouseButton::Left | MouseButton::Right) => {
                self.last = Some((m.column, m.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left | MouseButton::Right) => {
                let prev = self.last.replace((m.column, m.row))?;
                let dc = m.column as f64 - prev.0 as f64;
                let dr = m.row as f64 - prev.1 as f64;
                if dc == 0.0 && dr == 0.0 {
                    return None;
                }
                Some(Command::Rotate {
                    dx: dc * px_per_cell.0,
                    dy: dr * px_per_cell.1,
                })
            }
            MouseEventKind::Up(_) => {
                self.last = None;
                None
            }
            MouseEventKind::ScrollUp => Some(Command::Zoom(1.0)),
            MouseEventKind::ScrollDown => Some(Command::Zoom(-1.0)),
            _ => None,
        }
    }
}

pub(crate) fn map_key(k: KeyEvent) -> Option<Command> {
    if k.kind != KeyEventKind::Press && k.kind != KeyEventKind::Repeat {
        return None;
    }
    if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMarkers),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char(']') => Some(Command::WarpFaster),
        KeyCode::Char('[') => Some(Command::WarpSlower),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Zoom(1.0)),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::Zoom(-1.0)),
        KeyCode::Left => Some(Command::Rotate {
            dx: -KEY_ROTATE_PX,
            dy: 0.0,
        }),
        KeyCode::Right => Some(Command::Rotate {
            dx: KEY_ROTATE_PX,
            dy: 0.0,
        }),
        KeyCode::Up => Some(Command::Rotate {
            dx: 0.0,
            dy: -KEY_ROTATE_PX,
        }),
        KeyCode::Down => Some(Command::Rotate {
            dx: 0.0,
            dy: KEY_ROTATE_PX,
        }),
        _ => None,
    }
}

/// Drain pending events without blocking the frame.
pub(crate) fn collect_commands(
    drag: &mut DragTracker,
    px_per_cell: (f64, f64),
) -> anyhow::Result<Vec<Command>> {
    let mut out = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        let cmd = match event::read()? {
            Event::Key(k) => map_key(k),
            Event::Mouse(m) => drag.map(m, px_per_cell),
            _ => None,
        };
        if let Some(c) = cmd {
            out.push(c);
            if out.len() >= 64 {
                break;
            }
        }
    }
    Ok(out)
}
