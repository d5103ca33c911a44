/// Terminal front end for the polyview wireframe viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use polyview_core::{Selection, Viewer};
use std::io::{self, stdout, Write};
use tracing::{info, warn};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Rotation step per key press (5 degrees)
const ROTATE_STEP: f64 = std::f64::consts::PI / 36.0;
const TRANSLATE_STEP: f64 = 0.1;
const ZOOM_STEP: f64 = 1.1;
/// Where `o` writes the active mesh
pub const SAVE_PATH: &str = "model.obj";

const HELP: &str = "w/s a/d e/r rotate  +/- scale  arrows PgUp/PgDn move  1/2/3 mirror  \
                    p proj  Tab mesh  o save  0 reset  q quit";

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Rotate(f64, f64, f64),
    Translate(f64, f64, f64),
    Zoom(f64),
    ToggleReflectXY,
    ToggleReflectXZ,
    ToggleReflectYZ,
    ToggleProjection,
    CycleMesh,
    Save,
    Reset,
    Quit,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let action = match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('w') => Action::Rotate(ROTATE_STEP, 0.0, 0.0),
            KeyCode::Char('s') => Action::Rotate(-ROTATE_STEP, 0.0, 0.0),
            KeyCode::Char('a') => Action::Rotate(0.0, -ROTATE_STEP, 0.0),
            KeyCode::Char('d') => Action::Rotate(0.0, ROTATE_STEP, 0.0),
            KeyCode::Char('e') => Action::Rotate(0.0, 0.0, ROTATE_STEP),
            KeyCode::Char('r') => Action::Rotate(0.0, 0.0, -ROTATE_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => Action::Zoom(ZOOM_STEP),
            KeyCode::Char('-') => Action::Zoom(1.0 / ZOOM_STEP),
            KeyCode::Left => Action::Translate(-TRANSLATE_STEP, 0.0, 0.0),
            KeyCode::Right => Action::Translate(TRANSLATE_STEP, 0.0, 0.0),
            KeyCode::Up => Action::Translate(0.0, TRANSLATE_STEP, 0.0),
            KeyCode::Down => Action::Translate(0.0, -TRANSLATE_STEP, 0.0),
            KeyCode::PageUp => Action::Translate(0.0, 0.0, TRANSLATE_STEP),
            KeyCode::PageDown => Action::Translate(0.0, 0.0, -TRANSLATE_STEP),
            KeyCode::Char('1') => Action::ToggleReflectXY,
            KeyCode::Char('2') => Action::ToggleReflectXZ,
            KeyCode::Char('3') => Action::ToggleReflectYZ,
            KeyCode::Char('p') => Action::ToggleProjection,
            KeyCode::Tab => Action::CycleMesh,
            KeyCode::Char('o') => Action::Save,
            KeyCode::Char('0') => Action::Reset,
            _ => return None,
        };
        Some(action)
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    running: bool,
    message: String,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            message: String::new(),
        })
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;

        // Redraw only when something changed
        while self.running {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    if let Some(action) = Action::from_key(code) {
                        self.apply(action);
                    }
                }
                Event::Resize(width, height) => {
                    self.renderer.resize(width as usize, height as usize);
                }
                _ => continue,
            }

            if self.running {
                self.render()?;
            }
        }

        Ok(())
    }

    /// Update the viewer for one action
    pub fn apply(&mut self, action: Action) {
        let params = &mut self.viewer.params;
        match action {
            Action::Rotate(dx, dy, dz) => params.rotate(dx, dy, dz),
            Action::Translate(dx, dy, dz) => params.translate(dx, dy, dz),
            Action::Zoom(factor) => params.zoom(factor),
            Action::ToggleReflectXY => params.reflect_xy = !params.reflect_xy,
            Action::ToggleReflectXZ => params.reflect_xz = !params.reflect_xz,
            Action::ToggleReflectYZ => params.reflect_yz = !params.reflect_yz,
            Action::ToggleProjection => self.viewer.mode = self.viewer.mode.toggle(),
            Action::CycleMesh => self.viewer.cycle(),
            Action::Reset => params.reset(),
            Action::Save => {
                self.message = match self.viewer.save_active(SAVE_PATH) {
                    Ok(()) => format!("saved {SAVE_PATH}"),
                    Err(e) => {
                        warn!(error = %e, "save failed");
                        format!("save failed: {e}")
                    }
                };
            }
            Action::Quit => {
                info!("quitting viewer");
                self.running = false;
            }
        }
    }

    fn status_line(&self) -> String {
        let p = &self.viewer.params;
        let mesh = match self.viewer.selection() {
            Selection::Builtin(solid) => solid.to_string(),
            Selection::Custom => "custom".to_string(),
        };
        let mirror: String = [(p.reflect_xy, "XY"), (p.reflect_xz, "XZ"), (p.reflect_yz, "YZ")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",");
        let active = self.viewer.active();
        let (min, max) = active.bounds();
        let size = max - min;
        format!(
            "polyview | {mesh} ({}v {}f, {:.2}x{:.2}x{:.2}) | {} | rot {:.0}/{:.0}/{:.0} deg \
             | scale {:.2} | move {:.1},{:.1},{:.1} | mirror [{mirror}] {}",
            active.vertex_count(),
            active.face_count(),
            size.x,
            size.y,
            size.z,
            self.viewer.mode,
            p.rotate_x.to_degrees(),
            p.rotate_y.to_degrees(),
            p.rotate_z.to_degrees(),
            p.scale,
            p.translate_x,
            p.translate_y,
            p.translate_z,
            self.message,
        )
    }

    fn render(&mut self) -> io::Result<()> {
        let (surface_w, surface_h) = self.renderer.surface_size();
        let frame = self.viewer.frame(surface_w, surface_h);

        self.renderer.clear();
        self.renderer.render_frame(&frame);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let (width, height) = terminal::size()?;
        let width = width as usize;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(truncate(&self.status_line(), width)),
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            Print(truncate(HELP, width)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
