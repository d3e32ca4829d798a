use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::color::{Channel, Rgb};
use crate::error::Result;
use crate::params::{Control, ParamValue, BINDINGS};
use crate::render_loop::{FrameTask, LoopControl};
use crate::renderer::SoftwareRenderer;
use crate::terminal::{surface_size, OverlayLine, TerminalSurface, PIXELS_PER_ROW};
use crate::viewer::{PointerInput, Viewer};

/// Slider steps applied per key press
const NUMERIC_NUDGE_STEPS: f32 = 100.0;
/// Channel change per key press on a color swatch
const COLOR_NUDGE: u8 = 8;

const PANEL_FG: Rgb = Rgb::WHITE;
const PANEL_BG: Rgb = Rgb::from_hex(0x1a1a1a);
const SELECTED_BG: Rgb = Rgb::from_hex(0x3a3a6a);

/// Keyboard-driven light panel
#[derive(Debug)]
pub struct PanelWidget {
    selected: usize,
    channel: Channel,
}

impl Default for PanelWidget {
    fn default() -> Self {
        PanelWidget {
            selected: 0,
            channel: Channel::Red,
        }
    }
}

impl PanelWidget {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % BINDINGS.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + BINDINGS.len() - 1) % BINDINGS.len();
    }

    pub fn cycle_channel(&mut self) {
        self.channel = self.channel.next();
    }

    /// Moves the selected control one notch; the value is clamped before it is written
    pub fn nudge(&self, viewer: &mut Viewer, direction: f32) -> Result<()> {
        let binding = &BINDINGS[self.selected];
        let params = *viewer.panel().params();
        let value = match binding.control {
            Control::Slider { range, get, .. } => ParamValue::Number(
                range.clamp(get(&params) + direction * range.step * NUMERIC_NUDGE_STEPS),
            ),
            Control::Swatch { get, .. } => {
                let c = get(&params);
                let channel = c.channel(self.channel);
                let channel = if direction > 0.0 {
                    channel.saturating_add(COLOR_NUDGE)
                } else {
                    channel.saturating_sub(COLOR_NUDGE)
                };
                ParamValue::Color(c.with_channel(self.channel, channel))
            }
        };
        viewer.set_parameter(binding.key, value)
    }

    /// Panel rows, starting at the top of the screen
    pub fn lines(&self, viewer: &Viewer) -> Vec<OverlayLine> {
        let mut lines = vec![OverlayLine {
            row: 0,
            text: format!(
                " Lights  [Tab] select  [<-/->] adjust  [c] channel {}  [m] {} mode ",
                self.channel.label(),
                if viewer.is_dark_mode() { "light" } else { "dark" }
            ),
            fg: PANEL_FG,
            bg: PANEL_BG,
        }];
        for (index, binding) in BINDINGS.iter().enumerate() {
            let value = viewer
                .panel()
                .displayed(index)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let marker = if index == self.selected { '>' } else { ' ' };
            lines.push(OverlayLine {
                row: index as u16 + 1,
                text: format!("{marker} {:<18}{:>10} ", binding.label, value),
                fg: PANEL_FG,
                bg: if index == self.selected {
                    SELECTED_BG
                } else {
                    PANEL_BG
                },
            });
        }
        lines
    }
}

/// Terminal front-end: routes input to the viewer and presents its frames
pub struct ViewerApp {
    viewer: Viewer,
    renderer: SoftwareRenderer,
    surface: TerminalSurface,
    panel: PanelWidget,
    pixel_ratio: f32,
    size: (u16, u16),
    /// Show the diagnostics overlay
    debug: bool,
    /// Last mouse cell while the primary button is held
    last_mouse_pos: Option<(u16, u16)>,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl ViewerApp {
    pub fn new(
        viewer: Viewer,
        renderer: SoftwareRenderer,
        surface: TerminalSurface,
        size: (u16, u16),
        pixel_ratio: f32,
    ) -> Self {
        ViewerApp {
            viewer,
            renderer,
            surface,
            panel: PanelWidget::default(),
            pixel_ratio,
            size,
            debug: false,
            last_mouse_pos: None,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    /// Handle one terminal event
    fn handle_event(&mut self, event: Event) -> Result<LoopControl> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.size = (cols, rows);
                let (width, height) = surface_size(cols, rows);
                self.viewer
                    .resize(width, height, self.pixel_ratio, &mut self.renderer);
            }
            _ => {}
        }
        Ok(LoopControl::Continue)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<LoopControl> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(LoopControl::Stop);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(LoopControl::Stop);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.viewer.toggle_dark_mode(),
            KeyCode::Char('i') | KeyCode::Char('I') => self.debug = !self.debug,
            KeyCode::Char('c') | KeyCode::Char('C') => self.panel.cycle_channel(),
            KeyCode::Tab | KeyCode::Down => self.panel.select_next(),
            KeyCode::BackTab | KeyCode::Up => self.panel.select_previous(),
            KeyCode::Right => self.panel.nudge(&mut self.viewer, 1.0)?,
            KeyCode::Left => self.panel.nudge(&mut self.viewer, -1.0)?,
            _ => {}
        }
        Ok(LoopControl::Continue)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pos = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.last_mouse_pos = Some(pos),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(last) = self.last_mouse_pos {
                    let dx = pos.0 as f32 - last.0 as f32;
                    let dy = (pos.1 as f32 - last.1 as f32) * PIXELS_PER_ROW as f32;
                    self.viewer.pointer(PointerInput::Drag { dx, dy });
                }
                self.last_mouse_pos = Some(pos);
            }
            MouseEventKind::Up(MouseButton::Left) => self.last_mouse_pos = None,
            MouseEventKind::ScrollUp => self.viewer.pointer(PointerInput::Scroll { steps: 1.0 }),
            MouseEventKind::ScrollDown => {
                self.viewer.pointer(PointerInput::Scroll { steps: -1.0 })
            }
            MouseEventKind::Moved => self.viewer.pointer(PointerInput::Move {
                x: pos.0 as f32,
                y: (pos.1 as u32 * PIXELS_PER_ROW) as f32,
            }),
            _ => {}
        }
    }

    /// Diagnostics lines at the bottom of the screen
    fn debug_lines(&self) -> Vec<OverlayLine> {
        let camera = self.viewer.camera();
        let p = camera.position();
        let texts = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("State: {}", self.viewer.phase()),
            format!("Camera: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            format!("Distance: {:.2}", camera.distance()),
            format!(
                "Models: {} ({} triangles)",
                self.viewer.scene().models.len(),
                self.viewer.scene().triangle_count()
            ),
            format!("FPS: {:.2}", self.fps),
        ];
        let first_row = self.size.1.saturating_sub(texts.len() as u16);
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| OverlayLine {
                row: first_row + i as u16,
                text,
                fg: PANEL_FG,
                bg: PANEL_BG,
            })
            .collect()
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }
}

impl FrameTask for ViewerApp {
    fn pump_events(&mut self, timeout: Duration) -> Result<LoopControl> {
        if !event::poll(timeout)? {
            return Ok(LoopControl::Continue);
        }
        loop {
            if self.handle_event(event::read()?)? == LoopControl::Stop {
                return Ok(LoopControl::Stop);
            }
            if !event::poll(Duration::ZERO)? {
                return Ok(LoopControl::Continue);
            }
        }
    }

    fn frame(&mut self, elapsed: Duration) -> Result<()> {
        self.viewer.frame(elapsed, &mut self.renderer)?;
        self.update_fps();

        let mut overlay = self.panel.lines(&self.viewer);
        if self.viewer.is_loading_model() {
            overlay.push(OverlayLine {
                row: overlay.len() as u16,
                text: " Loading model... ".to_string(),
                fg: PANEL_FG,
                bg: PANEL_BG,
            });
        }
        if self.debug {
            overlay.extend(self.debug_lines());
        }

        let (cols, rows) = self.size;
        let pixels = self.renderer.surface_pixels();
        self.surface.present(&pixels, cols, rows, &overlay)?;
        Ok(())
    }
}
