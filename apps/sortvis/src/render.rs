//! Terminal renderers for animation frames.

use std::io::{self, Write};

use shared::domain::{Snapshot, VisualState};
use sort_engine::Renderer;
use tracing::warn;

const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One line per frame: a block glyph per element, coloured by its visual state.
pub struct TextRenderer {
    scale_max: u32,
    color: bool,
}

impl TextRenderer {
    pub fn new(scale_max: u32, color: bool) -> Self {
        Self {
            scale_max: scale_max.max(1),
            color,
        }
    }

    fn glyph(&self, value: u32) -> char {
        let last = GLYPHS.len() - 1;
        let level = (u64::from(value.min(self.scale_max)) * last as u64) / u64::from(self.scale_max);
        GLYPHS[usize::try_from(level).unwrap_or(last)]
    }

    pub fn format_frame(&self, frame: &Snapshot) -> String {
        let mut line = String::with_capacity(frame.len() * 12);
        for element in frame.iter() {
            let glyph = self.glyph(element.value);
            if self.color {
                let code = match element.state {
                    VisualState::Default => "34",
                    VisualState::Comparing => "31",
                    VisualState::Sorted => "32",
                    VisualState::Pivot => "35",
                };
                line.push_str(&format!("\x1b[{code}m{glyph}\x1b[0m"));
            } else {
                line.push(glyph);
            }
        }
        if !self.color {
            line.push_str("  ");
            line.extend(frame.iter().map(|element| state_letter(element.state)));
        }
        line
    }
}

fn state_letter(state: VisualState) -> char {
    match state {
        VisualState::Default => '.',
        VisualState::Comparing => 'c',
        VisualState::Sorted => 's',
        VisualState::Pivot => 'p',
    }
}

impl Renderer for TextRenderer {
    fn render(&self, frame: &Snapshot) {
        let line = self.format_frame(frame);
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{line}") {
            warn!("failed to write frame: {err}");
        }
    }
}

/// Writes every frame as a JSON array of `{value, state}` objects, one per line.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, frame: &Snapshot) {
        match serde_json::to_string(frame) {
            Ok(line) => {
                let mut stdout = io::stdout().lock();
                if let Err(err) = writeln!(stdout, "{line}") {
                    warn!("failed to write frame: {err}");
                }
            }
            Err(err) => warn!("failed to encode frame: {err}"),
        }
    }
}
