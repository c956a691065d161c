// Drawing Surface
//
// The engine paints through this trait instead of talking to egui, so the
// widget adapter maps it onto a painter while tests drive it with a
// recording implementation.

use egui::{Color32, Pos2, Rect, Vec2};

pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    /// Draw `text` anchored inside `rect`, clipped to it.
    fn draw_text(&mut self, rect: Rect, text: &str, color: Color32);
    fn measure_text(&mut self, text: &str) -> Vec2;
}

/// One retained drawing command, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color32,
    },
    StrokeRect {
        rect: Rect,
        width: f32,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color32,
    },
}

impl DrawCmd {
    /// Replay onto `surface`, shifted by `offset` into screen space.
    pub fn replay(&self, offset: Vec2, surface: &mut dyn Surface) {
        match self {
            DrawCmd::FillRect { rect, color } => surface.fill_rect(rect.translate(offset), *color),
            DrawCmd::StrokeRect { rect, width, color } => {
                surface.stroke_rect(rect.translate(offset), *width, *color)
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => surface.line(*from + offset, *to + offset, *width, *color),
            DrawCmd::Text { rect, text, color } => {
                surface.draw_text(rect.translate(offset), text, *color)
            }
        }
    }
}

/// Surface that records into a `DrawCmd` batch instead of drawing.
#[derive(Debug, Default)]
pub struct BatchSurface {
    commands: Vec<DrawCmd>,
}

impl BatchSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }
}

impl Surface for BatchSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color32) {
        self.commands.push(DrawCmd::StrokeRect { rect, width, color });
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color32) {
        self.commands.push(DrawCmd::Text {
            rect,
            text: text.to_string(),
            color,
        });
    }

    fn measure_text(&mut self, text: &str) -> Vec2 {
        // Close enough for batch building; real measurement runs through
        // the font system before layout.
        Vec2::new(text.chars().count() as f32 * 7.0, 14.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_replay_translates_every_command() {
        let mut batch = BatchSurface::new();
        batch.fill_rect(
            Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0)),
            Color32::RED,
        );
        batch.line(pos2(0.0, 5.0), pos2(10.0, 5.0), 1.0, Color32::BLACK);
        let commands = batch.into_commands();

        let mut replayed = BatchSurface::new();
        for command in &commands {
            command.replay(vec2(100.0, 50.0), &mut replayed);
        }
        let replayed = replayed.into_commands();

        match &replayed[0] {
            DrawCmd::FillRect { rect, .. } => {
                assert_eq!(rect.min, pos2(100.0, 50.0));
                assert_eq!(rect.max, pos2(110.0, 60.0));
            }
            other => panic!("expected a fill, got {other:?}"),
        }
        match &replayed[1] {
            DrawCmd::Line { from, to, .. } => {
                assert_eq!(*from, pos2(100.0, 55.0));
                assert_eq!(*to, pos2(110.0, 55.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }
}
