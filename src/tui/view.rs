use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use super::canvas::{SurfaceView, to_color};
use crate::middle::DisplayState;
use crate::scene::Surface;
use crate::shared::{BACKGROUND, CELL_WIDTH_PX, EXIT_HINT, HINT_COLOR};

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let surface = paint(area, state);
    frame.render_widget(SurfaceView(&surface), area);

    if state.show_exit_hint {
        draw_hint(frame, area);
    }
}

// clear to the background, then every live shape oldest first
pub fn paint(area: Rect, state: &DisplayState) -> Surface {
    let mut surface = Surface::new(
        area.width as usize,
        area.height as usize * 2,
        CELL_WIDTH_PX as f32,
        BACKGROUND,
    );
    state.shapes.draw(&mut surface);
    surface
}

fn draw_hint(frame: &mut Frame, area: Rect) {
    let hint = Rect {
        x: area.x + 1,
        y: area.y,
        width: EXIT_HINT.chars().count() as u16,
        height: 1,
    }
    .intersection(area);
    let text = Paragraph::new(EXIT_HINT).style(Style::default().fg(to_color(HINT_COLOR)));
    frame.render_widget(text, hint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Shape, ShapeKind, ShapeRegistry};
    use crate::shared::PALETTE;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_paint_background_only() {
        let shapes = ShapeRegistry::new(4);
        let state = DisplayState { shapes: &shapes, show_exit_hint: false };
        let surface = paint(Rect::new(0, 0, 10, 5), &state);
        assert_eq!(surface.width(), 10);
        assert_eq!(surface.height(), 10);
        assert_eq!(surface.pixel(9, 9), Some(BACKGROUND));
    }

    #[test]
    fn test_paint_shapes() {
        let mut shapes = ShapeRegistry::new(4);
        shapes.push(Shape::new(40, 40, PALETTE[2], ShapeKind::Circle, 50));
        let state = DisplayState { shapes: &shapes, show_exit_hint: false };
        let surface = paint(Rect::new(0, 0, 20, 10), &state);
        // sample 4 covers pixels 32..40, centre 36
        assert_eq!(surface.pixel(4, 4), Some(PALETTE[2]));
    }

    #[test]
    fn test_hint_only_when_asked() {
        let shapes = ShapeRegistry::new(4);
        let backend = TestBackend::new(30, 4);
        let mut term = Terminal::new(backend).expect("test terminal");

        let state = DisplayState { shapes: &shapes, show_exit_hint: true };
        term.draw(|f| render(f, f.area(), &state)).expect("draw");
        let row: String = (0..30).map(|x| term.backend().buffer()[(x, 0)].symbol().to_string()).collect();
        assert!(row.contains(EXIT_HINT));

        let state = DisplayState { shapes: &shapes, show_exit_hint: false };
        term.draw(|f| render(f, f.area(), &state)).expect("draw");
        let row: String = (0..30).map(|x| term.backend().buffer()[(x, 0)].symbol().to_string()).collect();
        assert!(!row.contains("Hold"));
    }
}
