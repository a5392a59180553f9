// Handles the rendering of widgets to the terminal frame.

use super::display::Panel;
use super::model::ServiceStatus;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Main render function called every frame.
pub fn render(f: &mut Frame, panel: &mut Panel, elevated: bool, busy: bool) {
    let warning_height = if elevated { 0 } else { 4 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(warning_height),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    if !elevated {
        render_admin_warning(f, chunks[0]);
    }
    render_actions(f, chunks[1], busy);
    render_status(f, chunks[2], panel.status);
    render_log(f, chunks[3], panel);
    render_footer(f, chunks[4]);
}

fn render_admin_warning(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "⚠ Please Run As Administrator for this Program to Work",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "To run as administrator: Right Click the Program and select 'Run As Administrator'.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_actions(f: &mut Frame, area: Rect, busy: bool) {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));
    let fix1_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![
            key("p "),
            Span::styled("PANIC", Style::default().fg(Color::Red)),
            Span::raw("          "),
            key("1 "),
            Span::styled("Fix 1", fix1_style),
        ]),
        Line::from(vec![
            key("u "),
            Span::styled("Undo Fix 1", fix1_style),
            Span::raw("     "),
            key("2 "),
            Span::raw("Fix 2 (IN BETA)"),
        ]),
        Line::from(vec![
            key("i "),
            Span::raw("Undo Fix 2 (IN BETA)"),
            Span::raw("  "),
            key("c "),
            Span::raw("Check Status"),
        ]),
    ];

    let title = if busy {
        " Actions (Fix 1 in progress) "
    } else {
        " Actions "
    };
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn status_color(status: ServiceStatus) -> Color {
    match status {
        ServiceStatus::Enabled => Color::Red,
        ServiceStatus::Disabled => Color::Green,
        ServiceStatus::Unknown => Color::Gray,
    }
}

fn render_status(f: &mut Frame, area: Rect, status: ServiceStatus) {
    let text = vec![
        Line::from(Span::styled(
            format!("Fix 1 Status: {}", status.label()),
            Style::default()
                .fg(Color::Black)
                .bg(status_color(status))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Green = Filter Disabled   |   Red = Filter Enabled",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(paragraph, area);
}

fn render_log(f: &mut Frame, area: Rect, panel: &mut Panel) {
    panel.log_rows = area.height.saturating_sub(2);
    let scroll = if panel.stick_to_bottom {
        panel.bottom_offset()
    } else {
        panel.log_scroll.min(panel.bottom_offset())
    };

    let title = if panel.stick_to_bottom {
        " Activity Log (Auto-scroll: ON) "
    } else {
        " Activity Log (Paused) - Press 'G' to resume "
    };

    let content: Vec<Line> = panel
        .log
        .entries()
        .iter()
        .map(|s| Line::from(s.as_str()))
        .collect();
    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::raw("Actions: "),
        Span::styled("p 1 u 2 i c ", Style::default().fg(Color::Cyan)),
        Span::raw("| Scroll: "),
        Span::styled("j/k ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("| Auto-Scroll: "),
        Span::styled("G ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("| Quit: "),
        Span::styled("q", Style::default().fg(Color::Red)),
    ]);

    let paragraph =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(" Controls "));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::display::Display;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(panel: &mut Panel, elevated: bool) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render(f, panel, elevated, false))
            .unwrap();
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_status_label_and_color() {
        let mut panel = Panel::new();
        panel.set_status(ServiceStatus::Disabled);

        let terminal = draw(&mut panel, true);
        let text = screen(&terminal);
        assert!(text.contains("Fix 1 Status: Filter Disabled"));
        assert!(text.contains("Green = Filter Disabled"));

        let buffer = terminal.backend().buffer();
        let green_cells = buffer
            .content
            .iter()
            .filter(|cell| cell.bg == Color::Green)
            .count();
        assert_eq!(green_cells, "Fix 1 Status: Filter Disabled".len());
    }

    #[test]
    fn test_admin_warning_only_when_not_elevated() {
        let mut panel = Panel::new();
        assert!(screen(&draw(&mut panel, false)).contains("Please Run As Administrator"));
        assert!(!screen(&draw(&mut panel, true)).contains("Please Run As Administrator"));
    }

    #[test]
    fn test_log_follows_newest_entries() {
        let mut panel = Panel::new();
        for i in 0..40 {
            panel.append_log(format!("entry {i:02}"));
        }

        let text = screen(&draw(&mut panel, true));
        assert!(text.contains("entry 39"));
        assert!(!text.contains("entry 00"));
    }

    #[test]
    fn test_scrolling_up_from_the_newest_entry_moves_one_line() {
        let mut panel = Panel::new();
        for i in 0..40 {
            panel.append_log(format!("entry {i:02}"));
        }
        draw(&mut panel, true);

        panel.scroll_up();
        let text = screen(&draw(&mut panel, true));
        assert!(text.contains("entry 38"));
        assert!(!text.contains("entry 39"));
        assert!(!text.contains("entry 00"));
        assert!(text.contains("Paused"));

        panel.scroll_down();
        let text = screen(&draw(&mut panel, true));
        assert!(text.contains("entry 39"));
    }
}
