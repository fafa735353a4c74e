// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts
// - Detail modal: every field of one batted-ball record, plus the video
//   link when the record carries one

use super::modal::Modal;
use crate::data::{opt_unit, BattedBall};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal) {
    match modal {
        Modal::Help => render_help(f),
        Modal::Detail(record) => render_detail(f, record),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the help modal overlay
fn render_help(f: &mut Frame) {
    let key_style = Style::default().fg(Color::Cyan);
    let desc_style = Style::default().fg(Color::White);
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{key:<12}"), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Filters", header_style)),
        kb("f", "Focus the filter form"),
        kb("Tab/↓", "Next field"),
        kb("Shift+Tab/↑", "Previous field"),
        kb("type", "Edit field (re-fetches on every edit)"),
        kb("Backspace", "Delete last character"),
        kb("Enter/Esc", "Back to the chart"),
        Line::raw(""),
        Line::from(Span::styled("  Chart", header_style)),
        kb("←/→, h/l", "Move point cursor"),
        kb("Enter", "Open record detail"),
        kb("click", "Select and open the nearest point"),
        kb("r", "Re-fetch with current filters"),
        Line::raw(""),
        Line::from(Span::styled("  Detail View", header_style)),
        kb("y", "Copy record (readable)"),
        kb("Y", "Copy record (JSON)"),
        kb("Esc, q", "Close"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?", "Toggle this help"),
        kb("q", "Quit (from the chart)"),
        kb("Ctrl+C", "Quit from anywhere"),
    ]);

    let area = centered_rect(52, 26, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Help ")
            .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
    );
    f.render_widget(paragraph, area);
}

/// Label/value rows for one record, detail view order
fn detail_rows(record: &BattedBall) -> Vec<(&'static str, String)> {
    vec![
        ("Batter", record.batter.clone()),
        ("Pitcher", record.pitcher.clone()),
        ("Game Date", record.game_date.clone()),
        ("Exit Speed", format!("{} mph", record.exit_speed)),
        ("Launch Angle", format!("{}°", record.launch_angle)),
        ("Exit Direction", opt_unit(record.exit_direction, "°")),
        ("Hit Distance", opt_unit(record.hit_distance, "ft")),
        ("Hang Time", opt_unit(record.hang_time, "sec")),
        ("Hit Spin Rate", opt_unit(record.hit_spin_rate, "rpm")),
        ("Play Outcome", record.play_outcome.clone()),
    ]
}

/// Plain-text rendering of a record, used by the y (copy) binding
pub fn detail_text(record: &BattedBall) -> String {
    let mut out = String::from("Batted Ball Details\n");
    for (label, value) in detail_rows(record) {
        out.push_str(&format!("{label}: {value}\n"));
    }
    if let Some(video) = record.video() {
        out.push_str(&format!("Video: {video}\n"));
    }
    out
}

/// Render the record detail modal
fn render_detail(f: &mut Frame, record: &BattedBall) {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);

    let mut lines = vec![Line::raw("")];
    for (label, value) in detail_rows(record) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {label:<16}"), label_style),
            Span::styled(value, value_style),
        ]));
    }

    // Video section only when the record has a non-empty link
    if let Some(video) = record.video() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  Video           ", label_style),
            Span::styled(video.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let width = 64.min(f.area().width);
    let height = (lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(width, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Batted Ball Details ")
            .title_bottom(Line::from(" y:copy  Y:copy JSON  Esc:close ").centered()),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_detail_text_includes_all_fields() {
        let record = &demo::dataset()[0];
        let text = detail_text(record);

        assert!(text.contains("Batter: Acuna, Ronald"));
        assert!(text.contains("Pitcher: Scherzer, Max"));
        assert!(text.contains("Exit Speed: 105.3 mph"));
        assert!(text.contains("Launch Angle: 24°"));
        assert!(text.contains("Play Outcome: HomeRun"));
        assert!(text.contains("Video: https://example.com/v/acuna-hr.mp4"));
    }

    #[test]
    fn test_detail_text_omits_absent_video() {
        let mut record = demo::dataset()[0].clone();
        record.video_link = None;
        assert!(!detail_text(&record).contains("Video:"));

        // Empty string counts as absent too
        record.video_link = Some(String::new());
        assert!(!detail_text(&record).contains("Video:"));
    }

    #[test]
    fn test_detail_rows_handle_missing_numerics() {
        let mut record = demo::dataset()[0].clone();
        record.hang_time = None;
        let rows = detail_rows(&record);
        let hang = rows.iter().find(|(l, _)| *l == "Hang Time").unwrap();
        assert_eq!(hang.1, "-");
    }
}
