// Main frame rendering
//
// Layout:
//   +------------------------------------------------+
//   | Filters (two rows of three fields)             |
//   +-----------------+------------------------------+
//   | Summary Stats   |  Exit Speed vs Launch Angle  |
//   +-----------------+  (scatter chart)             |
//   | Selected Point  |                              |
//   +-----------------+------------------------------+
//   | status bar                                     |
//   +------------------------------------------------+
//
// Modals (help, record detail) overlay the whole frame and are rendered
// last, in detail.rs.

use super::app::{App, Focus};
use super::chart::{self, PlotBounds};
use super::detail;
use crate::filters::FilterField;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Width of the left column (summary + selected point cards)
const LEFT_COLUMN_WIDTH: u16 = 34;

/// Estimated chart margins inside the block: y-axis labels on the left,
/// x-axis labels and the axis line at the bottom. Hit-testing tolerates
/// the off-by-a-cell this approximation can introduce.
const AXIS_LEFT_MARGIN: u16 = 6;
const AXIS_BOTTOM_MARGIN: u16 = 2;

/// Draw the full frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .split(f.area());

    render_filters(f, app, rows[0]);

    let columns =
        Layout::horizontal([Constraint::Length(LEFT_COLUMN_WIDTH), Constraint::Min(30)])
            .split(rows[1]);
    let left = Layout::vertical([Constraint::Length(9), Constraint::Min(6)]).split(columns[0]);

    render_summary(f, app, left[0]);
    render_selected_point(f, app, left[1]);
    render_chart(f, app, columns[1]);
    render_status_bar(f, app, rows[2]);

    if let Some(modal) = &app.modal {
        detail::render(f, modal);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the filter form: six labeled fields across two rows
fn render_filters(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Filters;

    let field_span = |field: FilterField| -> Vec<Span> {
        let selected = focused && field == app.selected_field();
        let value_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        // Trailing underscore marks the edit position
        let value = if selected {
            format!("{}_", app.filters.get(field))
        } else {
            app.filters.get(field).to_string()
        };
        vec![
            Span::styled(
                format!(" {}: ", field.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(format!("{value:<12}"), value_style),
        ]
    };

    let mut row_one: Vec<Span> = Vec::new();
    let mut row_two: Vec<Span> = Vec::new();
    for (i, field) in FilterField::ALL.into_iter().enumerate() {
        let target = if i < 3 { &mut row_one } else { &mut row_two };
        target.extend(field_span(field));
    }

    let hint = if focused {
        " Filters - type to edit, Tab next field, Enter to chart "
    } else {
        " Filters - press f to edit "
    };

    let paragraph = Paragraph::new(vec![Line::from(row_one), Line::from(row_two)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(hint),
    );
    f.render_widget(paragraph, area);
}

/// Render the summary statistics card (dataset-wide, not filter-scoped)
fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);

    let lines = match &app.summary {
        Some(summary) => vec![
            Line::from(vec![
                Span::styled("Avg Exit Speed:   ", label),
                Span::styled(summary.avg_exit_speed_display(), value),
            ]),
            Line::from(vec![
                Span::styled("Avg Launch Angle: ", label),
                Span::styled(summary.avg_launch_angle_display(), value),
            ]),
            Line::from(vec![
                Span::styled("Batted Balls:     ", label),
                Span::styled(summary.total_batted_balls.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Unique Batters:   ", label),
                Span::styled(summary.unique_batters.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Unique Pitchers:  ", label),
                Span::styled(summary.unique_pitchers.to_string(), value),
            ]),
        ],
        // Never fetched successfully yet - show a loading indicator
        None => vec![Line::from(Span::styled(
            format!("{} loading...", app.spinner_char()),
            label,
        ))],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(false))
            .title(" Summary Statistics "),
    );
    f.render_widget(paragraph, area);
}

/// Render the hover card for the point under the chart cursor
fn render_selected_point(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match app.cursor_record() {
        Some(record) => chart::hover_lines(record)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
            .collect(),
        None => vec![Line::from(Span::styled(
            "←/→ or click a point",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(false))
            .title(" Selected Point "),
    );
    f.render_widget(paragraph, area);
}

/// Axis labels: low, middle, high
fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .iter()
        .map(|v| Span::raw(format!("{v:.0}")))
        .collect()
}

/// Render the scatter chart and cache its plot area for hit-testing
fn render_chart(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Chart;
    let points = chart::plot_points(&app.records);
    let bounds = chart::bounds(&points);

    // Cursor point rendered as a separate, highlighted dataset
    let cursor_point: Vec<(f64, f64)> = app
        .cursor
        .and_then(|i| points.get(i))
        .map(|p| vec![*p])
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("Batted Balls")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&cursor_point),
    ];

    let title = if app.loading {
        format!(" Exit Speed vs Launch Angle {} ", app.spinner_char())
    } else {
        " Exit Speed vs Launch Angle ".to_string()
    };

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title(title),
        )
        .x_axis(
            Axis::default()
                .title("Launch Angle (°)")
                .style(Style::default().fg(Color::Gray))
                .bounds([bounds.x_min, bounds.x_max])
                .labels(axis_labels(bounds.x_min, bounds.x_max)),
        )
        .y_axis(
            Axis::default()
                .title("Exit Speed (mph)")
                .style(Style::default().fg(Color::Gray))
                .bounds([bounds.y_min, bounds.y_max])
                .labels(axis_labels(bounds.y_min, bounds.y_max)),
        );

    f.render_widget(widget, area);
    app.chart_plot_area = Some(plot_area(area));
}

/// The region of the chart block that actually plots data: inside the
/// borders, right of the y-axis labels, above the x-axis labels
pub fn plot_area(area: Rect) -> Rect {
    let inner_x = area.x + 1 + AXIS_LEFT_MARGIN;
    let inner_y = area.y + 1;
    Rect::new(
        inner_x,
        inner_y,
        area.width.saturating_sub(2 + AXIS_LEFT_MARGIN),
        area.height.saturating_sub(2 + AXIS_BOTTOM_MARGIN),
    )
}

/// Hit-test a mouse click against the last rendered chart
pub fn chart_hit(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.chart_plot_area?;
    if column < area.x
        || column >= area.x + area.width
        || row < area.y
        || row >= area.y + area.height
    {
        return None;
    }
    let points = chart::plot_points(&app.records);
    let bounds: PlotBounds = chart::bounds(&points);
    chart::hit_test(area, &bounds, &points, column, row)
}

/// Render the one-line status bar
fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.source_label),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{} records", app.records.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
    ];

    if app.loading {
        spans.push(Span::styled(
            format!("{} fetching", app.spinner_char()),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(error) = &app.last_error {
        spans.push(Span::styled(
            format!("  ✗ {error}"),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(entry) = app.log_buffer.last_warning() {
        spans.push(Span::styled(
            format!("  ⚠ {} {}", entry.timestamp.format("%H:%M:%S"), entry.message),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        "  ?:help q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
