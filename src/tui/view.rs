//! Drawing for the live view and the static scatter plot.

use std::f64::consts::PI;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Points, Rectangle},
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget,
    },
    Frame,
};

use super::pi_app::{InputMode, PiApp};
use crate::config::ChartConfig;
use crate::engine::{Phase, Point, RunState, SampleSource};

/// Canvas bounds; a little wider than the unit square so the outline shows.
const PLOT_BOUNDS: [f64; 2] = [-1.05, 1.05];

/// Split points into `(inside, outside)` coordinate lists.
#[must_use]
pub fn split_points(points: &[Point]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for p in points {
        if p.inside_circle() {
            inside.push((p.x(), p.y()));
        } else {
            outside.push((p.x(), p.y()));
        }
    }
    (inside, outside)
}

/// Error history thinned to at most `max_samples` points.
///
/// The last entry is always kept so the line ends at the current error.
#[must_use]
pub fn chart_data(history: &[(u64, f64)], max_samples: usize) -> Vec<(f64, f64)> {
    let max_samples = max_samples.max(2);
    let stride = history.len().div_ceil(max_samples).max(1);

    let mut data: Vec<(f64, f64)> = history
        .iter()
        .step_by(stride)
        .map(|&(n, err)| (n as f64, err))
        .collect();

    if let Some(&(n, err)) = history.last() {
        let last = (n as f64, err);
        if data.last() != Some(&last) {
            data.push(last);
        }
    }
    data
}

/// Axis bounds `(x, y)` of the error chart.
///
/// x spans the requested count plus headroom; y starts at the configured
/// ceiling and grows to fit the largest error seen.
#[must_use]
pub fn chart_bounds(state: &RunState, chart: &ChartConfig) -> ([f64; 2], [f64; 2]) {
    let x_max = state.total_points_requested() as f64 * chart.x_headroom;
    let y_max = chart
        .error_ceiling_percent
        .max(state.max_error_percent() * 1.05);
    ([0.0, x_max], [0.0, y_max])
}

/// Lines of the statistics panel.
#[must_use]
pub fn stats_lines(state: &RunState, phase: Phase) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Total Points: {} / {}",
            state.total_points_generated(),
            state.total_points_requested()
        ),
        format!(
            "Points Inside Circle: {}{}",
            state.points_inside_circle(),
            state
                .hit_percent()
                .map(|h| format!(" ({h:.2}%)"))
                .unwrap_or_default()
        ),
    ];

    match (state.pi_estimate(), state.error_percent()) {
        (Some(estimate), Some(error)) => {
            let se = state.standard_error().unwrap_or_default();
            lines.push(format!(
                "Pi Estimate: {estimate:.6} ± {se:.6} (True π: {PI:.6})"
            ));
            lines.push(format!("Error: {error:.4}%"));
        }
        _ => lines.push(format!("Pi Estimate: - (True π: {PI:.6})")),
    }

    if phase == Phase::Finished {
        lines.push("Simulation complete!".to_string());
    }
    lines
}

fn paint_points(ctx: &mut Context<'_>, inside: &[(f64, f64)], outside: &[(f64, f64)]) {
    ctx.draw(&Rectangle {
        x: -1.0,
        y: -1.0,
        width: 2.0,
        height: 2.0,
        color: Color::White,
    });
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: 1.0,
        color: Color::White,
    });
    ctx.layer();
    if !inside.is_empty() {
        ctx.draw(&Points {
            coords: inside,
            color: Color::Green,
        });
    }
    if !outside.is_empty() {
        ctx.draw(&Points {
            coords: outside,
            color: Color::Red,
        });
    }
}

fn points_canvas<'a>(
    inside: &'a [(f64, f64)],
    outside: &'a [(f64, f64)],
    title: &'a str,
) -> Canvas<'a, impl Fn(&mut Context<'_>) + 'a> {
    Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds(PLOT_BOUNDS)
        .y_bounds(PLOT_BOUNDS)
        .paint(move |ctx| paint_points(ctx, inside, outside))
}

/// Render the scatter plot of a finished run as plain text.
#[must_use]
pub fn render_scatter(state: &RunState, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    let (inside, outside) = split_points(state.points());
    points_canvas(&inside, &outside, "Points Distribution").render(area, &mut buf);
    buffer_to_string(&buf)
}

fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width.max(1));
    let mut out = String::new();
    for row in buf.content().chunks(width) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Draw one frame of the live view.
pub fn ui<S: SampleSource>(f: &mut Frame, app: &PiApp<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(f.area());

    render_title(f, chunks[0], app);
    render_plots(f, chunks[1], app);
    render_stats(f, chunks[2], app);

    if let InputMode::EnterCount(_) = app.mode {
        render_count_prompt(f, f.area(), app);
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Running => Color::Green,
        Phase::Paused => Color::Yellow,
        Phase::Finished => Color::Cyan,
    }
}

fn render_title<S: SampleSource>(f: &mut Frame, area: Rect, app: &PiApp<S>) {
    let phase = app.session.phase();
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            " MONTE CARLO π ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("[{}]", phase.label()),
            Style::default().fg(phase_color(phase)),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Frame: {}", app.frame_count),
            Style::default().fg(Color::White),
        ),
    ])])
    .block(Block::default().borders(Borders::ALL).title(format!(
        "Controls: [Space] {}  [R] Reset  [Q] Quit",
        app.pause_label()
    )));
    f.render_widget(title, area);
}

fn render_plots<S: SampleSource>(f: &mut Frame, area: Rect, app: &PiApp<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let state = app.session.state();
    let (inside, outside) = split_points(state.points());
    f.render_widget(
        points_canvas(&inside, &outside, "Monte Carlo Simulation"),
        chunks[0],
    );

    render_error_chart(f, chunks[1], state, &app.chart);
}

fn render_error_chart(f: &mut Frame, area: Rect, state: &RunState, chart: &ChartConfig) {
    // two braille dots per cell horizontally
    let data = chart_data(state.error_history(), usize::from(area.width) * 2);
    let (x_bounds, y_bounds) = chart_bounds(state, chart);

    let datasets = vec![Dataset::default()
        .name("error %")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Blue))
        .data(&data)];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error vs. Number of Points"),
        )
        .x_axis(
            Axis::default()
                .title("Number of Points")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels([format!("{:.0}", x_bounds[0]), format!("{:.0}", x_bounds[1])]),
        )
        .y_axis(
            Axis::default()
                .title("Error (%)")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels([format!("{:.0}", y_bounds[0]), format!("{:.1}", y_bounds[1])]),
        );
    f.render_widget(widget, area);
}

fn render_stats<S: SampleSource>(f: &mut Frame, area: Rect, app: &PiApp<S>) {
    let lines: Vec<Line> = stats_lines(app.session.state(), app.session.phase())
        .into_iter()
        .map(Line::from)
        .collect();
    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Statistics"));
    f.render_widget(stats, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_count_prompt<S: SampleSource>(f: &mut Frame, area: Rect, app: &PiApp<S>) {
    let InputMode::EnterCount(input) = &app.mode else {
        return;
    };

    let mut lines = vec![
        Line::from(app.count_prompt()),
        Line::from(Span::styled(
            format!("> {}_", input.buffer),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(error) = &input.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let popup = centered(area, 64, 5);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Reset: [Enter] Confirm  [Esc] Cancel"),
        ),
        popup,
    );
}
