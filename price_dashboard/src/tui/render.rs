use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Wrap},
};

use crate::{
    chart::PriceChart,
    controller::Controller,
    tui::input::Focus,
    view::{
        Dashboard,
        controls::SelectControl,
        files::NO_FILES,
        table::{COLUMNS, NO_DATA, PriceMove},
        toast::Toast,
    },
};

/// What the screen shows besides the controller's own state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState {
    pub focus: Focus,
    /// Index of the chart point whose OHLCV values are shown.
    pub cursor: Option<usize>,
}

pub fn draw(frame: &mut Frame, controller: &Controller, view: ViewState) {
    let dashboard = controller.dashboard();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(frame.area());

    render_connection(frame, rows[0], controller, view.focus);
    render_selectors(frame, rows[1], dashboard, view.focus);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    render_chart(frame, middle[0], controller.chart(), view);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(middle[1]);
    render_files(frame, side[0], dashboard);
    render_logs(frame, side[1], dashboard);

    render_candles(frame, rows[3], dashboard);

    if let Some(toast) = dashboard.toast.current() {
        render_toast(frame, toast);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn light(on: bool, on_text: &'static str, off_text: &'static str, on_color: Color) -> Span<'static> {
    if on {
        Span::styled(format!("● {on_text}"), Style::default().fg(on_color))
    } else {
        Span::styled(format!("○ {off_text}"), Style::default().fg(Color::DarkGray))
    }
}

fn render_connection(frame: &mut Frame, area: Rect, controller: &Controller, focus: Focus) {
    let dashboard = controller.dashboard();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(48)])
        .split(area);

    let path = Paragraph::new(dashboard.path_input.as_str()).block(
        Block::bordered()
            .title("MT5 terminal path")
            .border_style(focus_style(focus == Focus::Path)),
    );
    frame.render_widget(path, cols[0]);

    let indicators = &dashboard.indicators;
    let status = Line::from(vec![
        light(indicators.connected, "Connected", "Disconnected", Color::Green),
        Span::raw("  "),
        light(indicators.recording, "Recording", "Idle", Color::Red),
        Span::raw("  "),
        Span::raw(indicators.last_update.as_deref().unwrap_or("Never").to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(status).block(Block::bordered().title("Status")),
        cols[1],
    );
}

fn render_selectors(frame: &mut Frame, area: Rect, dashboard: &Dashboard, focus: Focus) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Min(20),
        ])
        .split(area);

    render_select(
        frame,
        cols[0],
        "Symbol",
        &dashboard.symbols,
        dashboard.controls.symbol_select,
        focus == Focus::Symbol,
    );
    render_select(
        frame,
        cols[1],
        "Timeframe",
        &dashboard.timeframes,
        dashboard.controls.timeframe_select,
        focus == Focus::Timeframe,
    );

    let controls = &dashboard.controls;
    let keys = [
        ("F2", "Connect", controls.connect),
        ("F3", "Disconnect", controls.disconnect),
        ("F5", "Start", controls.start_recording),
        ("F6", "Stop", controls.stop_recording),
        ("F8", "Clear logs", true),
        ("Esc", "Quit", true),
    ];
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, label, enabled)| {
            let style = if *enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("[{key}] "), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("{label}  "), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::bordered().title("Actions")),
        cols[2],
    );
}

fn render_select(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    control: &SelectControl,
    enabled: bool,
    focused: bool,
) {
    let text_style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if control.selected().is_none() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };
    let label = format!("{} ({})", control.display(), control.len());
    let widget = Paragraph::new(Span::styled(label, text_style)).block(
        Block::bordered()
            .title(title.to_string())
            .border_style(focus_style(focused)),
    );
    frame.render_widget(widget, area);
}

fn render_chart(frame: &mut Frame, area: Rect, chart: &PriceChart, view: ViewState) {
    let block = Block::bordered()
        .title(chart.caption().to_string())
        .border_style(focus_style(view.focus == Focus::Chart));

    let Some(bounds) = chart.bounds() else {
        frame.render_widget(
            Paragraph::new(NO_DATA)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let series = chart.series();
    let dataset = Dataset::default()
        .name("Close")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&series);

    let labels = chart.labels();
    let x_labels: Vec<String> = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => vec![first.clone(), last.clone()],
        _ => Vec::new(),
    };
    let y_labels = vec![
        format!("{:.5}", bounds.y[0]),
        format!("{:.5}", (bounds.y[0] + bounds.y[1]) / 2.0),
        format!("{:.5}", bounds.y[1]),
    ];

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(x_labels)
                .bounds(bounds.x),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(y_labels)
                .bounds(bounds.y),
        );
    frame.render_widget(widget, parts[0]);

    let detail = view
        .cursor
        .and_then(|i| Some((labels.get(i)?, chart.tooltip(i)?)))
        .map(|(label, lines)| format!("{label}  {}", lines.join("  ")))
        .unwrap_or_else(|| "←/→ on the chart to inspect a bar".to_string());
    frame.render_widget(
        Paragraph::new(Span::styled(detail, Style::default().fg(Color::Gray))),
        parts[1],
    );
}

fn render_candles(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::bordered().title("Latest data");
    let widths = [
        Constraint::Length(19),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(8),
    ];
    let header = Row::new(COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));

    if dashboard.candles.is_empty() {
        let table = Table::new([Row::new([Cell::from(NO_DATA)])], [Constraint::Min(10)])
            .header(header)
            .block(block);
        frame.render_widget(table, area);
        return;
    }

    let rows = dashboard.candles.iter().map(|row| {
        let close_color = match row.movement {
            PriceMove::Up => Color::Green,
            PriceMove::Down => Color::Red,
        };
        Row::new(row.cells.iter().enumerate().map(|(i, text)| {
            if i == 6 {
                Cell::from(Span::styled(text.clone(), Style::default().fg(close_color)))
            } else {
                Cell::from(text.clone())
            }
        }))
    });
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_files(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::bordered().title("Saved files");
    let lines: Vec<Line> = if dashboard.files.is_empty() {
        vec![Line::from(Span::styled(NO_FILES, Style::default().fg(Color::Gray)))]
    } else {
        dashboard
            .files
            .iter()
            .map(|f| {
                Line::from(vec![
                    Span::styled(f.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {}  ", f.size)),
                    Span::styled(f.modified.clone(), Style::default().fg(Color::Gray)),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_logs(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let lines: Vec<Line> = dashboard
        .logs
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("[{}] ", entry.time), Style::default().fg(Color::Gray)),
                Span::styled(
                    entry.message.clone(),
                    Style::default().fg(entry.severity.style().text),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Log")),
        area,
    );
}

fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    if area.width < 24 || area.height < 6 {
        return;
    }
    let width = area.width.min(44);
    let popup = Rect::new(area.x + area.width - width, area.y, width, 5);
    let style = toast.severity.style();
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", style.icon), Style::default().fg(style.icon_color)),
            Span::styled(toast.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", toast.time), Style::default().fg(Color::Gray)),
        ]),
        Line::from(toast.message.clone()),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::default().fg(style.icon_color))),
        popup,
    );
}
