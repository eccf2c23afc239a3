//! Dashboard: header, optional side menu, the active view and bottom navigation.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph, Tabs,
};

use micare_core::chat::ConversationId;
use micare_core::dashboard::{
    BottomNav, DashboardView, DateRange, DiseaseChart, MapState, MarkerKind, CHART_TITLE,
    MONTH_LABELS,
};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let [header_area, body_area, nav_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(f, header_area, app);

    let dashboard = app.flow.dashboard();
    let content_area = if dashboard.side_menu_open {
        let [menu_area, rest] =
            Layout::horizontal([Constraint::Length(20), Constraint::Min(10)]).areas(body_area);
        render_side_menu(f, menu_area, dashboard.view);
        rest
    } else {
        body_area
    };

    match dashboard.view {
        DashboardView::Home => render_home(f, content_area, app),
        DashboardView::Map => match &dashboard.map {
            Some(map) => render_map(f, content_area, map),
            None => placeholder(f, content_area, "Map is loading..."),
        },
        DashboardView::Analytics => match &dashboard.chart {
            Some(chart) => render_chart(f, content_area, chart),
            None => placeholder(f, content_area, "Chart is loading..."),
        },
        DashboardView::Wallet => render_wallet(f, content_area, app),
        DashboardView::Engagement => render_engagement(f, content_area, app),
    }

    let selected = BottomNav::ALL
        .iter()
        .position(|n| *n == dashboard.bottom_nav)
        .unwrap_or(0);
    let tabs = Tabs::new(BottomNav::ALL.iter().map(|n| n.label()))
        .select(selected)
        .style(theme::muted())
        .highlight_style(theme::accent_bold());
    f.render_widget(tabs, nav_area);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let session = app.flow.session();
    let (name, role) = session
        .current_user
        .as_ref()
        .map(|u| (u.name.as_str(), u.role.as_str()))
        .unwrap_or(("Guest", "Not signed in"));
    let badge = session.notifications.badge();
    let bell = if badge.is_empty() {
        Span::styled("🔔", theme::muted())
    } else {
        Span::styled(format!("🔔 {badge}"), theme::negative())
    };
    let lines = vec![Line::from(vec![
        Span::styled(name.to_string(), theme::accent_bold()),
        Span::styled(format!("  {role}  "), theme::muted()),
        bell,
    ])];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_side_menu(f: &mut Frame, area: Rect, active: DashboardView) {
    let items: Vec<ListItem> = DashboardView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if *view == active {
                theme::accent_bold()
            } else {
                theme::text()
            };
            ListItem::new(Span::styled(format!(" {} {}", i + 1, view.label()), style))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(theme::muted())
            .title(" Menu ")
            .title_style(theme::accent_bold()),
    );
    f.render_widget(list, area);
}

fn placeholder(f: &mut Frame, area: Rect, text: &str) {
    f.render_widget(
        Paragraph::new(Span::styled(text.to_string(), theme::muted())),
        area,
    );
}

fn render_home(f: &mut Frame, area: Rect, app: &AppState) {
    let session = app.flow.session();
    let lines = vec![
        Line::from(Span::styled("Welcome back", theme::accent_bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Wallet balance: ", theme::muted()),
            Span::styled(format!("{:.2} HTB", session.wallet_balance), theme::positive()),
        ]),
        Line::from(vec![
            Span::styled("  Unread notifications: ", theme::muted()),
            Span::styled(
                session.notifications.unread_count().to_string(),
                theme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Active services: ", theme::muted()),
            Span::styled(session.service_count_label(), theme::text()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_map(f: &mut Frame, area: Rect, map: &MapState) {
    let (lat, lng) = map.center;
    let span = map.span_degrees();
    let [map_area, side_area] = if map.analytics_open {
        Layout::horizontal([Constraint::Min(20), Constraint::Length(30)]).areas(area)
    } else {
        Layout::horizontal([Constraint::Min(20), Constraint::Length(0)]).areas(area)
    };

    let theme = theme::theme();
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(format!(" Health Map  zoom {} ", map.zoom))
                .title_style(theme::accent_bold()),
        )
        .marker(Marker::Braille)
        .x_bounds([lng - span, lng + span])
        .y_bounds([lat - span, lat + span])
        .paint(move |ctx| {
            for marker in &map.markers {
                let color = theme.marker_color(marker.kind);
                ctx.draw(&Circle {
                    x: marker.lng,
                    y: marker.lat,
                    radius: span / 40.0,
                    color,
                });
                ctx.print(
                    marker.lng,
                    marker.lat,
                    Span::styled(format!(" {}", marker.title), Style::default().fg(color)),
                );
            }
        });
    f.render_widget(canvas, map_area);

    if map.analytics_open {
        let count = |kind: MarkerKind| map.markers.iter().filter(|m| m.kind == kind).count();
        let lines: Vec<Line> = [MarkerKind::Facility, MarkerKind::Hotspot, MarkerKind::Emergency]
            .into_iter()
            .map(|kind| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<10}", kind.label()),
                        Style::default().fg(theme.marker_color(kind)),
                    ),
                    Span::styled(count(kind).to_string(), theme::text()),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::muted())
                    .title(" Area analytics [a]close ")
                    .title_style(theme::accent_bold()),
            ),
            side_area,
        );
    }
}

fn render_chart(f: &mut Frame, area: Rect, chart: &DiseaseChart) {
    let points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, f64::from(*v)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.disease.label())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::rgb(series.disease.rgb())))
                .data(data)
        })
        .collect();

    let len = chart.series.first().map(|s| s.values.len()).unwrap_or(0);
    let x_labels: Vec<Span> = if chart.range == DateRange::SixMonths {
        MONTH_LABELS
            .iter()
            .map(|m| Span::styled(*m, theme::muted()))
            .collect()
    } else {
        vec![
            Span::styled("1", theme::muted()),
            Span::styled(len.to_string(), theme::muted()),
        ]
    };
    let y_max = f64::from(chart.max_value().max(1)) * 1.1;

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(format!(
                    " {CHART_TITLE}  range {}  filter {}  [d]range [f]disease ",
                    chart.range.id(),
                    chart.filter.label()
                ))
                .title_style(theme::accent_bold()),
        )
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, len.saturating_sub(1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Cases", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );
    f.render_widget(widget, area);
}

fn render_wallet(f: &mut Frame, area: Rect, app: &AppState) {
    let session = app.flow.session();
    let address = session
        .current_user
        .as_ref()
        .map(|u| u.blockchain_address.as_str())
        .unwrap_or("not connected");
    let lines = vec![
        Line::from(Span::styled("Health Token Wallet", theme::accent_bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Balance: ", theme::muted()),
            Span::styled(format!("{:.2} HTB", session.wallet_balance), theme::positive()),
        ]),
        Line::from(vec![
            Span::styled("  Address: ", theme::muted()),
            Span::styled(address.to_string(), theme::text()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_engagement(f: &mut Frame, area: Rect, app: &AppState) {
    let chat = &app.flow.session().chat;
    let items: Vec<ListItem> = ConversationId::ALL
        .iter()
        .enumerate()
        .map(|(i, conv)| {
            let style = if i == app.conversation_cursor {
                theme::selected()
            } else {
                theme::text()
            };
            let last = chat
                .transcript(*conv)
                .last()
                .map(|m| m.text.as_str())
                .unwrap_or("No messages yet");
            ListItem::new(vec![
                Line::from(Span::styled(format!(" {} ", conv.header()), style)),
                Line::from(Span::styled(format!("   {last}"), theme::muted())),
            ])
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(" Conversations ")
            .title_style(theme::accent_bold()),
    );
    f.render_widget(list, area);
}
