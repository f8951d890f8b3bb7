//! Dashboard state and widgets.
//!
//! The screen has three parts. A header shows the phase, build info and a
//! gauge. A snapshot panel lists what each map file yielded next to the
//! render dataset derived from it. The activity log sits at the bottom.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};
use ratatui::Frame;
use std::collections::VecDeque;

use super::{Phase, Progress, RunStat, Ui};
use crate::pipeline::RenderCounts;

const LOG_CAPACITY: usize = 200;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Blue))
}

/// Parse result of one source file
#[derive(Debug, Clone, PartialEq)]
struct SourceRow {
    file: &'static str,
    records: usize,
    skipped: u64,
}

/// Everything the dashboard shows, independent of the terminal
#[derive(Default)]
pub struct Dashboard {
    phase: Phase,
    info: String,
    progress: Option<Progress>,
    sources: Vec<SourceRow>,
    render: Option<RenderCounts>,
    log: VecDeque<String>,
}

impl Dashboard {
    pub fn render(&self, frame: &mut Frame) {
        let [header, snapshot, log] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(3),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        self.render_snapshot(frame, snapshot);
        self.render_log(frame, log);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" EVE SDE Render Builder ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status_area, gauge_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let (glyph, color) = match self.phase {
            Phase::Checking => ("◐", Color::Cyan),
            Phase::Downloading => ("↓", Color::Cyan),
            Phase::Extracting => ("⤷", Color::Cyan),
            Phase::Parsing => ("≡", Color::Yellow),
            Phase::Deriving => ("⚙", Color::Yellow),
            Phase::Writing => ("⇩", Color::Magenta),
            Phase::Complete => ("✓", Color::Green),
        };
        let phase_style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let status = Line::from(vec![
            Span::styled(format!(" {} {}", glyph, self.phase), phase_style),
            Span::styled(format!("  {}", self.info), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(status), status_area);

        if let Some(progress) = &self.progress {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
                .ratio(progress.ratio())
                .label(progress.to_string());
            frame.render_widget(gauge, gauge_area);
        }
    }

    fn render_snapshot(&self, frame: &mut Frame, area: Rect) {
        let [sources_area, render_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);

        let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let sources = Table::new(
            self.sources.iter().map(|row| {
                let skipped_style = if row.skipped > 0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Row::new(vec![
                    Cell::from(row.file),
                    Cell::from(row.records.to_string()),
                    Cell::from(row.skipped.to_string()).style(skipped_style),
                ])
            }),
            [Constraint::Min(24), Constraint::Length(9), Constraint::Length(8)],
        )
        .header(Row::new(vec!["File", "Records", "Skipped"]).style(heading))
        .block(panel(" Sources "));
        frame.render_widget(sources, sources_area);

        let rows: Vec<Row> = self
            .render_rows()
            .into_iter()
            .map(|(label, count)| Row::new(vec![Cell::from(label), Cell::from(count)]))
            .collect();
        let render = Table::new(rows, [Constraint::Min(20), Constraint::Length(9)])
            .header(Row::new(vec!["Render", "Count"]).style(heading))
            .block(panel(" Render snapshot "));
        frame.render_widget(render, render_area);
    }

    fn render_rows(&self) -> Vec<(&'static str, String)> {
        let Some(counts) = &self.render else {
            return vec![("pending", String::new())];
        };

        vec![
            ("Solar systems", counts.solar_systems.to_string()),
            ("Constellations", counts.constellations.to_string()),
            ("Regions", counts.regions.to_string()),
            ("Regular gates", counts.stargate_links.regular.to_string()),
            ("Constellation gates", counts.stargate_links.constellation.to_string()),
            ("Regional gates", counts.stargate_links.regional.to_string()),
            ("Constellation links", counts.constellation_links.to_string()),
        ]
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);
        let last = self.log.len().saturating_sub(1);

        let lines: Vec<Line> = self
            .log
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, entry)| {
                let color = if i == last { Color::White } else { Color::DarkGray };
                Line::styled(format!(" {}", entry), Style::default().fg(color))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(panel(" Activity ")), area);
    }
}

impl Ui for Dashboard {
    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.progress = Some(Progress::new(current, total, label));
    }

    fn clear_progress(&mut self) {
        self.progress = None;
    }

    fn log(&mut self, message: impl Into<String>) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(message.into());
    }

    fn report(&mut self, stat: RunStat) {
        match stat {
            RunStat::Parsed {
                file,
                records,
                skipped,
            } => {
                let row = SourceRow {
                    file,
                    records,
                    skipped,
                };
                match self.sources.iter_mut().find(|r| r.file == file) {
                    Some(existing) => *existing = row,
                    None => self.sources.push(row),
                }
            }
            RunStat::Derived(counts) => self.render = Some(counts),
        }
    }
}
