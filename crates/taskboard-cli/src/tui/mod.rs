use std::{io, time::Duration};

use color_eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};
use taskboard_core::{
    query::TaskQuery,
    repository::{BoardView, TaskRepository},
    stats::Stats,
    tasks::{is_overdue, Priority, Task, TaskStatus},
};

/// Interactive board: `j`/`k` move, `space` advances, `x` deletes.
/// Press `q` or `Esc` to exit.
pub async fn launch<R: TaskRepository>(repo: &R) -> Result<()> {
    // Guard restores the terminal even if we early-return.
    let _guard = TerminalGuard::enter()?;
    let mut terminal = _guard.terminal()?;
    let mut view = load_view(repo).await?;
    let mut selection = ListState::default();
    selection.select((!view.tasks.is_empty()).then_some(0));
    let mut notice = String::new();

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            frame.render_widget(stats_bar(&view.stats), chunks[0]);

            let items: Vec<ListItem> = view.tasks.iter().map(task_item).collect();
            let body = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Tasks ({})", view.tasks.len())),
                )
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(body, chunks[1], &mut selection);

            let footer = Paragraph::new(Line::from(vec![
                Span::styled("j/k", Style::default().fg(Color::Cyan)),
                Span::raw(" move  "),
                Span::styled("space", Style::default().fg(Color::Cyan)),
                Span::raw(" next status  "),
                Span::styled("x", Style::default().fg(Color::Cyan)),
                Span::raw(" delete  "),
                Span::styled("q", Style::default().fg(Color::Cyan)),
                Span::raw(" quit  "),
                Span::styled(notice.as_str(), Style::default().fg(Color::Yellow)),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Controls"));
            frame.render_widget(footer, chunks[2]);
        })?;

        if !event::poll(Duration::from_millis(150))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let selected = selection
            .selected()
            .and_then(|i| view.tasks.get(i))
            .map(|t| t.id);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('j') | KeyCode::Down => selection.select_next(),
            KeyCode::Char('k') | KeyCode::Up => selection.select_previous(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = selected {
                    notice = match repo.advance(id).await {
                        Ok(task) => format!("#{} -> {}", task.id, task.status),
                        Err(err) => err.to_string(),
                    };
                    view = load_view(repo).await?;
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = selected {
                    notice = match repo.delete(id).await {
                        Ok(_) => format!("#{id} deleted"),
                        Err(err) => err.to_string(),
                    };
                    view = load_view(repo).await?;
                    clamp_selection(&mut selection, view.tasks.len());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

async fn load_view<R: TaskRepository>(repo: &R) -> Result<BoardView> {
    repo.view(&TaskQuery::default())
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))
}

fn clamp_selection(selection: &mut ListState, len: usize) {
    match (selection.selected(), len) {
        (_, 0) => selection.select(None),
        (Some(i), len) if i >= len => selection.select(Some(len - 1)),
        _ => {}
    }
}

fn stats_bar(stats: &Stats) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Total {}", stats.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Done {} ({}%)", stats.done, stats.percent_done),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Overdue {}", stats.overdue),
            Style::default().fg(Color::Red),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                "Taskboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
    )
}

fn task_item(task: &Task) -> ListItem<'_> {
    let overdue = is_overdue(task);
    let mut line = vec![
        Span::raw(format!("{:>4} ", task.id)),
        Span::styled(
            status_label(task.status),
            Style::default()
                .fg(status_color(task.status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            priority_label(task.priority),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw(" "),
        Span::styled(&task.title, Style::default().add_modifier(Modifier::BOLD)),
    ];
    if !task.description.is_empty() {
        line.push(Span::raw(format!(" - {}", task.description)));
    }
    if !task.due_date.is_empty() {
        line.push(Span::raw(format!("  due {}", task.due_date)));
    }
    if overdue {
        line.push(Span::styled(
            "  overdue",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let item = ListItem::new(Line::from(line));
    if overdue {
        item.style(Style::default().fg(Color::LightRed))
    } else {
        item
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[todo]",
        TaskStatus::InProgress => "[doing]",
        TaskStatus::Done => "[done]",
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Gray,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Done => Color::Green,
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low ",
        Priority::Medium => "med ",
        Priority::High => "HIGH",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::DarkGray,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // Alternate screen keeps the shell buffer clean.
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }

    fn terminal(&self) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Terminal::new(backend)?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors can't propagate out of Drop; report and move on.
        if let Err(err) = disable_raw_mode() {
            eprintln!("failed to disable raw mode: {err}");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            eprintln!("failed to restore terminal: {err}");
        }
    }
}
