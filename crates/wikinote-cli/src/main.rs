mod app;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};
use wikinote_config::Config;
use wikinote_engine::{ParseOptions, Segment, io};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    // Determine wiki path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    let config = Config::load();

    let wiki_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        wiki_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match &config {
            Ok(Some(config)) => {
                wiki_path = config.wiki_path.clone();
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No wiki path provided and no config file found");
                eprintln!("Usage: {} <wiki-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <wiki-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [wiki-folder-path]", args[0]);
        process::exit(1);
    };

    let options = match &config {
        Ok(Some(config)) => config.parse_options(),
        Ok(None) => ParseOptions::default(),
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {e}");
            ParseOptions::default()
        }
    };

    if let Err(e) = io::validate_wiki_dir(&wiki_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Wiki path '{}'{} is invalid: {e}",
            wiki_path.display(),
            source
        );
        process::exit(1);
    }

    // First run with a folder argument: remember it so later runs need none
    if !from_config && matches!(config, Ok(None)) {
        let remembered = Config::new(wiki_path.canonicalize().unwrap_or(wiki_path.clone()));
        match remembered.save() {
            Ok(()) => log::info!("Created config file at {}", config_path.display()),
            Err(e) => log::warn!("Failed to create config file: {e}"),
        }
    }

    let mut app = App::new(wiki_path, options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_page(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_page(),
                KeyCode::Tab => app.focus_next_link(),
                KeyCode::BackTab => app.focus_previous_link(),
                KeyCode::Enter => app.follow_focused_link(),
                KeyCode::Backspace => app.back(),
                KeyCode::Char('r') => {
                    if let Err(e) = app.reload() {
                        log::error!("Reload failed: {e}");
                    }
                }
                _ => {}
            }
        }
    }
}

/// Lays segments out as lines: text verbatim, links styled, the focused
/// link highlighted.
fn content_lines<'a>(segments: &'a [Segment], focused: Option<usize>) -> Vec<Line<'a>> {
    let link_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);
    let focused_style = Style::default().bg(Color::Yellow).fg(Color::Black);

    let mut lines = vec![Line::default()];
    for (i, segment) in segments.iter().enumerate() {
        let style = match segment {
            Segment::Text { .. } => Style::default(),
            Segment::Link { .. } if focused == Some(i) => focused_style,
            Segment::Link { .. } => link_style,
        };
        for (n, part) in segment.display_text().split('\n').enumerate() {
            if n > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.push_span(Span::styled(part, style));
            }
        }
    }
    lines
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Page list panel
    let page_items: Vec<ListItem> = app
        .pages()
        .iter()
        .map(|page| ListItem::new(vec![Line::from(vec![Span::raw(page.title.clone())])]))
        .collect();

    let pages_list = List::new(page_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.wiki_name().to_string()),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(pages_list, chunks[0], &mut app.page_list_state);

    // Content panel
    let content_text = if app.current_title().is_none() {
        vec![Line::from("Select a page to view its content")]
    } else {
        content_lines(app.segments(), app.focused_link())
    };

    let content = Paragraph::new(content_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.current_title().unwrap_or("Content").to_string()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Status notice, or key help when there is nothing to report
    let bottom = match app.status() {
        Some(status) => Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("↑/k ↓/j: Pages | "),
            Span::raw("Tab/Shift-Tab: Links | "),
            Span::raw("Enter: Follow | Backspace: Back | r: Reload"),
        ]),
    };

    f.render_widget(Paragraph::new(vec![bottom]).block(Block::default()), rows[1]);
}
