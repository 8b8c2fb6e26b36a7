mod app;
mod cards;
mod config;
mod content;
mod event;
mod nav;
mod practice;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use app::App;
use event::{AppEvent, EventHandler};
use nav::{ORDER, Section};
use practice::drafts::STAR_SECTIONS;
use ui::components::flip_card::{CARD_HEIGHT, FlipCard};
use ui::components::progress_bar::ProgressBar;
use ui::components::tab_bar::TabBar;
use ui::components::timer_panel::TimerPanel;
use ui::components::toast::ToastView;
use ui::layout::{bottom_right, centered_rect};
use ui::text_area::EditResult;
use ui::theme::ThemeColors;

#[derive(Parser)]
#[command(
    name = "starcard",
    version,
    about = "Terminal STAR method flashcards and interview practice"
)]
struct Cli {
    #[arg(
        short,
        long,
        help = "Section to open (basics, components, questions, tips, examples, practice)"
    )]
    section: Option<String>,

    #[arg(short, long, help = "Theme name (dark, light, or a user theme)")]
    theme: Option<String>,

    #[arg(long, help = "Directory for drafts and session state")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logger goes to stderr before the alternate screen takes over stdout.
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    let mut app = App::new(cli.section.as_deref(), cli.theme.as_deref(), cli.data_dir)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    // Whatever is still inside the debounce window gets one last save.
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Pending clear confirmation swallows everything else.
    if app.confirm_clear {
        match key.code {
            KeyCode::Char('y') => {
                app.clear_current_draft();
                app.confirm_clear = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_clear = false,
            _ => {}
        }
        return;
    }

    // While a field is being edited every key belongs to it, including the
    // arrows, which move the cursor instead of switching sections.
    if app.navigator.current() == Section::Practice && app.practice.editing {
        handle_edit_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Right | KeyCode::Down => {
            app.step(1);
            return;
        }
        KeyCode::Left | KeyCode::Up => {
            app.step(-1);
            return;
        }
        KeyCode::Char(ch @ '1'..='6') => {
            let index = ch as usize - '1' as usize;
            app.go_to(ORDER[index].id());
            return;
        }
        _ => {}
    }

    match app.navigator.current() {
        Section::Practice => handle_practice_key(app, key),
        _ => handle_cards_key(app, key),
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    let field = app.practice.focused_field_mut();
    let before = field.area.value().to_string();

    if field.area.handle(key) == EditResult::Done {
        app.practice.editing = false;
        return;
    }
    // Only actual modifications queue an autosave; cursor moves do not.
    if app.practice.focused_field().area.value() != before {
        app.practice.record_focused(now);
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    match key.code {
        KeyCode::Tab => app.practice.focus_next_field(),
        KeyCode::BackTab => app.practice.focus_prev_field(),
        KeyCode::Enter => app.practice.editing = true,
        KeyCode::Char('n') | KeyCode::Char(']') => app.practice.next_question(),
        KeyCode::Char('p') | KeyCode::Char('[') => app.practice.prev_question(),
        KeyCode::Char('s') => app.practice.timer.toggle(now),
        KeyCode::Char('r') => app.practice.timer.reset(),
        KeyCode::Char('x') => app.export_current_answer(),
        KeyCode::Char('d') => app.confirm_clear = true,
        _ => {}
    }
}

fn handle_cards_key(app: &mut App, key: KeyEvent) {
    let len = app.current_card_count();
    if len == 0 {
        return;
    }

    match key.code {
        KeyCode::Tab => {
            if let Some(view) = app.current_card_view_mut() {
                view.focus_next(len);
                let focused = view.focused;
                app.navigator.scroll = focused.saturating_sub(1) as u16;
            }
        }
        KeyCode::BackTab => {
            if let Some(view) = app.current_card_view_mut() {
                view.focus_prev(len);
                let focused = view.focused;
                app.navigator.scroll = focused.saturating_sub(1) as u16;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(view) = app.current_card_view_mut() {
                view.flip_focused();
            }
        }
        KeyCode::Char('a') => {
            if let Some(view) = app.current_card_view_mut() {
                view.flip_all(len);
            }
        }
        KeyCode::PageDown => app.navigator.scroll_down(1),
        KeyCode::PageUp => app.navigator.scroll_up(1),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, layout[0]);
    frame.render_widget(TabBar::new(app.navigator.current(), app.theme), layout[1]);
    frame.render_widget(
        ProgressBar::new(app.navigator.index() + 1, ORDER.len(), app.theme),
        layout[2],
    );

    match app.navigator.current() {
        Section::Practice => render_practice(frame, app, layout[3]),
        section => render_cards(frame, app, section, layout[3]),
    }

    render_footer(frame, app, layout[4]);

    if app.confirm_clear {
        render_confirm(frame, app, area);
    }

    if let Some(ref toast) = app.toast {
        let view = ToastView::new(&toast.message, toast.kind, app.theme);
        let rect = bottom_right(view.desired_width(), 3, area);
        frame.render_widget(view, rect);
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " starcard ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " STAR method flashcards",
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_cards(frame: &mut ratatui::Frame, app: &App, section: Section, area: Rect) {
    let colors = &app.theme.colors;
    let Some(set) = app.deck.cards(section) else {
        return;
    };
    let Some(view) = app.cards.get(&section) else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", set.title),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}  ({} of {})", set.intro, view.focused + 1, set.cards.len()),
            Style::default().fg(colors.text_muted()),
        )),
    ]);
    frame.render_widget(title, layout[0]);

    let offset = (app.navigator.scroll as usize).min(set.cards.len().saturating_sub(1));
    let mut y = layout[1].y;
    for (i, card) in set.cards.iter().enumerate().skip(offset) {
        if y + CARD_HEIGHT > layout[1].y + layout[1].height {
            break;
        }
        let rect = Rect {
            x: layout[1].x + 1,
            y,
            width: layout[1].width.saturating_sub(2),
            height: CARD_HEIGHT,
        };
        frame.render_widget(
            FlipCard::new(card, view.is_flipped(i), i == view.focused, app.theme),
            rect,
        );
        y += CARD_HEIGHT;
    }
}

fn render_practice(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let session = &app.practice;
    let question = session.current_question();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(area);

    // Left column: question prompt plus the four answer fields.
    let mut rows = vec![Constraint::Length(3)];
    rows.extend(STAR_SECTIONS.iter().map(|_| Constraint::Ratio(1, 4)));
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(columns[0]);

    let prompt = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(
                " Question {} of {}",
                session.question_idx + 1,
                session.questions().len()
            ),
            Style::default().fg(colors.text_muted()),
        )),
        Line::from(Span::styled(
            format!(" {}", question.prompt),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", question.hint),
            Style::default().fg(colors.text_muted()),
        )),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(prompt, left[0]);

    let now = Instant::now();
    for (i, field) in session.current_fields().iter().enumerate() {
        let focused = i == session.field_focus;
        let editing = focused && session.editing;
        render_field(frame, app, field, focused, editing, now, left[i + 1]);
    }

    // Right column: timer and question-switch hints.
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(columns[1]);

    frame.render_widget(TimerPanel::new(&session.timer, app.theme), right[0]);

    let help = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            " [n]/[p] switch question",
            Style::default().fg(colors.text_muted()),
        )),
        Line::from(Span::styled(
            " [x] copy answer",
            Style::default().fg(colors.text_muted()),
        )),
        Line::from(Span::styled(
            " [d] clear draft",
            Style::default().fg(colors.text_muted()),
        )),
        Line::from(Span::styled(
            " answers autosave",
            Style::default().fg(colors.text_muted()),
        )),
    ]);
    frame.render_widget(help, right[1]);
}

fn render_field(
    frame: &mut ratatui::Frame,
    app: &App,
    field: &practice::session::Field,
    focused: bool,
    editing: bool,
    now: Instant,
    area: Rect,
) {
    let colors = &app.theme.colors;

    let count = field.area.char_count();
    let count_color = if count > 500 {
        colors.warning()
    } else if count > 200 {
        colors.success()
    } else {
        colors.text_muted()
    };

    let mut title = vec![
        Span::styled(
            format!(" {} ", field.key.section.to_uppercase()),
            Style::default()
                .fg(if focused { colors.accent() } else { colors.fg() })
                .add_modifier(if focused {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        ),
        Span::styled(
            format!("{count} characters "),
            Style::default().fg(count_color),
        ),
    ];
    if app.practice.saved_visible(field, now) {
        title.push(Span::styled(
            "saved ",
            Style::default().fg(colors.success()),
        ));
    }

    let border = if editing {
        Style::default().fg(colors.accent())
    } else if focused {
        Style::default().fg(colors.border_focused())
    } else {
        Style::default().fg(colors.border())
    };

    let block = Block::bordered().title(Line::from(title)).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if editing {
        let cursor = field.area.cursor_line_col();
        let lines = field_lines(field.area.value(), Some(cursor), colors);
        frame.render_widget(Paragraph::new(lines), inner);
    } else if field.area.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "press Enter to write...",
                Style::default().fg(colors.text_muted()),
            )),
            inner,
        );
    } else {
        let lines = field_lines(field.area.value(), None, colors);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

/// Build display lines for a field, painting a cursor cell when editing.
fn field_lines(text: &str, cursor: Option<(usize, usize)>, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        match cursor {
            Some((cursor_line, col)) if cursor_line == i => {
                let chars: Vec<char> = line.chars().collect();
                let col = col.min(chars.len());
                let before: String = chars[..col].iter().collect();
                let (at, after): (String, String) = if col < chars.len() {
                    (chars[col].to_string(), chars[col + 1..].iter().collect())
                } else {
                    (" ".to_string(), String::new())
                };
                out.push(Line::from(vec![
                    Span::styled(before, Style::default().fg(colors.fg())),
                    Span::styled(at, Style::default().fg(colors.bg()).bg(colors.accent())),
                    Span::styled(after, Style::default().fg(colors.fg())),
                ]));
            }
            _ => out.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.fg()),
            ))),
        }
    }
    out
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let hints = if app.navigator.current() == Section::Practice {
        if app.practice.editing {
            " [Esc] Done editing (autosaves as you type)"
        } else {
            " [Tab] Field  [Enter] Edit  [s] Timer  [1-6] Sections  [t] Theme  [q] Quit"
        }
    } else {
        " [Tab] Card  [Enter] Flip  [a] Flip all  [1-6] Sections  [t] Theme  [q] Quit"
    };

    let prev_style = if app.navigator.prev_enabled() {
        Style::default().fg(colors.fg())
    } else {
        Style::default().fg(colors.text_muted())
    };
    let next_style = if app.navigator.next_enabled() {
        Style::default().fg(colors.fg())
    } else {
        Style::default()
            .fg(colors.success())
            .add_modifier(Modifier::BOLD)
    };
    let nav = vec![
        Span::styled("[<-] Prev ", prev_style),
        Span::styled(format!("[->] {} ", app.navigator.next_label()), next_style),
    ];

    let nav_width: usize = nav.iter().map(|s| s.content.chars().count()).sum();
    let pad = (area.width as usize).saturating_sub(hints.chars().count() + nav_width);

    let mut spans = vec![Span::styled(hints, Style::default().fg(colors.text_muted()))];
    spans.push(Span::raw(" ".repeat(pad)));
    spans.extend(nav);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_confirm(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let rect = centered_rect(40, 20, area);

    let block = Block::bordered()
        .title(" Clear draft ")
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.card_bg()));
    let inner = block.inner(rect);
    frame.render_widget(ratatui::widgets::Clear, rect);
    block.render(rect, frame.buffer_mut());

    let question = app.practice.current_question();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Erase all four parts for \"{}\"?", question.id),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] clear   [n] keep",
            Style::default().fg(colors.text_muted()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        inner,
    );
}
