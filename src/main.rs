use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use youbi_quiz::audio::{CommandSpeech, NullSpeech, Speech, TerminalBell};
use youbi_quiz::logger;
use youbi_quiz::models::{AppState, QuizMode, SessionState};
use youbi_quiz::session::{QuizSession, handle_quiz_input};
use youbi_quiz::ui::{draw_quiz, draw_results, draw_review};

/// Poll timeout when no auto-advance is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    if std::env::args().any(|arg| arg == "--debug") {
        logger::init();
    }

    let speech: Box<dyn Speech> = match CommandSpeech::detect() {
        Some(speech) => Box::new(speech),
        None => {
            logger::warn("no speech synthesizer on PATH, speech disabled");
            Box::new(NullSpeech)
        }
    };
    let mut session = QuizSession::new(QuizMode::KanjiToEnglish, Box::new(TerminalBell), speech);
    let mut app_state = AppState::Quiz;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Quiz => draw_quiz(f, &session),
            AppState::Results => draw_results(f, &session),
            AppState::Review => draw_review(f, &session),
        })?;

        // Wake up in time for a pending auto-advance.
        let timeout = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q')
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL))
                {
                    break;
                }
                match app_state {
                    AppState::Quiz => handle_quiz_input(&mut session, key),
                    AppState::Results => match key.code {
                        KeyCode::Char(' ') => {
                            session.new_quiz(session.mode);
                            app_state = AppState::Quiz;
                        }
                        KeyCode::Tab => {
                            session.set_mode(session.mode.next());
                            app_state = AppState::Quiz;
                        }
                        KeyCode::Char('v') => {
                            app_state = AppState::Review;
                        }
                        _ => {}
                    },
                    AppState::Review => match key.code {
                        KeyCode::Esc | KeyCode::Char('b') => {
                            app_state = AppState::Results;
                        }
                        KeyCode::Char(' ') => {
                            session.new_quiz(session.mode);
                            app_state = AppState::Quiz;
                        }
                        _ => {}
                    },
                }
            }
        }

        session.tick(Instant::now());
        if app_state == AppState::Quiz && session.state == SessionState::Finished {
            app_state = AppState::Results;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
