use crate::models::{QuestionPhase, QuizMode};
use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::capitalize_first;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn display_option(option: &str, mode: QuizMode) -> String {
    use crate::vocab::Field;
    if mode.answer_field() == Field::English {
        capitalize_first(option)
    } else {
        option.to_string()
    }
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());

    let (number, total) = session.progress();
    let tts = if session.speech_effectively_disabled() {
        "TTS off"
    } else {
        "TTS on"
    };
    let header_text = format!(
        "Score: {}   Question {} / {}   {}   {}",
        session.score,
        number,
        total,
        session.mode.label(),
        tts
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let prompt = session.current_prompt();
    let mut question_text = Text::default();
    question_text.push_line(Line::from(""));
    question_text.push_line(
        Line::from(Span::styled(
            prompt.display_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );
    question_text.push_line(Line::from(""));
    question_text.push_line(
        Line::from(Span::styled(
            prompt.hint_text,
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    );

    let correct = session.correct_answer();
    match session.phase {
        QuestionPhase::Waiting => {}
        QuestionPhase::Answered { was_correct, .. } => {
            question_text.push_line(Line::from(""));
            let feedback = if was_correct {
                Span::styled(
                    "Correct!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!(
                        "Incorrect. The answer is {}",
                        display_option(correct, session.mode)
                    ),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            };
            question_text.push_line(Line::from(feedback).alignment(Alignment::Center));
        }
        QuestionPhase::Revealed => {
            question_text.push_line(Line::from(""));
            question_text.push_line(
                Line::from(Span::styled(
                    format!(
                        "Skipped. The answer is {}",
                        display_option(correct, session.mode)
                    ),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
        }
    }

    let question = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let mut option_lines = Vec::new();
    for (i, option) in session.current_options().iter().enumerate() {
        let is_correct = option == correct;
        let style = match session.phase {
            QuestionPhase::Waiting => Style::default(),
            QuestionPhase::Answered { selected, .. } => {
                if is_correct {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if selected == i {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            }
            QuestionPhase::Revealed => {
                if is_correct {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            }
        };
        option_lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, display_option(option, session.mode)),
            style,
        )));
    }
    let options = Paragraph::new(option_lines)
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "1-4",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Answer  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Skip  "),
        Span::styled(
            "Space",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" New Quiz  "),
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Mode  "),
        Span::styled(
            "t",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Speech  "),
        Span::styled(
            "s",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Speak  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
