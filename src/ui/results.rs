use crate::session::QuizSession;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::capitalize_first;
use crate::vocab::Field;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_results(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_screen_chunks(f.area());

    let title = Paragraph::new("Quiz Complete")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let summary = session.final_summary();
    let mut content = Text::default();
    content.push_line(
        Line::from(Span::styled(
            format!(
                "You scored {} / {} ({}%)",
                summary.score, summary.total, summary.percentage
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );
    content.push_line(Line::from(""));

    if session.answered.is_empty() {
        content.push_line(
            Line::from("No questions answered this round.").alignment(Alignment::Center),
        );
    } else {
        content.push_line(Line::from("Answers:"));
        content.push_line(Line::from(""));
        for record in &session.answered {
            let prompt = record.entry.field(record.mode.prompt_field());
            let prompt = if record.mode.prompt_field() == Field::English {
                capitalize_first(prompt)
            } else {
                prompt.to_string()
            };
            if record.was_correct {
                content.push_line(Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(Color::Green)),
                    Span::from(format!("{} → {}", prompt, display_answer(record))),
                ]));
            } else {
                content.push_line(Line::from(vec![
                    Span::styled("✗ ", Style::default().fg(Color::Red)),
                    Span::from(format!(
                        "{} → you chose {}, correct was {}",
                        prompt,
                        display_selected(record),
                        display_answer(record)
                    )),
                ]));
            }
        }
    }

    let body = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Space",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Try Again  "),
        Span::styled(
            "v",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Review Vocabulary  "),
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Mode  "),
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

fn display_answer(record: &crate::models::AnswerRecord) -> String {
    display_value(&record.correct, record.mode)
}

fn display_selected(record: &crate::models::AnswerRecord) -> String {
    display_value(&record.selected, record.mode)
}

fn display_value(value: &str, mode: crate::models::QuizMode) -> String {
    if mode.answer_field() == Field::English {
        capitalize_first(value)
    } else {
        value.to_string()
    }
}
