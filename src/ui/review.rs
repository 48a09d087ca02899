use crate::session::QuizSession;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::{capitalize_first, pad_to_width};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

const KANJI_COL: usize = 10;
const HIRAGANA_COL: usize = 14;
const ROMAJI_COL: usize = 14;

pub fn draw_review(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_screen_chunks(f.area());

    let title = Paragraph::new("Days of the Week")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut content = Text::default();
    content.push_line(Line::from(Span::styled(
        format!(
            "{}{}{}{}",
            pad_to_width("Kanji", KANJI_COL),
            pad_to_width("Hiragana", HIRAGANA_COL),
            pad_to_width("Rōmaji", ROMAJI_COL),
            "English"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    content.push_line(Line::from(""));

    for entry in session.review_entries() {
        content.push_line(Line::from(format!(
            "{}{}{}{}",
            pad_to_width(entry.kanji, KANJI_COL),
            pad_to_width(entry.hiragana, HIRAGANA_COL),
            pad_to_width(entry.romaji, ROMAJI_COL),
            capitalize_first(entry.english)
        )));
    }

    let body = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back  "),
        Span::styled(
            "Space",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" New Quiz  "),
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
