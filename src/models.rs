use crate::utils::capitalize_first;
use crate::vocab::{Field, VocabEntry};

/// Which form is shown as the prompt and which form the options are drawn
/// from. Changing the mode always starts a fresh quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    KanjiToEnglish,
    EnglishToKanji,
    KanjiToHiragana,
    HiraganaToKanji,
}

impl QuizMode {
    pub fn prompt_field(&self) -> Field {
        match self {
            QuizMode::KanjiToEnglish | QuizMode::KanjiToHiragana => Field::Kanji,
            QuizMode::EnglishToKanji => Field::English,
            QuizMode::HiraganaToKanji => Field::Hiragana,
        }
    }

    pub fn answer_field(&self) -> Field {
        match self {
            QuizMode::KanjiToEnglish => Field::English,
            QuizMode::EnglishToKanji | QuizMode::HiraganaToKanji => Field::Kanji,
            QuizMode::KanjiToHiragana => Field::Hiragana,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuizMode::KanjiToEnglish => "Kanji → English",
            QuizMode::EnglishToKanji => "English → Kanji",
            QuizMode::KanjiToHiragana => "Kanji → Hiragana",
            QuizMode::HiraganaToKanji => "Hiragana → Kanji",
        }
    }

    /// Mode cycle order for the Tab key.
    pub fn next(&self) -> QuizMode {
        match self {
            QuizMode::KanjiToEnglish => QuizMode::EnglishToKanji,
            QuizMode::EnglishToKanji => QuizMode::KanjiToHiragana,
            QuizMode::KanjiToHiragana => QuizMode::HiraganaToKanji,
            QuizMode::HiraganaToKanji => QuizMode::KanjiToEnglish,
        }
    }

    /// Pronunciation does not help with character recognition, so the two
    /// kanji↔hiragana modes never speak regardless of the user toggle.
    pub fn speech_applicable(&self) -> bool {
        matches!(self, QuizMode::KanjiToEnglish | QuizMode::EnglishToKanji)
    }
}

/// Prompt text for the current question as the UI should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub display_text: String,
    pub hint_text: String,
}

impl Prompt {
    pub fn for_entry(entry: &VocabEntry, mode: QuizMode) -> Prompt {
        match mode {
            QuizMode::KanjiToEnglish => Prompt {
                display_text: entry.kanji.to_string(),
                hint_text: format!("What day is this in English? ({})", entry.romaji),
            },
            QuizMode::EnglishToKanji => Prompt {
                display_text: capitalize_first(entry.english),
                hint_text: "What day is this in Japanese (Kanji)?".to_string(),
            },
            QuizMode::KanjiToHiragana => Prompt {
                display_text: entry.kanji.to_string(),
                hint_text: "What is the hiragana reading for this kanji?".to_string(),
            },
            QuizMode::HiraganaToKanji => Prompt {
                display_text: entry.hiragana.to_string(),
                hint_text: "What is the kanji for this hiragana reading?".to_string(),
            },
        }
    }
}

/// One answered question, kept for the results screen.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub entry: VocabEntry,
    pub selected: String,
    pub correct: String,
    pub was_correct: bool,
    pub mode: QuizMode,
}

/// Where the current question stands. Skips reveal the answer without
/// recording anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    Waiting,
    Answered { selected: usize, was_correct: bool },
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Finished,
}

#[derive(Debug, Clone)]
pub struct FinalSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Quiz,
    Results,
    Review,
}
