pub mod audio;
pub mod logger;
pub mod models;
pub mod options;
pub mod session;
pub mod ui;
pub mod utils;
pub mod vocab;


// Re-exports for convenience
pub use audio::{CommandSpeech, NullSound, NullSpeech, SoundEffects, Speech, TerminalBell};
pub use models::{
    AnswerRecord, AppState, FinalSummary, Prompt, QuestionPhase, QuizMode, SessionState,
};
pub use options::{OPTION_COUNT, generate_options};
pub use session::{
    ANSWER_ADVANCE_DELAY, QuizSession, SKIP_ADVANCE_DELAY, handle_quiz_input,
};
pub use ui::{draw_quiz, draw_results, draw_review};
pub use vocab::{DAYS_OF_WEEK, Field, VocabEntry};
