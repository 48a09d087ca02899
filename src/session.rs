use crate::audio::{NullSound, NullSpeech, SoundEffects, Speech};
use crate::logger;
use crate::models::{
    AnswerRecord, FinalSummary, Prompt, QuestionPhase, QuizMode, SessionState,
};
use crate::options::{OPTION_COUNT, generate_options};
use crate::vocab::{DAYS_OF_WEEK, VocabEntry, field_values};
use crossterm::event::{KeyCode, KeyEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

pub const ANSWER_ADVANCE_DELAY: Duration = Duration::from_millis(900);
pub const SKIP_ADVANCE_DELAY: Duration = Duration::from_millis(1200);

/// A scheduled automatic advance. The token ties it to the scheduling
/// generation; any cancelling transition bumps the generation so a stale
/// deadline cannot fire against a replaced session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub due: Instant,
    token: u64,
}

pub struct QuizSession {
    pub order: Vec<VocabEntry>,
    pub current_index: usize,
    pub score: usize,
    pub answered: Vec<AnswerRecord>,
    pub mode: QuizMode,
    pub state: SessionState,
    pub phase: QuestionPhase,
    pub options: Vec<String>,
    pub tts_enabled: bool,
    pending_advance: Option<PendingAdvance>,
    advance_generation: u64,
    rng: StdRng,
    sound: Box<dyn SoundEffects>,
    speech: Box<dyn Speech>,
}

impl QuizSession {
    pub fn new(mode: QuizMode, sound: Box<dyn SoundEffects>, speech: Box<dyn Speech>) -> Self {
        Self::with_rng(mode, StdRng::from_entropy(), sound, speech)
    }

    /// Deterministic session with null capabilities, for tests.
    pub fn seeded(mode: QuizMode, seed: u64) -> Self {
        Self::with_rng(
            mode,
            StdRng::seed_from_u64(seed),
            Box::new(NullSound),
            Box::new(NullSpeech),
        )
    }

    pub fn with_rng(
        mode: QuizMode,
        rng: StdRng,
        sound: Box<dyn SoundEffects>,
        speech: Box<dyn Speech>,
    ) -> Self {
        let mut session = QuizSession {
            order: Vec::new(),
            current_index: 0,
            score: 0,
            answered: Vec::new(),
            mode,
            state: SessionState::InProgress,
            phase: QuestionPhase::Waiting,
            options: Vec::new(),
            tts_enabled: true,
            pending_advance: None,
            advance_generation: 0,
            rng,
            sound,
            speech,
        };
        session.new_quiz(mode);
        session
    }

    /// Reshuffle the full table and reset all progress. Cancels any pending
    /// auto-advance so a timer from the old run cannot touch the new one.
    pub fn new_quiz(&mut self, mode: QuizMode) {
        self.cancel_pending_advance();
        self.speech.stop();
        self.mode = mode;
        self.order = DAYS_OF_WEEK.to_vec();
        self.order.shuffle(&mut self.rng);
        self.current_index = 0;
        self.score = 0;
        self.answered.clear();
        self.state = SessionState::InProgress;
        self.load_question();
    }

    /// Mode changes always restart the quiz.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.new_quiz(mode);
    }

    fn load_question(&mut self) {
        self.phase = QuestionPhase::Waiting;
        let correct = self.current_entry().field(self.mode.answer_field());
        let pool = field_values(self.mode.answer_field());
        self.options = generate_options(&pool, correct, OPTION_COUNT, &mut self.rng);
        self.speak_current();
    }

    /// Answer the current question. A no-op once the question is answered
    /// or skipped, or after the quiz has finished.
    pub fn submit_answer(&mut self, option_index: usize) {
        if self.state != SessionState::InProgress
            || !matches!(self.phase, QuestionPhase::Waiting)
        {
            return;
        }
        let Some(selected) = self.options.get(option_index).cloned() else {
            return;
        };

        let correct = self
            .current_entry()
            .field(self.mode.answer_field())
            .to_string();
        let was_correct = selected == correct;

        self.answered.push(AnswerRecord {
            entry: self.current_entry().clone(),
            selected,
            correct,
            was_correct,
            mode: self.mode,
        });
        if was_correct {
            self.score += 1;
            self.sound.play_correct();
        } else {
            self.sound.play_incorrect();
        }
        self.phase = QuestionPhase::Answered {
            selected: option_index,
            was_correct,
        };
        self.schedule_advance(ANSWER_ADVANCE_DELAY);
    }

    /// Reveal the answer without scoring or logging, then advance after the
    /// reveal delay.
    pub fn skip(&mut self) {
        if self.state != SessionState::InProgress
            || !matches!(self.phase, QuestionPhase::Waiting)
        {
            return;
        }
        self.phase = QuestionPhase::Revealed;
        self.schedule_advance(SKIP_ADVANCE_DELAY);
    }

    pub fn advance(&mut self) {
        self.cancel_pending_advance();
        if self.state != SessionState::InProgress {
            return;
        }
        self.current_index += 1;
        if self.current_index >= self.order.len() {
            self.state = SessionState::Finished;
            self.speech.stop();
            logger::log(&format!(
                "quiz finished: {} / {}",
                self.score,
                self.order.len()
            ));
        } else {
            self.load_question();
        }
    }

    pub fn toggle_tts(&mut self) {
        self.tts_enabled = !self.tts_enabled;
    }

    /// Speech is off when the user disabled it, when the mode is character
    /// recognition, or when no synthesizer is available.
    pub fn speech_effectively_disabled(&self) -> bool {
        !self.tts_enabled || !self.mode.speech_applicable() || !self.speech.is_supported()
    }

    pub fn speak_current(&self) {
        if self.speech_effectively_disabled() || self.state != SessionState::InProgress {
            return;
        }
        let entry = self.current_entry();
        match self.mode {
            QuizMode::KanjiToEnglish => self.speech.speak_japanese(entry.kanji),
            QuizMode::EnglishToKanji => self.speech.speak_english(entry.english),
            QuizMode::KanjiToHiragana | QuizMode::HiraganaToKanji => {}
        }
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.advance_generation += 1;
        self.pending_advance = Some(PendingAdvance {
            due: Instant::now() + delay,
            token: self.advance_generation,
        });
    }

    pub fn cancel_pending_advance(&mut self) {
        self.advance_generation += 1;
        self.pending_advance = None;
    }

    /// Deadline the event loop should wake up for, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_advance.map(|pending| pending.due)
    }

    /// Fire a due auto-advance. Returns true when the session advanced.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_advance else {
            return false;
        };
        if pending.token != self.advance_generation || now < pending.due {
            return false;
        }
        self.pending_advance = None;
        self.advance();
        true
    }

    pub fn current_entry(&self) -> &VocabEntry {
        &self.order[self.current_index.min(self.order.len() - 1)]
    }

    pub fn current_prompt(&self) -> Prompt {
        Prompt::for_entry(self.current_entry(), self.mode)
    }

    pub fn current_options(&self) -> &[String] {
        &self.options
    }

    /// The string the current question expects.
    pub fn correct_answer(&self) -> &'static str {
        self.current_entry().field(self.mode.answer_field())
    }

    /// 1-based question number and total, clamped at the end.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.order.len();
        ((self.current_index + 1).min(total), total)
    }

    pub fn final_summary(&self) -> FinalSummary {
        let total = self.order.len();
        let percentage = ((self.score as f64 / total as f64) * 100.0).round() as u32;
        FinalSummary {
            score: self.score,
            total,
            percentage,
        }
    }

    pub fn review_entries(&self) -> &'static [VocabEntry] {
        &DAYS_OF_WEEK
    }
}

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '1'..='4') => {
            session.submit_answer(c as usize - '1' as usize);
        }
        KeyCode::Enter => session.skip(),
        KeyCode::Char(' ') => session.new_quiz(session.mode),
        KeyCode::Tab => session.set_mode(session.mode.next()),
        KeyCode::Char('t') => session.toggle_tts(),
        KeyCode::Char('s') => session.speak_current(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppState;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn seeded(seed: u64) -> QuizSession {
        QuizSession::seeded(QuizMode::KanjiToEnglish, seed)
    }

    fn correct_index(session: &QuizSession) -> usize {
        let correct = session.correct_answer();
        session
            .options
            .iter()
            .position(|option| option == correct)
            .expect("options must contain the correct answer")
    }

    fn wrong_index(session: &QuizSession) -> usize {
        let correct = session.correct_answer();
        session
            .options
            .iter()
            .position(|option| option != correct)
            .expect("options must contain a distractor")
    }

    fn fire_pending(session: &mut QuizSession) {
        let due = session.next_deadline().expect("an advance must be pending");
        assert!(session.tick(due));
    }

    fn sorted_kanji(entries: &[VocabEntry]) -> Vec<&'static str> {
        let mut kanji: Vec<&'static str> = entries.iter().map(|e| e.kanji).collect();
        kanji.sort_unstable();
        kanji
    }

    #[test]
    fn test_new_quiz_is_permutation_with_reset_counters() {
        let mut session = seeded(1);
        session.submit_answer(correct_index(&session));
        fire_pending(&mut session);

        session.new_quiz(QuizMode::KanjiToEnglish);
        assert_eq!(session.order.len(), 7);
        assert_eq!(sorted_kanji(&session.order), sorted_kanji(&DAYS_OF_WEEK));
        assert_eq!(session.current_index, 0);
        assert_eq!(session.score, 0);
        assert!(session.answered.is_empty());
        assert_eq!(session.state, SessionState::InProgress);
        assert_eq!(session.phase, QuestionPhase::Waiting);
    }

    #[test]
    fn test_options_shape_for_each_question() {
        let mut session = seeded(2);
        for _ in 0..7 {
            assert_eq!(session.options.len(), 4);
            let correct = session.correct_answer();
            let hits = session.options.iter().filter(|o| *o == correct).count();
            assert_eq!(hits, 1);
            session.skip();
            fire_pending(&mut session);
        }
    }

    #[test]
    fn test_correct_answer_scores_and_logs() {
        let mut session = seeded(3);
        let expected = session.correct_answer().to_string();
        session.submit_answer(correct_index(&session));

        assert_eq!(session.score, 1);
        assert_eq!(session.answered.len(), 1);
        let record = &session.answered[0];
        assert!(record.was_correct);
        assert_eq!(record.selected, expected);
        assert_eq!(record.correct, expected);
        assert_eq!(record.mode, QuizMode::KanjiToEnglish);
    }

    #[test]
    fn test_wrong_answer_logs_without_scoring() {
        let mut session = seeded(4);
        session.submit_answer(wrong_index(&session));

        assert_eq!(session.score, 0);
        assert_eq!(session.answered.len(), 1);
        assert!(!session.answered[0].was_correct);
        assert_ne!(session.answered[0].selected, session.answered[0].correct);
    }

    #[test]
    fn test_second_submit_is_noop() {
        let mut session = seeded(5);
        session.submit_answer(wrong_index(&session));
        let score = session.score;
        let answered = session.answered.len();
        let phase = session.phase;

        // A second pick, even of the correct option, changes nothing.
        session.submit_answer(correct_index(&session));
        assert_eq!(session.score, score);
        assert_eq!(session.answered.len(), answered);
        assert_eq!(session.phase, phase);
    }

    #[test]
    fn test_out_of_range_option_is_noop() {
        let mut session = seeded(6);
        session.submit_answer(9);
        assert_eq!(session.score, 0);
        assert!(session.answered.is_empty());
        assert_eq!(session.phase, QuestionPhase::Waiting);
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn test_skip_reveals_without_recording() {
        let mut session = seeded(7);
        session.skip();
        assert_eq!(session.phase, QuestionPhase::Revealed);
        assert_eq!(session.score, 0);
        assert!(session.answered.is_empty());
        assert!(session.next_deadline().is_some());

        // Answering a skipped question is rejected.
        session.submit_answer(correct_index(&session));
        assert!(session.answered.is_empty());
    }

    #[test]
    fn test_answer_eventually_advances() {
        let mut session = seeded(8);
        session.submit_answer(correct_index(&session));
        let due = session.next_deadline().expect("advance scheduled");

        assert!(!session.tick(due - Duration::from_millis(1)));
        assert_eq!(session.current_index, 0);

        assert!(session.tick(due));
        assert_eq!(session.current_index, 1);
        assert_eq!(session.phase, QuestionPhase::Waiting);
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn test_new_quiz_cancels_pending_advance() {
        let mut session = seeded(9);
        session.submit_answer(correct_index(&session));
        assert!(session.next_deadline().is_some());

        session.new_quiz(QuizMode::KanjiToEnglish);
        let far_future = Instant::now() + Duration::from_secs(600);
        assert!(!session.tick(far_future));
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_all_correct_finishes_at_one_hundred_percent() {
        let mut session = seeded(10);
        for _ in 0..7 {
            session.submit_answer(correct_index(&session));
            fire_pending(&mut session);
        }
        assert_eq!(session.state, SessionState::Finished);
        let summary = session.final_summary();
        assert_eq!(summary.score, 7);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.percentage, 100);
        assert_eq!(session.progress(), (7, 7));
    }

    #[test]
    fn test_all_skips_finish_at_zero_with_empty_log() {
        let mut session = seeded(11);
        for _ in 0..7 {
            session.skip();
            fire_pending(&mut session);
        }
        assert_eq!(session.state, SessionState::Finished);
        let summary = session.final_summary();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.percentage, 0);
        assert!(session.answered.is_empty());
    }

    #[test]
    fn test_score_never_exceeds_index() {
        let mut session = seeded(12);
        for question in 0..7 {
            assert!(session.score <= session.current_index);
            if question % 2 == 0 {
                session.submit_answer(correct_index(&session));
            } else {
                session.skip();
            }
            fire_pending(&mut session);
            assert!(session.score <= session.current_index);
        }
        assert_eq!(session.state, SessionState::Finished);
        assert!(session.score <= session.order.len());
    }

    #[test]
    fn test_set_mode_resets_mid_quiz() {
        let mut session = seeded(13);
        for _ in 0..3 {
            session.submit_answer(correct_index(&session));
            fire_pending(&mut session);
        }
        assert!(session.current_index > 0);

        session.set_mode(QuizMode::KanjiToHiragana);
        assert_eq!(session.mode, QuizMode::KanjiToHiragana);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.score, 0);
        assert!(session.answered.is_empty());
        assert_eq!(session.state, SessionState::InProgress);
        // Options now come from the hiragana pool.
        let correct = session.correct_answer();
        assert_eq!(correct, session.current_entry().hiragana);
    }

    #[test]
    fn test_same_seed_gives_same_order_and_options() {
        let mut a = QuizSession::seeded(QuizMode::EnglishToKanji, 42);
        let mut b = QuizSession::seeded(QuizMode::EnglishToKanji, 42);
        for _ in 0..7 {
            assert_eq!(a.current_entry(), b.current_entry());
            assert_eq!(a.options, b.options);
            a.skip();
            b.skip();
            fire_pending(&mut a);
            fire_pending(&mut b);
        }
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        let mut session = seeded(14);
        session.score = 5;
        assert_eq!(session.final_summary().percentage, 71); // 5/7 = 71.4%
        session.score = 4;
        assert_eq!(session.final_summary().percentage, 57); // 4/7 = 57.1%
        session.score = 6;
        assert_eq!(session.final_summary().percentage, 86); // 6/7 = 85.7%
    }

    #[test]
    fn test_progress_is_one_based() {
        let mut session = seeded(15);
        assert_eq!(session.progress(), (1, 7));
        session.skip();
        fire_pending(&mut session);
        assert_eq!(session.progress(), (2, 7));
    }

    #[test]
    fn test_review_lists_full_table() {
        let session = seeded(16);
        assert_eq!(session.review_entries().len(), 7);
        assert_eq!(session.review_entries(), &DAYS_OF_WEEK[..]);
    }

    struct CountingSound {
        correct: Rc<Cell<usize>>,
        incorrect: Rc<Cell<usize>>,
    }

    impl SoundEffects for CountingSound {
        fn play_correct(&self) {
            self.correct.set(self.correct.get() + 1);
        }

        fn play_incorrect(&self) {
            self.incorrect.set(self.incorrect.get() + 1);
        }
    }

    #[test]
    fn test_sounds_follow_answer_outcome() {
        let correct = Rc::new(Cell::new(0));
        let incorrect = Rc::new(Cell::new(0));
        let sound = CountingSound {
            correct: Rc::clone(&correct),
            incorrect: Rc::clone(&incorrect),
        };
        let mut session = QuizSession::with_rng(
            QuizMode::KanjiToEnglish,
            StdRng::seed_from_u64(17),
            Box::new(sound),
            Box::new(NullSpeech),
        );

        session.submit_answer(wrong_index(&session));
        assert_eq!((correct.get(), incorrect.get()), (0, 1));

        fire_pending(&mut session);
        session.submit_answer(correct_index(&session));
        assert_eq!((correct.get(), incorrect.get()), (1, 1));

        // Skips are silent.
        fire_pending(&mut session);
        session.skip();
        assert_eq!((correct.get(), incorrect.get()), (1, 1));
    }

    struct RecordingSpeech {
        spoken: Rc<RefCell<Vec<String>>>,
    }

    impl Speech for RecordingSpeech {
        fn is_supported(&self) -> bool {
            true
        }

        fn speak_japanese(&self, text: &str) {
            self.spoken.borrow_mut().push(format!("ja:{}", text));
        }

        fn speak_english(&self, text: &str) {
            self.spoken.borrow_mut().push(format!("en:{}", text));
        }

        fn stop(&self) {}
    }

    fn recording_session(mode: QuizMode, seed: u64) -> (QuizSession, Rc<RefCell<Vec<String>>>) {
        let spoken = Rc::new(RefCell::new(Vec::new()));
        let speech = RecordingSpeech {
            spoken: Rc::clone(&spoken),
        };
        let session = QuizSession::with_rng(
            mode,
            StdRng::seed_from_u64(seed),
            Box::new(NullSound),
            Box::new(speech),
        );
        (session, spoken)
    }

    #[test]
    fn test_prompt_is_spoken_on_question_load() {
        let (session, spoken) = recording_session(QuizMode::KanjiToEnglish, 18);
        let spoken = spoken.borrow();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0], format!("ja:{}", session.current_entry().kanji));
    }

    #[test]
    fn test_character_modes_never_speak() {
        let (mut session, spoken) = recording_session(QuizMode::KanjiToHiragana, 19);
        assert!(session.speech_effectively_disabled());
        session.speak_current();
        session.skip();
        fire_pending(&mut session);
        assert!(spoken.borrow().is_empty());
    }

    #[test]
    fn test_tts_toggle_silences_speech() {
        let (mut session, spoken) = recording_session(QuizMode::EnglishToKanji, 20);
        assert_eq!(spoken.borrow().len(), 1);

        session.toggle_tts();
        assert!(session.speech_effectively_disabled());
        session.skip();
        fire_pending(&mut session);
        assert_eq!(spoken.borrow().len(), 1);

        session.toggle_tts();
        session.speak_current();
        assert_eq!(spoken.borrow().len(), 2);
    }

    #[test]
    fn test_null_speech_counts_as_unsupported() {
        let session = seeded(21);
        assert!(session.speech_effectively_disabled());
    }

    #[test]
    fn test_digit_keys_submit_answers() {
        let mut session = seeded(22);
        let index = correct_index(&session);
        let key = KeyEvent::new(
            KeyCode::Char(char::from_digit(index as u32 + 1, 10).unwrap()),
            KeyModifiers::empty(),
        );
        handle_quiz_input(&mut session, key);
        assert_eq!(session.score, 1);
        assert_eq!(session.answered.len(), 1);
    }

    #[test]
    fn test_enter_skips_and_space_restarts() {
        let mut session = seeded(23);
        handle_quiz_input(
            &mut session,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()),
        );
        assert_eq!(session.phase, QuestionPhase::Revealed);

        handle_quiz_input(
            &mut session,
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty()),
        );
        assert_eq!(session.phase, QuestionPhase::Waiting);
        assert_eq!(session.current_index, 0);
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn test_tab_cycles_mode_and_restarts() {
        let mut session = seeded(24);
        session.submit_answer(correct_index(&session));
        handle_quiz_input(
            &mut session,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::empty()),
        );
        assert_eq!(session.mode, QuizMode::EnglishToKanji);
        assert_eq!(session.score, 0);
        assert!(session.answered.is_empty());
    }

    #[test]
    fn test_app_state_values_exist() {
        // The screen enum is driven by main; just pin its variants here.
        assert_ne!(AppState::Quiz, AppState::Results);
        assert_ne!(AppState::Results, AppState::Review);
    }
}
