pub mod layout;
mod quiz;
mod results;
mod review;

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks};
pub use quiz::draw_quiz;
pub use results::draw_results;
pub use review::draw_review;
