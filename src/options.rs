use rand::Rng;
use rand::seq::SliceRandom;

pub const OPTION_COUNT: usize = 4;

/// Build a multiple-choice option set: the correct value plus `count - 1`
/// distinct distractors drawn without replacement from the rest of the pool,
/// then shuffled. If the pool is too small the set shrinks instead of failing.
pub fn generate_options<R: Rng>(
    all_values: &[&str],
    correct: &str,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let distractors: Vec<&str> = all_values
        .iter()
        .copied()
        .filter(|value| *value != correct)
        .collect();

    let mut options: Vec<String> = distractors
        .choose_multiple(rng, count.saturating_sub(1))
        .map(|value| value.to_string())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}
