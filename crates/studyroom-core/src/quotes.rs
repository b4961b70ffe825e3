//! Motivational quote rotation.

use rand::Rng;

pub const QUOTES: [&str; 5] = [
    "Small progress is still progress.",
    "Focus on the process, not the outcome.",
    "You are capable of amazing things.",
    "Stay consistent, not perfect.",
    "One study session at a time.",
];

/// Pick a quote uniformly at random.
pub fn random_quote() -> &'static str {
    QUOTES[rand::thread_rng().gen_range(0..QUOTES.len())]
}
