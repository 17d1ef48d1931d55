use super::super::domain::{ClassificationType, Label};
use super::tally::Tally;

/// Resolves a tally to a personality type. Total over every well-formed tally.
///
/// A single leader always maps to its base type; the size of its lead only feeds the
/// confidence band. Ties for first place go through [`resolve_tie`].
pub fn classify(tally: &Tally) -> ClassificationType {
    let standings = tally.standings();
    match standings.leaders.as_slice() {
        [leader] => ClassificationType::for_label(*leader),
        leaders => resolve_tie(leaders),
    }
}

/// Tie table for first place. `leaders` arrive in label order.
///
/// Any tie holding both B and C is a hybrid, whatever else shares the top count.
/// Pairs without C fall back to the first label's base type; that fallback is a
/// placeholder pending product sign-off.
fn resolve_tie(leaders: &[Label]) -> ClassificationType {
    let tied = |label: Label| leaders.contains(&label);
    if tied(Label::B) && tied(Label::C) {
        return ClassificationType::AdaptiveHybrid;
    }

    match leaders {
        [first, _] if !tied(Label::C) => ClassificationType::for_label(*first),
        _ => ClassificationType::AmbivalentType,
    }
}
