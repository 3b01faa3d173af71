//! Yes/no prompt construction for the reasoning tiers.

use super::ReasoningTier;

/// Builds the prompt for a tier. Inputs are the normalized strings so
/// pictographs arrive as readable tokens.
pub fn build_prompt(tier: ReasoningTier, guess: &str, answer: &str) -> String {
    match tier {
        ReasoningTier::Standard => format!(
            "Are these two things the same? Answer only YES or NO.\n\
             \n\
             Thing 1: {guess}\n\
             Thing 2: {answer}\n\
             \n\
             Consider:\n\
             - Synonyms (car = automobile)\n\
             - Descriptions (italian flatbread with cheese = pizza)\n\
             - Cultural references (The King of Pop = Michael Jackson)\n\
             - Common misspellings (piza = pizza)\n\
             - Idioms with same meaning (break a leg = good luck)\n\
             \n\
             Answer:"
        ),
        ReasoningTier::Premium => format!(
            "Are these two things the same? Answer only YES or NO.\n\
             \n\
             Thing 1: {guess}\n\
             Thing 2: {answer}\n\
             \n\
             Use your advanced knowledge and reasoning to consider:\n\
             - Founders, CEOs and creators referred to by their role\n\
             - Conferences, hackathons and events and their nicknames\n\
             - Platforms, protocols and projects and their common names\n\
             - Startups and companies and their alternative names\n\
             - Industry slang, metaphors and context-dependent references\n\
             - Abbreviated forms versus full names\n\
             \n\
             Answer:"
        ),
    }
}

/// Parses a model reply into a yes/no answer; `None` if unparsable.
pub fn parse_answer(reply: &str) -> Option<bool> {
    let upper = reply.trim().to_uppercase();
    if upper.starts_with("YES") {
        Some(true)
    } else if upper.starts_with("NO") {
        Some(false)
    } else {
        None
    }
}
