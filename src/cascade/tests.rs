use super::*;
use crate::embedding::FixedSimilarity;
use crate::policy::{EscalationPolicy, PolicyConfig};
use crate::reasoning::MockReasoner;

fn cascade(
    similarity: f32,
    reasoner: MockReasoner,
) -> MatchCascade<FixedSimilarity, MockReasoner> {
    MatchCascade::new(
        FixedSimilarity(similarity),
        reasoner,
        EscalationPolicy::new(PolicyConfig::extended()),
        CascadeConfig::default(),
    )
}

#[tokio::test]
async fn test_exact_match_short_circuits() {
    let cascade = cascade(0.0, MockReasoner::unavailable());
    let verdict = cascade.check("pizza", "pizza", None).await.unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.similarity, 1.0);
    assert_eq!(verdict.method, Tier::ExactMatch);
    assert_eq!(verdict.trail, vec![Tier::ExactMatch]);
    assert!(verdict.local_similarity.is_none());
}

#[tokio::test]
async fn test_exact_match_applies_normalization() {
    let cascade = cascade(0.0, MockReasoner::unavailable());
    let verdict = cascade.check("  PIZZA ", "pizza", None).await.unwrap();
    assert_eq!(verdict.method, Tier::ExactMatch);
    assert!(verdict.is_correct);
}

#[tokio::test]
async fn test_emoji_guess_matches_its_name_exactly() {
    let cascade = cascade(0.0, MockReasoner::unavailable());
    let verdict = cascade.check("🍕", "pizza", None).await.unwrap();
    assert_eq!(verdict.method, Tier::ExactMatch);
    assert!(verdict.is_correct);
}

#[tokio::test]
async fn test_empty_guess_rejected() {
    let cascade = cascade(0.9, MockReasoner::standard(true));
    let verdict = cascade.check("", "pizza", None).await.unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::EmptyInputRejection);
    assert_eq!(verdict.similarity, 0.0);
    assert!(verdict.trail.is_empty());
}

#[tokio::test]
async fn test_whitespace_guess_rejected() {
    let cascade = cascade(0.9, MockReasoner::standard(true));
    let verdict = cascade.check("   \t ", "pizza", None).await.unwrap();
    assert_eq!(verdict.method, Tier::EmptyInputRejection);
}

#[tokio::test]
async fn test_empty_answer_rejected() {
    let cascade = cascade(0.9, MockReasoner::standard(true));
    let verdict = cascade.check("pizza", "", None).await.unwrap();
    assert_eq!(verdict.method, Tier::EmptyInputRejection);
}

#[tokio::test]
async fn test_high_local_score_accepts() {
    let cascade = cascade(0.93, MockReasoner::unavailable());
    let verdict = cascade.check("automobile", "car", None).await.unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.method, Tier::LocalModel);
    assert_eq!(verdict.local_similarity, Some(0.93));
    assert_eq!(verdict.trail, vec![Tier::ExactMatch, Tier::LocalModel]);
}

#[tokio::test]
async fn test_threshold_boundary_is_inclusive_accept() {
    let cascade = cascade(0.8, MockReasoner::unavailable());
    let verdict = cascade.check("automobile", "car", None).await.unwrap();

    assert!(verdict.is_correct, "score exactly at threshold must accept");
    assert_eq!(verdict.method, Tier::LocalModel);
}

#[tokio::test]
async fn test_low_cutoff_boundary_is_inclusive_reject() {
    let cascade = cascade(0.15, MockReasoner::standard(true));
    let verdict = cascade.check("giraffe", "pizza", None).await.unwrap();

    assert!(!verdict.is_correct, "score exactly at low cutoff must reject");
    assert_eq!(verdict.method, Tier::LocalModel);
    // The reasoning oracle must not have been consulted.
    assert!(verdict.standard_says.is_none());
}

#[tokio::test]
async fn test_very_low_score_rejects_locally() {
    let cascade = cascade(0.02, MockReasoner::standard(true));
    let verdict = cascade.check("completely wrong", "pizza", None).await.unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::LocalModel);
}

#[tokio::test]
async fn test_ambiguous_without_reasoning_falls_back() {
    let cascade = cascade(0.5, MockReasoner::unavailable());
    let verdict = cascade.check("automobile", "car", None).await.unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::LocalFallback);
    assert_eq!(verdict.local_similarity, Some(0.5));
}

#[tokio::test]
async fn test_ambiguous_standard_yes_accepts() {
    let cascade = cascade(0.4, MockReasoner::standard(true));
    let verdict = cascade.check("automobile", "car", Some(0.8)).await.unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.method, Tier::StandardReasoning);
    assert_eq!(verdict.similarity, 1.0);
    assert_eq!(verdict.local_similarity, Some(0.4));
    assert_eq!(verdict.standard_says, Some(true));
    assert_eq!(
        verdict.trail,
        vec![Tier::ExactMatch, Tier::LocalModel, Tier::StandardReasoning]
    );
}

#[tokio::test]
async fn test_standard_no_without_triggers_rejects() {
    let cascade = cascade(0.4, MockReasoner::with_answers(false, true));
    // No lexicon triggers, length gap too large for the near-equal rule.
    let verdict = cascade
        .check("giraffe", "seventeen bananas", None)
        .await
        .unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::StandardReasoning);
    assert_eq!(verdict.standard_says, Some(false));
    assert!(verdict.premium_says.is_none());
}

#[tokio::test]
async fn test_standard_no_with_trigger_escalates_to_premium() {
    let cascade = cascade(0.4, MockReasoner::with_answers(false, true));
    let verdict = cascade
        .check("the founder of solana", "anatoly yakovenko", None)
        .await
        .unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.method, Tier::PremiumReasoning);
    assert_eq!(verdict.similarity, 1.0);
    assert_eq!(verdict.standard_says, Some(false));
    assert_eq!(verdict.premium_says, Some(true));
    assert_eq!(
        verdict.trail,
        vec![
            Tier::ExactMatch,
            Tier::LocalModel,
            Tier::StandardReasoning,
            Tier::PremiumReasoning
        ]
    );
}

#[tokio::test]
async fn test_premium_no_keeps_rejection() {
    let cascade = cascade(0.4, MockReasoner::with_answers(false, false));
    let verdict = cascade
        .check("the founder of solana", "anatoly yakovenko", None)
        .await
        .unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::PremiumReasoning);
    assert_eq!(verdict.similarity, 0.4);
    assert_eq!(verdict.premium_says, Some(false));
}

#[tokio::test]
async fn test_premium_unavailable_falls_back_to_standard_verdict() {
    let cascade = cascade(0.4, MockReasoner::standard(false));
    let verdict = cascade
        .check("the founder of solana", "anatoly yakovenko", None)
        .await
        .unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::StandardReasoning);
    assert_eq!(verdict.standard_says, Some(false));
    assert!(verdict.premium_says.is_none());
    // Premium was attempted; the trail keeps the attempt visible.
    assert!(verdict.trail.contains(&Tier::PremiumReasoning));
}

#[tokio::test]
async fn test_standard_yes_never_escalates() {
    // Premium would say NO, but a standard YES is terminal.
    let cascade = cascade(0.4, MockReasoner::with_answers(true, false));
    let verdict = cascade
        .check("the founder of solana", "anatoly yakovenko", None)
        .await
        .unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.method, Tier::StandardReasoning);
    assert!(verdict.premium_says.is_none());
}

#[tokio::test]
async fn test_standard_unavailable_mid_flight_falls_back() {
    let reasoner = MockReasoner {
        standard: None,
        premium: Some(true),
    };
    // is_available() is true (premium scripted), but standard answers None.
    let cascade = cascade(0.5, reasoner);
    let verdict = cascade.check("automobile", "car", None).await.unwrap();

    assert!(!verdict.is_correct);
    assert_eq!(verdict.method, Tier::LocalFallback);
}

#[tokio::test]
async fn test_trail_is_monotone_in_cost() {
    let cascade = cascade(0.4, MockReasoner::with_answers(false, true));
    let verdict = cascade
        .check("the founder of solana", "anatoly yakovenko", None)
        .await
        .unwrap();

    for pair in verdict.trail.windows(2) {
        assert!(pair[0].rank() <= pair[1].rank(), "trail not monotone");
    }
}

#[tokio::test]
async fn test_custom_threshold_respected() {
    let cascade = cascade(0.5, MockReasoner::unavailable());
    let verdict = cascade.check("automobile", "car", Some(0.5)).await.unwrap();

    assert!(verdict.is_correct);
    assert_eq!(verdict.method, Tier::LocalModel);
}

#[test]
fn test_round4() {
    assert_eq!(round4(0.123456), 0.1235);
    assert_eq!(round4(1.0), 1.0);
    assert_eq!(round4(-0.00004), -0.0);
}
