//! End-to-end scenarios from spec §8, run against a real `Chatbot` with a
//! minimal stub normalizer (see `support.rs`).

mod support;

use thomas_core::{Chatbot, ChatbotConfig, Context, ThomasError};

use support::StubNormalizer;

fn config(seed: u64) -> ChatbotConfig {
    ChatbotConfig {
        rng_seed: Some(seed),
        ..ChatbotConfig::default()
    }
}

/// Scenario 1 — first turn: an empty corpus can only answer with the
/// message just learned.
#[test]
fn scenario_1_first_turn_cold_fallback() {
    let mut bot = Chatbot::in_memory(config(1), StubNormalizer);
    let ctx = Context::new();

    let response = bot.respond(&ctx, "hello there").unwrap();

    assert_eq!(response.tokens, vec!["hello".to_string(), "there".to_string()]);
    assert_eq!(response.mesh_id, None);
    assert_eq!(bot.utterance_count(), 1);
    assert_eq!(bot.mesh_size(), 0);
}

/// Scenario 2 — two turns, same utterance: the bot's first reply becomes
/// a Link, and the second turn records "hi" as a follow-up to it.
///
/// Once both utterances are in the ignore set (§4.F step 1: last_resp and
/// msg_id), the ignore set equals the entire utterance universe, so the
/// cold fallback re-admits ignored ids (§4.F step 4, §9's last open
/// question, property 6's carve-out). Either utterance is a valid reply;
/// we assert the invariant rather than pin a seed-dependent outcome.
#[test]
fn scenario_2_two_turns_creates_link() {
    let mut bot = Chatbot::in_memory(config(2), StubNormalizer);
    let mut ctx = Context::new();

    let first = bot.respond(&ctx, "hello there").unwrap();
    ctx.save(&first);

    let second = bot.respond(&ctx, "hi").unwrap();

    assert_eq!(bot.utterance_count(), 2);
    assert_eq!(bot.mesh_size(), 1);
    assert!(
        second.tokens == vec!["hi".to_string()] || second.tokens == vec!["hello".to_string(), "there".to_string()]
    );
}

/// Scenario 6 — cold fallback over an empty corpus with learning
/// disabled is fatal.
#[test]
fn scenario_6_empty_corpus_with_learn_disabled() {
    let config = ChatbotConfig { learn: false, ..config(6) };
    let mut bot = Chatbot::in_memory(config, StubNormalizer);
    let ctx = Context::new();

    let err = bot.respond(&ctx, "anything at all").unwrap_err();
    assert!(matches!(err, ThomasError::EmptyCorpus));
}

/// Property 4 (§8): with `learn=false`, neither store changes across any
/// number of `respond` calls.
#[test]
fn learn_false_leaves_stores_unchanged() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    {
        let mut seeder = Chatbot::new(
            ChatbotConfig { storage_path: dir.path().to_path_buf(), rng_seed: Some(40), ..ChatbotConfig::default() },
            StubNormalizer,
        )?;
        let mut ctx = Context::new();
        let first = seeder.respond(&ctx, "hello there")?;
        ctx.save(&first);
        seeder.respond(&ctx, "hi")?;
        seeder.save_data()?;
    }

    let mut bot = Chatbot::new(
        ChatbotConfig {
            storage_path: dir.path().to_path_buf(),
            learn: false,
            rng_seed: Some(41),
            ..ChatbotConfig::default()
        },
        StubNormalizer,
    )?;
    let baseline_utterances = bot.utterance_count();
    let baseline_mesh = bot.mesh_size();

    let ctx = Context::new();
    for _ in 0..5 {
        bot.respond(&ctx, "a brand new message never seen before").ok();
        assert_eq!(bot.utterance_count(), baseline_utterances);
        assert_eq!(bot.mesh_size(), baseline_mesh);
    }

    Ok(())
}
