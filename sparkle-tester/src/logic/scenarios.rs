//! Scenario catalog. Each scenario drives a fresh session for one seed and
//! fails through `anyhow::ensure!` when an expectation does not hold.
use anyhow::{Context, Result, ensure};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sparkle_game::constants::{FIRST_VISIT_KEY, STATE_KEY};
use sparkle_game::{
    Accessory, BadgeId, BrickGoal, GoalOutcome, HairStyle, MISSIONS, MakeupTool, MemoryStorage,
    MissionId, Outfit, RewardLedger, StudioState, StudioStorage,
};

use super::session::{PlaySession, SessionSummary};
use super::storage::FileStorage;

pub type ScenarioFn = fn(u64) -> Result<SessionSummary>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

pub static SCENARIOS: [Scenario; 6] = [
    Scenario {
        key: "smoke",
        description: "Welcome bonus plus one action on every panel",
        run: smoke,
    },
    Scenario {
        key: "missions",
        description: "Complete all 13 missions and every milestone badge",
        run: all_missions,
    },
    Scenario {
        key: "brick-goals",
        description: "Build each active goal until all three goal badges unlock",
        run: brick_goals,
    },
    Scenario {
        key: "reset",
        description: "Mission reset keeps points; full reset wipes storage",
        run: resets,
    },
    Scenario {
        key: "persistence",
        description: "Reload from disk after random play; corrupt blobs fall back",
        run: persistence,
    },
    Scenario {
        key: "random-play",
        description: "Long randomized session with ledger invariants checked",
        run: random_play,
    },
];

#[must_use]
pub fn get_scenario(key: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

fn smoke(seed: u64) -> Result<SessionSummary> {
    let mut session = PlaySession::open(MemoryStorage::new(), seed);
    let ledger = session.studio().ledger();
    ensure!(
        ledger.is_unlocked(BadgeId::Welcome),
        "first visit should unlock Welcome"
    );
    ensure!(ledger.points() == 8, "welcome should be worth 8, got {}", ledger.points());

    session.step("set-hair", |s| s.set_hair(HairStyle::Bob));
    session.step("select-tool", |s| s.select_tool(MakeupTool::Lips));
    session.step("apply-color", |s| s.apply_color("#ff4fd8"));
    session.tap(11, 0);
    session.step("place-sticker", |s| s.place_sticker("💖", 100.0, 80.0));

    let ledger = session.studio().ledger();
    ensure!(
        ledger.completed_count() == 5,
        "expected 5 missions, got {}",
        ledger.completed_count()
    );
    ensure!(
        ledger.is_unlocked(BadgeId::Starter),
        "4+ missions should unlock Sparkle Starter"
    );
    Ok(session.summary())
}

fn all_missions(seed: u64) -> Result<SessionSummary> {
    let mut session = PlaySession::open(MemoryStorage::new(), seed);

    session.step("set-hair", |s| s.set_hair(HairStyle::Braids));
    session.step("set-outfit", |s| s.set_outfit(Outfit::Princess));
    session.step("toggle-accessory", |s| {
        s.toggle_accessory(Accessory::Crown)
    });
    session.step("save-look", |s| s.save_look());

    for (tool, color) in [
        (MakeupTool::Lips, "#fb7185"),
        (MakeupTool::Blush, "rgba(251,113,133,.35)"),
        (MakeupTool::Shadow, "rgba(167,139,250,.35)"),
    ] {
        session.step("select-tool", |s| s.select_tool(tool));
        session.step("apply-color", |s| s.apply_color(color));
    }

    let active = session.studio().state().bricks.active_goal;
    session.build_goal(active);
    if !session.studio().ledger().is_done(MissionId::Tower8) {
        session.build_goal(BrickGoal::Tower);
    }

    for i in 0..10_u32 {
        let x = f64::from(i) * 30.0;
        session.step("place-sticker", |s| s.place_sticker("⭐", x, 120.0));
    }
    session.step("save-room", |s| s.save_room());

    let ledger = session.studio().ledger();
    ensure!(
        ledger.completed_count() == MISSIONS.len(),
        "expected every mission, got {}",
        ledger.completed_count()
    );
    for badge in [BadgeId::Starter, BadgeId::Hero, BadgeId::All] {
        ensure!(ledger.is_unlocked(badge), "{badge} should be unlocked");
    }
    Ok(session.summary())
}

fn brick_goals(seed: u64) -> Result<SessionSummary> {
    let mut session = PlaySession::open(MemoryStorage::new(), seed);
    let goal_badges = BrickGoal::ALL.map(BrickGoal::badge);

    for _ in 0..32 {
        let goal = session.studio().state().bricks.active_goal;
        let report = session.build_goal(goal);
        match report.goal {
            Some(GoalOutcome::Completed {
                goal: done, next, ..
            }) => {
                ensure!(done == goal, "completed {done} while {goal} was active");
                ensure!(next != goal, "goal {goal} repeated after completion");
            }
            other => anyhow::bail!("building {goal} did not complete it: {other:?}"),
        }
        let ledger = session.studio().ledger();
        if goal_badges.iter().all(|badge| ledger.is_unlocked(*badge)) {
            return Ok(session.summary());
        }
    }
    anyhow::bail!("goal rotation never reached all three goals")
}

fn resets(seed: u64) -> Result<SessionSummary> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut session = PlaySession::open(MemoryStorage::new(), seed);
    for _ in 0..60 {
        session.random_action(&mut rng);
    }

    let points = session.studio().ledger().points();
    session.reset_missions();
    ensure!(
        session.studio().ledger().points() == points,
        "mission reset changed points"
    );

    session.reset_all()?;
    let storage = session.engine().storage();
    ensure!(
        storage.len() == 1 && storage.read(FIRST_VISIT_KEY)?.is_some(),
        "full reset should leave only the first-visit marker, found {} keys",
        storage.len()
    );
    ensure!(
        session.studio().ledger() == &RewardLedger::default(),
        "full reset left rewards behind"
    );

    session.reopen(seed);
    let welcome = session.step("welcome", |s| s.welcome());
    ensure!(
        welcome.points == 0 && !welcome.unlocked_badge(BadgeId::Welcome),
        "first-visit bonus paid again after a full reset"
    );
    ensure!(
        session.studio().ledger().points() == 0,
        "points should stay at zero after a full reset"
    );
    Ok(session.summary())
}

fn persistence(seed: u64) -> Result<SessionSummary> {
    let storage = FileStorage::temporary(&format!("persist-{seed}"))
        .context("creating persistence scratch dir")?;
    let outcome = persistence_round_trip(&storage, seed);
    storage
        .remove_all()
        .with_context(|| format!("removing {}", storage.root().display()))?;
    outcome
}

fn persistence_round_trip(storage: &FileStorage, seed: u64) -> Result<SessionSummary> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut session = PlaySession::open(storage.clone(), seed);
    for _ in 0..40 {
        session.random_action(&mut rng);
    }
    session.step("save-look", |s| s.save_look());
    let state = session.studio().state().clone();
    let saved = session.studio().saved().clone();
    let prefs = *session.studio().prefs();

    session.reopen(seed.wrapping_add(1));
    ensure!(session.studio().state() == &state, "state changed on reload");
    ensure!(session.studio().saved() == &saved, "saved slots changed on reload");
    ensure!(session.studio().prefs() == &prefs, "preferences changed on reload");
    let summary = session.summary();

    storage
        .write(STATE_KEY, "{\"points\": \"lots\"")
        .context("writing corrupt blob")?;
    session.reopen(seed);
    let expected = StudioState {
        first_visit_done: true,
        ..StudioState::default()
    };
    ensure!(
        session.studio().state() == &expected,
        "corrupt blob should load as defaults"
    );
    Ok(summary)
}

fn random_play(seed: u64) -> Result<SessionSummary> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut session = PlaySession::open(MemoryStorage::new(), seed);
    for _ in 0..250 {
        session.random_action(&mut rng);
    }
    let summary = session.summary();
    ensure!(summary.actions == 251, "expected 251 actions, ran {}", summary.actions);
    Ok(summary)
}
