use sparkle_game::{
    Accessory, BadgeId, BrickGoal, BrickGrid, BrickMode, GoalOutcome, HairStyle, MakeupTool,
    MISSIONS, ManualClock, MissionId, Outfit, Preferences, SavedSlots, Studio, StudioState,
};

fn fresh(seed: u64) -> Studio<ManualClock> {
    Studio::fresh(seed, ManualClock::starting_at(1_700_000_000_000))
}

fn with_goal(goal: BrickGoal) -> Studio<ManualClock> {
    let mut state = StudioState::default();
    state.bricks.active_goal = goal;
    Studio::new(
        state,
        SavedSlots::default(),
        Preferences::default(),
        9,
        ManualClock::starting_at(5),
    )
}

#[test]
fn every_mission_reaches_every_milestone() {
    let mut studio = fresh(0xBEEF);

    studio.set_hair(HairStyle::Waves);
    studio.set_outfit(Outfit::Sporty);
    studio.toggle_accessory(Accessory::Glasses);
    let fourth = studio.save_look();
    assert!(fourth.unlocked_badge(BadgeId::Starter));

    studio.select_tool(MakeupTool::Liner);
    studio.apply_color("rgba(0,0,0,.35)");
    let glam = studio.random_glam();
    assert!(glam.completed_mission(MissionId::GlamFull));
    assert!(glam.unlocked_badge(BadgeId::Glam));

    let mut hero_seen = false;
    for row in 0..8 {
        let report = studio.tap_cell(BrickGrid::index(row, 0));
        hero_seen |= report.unlocked_badge(BadgeId::Hero);
    }
    assert!(hero_seen, "eighth mission should unlock Studio Hero");
    assert!(studio.ledger().is_done(MissionId::BrickGoal));

    for i in 0..10 {
        studio.place_sticker("🌈", f64::from(i), 0.0);
    }
    let last = studio.save_room();
    assert!(last.unlocked_badge(BadgeId::All));

    let ledger = studio.ledger();
    assert_eq!(ledger.completed_count(), MISSIONS.len());
    for badge in [BadgeId::Starter, BadgeId::Hero, BadgeId::All] {
        assert!(ledger.is_unlocked(badge), "{badge} missing");
    }
}

#[test]
fn heart_goal_completes_from_the_center_pattern() {
    let mut studio = with_goal(BrickGoal::Heart);
    let cells = [
        (4, 5),
        (4, 7),
        (5, 4),
        (5, 8),
        (6, 4),
        (6, 8),
        (7, 5),
        (7, 7),
        (8, 6),
    ];
    let mut outcomes = Vec::new();
    for (row, col) in cells {
        outcomes.push(studio.tap_cell(BrickGrid::index(row, col)));
    }
    for pending in &outcomes[..8] {
        assert!(!pending.goal.as_ref().unwrap().is_completed());
        assert_eq!(pending.message, BrickGoal::Heart.hint());
    }
    let done = &outcomes[8];
    assert!(done.unlocked_badge(BadgeId::Heart));
    assert_eq!(done.message, "Goal complete: Heart! 💖");
    match done.goal.as_ref().unwrap() {
        GoalOutcome::Completed { goal, next, .. } => {
            assert_eq!(*goal, BrickGoal::Heart);
            assert_ne!(*next, BrickGoal::Heart);
            assert_eq!(studio.state().bricks.active_goal, *next);
        }
        GoalOutcome::Pending { .. } => panic!("heart should be complete"),
    }
}

#[test]
fn rainbow_goal_needs_five_in_a_row() {
    let mut studio = with_goal(BrickGoal::Rainbow);
    for col in [0, 1, 2, 3, 5] {
        let report = studio.tap_cell(BrickGrid::index(11, col));
        assert!(!report.goal.unwrap().is_completed());
    }
    let report = studio.tap_cell(BrickGrid::index(11, 4));
    assert!(report.unlocked_badge(BadgeId::Rainbow));
    // tap + goal reward + brickGoal mission + Rainbow Maker bonus
    assert_eq!(report.points, 1 + 6 + 5 + 5);
}

#[test]
fn erasing_never_completes_brick_place() {
    let mut studio = fresh(1);
    studio.set_brick_mode(BrickMode::Erase);
    let report = studio.tap_cell(7);
    assert_eq!(report.points, 0);
    assert!(!studio.ledger().is_done(MissionId::BrickPlace));
}

#[test]
fn reset_missions_lets_missions_pay_again() {
    let mut studio = fresh(2);
    studio.set_hair(HairStyle::Bob);
    let before = studio.ledger().points();
    studio.reset_missions();
    assert_eq!(studio.ledger().points(), before);
    assert_eq!(studio.ledger().completed_count(), 0);

    let again = studio.set_hair(HairStyle::Pony);
    assert!(again.completed_mission(MissionId::Hair));
    assert_eq!(again.points, 1 + MissionId::Hair.points());
}

#[test]
fn new_goal_and_clear_leave_points_alone() {
    let mut studio = fresh(3);
    studio.tap_cell(0);
    let points = studio.ledger().points();
    let goal = studio.new_goal();
    assert!(goal.message.starts_with("New Goal: "));
    let cleared = studio.clear_bricks();
    assert_eq!(cleared.points, 0);
    assert!(studio.state().bricks.grid.is_empty());
    assert_eq!(studio.ledger().points(), points);
}

#[test]
fn welcome_on_restored_grid_completes_brick_place() {
    let mut state = StudioState::default();
    state.first_visit_done = true;
    state.bricks.grid.place(3, "#60a5fa");
    let mut studio = Studio::new(
        state,
        SavedSlots::default(),
        Preferences::default(),
        4,
        ManualClock::starting_at(0),
    );
    let report = studio.welcome();
    assert!(report.completed_mission(MissionId::BrickPlace));
    assert!(!report.unlocked_badge(BadgeId::Welcome));
    assert_eq!(report.points, MissionId::BrickPlace.points());
}
