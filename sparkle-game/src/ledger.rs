//! Reward ledger: points, unlocked badges and completed missions.
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::{BadgeId, MISSIONS, MissionId};
use crate::constants::{BADGE_BONUS, MILESTONE_HERO, MILESTONE_STARTER};

/// Display metadata captured when a badge is unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub title: String,
    pub desc: String,
    pub icon: String,
    pub awarded_at_epoch_millis: u64,
}

impl Award {
    fn for_badge(id: BadgeId, at: u64) -> Self {
        let spec = id.spec();
        Self {
            title: spec.title.to_string(),
            desc: spec.desc.to_string(),
            icon: spec.icon.to_string(),
            awarded_at_epoch_millis: at,
        }
    }
}

/// Badges unlocked as a side effect of a single ledger operation.
pub type Unlocks = SmallVec<[BadgeId; 4]>;

/// Result of [`RewardLedger::complete_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub already_done: bool,
    /// Points credited by this call, including milestone badge bonuses.
    pub points: u32,
    pub milestones: Unlocks,
}

/// Monotonic reward state shared by every studio panel.
///
/// Sets only grow and points only rise; the sole exceptions are
/// [`RewardLedger::reset`] and [`RewardLedger::reset_missions`], which are
/// explicit user actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardLedger {
    #[serde(default)]
    points: u32,
    #[serde(default, deserialize_with = "known_ids")]
    unlocked: BTreeMap<BadgeId, Award>,
    #[serde(default, deserialize_with = "known_ids")]
    completed: BTreeMap<MissionId, bool>,
}

/// Read an id-keyed map, skipping keys that are not in the catalog.
fn known_ids<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: FromStr + Ord,
    V: Deserialize<'de>,
{
    let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match key.parse::<K>() {
            Ok(id) => Some((id, value)),
            Err(_) => {
                log::debug!("skipping unknown id {key}");
                None
            }
        })
        .collect())
}

impl RewardLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn is_done(&self, id: MissionId) -> bool {
        self.completed.get(&id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_unlocked(&self, id: BadgeId) -> bool {
        self.unlocked.contains_key(&id)
    }

    #[must_use]
    pub fn award(&self, id: BadgeId) -> Option<&Award> {
        self.unlocked.get(&id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.values().filter(|done| **done).count()
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn unlocked(&self) -> impl Iterator<Item = (BadgeId, &Award)> {
        self.unlocked.iter().map(|(id, award)| (*id, award))
    }

    pub fn completed(&self) -> impl Iterator<Item = MissionId> + '_ {
        self.completed
            .iter()
            .filter(|(_, done)| **done)
            .map(|(id, _)| *id)
    }

    /// Add `delta` points, clamping the total at zero.
    pub fn add_points(&mut self, delta: i64) {
        let next = i64::from(self.points).saturating_add(delta).max(0);
        self.points = u32::try_from(next).unwrap_or(u32::MAX);
    }

    /// Unlock `id`, crediting the badge bonus. Returns `false` without
    /// touching state when the badge is already unlocked.
    pub fn unlock_achievement(&mut self, id: BadgeId, at: u64) -> bool {
        if self.unlocked.contains_key(&id) {
            return false;
        }
        self.unlocked.insert(id, Award::for_badge(id, at));
        self.add_points(i64::from(BADGE_BONUS));
        log::debug!("badge unlocked: {id} (+{BADGE_BONUS})");
        true
    }

    /// Mark `id` done. The first completion credits the mission's points and
    /// re-checks the milestone badges.
    pub fn complete_task(&mut self, id: MissionId, at: u64) -> TaskCompletion {
        if self.is_done(id) {
            return TaskCompletion {
                already_done: true,
                ..TaskCompletion::default()
            };
        }
        self.completed.insert(id, true);
        let before = self.points;
        self.add_points(i64::from(id.points()));
        log::debug!("mission complete: {id} (+{})", id.points());
        let milestones = self.award_milestones(at);
        TaskCompletion {
            already_done: false,
            points: self.points - before,
            milestones,
        }
    }

    /// Unlock every milestone badge whose threshold the completed count has
    /// reached. Each threshold is checked on its own.
    pub fn award_milestones(&mut self, at: u64) -> Unlocks {
        let done = self.completed_count();
        let mut unlocked = Unlocks::new();
        let thresholds = [
            (MILESTONE_STARTER, BadgeId::Starter),
            (MILESTONE_HERO, BadgeId::Hero),
            (MISSIONS.len(), BadgeId::All),
        ];
        for (threshold, badge) in thresholds {
            if done >= threshold && self.unlock_achievement(badge, at) {
                unlocked.push(badge);
            }
        }
        unlocked
    }

    /// Forget completed missions; points and badges are kept.
    pub fn reset_missions(&mut self) {
        self.completed.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: u64 = 1_700_000_000_000;

    #[test]
    fn complete_task_awards_points_once() {
        let mut ledger = RewardLedger::new();
        let first = ledger.complete_task(MissionId::SaveLook, AT);
        assert!(!first.already_done);
        assert_eq!(first.points, 3);
        assert_eq!(ledger.points(), 3);

        let second = ledger.complete_task(MissionId::SaveLook, AT);
        assert!(second.already_done);
        assert_eq!(second.points, 0);
        assert_eq!(ledger.points(), 3);
    }

    #[test]
    fn unlock_is_idempotent_and_keeps_first_timestamp() {
        let mut ledger = RewardLedger::new();
        assert!(ledger.unlock_achievement(BadgeId::Heart, AT));
        assert!(!ledger.unlock_achievement(BadgeId::Heart, AT + 10));
        assert_eq!(ledger.points(), 5);
        let award = ledger.award(BadgeId::Heart).unwrap();
        assert_eq!(award.awarded_at_epoch_millis, AT);
        assert_eq!(award.title, "Heart Builder");
    }

    #[test]
    fn add_points_clamps_at_zero() {
        let mut ledger = RewardLedger::new();
        ledger.add_points(4);
        ledger.add_points(0);
        assert_eq!(ledger.points(), 4);
        ledger.add_points(-10);
        assert_eq!(ledger.points(), 0);
    }

    #[test]
    fn four_missions_unlock_only_starter() {
        let mut ledger = RewardLedger::new();
        let mut milestones = Vec::new();
        for id in MissionId::all().take(4) {
            milestones.extend(ledger.complete_task(id, AT).milestones);
        }
        assert_eq!(milestones, vec![BadgeId::Starter]);
        assert!(ledger.is_unlocked(BadgeId::Starter));
        assert!(!ledger.is_unlocked(BadgeId::Hero));
        assert!(!ledger.is_unlocked(BadgeId::All));
    }

    #[test]
    fn all_missions_unlock_every_milestone_once() {
        let mut ledger = RewardLedger::new();
        let mut milestones = Vec::new();
        for id in MissionId::all() {
            milestones.extend(ledger.complete_task(id, AT).milestones);
        }
        assert_eq!(
            milestones,
            vec![BadgeId::Starter, BadgeId::Hero, BadgeId::All]
        );
        assert_eq!(ledger.completed_count(), MISSIONS.len());
        assert_eq!(ledger.points(), 38 + 3 * BADGE_BONUS);
        assert!(ledger.award_milestones(AT).is_empty());
    }

    #[test]
    fn reset_missions_keeps_points_and_badges() {
        let mut ledger = RewardLedger::new();
        for id in MissionId::all().take(4) {
            ledger.complete_task(id, AT);
        }
        let points = ledger.points();
        ledger.reset_missions();
        assert_eq!(ledger.completed_count(), 0);
        assert_eq!(ledger.points(), points);
        assert!(ledger.is_unlocked(BadgeId::Starter));

        let again = ledger.complete_task(MissionId::Hair, AT);
        assert_eq!(again.points, 2);
    }

    #[test]
    fn full_reset_clears_everything() {
        let mut ledger = RewardLedger::new();
        ledger.complete_task(MissionId::Hair, AT);
        ledger.unlock_achievement(BadgeId::Welcome, AT);
        ledger.reset();
        assert_eq!(ledger, RewardLedger::default());
        assert_eq!(ledger.points(), 0);
    }

    #[test]
    fn serializes_with_flat_key_layout() {
        let mut ledger = RewardLedger::new();
        ledger.complete_task(MissionId::Tower8, AT);
        ledger.unlock_achievement(BadgeId::GoalTower, AT);
        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["points"], 9);
        assert_eq!(value["completed"]["tower8"], true);
        assert_eq!(
            value["unlocked"]["goalTower"]["awardedAtEpochMillis"],
            serde_json::json!(AT)
        );
        let back: RewardLedger = serde_json::from_value(value).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn unknown_ids_are_skipped_on_load() {
        let raw = r#"{
            "points": 7,
            "completed": {"hair": true, "shoes": true, "randomLook": true},
            "unlocked": {
                "starterHint": {"title": "Hint", "desc": "", "icon": "", "awardedAtEpochMillis": 1}
            }
        }"#;
        let ledger: RewardLedger = serde_json::from_str(raw).unwrap();
        assert_eq!(ledger.points(), 7);
        assert_eq!(ledger.completed().collect::<Vec<_>>(), vec![MissionId::Hair]);
        assert_eq!(ledger.unlocked_count(), 0);
    }
}
