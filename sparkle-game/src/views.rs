//! Read-only projections for rendering mission lists, the badge shelf and
//! brick stats.
use serde::Serialize;

use crate::bricks::BrickWorkshop;
use crate::catalog::{BadgeId, MissionId};
use crate::goals::BrickGoal;
use crate::ledger::RewardLedger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRow {
    pub id: MissionId,
    pub text: &'static str,
    pub points: u32,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRow {
    pub id: BadgeId,
    pub title: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub awarded_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickStats {
    pub count: usize,
    pub tallest: u32,
    pub goal: BrickGoal,
    pub hint: &'static str,
}

/// Every mission in catalog order with its completion flag.
#[must_use]
pub fn mission_rows(ledger: &RewardLedger) -> Vec<MissionRow> {
    MissionId::all()
        .map(|id| {
            let spec = id.spec();
            MissionRow {
                id,
                text: spec.text,
                points: spec.points,
                done: ledger.is_done(id),
            }
        })
        .collect()
}

/// Every badge in catalog order, locked ones included.
#[must_use]
pub fn badge_rows(ledger: &RewardLedger) -> Vec<BadgeRow> {
    BadgeId::all()
        .map(|id| {
            let spec = id.spec();
            let award = ledger.award(id);
            BadgeRow {
                id,
                title: spec.title,
                desc: spec.desc,
                icon: spec.icon,
                unlocked: award.is_some(),
                awarded_at: award.map(|a| a.awarded_at_epoch_millis),
            }
        })
        .collect()
}

#[must_use]
pub fn brick_stats(bricks: &BrickWorkshop) -> BrickStats {
    BrickStats {
        count: bricks.grid.filled_count(),
        tallest: bricks.grid.tallest_column(),
        goal: bricks.active_goal,
        hint: bricks.active_goal.hint(),
    }
}
