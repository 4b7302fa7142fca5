//! Stage-clear payout and progression

use serde::{Deserialize, Serialize};

use super::events::RunOutcome;
use crate::consts::FINAL_STAGE;

/// Payload of a victory (or ending) terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReward {
    pub total_coins: u64,
    pub stars: u8,
    pub surviving_allies: u32,
    pub start_allies: u32,
}

/// Surviving fraction of the starting squad (0 when the run started empty)
pub fn survival_ratio(surviving: u32, start: u32) -> f64 {
    if start == 0 {
        return 0.0;
    }
    surviving as f64 / start as f64
}

/// 3 stars at 70% survival, 2 at 40%, otherwise 1
pub fn stars_for_ratio(ratio: f64) -> u8 {
    if ratio >= 0.7 {
        3
    } else if ratio >= 0.4 {
        2
    } else {
        1
    }
}

/// Total payout: stage reward plus run pickups, scaled by the coin bonus
pub fn total_coins(reward_coins: u32, collected: u64, coin_bonus: f64) -> u64 {
    ((reward_coins as f64 + collected as f64) * coin_bonus).floor() as u64
}

pub fn compute_reward(
    reward_coins: u32,
    collected: u64,
    coin_bonus: f64,
    surviving_allies: u32,
    start_allies: u32,
) -> StageReward {
    StageReward {
        total_coins: total_coins(reward_coins, collected, coin_bonus),
        stars: stars_for_ratio(survival_ratio(surviving_allies, start_allies)),
        surviving_allies,
        start_allies,
    }
}

/// Next `(current_stage, max_stage)` after clearing `current`.
///
/// Clearing the frontier stage unlocks one more; replaying an earlier stage
/// just moves the cursor forward without passing the frontier.
pub fn advance_progression(current: u32, max: u32) -> (u32, u32) {
    let max = if current == max { max + 1 } else { max };
    ((current + 1).min(max), max)
}

/// Clearing the last curated stage, or any generated stage past it, rolls
/// the credits
pub fn is_final_stage(stage_id: u32) -> bool {
    stage_id >= FINAL_STAGE
}

/// Wrap a reward in the right terminal outcome
pub fn outcome_for(stage_id: u32, reward: StageReward) -> RunOutcome {
    if is_final_stage(stage_id) {
        RunOutcome::Ending(reward)
    } else {
        RunOutcome::Victory(reward)
    }
}
