use std::collections::BTreeSet;

use crate::data::AchievementCatalog;
use crate::model::{AchievementCondition, AchievementReward};

/// Counters achievements are judged against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub total_generated: f64,
    pub total_clicks: u64,
    pub upgrades_owned: u64,
    pub ascension_level: u32,
    pub core_activations: u64,
}

pub fn condition_met(condition: AchievementCondition, progress: &Progress) -> bool {
    match condition {
        AchievementCondition::TotalGenerated(target) => progress.total_generated >= target,
        AchievementCondition::TotalClicks(target) => progress.total_clicks >= target,
        AchievementCondition::UpgradesOwned(target) => {
            progress.upgrades_owned >= u64::from(target)
        }
        AchievementCondition::AscensionLevel(target) => progress.ascension_level >= target,
        AchievementCondition::CoreActivations(target) => progress.core_activations >= target,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AchievementLedger {
    pub unlocked: BTreeSet<String>,
}

impl AchievementLedger {
    /// Unlocks every satisfied achievement. Running it twice changes nothing.
    pub fn evaluate(&mut self, catalog: &AchievementCatalog, progress: &Progress) -> Vec<String> {
        let mut fresh = Vec::new();
        for achievement in &catalog.achievements {
            if self.unlocked.contains(&achievement.id) {
                continue;
            }
            if condition_met(achievement.condition, progress) {
                self.unlocked.insert(achievement.id.clone());
                fresh.push(achievement.id.clone());
            }
        }
        fresh
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn production_multiplier(&self, catalog: &AchievementCatalog) -> f64 {
        self.rewards(catalog)
            .filter_map(|reward| match reward {
                AchievementReward::ProductionMultiplier(value) => Some(value),
                _ => None,
            })
            .product()
    }

    pub fn cost_multiplier(&self, catalog: &AchievementCatalog) -> f64 {
        self.rewards(catalog)
            .filter_map(|reward| match reward {
                AchievementReward::CostMultiplier(value) => Some(value),
                _ => None,
            })
            .product()
    }

    fn rewards<'a>(
        &'a self,
        catalog: &'a AchievementCatalog,
    ) -> impl Iterator<Item = AchievementReward> + 'a {
        catalog
            .achievements
            .iter()
            .filter(|achievement| self.unlocked.contains(&achievement.id))
            .map(|achievement| achievement.reward)
    }
}

/// Ids unlocked in `next` but not in `previous`, sorted by id.
pub fn newly_unlocked(previous: &AchievementLedger, next: &AchievementLedger) -> Vec<String> {
    next.unlocked.difference(&previous.unlocked).cloned().collect()
}
