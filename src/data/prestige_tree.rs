use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{NodeEffect, PrestigeNode};

use super::DataError;

/// Skill-tree definition: nodes linked by AND-prerequisites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestigeTree {
    #[serde(default)]
    pub nodes: Vec<PrestigeNode>,
}

impl PrestigeTree {
    pub fn new(nodes: Vec<PrestigeNode>) -> Self {
        Self { nodes }
    }

    pub fn get(&self, id: &str) -> Option<&PrestigeNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Free nodes without prerequisites. Every fresh player owns these.
    pub fn root_ids(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter(|node| node.required.is_empty() && node.cost == 0)
            .map(|node| node.id.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let mut by_id: HashMap<&str, &PrestigeNode> = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if by_id.insert(node.id.as_str(), node).is_some() {
                return Err(DataError::DuplicateNodeId(node.id.clone()));
            }
            if !effect_is_valid(node.effect) {
                return Err(DataError::InvalidNodeEffect(node.id.clone()));
            }
        }

        for node in &self.nodes {
            for prereq in &node.required {
                if !by_id.contains_key(prereq.as_str()) {
                    return Err(DataError::UnknownPrerequisite {
                        node: node.id.clone(),
                        prereq: prereq.clone(),
                    });
                }
            }
        }

        if self.root_ids().is_empty() {
            return Err(DataError::MissingRoot);
        }

        // Kahn's algorithm: anything left unvisited sits on a cycle.
        let mut pending: HashMap<&str, usize> = self
            .nodes
            .iter()
            .map(|node| {
                let distinct: BTreeSet<&str> = node.required.iter().map(String::as_str).collect();
                (node.id.as_str(), distinct.len())
            })
            .collect();
        let mut ready: Vec<&str> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut visited = 0;
        while let Some(id) = ready.pop() {
            visited += 1;
            for node in &self.nodes {
                if node.required.iter().any(|prereq| prereq == id)
                    && let Some(count) = pending.get_mut(node.id.as_str())
                {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(node.id.as_str());
                    }
                }
            }
        }
        if visited != self.nodes.len() {
            let stuck = self
                .nodes
                .iter()
                .find(|node| pending.get(node.id.as_str()).copied().unwrap_or(0) > 0)
                .map(|node| node.id.clone())
                .unwrap_or_default();
            return Err(DataError::CyclicPrerequisites(stuck));
        }

        Ok(())
    }
}

fn effect_is_valid(effect: NodeEffect) -> bool {
    match effect {
        NodeEffect::None => true,
        NodeEffect::ProductionMultiplier(value)
        | NodeEffect::ClickMultiplier(value)
        | NodeEffect::ChargeRateMultiplier(value) => value.is_finite() && value > 0.0,
        NodeEffect::CostMultiplier(value) => value.is_finite() && value > 0.0 && value <= 1.0,
        NodeEffect::StartingEnergy(value)
        | NodeEffect::BoostMultiplierBonus(value)
        | NodeEffect::BoostDurationMs(value) => value.is_finite() && value >= 0.0,
    }
}
