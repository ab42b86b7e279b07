//! Main story quest line
//!
//! 150 chapters split into five arcs of 30. Generated rather than stored so
//! ids, prerequisites and rewards stay consistent.

use serde::{Deserialize, Serialize};

/// Number of chapters in the main story
pub const STORY_LENGTH: u32 = 150;
/// Chapters per arc
pub const ARC_LENGTH: u32 = 30;

/// Story arcs (title, description), in play order
pub const ARCS: [(&str, &str); 5] = [
    (
        "The Rising Shadow",
        "The kingdom of Soleria is overrun by a dark force eating away at the land.",
    ),
    (
        "Forges of Renewal",
        "The survivors gather and reforge the tools needed to take the land back.",
    ),
    (
        "March of the Heroes",
        "Adventurers rise up to push back the darkness.",
    ),
    (
        "Veil of the Ancients",
        "Old secrets resurface, revealing the true origin of the Shadow.",
    ),
    (
        "Dawn Regained",
        "Light slowly returns to the world, heralding a new hope.",
    ),
];

/// Quest grouping; only the main story exists so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestCategory {
    Main,
}

/// A single trackable goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub description: String,
    /// Progress needed to complete
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub objectives: Vec<Objective>,
    pub rewards: Rewards,
    /// Quest ids that must be completed first
    pub prerequisites: Vec<String>,
    pub category: QuestCategory,
}

fn story_id(chapter: u32) -> String {
    format!("story_{chapter}")
}

/// Build one chapter (1-based)
pub fn story_quest(chapter: u32) -> Quest {
    let arc_index = ((chapter.saturating_sub(1) / ARC_LENGTH) as usize).min(ARCS.len() - 1);
    let (arc_title, arc_description) = ARCS[arc_index];
    let step = (chapter.saturating_sub(1) % ARC_LENGTH) + 1;

    Quest {
        id: story_id(chapter),
        title: format!("Chapter {chapter}: {arc_title}"),
        description: format!("{arc_description} (Step {step}/{ARC_LENGTH})"),
        objectives: vec![Objective {
            id: format!("story_{chapter}_progress"),
            description: format!("Advance the adventure ({step}/{ARC_LENGTH})"),
            target: 1,
        }],
        rewards: Rewards {
            xp: chapter.saturating_mul(5).saturating_add(100),
        },
        prerequisites: if chapter <= 1 {
            Vec::new()
        } else {
            vec![story_id(chapter - 1)]
        },
        category: QuestCategory::Main,
    }
}

/// The whole main story, chapter 1 first
pub fn story_quests() -> Vec<Quest> {
    (1..=STORY_LENGTH).map(story_quest).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_length_and_order() {
        let quests = story_quests();
        assert_eq!(quests.len(), 150);
        assert_eq!(quests[0].id, "story_1");
        assert_eq!(quests[149].id, "story_150");
        assert!(quests.iter().all(|q| q.category == QuestCategory::Main));
    }

    #[test]
    fn test_prerequisites_chain() {
        let quests = story_quests();
        assert!(quests[0].prerequisites.is_empty());
        for pair in quests.windows(2) {
            assert_eq!(pair[1].prerequisites, vec![pair[0].id.clone()]);
        }
    }

    #[test]
    fn test_arc_boundaries() {
        let q30 = story_quest(30);
        let q31 = story_quest(31);
        assert_eq!(q30.title, "Chapter 30: The Rising Shadow");
        assert!(q30.description.ends_with("(Step 30/30)"));
        assert_eq!(q31.title, "Chapter 31: Forges of Renewal");
        assert!(q31.description.ends_with("(Step 1/30)"));
        assert_eq!(story_quest(150).title, "Chapter 150: Dawn Regained");
    }

    #[test]
    fn test_objective_and_rewards() {
        let q = story_quest(7);
        assert_eq!(q.rewards.xp, 135);
        assert_eq!(q.objectives.len(), 1);
        assert_eq!(q.objectives[0].id, "story_7_progress");
        assert_eq!(q.objectives[0].description, "Advance the adventure (7/30)");
        assert_eq!(q.objectives[0].target, 1);
    }

    #[test]
    fn test_huge_chapter_saturates_xp() {
        let q = story_quest(u32::MAX);
        assert_eq!(q.rewards.xp, u32::MAX);
        assert_eq!(q.title, format!("Chapter {}: Dawn Regained", u32::MAX));
        assert_eq!(story_quest(0).rewards.xp, 100);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(story_quest(2)).unwrap();
        assert_eq!(json["category"], "main");
        assert_eq!(json["rewards"]["xp"], 110);
        assert_eq!(json["prerequisites"][0], "story_1");
    }
}
