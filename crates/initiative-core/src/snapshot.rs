//! Read-only, serializable view of a timeline for rendering and `--json` output.

use crate::timeline::Timeline;
use crate::token::TokenRegistry;
use crate::types::{ActionId, BlockId, SubjectId};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineSnapshot {
    pub start_time: u64,
    pub turn_duration: u32,
    pub time_units_per_second: u32,
    pub selected: Option<usize>,
    pub subjects: Vec<SubjectSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectSnapshot {
    pub id: SubjectId,
    pub index: usize,
    pub name: String,
    pub selected: bool,
    pub actions: Vec<BlockSnapshot>,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub action_id: ActionId,
    pub label: String,
    pub width_units: u64,
    pub seconds: f64,
    pub resolved: bool,
}

impl TimelineSnapshot {
    pub fn capture(timeline: &Timeline, tokens: &TokenRegistry) -> Self {
        let subjects = timeline
            .subjects()
            .iter()
            .enumerate()
            .map(|(index, subject)| SubjectSnapshot {
                id: subject.id,
                index,
                name: subject.name.clone(),
                selected: timeline.selected_index() == Some(index),
                actions: subject
                    .actions
                    .iter()
                    .map(|block| BlockSnapshot {
                        id: block.id,
                        action_id: block.action_id,
                        label: block.label.clone(),
                        width_units: block.width_units,
                        seconds: timeline.units_to_seconds(block.width_units),
                        resolved: block.resolved,
                    })
                    .collect(),
                tokens: subject
                    .tokens
                    .iter()
                    .map(|t| tokens.name(t.kind).unwrap_or("?").to_string())
                    .collect(),
            })
            .collect();

        Self {
            start_time: timeline.start_time(),
            turn_duration: timeline.turn_duration(),
            time_units_per_second: timeline.time_units_per_second(),
            selected: timeline.selected_index(),
            subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActionCatalog;

    #[test]
    fn capture_reports_seconds_and_token_names() {
        let catalog = ActionCatalog::builtin();
        let registry = TokenRegistry::builtin();
        let mut tl = Timeline::new(10);
        tl.add_subject("Ayla", true);
        tl.add_subject("Bram", false);
        tl.append_action(&catalog, catalog.lookup("Defend").unwrap());
        tl.add_token(1, registry.lookup("stunned").unwrap());

        let snap = TimelineSnapshot::capture(&tl, &registry);
        assert_eq!(snap.selected, Some(0));
        assert!(snap.subjects[0].selected);
        assert_eq!(snap.subjects[0].actions[0].seconds, 4.0);
        assert_eq!(snap.subjects[1].tokens, vec!["stunned".to_string()]);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["subjects"][0]["actions"][0]["label"], "Defend");
    }
}
