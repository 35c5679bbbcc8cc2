use crate::catalog::ActionCatalog;
use crate::dice::DiceRoll;
use crate::token::{Token, TokenKind, MAX_TOKENS};
use crate::types::{ActionId, BlockId, Direction, SubjectId, Target};
use serde::Serialize;

pub const DEFAULT_TIME_UNITS_PER_SECOND: u32 = 10;
pub const DEFAULT_TURN_DURATION: u32 = 6;
pub const UNNAMED_SUBJECT: &str = "<unnamed>";

/// Bounds accepted by [`Timeline::resize_seconds`].
pub const MIN_RESIZE_SECONDS: f64 = 0.1;
pub const MAX_RESIZE_SECONDS: f64 = 9.0;

// ---------------------------------------------------------------------------
// ActionBlock
// ---------------------------------------------------------------------------

/// A placed action occupying `width_units` of time on a subject's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBlock {
    pub id: BlockId,
    pub action_id: ActionId,
    /// Remaining length in engine time units. Never zero.
    pub width_units: u64,
    pub label: String,
    pub resolved: bool,
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    /// Index 0 executes next.
    pub actions: Vec<ActionBlock>,
    pub tokens: Vec<Token>,
}

impl Subject {
    fn new(id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            actions: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Total queued time on this row, in units.
    pub fn queued_units(&self) -> u64 {
        self.actions.iter().map(|a| a.width_units).sum()
    }

    /// Consume `budget` units from the front of the row. Returns the number
    /// of blocks removed.
    fn consume(&mut self, mut budget: u64) -> usize {
        let mut spent = 0;
        for block in self.actions.iter_mut() {
            if budget < block.width_units {
                block.width_units -= budget;
                break;
            }
            budget -= block.width_units;
            spent += 1;
            if budget == 0 {
                break;
            }
        }
        for block in self.actions.drain(..spent) {
            tracing::trace!(
                subject = %self.name,
                block = %block.id,
                label = %block.label,
                "block consumed"
            );
        }
        spent
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Ordered subjects sharing one clock.
///
/// All mutators report failure through `bool` / `Option` and leave the
/// timeline untouched when they fail. The selection, when present, always
/// indexes a live subject.
#[derive(Debug, Clone)]
pub struct Timeline {
    subjects: Vec<Subject>,
    selected: Option<usize>,
    start_time: u64,
    turn_duration: u32,
    time_units_per_second: u32,
    next_id: u64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_UNITS_PER_SECOND)
    }
}

impl Timeline {
    /// A zero `time_units_per_second` is raised to 1.
    pub fn new(time_units_per_second: u32) -> Self {
        Self {
            subjects: Vec::new(),
            selected: None,
            start_time: 0,
            turn_duration: DEFAULT_TURN_DURATION,
            time_units_per_second: time_units_per_second.max(1),
            next_id: 0,
        }
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn subject_at(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn subject_index(&self, id: SubjectId) -> Option<usize> {
        self.subjects.iter().position(|s| s.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Subject> {
        self.selected.and_then(|i| self.subjects.get(i))
    }

    pub fn block(&self, id: BlockId) -> Option<&ActionBlock> {
        self.subjects
            .iter()
            .flat_map(|s| s.actions.iter())
            .find(|b| b.id == id)
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn turn_duration(&self) -> u32 {
        self.turn_duration
    }

    pub fn time_units_per_second(&self) -> u32 {
        self.time_units_per_second
    }

    pub fn units_to_seconds(&self, units: u64) -> f64 {
        units as f64 / self.time_units_per_second as f64
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Returns `false` if `index` is out of range. Re-selecting is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.subjects.len() {
            return false;
        }
        if self.selected != Some(index) {
            tracing::debug!(from = ?self.selected, to = index, "select subject");
            self.selected = Some(index);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Step the selection one subject in `direction`, wrapping. With nothing
    /// selected this picks the first subject.
    pub fn select_next(&mut self, direction: Direction) -> Option<usize> {
        let len = self.subjects.len();
        if len == 0 {
            return None;
        }
        let next = match self.selected {
            Some(i) => direction.step(i, len),
            None => 0,
        };
        self.select(next);
        Some(next)
    }

    // -----------------------------------------------------------------------
    // Subjects
    // -----------------------------------------------------------------------

    pub fn add_subject(&mut self, name: impl Into<String>, auto_select: bool) -> SubjectId {
        let id = SubjectId(self.mint_id());
        self.subjects.push(Subject::new(id, name));
        if auto_select {
            self.select(self.subjects.len() - 1);
        }
        id
    }

    /// Remove the subject at `index` along with its blocks and tokens.
    ///
    /// The selection keeps pointing at the same subject: it is cleared when
    /// the selected subject is removed and shifted down when an earlier one is.
    pub fn delete_subject(&mut self, index: usize) -> Option<Subject> {
        if index >= self.subjects.len() {
            return None;
        }
        let removed = self.subjects.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        tracing::debug!(subject = %removed.name, index, "subject deleted");
        Some(removed)
    }

    pub fn delete_subject_by_id(&mut self, id: SubjectId) -> Option<Subject> {
        let index = self.subject_index(id)?;
        self.delete_subject(index)
    }

    /// Move the selected subject one slot, wrapping past either end. Needs a
    /// selection and at least two subjects.
    pub fn order_subject(&mut self, direction: Direction) -> bool {
        let len = self.subjects.len();
        let Some(from) = self.selected else {
            return false;
        };
        if len < 2 {
            return false;
        }
        let to = direction.step(from, len);
        let subject = self.subjects.remove(from);
        self.subjects.insert(to, subject);
        self.selected = Some(to);
        true
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Append a block for `action_id` to the selected subject.
    ///
    /// Returns `None` without changing anything when there is no selection
    /// or the id is unknown to `catalog`.
    pub fn append_action(
        &mut self,
        catalog: &ActionCatalog,
        action_id: ActionId,
    ) -> Option<BlockId> {
        let index = self.selected?;
        let definition = catalog.get(action_id)?;
        let width_units = definition.duration as u64 * self.time_units_per_second as u64;
        let label = definition.name.clone();

        let id = BlockId(self.mint_id());
        self.subjects[index].actions.push(ActionBlock {
            id,
            action_id,
            width_units,
            label,
            resolved: false,
        });
        Some(id)
    }

    /// Most recently appended block still queued on the selected subject.
    pub fn last_action(&self) -> Option<&ActionBlock> {
        self.selected()?.actions.last()
    }

    pub fn delete_last_action(&mut self) -> Option<ActionBlock> {
        let index = self.selected?;
        self.subjects[index].actions.pop()
    }

    pub fn delete_block(&mut self, id: BlockId) -> Option<ActionBlock> {
        self.subjects.iter_mut().find_map(|s| {
            let pos = s.actions.iter().position(|b| b.id == id)?;
            Some(s.actions.remove(pos))
        })
    }

    fn block_mut(&mut self, id: BlockId) -> Option<&mut ActionBlock> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.actions.iter_mut())
            .find(|b| b.id == id)
    }

    /// Empty or whitespace-only names are refused.
    pub fn rename(&mut self, target: Target, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        match target {
            Target::Subject(id) => match self.subjects.iter_mut().find(|s| s.id == id) {
                Some(subject) => {
                    subject.name = name.to_string();
                    true
                }
                None => false,
            },
            Target::Block(id) => match self.block_mut(id) {
                Some(block) => {
                    block.label = name.to_string();
                    true
                }
                None => false,
            },
        }
    }

    pub fn resize(&mut self, id: BlockId, width_units: u64) -> bool {
        if width_units == 0 {
            return false;
        }
        match self.block_mut(id) {
            Some(block) => {
                block.width_units = width_units;
                true
            }
            None => false,
        }
    }

    /// Resize to a length in seconds, clamped to
    /// [`MIN_RESIZE_SECONDS`]..=[`MAX_RESIZE_SECONDS`].
    pub fn resize_seconds(&mut self, id: BlockId, seconds: f64) -> bool {
        if !seconds.is_finite() {
            return false;
        }
        let seconds = seconds.clamp(MIN_RESIZE_SECONDS, MAX_RESIZE_SECONDS);
        let units = (seconds * self.time_units_per_second as f64).round() as u64;
        self.resize(id, units.max(1))
    }

    /// Record a roll on a block by appending its total to the label.
    pub fn resolve(&mut self, id: BlockId, outcome: &DiceRoll) -> bool {
        match self.block_mut(id) {
            Some(block) => {
                block.label = format!("{} {}", block.label, outcome.total);
                block.resolved = true;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------------

    /// Returns `false` for an invalid index or when the subject already
    /// carries [`MAX_TOKENS`].
    pub fn add_token(&mut self, subject_index: usize, kind: TokenKind) -> bool {
        let Some(subject) = self.subjects.get_mut(subject_index) else {
            return false;
        };
        if subject.tokens.len() >= MAX_TOKENS {
            return false;
        }
        subject.tokens.push(Token { kind });
        true
    }

    pub fn remove_token(&mut self, subject_index: usize, position: usize) -> Option<Token> {
        let subject = self.subjects.get_mut(subject_index)?;
        if position >= subject.tokens.len() {
            return None;
        }
        Some(subject.tokens.remove(position))
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Let `seconds` elapse on every row.
    ///
    /// Each row independently spends `seconds * time_units_per_second` units
    /// from its front: blocks that fit in the remaining budget are removed,
    /// the first block that does not fit is shortened. Returns the number of
    /// blocks removed across all rows. Values below one second do nothing.
    pub fn advance(&mut self, seconds: i64) -> usize {
        if seconds < 1 {
            return 0;
        }
        let seconds = seconds as u64;
        let budget = seconds.saturating_mul(self.time_units_per_second as u64);

        let removed: usize = self.subjects.iter_mut().map(|s| s.consume(budget)).sum();
        self.start_time = self.start_time.saturating_add(seconds);

        tracing::debug!(seconds, removed, start_time = self.start_time, "advance");
        removed
    }

    /// Advance by the current turn duration.
    pub fn advance_turn(&mut self) -> usize {
        self.advance(self.turn_duration as i64)
    }

    /// Manual correction of the clock. Queues are left alone.
    pub fn set_start_time(&mut self, seconds: u64) {
        self.start_time = seconds;
    }

    /// Zero is refused.
    pub fn set_turn_duration(&mut self, seconds: u32) -> bool {
        if seconds == 0 {
            return false;
        }
        self.turn_duration = seconds;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenRegistry;

    fn catalog() -> ActionCatalog {
        ActionCatalog::builtin()
    }

    /// Timeline at one unit per second so widths read as seconds.
    fn timeline_with(names: &[&str]) -> Timeline {
        let mut tl = Timeline::new(1);
        for (i, name) in names.iter().enumerate() {
            tl.add_subject(*name, i == 0);
        }
        tl
    }

    fn append(tl: &mut Timeline, catalog: &ActionCatalog, name: &str) -> BlockId {
        let id = catalog.lookup(name).unwrap();
        tl.append_action(catalog, id).unwrap()
    }

    fn widths(subject: &Subject) -> Vec<u64> {
        subject.actions.iter().map(|a| a.width_units).collect()
    }

    fn names(tl: &Timeline) -> Vec<&str> {
        tl.subjects().iter().map(|s| s.name.as_str()).collect()
    }

    // -- selection ----------------------------------------------------------

    #[test]
    fn add_subject_auto_selects() {
        let mut tl = Timeline::default();
        tl.add_subject("Ayla", true);
        assert_eq!(tl.selected_index(), Some(0));
        tl.add_subject("Bram", false);
        assert_eq!(tl.selected_index(), Some(0));
        tl.add_subject("Cade", true);
        assert_eq!(tl.selected_index(), Some(2));
        assert_eq!(tl.subject_count(), 3);
    }

    #[test]
    fn select_out_of_range_keeps_state() {
        let mut tl = timeline_with(&["a", "b"]);
        assert!(!tl.select(2));
        assert_eq!(tl.selected_index(), Some(0));
        assert!(tl.select(1));
        assert!(tl.select(1));
        assert_eq!(tl.selected().unwrap().name, "b");
    }

    #[test]
    fn select_next_cycles() {
        let mut tl = Timeline::new(1);
        assert_eq!(tl.select_next(Direction::Right), None);
        tl.add_subject("a", false);
        tl.add_subject("b", false);
        tl.add_subject("c", false);
        assert_eq!(tl.select_next(Direction::Left), Some(0));
        assert_eq!(tl.select_next(Direction::Left), Some(2));
        assert_eq!(tl.select_next(Direction::Right), Some(0));
        assert_eq!(tl.select_next(Direction::Right), Some(1));
    }

    #[test]
    fn delete_before_selection_shifts_it() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        tl.select(2);
        tl.delete_subject(0).unwrap();
        assert_eq!(tl.selected_index(), Some(1));
        assert_eq!(tl.selected().unwrap().name, "c");
    }

    #[test]
    fn delete_selected_clears_selection() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        tl.select(1);
        tl.delete_subject(1).unwrap();
        assert_eq!(tl.selected_index(), None);
        assert_eq!(names(&tl), vec!["a", "c"]);
    }

    #[test]
    fn delete_after_selection_leaves_it() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        tl.select(1);
        tl.delete_subject(2).unwrap();
        assert_eq!(tl.selected_index(), Some(1));
        assert!(tl.delete_subject(5).is_none());
    }

    #[test]
    fn delete_by_id_survives_reorder() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        let a = tl.subject_at(0).unwrap().id;
        tl.order_subject(Direction::Left);
        assert_eq!(tl.subject_index(a), Some(2));
        assert_eq!(tl.subject(a).unwrap().name, "a");
        let removed = tl.delete_subject_by_id(a).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(tl.selected_index(), None);
    }

    // -- ordering -----------------------------------------------------------

    #[test]
    fn first_moved_left_becomes_last() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        assert!(tl.order_subject(Direction::Left));
        assert_eq!(names(&tl), vec!["b", "c", "a"]);
        assert_eq!(tl.selected_index(), Some(2));
        assert_eq!(tl.selected().unwrap().name, "a");
    }

    #[test]
    fn last_moved_right_becomes_first() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        tl.select(2);
        assert!(tl.order_subject(Direction::Right));
        assert_eq!(names(&tl), vec!["c", "a", "b"]);
        assert_eq!(tl.selected_index(), Some(0));
    }

    #[test]
    fn middle_moves_swap_neighbours() {
        let mut tl = timeline_with(&["a", "b", "c"]);
        tl.select(1);
        tl.order_subject(Direction::Right);
        assert_eq!(names(&tl), vec!["a", "c", "b"]);
        tl.order_subject(Direction::Left);
        tl.order_subject(Direction::Left);
        assert_eq!(names(&tl), vec!["b", "a", "c"]);
        assert_eq!(tl.selected().unwrap().name, "b");
    }

    #[test]
    fn order_needs_selection_and_two_subjects() {
        let mut tl = timeline_with(&["solo"]);
        assert!(!tl.order_subject(Direction::Right));
        let mut tl = timeline_with(&["a", "b"]);
        tl.clear_selection();
        assert!(!tl.order_subject(Direction::Right));
        assert_eq!(names(&tl), vec!["a", "b"]);
    }

    // -- actions ------------------------------------------------------------

    #[test]
    fn append_requires_selection() {
        let catalog = catalog();
        let mut tl = Timeline::new(1);
        tl.add_subject("a", false);
        let attack = catalog.lookup("Attack").unwrap();
        assert!(tl.append_action(&catalog, attack).is_none());
        assert!(tl.subject_at(0).unwrap().actions.is_empty());
    }

    #[test]
    fn append_uses_catalog_duration_and_name() {
        let catalog = catalog();
        let mut tl = Timeline::new(10);
        tl.add_subject("a", true);
        let id = append(&mut tl, &catalog, "Equip");
        let block = tl.block(id).unwrap();
        assert_eq!(block.width_units, 60);
        assert_eq!(block.label, "Equip");
        assert!(!block.resolved);
    }

    #[test]
    fn append_unknown_id_fails() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        assert!(tl.append_action(&catalog, ActionId(99)).is_none());
    }

    #[test]
    fn catalog_override_is_not_retroactive() {
        let mut catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        let first = append(&mut tl, &catalog, "Attack");
        let attack = catalog.lookup("Attack").unwrap();
        catalog.set_duration(attack, 2).unwrap();
        let second = append(&mut tl, &catalog, "Attack");
        assert_eq!(tl.block(first).unwrap().width_units, 5);
        assert_eq!(tl.block(second).unwrap().width_units, 2);
    }

    #[test]
    fn last_action_follows_selection() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a", "b"]);
        append(&mut tl, &catalog, "Walk 10");
        let draw = append(&mut tl, &catalog, "Draw");
        assert_eq!(tl.last_action().unwrap().id, draw);

        tl.select(1);
        assert!(tl.last_action().is_none());
        assert!(tl.delete_last_action().is_none());

        tl.select(0);
        assert_eq!(tl.delete_last_action().unwrap().id, draw);
        assert_eq!(tl.last_action().unwrap().label, "Walk 10");

        tl.clear_selection();
        assert!(tl.last_action().is_none());
    }

    #[test]
    fn delete_block_anywhere() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a", "b"]);
        let walk = append(&mut tl, &catalog, "Walk 10");
        tl.select(1);
        let shoot = append(&mut tl, &catalog, "Shoot");
        assert_eq!(tl.delete_block(walk).unwrap().label, "Walk 10");
        assert!(tl.delete_block(walk).is_none());
        assert!(tl.block(shoot).is_some());
    }

    #[test]
    fn rename_subject_and_block() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        let subject = tl.subject_at(0).unwrap().id;
        let block = append(&mut tl, &catalog, "Throw");

        assert!(tl.rename(Target::Subject(subject), "Orc 1"));
        assert!(tl.rename(Target::Block(block), "Throw axe"));
        assert!(!tl.rename(Target::Block(block), "   "));
        assert!(!tl.rename(Target::Block(BlockId(999)), "x"));

        assert_eq!(tl.subject_at(0).unwrap().name, "Orc 1");
        assert_eq!(tl.block(block).unwrap().label, "Throw axe");
    }

    #[test]
    fn resize_rejects_zero() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        let block = append(&mut tl, &catalog, "Drink");
        assert!(!tl.resize(block, 0));
        assert!(tl.resize(block, 2));
        assert_eq!(tl.block(block).unwrap().width_units, 2);
    }

    #[test]
    fn resize_seconds_clamps() {
        let catalog = catalog();
        let mut tl = Timeline::new(10);
        tl.add_subject("a", true);
        let block = append(&mut tl, &catalog, "Drink");

        assert!(tl.resize_seconds(block, 2.5));
        assert_eq!(tl.block(block).unwrap().width_units, 25);
        assert!(tl.resize_seconds(block, 40.0));
        assert_eq!(tl.block(block).unwrap().width_units, 90);
        assert!(tl.resize_seconds(block, 0.0));
        assert_eq!(tl.block(block).unwrap().width_units, 1);
        assert!(!tl.resize_seconds(block, f64::NAN));
    }

    #[test]
    fn resolve_appends_total() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        let block = append(&mut tl, &catalog, "Attack");
        let roll = DiceRoll {
            total: 14,
            terms: vec![14],
        };
        assert!(tl.resolve(block, &roll));
        let b = tl.block(block).unwrap();
        assert_eq!(b.label, "Attack 14");
        assert!(b.resolved);
        assert_eq!(b.width_units, 5);
    }

    // -- tokens -------------------------------------------------------------

    #[test]
    fn token_cap_is_silent() {
        let registry = TokenRegistry::builtin();
        let prone = registry.lookup("prone").unwrap();
        let mut tl = timeline_with(&["a"]);
        for _ in 0..MAX_TOKENS {
            assert!(tl.add_token(0, prone));
        }
        assert!(!tl.add_token(0, prone));
        assert_eq!(tl.subject_at(0).unwrap().tokens.len(), MAX_TOKENS);
        assert!(!tl.add_token(3, prone));
    }

    #[test]
    fn remove_token_preserves_order() {
        let mut registry = TokenRegistry::new();
        let kinds: Vec<TokenKind> = ["x", "y", "z"].iter().map(|n| registry.register(*n)).collect();
        let mut tl = timeline_with(&["a"]);
        for kind in &kinds {
            tl.add_token(0, *kind);
        }
        assert_eq!(tl.remove_token(0, 1).unwrap().kind, kinds[1]);
        let left: Vec<TokenKind> = tl.subject_at(0).unwrap().tokens.iter().map(|t| t.kind).collect();
        assert_eq!(left, vec![kinds[0], kinds[2]]);
        assert!(tl.remove_token(0, 2).is_none());
    }

    // -- advance ------------------------------------------------------------

    #[test]
    fn advance_shrinks_front_block() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        append(&mut tl, &catalog, "Attack");
        append(&mut tl, &catalog, "Draw");
        tl.advance(3);
        assert_eq!(widths(&tl.subjects()[0]), vec![2, 1]);
        assert_eq!(tl.start_time(), 3);
    }

    #[test]
    fn advance_evicts_and_continues() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        append(&mut tl, &catalog, "Walk 10");
        append(&mut tl, &catalog, "Attack");
        append(&mut tl, &catalog, "Wait 1");
        let removed = tl.advance(6);
        assert_eq!(removed, 1);
        assert_eq!(widths(&tl.subjects()[0]), vec![2, 1]);
    }

    #[test]
    fn exact_fit_removes_block() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        append(&mut tl, &catalog, "Walk 10");
        append(&mut tl, &catalog, "Wait 2");
        tl.advance(3);
        assert_eq!(widths(&tl.subjects()[0]), vec![2]);
        assert!(tl.subjects()[0].actions.iter().all(|a| a.width_units > 0));
    }

    #[test]
    fn rows_are_consumed_independently() {
        let catalog = catalog();
        let mut tl = timeline_with(&["long", "short", "idle"]);
        append(&mut tl, &catalog, "Equip");
        tl.select(1);
        append(&mut tl, &catalog, "Draw");
        append(&mut tl, &catalog, "Run 10");

        tl.advance(4);
        assert_eq!(widths(&tl.subjects()[0]), vec![2]);
        assert!(tl.subjects()[1].actions.is_empty());
        assert!(tl.subjects()[2].actions.is_empty());
        assert_eq!(tl.start_time(), 4);
    }

    #[test]
    fn advance_conserves_time_per_row() {
        let catalog = catalog();
        let mut tl = Timeline::new(10);
        tl.add_subject("a", true);
        for name in ["Attack", "Defend", "Draw", "Equip"] {
            append(&mut tl, &catalog, name);
        }
        tl.add_subject("b", true);
        for name in ["Shoot", "Throw"] {
            append(&mut tl, &catalog, name);
        }
        let before: Vec<u64> = tl.subjects().iter().map(Subject::queued_units).collect();

        tl.advance(7);

        let budget = 7 * 10;
        for (subject, queued) in tl.subjects().iter().zip(before) {
            let consumed = queued - subject.queued_units();
            assert_eq!(consumed, budget.min(queued));
        }
    }

    #[test]
    fn advance_below_one_second_is_noop() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        append(&mut tl, &catalog, "Attack");
        tl.set_start_time(12);
        assert_eq!(tl.advance(0), 0);
        assert_eq!(tl.advance(-4), 0);
        assert_eq!(widths(&tl.subjects()[0]), vec![5]);
        assert_eq!(tl.start_time(), 12);
    }

    #[test]
    fn advance_turn_uses_turn_duration() {
        let mut tl = timeline_with(&["a"]);
        assert!(tl.set_turn_duration(10));
        assert!(!tl.set_turn_duration(0));
        tl.advance_turn();
        assert_eq!(tl.start_time(), 10);
    }

    #[test]
    fn set_start_time_leaves_queues() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        append(&mut tl, &catalog, "Attack");
        tl.set_start_time(100);
        assert_eq!(tl.start_time(), 100);
        assert_eq!(widths(&tl.subjects()[0]), vec![5]);
    }

    #[test]
    fn ids_are_never_reused() {
        let catalog = catalog();
        let mut tl = timeline_with(&["a"]);
        let first = append(&mut tl, &catalog, "Draw");
        tl.delete_last_action();
        let second = append(&mut tl, &catalog, "Draw");
        assert_ne!(first, second);
    }
}
