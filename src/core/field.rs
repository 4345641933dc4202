//! A player's battlefield.
//!
//! The field is an ordered row of slots. A slot is normally occupied; a
//! minion that dies during an action leaves its slot empty until the agent
//! compacts the field after the action, so positions stay stable while a
//! single task resolves.
//!
//! Two position semantics exist and every caller must pick one:
//! - **insertion** (`0..=len`): `len` means "append at the end"
//! - **addressing** (`0..len`): must name an existing slot

use smallvec::SmallVec;

use super::entity::Entity;

/// Position-addressable row of minion slots.
#[derive(Debug, Default)]
pub struct Field {
    slots: SmallVec<[Option<Entity>; 7]>,
    capacity: usize,
}

impl Field {
    /// Create an empty field holding at most `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SmallVec::new(),
            capacity,
        }
    }

    /// Number of slots, occupied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Whether `position` is a valid insertion point (`0..=len`).
    #[must_use]
    pub fn can_insert_at(&self, position: usize) -> bool {
        position <= self.slots.len() && !self.is_full()
    }

    /// Insert a minion at an insertion position (`0..=len`).
    ///
    /// Gives the entity back if the field is full or the position is out
    /// of range; the field is unchanged in that case.
    pub fn insert(&mut self, position: usize, entity: Entity) -> Result<(), Entity> {
        if !self.can_insert_at(position) {
            return Err(entity);
        }
        self.slots.insert(position, Some(entity));
        Ok(())
    }

    /// Occupant of an addressed slot (`0..len`). `None` for an empty slot
    /// or an out-of-range position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Entity> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Entity> {
        self.slots.get_mut(position).and_then(Option::as_mut)
    }

    /// Take the occupant out of a slot, leaving the slot empty.
    pub fn vacate(&mut self, position: usize) -> Option<Entity> {
        self.slots.get_mut(position).and_then(Option::take)
    }

    /// Drop empty slots and dead minions. Returns the removed minions.
    pub fn compact(&mut self) -> Vec<Entity> {
        let mut removed = Vec::new();
        let mut kept: SmallVec<[Option<Entity>; 7]> = SmallVec::new();
        for slot in self.slots.drain(..) {
            match slot {
                Some(entity) if entity.is_dead() => removed.push(entity),
                Some(entity) => kept.push(Some(entity)),
                None => {}
            }
        }
        self.slots = kept;
        removed
    }

    /// Iterate over slots in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Entity>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Iterate over occupants with their positions.
    pub fn minions(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e)))
    }

    pub fn minions_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};
    use std::sync::Arc;

    fn minion(name: &str, health: i32) -> Entity {
        Entity::new(Arc::new(CardDefinition::minion(CardId::new(1), name, 1, 1, health)))
    }

    #[test]
    fn test_insert_semantics() {
        let mut field = Field::new(7);

        assert!(field.insert(0, minion("A", 1)).is_ok());
        assert!(field.insert(1, minion("C", 1)).is_ok()); // append
        assert!(field.insert(1, minion("B", 1)).is_ok());
        assert!(field.insert(5, minion("X", 1)).is_err());

        let names: Vec<_> = field.minions().map(|(_, e)| e.name().to_string()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_insert_full() {
        let mut field = Field::new(2);
        field.insert(0, minion("A", 1)).unwrap();
        field.insert(1, minion("B", 1)).unwrap();

        assert!(field.is_full());
        let back = field.insert(0, minion("C", 1)).unwrap_err();
        assert_eq!(back.name(), "C");
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_addressing() {
        let mut field = Field::new(7);
        field.insert(0, minion("A", 1)).unwrap();

        assert!(field.get(0).is_some());
        assert!(field.get(1).is_none());

        let taken = field.vacate(0);
        assert_eq!(taken.unwrap().name(), "A");
        assert_eq!(field.len(), 1);
        assert!(field.get(0).is_none());
    }

    #[test]
    fn test_compact() {
        let mut field = Field::new(7);
        field.insert(0, minion("A", 1)).unwrap();
        field.insert(1, minion("B", 1)).unwrap();
        field.insert(2, minion("C", 1)).unwrap();
        field.vacate(0);
        field.get_mut(1).unwrap().take_damage(5);

        let removed = field.compact();

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name(), "B");
        assert_eq!(field.len(), 1);
        assert_eq!(field.get(0).unwrap().name(), "C");
    }
}
