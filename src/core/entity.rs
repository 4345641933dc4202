//! Game entities: cards in play, in hand or in the deck, and heroes.
//!
//! An `Entity` is owned by exactly one container of a `Player` (deck,
//! hand, field slot, hero). Nothing outside that container keeps a
//! reference to it; tasks address entities by position for the duration
//! of a single call and re-validate positions every time.
//!
//! Each entity keeps an `Arc` handle to its `CardDefinition` and its own
//! mutable combat stats. Triggers declared on the definition are built
//! fresh for every entity and attached as one enchant.

use std::sync::Arc;

use crate::cards::{CardDefinition, CardType};
use crate::triggers::{Enchant, EnchantId, TriggerType};

/// A card instance with runtime state.
#[derive(Debug)]
pub struct Entity {
    card: Arc<CardDefinition>,

    /// Current attack.
    pub attack: i32,

    /// Current health. At or below zero the entity is dead.
    pub health: i32,

    /// Health cap for healing.
    pub max_health: i32,

    /// Cannot attack this turn (summoned this turn, or already attacked).
    pub exhausted: bool,

    enchants: Vec<Enchant>,
    next_enchant: u32,
}

impl Entity {
    /// Create an entity from its definition, attaching the card's triggers.
    #[must_use]
    pub fn new(card: Arc<CardDefinition>) -> Self {
        let mut entity = Self {
            attack: card.attack,
            health: card.health,
            max_health: card.health,
            exhausted: false,
            enchants: Vec::new(),
            next_enchant: 0,
            card,
        };

        if !entity.card.triggers.is_empty() {
            let enchant = entity
                .card
                .triggers
                .iter()
                .fold(Enchant::new(entity.card.name.clone()), |enchant, spec| {
                    enchant.with_trigger(spec.build())
                });
            entity.attach(enchant);
        }

        entity
    }

    /// The definition this entity was created from.
    #[must_use]
    pub fn card(&self) -> &Arc<CardDefinition> {
        &self.card
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card.card_type
    }

    #[must_use]
    pub fn cost(&self) -> u8 {
        self.card.cost
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Deal damage and raise `TakeDamage`. Non-positive amounts are ignored.
    ///
    /// Returns the damage dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        self.health -= amount;
        self.notify(TriggerType::TakeDamage);
        amount
    }

    /// Heal up to `max_health` and raise `Heal` if anything was restored.
    ///
    /// Returns the health restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = self.restore_health(amount);
        if restored > 0 {
            self.notify(TriggerType::Heal);
        }
        restored
    }

    /// Heal up to `max_health` without raising any event.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, (self.max_health - self.health).max(0));
        self.health += restored;
        restored
    }

    /// Add to attack and health. Health buffs also raise the cap.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack += attack;
        self.health += health;
        self.max_health += health;
    }

    /// Attach an enchant and return its id on this entity.
    pub fn attach(&mut self, mut enchant: Enchant) -> EnchantId {
        let id = EnchantId(self.next_enchant);
        self.next_enchant += 1;
        enchant.set_id(id);
        self.enchants.push(enchant);
        id
    }

    /// Remove an enchant. Its triggers are returned to the caller and will
    /// never be activated by this entity again.
    pub fn detach(&mut self, id: EnchantId) -> Option<Enchant> {
        let index = self.enchants.iter().position(|e| e.id() == id)?;
        Some(self.enchants.remove(index))
    }

    #[must_use]
    pub fn enchant_count(&self) -> usize {
        self.enchants.len()
    }

    /// Raise an event on this entity, activating every matching trigger.
    ///
    /// Enchants are taken out for the duration of the activation so each
    /// trigger receives the owner mutably; an event raised from inside a
    /// trigger therefore reaches no triggers. Enchants attached during
    /// activation are kept, after the existing ones.
    ///
    /// Returns how many triggers activated.
    pub fn notify(&mut self, event: TriggerType) -> usize {
        let mut enchants = std::mem::take(&mut self.enchants);
        let mut fired = 0;
        for enchant in &enchants {
            fired += enchant.activate(event, self);
        }
        enchants.append(&mut self.enchants);
        self.enchants = enchants;
        fired
    }
}

/// A player's hero and equipped weapon.
#[derive(Debug)]
pub struct Hero {
    pub entity: Entity,
    pub weapon: Option<Entity>,
}

impl Hero {
    #[must_use]
    pub fn new(card: Arc<CardDefinition>) -> Self {
        Self {
            entity: Entity::new(card),
            weapon: None,
        }
    }

    /// Equip a weapon, returning the one it replaces.
    pub fn equip(&mut self, weapon: Entity) -> Option<Entity> {
        self.weapon.replace(weapon)
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.entity.health
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.entity.is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::triggers::{BuffTrigger, HealTrigger, TriggerSpec};

    fn card(attack: i32, health: i32) -> Arc<CardDefinition> {
        Arc::new(CardDefinition::minion(CardId::new(1), "Minion", 2, attack, health))
    }

    #[test]
    fn test_new_copies_stats() {
        let entity = Entity::new(card(3, 2));

        assert_eq!(entity.name(), "Minion");
        assert_eq!(entity.cost(), 2);
        assert_eq!(entity.card_type(), CardType::Minion);
        assert_eq!((entity.attack, entity.health, entity.max_health), (3, 2, 2));
        assert!(!entity.exhausted);
        assert_eq!(entity.enchant_count(), 0);
    }

    #[test]
    fn test_damage_and_death() {
        let mut entity = Entity::new(card(1, 3));

        assert_eq!(entity.take_damage(2), 2);
        assert!(!entity.is_dead());
        assert_eq!(entity.take_damage(0), 0);
        entity.take_damage(1);
        assert!(entity.is_dead());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut entity = Entity::new(card(1, 5));
        entity.take_damage(3);

        assert_eq!(entity.heal(10), 3);
        assert_eq!(entity.health, 5);
        assert_eq!(entity.heal(1), 0);
    }

    #[test]
    fn test_buff_raises_cap() {
        let mut entity = Entity::new(card(1, 1));
        entity.buff(4, 4);
        entity.take_damage(2);
        entity.heal(10);

        assert_eq!(entity.attack, 5);
        assert_eq!(entity.health, 5);
    }

    #[test]
    fn test_definition_triggers_attached() {
        let def = CardDefinition::minion(CardId::new(2), "Berserker", 2, 2, 3).with_trigger(
            TriggerSpec::Buff {
                on: TriggerType::TakeDamage,
                attack: 3,
                health: 0,
            },
        );
        let mut entity = Entity::new(Arc::new(def));
        assert_eq!(entity.enchant_count(), 1);

        entity.take_damage(1);
        assert_eq!(entity.attack, 5);
    }

    #[test]
    fn test_detached_trigger_never_fires() {
        let mut entity = Entity::new(card(1, 5));
        let id = entity.attach(
            Enchant::new("Temp").with_trigger(Box::new(BuffTrigger::new(TriggerType::TurnEnd, 1, 0))),
        );

        assert_eq!(entity.notify(TriggerType::TurnEnd), 1);
        assert!(entity.detach(id).is_some());
        assert_eq!(entity.notify(TriggerType::TurnEnd), 0);
        assert_eq!(entity.attack, 2);
        assert!(entity.detach(id).is_none());
    }

    #[test]
    fn test_heal_trigger_does_not_recurse() {
        let mut entity = Entity::new(card(1, 10));
        entity.attach(
            Enchant::new("Echo").with_trigger(Box::new(HealTrigger::new(TriggerType::Heal, 1))),
        );
        entity.take_damage(5);

        assert_eq!(entity.heal(2), 2);
        assert_eq!(entity.health, 8);
    }

    #[test]
    fn test_hero_equip() {
        let mut hero = Hero::new(Arc::new(CardDefinition::hero(CardId::new(0), "Hero", 30)));
        let axe = Arc::new(CardDefinition::weapon(CardId::new(3), "Axe", 2, 3, 2));

        assert!(hero.equip(Entity::new(axe.clone())).is_none());
        assert!(hero.equip(Entity::new(axe)).is_some());
        assert_eq!(hero.health(), 30);
        assert!(!hero.is_dead());
    }
}
