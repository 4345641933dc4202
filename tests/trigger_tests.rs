//! Trigger system integration tests.
//!
//! These tests verify that triggers attached through card definitions
//! fire when tasks change the board.

use std::sync::Arc;

use rust_hearth::cards::{CardDefinition, CardId, CardRegistry};
use rust_hearth::core::{Entity, GameConfig, Hero, Player, PlayerId};
use rust_hearth::sync::{ReplayInteractor, SpellTargetResponse, TargetType};
use rust_hearth::tasks::{CombatTask, MetaData, PlaySpellTask, Task};
use rust_hearth::triggers::{Enchant, HealTrigger, TriggerSpec, TriggerType};

fn players() -> (Player, Player, CardRegistry) {
    let registry = CardRegistry::basic();
    let config = GameConfig::default();
    let hero = |name: &str| Hero::new(registry.find_by_name(name).unwrap());
    let p1 = Player::new(PlayerId::new(0), "Player 1", hero("Garrosh Hellscream"), Vec::new(), &config);
    let p2 = Player::new(PlayerId::new(1), "Player 2", hero("Jaina Proudmoore"), Vec::new(), &config);
    (p1, p2, registry)
}

/// Enrage: damage that does not kill raises attack.
#[test]
fn test_berserker_enrages_on_spell_damage() {
    let (mut p1, mut p2, registry) = players();
    p2.field
        .insert(0, Entity::new(registry.find_by_name("Amani Berserker").unwrap()))
        .unwrap();
    p1.hand.push(Entity::new(registry.find_by_name("Moonfire").unwrap()));

    let mut task = PlaySpellTask::new(Arc::new(ReplayInteractor::new()), 0).with_target(SpellTargetResponse {
        target_type: TargetType::OpponentField,
        position: 0,
    });
    assert_eq!(task.run(&mut p1, &mut p2).unwrap(), MetaData::PlaySpellSuccess);

    let berserker = p2.field.get(0).unwrap();
    assert_eq!(berserker.attack, 5);
    assert_eq!(berserker.health, 2);
}

/// Each surviving hit adds the enrage bonus again.
#[test]
fn test_berserker_enrage_stacks() {
    let (mut p1, mut p2, registry) = players();
    p2.field
        .insert(0, Entity::new(registry.find_by_name("Amani Berserker").unwrap()))
        .unwrap();

    for _ in 0..2 {
        p1.hand.push(Entity::new(registry.find_by_name("Moonfire").unwrap()));
        let mut task = PlaySpellTask::new(Arc::new(ReplayInteractor::new()), 0).with_target(SpellTargetResponse {
            target_type: TargetType::OpponentField,
            position: 0,
        });
        assert_eq!(task.run(&mut p1, &mut p2).unwrap(), MetaData::PlaySpellSuccess);
    }

    let berserker = p2.field.get(0).unwrap();
    assert_eq!(berserker.attack, 8);
    assert_eq!(berserker.health, 1);
}

/// Counter damage is fixed before the defender is hit.
#[test]
fn test_counter_attack_uses_attack_before_enrage() {
    let (mut p1, mut p2, registry) = players();
    p1.field
        .insert(0, Entity::new(registry.find_by_name("Chillwind Yeti").unwrap()))
        .unwrap();
    p2.field
        .insert(0, Entity::new(registry.find_by_name("Amani Berserker").unwrap()))
        .unwrap();

    let mut task = CombatTask::new(Arc::new(ReplayInteractor::new())).with_targeting(0, 1);
    assert_eq!(task.run(&mut p1, &mut p2).unwrap(), MetaData::CombatSuccess);

    assert!(p2.field.get(0).is_none());
    assert_eq!(task.outcome().unwrap().defender.attack, 5);
    assert_eq!(p1.field.get(0).unwrap().health, 3);
}

/// Every entity built from one definition carries its own triggers.
#[test]
fn test_copies_buff_independently() {
    let card = Arc::new(
        CardDefinition::minion(CardId::new(50), "Twin", 1, 1, 4).with_trigger(TriggerSpec::Buff {
            on: TriggerType::TakeDamage,
            attack: 1,
            health: 0,
        }),
    );
    let mut first = Entity::new(Arc::clone(&card));
    let second = Entity::new(card);

    first.take_damage(1);
    first.take_damage(1);

    assert_eq!(first.attack, 3);
    assert_eq!(second.attack, 1);
}

/// A detached enchant stops firing.
#[test]
fn test_detached_enchant_is_inert() {
    let card = Arc::new(CardDefinition::minion(CardId::new(51), "Patient", 1, 1, 6));
    let mut minion = Entity::new(card);
    let id = minion.attach(Enchant::new("Regrowth").with_trigger(Box::new(HealTrigger::new(TriggerType::TurnEnd, 2))));

    minion.take_damage(4);
    assert_eq!(minion.notify(TriggerType::TurnEnd), 1);
    assert_eq!(minion.health, 4);

    assert!(minion.detach(id).is_some());
    assert_eq!(minion.notify(TriggerType::TurnEnd), 0);
    assert_eq!(minion.health, 4);
}
