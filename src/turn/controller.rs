//! Round state machine
//!
//! Synchronous transitions over a run and the round in progress. Each
//! function mutates the state it is handed, appends narration to `events`,
//! and reports whether the round is still going.
//!
//! Validation always happens before the first mutation, so an `Err`
//! leaves both states untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::{
    resolve_attack, resolve_defend, resolve_enemy_attack, CombatState, VictoryRewards,
};
use crate::config::EngineConfig;
use crate::dice::{
    analyze_roll, apply_luck_modifiers, roll_three, DiceModifiers, DiceSource, RollKind,
    RollResult, DICE_COUNT,
};
use crate::economy::PowerupKey;
use crate::error::EngineError;
use crate::events::{Actor, GameEvent};
use crate::state::RunState;

/// State of the round after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Round continues. The player either holds a pending roll or must roll.
    Ongoing,
    /// Player won the round
    Won,
    /// Player lost the round
    Lost,
}

impl RoundOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundOutcome::Ongoing)
    }
}

/// What the player does with a pending roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Defend,
    /// Spend a manual reroll on a fresh roll
    Reroll,
    /// Override one die face
    WildDie { index: usize, face: u8 },
}

/// How a roll loop classifies and biases its rolls
#[derive(Debug, Clone, Copy)]
struct RollRules {
    actor: Actor,
    modifiers: DiceModifiers,
    luck: bool,
    ace_saver: bool,
}

/// Roll until the result is not NoScore. NoScore rerolls are free.
fn roll_until_scoring<D: DiceSource + ?Sized>(
    dice: &mut D,
    combat: &mut CombatState,
    rules: RollRules,
    events: &mut Vec<GameEvent>,
) -> RollResult {
    let mods = &rules.modifiers;
    loop {
        let mut rolled = roll_three(dice, mods);

        if rules.luck {
            let luck = apply_luck_modifiers(
                dice,
                rolled,
                mods.lucky_clover_level,
                mods.devils_ward_level,
            );
            if luck.devils_ward {
                events.push(GameEvent::DevilsWard);
            }
            if luck.lucky_clover {
                events.push(GameEvent::LuckyClover);
            }
            rolled = luck.dice;
        }

        let result = analyze_roll(
            rolled,
            mods.point_boost,
            rules.ace_saver && mods.ace_saver,
            combat.used_ace_saver,
        );
        debug!("{:?} rolled {:?} -> {} {}", rules.actor, rolled, result.kind, result.value);

        if result.consumed_ace_saver {
            combat.used_ace_saver = true;
            events.push(GameEvent::AceSaver);
        }
        events.push(GameEvent::Rolled {
            actor: rules.actor,
            roll: result,
        });

        if result.kind != RollKind::NoScore {
            return result;
        }
        events.push(GameEvent::NoScoreReroll { actor: rules.actor });
    }
}

/// Round outcome of an instant roll from `actor`'s point of view
fn instant_outcome(actor: Actor, kind: RollKind, events: &mut Vec<GameEvent>) -> RoundOutcome {
    match kind {
        RollKind::InstantWin => {
            events.push(GameEvent::InstantWin { actor });
            match actor {
                Actor::Player => RoundOutcome::Won,
                Actor::Enemy => RoundOutcome::Lost,
            }
        }
        RollKind::InstantLoss => {
            events.push(GameEvent::InstantLoss { actor });
            match actor {
                Actor::Player => RoundOutcome::Lost,
                Actor::Enemy => RoundOutcome::Won,
            }
        }
        _ => RoundOutcome::Ongoing,
    }
}

/// Park a player roll: instant rolls end the round, scoring rolls wait for an action
fn settle_player_roll(
    combat: &mut CombatState,
    roll: RollResult,
    events: &mut Vec<GameEvent>,
) -> RoundOutcome {
    if roll.kind.is_instant() {
        combat.pending_roll = None;
        return instant_outcome(Actor::Player, roll.kind, events);
    }
    combat.pending_roll = Some(roll);
    RoundOutcome::Ongoing
}

/// Enemy rolls and acts. Enemies roll plain dice and always attack.
pub fn apply_enemy_turn<D: DiceSource + ?Sized>(
    run: &RunState,
    combat: &mut CombatState,
    dice: &mut D,
    config: &EngineConfig,
    events: &mut Vec<GameEvent>,
) -> RoundOutcome {
    events.push(GameEvent::TurnStarted { actor: Actor::Enemy });

    let rules = RollRules {
        actor: Actor::Enemy,
        modifiers: DiceModifiers::none(),
        luck: false,
        ace_saver: false,
    };
    let roll = roll_until_scoring(dice, combat, rules, events);
    combat.last_enemy_roll = Some(roll);

    if roll.kind.is_instant() {
        return instant_outcome(Actor::Enemy, roll.kind, events);
    }

    let damage = resolve_enemy_attack(&roll, run.base_damage, config.enemy_damage_multiplier);
    combat.player.take_damage(damage);
    debug!(
        "Enemy hit for {}: player at {}/{}",
        damage, combat.player.hp, combat.player.max_hp
    );
    events.push(GameEvent::Attacked {
        actor: Actor::Enemy,
        kind: roll.kind,
        value: roll.value,
        damage,
        target_hp: combat.player.hp,
    });

    if combat.player.is_dead() {
        RoundOutcome::Lost
    } else {
        RoundOutcome::Ongoing
    }
}

/// Player's automatic roll: full modifiers, luck on every roll, ace saver live
pub fn apply_player_roll<D: DiceSource + ?Sized>(
    run: &RunState,
    combat: &mut CombatState,
    dice: &mut D,
    events: &mut Vec<GameEvent>,
) -> (RollResult, RoundOutcome) {
    events.push(GameEvent::TurnStarted { actor: Actor::Player });

    let rules = RollRules {
        actor: Actor::Player,
        modifiers: DiceModifiers::from_powerups(&run.powerups),
        luck: true,
        ace_saver: true,
    };
    let roll = roll_until_scoring(dice, combat, rules, events);
    let outcome = settle_player_roll(combat, roll, events);
    (roll, outcome)
}

/// Act on the pending roll.
///
/// Attack and defend hand the turn to the enemy unless the enemy died.
/// Reroll and wild die leave the player holding a new roll.
pub fn apply_player_action<D: DiceSource + ?Sized>(
    run: &RunState,
    combat: &mut CombatState,
    dice: &mut D,
    config: &EngineConfig,
    action: PlayerAction,
    events: &mut Vec<GameEvent>,
) -> Result<RoundOutcome, EngineError> {
    let pending = match combat.pending_roll {
        Some(roll) if roll.kind.is_scoring() => roll,
        _ => return Err(EngineError::invalid("no scoring roll is pending")),
    };

    match action {
        PlayerAction::Attack => {
            combat.pending_roll = None;
            let double_down = run.powerups.owns(PowerupKey::DoubleDown);
            let damage = resolve_attack(&pending, run.base_damage, double_down);
            combat.enemy.take_damage(damage);
            debug!("Player hit for {}: enemy at {}", damage, combat.enemy.hp);
            events.push(GameEvent::Attacked {
                actor: Actor::Player,
                kind: pending.kind,
                value: pending.value,
                damage,
                target_hp: combat.enemy.hp,
            });

            if combat.enemy.is_dead() {
                return Ok(RoundOutcome::Won);
            }
            Ok(apply_enemy_turn(run, combat, dice, config, events))
        }
        PlayerAction::Defend => {
            combat.pending_roll = None;
            let amount = resolve_defend(&pending);
            combat.player.heal(amount);
            debug!("Player healed {}: now {}", amount, combat.player.hp);
            events.push(GameEvent::Healed {
                kind: pending.kind,
                amount,
                hp: combat.player.hp,
            });
            Ok(apply_enemy_turn(run, combat, dice, config, events))
        }
        PlayerAction::Reroll => {
            if combat.rerolls_left == 0 {
                return Err(EngineError::invalid("no rerolls left this round"));
            }
            combat.rerolls_left -= 1;
            combat.pending_roll = None;
            events.push(GameEvent::ManualReroll {
                rerolls_left: combat.rerolls_left,
            });
            let roll = roll_until_scoring(dice, combat, manual_rules(run), events);
            Ok(settle_player_roll(combat, roll, events))
        }
        PlayerAction::WildDie { index, face } => {
            if combat.wild_die_uses_left == 0 {
                return Err(EngineError::invalid("no wild die uses left this round"));
            }
            if index >= DICE_COUNT {
                return Err(EngineError::invalid(format!(
                    "die index {} out of range 0..{}",
                    index, DICE_COUNT
                )));
            }
            if !(1..=6).contains(&face) {
                return Err(EngineError::invalid(format!(
                    "die face {} out of range 1..=6",
                    face
                )));
            }

            combat.wild_die_uses_left -= 1;
            let mut dice_shown = pending.dice_shown;
            dice_shown[index] = face;
            events.push(GameEvent::WildDie { index, face });

            let rules = manual_rules(run);
            let mut roll = analyze_roll(dice_shown, rules.modifiers.point_boost, false, false);
            events.push(GameEvent::Rolled {
                actor: Actor::Player,
                roll,
            });
            if roll.kind == RollKind::NoScore {
                events.push(GameEvent::NoScoreReroll {
                    actor: Actor::Player,
                });
                roll = roll_until_scoring(dice, combat, rules, events);
            }
            Ok(settle_player_roll(combat, roll, events))
        }
    }
}

/// Manual rerolls use the player's dice powerups without luck or the ace saver
fn manual_rules(run: &RunState) -> RollRules {
    RollRules {
        actor: Actor::Player,
        modifiers: DiceModifiers::from_powerups(&run.powerups),
        luck: false,
        ace_saver: false,
    }
}

/// Apply rewards for the current round and advance. Returns true once the run is complete.
pub fn apply_round_victory(run: &mut RunState, events: &mut Vec<GameEvent>) -> bool {
    let round = run.round;
    let rewards = VictoryRewards::for_round(round);

    run.grant_gold(rewards.gold, "round cleared");
    run.base_hp += rewards.hp;
    run.base_damage += rewards.damage;
    run.round += 1;

    info!(
        round,
        gold = run.gold,
        base_hp = run.base_hp,
        base_damage = run.base_damage,
        "Round cleared"
    );
    events.push(GameEvent::RoundWon { round, rewards });

    let complete = run.is_complete();
    if complete {
        info!(rounds = run.max_rounds, "Run complete");
        events.push(GameEvent::RunWon);
    }
    complete
}

/// Record a lost round. The run is over.
pub fn apply_round_defeat(run: &RunState, events: &mut Vec<GameEvent>) {
    info!(round = run.round, gold = run.gold, "Round lost");
    events.push(GameEvent::RoundLost { round: run.round });
    events.push(GameEvent::RunLost);
}
