//! Narration events
//!
//! Every engine transition emits at least one event. Events are plain
//! data; `Display` renders the human-readable log line.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::VictoryRewards;
use crate::dice::{format_dice, RollKind, RollResult};
use crate::economy::PowerupKey;

/// Who is acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Enemy,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Player => write!(f, "You"),
            Actor::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Something that happened in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Welcome,
    RunStarted { gold: u64, hp: i32, damage: u32 },
    ShopOpened { gold: u64 },
    ShopClosed,
    Purchased { key: PowerupKey, price: u64, gold_left: u64 },
    FirstStrikeArmed { remaining: u32 },
    RoundBegan { round: u32, enemy_hp: i32, player_first: bool },
    TurnStarted { actor: Actor },
    Rolled { actor: Actor, roll: RollResult },
    NoScoreReroll { actor: Actor },
    DevilsWard,
    LuckyClover,
    AceSaver,
    ManualReroll { rerolls_left: u32 },
    WildDie { index: usize, face: u8 },
    Attacked { actor: Actor, kind: RollKind, value: u32, damage: u32, target_hp: i32 },
    Healed { kind: RollKind, amount: u32, hp: i32 },
    InstantWin { actor: Actor },
    InstantLoss { actor: Actor },
    RoundWon { round: u32, rewards: VictoryRewards },
    RoundLost { round: u32 },
    RunWon,
    RunLost,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Welcome => write!(f, "🎲 Welcome to Cee-lo Roguelike!"),
            GameEvent::RunStarted { gold, hp, damage } => {
                write!(f, "New run: {}HP, {} damage, {}g", hp, damage, gold)
            }
            GameEvent::ShopOpened { gold } => write!(f, "💰 Shop open ({}g)", gold),
            GameEvent::ShopClosed => write!(f, "Leaving the shop"),
            GameEvent::Purchased {
                key,
                price,
                gold_left,
            } => write!(
                f,
                "💰 Bought {} for {}g ({}g left)",
                key.info().name,
                price,
                gold_left
            ),
            GameEvent::FirstStrikeArmed { remaining } => write!(
                f,
                "⚡ First Strike activated! You go first this round! ({} left)",
                remaining
            ),
            GameEvent::RoundBegan {
                round,
                enemy_hp,
                player_first,
            } => {
                write!(f, "🎲 Round {} begins! Enemy: {}HP. ", round, enemy_hp)?;
                if *player_first {
                    write!(f, "You go first this round!")
                } else {
                    write!(f, "Enemy goes first this round!")
                }
            }
            GameEvent::TurnStarted { actor: Actor::Enemy } => write!(f, "💀 Enemy turn..."),
            GameEvent::TurnStarted { actor: Actor::Player } => write!(f, "🎲 Your turn!"),
            GameEvent::Rolled { actor, roll } => {
                let verb = match actor {
                    Actor::Player => "roll",
                    Actor::Enemy => "rolls",
                };
                write!(
                    f,
                    "🎲 {} {}: {} - {}",
                    actor,
                    verb,
                    format_dice(&roll.dice_shown),
                    roll.describe()
                )
            }
            GameEvent::NoScoreReroll { actor } => {
                write!(f, "🔄 {} no score - rolling again (free)", actor)
            }
            GameEvent::DevilsWard => {
                write!(f, "🛡️ Devil's Ward activates! Rerolling to avoid 1-2-3")
            }
            GameEvent::LuckyClover => {
                write!(f, "🍀 Lucky Clover activates! Rerolling towards 4-5-6")
            }
            GameEvent::AceSaver => write!(f, "✨ ACE SAVER! 1-1-1 → 6-6-6"),
            GameEvent::ManualReroll { rerolls_left } => {
                write!(f, "🔄 Manual reroll! ({} left)", rerolls_left)
            }
            GameEvent::WildDie { index, face } => {
                write!(f, "🎯 WILD DIE! Die {} set to {}", index + 1, face)
            }
            GameEvent::Attacked {
                actor,
                kind,
                value,
                damage,
                target_hp,
            } => {
                let label = if *kind == RollKind::Trips { "TRIPS" } else { "Point" };
                match actor {
                    Actor::Player => write!(
                        f,
                        "⚔️ {} {}! {} damage! (enemy at {}HP)",
                        label, value, damage, target_hp
                    ),
                    Actor::Enemy => write!(
                        f,
                        "⚔️ Enemy {} attack! {} damage! (you are at {}HP)",
                        label.to_lowercase(),
                        damage,
                        target_hp
                    ),
                }
            }
            GameEvent::Healed { kind, amount, hp } => {
                let label = if *kind == RollKind::Trips {
                    "TRIPS SHIELD"
                } else {
                    "Point defense"
                };
                write!(f, "🛡️ {}! +{} HP! ({}HP)", label, amount, hp)
            }
            GameEvent::InstantWin { actor: Actor::Player } => {
                write!(f, "🎉 4-5-6! INSTANT VICTORY!")
            }
            GameEvent::InstantWin { actor: Actor::Enemy } => {
                write!(f, "💀 Enemy rolled 4-5-6! INSTANT DEFEAT!")
            }
            GameEvent::InstantLoss { actor: Actor::Player } => {
                write!(f, "💀 1-2-3! INSTANT DEFEAT!")
            }
            GameEvent::InstantLoss { actor: Actor::Enemy } => {
                write!(f, "🎉 Enemy rolled 1-2-3! INSTANT VICTORY!")
            }
            GameEvent::RoundWon { round, rewards } => write!(
                f,
                "🎉 Round {} cleared! +{}g, +{}HP, +{}DMG",
                round, rewards.gold, rewards.hp, rewards.damage
            ),
            GameEvent::RoundLost { round } => {
                write!(f, "💀 Defeated in round {}! Run ended...", round)
            }
            GameEvent::RunWon => write!(f, "🏆 Every enemy defeated! Run complete!"),
            GameEvent::RunLost => write!(f, "💀 Run over. Start a new run to try again."),
        }
    }
}

/// Ordered record of events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and trace it
    pub fn push(&mut self, event: GameEvent) {
        debug!(target: "ceelo::events", "{}", event);
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Log lines in order
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}
