//! Game session facade
//!
//! [`Engine`] owns one run: its [`RunState`], the round in progress, the
//! turn order, the dice, and the narration log. Presentation code reads
//! snapshots through the query methods and drives the game with the
//! command methods; it never mutates state directly.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combat::{enemy_hp, resolve_attack, resolve_defend, CombatState};
use crate::config::EngineConfig;
use crate::dice::{DiceSource, RandomDice, RollResult};
use crate::economy::{
    active_powerups, purchase, shop_entries, ActivePowerup, PowerupKey, Purchase, ShopEntry,
};
use crate::error::EngineError;
use crate::events::{EventLog, GameEvent};
use crate::state::RunState;
use crate::turn::{
    apply_enemy_turn, apply_player_action, apply_player_roll, apply_round_defeat,
    apply_round_victory, Phase, PlayerAction, RoundOutcome, TurnOrder,
};

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Phase after the command
    pub phase: Phase,
    /// Player roll produced by the command, if any
    pub roll: Option<RollResult>,
    /// Narration emitted by the command
    pub events: Vec<GameEvent>,
}

/// One game session
#[derive(Debug)]
pub struct Engine<D: DiceSource = RandomDice<StdRng>> {
    config: EngineConfig,
    dice: D,
    phase: Phase,
    run: RunState,
    combat: Option<CombatState>,
    order: TurnOrder,
    log: EventLog,
}

impl Engine<RandomDice<StdRng>> {
    /// Engine with random dice, seeded from `config.seed` when set
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let dice = match config.seed {
            Some(seed) => {
                debug!("Seeding dice with {}", seed);
                RandomDice::seeded(seed)
            }
            None => RandomDice::from_os(),
        };
        Self::with_dice(config, dice)
    }
}

impl<D: DiceSource> Engine<D> {
    /// Engine with a caller-provided dice source
    pub fn with_dice(config: EngineConfig, dice: D) -> Result<Self, EngineError> {
        config.validate()?;
        let run = RunState::new(&config);
        let mut log = EventLog::new();
        log.push(GameEvent::Welcome);
        Ok(Self {
            config,
            dice,
            phase: Phase::Menu,
            run,
            combat: None,
            order: TurnOrder::new(),
            log,
        })
    }

    // ---- queries ----

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current run snapshot
    pub fn run(&self) -> &RunState {
        &self.run
    }

    /// Round in progress, if any
    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    /// Catalog with current prices, owned counts, and affordability
    pub fn shop(&self) -> Vec<ShopEntry> {
        shop_entries(&self.run)
    }

    /// Owned powerups in catalog order
    pub fn active_powerups(&self) -> Vec<ActivePowerup> {
        active_powerups(&self.run.powerups)
    }

    /// Enemy HP for the round about to begin
    pub fn enemy_hp_preview(&self) -> i32 {
        enemy_hp(self.run.round, self.run.base_hp, self.config.starting_hp)
    }

    /// Whether first strike is armed for the next round
    pub fn first_strike_armed(&self) -> bool {
        self.order.first_strike_armed()
    }

    /// Whether the player would act first if the next round began now
    pub fn next_round_player_first(&self) -> bool {
        self.order.peek()
    }

    /// The engine's dice source
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Cumulative narration since the engine was created or restarted
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Roll awaiting an action
    pub fn pending_roll(&self) -> Option<RollResult> {
        self.combat.as_ref().and_then(|c| c.pending_roll)
    }

    /// Damage an attack with the pending roll would deal
    pub fn pending_attack_preview(&self) -> Option<u32> {
        let roll = self.pending_roll()?;
        let double_down = self.run.powerups.owns(PowerupKey::DoubleDown);
        Some(resolve_attack(&roll, self.run.base_damage, double_down))
    }

    /// HP a defend with the pending roll would restore
    pub fn pending_heal_preview(&self) -> Option<u32> {
        self.pending_roll().map(|roll| resolve_defend(&roll))
    }

    // ---- commands ----

    /// Start a fresh run
    pub fn start_run(&mut self) -> Result<Step, EngineError> {
        self.require(
            "start a run",
            &[Phase::Menu, Phase::RunVictory, Phase::RunDefeat],
        )?;

        self.reset_run();
        self.phase = Phase::RoundStart;
        info!(
            gold = self.run.gold,
            hp = self.run.base_hp,
            damage = self.run.base_damage,
            "Run started"
        );
        let events = vec![GameEvent::RunStarted {
            gold: self.run.gold,
            hp: self.run.base_hp,
            damage: self.run.base_damage,
        }];
        Ok(self.commit(events, None))
    }

    /// Spend a First Strike to act first next round
    pub fn use_first_strike(&mut self) -> Result<Step, EngineError> {
        self.require("use first strike", &[Phase::RoundStart])?;

        if self.order.first_strike_armed() {
            return Err(EngineError::invalid("first strike is already active"));
        }
        if !self.run.powerups.owns(PowerupKey::FirstStrike) {
            return Err(EngineError::invalid("no first strike owned"));
        }

        self.run.powerups.consume(PowerupKey::FirstStrike);
        self.order.arm_first_strike();
        let remaining = self.run.powerups.count(PowerupKey::FirstStrike);
        debug!("First strike armed, {} left", remaining);
        Ok(self.commit(vec![GameEvent::FirstStrikeArmed { remaining }], None))
    }

    /// Begin the next round. Runs the enemy turn when the enemy acts first.
    pub fn begin_round(&mut self) -> Result<Step, EngineError> {
        self.require("begin a round", &[Phase::RoundStart])?;

        let player_first = self.order.next_round();
        let enemy_hp = self.enemy_hp_preview();
        let mut combat = CombatState::new(
            enemy_hp,
            self.run.base_hp,
            self.run.rerolls_per_round(),
            self.run.wild_die_uses(),
            player_first,
        );
        info!(
            round = self.run.round,
            enemy_hp, player_first, "Round started"
        );

        let mut events = vec![GameEvent::RoundBegan {
            round: self.run.round,
            enemy_hp,
            player_first,
        }];

        let outcome = if player_first {
            RoundOutcome::Ongoing
        } else {
            apply_enemy_turn(
                &self.run,
                &mut combat,
                &mut self.dice,
                &self.config,
                &mut events,
            )
        };

        self.combat = Some(combat);
        self.settle(outcome, &mut events);
        Ok(self.commit(events, None))
    }

    /// Roll for the player's turn
    pub fn roll_player_dice(&mut self) -> Result<Step, EngineError> {
        self.require("roll", &[Phase::PlayerTurn])?;
        let combat = self
            .combat
            .as_mut()
            .ok_or_else(|| EngineError::invalid("no round in progress"))?;

        let mut events = Vec::new();
        let (roll, outcome) = apply_player_roll(&self.run, combat, &mut self.dice, &mut events);
        self.settle(outcome, &mut events);
        Ok(self.commit(events, Some(roll)))
    }

    /// Attack with the pending roll
    pub fn choose_attack(&mut self) -> Result<Step, EngineError> {
        self.act("attack", PlayerAction::Attack)
    }

    /// Defend with the pending roll
    pub fn choose_defend(&mut self) -> Result<Step, EngineError> {
        self.act("defend", PlayerAction::Defend)
    }

    /// Discard the pending roll for a fresh one
    pub fn use_manual_reroll(&mut self) -> Result<Step, EngineError> {
        self.act("reroll", PlayerAction::Reroll)
    }

    /// Set one die of the pending roll to `face`
    pub fn use_wild_die(&mut self, index: usize, face: u8) -> Result<Step, EngineError> {
        self.act("use the wild die", PlayerAction::WildDie { index, face })
    }

    /// Open the shop between rounds
    pub fn enter_shop(&mut self) -> Result<Step, EngineError> {
        self.require("enter the shop", &[Phase::RoundStart])?;
        self.phase = Phase::Shop;
        Ok(self.commit(vec![GameEvent::ShopOpened { gold: self.run.gold }], None))
    }

    /// Buy one unit of a powerup
    pub fn purchase_powerup(&mut self, key: PowerupKey) -> Result<Purchase, EngineError> {
        self.require("purchase", &[Phase::Shop])?;

        let receipt = match purchase(&mut self.run, key) {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!("Purchase rejected: {}", err);
                return Err(err);
            }
        };
        info!(
            powerup = %key,
            price = receipt.price,
            gold = receipt.gold_left,
            "Powerup purchased"
        );
        self.commit(
            vec![GameEvent::Purchased {
                key,
                price: receipt.price,
                gold_left: receipt.gold_left,
            }],
            None,
        );
        Ok(receipt)
    }

    /// Buy a powerup by its catalog key or name
    pub fn purchase_powerup_named(&mut self, name: &str) -> Result<Purchase, EngineError> {
        let key: PowerupKey = name.parse()?;
        self.purchase_powerup(key)
    }

    /// Leave the shop
    pub fn continue_from_shop(&mut self) -> Result<Step, EngineError> {
        self.require("leave the shop", &[Phase::Shop])?;
        self.phase = Phase::RoundStart;
        Ok(self.commit(vec![GameEvent::ShopClosed], None))
    }

    /// Abandon everything and return to the menu
    pub fn restart(&mut self) -> Step {
        info!(phase = %self.phase, round = self.run.round, "Restarting");
        self.reset_run();
        self.phase = Phase::Menu;
        self.log.clear();
        self.commit(vec![GameEvent::Welcome], None)
    }

    // ---- internals ----

    fn require(&self, command: &'static str, allowed: &[Phase]) -> Result<(), EngineError> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        debug!("Rejected '{}' during {}", command, self.phase);
        Err(EngineError::IllegalTransition {
            command,
            phase: self.phase,
        })
    }

    fn act(&mut self, command: &'static str, action: PlayerAction) -> Result<Step, EngineError> {
        if self.phase == Phase::PlayerTurn {
            debug!("Rejected '{}': nothing rolled yet", command);
            return Err(EngineError::invalid("no scoring roll is pending"));
        }
        self.require(command, &[Phase::ActionPending])?;
        let combat = self
            .combat
            .as_mut()
            .ok_or_else(|| EngineError::invalid("no round in progress"))?;

        let mut events = Vec::new();
        let outcome = apply_player_action(
            &self.run,
            combat,
            &mut self.dice,
            &self.config,
            action,
            &mut events,
        )?;
        let roll = match action {
            PlayerAction::Reroll | PlayerAction::WildDie { .. } => events
                .iter()
                .rev()
                .find_map(|e| match e {
                    GameEvent::Rolled { roll, .. } => Some(*roll),
                    _ => None,
                }),
            _ => None,
        };
        self.settle(outcome, &mut events);
        Ok(self.commit(events, roll))
    }

    /// Move to the phase implied by a round outcome
    fn settle(&mut self, outcome: RoundOutcome, events: &mut Vec<GameEvent>) {
        match outcome {
            RoundOutcome::Ongoing => {
                self.phase = if self.pending_roll().is_some() {
                    Phase::ActionPending
                } else {
                    Phase::PlayerTurn
                };
            }
            RoundOutcome::Won => {
                self.combat = None;
                self.phase = if apply_round_victory(&mut self.run, events) {
                    Phase::RunVictory
                } else {
                    Phase::RoundStart
                };
            }
            RoundOutcome::Lost => {
                self.combat = None;
                apply_round_defeat(&self.run, events);
                self.phase = Phase::RunDefeat;
            }
        }
    }

    fn commit(&mut self, events: Vec<GameEvent>, roll: Option<RollResult>) -> Step {
        self.log.extend(events.iter().cloned());
        Step {
            phase: self.phase,
            roll,
            events,
        }
    }

    fn reset_run(&mut self) {
        self.run = RunState::new(&self.config);
        self.combat = None;
        self.order = TurnOrder::new();
    }
}
