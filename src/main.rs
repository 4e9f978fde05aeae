//! ceelo_sim - headless Cee-lo run simulator
//!
//! Plays full runs with a simple automatic strategy and prints a summary.

use std::path::PathBuf;

use anyhow::{bail, Result};
use ceelo::dice::{DiceSource, RollKind};
use ceelo::economy::{ActivePowerup, PowerupKey};
use ceelo::{Engine, EngineConfig, Phase};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cee-lo run simulator
#[derive(Parser, Debug)]
#[command(
    name = "ceelo_sim",
    version,
    about = "Play Cee-lo roguelike runs automatically"
)]
struct Args {
    /// Seed for the first run; later runs use seed + n
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of runs to play
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    /// Print summaries as JSON lines
    #[arg(long)]
    json: bool,
}

/// Outcome of one simulated run
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: Option<u64>,
    victory: bool,
    rounds_cleared: u32,
    gold: u64,
    base_hp: i32,
    base_damage: u32,
    purchases: u32,
    powerups: Vec<ActivePowerup>,
}

/// Shopping priority, best first
const WISHLIST: [PowerupKey; 8] = [
    PowerupKey::HighRoller,
    PowerupKey::DevilsWard,
    PowerupKey::DoubleDown,
    PowerupKey::PointBoost,
    PowerupKey::AceSaver,
    PowerupKey::ExtraReroll,
    PowerupKey::WildDie,
    PowerupKey::FirstStrike,
];

/// Safety stop for a strategy that never ends a run
const MAX_COMMANDS: usize = 10_000;

fn shop<D: DiceSource>(engine: &mut Engine<D>) -> Result<()> {
    engine.enter_shop()?;
    loop {
        let pick = WISHLIST.iter().copied().find(|key| {
            engine
                .shop()
                .iter()
                .any(|entry| entry.key == *key && entry.affordable)
        });
        match pick {
            Some(key) => {
                let receipt = engine.purchase_powerup(key)?;
                debug!("Strategy bought {} for {}", key, receipt.price);
            }
            None => break,
        }
    }
    engine.continue_from_shop()?;
    Ok(())
}

fn act<D: DiceSource>(engine: &mut Engine<D>) -> Result<()> {
    let Some(combat) = engine.combat() else {
        bail!("action pending without a round");
    };
    let Some(roll) = combat.pending_roll else {
        bail!("action pending without a roll");
    };
    let wild_dice = combat.wild_die_uses_left;
    let rerolls = combat.rerolls_left;
    let low_hp = combat.player.hp * 3 < combat.player.max_hp;

    // Turn a weak point into trips when the pair is worth more
    if wild_dice > 0 && roll.kind == RollKind::Point {
        let d = roll.dice_shown;
        let (pair_face, single_idx) = if d[0] == d[1] {
            (d[0], 2)
        } else if d[0] == d[2] {
            (d[0], 1)
        } else {
            (d[1], 0)
        };
        if u32::from(pair_face) > roll.value {
            engine.use_wild_die(single_idx, pair_face)?;
            return Ok(());
        }
    }

    if roll.kind == RollKind::Point && roll.value <= 2 && rerolls > 0 {
        engine.use_manual_reroll()?;
    } else if low_hp {
        engine.choose_defend()?;
    } else {
        engine.choose_attack()?;
    }
    Ok(())
}

fn play_run(config: EngineConfig) -> Result<(RunSummary, Vec<String>)> {
    let seed = config.seed;
    let mut engine = Engine::new(config)?;
    engine.start_run()?;

    let mut commands = 0;
    while !engine.phase().is_terminal() {
        commands += 1;
        if commands > MAX_COMMANDS {
            bail!("run did not finish after {} commands", MAX_COMMANDS);
        }

        match engine.phase() {
            Phase::RoundStart => {
                shop(&mut engine)?;
                if engine.run().powerups.owns(PowerupKey::FirstStrike)
                    && !engine.first_strike_armed()
                {
                    engine.use_first_strike()?;
                }
                engine.begin_round()?;
            }
            Phase::PlayerTurn => {
                engine.roll_player_dice()?;
            }
            Phase::ActionPending => act(&mut engine)?,
            phase => bail!("unexpected phase {}", phase),
        }
    }

    let run = engine.run();
    let summary = RunSummary {
        seed,
        victory: engine.phase() == Phase::RunVictory,
        rounds_cleared: run.round - 1,
        gold: run.gold,
        base_hp: run.base_hp,
        base_damage: run.base_damage,
        purchases: run.purchase_count,
        powerups: engine.active_powerups(),
    };
    Ok((summary, engine.log().lines()))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ceelo=info,ceelo_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let args = Args::parse();
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let base = EngineConfig::load(args.config.as_deref())?;
    let first_seed = args.seed.or(base.seed);

    let mut victories = 0;
    for n in 0..args.runs {
        let mut config = base.clone();
        config.seed = first_seed.map(|s| s.wrapping_add(u64::from(n)));

        let (summary, lines) = play_run(config)?;
        if summary.victory {
            victories += 1;
        }

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            if args.runs == 1 {
                for line in &lines {
                    println!("{}", line);
                }
            }
            println!(
                "run {}: {} after {} rounds, {}g, {}HP, {} damage, {} purchases",
                n + 1,
                if summary.victory { "victory" } else { "defeat" },
                summary.rounds_cleared,
                summary.gold,
                summary.base_hp,
                summary.base_damage,
                summary.purchases
            );
        }
    }

    info!(runs = args.runs, victories, "Simulation finished");
    Ok(())
}
