//! Combat scenario tests
//!
//! Tests turn order, rolling, attacking, defending, and round endings

use ceelo::combat::VictoryRewards;
use ceelo::dice::RollKind;
use ceelo::events::{Actor, GameEvent};
use ceelo::{EngineError, Phase};

use crate::harness::{faces, TestSession};

/// Test: Opening round is enemy-first; enemy trips of ones then a player point 5
#[test]
fn test_enemy_first_opening_round() {
    let mut session = TestSession::started();
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&faces::POINT_FIVE);

    assert!(!session.engine.next_round_player_first());
    let step = session.engine.begin_round().unwrap();
    assert_eq!(step.phase, Phase::PlayerTurn);
    assert_eq!(
        step.events[0],
        GameEvent::RoundBegan {
            round: 1,
            enemy_hp: 22,
            player_first: false
        }
    );
    assert_eq!(session.player_hp(), 46);
    assert_eq!(session.enemy_hp(), 22);

    let step = session.engine.roll_player_dice().unwrap();
    assert_eq!(step.phase, Phase::ActionPending);
    let roll = step.roll.unwrap();
    assert_eq!(roll.kind, RollKind::Point);
    assert_eq!(roll.value, 5);
    assert_eq!(session.engine.pending_attack_preview(), Some(25));

    let step = session.engine.choose_attack().unwrap();
    assert_eq!(step.phase, Phase::RoundStart);
    assert!(step.events.contains(&GameEvent::Attacked {
        actor: Actor::Player,
        kind: RollKind::Point,
        value: 5,
        damage: 25,
        target_hp: 0,
    }));
    assert!(step.events.contains(&GameEvent::RoundWon {
        round: 1,
        rewards: VictoryRewards::for_round(1),
    }));

    let run = session.engine.run();
    assert_eq!(run.round, 2);
    assert_eq!(run.gold, 40);
    assert_eq!(run.base_hp, 53);
    assert_eq!(run.base_damage, 7);
    assert!(session.engine.combat().is_none());
}

/// Test: Second round alternates to player-first and the enemy waits
#[test]
fn test_second_round_player_first() {
    let mut session = TestSession::started();
    session.win_round();

    assert!(session.engine.next_round_player_first());
    let step = session.engine.begin_round().unwrap();
    assert_eq!(step.phase, Phase::PlayerTurn);
    assert_eq!(
        step.events,
        vec![GameEvent::RoundBegan {
            round: 2,
            enemy_hp: 34,
            player_first: true
        }]
    );
    assert_eq!(session.player_hp(), 53);
}

/// Test: Defend heals past max HP, then the enemy strikes back
#[test]
fn test_defend_then_enemy_attacks() {
    let mut session = TestSession::started();
    session.script(&[1, 1, 1, 4, 4, 4, 2, 2, 5]);

    session.engine.begin_round().unwrap();
    session.engine.roll_player_dice().unwrap();
    assert_eq!(session.engine.pending_heal_preview(), Some(20));

    let step = session.engine.choose_defend().unwrap();
    assert_eq!(step.phase, Phase::PlayerTurn);
    assert!(step.events.contains(&GameEvent::Healed {
        kind: RollKind::Trips,
        amount: 20,
        hp: 66,
    }));
    // Point 5 at 4 per point
    assert_eq!(session.player_hp(), 46);
    assert_eq!(session.enemy_hp(), 22);
    assert!(session.engine.pending_roll().is_none());
}

/// Test: No-score rolls are rerolled for free for both sides
#[test]
fn test_no_score_rerolls_are_free() {
    let mut session = TestSession::started();
    session
        .script(&faces::NO_SCORE)
        .script(&[2, 2, 1])
        .script(&[2, 4, 6])
        .script(&[5, 5, 2]);

    session.engine.begin_round().unwrap();
    assert_eq!(session.player_hp(), 46);
    assert_eq!(
        session.count_events(|e| *e == GameEvent::NoScoreReroll { actor: Actor::Enemy }),
        1
    );

    let step = session.engine.roll_player_dice().unwrap();
    assert_eq!(step.roll.unwrap().value, 2);
    assert_eq!(
        session.count_events(|e| *e == GameEvent::NoScoreReroll { actor: Actor::Player }),
        1
    );
    assert_eq!(session.engine.combat().unwrap().rerolls_left, 1);
}

/// Test: Manual reroll spends a reroll and replaces the pending roll
#[test]
fn test_manual_reroll() {
    let mut session = TestSession::started();
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&faces::POINT_ONE)
        .script(&[6, 6, 5]);

    session.engine.begin_round().unwrap();
    session.engine.roll_player_dice().unwrap();

    let step = session.engine.use_manual_reroll().unwrap();
    assert_eq!(step.phase, Phase::ActionPending);
    assert_eq!(step.roll.unwrap().value, 5);
    assert_eq!(session.engine.combat().unwrap().rerolls_left, 0);

    let err = session.engine.use_manual_reroll().unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction(_)));
    assert_eq!(session.engine.phase(), Phase::ActionPending);
    assert_eq!(session.engine.pending_roll().unwrap().value, 5);
}

/// Test: Acting before rolling is an invalid action, not a phase error
#[test]
fn test_actions_before_rolling() {
    let mut session = TestSession::started();
    session.script(&faces::ENEMY_TRIPS_ONE);
    session.engine.begin_round().unwrap();
    assert_eq!(session.engine.phase(), Phase::PlayerTurn);
    let events = session.engine.log().len();

    for result in [
        session.engine.choose_attack(),
        session.engine.choose_defend(),
        session.engine.use_manual_reroll(),
        session.engine.use_wild_die(0, 6),
    ] {
        assert!(matches!(result, Err(EngineError::InvalidAction(_))));
    }
    assert_eq!(session.engine.phase(), Phase::PlayerTurn);
    assert_eq!(session.engine.log().len(), events);
    assert_eq!(session.player_hp(), 46);

    // Outside a round the same actions are phase errors
    session.engine.restart();
    assert!(matches!(
        session.engine.choose_attack(),
        Err(EngineError::IllegalTransition {
            phase: Phase::Menu,
            ..
        })
    ));
}

/// Test: Rolling a 1-2-3 ends the run on the spot
#[test]
fn test_player_instant_loss_ends_run() {
    let mut session = TestSession::started();
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&[3, 2, 1]);

    session.engine.begin_round().unwrap();
    let step = session.engine.roll_player_dice().unwrap();
    assert_eq!(step.phase, Phase::RunDefeat);
    assert!(step.events.contains(&GameEvent::InstantLoss { actor: Actor::Player }));
    assert!(step.events.contains(&GameEvent::RoundLost { round: 1 }));
    assert!(session.engine.combat().is_none());

    let err = session.engine.choose_attack().unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalTransition {
            phase: Phase::RunDefeat,
            ..
        }
    ));
}

/// Test: Enemy 4-5-6 on the opening roll beats the player
#[test]
fn test_enemy_instant_win_defeats_player() {
    let mut session = TestSession::started();
    session.script(&[6, 4, 5]);

    let step = session.engine.begin_round().unwrap();
    assert_eq!(step.phase, Phase::RunDefeat);
    assert!(step.events.contains(&GameEvent::InstantWin { actor: Actor::Enemy }));
}

/// Test: Enemy 1-2-3 hands the player the round
#[test]
fn test_enemy_instant_loss_wins_round() {
    let mut session = TestSession::started();
    session.script(&faces::ONE_TWO_THREE);

    let step = session.engine.begin_round().unwrap();
    assert_eq!(step.phase, Phase::RoundStart);
    assert_eq!(session.engine.run().round, 2);
    assert_eq!(session.engine.run().gold, 40);
}

/// Test: Enemy grinds the player down to zero
#[test]
fn test_enemy_kills_player() {
    let mut session = TestSession::started();
    session
        .script(&[1, 1, 6])
        .script(&faces::POINT_ONE)
        .script(&[2, 2, 6])
        .script(&faces::POINT_ONE)
        .script(&[3, 3, 6]);

    session.engine.begin_round().unwrap();
    assert_eq!(session.player_hp(), 26);

    session.engine.roll_player_dice().unwrap();
    session.engine.choose_attack().unwrap();
    assert_eq!(session.enemy_hp(), 17);
    assert_eq!(session.player_hp(), 2);

    session.engine.roll_player_dice().unwrap();
    let step = session.engine.choose_attack().unwrap();
    assert_eq!(step.phase, Phase::RunDefeat);
    assert!(step.events.contains(&GameEvent::Attacked {
        actor: Actor::Enemy,
        kind: RollKind::Point,
        value: 6,
        damage: 24,
        target_hp: 0,
    }));
    assert!(step.events.contains(&GameEvent::RunLost));
}

/// Test: Commands out of order are rejected without side effects
#[test]
fn test_out_of_order_commands() {
    let mut session = TestSession::started();
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&faces::POINT_FIVE);

    assert!(matches!(
        session.engine.roll_player_dice(),
        Err(EngineError::IllegalTransition {
            phase: Phase::RoundStart,
            ..
        })
    ));

    session.engine.begin_round().unwrap();
    let hp = session.player_hp();
    assert!(matches!(
        session.engine.choose_attack(),
        Err(EngineError::InvalidAction(_))
    ));
    assert!(session.engine.begin_round().is_err());
    assert!(session.engine.enter_shop().is_err());

    session.engine.roll_player_dice().unwrap();
    assert!(matches!(
        session.engine.roll_player_dice(),
        Err(EngineError::IllegalTransition {
            phase: Phase::ActionPending,
            ..
        })
    ));
    assert_eq!(session.engine.pending_roll().unwrap().value, 5);
    assert_eq!(session.player_hp(), hp);
}

/// Test: Wild die turns a point into trips once per use
#[test]
fn test_wild_die_override() {
    let mut session = TestSession::rich(100);
    session.buy(&["wildDie"]);
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&[2, 2, 5]);

    session.engine.begin_round().unwrap();
    assert!(matches!(
        session.engine.use_wild_die(0, 6),
        Err(EngineError::IllegalTransition { .. })
    ));
    session.engine.roll_player_dice().unwrap();

    let step = session.engine.use_wild_die(2, 2).unwrap();
    assert_eq!(step.phase, Phase::ActionPending);
    let roll = step.roll.unwrap();
    assert_eq!(roll.kind, RollKind::Trips);
    assert_eq!(roll.dice_shown, [2, 2, 2]);
    assert_eq!(session.engine.pending_attack_preview(), Some(10));
    assert_eq!(session.engine.combat().unwrap().wild_die_uses_left, 0);

    assert!(matches!(
        session.engine.use_wild_die(0, 2),
        Err(EngineError::InvalidAction(_))
    ));
}

/// Test: Devil's Ward breaks up a 1-2-3 and the roll continues
#[test]
fn test_devils_ward_saves_player() {
    let mut session = TestSession::rich(100);
    session.buy(&["Devil's Ward"]);
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&faces::ONE_TWO_THREE)
        .script(&[6])
        .script(&[5, 5, 2])
        .script_chances(&[true]);

    session.engine.begin_round().unwrap();
    let step = session.engine.roll_player_dice().unwrap();
    assert_eq!(step.phase, Phase::ActionPending);
    assert!(step.events.contains(&GameEvent::DevilsWard));
    assert_eq!(step.roll.unwrap().dice_shown, [5, 5, 2]);
}

/// Test: Lucky Clover lifts the first low die
#[test]
fn test_lucky_clover_lifts_die() {
    let mut session = TestSession::rich(100);
    session.buy(&["luckyClover"]);
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&[2, 2, 6])
        .script(&[6])
        .script_chances(&[true]);

    session.engine.begin_round().unwrap();
    let step = session.engine.roll_player_dice().unwrap();
    assert!(step.events.contains(&GameEvent::LuckyClover));
    let roll = step.roll.unwrap();
    assert_eq!(roll.dice_shown, [6, 2, 6]);
    assert_eq!(roll.value, 2);
}

/// Test: Ace Saver upgrades 1-1-1 into a lethal 6-6-6
#[test]
fn test_ace_saver_upgrade() {
    let mut session = TestSession::rich(100);
    session.buy(&["aceSaver"]);
    session.script(&[2, 2, 1]).script(&[1, 1, 1]);

    session.engine.begin_round().unwrap();
    let step = session.engine.roll_player_dice().unwrap();
    assert!(step.events.contains(&GameEvent::AceSaver));
    assert_eq!(step.roll.unwrap().value, 6);
    assert!(session.engine.combat().unwrap().used_ace_saver);

    let step = session.engine.choose_attack().unwrap();
    assert_eq!(step.phase, Phase::RoundStart);
}

/// Test: Loaded Dice and High Roller compose into a 4-5-6
#[test]
fn test_loaded_dice_and_high_roller() {
    let mut session = TestSession::rich(200);
    session.buy(&["loadedDice", "highRoller"]);
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&[1, 2, 5])
        .script(&[4]);

    session.engine.begin_round().unwrap();
    let step = session.engine.roll_player_dice().unwrap();
    assert_eq!(step.roll.unwrap().dice_shown, [6, 4, 5]);
    assert!(step.events.contains(&GameEvent::InstantWin { actor: Actor::Player }));
    assert_eq!(step.phase, Phase::RoundStart);
}

/// Test: Double Down doubles trips damage
#[test]
fn test_double_down_trips() {
    let mut session = TestSession::rich(100);
    session.buy(&["doubleDown"]);
    session
        .script(&faces::ENEMY_TRIPS_ONE)
        .script(&[3, 3, 3]);

    session.engine.begin_round().unwrap();
    session.engine.roll_player_dice().unwrap();
    assert_eq!(session.engine.pending_attack_preview(), Some(30));
    let step = session.engine.choose_attack().unwrap();
    assert_eq!(step.phase, Phase::RoundStart);
}
