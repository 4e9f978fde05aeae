//! Shop scenario tests
//!
//! Tests purchases, price growth, and the first strike consumable

use ceelo::economy::PowerupKey;
use ceelo::events::GameEvent;
use ceelo::{EngineError, Phase};

use crate::harness::{faces, TestSession};

/// Test: Purchases outside the shop are rejected
#[test]
fn test_purchase_requires_shop() {
    let mut session = TestSession::started();
    let err = session
        .engine
        .purchase_powerup(PowerupKey::PointBoost)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalTransition {
            phase: Phase::RoundStart,
            ..
        }
    ));
    assert_eq!(session.engine.run().gold, 20);
}

/// Test: Unaffordable purchase leaves the run untouched
#[test]
fn test_insufficient_funds() {
    let mut session = TestSession::started();
    session.engine.enter_shop().unwrap();
    let before = session.engine.run().clone();

    let err = session
        .engine
        .purchase_powerup(PowerupKey::HighRoller)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientFunds {
            key: PowerupKey::HighRoller,
            price: 40,
            gold: 20
        }
    ));
    assert_eq!(
        err.to_string(),
        "insufficient gold for highRoller: costs 40, have 20"
    );
    assert_eq!(session.engine.run(), &before);
    assert_eq!(session.engine.phase(), Phase::Shop);
}

/// Test: Unknown powerup names fail closed
#[test]
fn test_unknown_powerup() {
    let mut session = TestSession::started();
    session.engine.enter_shop().unwrap();
    let before = session.engine.run().clone();

    let err = session
        .engine
        .purchase_powerup_named("moonBoots")
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownPowerup(ref name) if name == "moonBoots"));
    assert_eq!(session.engine.run(), &before);
}

/// Test: Shop lists the whole catalog in order with live prices
#[test]
fn test_shop_catalog() {
    let mut session = TestSession::started();
    session.engine.enter_shop().unwrap();

    let shop = session.engine.shop();
    let keys: Vec<PowerupKey> = shop.iter().map(|e| e.key).collect();
    assert_eq!(keys, PowerupKey::all().to_vec());
    assert_eq!(shop[0].key, PowerupKey::LoadedDice);

    let guaranteed = shop
        .iter()
        .find(|e| e.key == PowerupKey::GuaranteedPoint)
        .unwrap();
    assert_eq!(guaranteed.price, 22);
    assert!(!guaranteed.affordable);
    assert!(!guaranteed.stackable);

    let first_strike = shop.iter().find(|e| e.key == PowerupKey::FirstStrike).unwrap();
    assert!(first_strike.consumable);
    assert!(first_strike.affordable);
}

/// Test: Repeat purchases compound own-price growth and global inflation
#[test]
fn test_price_growth_across_purchases() {
    let mut session = TestSession::rich(1000);
    session.engine.enter_shop().unwrap();

    let first = session
        .engine
        .purchase_powerup(PowerupKey::PointBoost)
        .unwrap();
    assert_eq!(first.price, 15);
    assert_eq!(first.next_price, 21);

    let second = session
        .engine
        .purchase_powerup(PowerupKey::PointBoost)
        .unwrap();
    assert_eq!(second.price, 21);
    // floor(floor(21 * 1.4) * 1.02^2) = floor(30.17)
    assert_eq!(second.next_price, 30);
    assert_eq!(second.owned, 2);
    assert_eq!(second.gold_left, 964);

    let run = session.engine.run();
    assert_eq!(run.purchase_count, 2);
    // floor(floor(25 * 1.02) * 1.02^2)
    assert_eq!(run.prices.get(PowerupKey::LoadedDice), 26);

    let active = session.engine.active_powerups();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].key, PowerupKey::PointBoost);
    assert_eq!(active[0].value, Some(2));

    assert!(session.has_event(&GameEvent::Purchased {
        key: PowerupKey::PointBoost,
        price: 21,
        gold_left: 964,
    }));
}

/// Test: Guaranteed Point is a one-time purchase with a 50% bump
#[test]
fn test_guaranteed_point_one_time() {
    let mut session = TestSession::rich(100);
    session.engine.enter_shop().unwrap();
    let receipt = session
        .engine
        .purchase_powerup_named("guaranteed_point")
        .unwrap();
    assert_eq!(receipt.price, 22);
    assert_eq!(receipt.next_price, 33);
    assert_eq!(session.engine.active_powerups()[0].value, None);
}

/// Test: First strike forces player-first once; alternation carries on
#[test]
fn test_first_strike() {
    let mut session = TestSession::rich(100);
    session.buy(&["firstStrike"]);

    let step = session.engine.use_first_strike().unwrap();
    assert_eq!(step.events, vec![GameEvent::FirstStrikeArmed { remaining: 0 }]);
    assert!(session.engine.first_strike_armed());
    assert!(session.engine.next_round_player_first());
    assert!(!session.engine.run().powerups.owns(PowerupKey::FirstStrike));

    let err = session.engine.use_first_strike().unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction(_)));

    let step = session.engine.begin_round().unwrap();
    assert_eq!(step.phase, Phase::PlayerTurn);
    assert_eq!(session.player_hp(), 50);
    assert!(!session.engine.first_strike_armed());

    session.script(&faces::FOUR_FIVE_SIX);
    session.engine.roll_player_dice().unwrap();
    assert_eq!(session.engine.phase(), Phase::RoundStart);

    // Round 2 is player-first by alternation, round 3 enemy-first
    assert!(session.engine.next_round_player_first());
    session.win_round();
    assert!(!session.engine.next_round_player_first());
}

/// Test: First strike needs one owned and the pre-round screen
#[test]
fn test_first_strike_rules() {
    let mut session = TestSession::started();
    assert!(matches!(
        session.engine.use_first_strike(),
        Err(EngineError::InvalidAction(_))
    ));

    session.engine.enter_shop().unwrap();
    assert!(matches!(
        session.engine.use_first_strike(),
        Err(EngineError::IllegalTransition {
            phase: Phase::Shop,
            ..
        })
    ));
}

/// Test: The shop can be reopened between rounds
#[test]
fn test_shop_between_rounds() {
    let mut session = TestSession::started();
    session.win_round();
    assert_eq!(session.engine.run().gold, 40);

    session.buy(&["extraReroll", "pointBoost"]);
    assert_eq!(session.engine.run().gold, 13);
    assert_eq!(session.engine.run().rerolls_per_round(), 2);

    session.script(&faces::POINT_FIVE);
    session.engine.begin_round().unwrap();
    session.engine.roll_player_dice().unwrap();
    let combat = session.engine.combat().unwrap();
    assert_eq!(combat.rerolls_left, 2);
    // Point 5 plus one boost
    assert_eq!(combat.pending_roll.unwrap().value, 6);
}
