use anyhow::Result;
use mfclassic::prelude::*;
use mfclassic::test_support::{SimulatedCard, WrongKeyReaction, simulated_poller};
use mfclassic::transport::mock::FrameKind;

use crate::common::{self, fixtures};

#[test]
fn auth_with_both_keys() -> Result<()> {
    common::init_logger();
    let mut poller = simulated_poller(fixtures::sample_card());

    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;
    assert_eq!(poller.auth_state(), AuthState::Passed);

    let mut ctx = AuthContext::default();
    poller.transport_mut().select();
    poller.auth(
        7,
        &fixtures::sector1_key_b(),
        KeyType::B,
        Some(&mut ctx),
        AuthFlags::new(),
    )?;
    assert_eq!(ctx.block_num, 7);
    assert_eq!(ctx.key_type, KeyType::B);
    assert_ne!(ctx.nt, Nt::default());
    Ok(())
}

#[test]
fn wrong_key_times_out_and_halts() {
    common::init_logger();
    let mut poller = simulated_poller(fixtures::sample_card());

    let result = poller.auth(4, &Key::DEFAULT, KeyType::A, None, AuthFlags::new());
    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(poller.auth_state(), AuthState::Idle);
    // A plain HLTA went out after the reader answer
    let frames = &poller.transport().frames;
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[2].0, FrameKind::Standard);
    assert_eq!(frames[2].1.data(), &[0x50, 0x00]);
    assert!(poller.transport().is_halted());
    assert_eq!(poller.transport().force_idle_calls, 1);
}

#[test]
fn wrong_key_nak_is_reported_as_auth() {
    common::init_logger();
    let card = fixtures::sample_card().with_wrong_key_reaction(WrongKeyReaction::Nak);
    let mut poller = simulated_poller(card);
    assert_eq!(
        poller.auth(4, &Key::DEFAULT, KeyType::B, None, AuthFlags::new()),
        Err(Error::Auth)
    );
}

#[test]
fn block_outside_card_is_silent() {
    let mut poller = simulated_poller(SimulatedCard::new());
    assert_eq!(
        poller.auth(200, &Key::DEFAULT, KeyType::A, None, AuthFlags::new()),
        Err(Error::Timeout)
    );
}

#[test]
fn early_return_captures_nonce_only() -> Result<()> {
    let mut poller = simulated_poller(SimulatedCard::new().with_nonce_seed(1));
    let mut ctx = AuthContext::default();
    poller.auth(
        0,
        &Key::DEFAULT,
        KeyType::A,
        Some(&mut ctx),
        AuthFlags::new().early_ret(),
    )?;
    // First LCG step from seed 1
    assert_eq!(ctx.nt.to_u32(), 1_664_525u32.wrapping_add(1_013_904_223));
    assert_eq!(poller.auth_state(), AuthState::Idle);
    assert_eq!(poller.transport().frames.len(), 1);
    Ok(())
}

#[test]
fn card_data_is_refreshed_before_seeding() -> Result<()> {
    let uid = Uid::try_from(&[0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66][..])?;
    let card = SimulatedCard::new().with_card_data(CardData::new(uid, [0x44, 0x00], 0x08));
    let mut poller = simulated_poller(card);
    poller.auth(0, &Key::DEFAULT, KeyType::A, None, AuthFlags::new())?;
    assert_eq!(poller.card_data().cuid(), 0x3344_5566);
    Ok(())
}
