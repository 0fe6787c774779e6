use anyhow::Result;
use mfclassic::prelude::*;
use mfclassic::test_support::{CardState, scripted_poller, simulated_poller};
use mfclassic::transport::mock::{FrameKind, MockResponse};

use crate::common::{self, fixtures};

#[test]
fn nested_auth_into_another_sector() -> Result<()> {
    common::init_logger();
    let mut poller = simulated_poller(fixtures::sample_card());

    poller.auth(0, &Key::DEFAULT, KeyType::A, None, AuthFlags::new())?;
    poller.auth_nested(
        4,
        &fixtures::sector1_key_a(),
        KeyType::A,
        None,
        AuthFlags::new(),
    )?;
    assert_eq!(
        poller.transport().state(),
        CardState::Authenticated { sector: 1 }
    );
    assert_eq!(poller.read_block(4)?, fixtures::counting_block());
    Ok(())
}

#[test]
fn nested_nonce_arrives_enciphered() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card().with_nonce_seed(7));
    poller.auth(0, &Key::DEFAULT, KeyType::A, None, AuthFlags::new())?;

    let mut ctx = AuthContext::default();
    poller.auth_nested(
        4,
        &fixtures::sector1_key_a(),
        KeyType::A,
        Some(&mut ctx),
        AuthFlags::new().early_ret(),
    )?;

    let first = 7u32.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    let second = first.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    let cuid = poller.card_data().cuid();
    let mask = MockCrypto::nested_mask(fixtures::sector1_key_a().to_u64(), cuid);
    assert_eq!(ctx.nt.to_u32(), second ^ mask);
    Ok(())
}

#[test]
fn nested_auth_with_wrong_key_fails() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(0, &Key::DEFAULT, KeyType::A, None, AuthFlags::new())?;
    assert_eq!(poller.auth_state(), AuthState::Passed);
    assert_eq!(
        poller.auth_nested(4, &Key::DEFAULT, KeyType::A, None, AuthFlags::new()),
        Err(Error::Timeout)
    );
    assert_eq!(poller.auth_state(), AuthState::Idle);
    assert!(poller.transport().is_halted());
    Ok(())
}

#[test]
fn failed_nested_auth_drops_session_even_when_halt_is_answered() -> Result<()> {
    let mut poller = scripted_poller(vec![
        MockResponse::bytes_with_error(&[1, 2, 3, 4], TransportError::WrongCrc),
        MockResponse::bytes(&[5, 6, 7, 8]),
        // short nested nonce, then a reply to the halt
        MockResponse::bytes(&[0xAA, 0xBB, 0xCC]),
        fixtures::nak(),
    ]);
    poller.auth(0, &Key::DEFAULT, KeyType::A, None, AuthFlags::new())?;
    assert_eq!(poller.auth_state(), AuthState::Passed);

    assert_eq!(
        poller.auth_nested(4, &Key::DEFAULT, KeyType::A, None, AuthFlags::new()),
        Err(Error::Protocol)
    );
    assert_eq!(poller.auth_state(), AuthState::Idle);
    assert_eq!(poller.transport().force_idle_calls, 1);
    let (kind, frame) = poller.transport().sent.last().unwrap();
    assert_eq!(*kind, FrameKind::Standard);
    assert_eq!(frame.data(), &[0x50, 0x00]);
    Ok(())
}
