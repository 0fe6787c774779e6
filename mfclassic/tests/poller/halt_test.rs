use anyhow::Result;
use mfclassic::prelude::*;
use mfclassic::test_support::{scripted_poller, simulated_poller};
use mfclassic::transport::mock::MockResponse;

use crate::common::{self, fixtures};

#[test]
fn halt_ends_the_session() -> Result<()> {
    common::init_logger();
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;
    poller.halt()?;

    assert_eq!(poller.auth_state(), AuthState::Idle);
    assert!(poller.transport().is_halted());
    assert_eq!(poller.transport().force_idle_calls, 1);

    // A halted card ignores everything until it is selected again
    assert_eq!(
        poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new()),
        Err(Error::Timeout)
    );
    poller.transport_mut().select();
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;
    Ok(())
}

#[test]
fn halt_is_idempotent_on_a_silent_card() {
    let mut poller = scripted_poller(vec![]);
    assert_eq!(poller.halt(), Ok(()));
    assert_eq!(poller.halt(), Ok(()));
    assert_eq!(poller.transport().force_idle_calls, 2);
}

#[test]
fn any_answer_to_halt_is_a_fault() {
    let mut poller = scripted_poller(vec![MockResponse::bytes(&[0x00])]);
    assert_eq!(poller.halt(), Err(Error::Protocol));
    assert_eq!(poller.auth_state(), AuthState::Idle);
    assert_eq!(poller.transport().force_idle_calls, 0);
}
