use anyhow::Result;
use mfclassic::prelude::*;
use mfclassic::test_support::simulated_poller;

use crate::common::{self, fixtures};

#[test]
fn increment_then_transfer_commits() -> Result<()> {
    common::init_logger();
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;

    poller.value_cmd(5, ValueCommand::Increment, 25)?;
    poller.value_transfer(5)?;
    assert_eq!(poller.read_block(5)?.value(), Some((125, 5)));
    Ok(())
}

#[test]
fn decrement_without_transfer_changes_nothing() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;

    poller.value_cmd(5, ValueCommand::Decrement, 40)?;
    assert_eq!(poller.read_block(5)?.value(), Some((100, 5)));
    Ok(())
}

#[test]
fn restore_copies_into_another_block() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;

    poller.value_cmd(5, ValueCommand::Restore, 0)?;
    poller.value_transfer(6)?;
    // The address byte travels with the value
    assert_eq!(poller.read_block(6)?.value(), Some((100, 5)));
    Ok(())
}

#[test]
fn value_op_on_data_block_is_refused() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;
    assert_eq!(
        poller.value_cmd(4, ValueCommand::Increment, 1),
        Err(Error::Protocol)
    );
    Ok(())
}

#[test]
fn transfer_without_pending_operation_is_refused() -> Result<()> {
    let mut poller = simulated_poller(fixtures::sample_card());
    poller.auth(4, &fixtures::sector1_key_a(), KeyType::A, None, AuthFlags::new())?;
    assert_eq!(poller.value_transfer(5), Err(Error::Protocol));
    Ok(())
}
