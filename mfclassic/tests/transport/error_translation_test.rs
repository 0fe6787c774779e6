use mfclassic::prelude::*;
use mfclassic::test_support::scripted_poller;
use mfclassic::transport::mock::MockResponse;

#[test]
fn every_transport_fault_maps_to_a_session_error() {
    let cases = [
        (TransportError::NotPresent, Error::NotPresent),
        (TransportError::ColResFailed, Error::Protocol),
        (TransportError::Communication, Error::Protocol),
        (TransportError::WrongCrc, Error::Protocol),
        (TransportError::Timeout, Error::Timeout),
    ];
    for (fault, expected) in cases {
        assert_eq!(Error::from(fault), expected);

        let mut poller = scripted_poller(vec![MockResponse::error(fault)]);
        let tx = BitBuffer::from_bytes(&[0x26]);
        let mut rx = BitBuffer::new();
        assert_eq!(poller.send_frame(&tx, &mut rx, 1000), Err(expected));
    }
}

#[test]
fn success_passes_through() {
    let mut poller = scripted_poller(vec![MockResponse::bits(&[0x04], 4)]);
    let mut rx = BitBuffer::new();
    poller
        .send_frame(&BitBuffer::from_bits(&[0x26], 7), &mut rx, 1000)
        .unwrap();
    assert_eq!(rx.size_bits(), 4);
}
