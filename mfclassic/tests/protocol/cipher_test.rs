use mfclassic::crypto::{Cipher, MockCrypto};
use mfclassic::protocol::BitBuffer;
use mfclassic::types::{Nr, Nt};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reader_and_card_stay_in_step(
        key in 0u64..(1 << 48),
        cuid in any::<u32>(),
        nt in any::<u32>(),
        frames in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..18), 1..6),
    ) {
        let mut reader = MockCrypto::new();
        let mut card = MockCrypto::new();
        let mut answer = BitBuffer::new();
        let (nt_in, nr) = (Nt::from_u32(nt), Nr::from_u32(7));
        reader.encrypt_reader_nonce(key, cuid, &nt_in, &nr, &mut answer, false);
        card.init(key, cuid, nt);
        let mut plain = BitBuffer::new();
        card.decrypt(&answer, &mut plain);
        prop_assert_eq!(&plain.data()[4..], &MockCrypto::reader_answer(nt).to_be_bytes()[..]);

        for frame in frames {
            let tx = BitBuffer::from_bytes(&frame);
            let mut enc = BitBuffer::new();
            let mut dec = BitBuffer::new();
            reader.encrypt(None, &tx, &mut enc);
            card.decrypt(&enc, &mut dec);
            prop_assert_eq!(dec.data(), tx.data());
            prop_assert_eq!(dec.parity(), tx.parity());
        }
    }
}
