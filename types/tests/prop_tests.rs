use proptest::prelude::*;

use civitas_types::{Address, Timestamp, TxId};

proptest! {
    /// Address parses back from its Display form.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Address::is_zero is true only for all-zero bytes.
    #[test]
    fn address_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(Address::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Stored records embed addresses; bincode must carry them unchanged.
    #[test]
    fn address_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let addr = Address::new(bytes);
        let encoded = bincode::serialize(&addr).unwrap();
        let decoded: Address = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, addr);
    }

    /// TxId hex form parses back.
    #[test]
    fn tx_id_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = TxId::new(bytes);
        prop_assert_eq!(TxId::from_hex(&id.to_string()).unwrap(), id);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp::until saturates to zero when the target is earlier.
    #[test]
    fn timestamp_until_saturates(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.until(Timestamp::new(base + offset)), offset);
        prop_assert_eq!(Timestamp::new(base + offset).until(t), 0);
    }
}
