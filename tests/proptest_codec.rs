//! Property tests for the action codec.

use cantstop_gym::codec::ActionCodec;
use cantstop_gym::core::{Move, MoveShape};
use proptest::prelude::*;

fn codec_and_index() -> impl Strategy<Value = (ActionCodec, usize)> {
    (2usize..=24).prop_flat_map(|tracks| {
        let codec = ActionCodec::new(tracks).unwrap();
        let count = codec.action_count();
        (Just(codec), 0..count)
    })
}

fn track_pair() -> impl Strategy<Value = (usize, usize, usize)> {
    (2usize..=24)
        .prop_flat_map(|tracks| (Just(tracks), 0..tracks - 1))
        .prop_flat_map(|(tracks, a)| (Just(tracks), Just(a), a + 1..tracks))
}

proptest! {
    #[test]
    fn decode_then_encode_is_identity((codec, index) in codec_and_index()) {
        let decoded = codec.decode(index).unwrap();
        prop_assert_eq!(codec.encode(&decoded.mv, decoded.stop).unwrap(), index);
    }

    #[test]
    fn decoded_moves_are_well_formed((codec, index) in codec_and_index()) {
        let decoded = codec.decode(index).unwrap();
        prop_assert_eq!(decoded.mv.track_count(), codec.track_count());
        prop_assert!(decoded.mv.is_well_formed());
        prop_assert_eq!(decoded.stop, index >= codec.move_count());
    }

    #[test]
    fn pairs_encode_to_their_level((tracks, a, b) in track_pair(), stop: bool) {
        let codec = ActionCodec::new(tracks).unwrap();
        let index = codec.encode(&Move::pair(tracks, a, b), stop).unwrap();
        let base = index % codec.move_count();

        prop_assert_eq!(codec.level_of(base), Some((a + 1, b - a - 1)));
        prop_assert_eq!(codec.decode(index).unwrap().mv.shape(), Some(MoveShape::Pair(a, b)));
    }

    #[test]
    fn out_of_range_is_rejected(tracks in 2usize..=24, extra in 0usize..1000) {
        let codec = ActionCodec::new(tracks).unwrap();
        prop_assert!(codec.decode(codec.action_count() + extra).is_err());
        prop_assert!(codec.decode_signed(-1 - extra as i64).is_err());
    }
}
