#![no_main]

use arbitrary::Arbitrary;
use crochess_notation::{parse_move, Chessboard, Color, Diagnostics, Variant};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    variant: Variant,
    turn: Color,
    notation: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let board = Chessboard::new(input.variant, input.turn);
    let mut diagnostics = Diagnostics::new();
    let m = parse_move(input.notation, &board, &mut diagnostics);

    for diagnostic in &diagnostics {
        assert!(diagnostic.position() <= input.notation.len());
    }

    let Some(m) = m else {
        assert!(diagnostics.has_errors());
        return;
    };

    let canonical = m.to_string();
    let mut diagnostics = Diagnostics::new();
    let roundtripped = parse_move(&canonical, &board, &mut diagnostics).expect("roundtrip");
    assert!(!diagnostics.has_errors(), "{canonical}: {diagnostics}");
    assert_eq!(roundtripped.to_string(), canonical);
});
