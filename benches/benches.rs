use crochess_notation::{
    parse_move,
    tokenizer::{tokens, Separators},
    Chessboard, Color, Diagnostics, Move, Variant,
};
use iai::black_box;

fn bench_parse_simple() -> Option<Move> {
    let mut diagnostics = Diagnostics::new();
    parse_move(
        black_box("Nb1-c3"),
        black_box(&Chessboard::default()),
        &mut diagnostics,
    )
}

fn bench_parse_cascade() -> Option<Move> {
    let board = Chessboard::new(Variant::One, Color::Light);
    let mut diagnostics = Diagnostics::new();
    let m = parse_move(
        black_box("Qd1.e2..h5xWh6==~Wh6.i7<Ej8k9 |Ej8-m10 @@Hn11%Go12 ;;Gp13$Nq14 'Kn1&w1v1"),
        black_box(&board),
        &mut diagnostics,
    );
    assert!(!diagnostics.has_errors());
    m
}

fn bench_parse_malformed() -> Option<Move> {
    let mut diagnostics = Diagnostics::new();
    let m = parse_move(
        black_box("A1-B2 ??? C3xD4 Xa1 e4=Q ~|b2"),
        black_box(&Chessboard::default()),
        &mut diagnostics,
    );
    assert_eq!(diagnostics.errors().count(), 4);
    m
}

fn bench_tokens() -> usize {
    tokens(
        black_box("Nb1-c3 ~Nc3-e4 ||| Ne4-f6 @ Bc1-h6 ;; e4 'b7.b8=Q"),
        Separators::all(),
    )
    .count()
}

fn bench_display() -> String {
    let m: Move = "Nc3<Bd5e6 ~e5:d6 || Ke1&g1 @@ Qd1*Nd7== ;; O-O-O 'b7.b8=Q"
        .parse()
        .expect("valid move");
    black_box(&m).to_string()
}

iai::main!(
    bench_parse_simple,
    bench_parse_cascade,
    bench_parse_malformed,
    bench_tokens,
    bench_display,
);
