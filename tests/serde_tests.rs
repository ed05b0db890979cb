//! The optional `serde` representation of events and snapshots.

use blockfall::core::{create_piece, Board, GameEvent, GameSnapshot, Session, Shape};
use blockfall::types::{GameAction, PieceKind};

#[test]
fn events_serialize_with_their_payload() {
    let event = GameEvent::LinesCleared {
        count: 2,
        total_score: 300,
        total_lines: 2,
    };
    let json = serde_json::to_value(event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "LinesCleared": { "count": 2, "total_score": 300, "total_lines": 2 }
        })
    );
    assert_eq!(
        serde_json::to_value(GameEvent::ToppedOut).unwrap(),
        serde_json::json!("ToppedOut")
    );
}

#[test]
fn next_piece_event_round_trips() {
    let event = GameEvent::NextPieceChanged {
        shape: create_piece(PieceKind::S),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: GameEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn snapshot_round_trips_mid_game() {
    let mut session = Session::seeded(5);
    session.start_session();
    for action in [GameAction::MoveLeft, GameAction::HardDrop, GameAction::Rotate] {
        session.apply(action);
    }
    let snap = session.snapshot();

    let json = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn piece_kinds_serialize_as_letters() {
    assert_eq!(serde_json::to_value(PieceKind::I).unwrap(), serde_json::json!("I"));
}

#[test]
fn boards_serialize_as_rows() {
    let mut board = Board::new(4, 4);
    board.set(1, 3, 6);
    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(
        json,
        serde_json::json!([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 6, 0, 0]])
    );
    let back: Board = serde_json::from_value(json).unwrap();
    assert_eq!(back, board);
}

#[test]
fn malformed_boards_are_rejected() {
    for json in [
        "[]",
        "[[]]",
        "[[0,0,0],[0,0,0],[0,0,0]]",
        "[[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0]]",
        "[[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,8,0,0]]",
        r#"{"width":0,"height":3,"cells":[]}"#,
        r#"{"width":10,"height":20,"cells":[0,0]}"#,
    ] {
        assert!(serde_json::from_str::<Board>(json).is_err(), "accepted {json}");
    }
}

#[test]
fn malformed_shapes_are_rejected() {
    for json in [
        "[[0,0],[0,0]]",
        "[[1,1,1,1,1,1,1,1,1]]",
        "[[1,1],[1]]",
        "[[1,2]]",
        "[[9]]",
        r#"{"width":9,"height":1,"cells":[[1,1,1,1],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}"#,
    ] {
        assert!(serde_json::from_str::<Shape>(json).is_err(), "accepted {json}");
    }
    let i: Shape = serde_json::from_str("[[5],[5],[5],[5]]").unwrap();
    assert_eq!(i, create_piece(PieceKind::I).rotate_cw());
}
