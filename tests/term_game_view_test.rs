use blockfall::core::{create_piece, ActivePiece, GameSnapshot, PieceCycle, Session, SessionConfig};
use blockfall::term::{cell_color, AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use blockfall::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_follows_board_size() {
    let snap = GameSnapshot::new(6, 8);
    let fb = GameView::new(1, 1).render(&snap, Viewport::new(8, 10));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(7, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    // Settled I cell at bottom-left.
    snap.board.set(0, 19, 5);

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, cell_color(5));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_dimmed_ghost() {
    let mut snap = GameSnapshot::default();
    snap.started = true;
    snap.running = true;
    snap.active = Some(ActivePiece::new(create_piece(PieceKind::O), 0, 0));
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let active = fb.get(1, 1).unwrap();
    assert_eq!(active.ch, '█');
    assert_eq!(active.style.fg, Rgb::from_hex(0xffd700));

    let ghost = fb.get(1, 1 + 19).unwrap();
    assert_eq!(ghost.ch, '░');
    assert!(ghost.style.dim);
}

#[test]
fn term_view_hides_ghost_while_paused() {
    let mut snap = GameSnapshot::default();
    snap.started = true;
    snap.running = false;
    snap.active = Some(ActivePiece::new(create_piece(PieceKind::O), 0, 0));
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 1 + 19).unwrap().ch, '·');
    assert!(!screen_text(&fb).contains('░'));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut session = Session::new(SessionConfig::default(), PieceCycle::repeat(PieceKind::I));
    session.start_session();
    let mut snap = session.snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    for word in ["SCORE", "1234", "LINES", "LEVEL", "NEXT"] {
        assert!(all.contains(word), "missing {}", word);
    }

    // Panel starts two columns right of the frame; NEXT label on row 9, the
    // I preview centered in the 4x4 box one row further down.
    let panel_x = (60 - 22) / 2 + 22 + 2;
    assert!(fb.row_text(9).contains("NEXT"));
    let preview_row = 10 + 1;
    for dx in 0..8 {
        assert_eq!(fb.get(panel_x + dx, preview_row).unwrap().ch, '█');
    }
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();
    let idle = screen_text(&view.render(&GameSnapshot::default(), Viewport::new(40, 24)));
    assert!(idle.contains("PRESS R"));

    let mut session = Session::seeded(1);
    session.start_session();
    let running = screen_text(&view.render(&session.snapshot(), Viewport::new(40, 24)));
    assert!(!running.contains("PAUSED"));

    session.toggle_pause();
    let paused = screen_text(&view.render(&session.snapshot(), Viewport::new(40, 24)));
    assert!(paused.contains("PAUSED"));
}
