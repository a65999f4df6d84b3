use tui_tetromino::core::{GameSnapshot, GameState};
use tui_tetromino::term::{AnchorY, FrameBuffer, GameView, Viewport};
use tui_tetromino::types::{GameAction, Phase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn snap_in(phase: Phase) -> GameSnapshot {
    let mut snap = GameState::new(1).snapshot();
    snap.phase = phase;
    snap.choices = phase.choices();
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new(1);
    let snap = state.snapshot();
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
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = PieceKind::I.code();
    snap.active = None;

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_clips_active_piece_in_hidden_rows() {
    let mut snap = GameState::new(1).snapshot();
    snap.board = [[0; 10]; 20];
    let mut active = snap.active.unwrap();
    active.kind = PieceKind::O;
    active.shape = tui_tetromino::core::Shape::canonical(PieceKind::O);
    active.row = -1;
    active.col = 0;
    snap.active = Some(active);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Only the lower row of the O (board row 0) is visible
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(3, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 2).unwrap().ch, '·');
    // The border row is untouched
    assert_eq!(fb.get(1, 0).unwrap().ch, '─');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let view = GameView::default();
    let all = screen_text(&view.render(&snap, Viewport::new(60, 22)));

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));

    // Too narrow: no panel at all
    let narrow = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    let fb = view.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_overlay_titles() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    let playing = screen_text(&view.render(&snap_in(Phase::Playing), vp));
    assert!(!playing.contains("PAUSED"));

    let cases = [
        (Phase::Paused, "GAME PAUSED"),
        (Phase::LevelingUp, "NEW LEVEL: 2"),
        (Phase::GameOver, "GAME OVER!"),
        (Phase::Won, "YOU WON!"),
    ];
    for (phase, title) in cases {
        let all = screen_text(&view.render(&snap_in(phase), vp));
        assert!(all.contains(title), "{:?} should show {:?}", phase, title);
    }
}

#[test]
fn term_view_draws_buttons_for_choices() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    let won = screen_text(&view.render(&snap_in(Phase::Won), vp));
    assert!(won.contains("[ Restart ]"));
    assert!(won.contains("[ Continue ]"));

    let over = screen_text(&view.render(&snap_in(Phase::GameOver), vp));
    assert!(over.contains("[ Restart ]"));
    assert!(!over.contains("Continue"));

    let paused = screen_text(&view.render(&snap_in(Phase::Paused), vp));
    assert!(!paused.contains('['));
}

#[test]
fn term_view_button_at_resolves_clicks() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let snap = snap_in(Phase::Won);
    let fb = view.render(&snap, vp);

    let rects: Vec<_> = view.button_rects(&snap, vp).collect();
    assert_eq!(rects.len(), 2);
    for (rect, choice) in &rects {
        // The drawn label sits inside the clickable rectangle
        assert_eq!(fb.get(rect.x, rect.y).unwrap().ch, '[');
        assert_eq!(fb.get(rect.x + rect.width - 1, rect.y).unwrap().ch, ']');

        let mid = rect.x + rect.width / 2;
        assert_eq!(view.button_at(&snap, vp, mid, rect.y), Some(choice.action));
    }

    let (restart, _) = rects[0];
    assert_eq!(
        view.button_at(&snap, vp, restart.x, restart.y),
        Some(GameAction::Restart)
    );
    assert_eq!(view.button_at(&snap, vp, 0, 0), None);
    assert_eq!(view.button_at(&snap, vp, restart.x, restart.y - 2), None);

    // No buttons while playing
    let playing = snap_in(Phase::Playing);
    assert_eq!(view.button_at(&playing, vp, restart.x, restart.y), None);
}
