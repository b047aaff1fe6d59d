//! Multiplayer coordinator tests - piece resupply, outbound messages and the
//! leaderboard

use tokio::sync::mpsc;

use tetrecs::core::{GameConfig, GameError, Phase};
use tetrecs::multiplayer::{
    ClientMessage, MultiplayerConfig, MultiplayerCoordinator, PlayerStanding, ProtocolError,
};
use tetrecs::types::{GameCommand, PieceKind};

type Outbound = mpsc::UnboundedReceiver<ClientMessage>;

fn setup(config: MultiplayerConfig) -> (MultiplayerCoordinator, Outbound) {
    let (tx, rx) = mpsc::unbounded_channel();
    let coord = MultiplayerCoordinator::new(GameConfig::default(), config, tx).unwrap();
    (coord, rx)
}

fn drain(rx: &mut Outbound) -> Vec<ClientMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Begin and feed `count` pieces of one shape
fn started(kind: PieceKind, count: usize) -> (MultiplayerCoordinator, Outbound) {
    let (mut coord, mut rx) = setup(MultiplayerConfig::default());
    coord.begin().unwrap();
    for _ in 0..count {
        coord.handle_message(&format!("PIECE {}", kind.id())).unwrap();
    }
    drain(&mut rx);
    (coord, rx)
}

fn standing(name: &str, score: u32, dead: bool) -> PlayerStanding {
    PlayerStanding {
        name: name.to_string(),
        score,
        dead,
    }
}

#[test]
fn test_commands_wait_for_pieces() {
    let (mut coord, _rx) = setup(MultiplayerConfig::default());
    coord.begin().unwrap();

    assert_eq!(
        coord.attempt_place(2, 2),
        Err(GameError::NotRunning { phase: Phase::Idle })
    );
    assert!(coord.swap().is_err());
    assert!(!coord.tick(60_000));
}

#[test]
fn test_pieces_arrive_in_order() {
    let (mut coord, _rx) = setup(MultiplayerConfig::default());
    coord.begin().unwrap();
    for id in [4, 2, 9, 0, 1] {
        coord.handle_message(&format!("PIECE {id}")).unwrap();
    }

    let engine = coord.engine();
    assert!(engine.is_running());
    assert_eq!(engine.current_piece().unwrap().kind, PieceKind::Square);
    assert_eq!(engine.following_piece().unwrap().kind, PieceKind::Plus);
    let queued: Vec<_> = engine.piece_source().pending().collect();
    assert_eq!(queued, vec![PieceKind::T, PieceKind::Line, PieceKind::C]);
}

#[test]
fn test_custom_start_threshold() {
    let (mut coord, mut rx) = setup(MultiplayerConfig {
        replenish_batch: 3,
        start_threshold: 2,
        ..MultiplayerConfig::default()
    });
    coord.begin().unwrap();
    assert_eq!(drain(&mut rx).len(), 1 + 3);

    coord.handle_message("PIECE 3").unwrap();
    assert!(!coord.engine().is_running());
    coord.handle_message("PIECE 3").unwrap();
    assert!(coord.engine().is_running());
}

#[test]
fn test_placement_sends_board_then_requests_piece() {
    let (mut coord, mut rx) = started(PieceKind::Dot, 5);

    coord.attempt_place(1, 0).unwrap();

    let sent = drain(&mut rx);
    let mut board = vec![0; 25];
    // Column 1, row 0 in x-outer order
    board[5] = PieceKind::Dot.value();
    assert_eq!(sent, vec![ClientMessage::Board(board), ClientMessage::RequestPiece]);
}

#[test]
fn test_invalid_placement_sends_nothing() {
    let (mut coord, mut rx) = started(PieceKind::Plus, 5);
    assert!(coord.attempt_place(0, 0).is_err());
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_clear_publishes_score_before_board() {
    let (mut coord, mut rx) = started(PieceKind::Dot, 5);
    // Keep the queue topped up so no fallback pieces are drawn
    for _ in 0..10 {
        coord.handle_message("PIECE 3").unwrap();
    }
    for x in 0..4 {
        coord.apply_command(GameCommand::Place { x, y: 3 }).unwrap();
    }
    drain(&mut rx);

    coord.attempt_place(4, 3).unwrap();
    let sent = drain(&mut rx);
    assert_eq!(sent[0], ClientMessage::Score(50));
    assert_eq!(sent[1], ClientMessage::Board(vec![0; 25]), "board is sent after the clear");
    assert_eq!(sent[2], ClientMessage::RequestPiece);
    assert_eq!(coord.engine().piece_source().underflows(), 0);
}

#[test]
fn test_lost_life_reports_and_restocks() {
    let (mut coord, mut rx) = started(PieceKind::Dot, 5);

    assert!(coord.tick(12_000));
    let sent = drain(&mut rx);
    assert_eq!(sent[0], ClientMessage::Lives(2));
    assert_eq!(sent[1..].to_vec(), vec![ClientMessage::RequestPiece; 5]);
}

#[test]
fn test_game_over_sends_die_once() {
    let (mut coord, mut rx) = started(PieceKind::Dot, 5);
    for _ in 0..6 {
        coord.tick(12_000);
    }
    assert!(coord.engine().is_game_over());

    let dies = drain(&mut rx)
        .into_iter()
        .filter(|m| *m == ClientMessage::Die)
        .count();
    assert_eq!(dies, 1);
}

#[test]
fn test_empty_queue_falls_back_to_local_pieces() {
    let (mut coord, _rx) = started(PieceKind::Dot, 5);
    // Three pieces left in the queue; the fourth placement runs it dry
    for i in 0..4 {
        coord.attempt_place(i, i).unwrap();
    }
    assert!(coord.engine().is_running());
    assert!(coord.engine().current_piece().is_some());
    assert!(coord.engine().piece_source().underflows() > 0);
}

#[test]
fn test_leaderboard_from_snapshot() {
    let (mut coord, _rx) = setup(MultiplayerConfig::default());
    coord.handle_message("SCORES\nA:500\nB:800:DEAD\nC:300").unwrap();

    assert_eq!(
        coord.leaderboard(),
        vec![
            standing("B", 800, true),
            standing("A", 500, false),
            standing("C", 300, false),
        ]
    );

    // A is missing from the next snapshot but keeps their row; B stays dead
    coord.handle_message("SCORES\nC:900:1\nB:1200:0").unwrap();
    assert_eq!(
        coord.leaderboard(),
        vec![
            standing("C", 900, false),
            standing("B", 800, true),
            standing("A", 500, false),
        ]
    );
}

#[test]
fn test_death_freezes_last_known_score() {
    let (mut coord, _rx) = setup(MultiplayerConfig::default());
    coord.handle_message("SCORES\nA:500:1\nB:300:1").unwrap();
    coord.handle_message("SCORES\nA:900:-1\nB:300:1").unwrap();
    assert_eq!(
        coord.leaderboard(),
        vec![standing("A", 500, true), standing("B", 300, false)]
    );

    coord.handle_message("SCORES\nB:400:1").unwrap();
    assert_eq!(
        coord.leaderboard(),
        vec![standing("A", 500, true), standing("B", 400, false)]
    );
}

#[test]
fn test_users_replace_members() {
    let (mut coord, _rx) = setup(MultiplayerConfig::default());
    coord.handle_message("USERS\nalice\nbob").unwrap();
    coord.handle_message("USERS\ncarol").unwrap();
    assert_eq!(coord.members(), ["carol".to_string()]);
}

#[test]
fn test_malformed_messages_never_reach_engine() {
    let (mut coord, _rx) = started(PieceKind::Dot, 5);
    let before = coord.snapshot();
    let queued = coord.engine().piece_source().len();

    assert_eq!(coord.handle_message(""), Err(ProtocolError::Empty));
    assert_eq!(coord.handle_message("PIECE 15"), Err(ProtocolError::PieceOutOfRange(15)));
    assert!(matches!(
        coord.handle_message("PIECE -1"),
        Err(ProtocolError::MalformedPiece(_))
    ));
    assert!(matches!(
        coord.handle_message("SCORES\nbroken"),
        Err(ProtocolError::MalformedScore(_))
    ));
    assert!(matches!(
        coord.handle_message("CHAT hello"),
        Err(ProtocolError::UnknownMessage(_))
    ));

    assert_eq!(coord.snapshot(), before);
    assert_eq!(coord.engine().piece_source().len(), queued);
    assert!(coord.leaderboard().is_empty());
}
