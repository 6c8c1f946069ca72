mod support;

use centipede::{Board, EngineConfig, KeyCode};
use std::time::Duration;
use support::{eventually, quiet_config, Game};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn test_move_right_five_times() {
    let game = Game::start(quiet_config(5));
    for _ in 0..5 {
        game.press(KeyCode::Char('d'));
    }
    assert!(eventually(WAIT, || game.state.player_snapshot().col() == 45));
    assert_eq!(game.state.player_snapshot().row(), 20);
    assert!(eventually(WAIT, || game.glyph_at(20, 45) == Some('|')));

    let (state, _) = game.quit();
    assert!(!state.is_running());
}

#[test]
fn test_burst_of_moves_stays_in_bounds() {
    let game = Game::start(quiet_config(2));
    let bounds = Board::PLAYER_BOUNDS;
    let legs: [(char, fn(i32, i32) -> bool); 4] = [
        ('a', |_, col| col == 0),
        ('w', |row, _| row == 17),
        ('d', |_, col| col == 79),
        ('s', |row, _| row == 22),
    ];
    for (key, reached) in legs {
        for _ in 0..120 {
            game.press(KeyCode::Char(key));
        }
        assert!(eventually(WAIT, || {
            let player = game.state.player_snapshot();
            assert!(bounds.contains(player.row(), player.col()));
            reached(player.row(), player.col())
        }));
    }
    game.quit();
}

#[test]
fn test_shot_travels_up_and_disappears() {
    let game = Game::start(quiet_config(50));
    game.press(KeyCode::Char(' '));

    let mut first_row = None;
    assert!(eventually(WAIT, || {
        first_row = (0..20).find(|&row| game.glyph_at(row, 40) == Some('^'));
        first_row.is_some()
    }));
    assert_eq!(first_row, Some(19));

    assert!(eventually(WAIT, || game.state.projectiles().live() == 0));
    for row in 2..20 {
        assert_ne!(game.glyph_at(row, 40), Some('^'), "stale shot at row {row}");
    }

    let (_, report) = game.quit();
    assert_eq!(report.projectiles_spawned, 1);
    assert_eq!(report.projectiles_outstanding, 0);
}

#[test]
fn test_quit_shows_banner_once_and_joins() {
    let game = Game::start(EngineConfig {
        tick: Duration::from_millis(2),
        ..EngineConfig::default()
    });
    game.press(KeyCode::Char('q'));
    game.press(KeyCode::Esc);
    let (state, _) = game.join();

    assert!(!state.is_running());
    state.with_screen(|surface| {
        assert_eq!(surface.banners().len(), 1);
        assert_eq!(surface.keypress_waits(), 1);
        assert!(surface.is_finished());
        assert!(surface.is_closed());
    });
}

#[test]
fn test_quit_drains_in_flight_shots() {
    let game = Game::start(quiet_config(20));
    for _ in 0..10 {
        game.press(KeyCode::Char(' '));
    }
    assert!(eventually(WAIT, || game.state.projectiles().spawned_total() == 10));
    let (state, report) = game.quit();

    assert_eq!(report.projectiles_spawned, 10);
    assert_eq!(report.projectiles_outstanding, 0);
    assert_eq!(state.projectiles().live(), 0);
}

#[test]
fn test_lost_keyboard_stops_without_banner() {
    let game = Game::start(quiet_config(2));
    let (state, _) = game.disconnect();
    assert!(!state.is_running());
    state.with_screen(|surface| {
        assert!(surface.banners().is_empty());
        assert!(surface.is_closed());
    });
}

#[test]
fn test_hud_shows_configured_lives() {
    let game = Game::start(EngineConfig {
        lives: 7,
        ..quiet_config(2)
    });
    assert!(eventually(WAIT, || {
        game.state.with_screen(|surface| &surface.row_text(0)[42..46] == "7   ")
    }));
    game.quit();
}

#[test]
fn test_respawn_starts_a_second_wave() {
    let game = Game::start(EngineConfig {
        tick: Duration::from_millis(1),
        enemy_segments: 2,
        respawn: true,
        ..EngineConfig::default()
    });
    assert!(eventually(Duration::from_secs(20), || {
        game.state.with_caterpillar(|chain, _| chain.iter().any(|segment| segment.id() >= 2))
    }));
    game.quit();
}
