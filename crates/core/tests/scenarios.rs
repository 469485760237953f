use basement_core::game::{has_line_of_sight, is_adjacent_and_reachable};
use basement_core::mapgen::{Rect, Room, RoomTag};
use basement_core::{
    ActionOutcome, CharacterId, Direction, EnemyState, Game, GameConfig, GameEvent,
    GeneratedDungeon, Grid, Pos, TurnPhase,
};

fn config(max_pursuit: u32) -> GameConfig {
    let mut config = GameConfig::default();
    config.enemies.count = 0;
    config.enemies.max_pursuit = max_pursuit;
    config
}

fn grid_with_floor(rows: usize, cols: usize, floor: &[Pos]) -> Grid {
    let mut grid = Grid::new(rows, cols, 1.0);
    for &pos in floor {
        grid.carve_floor(pos).expect("in bounds");
    }
    grid.open_all_floor_walls().expect("unsealed");
    grid
}

fn start_game(mut grid: Grid, player_start: Pos, config: GameConfig) -> Game {
    let area = Rect { x: 0, y: 0, width: grid.rows(), height: grid.cols() };
    grid.seal();
    let dungeon = GeneratedDungeon {
        floor_index: 0,
        grid,
        rooms: vec![Room { area, bounds: area, tag: RoomTag::Player }],
        player_start,
        stairs: None,
        interactable_spawns: Vec::new(),
    };
    Game::with_dungeon(1, config, dungeon).expect("valid config")
}

/// Ends the player phase and ticks until the player is up again.
fn pass_turn(game: &mut Game) {
    assert_eq!(game.active_phase(), Some(TurnPhase::Player));
    game.end_current_phase();
    wait_for_player(game);
}

fn wait_for_player(game: &mut Game) {
    for _ in 0..32 {
        if game.active_phase() == Some(TurnPhase::Player) || game.outcome().is_some() {
            return;
        }
        game.tick().expect("running");
    }
    panic!("player phase never came back");
}

fn enemy_state(game: &Game, enemy: CharacterId) -> (EnemyState, u32) {
    let brain = game.character(enemy).and_then(|enemy| enemy.brain()).expect("enemy brain");
    (brain.state, brain.pursuit_counter)
}

#[test]
fn corridor_enemy_sees_the_player_and_closes_one_tile() {
    let corridor = [Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)];
    let mut game = start_game(grid_with_floor(3, 1, &corridor), corridor[0], config(10));
    let enemy = game.spawn_enemy(corridor[2]).expect("free tile");
    assert!(has_line_of_sight(game.grid(), corridor[2], corridor[0]));

    // Spawned facing north, so the first pursuit step is spent turning west.
    pass_turn(&mut game);
    assert_eq!(enemy_state(&game, enemy).0, EnemyState::Pursuing);
    assert_eq!(game.character(enemy).map(|enemy| enemy.pos), Some(corridor[2]));

    pass_turn(&mut game);
    assert_eq!(game.character(enemy).map(|enemy| enemy.pos), Some(corridor[1]));
    assert!(game.grid().is_occupied(corridor[1]));
    assert!(!game.grid().is_occupied(corridor[2]));
}

#[test]
fn adjacent_enemy_attacks_in_place() {
    let lane = [Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)];
    let mut game = start_game(grid_with_floor(1, 3, &lane), lane[1], config(10));
    let enemy = game.spawn_enemy(lane[0]).expect("free tile");
    assert_eq!(is_adjacent_and_reachable(game.grid(), lane[0], lane[1]), Some(Direction::North));
    game.drain_events();

    pass_turn(&mut game);
    assert_eq!(enemy_state(&game, enemy).0, EnemyState::Attacking);
    assert_eq!(game.character(enemy).map(|enemy| enemy.pos), Some(lane[0]));
    let attacks = game
        .events()
        .iter()
        .filter(|event| matches!(event, GameEvent::Attacked { attacker, .. } if *attacker == enemy))
        .count();
    assert_eq!(attacks, 1);
    assert!(!game.events().iter().any(|event| matches!(event, GameEvent::Moved { .. })));
}

#[test]
fn blind_pursuit_gives_up_after_the_ceiling() {
    let ceiling = 3;
    let mut floor: Vec<Pos> = (0..8).map(|x| Pos::new(x, 0)).collect();
    floor.push(Pos::new(0, 1));
    let mut game = start_game(grid_with_floor(8, 2, &floor), Pos::new(0, 0), config(ceiling));
    let enemy = game.spawn_enemy(Pos::new(7, 0)).expect("free tile");

    pass_turn(&mut game);
    assert_eq!(enemy_state(&game, enemy), (EnemyState::Pursuing, 0));

    // Duck into the pocket north of the start; rock hides it from the corridor.
    assert_eq!(
        game.attempt_move_player(),
        Ok(ActionOutcome::Moved { from: Pos::new(0, 0), to: Pos::new(0, 1) })
    );
    wait_for_player(&mut game);
    assert_eq!(enemy_state(&game, enemy), (EnemyState::Pursuing, 1));

    for counter in 2..=ceiling {
        pass_turn(&mut game);
        assert_eq!(enemy_state(&game, enemy), (EnemyState::Pursuing, counter));
    }

    pass_turn(&mut game);
    assert_eq!(enemy_state(&game, enemy), (EnemyState::Idle, 0));
    let resting = game.character(enemy).map(|enemy| enemy.pos);
    pass_turn(&mut game);
    assert_eq!(game.character(enemy).map(|enemy| enemy.pos), resting, "idle enemies stay put");
}

#[test]
fn turn_cycle_returns_to_the_first_phase() {
    let mut config = config(10);
    config.turn_order = vec![TurnPhase::Player, TurnPhase::Enemy, TurnPhase::Enemy];
    let mut game = start_game(grid_with_floor(1, 1, &[Pos::new(0, 0)]), Pos::new(0, 0), config);
    game.drain_events();

    pass_turn(&mut game);
    let started: Vec<TurnPhase> = game
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::PhaseStarted(phase) => Some(phase),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![TurnPhase::Enemy, TurnPhase::Enemy, TurnPhase::Player]);
    assert_eq!(game.scheduler().cursor(), 0);
}

#[test]
fn ending_a_phase_twice_is_ignored() {
    let mut game = start_game(grid_with_floor(1, 1, &[Pos::new(0, 0)]), Pos::new(0, 0), config(10));
    assert!(game.end_current_phase());
    assert!(!game.end_current_phase());
    game.tick().expect("running");
    assert_eq!(game.active_phase(), Some(TurnPhase::Enemy));
}
