use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::path::Path;

use connect4_engine::*;

mod game;
use game::*;

const DEFAULT_CONFIG_PATH: &str = "connect4.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // a TOML file overrides the default weights and search settings
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = EngineConfig::load_or_default(Path::new(&config_path))?;
    tracing::info!(?config, "engine configured");
    let base_depth = config.search.base_depth;
    let engine: Engine = Engine::new(config)?;

    let stdin = stdin();
    let mut stdin = stdin.lock();

    println!("Welcome to Connect 4 (6 x {})\n", WIDTH);

    // choose who plays first
    let first = loop {
        print!("Who starts? h for human, i for AI: ");
        stdout().flush()?;
        let answer = match read_answer(&mut stdin)? {
            Some(answer) => answer,
            // input closed before the game started
            None => return Ok(()),
        };
        match answer.trim().to_lowercase().chars().next() {
            Some('h') => break Player::PlayerTwo,
            Some('i') => break Player::PlayerOne,
            _ => println!("Unknown answer given"),
        }
    };

    let mut game = Game::new(first);

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let next_move =
                    // AI player
                    if game.to_move == Player::PlayerOne {
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                        spinner.set_message("AI is thinking...");
                        spinner.enable_steady_tick(100);

                        let decision = engine.decide(&game.board, base_depth);
                        spinner.finish_and_clear();

                        match decision {
                            Some(decision) => {
                                println!(
                                    "AI played column {} in {:.2} seconds ({} positions searched).",
                                    decision.column,
                                    decision.elapsed.as_secs_f64(),
                                    decision.stats.nodes
                                );
                                decision.column
                            }
                            // a board without legal moves is caught as a draw below
                            None => break,
                        }

                    // human player
                    } else {
                        print!("Choose a column (0-{}) > ", WIDTH - 1);
                        stdout().flush()?;
                        let input_str = match read_answer(&mut stdin)? {
                            Some(input_str) => input_str,
                            None => {
                                println!();
                                break;
                            }
                        };

                        match parse_column(&input_str) {
                            Err(err) => {
                                println!("{}", err);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("The AI wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("You win!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }

    let moves: Vec<String> = game.moves.iter().map(|m| m.to_string()).collect();
    println!("Moves played: {}", moves.join(" "));
    Ok(())
}
