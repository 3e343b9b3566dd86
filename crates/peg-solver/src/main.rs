//! CLI entry point for the peg solitaire solver.
//!
//! Usage:
//!   peg-solver solve <ENCODING> [options]
//!   peg-solver moves <ENCODING>
//!   peg-solver show <ENCODING> [--moves s,o,e ...]
//!
//! Solve options:
//!   --all                List every solution instead of the first
//!   --count              Only count solutions
//!   --timeout <seconds>  Maximum search time for the first solution
//!   --max-nodes <n>      Maximum boards expanded for the first solution
//!
//! Set RUST_LOG=debug for search progress on stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use peg_solver::{
    count_solutions, find_solution, legal_moves, replay_steps, solve_all, Board, Move,
    SearchConfig, SearchStatus, Solution,
};

#[derive(Parser)]
#[command(name = "peg-solver")]
#[command(about = "Exhaustive solver for the 15-hole triangular peg solitaire puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board given as 15 symbols of 1 (peg) and 0 (empty)
    Solve {
        #[arg(value_name = "ENCODING")]
        encoding: String,

        /// List every solution
        #[arg(long, conflicts_with = "count")]
        all: bool,

        /// Only count solutions
        #[arg(long)]
        count: bool,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum boards to expand
        #[arg(long)]
        max_nodes: Option<usize>,
    },

    /// List the legal moves on a board
    Moves {
        #[arg(value_name = "ENCODING")]
        encoding: String,
    },

    /// Draw a board, optionally replaying moves on it
    Show {
        #[arg(value_name = "ENCODING")]
        encoding: String,

        /// Moves to replay, each as start,over,end
        #[arg(long, value_parser = parse_move, num_args = 1..)]
        moves: Vec<Move>,
    },
}

/// Output format for `solve`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    encoding: Board,
    pegs: usize,
    status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solutions: Option<Vec<Solution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes_expanded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_elapsed_ms: Option<u64>,
}

impl SolveOutput {
    fn new(board: Board, status: SearchStatus) -> Self {
        Self {
            encoding: board,
            pegs: board.peg_count(),
            status,
            solution: None,
            solutions: None,
            solution_count: None,
            nodes_expanded: None,
            time_elapsed_ms: None,
        }
    }
}

fn parse_move(s: &str) -> Result<Move, String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid move {:?}: {}", s, e))?;
    match parts.as_slice() {
        &[start, over, end] => Ok(Move::new(start, over, end)),
        _ => Err(format!("invalid move {:?}: expected start,over,end", s)),
    }
}

fn parse_board(encoding: &str) -> Result<Board> {
    encoding
        .parse()
        .with_context(|| format!("Error parsing board {:?}", encoding))
}

fn status_for(found: bool) -> SearchStatus {
    if found {
        SearchStatus::Solved
    } else {
        SearchStatus::NoSolution
    }
}

fn solve(board: Board, all: bool, count: bool, config: &SearchConfig) -> SolveOutput {
    if count {
        let total = count_solutions(&board);
        let mut output = SolveOutput::new(board, status_for(total > 0));
        output.solution_count = Some(total);
        return output;
    }

    if all {
        let solutions = solve_all(&board);
        let mut output = SolveOutput::new(board, status_for(!solutions.is_empty()));
        output.solution_count = Some(solutions.len() as u64);
        output.solutions = Some(solutions);
        return output;
    }

    let report = find_solution(&board, config);
    let mut output = SolveOutput::new(board, report.status);
    output.solution = report.solution;
    output.nodes_expanded = Some(report.nodes_expanded);
    output.time_elapsed_ms = Some(report.time_elapsed_ms);
    output
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            encoding,
            all,
            count,
            timeout,
            max_nodes,
        } => {
            let board = parse_board(&encoding)?;
            let config = SearchConfig {
                timeout: timeout.map(Duration::from_secs),
                max_nodes,
            };
            info!("solving {} ({} pegs)", board, board.peg_count());

            let output = solve(board, all, count, &config);
            println!("{}", serde_json::to_string_pretty(&output)?);

            // Exit with appropriate code
            if output.status != SearchStatus::Solved {
                std::process::exit(1);
            }
        }
        Commands::Moves { encoding } => {
            let board = parse_board(&encoding)?;
            let moves: Vec<Move> = legal_moves(&board).into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&moves)?);
        }
        Commands::Show { encoding, moves } => {
            let board = parse_board(&encoding)?;
            let boards = replay_steps(&board, &moves).context("Error replaying moves")?;
            for (step, current) in boards.iter().enumerate() {
                if step > 0 {
                    println!("\n{}", moves[step - 1]);
                }
                println!("{}", current.render());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("3,1,0"), Ok(Move::new(3, 1, 0)));
        assert_eq!(parse_move(" 12, 13 ,14"), Ok(Move::new(12, 13, 14)));
        assert!(parse_move("3,1").is_err());
        assert!(parse_move("a,b,c").is_err());
    }

    #[test]
    fn test_solve_output_json() {
        let board: Board = "110000000000000".parse().unwrap();
        let output = solve(board, false, false, &SearchConfig::default());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["encoding"], "110000000000000");
        assert_eq!(json["status"], "no_solution");
        assert_eq!(json["pegs"], 2);
        assert!(json.get("solution").is_none());

        let board: Board = "010100000000000".parse().unwrap();
        let output = solve(board, true, false, &SearchConfig::default());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "solved");
        assert_eq!(json["solutionCount"], 2);
        assert_eq!(json["solutions"][0][0]["start"], 1);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["peg-solver", "show", "011111111111111", "--moves", "3,1,0", "5,4,3"])
            .unwrap();
        match cli.command {
            Commands::Show { moves, .. } => assert_eq!(moves.len(), 2),
            _ => panic!("expected show"),
        }
    }
}
