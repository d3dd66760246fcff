//! Xiangqi AI CLI
//!
//! 命令行界面
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. 对局模式 (`play`)：长驻进程，通过 stdin/stdout 文本协议通信

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use xiangqi_engine::{protocol, Board, Color, Engine, EngineConfig, PieceTables, SearchLimits};

#[derive(Parser)]
#[command(name = "xiangqi-ai")]
#[command(about = "Xiangqi alpha-beta engine", long_about = None)]
struct Cli {
    /// 引擎配置 JSON 文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 置换表槽位数
    #[arg(long, global = true)]
    tt_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 对局模式（stdin/stdout 文本协议）
    Play {
        /// 开局阶段每步用时（秒）
        #[arg(long)]
        opening_time: Option<f64>,

        /// 之后每步用时（秒）
        #[arg(long)]
        default_time: Option<f64>,

        /// 开局阶段的搜索次数
        #[arg(long)]
        opening_searches: Option<u32>,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 时间限制（秒）
        #[arg(long)]
        time_limit: Option<f64>,

        /// 固定搜索深度
        #[arg(long)]
        depth: Option<u32>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,
    },

    /// 评估局面分数
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 引擎自我对弈若干步
    Selfplay {
        /// 起始局面，缺省为初始局面
        #[arg(long)]
        fen: Option<String>,

        /// 最多走多少步
        #[arg(long, default_value = "20")]
        moves: u32,

        /// 每步时间限制（秒）
        #[arg(long, default_value = "1.0")]
        time_limit: f64,
    },

    /// 以 JSON 输出默认评估表
    Tables,
}

#[derive(Serialize)]
struct BestResponse {
    #[serde(rename = "move")]
    mv: Option<String>,
    score: i32,
    depth: u32,
    nodes: u64,
    nps: f64,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct ScoreResponse<'a> {
    fen: &'a str,
    color: Color,
    score: i32,
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn load_config(cli: &Cli) -> EngineConfig {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path).unwrap_or_else(|e| fail(e)),
        None => EngineConfig::default(),
    };
    if let Some(tt_size) = cli.tt_size {
        config.search.tt_capacity = tt_size;
    }
    config
}

fn engine_at(config: EngineConfig, fen: Option<&str>) -> Engine {
    let mut engine = Engine::new(config);
    if let Some(fen) = fen {
        engine.set_position_fen(fen).unwrap_or_else(|e| fail(e));
    }
    engine
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(&cli);

    match cli.command {
        Commands::Play {
            opening_time,
            default_time,
            opening_searches,
        } => {
            let tc = &mut config.time_control;
            if let Some(t) = opening_time {
                tc.opening_time = t;
            }
            if let Some(t) = default_time {
                tc.default_time = t;
            }
            if let Some(n) = opening_searches {
                tc.opening_searches = n;
            }

            let mut engine = Engine::new(config);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            if let Err(e) = protocol::run(&mut engine, stdin.lock(), &mut stdout) {
                fail(e);
            }
        }

        Commands::Best {
            fen,
            time_limit,
            depth,
            json,
        } => {
            let mut engine = engine_at(config, Some(&fen));
            let limits = match (time_limit, depth) {
                (Some(t), d) => SearchLimits::time_secs(t).with_depth(d),
                (None, Some(d)) => SearchLimits::depth(d),
                // 都没给时按 5 秒
                (None, None) => SearchLimits::time_secs(5.0),
            };

            let result = engine.think(&limits);
            let elapsed = result.elapsed.as_secs_f64();
            let nps = calc_nps(result.nodes, elapsed);

            if json {
                let response = BestResponse {
                    mv: result.best_move.map(|m| m.to_string()),
                    score: result.score,
                    depth: result.depth,
                    nodes: result.nodes,
                    nps,
                    elapsed_ms: elapsed * 1000.0,
                };
                match serde_json::to_string_pretty(&response) {
                    Ok(s) => println!("{}", s),
                    Err(e) => fail(e),
                }
            } else {
                match result.best_move {
                    Some(mv) => println!("Best move: {} (score: {})", mv, result.score),
                    None => println!("No legal move (resign), score: {}", result.score),
                }
                println!(
                    "\nStats: depth={}, nodes={}, time={:.3}s, nps={:.0}",
                    result.depth, result.nodes, elapsed, nps
                );
            }
        }

        Commands::Moves { fen } => {
            let mut board = Board::from_fen(&fen).unwrap_or_else(|e| fail(e));
            let moves = board.legal_moves();
            println!("Legal moves ({}):", moves.len());
            for mv in &moves {
                println!("  {}", mv);
            }
        }

        Commands::Score { fen, json } => {
            let board = Board::from_fen(&fen).unwrap_or_else(|e| fail(e));
            let color = board.side_to_move();
            let score = board.evaluate();

            if json {
                let response = ScoreResponse {
                    fen: &fen,
                    color,
                    score,
                };
                match serde_json::to_string(&response) {
                    Ok(s) => println!("{}", s),
                    Err(e) => fail(e),
                }
            } else {
                let color_cn = if color == Color::Red { "红方" } else { "黑方" };
                println!("局面评估 ({} 视角): {}", color_cn, score);
            }
        }

        Commands::Selfplay {
            fen,
            moves,
            time_limit,
        } => {
            let mut engine = engine_at(config, fen.as_deref());
            println!("{}\n", engine.board());
            for ply in 1..=moves {
                let side = engine.side_to_move();
                let result = engine.play_best(&SearchLimits::time_secs(time_limit));
                match result.best_move {
                    Some(mv) => println!(
                        "{:>3}. {} {} (score: {}, depth: {})",
                        ply, side, mv, result.score, result.depth
                    ),
                    None => {
                        println!("{} resigns", side);
                        break;
                    }
                }
            }
            println!("\n{}", engine.board());
            println!("{}", engine.board().to_fen());
        }

        Commands::Tables => match PieceTables::default().to_json_pretty() {
            Ok(s) => println!("{}", s),
            Err(e) => fail(e),
        },
    }
}
