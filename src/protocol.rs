//! 文本协议
//!
//! 每行一个命令，用于和对局界面通过 stdin/stdout 通信：
//!
//! ```text
//! ready                   -> readyok
//! side red|black          对手执哪一方，引擎执另一方
//! move r1 c1 r2 c2        对手走子；非法时回复 illegal
//! search [seconds]        引擎走子 -> move r1 c1 r2 c2 | resign
//! fen <fen>               载入局面
//! new                     新对局
//! print                   打印棋盘
//! quit
//! ```
//!
//! 坐标是引擎内部坐标：row 0 为红方底线，col 0..8 从左到右。

use crate::engine::Engine;
use crate::error::ProtocolError;
use crate::types::{Color, Move};
use log::{debug, warn};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ready,
    Side(Color),
    Move(Move),
    Search(Option<f64>),
    Fen(String),
    New,
    Print,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match name {
            "ready" => Ok(Command::Ready),
            "new" => Ok(Command::New),
            "print" => Ok(Command::Print),
            "quit" => Ok(Command::Quit),
            "side" => match args.first().copied() {
                Some("red") => Ok(Command::Side(Color::Red)),
                Some("black") => Ok(Command::Side(Color::Black)),
                _ => Err(ProtocolError::BadArguments {
                    command: "side",
                    expected: "red or black",
                }),
            },
            "move" => {
                let coords: Vec<i8> = args.iter().filter_map(|a| a.parse().ok()).collect();
                match coords.as_slice() {
                    &[r1, c1, r2, c2] if args.len() == 4 => {
                        Ok(Command::Move(Move::from_coords(r1, c1, r2, c2)))
                    }
                    _ => Err(ProtocolError::BadArguments {
                        command: "move",
                        expected: "four integers r1 c1 r2 c2",
                    }),
                }
            }
            "search" => match args.first() {
                None => Ok(Command::Search(None)),
                Some(s) => match s.parse::<f64>() {
                    Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(Command::Search(Some(secs))),
                    _ => Err(ProtocolError::BadArguments {
                        command: "search",
                        expected: "a non-negative number of seconds",
                    }),
                },
            },
            "fen" if !args.is_empty() => Ok(Command::Fen(args.join(" "))),
            "fen" => Err(ProtocolError::BadArguments {
                command: "fen",
                expected: "a FEN string",
            }),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

/// 一次协议会话的状态
pub struct Session<'a> {
    engine: &'a mut Engine,
    /// 引擎执的一方
    engine_side: Color,
    /// 本局已搜索次数，用于用时安排
    searches: u32,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a mut Engine) -> Self {
        Session {
            engine,
            engine_side: Color::Black,
            searches: 0,
        }
    }

    pub fn engine_side(&self) -> Color {
        self.engine_side
    }

    /// 处理一条命令，返回 false 表示退出
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Ready => writeln!(out, "readyok")?,
            Command::Side(human) => {
                self.engine_side = human.opposite();
                debug!("engine plays {}", self.engine_side);
            }
            Command::Move(mv) => {
                if !self.engine.apply_external_move(mv.from, mv.to) {
                    writeln!(out, "illegal")?;
                }
            }
            Command::Search(secs) => {
                self.searches += 1;
                let budget = secs.unwrap_or_else(|| {
                    self.engine
                        .config()
                        .time_control
                        .budget_for(self.searches)
                });
                match self.engine.search(budget, self.engine_side) {
                    Some(mv) => match self.engine.try_external_move(mv) {
                        Ok(_) => writeln!(
                            out,
                            "move {} {} {} {}",
                            mv.from.row, mv.from.col, mv.to.row, mv.to.col
                        )?,
                        Err(e) => {
                            warn!("search produced an unplayable move {}: {}", mv, e);
                            writeln!(out, "resign")?;
                        }
                    },
                    None => writeln!(out, "resign")?,
                }
            }
            Command::Fen(fen) => {
                if let Err(e) = self.engine.set_position_fen(&fen) {
                    warn!("bad fen '{}': {}", fen, e);
                } else {
                    self.searches = 0;
                }
            }
            Command::New => {
                self.engine.reset();
                self.searches = 0;
            }
            Command::Print => writeln!(out, "{}", self.engine.board())?,
        }
        out.flush()?;
        Ok(true)
    }
}

/// 协议主循环：读到 quit 或输入结束为止
pub fn run<R: BufRead, W: Write>(engine: &mut Engine, reader: R, writer: &mut W) -> io::Result<()> {
    let mut session = Session::new(engine);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        // 空行跳过
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Ok(command) => {
                if !session.handle(command, writer)? {
                    break;
                }
            }
            Err(e) => warn!("ignoring line '{}': {}", line, e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::search::SearchConfig;
    use crate::test_positions;
    use std::io::Cursor;

    fn engine() -> Engine {
        Engine::new(EngineConfig {
            search: SearchConfig {
                tt_capacity: 65_537,
                ..SearchConfig::default()
            },
            ..EngineConfig::default()
        })
    }

    fn run_script(engine: &mut Engine, script: &str) -> Vec<String> {
        let mut out = Vec::new();
        run(engine, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("ready"), Ok(Command::Ready));
        assert_eq!(Command::parse("side red"), Ok(Command::Side(Color::Red)));
        assert_eq!(
            Command::parse("move 2 7 2 4"),
            Ok(Command::Move(Move::from_coords(2, 7, 2, 4)))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(None)));
        assert_eq!(Command::parse("search 1.5"), Ok(Command::Search(Some(1.5))));
        assert_eq!(
            Command::parse("fen 4k4/9/9/9/9/9/9/9/9/4K4 w"),
            Ok(Command::Fen("4k4/9/9/9/9/9/9/9/9/4K4 w".to_string()))
        );
        assert!(matches!(
            Command::parse("move 1 2 3"),
            Err(ProtocolError::BadArguments { command: "move", .. })
        ));
        assert!(matches!(
            Command::parse("search -1"),
            Err(ProtocolError::BadArguments { .. })
        ));
        assert_eq!(
            Command::parse("go"),
            Err(ProtocolError::UnknownCommand("go".to_string()))
        );
    }

    #[test]
    fn test_ready_and_quit() {
        let mut e = engine();
        let out = run_script(&mut e, "ready\n\nbogus\nquit\nready\n");
        assert_eq!(out, vec!["readyok"]);
    }

    #[test]
    fn test_human_move_then_engine_reply() {
        let mut e = engine();
        let out = run_script(&mut e, "side red\nmove 2 7 2 4\nsearch 0.05\n");
        assert_eq!(out.len(), 1);
        let parts: Vec<&str> = out[0].split_whitespace().collect();
        assert_eq!(parts[0], "move");
        assert_eq!(parts.len(), 5);
        // 引擎的走法已经执行，轮到红方
        assert_eq!(e.side_to_move(), Color::Red);
    }

    #[test]
    fn test_illegal_move() {
        let mut e = engine();
        let fen = e.board().to_fen();
        let out = run_script(&mut e, "move 0 0 5 0\nmove 9 0 8 0\n");
        assert_eq!(out, vec!["illegal", "illegal"]);
        assert_eq!(e.board().to_fen(), fen);
    }

    #[test]
    fn test_resign() {
        let mut e = engine();
        let script = format!("fen {}\nside red\nsearch 0.05\n", test_positions::STALEMATE_BLACK);
        let out = run_script(&mut e, &script);
        assert_eq!(out, vec!["resign"]);
    }

    #[test]
    fn test_engine_plays_red() {
        let mut e = engine();
        let out = run_script(&mut e, "side black\nsearch 0.05\nprint\n");
        assert!(out[0].starts_with("move "));
        assert!(out.iter().any(|l| l.contains("Black to move")));
    }

    #[test]
    fn test_new_resets() {
        let mut e = engine();
        run_script(&mut e, "move 2 7 2 4\nnew\n");
        assert_eq!(e.board().to_fen(), crate::fen::INITIAL_FEN);
    }
}
