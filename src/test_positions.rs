//! 象棋测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、基准和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - EARLY_n / MID_n / END_n: 开局、中局、残局
//! - 其余按用途命名（走法、将军、重复局面、困毙）

// =============================================================================
// 开局 / 中局 / 残局
// =============================================================================

/// 初始局面
pub const START: &str = crate::fen::INITIAL_FEN;

/// 红方第一步: 中炮 (炮二平五)，黑方行棋
pub const EARLY_1: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b";

/// 双方跳马后
pub const MID_1: &str = "r1bakab1r/9/1cn3nc1/p1p1p1p1p/9/9/P1P1P1P1P/1CN3NC1/9/R1BAKAB1R w";

/// 单车对单士
pub const END_1: &str = "3k5/4a4/9/9/2R6/9/9/9/4A4/4K4 w";

// =============================================================================
// 吃子
// =============================================================================

/// 红车 e4 与黑车 e6 对峙，红方先走吃车
///
/// 吃车后黑将被将，只能出到 d9/f9，红车再平过去就是杀（中路有对脸笑）。
pub const ROOK_TRADE: &str = "4k4/9/9/4r4/9/4R4/9/9/9/4K4 w";

/// 红车 a4 可以白吃 a6 的黑车，两将不在同一路，吃完没有速杀
pub const FREE_ROOK: &str = "5k3/9/9/r8/9/R8/9/9/9/3K5 w";

/// 红车 e8 贴住黑将 e9，可以直接吃将
pub const ROOK_TAKES_KING: &str = "4k4/4R4/9/9/9/9/9/9/9/3K5 w";

// =============================================================================
// 走法规则
// =============================================================================

/// 红炮 a4，c4 红兵做炮架，e4 黑马
pub const CANNON_SCREEN: &str = "3k5/9/9/9/9/C1P1n4/9/9/9/4K4 w";

/// 红炮 a4，c4、d4 两个炮架，e4 黑马
pub const CANNON_DOUBLE_SCREEN: &str = "3k5/9/9/9/9/C1PPn4/9/9/9/4K4 w";

/// 红相 c4（d3 塞眼），黑象 g5（h6 塞眼），都在河边
pub const ELEPHANTS_AT_RIVER: &str = "3k5/9/9/7p1/6b2/2B6/3P5/9/9/4K4 w";

/// 红马 e4，e5 黑卒蹩住向上的马腿
pub const HORSE_LEG: &str = "3k5/9/9/9/4p4/4N4/9/9/9/4K4 w";

/// 过河与未过河的兵卒
pub const PAWNS: &str = "3k5/9/9/4P3p/9/2p6/P8/9/9/4K4 w";

/// 红帅在九宫角 d2，红仕在 f0
pub const PALACE_CORNER: &str = "5k3/9/9/9/9/9/9/3K5/9/5A3 w";

// =============================================================================
// 将军 / 困毙 / 重复
// =============================================================================

/// 将帅照面（飞将），双方都被将军
pub const KINGS_FACING: &str = "4k4/9/9/9/9/9/9/9/9/4K4 w";

/// 红车 e1 挡在帅前，e7 黑车
pub const PINNED_ROOK: &str = "3k5/9/4r4/9/9/9/9/9/4R4/4K4 w";

/// 黑方困毙：没被将军但无合法走法
pub const STALEMATE_BLACK: &str = "3k5/R8/9/9/9/9/9/9/9/4K4 b";

/// 黑将 e9 被自己的双车堵在底线，红车 e5 已经照将，黑方无解
pub const BOXED_KING: &str = "3rkr3/9/9/9/4R4/9/9/9/9/4K4 w";

/// 黑将被 e5 红车照将，黑车 a5 吃掉红车后反将红帅
pub const CHECK_RECAPTURE: &str = "4k4/9/9/9/r3R4/9/9/9/9/4K4 b";

/// 双方只剩将帅且不同列，可以来回走出重复局面
pub const BARE_KINGS_OFFSET: &str = "5k3/9/9/9/9/9/9/9/9/3K5 w";

/// 所有命名局面，用于批量测试
pub const ALL: &[(&str, &str)] = &[
    ("START", START),
    ("EARLY_1", EARLY_1),
    ("MID_1", MID_1),
    ("END_1", END_1),
    ("ROOK_TRADE", ROOK_TRADE),
    ("FREE_ROOK", FREE_ROOK),
    ("ROOK_TAKES_KING", ROOK_TAKES_KING),
    ("CANNON_SCREEN", CANNON_SCREEN),
    ("CANNON_DOUBLE_SCREEN", CANNON_DOUBLE_SCREEN),
    ("ELEPHANTS_AT_RIVER", ELEPHANTS_AT_RIVER),
    ("HORSE_LEG", HORSE_LEG),
    ("PAWNS", PAWNS),
    ("PALACE_CORNER", PALACE_CORNER),
    ("KINGS_FACING", KINGS_FACING),
    ("PINNED_ROOK", PINNED_ROOK),
    ("STALEMATE_BLACK", STALEMATE_BLACK),
    ("BOXED_KING", BOXED_KING),
    ("CHECK_RECAPTURE", CHECK_RECAPTURE),
    ("BARE_KINGS_OFFSET", BARE_KINGS_OFFSET),
];
