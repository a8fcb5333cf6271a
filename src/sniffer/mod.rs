//! 嗅探模块：指令注释解析、规则求值与按行过滤
pub mod rule;
pub mod registry;
pub mod evaluator;
pub mod directive;
pub mod filter;
pub mod blacklist;
pub mod cache;
#[allow(clippy::module_inception)]
pub mod sniffer;

// 导出核心接口
pub use self::rule::{Rule, RangeMarker};
pub use self::registry::CategoryRegistry;
pub use self::evaluator::RuleEvaluator;
pub use self::directive::{Directive, DirectiveLine, DIRECTIVE_OPENER, DIRECTIVE_CLOSER};
pub use self::filter::{SnifferPass, SniffedLines, SniffedReader, PassStats, sniff_lines, sniff_text};
pub use self::blacklist::Blacklist;
pub use self::cache::SnifferCacheManager;
pub use self::sniffer::Sniffer;
