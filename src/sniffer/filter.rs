//! 按行过滤核心
//! 单次过滤过程独占分类注册表，逐行求值并惰性产出通过的行

use std::io::BufRead;
use tracing::{debug, trace};

use super::directive::{Directive, DirectiveLine};
use super::evaluator::RuleEvaluator;
use super::registry::CategoryRegistry;
use crate::error::{SnifferError, SnifferResult};
use crate::useragent::UserAgentProfile;

/// 单次过滤统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub lines_read: usize,
    pub lines_emitted: usize,
    pub lines_dropped: usize,
    pub definitions: usize,
}

/// 单次过滤过程：借用画像，独占注册表
#[derive(Debug)]
pub struct SnifferPass<'p> {
    profile: &'p UserAgentProfile,
    registry: CategoryRegistry,
    stats: PassStats,
}

impl<'p> SnifferPass<'p> {
    pub fn new(profile: &'p UserAgentProfile) -> Self {
        Self {
            profile,
            registry: CategoryRegistry::new(),
            stats: PassStats::default(),
        }
    }

    /// 处理一行（可带行尾换行符）
    ///
    /// - 无指令：原样返回
    /// - 分类定义：登记分类，返回前缀
    /// - 条件行：任一规则通过则返回前缀，否则丢弃（`None`）
    pub fn process_line(&mut self, line: &str) -> Option<String> {
        self.stats.lines_read += 1;

        let Some(directive_line) = DirectiveLine::split(line) else {
            self.stats.lines_emitted += 1;
            return Some(line.to_string());
        };

        match directive_line.directive() {
            Directive::Definition { name, rules } => {
                // 缺少分类名的定义不登记，引用时按未知目标处理
                if name.is_empty() {
                    trace!("分类定义缺少名称，忽略：{}", directive_line.body.trim());
                } else {
                    trace!("定义分类：{}，规则数：{}", name, rules.len());
                    self.registry.define(name, rules);
                    self.stats.definitions += 1;
                }
                self.stats.lines_emitted += 1;
                Some(directive_line.kept_text())
            }
            Directive::Condition { rules } => {
                let evaluator = RuleEvaluator::new(self.profile, &self.registry);
                if evaluator.any(&rules) {
                    self.stats.lines_emitted += 1;
                    Some(directive_line.kept_text())
                } else {
                    trace!("条件未通过，丢弃：{}", directive_line.body.trim());
                    self.stats.lines_dropped += 1;
                    None
                }
            }
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn stats(&self) -> PassStats {
        self.stats
    }

    fn log_finished(&self) {
        debug!(
            "嗅探完成（{}）：读取{}行，输出{}行，丢弃{}行，分类定义{}条",
            self.profile.variant_tag(),
            self.stats.lines_read,
            self.stats.lines_emitted,
            self.stats.lines_dropped,
            self.stats.definitions
        );
    }
}

/// 惰性过滤迭代器
///
/// 输入项为一行文本（通常带行尾换行符），输出通过的行
pub struct SniffedLines<'p, I> {
    lines: I,
    pass: SnifferPass<'p>,
    finished: bool,
}

impl<'p, I> SniffedLines<'p, I> {
    pub fn stats(&self) -> PassStats {
        self.pass.stats()
    }
}

impl<'p, I, S> Iterator for SniffedLines<'p, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        for line in self.lines.by_ref() {
            if let Some(kept) = self.pass.process_line(line.as_ref()) {
                return Some(kept);
            }
        }
        self.finished = true;
        self.pass.log_finished();
        None
    }
}

/// 对行序列执行过滤，返回惰性迭代器
///
/// 分类状态只存在于本次迭代中；重新过滤需要提供新的行序列
pub fn sniff_lines<'p, I, S>(lines: I, profile: &'p UserAgentProfile) -> SniffedLines<'p, I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SniffedLines {
        lines: lines.into_iter(),
        pass: SnifferPass::new(profile),
        finished: false,
    }
}

/// 过滤整段文本，保留每行原有的换行符
pub fn sniff_text(text: &str, profile: &UserAgentProfile) -> String {
    sniff_lines(text.split_inclusive('\n'), profile).collect()
}

/// 基于 `BufRead` 的惰性过滤迭代器
///
/// 读取失败或遇到非 UTF-8 内容时产出一个错误项并结束
pub struct SniffedReader<'p, R> {
    reader: R,
    pass: SnifferPass<'p>,
    finished: bool,
}

impl<'p, R: BufRead> SniffedReader<'p, R> {
    pub fn new(reader: R, profile: &'p UserAgentProfile) -> Self {
        Self {
            reader,
            pass: SnifferPass::new(profile),
            finished: false,
        }
    }

    /// 不产出任何内容的迭代器（黑名单浏览器）
    pub(crate) fn withheld(reader: R, profile: &'p UserAgentProfile) -> Self {
        Self {
            finished: true,
            ..Self::new(reader, profile)
        }
    }

    pub fn stats(&self) -> PassStats {
        self.pass.stats()
    }

    fn read_line(&mut self) -> SnifferResult<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                SnifferError::InvalidInput(format!("输入不是有效的UTF-8文本：{}", e))
            }
            _ => SnifferError::IoError(e),
        })?;
        Ok((read > 0).then_some(line))
    }
}

impl<'p, R: BufRead> Iterator for SniffedReader<'p, R> {
    type Item = SnifferResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.read_line() {
                Ok(Some(line)) => {
                    if let Some(kept) = self.pass.process_line(&line) {
                        return Some(Ok(kept));
                    }
                }
                Ok(None) => {
                    self.finished = true;
                    self.pass.log_finished();
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
