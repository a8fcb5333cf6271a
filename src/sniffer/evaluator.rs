//! 规则求值
//! 分类优先于浏览器短代码；分类递归引用通过访问集合断环

use std::collections::HashSet;
use tracing::trace;

use super::registry::CategoryRegistry;
use super::rule::{RangeMarker, Rule};
use crate::useragent::{ShortCode, UserAgentProfile};
use crate::utils::VersionNumber;

/// 规则求值器
pub struct RuleEvaluator<'a> {
    profile: &'a UserAgentProfile,
    registry: &'a CategoryRegistry,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(profile: &'a UserAgentProfile, registry: &'a CategoryRegistry) -> Self {
        Self { profile, registry }
    }

    /// 对规则求值（已应用取反）
    pub fn evaluate(&self, rule: &Rule) -> bool {
        let mut visiting = HashSet::new();
        self.evaluate_with(rule, &mut visiting)
    }

    /// 任一规则通过即通过；空列表不通过
    pub fn any(&self, rules: &[Rule]) -> bool {
        rules.iter().any(|rule| self.evaluate(rule))
    }

    fn evaluate_with<'r>(&'r self, rule: &'r Rule, visiting: &mut HashSet<&'r str>) -> bool {
        let pass = if rule.target.is_empty() {
            // 无法解析出目标名的标记（如 `IE`、`5`）
            false
        } else if let Some(members) = self.registry.get(&rule.target) {
            // 分类引用完全委托给成员规则，忽略自身的版本/平台字段
            if visiting.insert(rule.target.as_str()) {
                let pass = members
                    .iter()
                    .any(|member| self.evaluate_with(member, visiting));
                visiting.remove(rule.target.as_str());
                pass
            } else {
                trace!("分类循环引用，按失败处理：{}", rule.target);
                false
            }
        } else if ShortCode::is_browser_code(&rule.target) {
            self.test_browser(rule)
        } else {
            // 未知目标（普通注释文字）
            false
        };

        pass != rule.negate
    }

    /// 浏览器规则（未取反）
    fn test_browser(&self, rule: &Rule) -> bool {
        let profile = self.profile;
        if rule.target != profile.browser_short {
            return false;
        }
        if let Some(platform) = &rule.platform {
            if *platform != profile.platform_short {
                return false;
            }
        }
        let Some(low) = &rule.version_low else {
            return true;
        };

        let version = profile.version_number();
        let low = VersionNumber::loose_float(low);
        if version < low {
            return false;
        }
        match (rule.range, &rule.version_high) {
            (RangeMarker::Exact, _) => version == low,
            (RangeMarker::Range, Some(high)) => version <= VersionNumber::loose_float(high),
            _ => true,
        }
    }
}
