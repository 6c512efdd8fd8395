// ==========================================
// 采购订单库存差异报表 - 采购订单号规范化
// ==========================================
// 职责: 拆分子单号 → 剔除排除前缀 → 去除类别前缀 → 重新拼接
// 纯函数，对任意输入总有唯一输出，不报错
// ==========================================

use once_cell::sync::Lazy;
use regex::Regex;

/// 默认排除前缀（以此开头的子单号整体剔除）
pub const DEFAULT_EXCLUSION_PREFIX: &str = "CL-";

// 类别前缀: 开头的一段或多段 "大写字母+短横线"，如 "PO-"、"PO-XY-"
static CATEGORY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Z]+-)+").expect("category prefix pattern is valid"));

// 单段类别前缀，排除前缀必须符合此形式
static SINGLE_CATEGORY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+-$").expect("single prefix pattern is valid"));

#[derive(Debug, Clone)]
pub struct PoNormalizer {
    exclusion_prefix: String,
}

impl Default for PoNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSION_PREFIX)
    }
}

impl PoNormalizer {
    pub fn new(exclusion_prefix: impl Into<String>) -> Self {
        Self {
            exclusion_prefix: exclusion_prefix.into(),
        }
    }

    pub fn exclusion_prefix(&self) -> &str {
        &self.exclusion_prefix
    }

    /// 规范化采购订单号
    ///
    /// # 规则
    /// 1. None → ""
    /// 2. 按逗号拆分并 TRIM
    /// 3. 剔除以排除前缀开头的子单号
    /// 4. 去除类别前缀后再 TRIM，丢弃空白项
    /// 5. 剩一项直接返回，多项以逗号拼接，无剩余返回 ""
    ///
    /// # 示例
    /// - "CL-5,PO-123,XY-45" → "123,45"
    /// - "PO-999" → "999"
    pub fn normalize(&self, value: Option<&str>) -> String {
        let Some(raw) = value else {
            return String::new();
        };

        let cleaned: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter(|token| {
                self.exclusion_prefix.is_empty() || !token.starts_with(&self.exclusion_prefix)
            })
            .map(|token| strip_category_prefix(token).trim())
            .filter(|token| !token.is_empty())
            .collect();

        cleaned.join(",")
    }
}

/// 是否为单段类别前缀（如 "CL-"）
///
/// 规范化结果的子单号不再以类别前缀开头，因此只有这种形式的排除前缀
/// 才能保证再次规范化结果不变
pub fn is_category_prefix(prefix: &str) -> bool {
    SINGLE_CATEGORY_PREFIX.is_match(prefix)
}

/// 去除类别前缀（无前缀时原样返回）
pub fn strip_category_prefix(token: &str) -> &str {
    match CATEGORY_PREFIX.find(token) {
        Some(m) => &token[m.end()..],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_excludes_and_strips() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(Some("CL-5,PO-123,XY-45")), "123,45");
    }

    #[test]
    fn test_normalize_single_token_has_no_comma() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(Some("PO-999")), "999");
    }

    #[test]
    fn test_normalize_none_and_empty() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(None), "");
        assert_eq!(normalizer.normalize(Some("")), "");
        assert_eq!(normalizer.normalize(Some(" , ,")), "");
    }

    #[test]
    fn test_normalize_all_tokens_excluded() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(Some("CL-1,CL-2")), "");
    }

    #[test]
    fn test_normalize_token_without_prefix_passes_through() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(Some("  4500012  ")), "4500012");
        // 小写前缀不是类别前缀
        assert_eq!(normalizer.normalize(Some("po-77")), "po-77");
    }

    #[test]
    fn test_normalize_trims_around_commas() {
        let normalizer = PoNormalizer::default();
        assert_eq!(normalizer.normalize(Some("PO-1, PO-2 ,CL-3")), "1,2");
    }

    #[test]
    fn test_is_category_prefix() {
        assert!(is_category_prefix("CL-"));
        assert!(is_category_prefix("RT-"));
        assert!(!is_category_prefix("4500"));
        assert!(!is_category_prefix("cl-"));
        assert!(!is_category_prefix("CL-XY-"));
        assert!(!is_category_prefix(""));
    }

    #[test]
    fn test_normalize_is_idempotent_with_custom_prefix() {
        let normalizer = PoNormalizer::new("RT-");
        for input in ["RT-1,PO-4500123", "PO-RT-9,RT-2", "XRT-5"] {
            let once = normalizer.normalize(Some(input));
            assert_eq!(normalizer.normalize(Some(&once)), once, "input {:?}", input);
        }
        assert_eq!(normalizer.normalize(Some("RT-1,PO-4500123")), "4500123");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = PoNormalizer::default();
        let inputs = [
            "CL-5,PO-123,XY-45",
            "PO-999",
            "PO-CL-7,AB-CD-8",
            " X-1 , , Y-2",
            "plain",
            "",
        ];
        for input in inputs {
            let once = normalizer.normalize(Some(input));
            let twice = normalizer.normalize(Some(&once));
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn test_custom_exclusion_prefix() {
        let normalizer = PoNormalizer::new("RT-");
        assert_eq!(normalizer.normalize(Some("RT-1,CL-2,PO-3")), "2,3");
        assert_eq!(normalizer.exclusion_prefix(), "RT-");
    }
}
