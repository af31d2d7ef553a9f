//! 头部字段提取
//!
//! 不同协议层打印头部的方式并不统一，有的写 `Name(Value)`，有的写 `Name=Value`，
//! 同一段里还可能混用，所以这里两种语法都收，且从不报错。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// 十进制数：可带符号、小数点和指数（C++ 流输出的小时间值形如 `2.5e-05`）
pub(crate) const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

/// 字段名 -> 原始字符串值
pub type FieldMap = BTreeMap<String, String>;

// 值里允许出现转义的右括号 `\)`
static PAREN_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\(((?:\\.|[^\\)])+)\)").expect("paren field regex"));

static EQ_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)=(\S+)").expect("eq field regex"));

/// 剥掉一层外围括号
fn strip_enclosing_parens(text: &str) -> &str {
    text.strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text)
}

/// 解析一段头部文本。
///
/// 先收集所有 `Name(Value)`，再收集所有 `Name=Value`；同名字段后写覆盖先写。
pub fn parse_key_values(text: &str) -> FieldMap {
    let body = strip_enclosing_parens(text.trim());
    let mut kv = FieldMap::new();

    for caps in PAREN_FIELD_RE.captures_iter(body) {
        kv.insert(caps[1].to_string(), caps[2].to_string());
    }
    for caps in EQ_FIELD_RE.captures_iter(body) {
        kv.insert(caps[1].to_string(), caps[2].to_string());
    }
    kv
}
