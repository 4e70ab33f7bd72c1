//! IPv6 显示缩写

use regex::Regex;
use std::sync::LazyLock;

/// 两个及以上连续的全零组（每组后跟 `:`）
static ZERO_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:0+:){2,}").expect("zero-run pattern is valid"));

/// 只把第一段连续零组折叠成 `::`。
///
/// 这不是 RFC 5952 规范形式：后续的零组保持原样，非零组的前导零也不去掉。
/// 节点的显示地址依赖这个输出保持一致。
pub fn shorten_ipv6(addr: &str) -> String {
    ZERO_RUN.replace(addr, ":").into_owned()
}
