//! 地址分类
//!
//! 无状态的纯函数：单播/组播/广播判定、IPv6 显示缩写、以太类型与 IP 协议号标签，
//! 以及按 OUI 前缀查询厂商。

mod cast;
mod codes;
mod ipv6;
mod oui;

pub use cast::{BROADCAST_MAC, CastType, ip_cast_type, mac_cast_type};
pub use codes::{eth_type_label, ip_protocol_label};
pub use ipv6::shorten_ipv6;
pub use oui::OuiTable;
