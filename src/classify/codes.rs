//! 以太类型 / IP 协议号标签
//!
//! 未知代码不算错误，原样以十进制输出。

use std::borrow::Cow;

pub fn eth_type_label(code: u16) -> Cow<'static, str> {
    match code {
        0x0800 => Cow::Borrowed("IPv4"),
        0x0806 => Cow::Borrowed("ARP"),
        0x86DD => Cow::Borrowed("IPv6"),
        other => Cow::Owned(other.to_string()),
    }
}

pub fn ip_protocol_label(code: u8) -> Cow<'static, str> {
    match code {
        1 => Cow::Borrowed("ICMP"),
        6 => Cow::Borrowed("TCP"),
        17 => Cow::Borrowed("UDP"),
        58 => Cow::Borrowed("IPv6-ICMP"),
        255 => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
