//! 单播/组播/广播判定

use serde::{Deserialize, Serialize};

pub const BROADCAST_MAC: &str = "ff:ff:ff:ff:ff:ff";

/// IPv4 组播映射的 OUI
const IPV4_MCAST_MAC_PREFIX: &str = "01:00:5e";
/// IPv6 组播映射前缀
const IPV6_MCAST_MAC_PREFIX: &str = "33:33:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastType {
    Unicast,
    Multicast,
    Broadcast,
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_broadcast_mac(mac: &str) -> bool {
    mac.eq_ignore_ascii_case(BROADCAST_MAC)
}

/// MAC 地址的投递类型
pub fn mac_cast_type(mac: &str) -> CastType {
    if is_broadcast_mac(mac) {
        CastType::Broadcast
    } else if has_prefix_ignore_case(mac, IPV4_MCAST_MAC_PREFIX)
        || has_prefix_ignore_case(mac, IPV6_MCAST_MAC_PREFIX)
    {
        CastType::Multicast
    } else {
        CastType::Unicast
    }
}

/// IP 地址的投递类型
///
/// 广播由同一角色的 MAC 决定（ARP 等以广播帧承载的 IP 流量），组播由 IP 本身决定。
pub fn ip_cast_type(ip: &str, paired_mac: &str) -> CastType {
    if is_broadcast_mac(paired_mac) {
        CastType::Broadcast
    } else if is_ipv4_multicast(ip) || has_prefix_ignore_case(ip, "ff") {
        CastType::Multicast
    } else {
        CastType::Unicast
    }
}

/// 224.x.x.x ~ 239.x.x.x（首段必须是三位十进制）
fn is_ipv4_multicast(ip: &str) -> bool {
    let Some((first, _)) = ip.split_once('.') else {
        return false;
    };
    first.len() == 3 && matches!(first.parse::<u16>(), Ok(224..=239))
}
