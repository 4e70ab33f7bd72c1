mod aggregator;
mod view_diff;

use crate::record::PacketRecord;

pub(crate) const MAC_A: &str = "aa:aa:aa:aa:aa:aa";
pub(crate) const MAC_B: &str = "bb:bb:bb:bb:bb:bb";
pub(crate) const MAC_C: &str = "cc:cc:cc:cc:cc:cc";

/// A -> B 的一条 IPv4 记录
pub(crate) fn a_to_b() -> PacketRecord {
    PacketRecord::new(MAC_A, MAC_B)
        .with_ips("10.0.0.1", "10.0.0.2")
        .with_ip_ver(4)
        .with_eth_type(0x0800)
}

/// B -> A 的回应
pub(crate) fn b_to_a() -> PacketRecord {
    PacketRecord::new(MAC_B, MAC_A)
        .with_ips("10.0.0.2", "10.0.0.1")
        .with_ip_ver(4)
        .with_eth_type(0x0800)
}
