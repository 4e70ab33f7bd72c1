use super::{MAC_A, MAC_B, MAC_C, a_to_b, b_to_a};
use crate::classify::{BROADCAST_MAC, CastType, OuiTable};
use crate::record::{IpVersion, PacketRecord};
use crate::topo::{Aggregator, LinkKind, Node, NodeKind};

fn ip_a() -> String {
    format!("{MAC_A},10.0.0.1")
}

fn ip_b() -> String {
    format!("{MAC_B},10.0.0.2")
}

#[test]
fn request_and_reply_share_links_and_flags() {
    let mut agg = Aggregator::new();
    for _ in 0..3 {
        agg.ingest(a_to_b()).expect("a -> b");
    }
    agg.ingest(b_to_a()).expect("b -> a");

    let reg = agg.registry();
    let ids: Vec<&str> = reg.nodes().iter().map(Node::id).collect();
    assert_eq!(ids, vec![MAC_A, ip_a().as_str(), MAC_B, ip_b().as_str()]);

    for id in &ids {
        let node = reg.node(id).expect("node");
        assert!(node.sender(), "{id} should be a sender");
        assert!(node.receiver(), "{id} should be a receiver");
    }

    let eth = reg.link(&format!("{MAC_A}-{MAC_B}")).expect("eth-eth link");
    assert_eq!(eth.kind, LinkKind::EthEth);
    assert_eq!(eth.count, 4);

    let ip = reg.link(&format!("{}-{}", ip_a(), ip_b())).expect("ip-ip link");
    assert_eq!(ip.kind, LinkKind::IpIp);
    assert_eq!(ip.count, 4);

    // 反向 id 从不生成
    assert!(!reg.contains(&format!("{MAC_B}-{MAC_A}")));
    assert!(!reg.contains(&format!("{}-{}", ip_b(), ip_a())));

    for (mac, ip_id) in [(MAC_A, ip_a()), (MAC_B, ip_b())] {
        let iface = reg.link(&format!("{mac}-{ip_id}")).expect("eth-ip link");
        assert_eq!(iface.kind, LinkKind::EthIp);
        assert_eq!(iface.count, 1);
    }
    assert_eq!(reg.link_count(), 4);

    let eth_a = reg.node(MAC_A).and_then(Node::as_eth).expect("eth a");
    assert!(eth_a.associated_ips.contains(&ip_a()));
    let ip_node = reg.node(&ip_a()).and_then(Node::as_ip).expect("ip a");
    assert!(ip_node.associated_eths.contains(MAC_A));
    assert_eq!(ip_node.ip_version, IpVersion::V4);
}

#[test]
fn discovery_order_within_one_record() {
    let mut agg = Aggregator::new();
    agg.ingest(a_to_b()).expect("ingest");

    let links: Vec<&str> = agg.registry().links().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        links,
        vec![
            format!("{MAC_A}-{}", ip_a()).as_str(),
            format!("{MAC_A}-{MAC_B}").as_str(),
            format!("{}-{}", ip_a(), ip_b()).as_str(),
            format!("{MAC_B}-{}", ip_b()).as_str(),
        ]
    );

    let pulse: Vec<&str> = agg.pulse().iter().map(String::as_str).collect();
    assert_eq!(pulse, links);
}

#[test]
fn replaying_a_batch_doubles_communication_counts() {
    let batch = vec![
        a_to_b(),
        b_to_a(),
        PacketRecord::new(MAC_A, MAC_C).with_ips("10.0.0.1", "10.0.0.3"),
        PacketRecord::new(MAC_C, MAC_B),
    ];

    let mut agg = Aggregator::new();
    for record in batch.iter().cloned() {
        agg.ingest(record).expect("first pass");
    }
    let first: Vec<(String, u64)> = agg
        .registry()
        .links()
        .iter()
        .map(|l| (l.id.clone(), l.count))
        .collect();

    for record in batch.iter().cloned() {
        agg.ingest(record).expect("second pass");
    }

    assert_eq!(agg.registry().link_count(), first.len());
    for (id, count) in first {
        let link = agg.registry().link(&id).expect("link survives");
        if link.kind.is_communication() {
            assert_eq!(link.count, count * 2, "{id}");
        } else {
            assert_eq!(link.count, 1, "{id}");
        }
    }
}

#[test]
fn repeated_records_create_no_duplicates() {
    let mut agg = Aggregator::new();
    for _ in 0..50 {
        agg.ingest(a_to_b()).expect("ingest");
    }
    assert_eq!(agg.registry().node_count(), 4);
    assert_eq!(agg.registry().link_count(), 4);
    assert_eq!(agg.stats().records, 50);
    assert_eq!(agg.stats().eth_nodes, 2);
    assert_eq!(agg.stats().ip_nodes, 2);
    assert_eq!(agg.stats().links, 4);
    assert_eq!(agg.records().len(), 50);

    let eth = agg.registry().link(&format!("{MAC_A}-{MAC_B}")).expect("eth-eth");
    assert_eq!(eth.count, 50);
}

#[test]
fn missing_mac_is_rejected_without_mutation() {
    let mut agg = Aggregator::new();

    let no_src = PacketRecord {
        dst_mac: Some(MAC_B.to_string()),
        src_ip: Some("10.0.0.1".to_string()),
        ..PacketRecord::default()
    };
    let err = agg.ingest(no_src).expect_err("missing src_mac");
    assert_eq!(err.field, "src_mac");

    let empty_dst = PacketRecord::new(MAC_A, "");
    let err = agg.ingest(empty_dst).expect_err("empty dst_mac");
    assert_eq!(err.field, "dst_mac");

    assert_eq!(agg.registry().node_count(), 0);
    assert_eq!(agg.registry().link_count(), 0);
    assert!(agg.pulse().is_empty());
    assert!(agg.records().is_empty());
    assert_eq!(agg.stats().rejected, 2);
    assert_eq!(agg.stats().records, 0);
}

#[test]
fn missing_ips_skip_network_layer() {
    let mut agg = Aggregator::new();
    agg.ingest(PacketRecord::new(MAC_A, MAC_B)).expect("no ips");
    assert_eq!(agg.registry().node_count(), 2);
    assert_eq!(agg.registry().link_count(), 1);

    // 只有源 IP：源 IP 节点与接口链路照常建立，但没有 ip-ip
    let half = PacketRecord {
        src_ip: Some("10.0.0.1".to_string()),
        ..PacketRecord::new(MAC_A, MAC_C)
    };
    agg.ingest(half).expect("src ip only");

    let reg = agg.registry();
    assert!(reg.contains(&ip_a()));
    assert!(reg.contains(&format!("{MAC_A}-{}", ip_a())));
    assert_eq!(
        reg.links().iter().filter(|l| l.kind == LinkKind::IpIp).count(),
        0
    );
    let c = reg.node(MAC_C).expect("eth c");
    assert!(c.receiver() && !c.sender());
    assert!(c.associated().is_empty());
}

#[test]
fn ipv6_addr_is_shortened_but_id_is_raw() {
    let raw = "2001:0db8:0000:0000:0000:0000:0000:0001";
    let record = PacketRecord::new(MAC_A, MAC_B).with_ips(raw, "ff02:0000:0000:0000:0000:0000:0000:0001");
    let mut agg = Aggregator::new();
    agg.ingest(record).expect("ingest");

    let id = format!("{MAC_A},{raw}");
    let node = agg.registry().node(&id).expect("raw id");
    assert_eq!(node.addr(), "2001:0db8::0001");
    assert_eq!(node.kind(), NodeKind::Ipv6);
    assert_eq!(node.cast_type(), CastType::Unicast);

    let dst = agg
        .registry()
        .nodes()
        .iter()
        .find(|n| n.id().starts_with(MAC_B) && n.as_ip().is_some())
        .expect("dst ip");
    assert_eq!(dst.cast_type(), CastType::Multicast);
}

#[test]
fn broadcast_mac_makes_paired_ip_broadcast() {
    let record = PacketRecord::new(MAC_A, BROADCAST_MAC)
        .with_ips("10.0.0.1", "10.0.0.255")
        .with_eth_type(0x0806);
    let mut agg = Aggregator::new();
    agg.ingest(record).expect("ingest");

    let reg = agg.registry();
    assert_eq!(reg.node(BROADCAST_MAC).expect("eth").cast_type(), CastType::Broadcast);
    let ip = reg
        .node(&format!("{BROADCAST_MAC},10.0.0.255"))
        .expect("ip");
    assert_eq!(ip.cast_type(), CastType::Broadcast);
}

#[test]
fn vendor_from_record_or_oui_table() {
    let mut oui = OuiTable::default();
    oui.insert("cc:cc:cc", "Example Corp");

    let mut agg = Aggregator::with_oui(oui);
    let mut record = PacketRecord::new(MAC_A, MAC_C);
    record.src_mac_vendor = Some("Acme".to_string());
    agg.ingest(record).expect("ingest");

    let reg = agg.registry();
    assert_eq!(reg.node(MAC_A).and_then(Node::vendor), Some("Acme"));
    assert_eq!(reg.node(MAC_C).and_then(Node::vendor), Some("Example Corp"));
}

#[test]
fn unknown_vendor_filled_by_later_observation() {
    let mut agg = Aggregator::new();
    agg.ingest(PacketRecord::new(MAC_A, MAC_B)).expect("first");
    assert_eq!(agg.registry().node(MAC_B).and_then(Node::vendor), None);

    let mut record = PacketRecord::new(MAC_A, MAC_B);
    record.dst_mac_vendor = Some("Later Inc".to_string());
    agg.ingest(record).expect("second");
    assert_eq!(agg.registry().node(MAC_B).and_then(Node::vendor), Some("Later Inc"));
}

#[test]
fn take_pulse_clears_the_set() {
    let mut agg = Aggregator::new();
    agg.ingest(a_to_b()).expect("ingest");
    let pulse = agg.take_pulse();
    assert_eq!(pulse.len(), 4);
    assert!(agg.pulse().is_empty());

    // 接口链路不递增，但仍然产生脉冲
    agg.ingest(a_to_b()).expect("again");
    assert!(agg.pulse().contains(&format!("{MAC_A}-{}", ip_a())));
    assert_eq!(agg.pulse().len(), 4);
}
