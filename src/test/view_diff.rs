use indexmap::IndexSet;

use crate::view::{
    EdgeKind, Keyed, Projection, ProjectionKind, ViewDiff, ViewEdge, ViewNode, ViewNodeKind,
    diff_keyed,
};

fn node(id: &str) -> ViewNode {
    ViewNode {
        id: id.to_string(),
        kind: ViewNodeKind::Eth,
        addr: Some(id.to_string()),
        vendor: None,
        cast_type: None,
        sender: true,
        receiver: false,
        parent: None,
    }
}

fn edge(source: &str, target: &str, count: u64) -> ViewEdge {
    ViewEdge {
        id: format!("{source}-{target}"),
        source: source.to_string(),
        target: target.to_string(),
        kind: EdgeKind::EthEth,
        count,
        one_way: false,
    }
}

fn flat(nodes: &[&str], edges: &[(&str, &str, u64)]) -> Projection {
    Projection {
        kind: ProjectionKind::Flat,
        nodes: nodes.iter().map(|id| node(id)).collect(),
        edges: edges.iter().map(|&(s, t, c)| edge(s, t, c)).collect(),
    }
}

fn pulse(ids: &[&str]) -> IndexSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn keys<T: Keyed>(items: &[T]) -> Vec<&str> {
    items.iter().map(Keyed::key).collect()
}

#[test]
fn keyed_diff_preserves_orders() {
    let prev = vec![node("a"), node("b"), node("c"), node("d")];
    let next = vec![node("e"), node("c"), node("a"), node("f")];

    fn ids(v: &[&ViewNode]) -> Vec<String> {
        v.iter().map(|n| n.id.clone()).collect()
    }

    let delta = diff_keyed(&prev, &next);
    assert_eq!(ids(&delta.enter), vec!["e", "f"]);
    assert_eq!(ids(&delta.update), vec!["c", "a"]);
    assert_eq!(ids(&delta.exit), vec!["b", "d"]);
}

#[test]
fn first_diff_is_all_enter() {
    let prev = Projection::empty(ProjectionKind::Flat);
    let next = flat(&["a", "b", "c"], &[("a", "b", 1), ("a", "c", 3)]);

    let diff = ViewDiff::between(&prev, &next, &pulse(&["a-b"]), false);
    assert_eq!(keys(&diff.nodes.enter), vec!["a", "b", "c"]);
    assert!(diff.nodes.update.is_empty() && diff.nodes.exit.is_empty());
    assert_eq!(diff.edges.enter.len(), 2);
    // 新进入的边不脉冲
    assert!(diff.edges.enter.iter().all(|c| !c.pulse));
    assert!(diff.pulse_node_ids.is_empty());
    assert_eq!(diff.pulse_edge_ids, vec!["a-b".to_string()]);
    assert!(!diff.reset);
}

#[test]
fn updates_carry_new_counts_and_pulse_flags() {
    let prev = flat(&["a", "b", "c", "d"], &[("a", "b", 1), ("a", "c", 1), ("c", "d", 1)]);
    let next = flat(&["a", "b", "c", "e"], &[("a", "b", 5), ("a", "c", 1), ("a", "e", 3)]);

    let diff = ViewDiff::between(&prev, &next, &pulse(&["a-b", "a-e", "c-d"]), false);

    assert_eq!(keys(&diff.nodes.enter), vec!["e"]);
    assert_eq!(keys(&diff.nodes.update), vec!["a", "b", "c"]);
    assert_eq!(keys(&diff.nodes.exit), vec!["d"]);

    let update: Vec<(&str, u64, bool)> = diff
        .edges
        .update
        .iter()
        .map(|c| (c.edge.id.as_str(), c.edge.count, c.pulse))
        .collect();
    assert_eq!(update, vec![("a-b", 5, true), ("a-c", 1, false)]);

    let enter = &diff.edges.enter[0];
    assert_eq!(enter.edge.id, "a-e");
    assert!(!enter.pulse);

    let exit = &diff.edges.exit[0];
    assert_eq!(exit.edge.id, "c-d");
    assert!(!exit.pulse);

    assert_eq!(diff.pulse_node_ids, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn widths_follow_current_count_range() {
    let prev = flat(&["a", "b", "c", "d"], &[("a", "b", 1), ("c", "d", 10)]);
    let next = flat(&["a", "b", "c"], &[("a", "b", 1), ("a", "c", 3), ("b", "c", 5)]);

    let diff = ViewDiff::between(&prev, &next, &IndexSet::new(), false);

    let width = |id: &str| {
        diff.edges
            .enter
            .iter()
            .chain(&diff.edges.update)
            .find(|c| c.edge.id == id)
            .map(|c| c.width)
    };
    assert_eq!(width("a-b"), Some(1.0));
    assert_eq!(width("a-c"), Some(3.0));
    assert_eq!(width("b-c"), Some(5.0));

    // 退出的边沿用旧比例尺
    assert_eq!(diff.edges.exit[0].edge.id, "c-d");
    assert_eq!(diff.edges.exit[0].width, 5.0);
}

#[test]
fn equal_counts_give_minimum_width() {
    let next = flat(&["a", "b", "c"], &[("a", "b", 7), ("b", "c", 7)]);
    let diff = ViewDiff::between(&Projection::empty(ProjectionKind::Flat), &next, &IndexSet::new(), false);
    assert!(diff.edges.enter.iter().all(|c| c.width == 1.0));
}

#[test]
fn identical_snapshots_diff_to_updates_only() {
    let p = flat(&["a", "b"], &[("a", "b", 2)]);
    let diff = ViewDiff::between(&p, &p, &IndexSet::new(), false);

    assert!(diff.nodes.enter.is_empty() && diff.nodes.exit.is_empty());
    assert_eq!(diff.nodes.update.len(), 2);
    assert_eq!(diff.edges.update.len(), 1);
    assert!(!diff.is_empty());

    let empty = Projection::empty(ProjectionKind::Flat);
    assert!(ViewDiff::between(&empty, &empty, &IndexSet::new(), false).is_empty());
}

#[test]
fn diff_serializes_for_the_renderer() {
    let next = flat(&["a", "b"], &[("a", "b", 2)]);
    let diff = ViewDiff::between(&Projection::empty(ProjectionKind::Flat), &next, &IndexSet::new(), true);
    let v = serde_json::to_value(&diff).expect("serialize");

    assert_eq!(v["projection"], "flat");
    assert_eq!(v["reset"], true);
    assert_eq!(v["nodes"]["enter"][0]["id"], "a");
    let e = &v["edges"]["enter"][0];
    assert_eq!(e["id"], "a-b");
    assert_eq!(e["kind"], "eth-eth");
    assert_eq!(e["width"], 1.0);
    assert_eq!(e["pulse"], false);
}

#[test]
fn pulse_ids_are_limited_to_visible_edges() {
    let prev = flat(&["a", "b"], &[("a", "b", 1)]);
    let next = flat(&["a", "b"], &[("a", "b", 2)]);

    // "a,1-b,2" 在平面图中被去掉，"a-c" 的端点被过滤
    let diff = ViewDiff::between(&prev, &next, &pulse(&["a,1-b,2", "a-b", "a-c"]), false);
    assert_eq!(diff.pulse_edge_ids, vec!["a-b".to_string()]);
    assert!(diff.edges.update[0].pulse);
}
