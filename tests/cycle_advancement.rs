//! Integration tests for the "new cycle" traversal
//!
//! Covers fan-out dedup, relay chains, and the documented skip for
//! upstream-fed identifiers.

mod common;

use common::{constant_node, manager_node, read_node, relay_node, timer_node, write_node};
use loopvis_rs::graph::node::{LOOP_ID_WIDGET, VALUE_WIDGET};
use loopvis_rs::{CycleExtension, EditorGraph, ExtensionConfig, LoopResolver, RecordingHost};

fn new_cycle(graph: &mut EditorGraph, host: &mut RecordingHost) {
    let mut ext = CycleExtension::new(ExtensionConfig::default());
    ext.new_cycle(graph, host);
}

#[test]
fn test_shared_constant_increments_once() {
    let mut graph = EditorGraph::new();
    let constant = graph.add_node(constant_node("run_3"));
    let writer = graph.add_node(write_node("stale", "IMAGE"));
    let reader = graph.add_node(read_node("stale", "IMAGE"));
    graph.connect(constant, 0, writer, 0).unwrap();

    // The reader has no loop_id input port, only the widget; give it one.
    let reader2 = graph.add_node(write_node("stale", "LATENT"));
    graph.connect(constant, 0, reader2, 0).unwrap();

    let mut host = RecordingHost::new();
    new_cycle(&mut graph, &mut host);

    // One increment on the source, every dependent sees the same value.
    assert_eq!(
        graph.node(constant).unwrap().widget_str(VALUE_WIDGET),
        Some("run_4")
    );
    assert_eq!(
        graph.node(writer).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("run_4")
    );
    assert_eq!(
        graph.node(reader2).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("run_4")
    );
    // The unconnected reader advances its own widget independently.
    assert_eq!(
        graph.node(reader).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("stale_2")
    );
}

#[test]
fn test_constant_behind_relay_chain_increments_once() {
    let mut graph = EditorGraph::new();
    let constant = graph.add_node(constant_node("batch_7"));
    let relay_a = graph.add_node(relay_node());
    let relay_b = graph.add_node(relay_node());
    let writer = graph.add_node(write_node("stale", "IMAGE"));
    let direct = graph.add_node(write_node("stale", "IMAGE"));

    graph.connect(constant, 0, relay_a, 0).unwrap();
    graph.connect(relay_a, 0, relay_b, 0).unwrap();
    graph.connect(relay_b, 0, writer, 0).unwrap();
    graph.connect(constant, 0, direct, 0).unwrap();

    let mut host = RecordingHost::new();
    new_cycle(&mut graph, &mut host);

    // Relayed and direct consumers share one increment of the source.
    assert_eq!(
        graph.node(constant).unwrap().widget_str(VALUE_WIDGET),
        Some("batch_8")
    );
    assert_eq!(
        graph.node(writer).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("batch_8")
    );
    assert_eq!(
        graph.node(direct).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("batch_8")
    );
}

#[test]
fn test_manager_fed_chain_is_left_alone() {
    let mut graph = EditorGraph::new();
    let manager = graph.add_node(
        manager_node("set1", "never")
            .with_output(loopvis_rs::graph::port::OutputPort::new("loop_id", "STRING")),
    );
    let writer = graph.add_node(write_node("stale", "IMAGE"));
    graph.connect(manager, 0, writer, 0).unwrap();

    // The identifier flows from the manager, so neither side advances.
    // Nothing checks that an upstream-fed chain advances anywhere; the
    // manager only moves on interrupt events.
    let mut host = RecordingHost::new();
    new_cycle(&mut graph, &mut host);

    assert_eq!(
        graph.node(manager).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("set1")
    );
    assert_eq!(
        graph.node(writer).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("stale")
    );
    assert!(host.resized.is_empty());
}

#[test]
fn test_result_is_traversal_order_independent() {
    // Same topology, two insertion orders.
    let build = |constant_first: bool| {
        let mut graph = EditorGraph::new();
        let (constant, writer) = if constant_first {
            let c = graph.add_node(constant_node("run_1"));
            let w = graph.add_node(write_node("stale", "IMAGE"));
            (c, w)
        } else {
            let w = graph.add_node(write_node("stale", "IMAGE"));
            let c = graph.add_node(constant_node("run_1"));
            (c, w)
        };
        graph.connect(constant, 0, writer, 0).unwrap();
        let mut host = RecordingHost::new();
        new_cycle(&mut graph, &mut host);
        (
            graph
                .node(constant)
                .unwrap()
                .widget_str(VALUE_WIDGET)
                .map(str::to_owned),
            graph
                .node(writer)
                .unwrap()
                .widget_str(LOOP_ID_WIDGET)
                .map(str::to_owned),
        )
    };

    assert_eq!(build(true), build(false));
}

#[test]
fn test_second_cycle_advances_again() {
    let mut graph = EditorGraph::new();
    let timer = graph.add_node(timer_node("run_8"));
    let mut host = RecordingHost::new();

    new_cycle(&mut graph, &mut host);
    new_cycle(&mut graph, &mut host);

    assert_eq!(
        graph.node(timer).unwrap().widget_str(LOOP_ID_WIDGET),
        Some("run_10")
    );
    assert_eq!(host.resized, vec![timer, timer]);
}

#[test]
fn test_resolver_sees_post_increment_value() {
    let mut graph = EditorGraph::new();
    let constant = graph.add_node(constant_node("run_3"));
    let writer = graph.add_node(write_node("stale", "IMAGE"));
    graph.connect(constant, 0, writer, 0).unwrap();

    let mut host = RecordingHost::new();
    new_cycle(&mut graph, &mut host);

    let resolver = LoopResolver::default();
    assert_eq!(resolver.resolve(&graph, writer).as_deref(), Some("run_4"));
}
