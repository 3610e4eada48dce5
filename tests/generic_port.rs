//! Integration tests for generic passthrough port typing

mod common;

use common::interrupt_node;
use loopvis_rs::graph::node::{GraphNode, NodeCategory, NodeRole};
use loopvis_rs::graph::port::{InputPort, LinkColor, OutputPort};
use loopvis_rs::{
    ConnectionChange, CycleExtension, EditorGraph, ExtensionConfig, PortSide, RecordingHost,
};

fn typed_source(port_type: &str) -> GraphNode {
    GraphNode::new("Source", NodeRole::Generic, NodeCategory::Other)
        .with_output(OutputPort::new("out", port_type))
}

fn typed_sink(port_type: &str) -> GraphNode {
    GraphNode::new("Sink", NodeRole::Generic, NodeCategory::Other)
        .with_input(InputPort::new("in", port_type))
}

#[test]
fn test_connect_disconnect_round_trip() {
    let mut ext = CycleExtension::new(ExtensionConfig::default());
    let mut graph = EditorGraph::new();
    let mut host = RecordingHost::new().with_color("IMAGE", LinkColor::new(100, 60, 154));

    let src = graph.add_node(typed_source("IMAGE"));
    let node = graph.add_node(interrupt_node(false));
    ext.node_created(&mut graph, &mut host, node);

    let link = graph.connect(src, 0, node, 0);
    ext.connections_changed(
        &mut graph,
        &mut host,
        ConnectionChange {
            node,
            side: PortSide::Input,
            slot: 0,
            connected: true,
            link,
        },
    );

    let bound = graph.node(node).unwrap();
    assert_eq!(bound.outputs[0].port_type, "IMAGE");
    assert_eq!(bound.outputs[0].name, "IMAGE");
    assert_eq!(bound.outputs[0].color, Some(LinkColor::new(100, 60, 154)));

    graph.unlink(link.unwrap());
    ext.connections_changed(
        &mut graph,
        &mut host,
        ConnectionChange {
            node,
            side: PortSide::Input,
            slot: 0,
            connected: false,
            link,
        },
    );

    let reset = graph.node(node).unwrap();
    assert_eq!(reset.inputs[0].port_type, "*");
    assert_eq!(reset.outputs[0].port_type, "*");
    assert_eq!(reset.outputs[0].name, "*");
    assert_eq!(reset.outputs[0].color, None);
}

#[test]
fn test_output_side_types_the_input() {
    let mut ext = CycleExtension::new(ExtensionConfig::default());
    let mut graph = EditorGraph::new();
    let mut host = RecordingHost::new();

    let node = graph.add_node(interrupt_node(false));
    let sink = graph.add_node(typed_sink("LATENT"));
    ext.node_created(&mut graph, &mut host, node);

    let link = graph.connect(node, 0, sink, 0);
    ext.connections_changed(
        &mut graph,
        &mut host,
        ConnectionChange {
            node,
            side: PortSide::Output,
            slot: 0,
            connected: true,
            link,
        },
    );

    assert_eq!(graph.node(node).unwrap().inputs[0].port_type, "LATENT");
}

#[test]
fn test_changes_on_untracked_nodes_are_ignored() {
    let mut ext = CycleExtension::new(ExtensionConfig::default());
    let mut graph = EditorGraph::new();
    let mut host = RecordingHost::new();

    // A non-interrupt node gets no adapter on creation.
    let src = graph.add_node(typed_source("IMAGE"));
    let plain = graph.add_node(typed_sink("*"));
    ext.node_created(&mut graph, &mut host, plain);

    let link = graph.connect(src, 0, plain, 0);
    ext.connections_changed(
        &mut graph,
        &mut host,
        ConnectionChange {
            node: plain,
            side: PortSide::Input,
            slot: 0,
            connected: true,
            link,
        },
    );

    assert_eq!(graph.node(plain).unwrap().inputs[0].port_type, "*");
}
