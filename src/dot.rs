//! GraphViz DOT output for debugging a diagram's structure.

use std::collections::HashSet;
use std::io::{self, Write};

use crate::manager::Manager;
use crate::repr::NodeRef;

/// Writes a GraphViz `digraph` rendering the DAG reachable from `root`.
/// Complemented edges are drawn dashed; the root's own polarity is recorded
/// in the graph label since DOT has no notion of a complemented "entry"
/// edge.
pub fn write_dot(
    manager: &Manager,
    root: NodeRef,
    title: &str,
    sink: &mut impl Write,
) -> io::Result<()> {
    writeln!(sink, "digraph \"{title}\" {{")?;
    writeln!(sink, "  labelloc=\"t\";")?;
    writeln!(
        sink,
        "  label=\"{title} (root {}complemented)\";",
        if root.is_complemented() { "" } else { "un" }
    )?;

    let mut visited = HashSet::new();
    write_node(manager, root, sink, &mut visited)?;
    writeln!(sink, "}}")
}

fn write_node(
    manager: &Manager,
    r: NodeRef,
    sink: &mut impl Write,
    visited: &mut HashSet<u32>,
) -> io::Result<()> {
    if r.is_terminal() {
        return Ok(());
    }
    let index = r.index();
    if !visited.insert(index) {
        return Ok(());
    }

    let node = manager.node_at(r);
    writeln!(
        sink,
        "  n{index} [label=\"{}\", shape=circle];",
        node.var
    )?;

    write_edge(sink, index, node.hi, "solid")?;
    write_edge(sink, index, node.lo, "dashed")?;

    write_node(manager, node.hi, sink, visited)?;
    write_node(manager, node.lo, sink, visited)
}

fn write_edge(sink: &mut impl Write, from: u32, to: NodeRef, hi_style: &str) -> io::Result<()> {
    let label = if to.is_terminal() {
        if to == NodeRef::TRUE { "1" } else { "0" }
    } else if to.is_complemented() {
        "!"
    } else {
        ""
    };
    let target = if to.is_terminal() {
        format!("term_{from}_{hi_style}")
    } else {
        format!("n{}", to.index())
    };
    if to.is_terminal() {
        writeln!(
            sink,
            "  {target} [label=\"{label}\", shape=box, style=filled, fillcolor=lightgray];"
        )?;
    }
    let style = if to.is_complemented() && !to.is_terminal() {
        "dashed"
    } else {
        hi_style
    };
    writeln!(sink, "  n{from} -> {target} [style={style}];")
}
