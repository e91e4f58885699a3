use crate::path::{LogicalPath, PathSegment};
use crate::resolver::{Edge, NodeId, ResolvedDocument};
use std::collections::HashSet;
use tracing::debug;

struct Frame {
    id: NodeId,
    children: Vec<(PathSegment, Edge)>,
    next: usize,
}

/// Finds and cuts every cycle in a resolved document.
///
/// The graph is walked depth-first from the root with children in document
/// order. A child edge that leads back to a node on the current walk is
/// recorded as a cycle, at the resolved path of that edge, and replaced with
/// [`Edge::Circular`]. Afterwards the document is acyclic.
///
/// A node whose subtree has been fully walked is not entered again. Any cycle
/// reachable through it was already cut, or passes through a node that is no
/// longer on the walk.
pub fn correct(document: &mut ResolvedDocument) -> Vec<LogicalPath> {
    let mut cycles = Vec::new();
    let mut on_walk: HashSet<NodeId> = HashSet::new();
    let mut finished: HashSet<NodeId> = HashSet::new();
    let mut path: Vec<PathSegment> = Vec::new();

    let root = document.root();
    on_walk.insert(root);
    let mut stack = vec![Frame {
        id: root,
        children: document.node(root).children(),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some((segment, edge)) = frame.children.get(frame.next).cloned() else {
            let done = frame.id;
            stack.pop();
            on_walk.remove(&done);
            finished.insert(done);
            path.pop();
            continue;
        };
        frame.next += 1;
        let parent = frame.id;

        let Edge::Node(child) = edge else {
            continue;
        };
        if !document.node(child).is_container() {
            continue;
        }
        if on_walk.contains(&child) {
            let mut cycle: LogicalPath = path.iter().cloned().collect();
            cycle.push(segment.clone());
            debug!(target: "oaslint::circular", path = %cycle, "cutting circular reference");
            cycles.push(cycle);
            document.cut(parent, &segment);
            continue;
        }
        if finished.contains(&child) {
            continue;
        }

        on_walk.insert(child);
        path.push(segment);
        stack.push(Frame {
            id: child,
            children: document.node(child).children(),
            next: 0,
        });
    }

    cycles
}
