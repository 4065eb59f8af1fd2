use std::fmt::{Display, Write};

use ahash::AHashSet;
use itertools::Itertools;

use super::{NodeId, PathGraph, PathNode};
use crate::Score;

impl<S: Score> PathGraph<S> {
    /// Tree-style dump of the graph, see the [`Display`] implementation.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Live nodes without live parents: roots, and in the pruning mode the nodes whose parents
    /// were already reclaimed.
    fn entry_points(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(id, _)| self.parents(*id).next().is_none())
            .map(|(id, _)| id)
            .collect()
    }

    fn render_node<W: Write>(
        &self,
        id: NodeId,
        prefix: &str,
        last: bool,
        expanded: &mut AHashSet<NodeId>,
        saveto: &mut W,
    ) -> std::fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let connector = if last { " └" } else { " ├" };

        if !expanded.insert(id) {
            return writeln!(saveto, "{prefix}{connector} {} ^", node.coordinate());
        }
        writeln!(saveto, "{prefix}{connector} {}", Label(node))?;

        let prefix = format!("{prefix}{}", if last { "  " } else { " │" });
        let children = self.children(id).map(|(id, _)| id).collect_vec();
        for (ind, child) in children.iter().enumerate() {
            self.render_node(*child, &prefix, ind + 1 == children.len(), expanded, saveto)?;
        }
        Ok(())
    }
}

/// Every live node is printed once. Nodes shared by several parents are expanded at their first
/// occurrence; later occurrences are printed as back-references. In the pruning mode reclaimed
/// nodes are absent, and the walk also starts from nodes whose parents are gone.
impl<S: Score> Display for PathGraph<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "PathGraph")?;

        let mut expanded = AHashSet::new();
        let starts = self.entry_points();
        for (ind, id) in starts.iter().enumerate() {
            self.render_node(*id, "", ind + 1 == starts.len(), &mut expanded, &mut *f)?;
        }
        Ok(())
    }
}

struct Label<'a>(&'a PathNode);

impl Display for Label<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let fragments = self
            .0
            .fragments()
            .iter()
            .map(|x| format!("{}/{}", x.seq1(), x.seq2()))
            .join(", ");
        write!(f, "{} [{}]", self.0.coordinate(), fragments)
    }
}
