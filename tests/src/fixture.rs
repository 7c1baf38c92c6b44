//! Seeded worlds for the integration suites.

use hograph_core::{props, Edge, HyperEdge, Node};
use hograph_graph::MemoryGraph;
use hograph_storage::{GraphStorage, HyperGraphStorage, SubgraphStorage, TupleStorage};

/// An unstored `Person` node.
pub fn person(name: &str, age: i64) -> Node {
    Node::new(["Person"], props! { "name" => name, "age" => age })
}

/// A graph plus the stored nodes the suites refer to by name.
pub struct World {
    pub graph: MemoryGraph,
    nodes: Vec<Node>,
}

impl World {
    /// An empty world.
    pub fn empty() -> Self {
        Self {
            graph: MemoryGraph::new(),
            nodes: Vec::new(),
        }
    }

    /// Richard (41), Lena (33) and Omar (29), who know each other in a
    /// cycle: Richard -> Lena -> Omar -> Richard.
    pub fn people() -> Self {
        let mut world = Self::empty();
        let mut storage = GraphStorage::new(&mut world.graph);
        let mut nodes = Vec::new();
        for (name, age) in [("Richard", 41), ("Lena", 33), ("Omar", 29)] {
            nodes.push(storage.add_node(&person(name, age)).unwrap());
        }
        for (from, to, since) in [(0, 1, 2015), (1, 2, 2018), (2, 0, 2020)] {
            let edge = Edge::between(&nodes[from], &nodes[to], "KNOWS", props! { "since" => since })
                .unwrap();
            storage.add_edge(&edge).unwrap();
        }
        world.nodes = nodes;
        world
    }

    /// `people()` plus two WorkTeam hyperedges: Mustang {Richard, Lena}
    /// and Bronco {Lena, Omar}.
    pub fn teams() -> Self {
        let mut world = Self::people();
        let richard = world.node("Richard").clone();
        let lena = world.node("Lena").clone();
        let omar = world.node("Omar").clone();
        let mut storage = world.hypergraph();
        storage
            .add_hyperedge(&HyperEdge::new(
                "WorkTeam",
                vec![richard, lena.clone()],
                props! { "project" => "Mustang" },
            ))
            .unwrap();
        storage
            .add_hyperedge(&HyperEdge::new(
                "WorkTeam",
                vec![lena, omar],
                props! { "project" => "Bronco" },
            ))
            .unwrap();
        world
    }

    /// The stored node with the given `name`.
    ///
    /// # Panics
    /// When the world holds no such node.
    pub fn node(&self, name: &str) -> &Node {
        self.nodes
            .iter()
            .find(|node| node.get("name").and_then(|value| value.as_str()) == Some(name))
            .unwrap_or_else(|| panic!("no node named {}", name))
    }

    pub fn hypergraph(&mut self) -> HyperGraphStorage<&mut MemoryGraph> {
        HyperGraphStorage::new(&mut self.graph)
    }

    pub fn tuples(&mut self) -> TupleStorage<&mut MemoryGraph> {
        TupleStorage::new(&mut self.graph)
    }

    pub fn subgraphs(&mut self) -> SubgraphStorage<&mut MemoryGraph> {
        SubgraphStorage::new(&mut self.graph)
    }
}
