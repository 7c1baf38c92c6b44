//! Runnable walkthroughs.
//!
//! Every scenario builds its own `MemoryGraph`, drives one facade through
//! a short story and records what it observed in a [`Transcript`]. A
//! scenario fails with `DemoError::Unexpected` when the store disagrees
//! with the story.

use crate::{format_table, DemoError, DemoResult};
use hograph_core::{props, Edge, HyperEdge, Node, NodeTuple, Subgraph, SubgraphEdge, Value};
use hograph_graph::MemoryGraph;
use hograph_pattern::{EdgePattern, Pattern};
use hograph_query::{Path, PathTable};
use hograph_storage::{HyperGraphStorage, StorageConfig, SubgraphStorage, TupleStorage};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A demo walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Family,
    Olap,
    Incidents,
    Causality,
    Tuples,
}

impl Scenario {
    /// Every scenario, in presentation order.
    pub const ALL: [Scenario; 5] = [
        Scenario::Family,
        Scenario::Olap,
        Scenario::Incidents,
        Scenario::Causality,
        Scenario::Tuples,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Family => "family",
            Scenario::Olap => "olap",
            Scenario::Incidents => "incidents",
            Scenario::Causality => "causality",
            Scenario::Tuples => "tuples",
        }
    }

    /// Run the scenario on a fresh in-memory store.
    pub fn run(self, config: &StorageConfig) -> DemoResult<Transcript> {
        info!(scenario = self.name(), "running");
        let mut transcript = Transcript::new(self);
        match self {
            Scenario::Family => family(config, &mut transcript)?,
            Scenario::Olap => olap(config, &mut transcript)?,
            Scenario::Incidents => incidents(config, &mut transcript)?,
            Scenario::Causality => causality(config, &mut transcript)?,
            Scenario::Tuples => tuples(config, &mut transcript)?,
        }
        Ok(transcript)
    }
}

impl FromStr for Scenario {
    type Err = DemoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == name)
            .ok_or_else(|| DemoError::unknown_scenario(name))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a scenario observed, line by line.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    scenario: Scenario,
    lines: Vec<String>,
}

impl Transcript {
    fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            lines: Vec::new(),
        }
    }

    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn table(&mut self, title: &str, table: &PathTable) {
        self.say(format!("{}:", title));
        self.lines.extend(format_table(table));
    }

    /// Fail the scenario unless `holds`.
    fn check(&self, holds: bool, message: &str) -> DemoResult<()> {
        if holds {
            Ok(())
        } else {
            Err(DemoError::unexpected(self.scenario.name(), message))
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn shown(value: Option<&Value>) -> String {
    value.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

// ==================== family ====================

fn family(config: &StorageConfig, out: &mut Transcript) -> DemoResult<()> {
    let mut storage = HyperGraphStorage::with_config(MemoryGraph::new(), config.clone());

    let mut members = Vec::new();
    for name in ["John", "Jane", "Jim", "Judy", "Jack"] {
        let person = Node::new(["Person"], props! { "name" => name, "last_name" => "Doe" });
        members.push(storage.add_node(&person)?);
    }
    let people = storage.get_node_count(Pattern::labeled(["Person"]))?;
    out.check(people == 5, "expected five people")?;
    out.say(format!("people: {}", people));

    let family = HyperEdge::new("Family", members[..3].to_vec(), props! { "domicile" => "Texas" });
    storage.add_hyperedge(&family)?;
    let found = storage
        .get_hyperedge(Pattern::labeled(["Family"]).with_property("domicile", "Texas"))?
        .ok_or_else(|| DemoError::unexpected("family", "family not found"))?;
    out.say(format!(
        "family of {} lives in {}",
        found.arity(),
        shown(found.get("domicile"))
    ));

    storage.update_hyperedge(
        Pattern::labeled(["Family"]),
        props! { "domicile" => "Nevada", "last_name" => "Smith" },
    )?;
    let moved = storage
        .get_hyperedge(Pattern::labeled(["Family"]))?
        .ok_or_else(|| DemoError::unexpected("family", "family lost on update"))?;
    out.check(
        moved.get("domicile") == Some(&Value::from("Nevada")),
        "update did not apply",
    )?;
    out.say(format!(
        "after update: domicile={} last_name={}",
        shown(moved.get("domicile")),
        shown(moved.get("last_name"))
    ));

    storage.delete_hyperedge(Pattern::labeled(["Family"]))?;
    let families = storage.get_hyperedge_count(Pattern::labeled(["Family"]))?;
    out.check(families == 0, "family survived delete")?;
    out.say(format!(
        "after delete: families={} people={}",
        families,
        storage.get_node_count(Pattern::labeled(["Person"]))?
    ));

    storage.close_connection()?;
    Ok(())
}

// ==================== olap ====================

fn olap(config: &StorageConfig, out: &mut Transcript) -> DemoResult<()> {
    let mut storage = HyperGraphStorage::with_config(MemoryGraph::new(), config.clone());

    let richard =
        storage.add_node(&Node::new(["Person"], props! { "name" => "Richard", "age" => 41 }))?;
    let lena = storage.add_node(&Node::new(["Person"], props! { "name" => "Lena", "age" => 33 }))?;
    let omar = storage.add_node(&Node::new(["Person"], props! { "name" => "Omar", "age" => 29 }))?;

    for (from, to, weight) in [(&richard, &lena, 0.9), (&lena, &omar, 0.4), (&omar, &richard, 0.7)] {
        storage.add_edge(&Edge::between(from, to, "KNOWS", props! { "weight" => weight })?)?;
    }
    storage.add_hyperedge(&HyperEdge::new(
        "WorkTeam",
        vec![richard.clone(), lena.clone()],
        props! { "project" => "Mustang" },
    ))?;
    storage.add_hyperedge(&HyperEdge::new(
        "WorkTeam",
        vec![lena, omar],
        props! { "project" => "Bronco" },
    ))?;

    let teams = Path::new()
        .node(Pattern::labeled(["Person"]).with_property("name", "Richard"), "n1")
        .hyperedge(Pattern::labeled(["WorkTeam"]), "h1");
    let table = storage.traverse_path(&[teams], &["h1.project"], &[] as &[&str])?;
    out.check(table.len() == 1, "Richard should be on one team")?;
    out.table("Richard's teams", &table);

    let people = Path::new().node(Pattern::labeled(["Person"]), "n");
    let features = storage.traverse_path(&[people], &["n.name", "n.age"], &["n.age"])?;
    out.table("node features by age", &features);

    let knows = Path::new()
        .node(Pattern::labeled(["Person"]), "a")
        .edge(EdgePattern::labeled("KNOWS"), "e")
        .node(Pattern::labeled(["Person"]), "b");
    let edge_index = storage.traverse_path(&[knows], &["a.name", "b.name", "e.weight"], &["a.name"])?;
    out.table("edge index", &edge_index);
    out.say(format!("edge index as records: {}", edge_index.to_json()?));

    let mustang = Path::new()
        .hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", "Mustang"), "h")
        .node(Pattern::labeled(["Person"]), "n");
    let bronco = Path::new()
        .hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", "Bronco"), "h")
        .node(Pattern::labeled(["Person"]), "n");
    let staffing = storage.traverse_path(&[mustang, bronco], &["h.project", "n.name"], &["n.name"])?;
    out.check(staffing.len() == 4, "expected four team memberships")?;
    out.table("team members", &staffing);

    storage.close_connection()?;
    Ok(())
}

// ==================== incidents ====================

fn incidents(config: &StorageConfig, out: &mut Transcript) -> DemoResult<()> {
    let mut storage = SubgraphStorage::with_config(MemoryGraph::new(), config.clone());

    let press = storage.add_node(&Node::new(["Machine"], props! { "name" => "press" }))?;
    let lathe = storage.add_node(&Node::new(["Machine"], props! { "name" => "lathe" }))?;
    let welder = storage.add_node(&Node::new(["Machine"], props! { "name" => "welder" }))?;
    let press_to_lathe = storage.add_edge(&Edge::between(&press, &lathe, "FEEDS", props!())?)?;
    let lathe_to_welder = storage.add_edge(&Edge::between(&lathe, &welder, "FEEDS", props!())?)?;

    let jam = storage.add_subgraph(&Subgraph::new(
        vec![press, lathe.clone()],
        vec![press_to_lathe],
        ["Incident"],
        props! { "name" => "jam", "severity" => 2 },
    ))?;
    let overheat = storage.add_subgraph(&Subgraph::new(
        vec![lathe.clone(), welder],
        vec![lathe_to_welder],
        ["Incident"],
        props! { "name" => "overheat", "severity" => 3 },
    ))?;
    storage.add_subgraph_edge(&SubgraphEdge::between(
        &jam,
        &overheat,
        "CAUSED",
        props! { "lag_min" => 12 },
    )?)?;

    let through_lathe = Pattern::labeled(["Incident"]).with_member(lathe.require_id()?);
    let sharing = storage.get_subgraph_count(through_lathe)?;
    out.check(sharing == 2, "both incidents should hold the lathe")?;
    out.say(format!("incidents holding the lathe: {}", sharing));

    let causes = Path::new()
        .subgraph(Pattern::labeled(["Incident"]), "s1")
        .subgraph_edge(EdgePattern::labeled("CAUSED"), "c")
        .subgraph(Pattern::labeled(["Incident"]), "s2");
    let table = storage.traverse_path(&[causes], &["s1.name", "s2.name", "c.lag_min"], &[] as &[&str])?;
    out.table("causal links", &table);

    storage.delete_subgraph(Pattern::labeled(["Incident"]).with_property("name", "jam"))?;
    let remaining = storage
        .get_subgraph(Pattern::labeled(["Incident"]).with_property("name", "overheat"))?
        .ok_or_else(|| DemoError::unexpected("incidents", "overheat lost"))?;
    out.check(remaining.nodes.len() == 2, "overheat lost a member")?;
    out.say(format!(
        "after deleting jam: overheat has {} machines and {} edges, machines={}, links={}",
        remaining.nodes.len(),
        remaining.edges.len(),
        storage.get_node_count(Pattern::labeled(["Machine"]))?,
        storage.get_subgraph_edge_count(EdgePattern::any())?
    ));

    storage.close_connection()?;
    Ok(())
}

// ==================== causality ====================

fn causality(config: &StorageConfig, out: &mut Transcript) -> DemoResult<()> {
    let mut storage = TupleStorage::with_config(MemoryGraph::new(), config.clone());

    let mut events = Vec::new();
    for name in ["storm", "flood", "evacuation", "blackout", "outage"] {
        events.push(storage.add_node(&Node::new(["Event"], props! { "name" => name }))?);
    }
    let chains = [
        ("left", [0, 1, 2], 0.8),
        ("right", [0, 3, 4], 0.6),
    ];
    for (branch, steps, confidence) in chains {
        let members = steps.iter().map(|&i| events[i].clone()).collect();
        storage.add_node_tuple(&NodeTuple::new(
            members,
            ["CausalChain"],
            props! { "branch" => branch, "confidence" => confidence },
        ))?;
    }

    let storm = events[0].require_id()?;
    let from_storm = storage.get_node_tuple_count(Pattern::labeled(["CausalChain"]).with_member(storm))?;
    out.check(from_storm == 2, "both branches start at the storm")?;
    out.say(format!("chains from the storm: {}", from_storm));

    let flood = events[1].require_id()?;
    let chain = storage
        .get_node_tuple(Pattern::labeled(["CausalChain"]).with_member(flood))?
        .ok_or_else(|| DemoError::unexpected("causality", "flood chain not found"))?;
    let steps: Vec<String> = chain
        .members
        .iter()
        .map(|event| shown(event.get("name")))
        .collect();
    out.say(format!("chain through the flood: {}", steps.join(" -> ")));

    let branches = Path::new()
        .node(Pattern::labeled(["Event"]).with_property("name", "storm"), "e")
        .node_tuple(Pattern::labeled(["CausalChain"]), "c");
    let table = storage.traverse_path(&[branches], &["c.branch", "c.confidence"], &["c.confidence"])?;
    out.table("branches by confidence", &table);

    storage.close_connection()?;
    Ok(())
}

// ==================== tuples ====================

fn tuples(config: &StorageConfig, out: &mut Transcript) -> DemoResult<()> {
    let mut storage = TupleStorage::with_config(MemoryGraph::new(), config.clone());

    let apollo = storage.add_node(&Node::new(["Project"], props! { "name" => "Apollo" }))?;
    let gemini = storage.add_node(&Node::new(["Project"], props! { "name" => "Gemini" }))?;
    let assignments = [
        ("Ines", &apollo, "lead"),
        ("Bruno", &apollo, "engineer"),
        ("Ines", &gemini, "advisor"),
    ];
    for (name, project, role) in assignments {
        let person = match storage.get_node(Pattern::labeled(["Person"]).with_property("name", name))? {
            Some(person) => person,
            None => storage.add_node(&Node::new(["Person"], props! { "name" => name }))?,
        };
        storage.add_node_tuple(&NodeTuple::new(
            vec![person, project.clone()],
            ["Assignment"],
            props! { "role" => role },
        ))?;
    }
    out.say(format!(
        "assignments: {}",
        storage.get_node_tuple_count(Pattern::labeled(["Assignment"]))?
    ));

    let staff = Path::new()
        .node(Pattern::labeled(["Project"]).with_property("name", "Apollo"), "p")
        .node_tuple(Pattern::labeled(["Assignment"]), "a")
        .node(Pattern::labeled(["Person"]), "n");
    let table = storage.traverse_path(&[staff.clone()], &["n.name", "a.role"], &["n.name"])?;
    out.check(table.len() == 2, "Apollo has two people")?;
    out.table("Apollo staff", &table);

    storage.update_node_tuple(
        Pattern::labeled(["Assignment"]).with_property("role", "engineer"),
        props! { "role" => "lead engineer" },
    )?;
    let table = storage.traverse_path(&[staff], &["n.name", "a.role"], &["n.name"])?;
    out.table("Apollo staff after promotion", &table);

    storage.close_connection()?;
    Ok(())
}
