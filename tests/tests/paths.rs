//! Path traversal through the storage facades.

use hograph_tests::prelude::*;

fn no_sort() -> &'static [&'static str] {
    &[]
}

mod binary {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: edge index ==========

    #[test]
    fn test_knows_edges_project_both_ends() {
        // GIVEN the KNOWS cycle
        let mut world = World::people();
        let storage = world.hypergraph();

        // WHEN traversing Person -KNOWS-> Person sorted by source name
        let path = Path::new()
            .node(Pattern::labeled(["Person"]), "a")
            .edge(EdgePattern::labeled("KNOWS"), "e")
            .node(Pattern::labeled(["Person"]), "b");
        let table = storage
            .traverse_path(&[path], &["a.name", "b.name", "e.since"], &["a.name"])
            .unwrap();

        // THEN one row per edge, in name order
        assert_eq!(
            table.rows(),
            &[
                vec![Value::from("Lena"), Value::from("Omar"), Value::from(2018)],
                vec![Value::from("Omar"), Value::from("Richard"), Value::from(2020)],
                vec![Value::from("Richard"), Value::from("Lena"), Value::from(2015)],
            ]
        );
    }

    // ========== TEST: join on a reused variable ==========

    #[test]
    fn test_reused_variable_closes_the_cycle() {
        // GIVEN the three-person KNOWS cycle
        let mut world = World::people();
        let storage = world.hypergraph();

        // WHEN a path returns to its starting variable after three hops
        let knows = || EdgePattern::labeled("KNOWS");
        let person = || Pattern::labeled(["Person"]);
        let path = Path::new()
            .node(person(), "a")
            .edge(knows(), "e1")
            .node(person(), "b")
            .edge(knows(), "e2")
            .node(person(), "c")
            .edge(knows(), "e3")
            .node(person(), "a");
        let table = storage.traverse_path(&[path], &["a.name"], &["a.name"]).unwrap();

        // THEN every person closes the cycle once
        assert_eq!(
            table.column("a.name").unwrap(),
            vec![
                &Value::from("Lena"),
                &Value::from("Omar"),
                &Value::from("Richard")
            ]
        );
    }
}

mod alternatives {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: union in path order ==========

    #[test]
    fn test_rows_of_each_path_are_appended() {
        // GIVEN the team world
        let mut world = World::teams();
        let storage = world.hypergraph();

        // WHEN two alternative paths are traversed without sorting
        let team = |project: &str| {
            Path::new()
                .hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", project), "h")
                .node(Pattern::labeled(["Person"]), "n")
        };
        let table = storage
            .traverse_path(&[team("Bronco"), team("Mustang")], &["h.project", "n.name"], no_sort())
            .unwrap();

        // THEN Bronco's rows come first, each in member order
        assert_eq!(
            table.rows(),
            &[
                vec![Value::from("Bronco"), Value::from("Lena")],
                vec![Value::from("Bronco"), Value::from("Omar")],
                vec![Value::from("Mustang"), Value::from("Richard")],
                vec![Value::from("Mustang"), Value::from("Lena")],
            ]
        );
    }

    // ========== TEST: stable sort ==========

    #[test]
    fn test_sort_is_stable_across_paths() {
        // GIVEN the same two alternatives
        let mut world = World::teams();
        let storage = world.hypergraph();
        let team = |project: &str| {
            Path::new()
                .hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", project), "h")
                .node(Pattern::labeled(["Person"]), "n")
        };

        // WHEN sorted by member name
        let table = storage
            .traverse_path(&[team("Bronco"), team("Mustang")], &["n.name", "h.project"], &["n.name"])
            .unwrap();

        // THEN Lena's two rows keep their path order
        assert_eq!(
            table.rows(),
            &[
                vec![Value::from("Lena"), Value::from("Bronco")],
                vec![Value::from("Lena"), Value::from("Mustang")],
                vec![Value::from("Omar"), Value::from("Bronco")],
                vec![Value::from("Richard"), Value::from("Mustang")],
            ]
        );
    }
}

mod tuples {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: node -> tuple -> node ==========

    #[test]
    fn test_assignment_tuples_join_people_to_projects() {
        // GIVEN Richard and Lena assigned to Apollo
        let mut world = World::people();
        let richard = world.node("Richard").clone();
        let lena = world.node("Lena").clone();
        let mut storage = world.tuples();
        let apollo = storage
            .add_node(&Node::new(["Project"], props! { "name" => "Apollo" }))
            .unwrap();
        for (member, role) in [(richard, "lead"), (lena, "engineer")] {
            storage
                .add_node_tuple(&NodeTuple::new(
                    vec![member, apollo.clone()],
                    ["Assignment"],
                    props! { "role" => role },
                ))
                .unwrap();
        }

        // WHEN traversing Project -> Assignment -> Person
        let path = Path::new()
            .node(Pattern::labeled(["Project"]), "p")
            .node_tuple(Pattern::labeled(["Assignment"]), "a")
            .node(Pattern::labeled(["Person"]), "n");
        let table = storage
            .traverse_path(&[path], &["n.name", "a.role"], &["a.role"])
            .unwrap();

        // THEN each person appears with their role
        assert_eq!(
            table.rows(),
            &[
                vec![Value::from("Lena"), Value::from("engineer")],
                vec![Value::from("Richard"), Value::from("lead")],
            ]
        );
    }
}

mod subgraphs {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: subgraph -> subgraph-edge -> subgraph ==========

    #[test]
    fn test_subgraph_edges_are_traversable() {
        // GIVEN two incidents linked by CAUSED
        let mut world = World::people();
        let richard = world.node("Richard").clone();
        let mut storage = world.subgraphs();
        let jam = storage
            .add_subgraph(&Subgraph::new(vec![richard.clone()], vec![], ["Incident"], props! { "name" => "jam" }))
            .unwrap();
        let fire = storage
            .add_subgraph(&Subgraph::new(vec![richard], vec![], ["Incident"], props! { "name" => "fire" }))
            .unwrap();
        storage
            .add_subgraph_edge(
                &SubgraphEdge::between(&jam, &fire, "CAUSED", props! { "lag_min" => 12 }).unwrap(),
            )
            .unwrap();

        // WHEN traversing Incident -CAUSED-> Incident
        let path = Path::new()
            .subgraph(Pattern::labeled(["Incident"]), "s1")
            .subgraph_edge(EdgePattern::labeled("CAUSED"), "c")
            .subgraph(Pattern::labeled(["Incident"]), "s2");
        let table = storage
            .traverse_path(&[path], &["s1.name", "s2.name", "c.lag_min"], no_sort())
            .unwrap();

        // THEN the single link is projected, label-free
        assert_eq!(
            table.rows(),
            &[vec![Value::from("jam"), Value::from("fire"), Value::from(12)]]
        );
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: missing property ==========

    #[test]
    fn test_absent_property_fails_the_whole_traversal() {
        // GIVEN people without an email property
        let mut world = World::people();
        let storage = world.hypergraph();

        // WHEN projecting n.email
        let path = Path::new().node(Pattern::labeled(["Person"]), "n");
        let result = storage.traverse_path(&[path], &["n.email"], no_sort());

        // THEN it is a projection error
        assert!(matches!(
            result,
            Err(StorageError::Path(PathError::Projection { .. }))
        ));
    }

    // ========== TEST: unbound variable ==========

    #[test]
    fn test_variable_missing_from_one_alternative_is_a_projection_error() {
        // GIVEN two alternatives where only the first binds h
        let mut world = World::teams();
        let storage = world.hypergraph();
        let with_team = Path::new()
            .node(Pattern::labeled(["Person"]), "n")
            .hyperedge(Pattern::labeled(["WorkTeam"]), "h");
        let people_only = Path::new().node(Pattern::labeled(["Person"]), "n");

        // WHEN projecting h.project
        let result = storage.traverse_path(&[with_team, people_only], &["h.project"], no_sort());

        // THEN the whole traversal is a projection error naming h.project
        assert!(matches!(
            result,
            Err(StorageError::Path(PathError::Projection { var, property }))
                if var == "h" && property == "project"
        ));
    }

    #[test]
    fn test_sort_on_unknown_variable_is_a_projection_error() {
        let mut world = World::people();
        let storage = world.hypergraph();
        let path = Path::new().node(Pattern::labeled(["Person"]), "x");

        let result = storage.traverse_path(&[path], &["x.name"], &["y.a"]);

        assert!(matches!(
            result,
            Err(StorageError::Path(PathError::Projection { .. }))
        ));
    }

    // ========== TEST: empty result ==========

    #[test]
    fn test_no_match_is_an_empty_table_with_columns() {
        // GIVEN the people world
        let mut world = World::people();
        let storage = world.hypergraph();

        // WHEN nothing matches the path
        let path = Path::new().node(Pattern::labeled(["Robot"]), "r");
        let table = storage.traverse_path(&[path], &["r.name"], no_sort()).unwrap();

        // THEN the table has its column and no rows
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["r.name".to_string()]);
        assert_eq!(table.to_json().unwrap(), "[]");
    }

    // ========== TEST: invalid adjacency ==========

    #[test]
    fn test_node_next_to_node_is_rejected() {
        // GIVEN a path with two adjacent node elements
        let mut world = World::people();
        let storage = world.hypergraph();
        let path = Path::new()
            .node(Pattern::labeled(["Person"]), "a")
            .node(Pattern::labeled(["Person"]), "b");

        // WHEN / THEN compilation rejects it
        let result = storage.traverse_path(&[path], &["a.name"], no_sort());
        assert!(matches!(
            result,
            Err(StorageError::Path(PathError::InvalidAdjacency { .. }))
        ));
    }

    // ========== TEST: records ==========

    #[test]
    fn test_records_are_keyed_by_column() {
        // GIVEN Richard's team table
        let mut world = World::teams();
        let storage = world.hypergraph();
        let path = Path::new()
            .node(Pattern::labeled(["Person"]).with_property("name", "Richard"), "n1")
            .hyperedge(Pattern::labeled(["WorkTeam"]), "h1");
        let table = storage.traverse_path(&[path], &["h1.project"], no_sort()).unwrap();

        // WHEN exported as records
        let records = table.to_records();

        // THEN each row is an object keyed by the projection
        assert_eq!(records, serde_json::json!([{ "h1.project": "Mustang" }]));
    }
}
