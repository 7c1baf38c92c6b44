//! Cross-facade guarantees: round trips, partial matching, clearing,
//! non-cascading deletes and replacing updates.

use hograph_tests::prelude::*;

mod round_trip {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: tuple ==========

    #[test]
    fn test_tuple_round_trip_keeps_order_labels_and_properties() {
        // GIVEN a tuple whose member order differs from creation order
        let mut world = World::people();
        let members = vec![
            world.node("Omar").clone(),
            world.node("Richard").clone(),
            world.node("Lena").clone(),
        ];
        let tuple = NodeTuple::new(
            members.clone(),
            ["Ranking", "Quarterly"],
            props! { "quarter" => "Q3", "scores" => vec![Value::from(9), Value::from(7), Value::from(5)] },
        );
        let mut storage = world.tuples();

        // WHEN stored and read back
        let stored = storage.add_node_tuple(&tuple).unwrap();
        let lifted = storage
            .get_node_tuple(Pattern::labeled(["Ranking"]))
            .unwrap()
            .unwrap();

        // THEN labels, properties and member order survive
        assert_eq!(lifted, stored);
        assert_eq!(lifted.labels, tuple.labels);
        assert_eq!(lifted.properties, tuple.properties);
        assert_eq!(lifted.member_ids().unwrap(), tuple.member_ids().unwrap());
    }

    // ========== TEST: subgraph ==========

    #[test]
    fn test_subgraph_round_trip_keeps_nodes_and_edges() {
        // GIVEN a subgraph over the KNOWS cycle
        let mut world = World::people();
        let nodes = vec![
            world.node("Richard").clone(),
            world.node("Lena").clone(),
            world.node("Omar").clone(),
        ];
        let mut storage = world.subgraphs();
        let edges: Vec<Edge> = storage
            .store()
            .relationships_of_type("KNOWS")
            .unwrap()
            .into_iter()
            .map(|id| storage.store().relationship(id).unwrap().unwrap())
            .collect();

        // WHEN stored and read back
        storage
            .add_subgraph(&Subgraph::new(
                nodes.clone(),
                edges.clone(),
                ["Circle"],
                props! { "name" => "friends" },
            ))
            .unwrap();
        let lifted = storage.get_subgraph(Pattern::labeled(["Circle"])).unwrap().unwrap();

        // THEN every member node and edge is present
        assert_eq!(lifted.nodes, nodes);
        assert_eq!(lifted.edges, edges);
        assert_eq!(lifted.get("name"), Some(&Value::from("friends")));
    }

    // ========== TEST: member state is current ==========

    #[test]
    fn test_lifting_reflects_member_updates() {
        // GIVEN a hyperedge over Richard
        let mut world = World::teams();
        let mut storage = world.hypergraph();

        // WHEN Richard's properties change after the hyperedge was written
        storage
            .update_node(
                Pattern::labeled(["Person"]).with_property("name", "Richard"),
                props! { "name" => "Richard", "age" => 42 },
            )
            .unwrap();

        // THEN the lifted member shows the new age
        let team = storage
            .get_hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", "Mustang"))
            .unwrap()
            .unwrap();
        assert_eq!(team.members[0].get("age"), Some(&Value::from(42)));
    }
}

mod partial_match {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: unique candidate ==========

    #[test]
    fn test_sparse_pattern_finds_unique_element() {
        // GIVEN two teams that differ by one member
        let mut world = World::teams();
        let richard = world.node("Richard").require_id().unwrap();
        let storage = world.hypergraph();

        // WHEN matched by label and one member only
        let team = storage
            .get_hyperedge(Pattern::labeled(["WorkTeam"]).with_member(richard))
            .unwrap()
            .unwrap();

        // THEN the only candidate is returned
        assert_eq!(team.get("project"), Some(&Value::from("Mustang")));
    }

    #[test]
    fn test_non_matching_member_finds_nothing() {
        // GIVEN the team world and a node that is on no team
        let mut world = World::teams();
        let loner = world
            .hypergraph()
            .add_node(&person("Zed", 50))
            .unwrap()
            .require_id()
            .unwrap();
        let storage = world.hypergraph();

        // WHEN / THEN no team matches the loner
        let found = storage
            .get_hyperedge(Pattern::labeled(["WorkTeam"]).with_member(loner))
            .unwrap();
        assert_eq!(found, None);
    }

    // ========== TEST: contradictions ==========

    #[test]
    fn test_contradictory_pattern_is_malformed() {
        // GIVEN a pattern that wants two values for one key
        let mut world = World::teams();
        let storage = world.hypergraph();
        let pattern = Pattern::labeled(["WorkTeam"])
            .with_property("project", "Mustang")
            .with_property("project", "Bronco");

        // WHEN used
        let result = storage.get_hyperedge(pattern);

        // THEN it is a malformed pattern, not a miss
        assert!(matches!(
            result,
            Err(StorageError::Pattern(PatternError::MalformedPattern { .. }))
        ));
    }

    // ========== TEST: kinds stay apart ==========

    #[test]
    fn test_facades_do_not_see_each_other() {
        // GIVEN a tuple and a hyperedge with the same label over the same members
        let mut world = World::people();
        let members = vec![world.node("Richard").clone(), world.node("Lena").clone()];
        world
            .tuples()
            .add_node_tuple(&NodeTuple::new(members.clone(), ["Pair"], props!()))
            .unwrap();
        world
            .hypergraph()
            .add_hyperedge(&HyperEdge::new("Pair", members, props!()))
            .unwrap();

        // WHEN / THEN each facade counts only its own kind, plain nodes none
        assert_eq!(world.tuples().get_node_tuple_count(Pattern::labeled(["Pair"])).unwrap(), 1);
        assert_eq!(world.hypergraph().get_hyperedge_count(Pattern::labeled(["Pair"])).unwrap(), 1);
        assert_eq!(world.subgraphs().get_subgraph_count(Pattern::labeled(["Pair"])).unwrap(), 0);
        assert_eq!(world.hypergraph().get_node_count(Pattern::labeled(["Pair"])).unwrap(), 0);
    }
}

mod clearing {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: idempotent clear ==========

    #[test]
    fn test_every_count_is_zero_after_clear() {
        // GIVEN a world with nodes, edges, hyperedges, tuples, subgraphs and a link
        let mut world = World::teams();
        let members = vec![world.node("Richard").clone(), world.node("Omar").clone()];
        world
            .tuples()
            .add_node_tuple(&NodeTuple::new(members.clone(), ["Pair"], props!()))
            .unwrap();
        {
            let mut subgraphs = world.subgraphs();
            let a = subgraphs
                .add_subgraph(&Subgraph::new(members.clone(), vec![], ["Group"], props!()))
                .unwrap();
            let b = subgraphs
                .add_subgraph(&Subgraph::new(members, vec![], ["Group"], props!()))
                .unwrap();
            subgraphs
                .add_subgraph_edge(&SubgraphEdge::between(&a, &b, "NEXT", props!()).unwrap())
                .unwrap();
        }

        // WHEN cleared twice
        world.hypergraph().clear_graph().unwrap();
        world.hypergraph().clear_graph().unwrap();

        // THEN every count is zero
        let mut subgraphs = world.subgraphs();
        assert_eq!(subgraphs.get_node_count(Pattern::new()).unwrap(), 0);
        assert_eq!(subgraphs.get_edge_count(EdgePattern::any()).unwrap(), 0);
        assert_eq!(subgraphs.get_subgraph_count(Pattern::new()).unwrap(), 0);
        assert_eq!(subgraphs.get_subgraph_edge_count(EdgePattern::any()).unwrap(), 0);
        assert_eq!(subgraphs.store().node_count().unwrap(), 0);
        assert_eq!(subgraphs.store().relationship_count().unwrap(), 0);
        subgraphs.clear_graph().unwrap();
        assert_eq!(world.tuples().get_node_tuple_count(Pattern::new()).unwrap(), 0);
        assert_eq!(world.hypergraph().get_hyperedge_count(Pattern::new()).unwrap(), 0);
    }
}

mod deleting {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: no cascade ==========

    #[test]
    fn test_deleting_a_hyperedge_keeps_shared_members_and_siblings() {
        // GIVEN Mustang and Bronco sharing Lena
        let mut world = World::teams();
        let mut storage = world.hypergraph();

        // WHEN Mustang is deleted
        storage
            .delete_hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", "Mustang"))
            .unwrap();

        // THEN all people and Bronco's membership are intact
        assert_eq!(storage.get_node_count(Pattern::labeled(["Person"])).unwrap(), 3);
        let bronco = storage
            .get_hyperedge(Pattern::labeled(["WorkTeam"]))
            .unwrap()
            .unwrap();
        let names: Vec<&str> = bronco
            .members
            .iter()
            .filter_map(|member| member.get("name").and_then(|value| value.as_str()))
            .collect();
        assert_eq!(names, vec!["Lena", "Omar"]);
    }

    // ========== TEST: orphaned auxiliary nodes ==========

    #[test]
    fn test_deleting_a_member_leaves_the_hyperedge() {
        // GIVEN Mustang over Richard and Lena
        let mut world = World::teams();
        let mut storage = world.hypergraph();

        // WHEN Richard is deleted
        storage
            .delete_node(Pattern::labeled(["Person"]).with_property("name", "Richard"))
            .unwrap();

        // THEN Mustang remains with Lena alone
        let mustang = storage
            .get_hyperedge(Pattern::labeled(["WorkTeam"]).with_property("project", "Mustang"))
            .unwrap()
            .unwrap();
        assert_eq!(mustang.arity(), 1);
        assert_eq!(storage.get_edge_count(EdgePattern::labeled("KNOWS")).unwrap(), 1);
    }
}

mod updating {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: replace, not merge ==========

    #[test]
    fn test_update_drops_unlisted_properties() {
        // GIVEN a hyperedge with two properties
        let mut world = World::people();
        let members = vec![world.node("Richard").clone(), world.node("Omar").clone()];
        let mut storage = world.hypergraph();
        storage
            .add_hyperedge(&HyperEdge::new(
                "Review",
                members.clone(),
                props! { "status" => "open", "priority" => 2 },
            ))
            .unwrap();

        // WHEN updated with a single property
        storage
            .update_hyperedge(Pattern::labeled(["Review"]), props! { "status" => "closed" })
            .unwrap();

        // THEN only that property remains, labels and members untouched
        let review = storage.get_hyperedge(Pattern::labeled(["Review"])).unwrap().unwrap();
        assert_eq!(review.properties, props! { "status" => "closed" });
        assert!(review.labels.contains("Review"));
        assert_eq!(review.members, members);
    }

    #[test]
    fn test_update_of_subgraph_edge_keeps_its_label() {
        // GIVEN two linked subgraphs
        let mut world = World::people();
        let richard = world.node("Richard").clone();
        let mut storage = world.subgraphs();
        let a = storage
            .add_subgraph(&Subgraph::new(vec![richard.clone()], vec![], ["Group"], props!()))
            .unwrap();
        let b = storage
            .add_subgraph(&Subgraph::new(vec![richard], vec![], ["Group"], props!()))
            .unwrap();
        storage
            .add_subgraph_edge(
                &SubgraphEdge::between(&a, &b, "NEXT", props! { "weight" => 1 }).unwrap(),
            )
            .unwrap();

        // WHEN its properties are replaced
        storage
            .update_subgraph_edge(EdgePattern::labeled("NEXT"), props! { "delay" => 3 })
            .unwrap();

        // THEN the label is still NEXT and only delay remains
        let link = storage
            .get_subgraph_edge(EdgePattern::labeled("NEXT"))
            .unwrap()
            .unwrap();
        assert_eq!(link.label, Label::new("NEXT"));
        assert_eq!(link.properties, props! { "delay" => 3 });
    }
}
