//! Failed writes leave no trace.

use hograph_tests::prelude::*;

/// Three stored people on a store that allows `budget_after` more writes.
fn stored_people(budget_after: usize) -> (HyperGraphStorage<FailingStore<MemoryGraph>>, Vec<Node>) {
    let mut storage = HyperGraphStorage::new(FailingStore::new(MemoryGraph::new(), 3 + budget_after));
    let people = [("Ann", 30), ("Ben", 31), ("Cid", 32)]
        .into_iter()
        .map(|(name, age)| storage.add_node(&person(name, age)).unwrap())
        .collect();
    (storage, people)
}

mod hyperedges {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: mid-encode failure ==========

    #[test]
    fn test_failure_after_aux_node_rolls_back() {
        // GIVEN three people and a store that allows two more writes
        let (mut storage, people) = stored_people(2);
        let nodes_before = storage.store().node_count().unwrap();

        // WHEN a hyperedge needing four writes is added
        let result = storage.add_hyperedge(&HyperEdge::new("Team", people, props!()));

        // THEN the store error surfaces and neither node nor membership remains
        let err = result.unwrap_err();
        assert!(matches!(err.store_error(), Some(StoreError::Backend { .. })));
        assert_eq!(storage.store().node_count().unwrap(), nodes_before);
        assert_eq!(storage.store().relationship_count().unwrap(), 0);
        assert_eq!(storage.get_hyperedge_count(Pattern::labeled(["Team"])).unwrap(), 0);
    }

    // ========== TEST: enough budget ==========

    #[test]
    fn test_enough_budget_commits() {
        // GIVEN a store that allows exactly the four writes needed
        let (mut storage, people) = stored_people(4);

        // WHEN the hyperedge is added
        let team = storage.add_hyperedge(&HyperEdge::new("Team", people, props!())).unwrap();

        // THEN it is stored in full
        assert_eq!(team.arity(), 3);
        assert_eq!(storage.store().writes(), 7);
    }
}

mod deletes {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: failed delete ==========

    #[test]
    fn test_failed_edge_delete_keeps_subgraph_membership() {
        // GIVEN a subgraph holding an edge, then a store that refuses writes
        let mut storage = SubgraphStorage::new(FailingStore::new(MemoryGraph::new(), 100));
        let ann = storage.add_node(&person("Ann", 30)).unwrap();
        let ben = storage.add_node(&person("Ben", 31)).unwrap();
        let edge = storage
            .add_edge(&Edge::between(&ann, &ben, "KNOWS", props!()).unwrap())
            .unwrap();
        storage
            .add_subgraph(&Subgraph::new(
                vec![ann.clone(), ben.clone()],
                vec![edge.clone()],
                ["Pair"],
                props!(),
            ))
            .unwrap();
        let mut store = storage.into_inner();
        store.refill(0);
        let mut storage = SubgraphStorage::new(store);

        // WHEN the edge delete fails
        let result = storage.delete_edge(EdgePattern::labeled("KNOWS"));

        // THEN the edge and its membership are still there
        assert!(result.is_err());
        let pair = storage.get_subgraph(Pattern::labeled(["Pair"])).unwrap().unwrap();
        assert_eq!(pair.edges, vec![edge]);
    }

    // ========== TEST: failed clear ==========

    #[test]
    fn test_failed_clear_keeps_everything() {
        // GIVEN a populated store that refuses further writes
        let mut storage = GraphStorage::new(FailingStore::new(MemoryGraph::new(), 2));
        storage.add_node(&person("Ann", 30)).unwrap();
        storage.add_node(&person("Ben", 31)).unwrap();

        // WHEN clearing
        let result = storage.clear_graph();

        // THEN it fails and both nodes remain
        assert!(result.is_err());
        assert_eq!(storage.get_node_count(Pattern::labeled(["Person"])).unwrap(), 2);
    }
}
