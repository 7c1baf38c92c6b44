//! Walkthrough scenarios over the three facades.

use hograph_tests::prelude::*;

mod family {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texas_family() -> (HyperGraphStorage<MemoryGraph>, Vec<Node>) {
        let mut storage = HyperGraphStorage::new(MemoryGraph::new());
        let members: Vec<Node> = [("John", 45), ("Jane", 43), ("Jim", 12)]
            .into_iter()
            .map(|(name, age)| storage.add_node(&person(name, age)).unwrap())
            .collect();
        storage
            .add_hyperedge(&HyperEdge::new(
                "Family",
                members.clone(),
                props! { "domicile" => "Texas" },
            ))
            .unwrap();
        (storage, members)
    }

    // ========== TEST: five people ==========

    #[test]
    fn test_five_people_count_five() {
        // GIVEN five Person nodes
        let mut storage = HyperGraphStorage::new(MemoryGraph::new());
        for (name, age) in [("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 5)] {
            storage.add_node(&person(name, age)).unwrap();
        }

        // WHEN counted by label
        let count = storage.get_node_count(Pattern::labeled(["Person"])).unwrap();

        // THEN there are five
        assert_eq!(count, 5);
    }

    // ========== TEST: get by partial pattern ==========

    #[test]
    fn test_family_lives_in_texas() {
        // GIVEN a Family hyperedge over three people
        let (storage, members) = texas_family();

        // WHEN fetched by label and domicile
        let family = storage
            .get_hyperedge(Pattern::labeled(["Family"]).with_property("domicile", "Texas"))
            .unwrap()
            .unwrap();

        // THEN it reports Texas and the three members in order
        assert_eq!(family.get("domicile"), Some(&Value::from("Texas")));
        assert_eq!(family.members, members);
    }

    // ========== TEST: update ==========

    #[test]
    fn test_family_moves_to_nevada() {
        // GIVEN the Texas family
        let (mut storage, _) = texas_family();

        // WHEN its properties are replaced
        storage
            .update_hyperedge(
                Pattern::labeled(["Family"]),
                props! { "domicile" => "Nevada", "last_name" => "Smith" },
            )
            .unwrap();

        // THEN both new properties are readable
        let family = storage.get_hyperedge(Pattern::labeled(["Family"])).unwrap().unwrap();
        assert_eq!(family.get("domicile"), Some(&Value::from("Nevada")));
        assert_eq!(family.get("last_name"), Some(&Value::from("Smith")));
    }

    // ========== TEST: delete ==========

    #[test]
    fn test_deleted_family_is_gone() {
        // GIVEN the Texas family
        let (mut storage, _) = texas_family();

        // WHEN deleted
        assert!(storage.delete_hyperedge(Pattern::labeled(["Family"])).unwrap());

        // THEN get finds nothing and the count is zero
        assert_eq!(storage.get_hyperedge(Pattern::labeled(["Family"])).unwrap(), None);
        assert_eq!(storage.get_hyperedge_count(Pattern::labeled(["Family"])).unwrap(), 0);
    }
}

mod work_teams {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: Richard's team ==========

    #[test]
    fn test_richard_works_on_mustang() {
        // GIVEN the team world
        let mut world = World::teams();
        let storage = world.hypergraph();

        // WHEN traversing from Richard to his WorkTeam
        let path = Path::new()
            .node(Pattern::labeled(["Person"]).with_property("name", "Richard"), "n1")
            .hyperedge(Pattern::labeled(["WorkTeam"]), "h1");
        let table = storage
            .traverse_path(&[path], &["h1.project"], &[] as &[&str])
            .unwrap();

        // THEN exactly one row says Mustang
        assert_eq!(table.rows(), &[vec![Value::from("Mustang")]]);
    }

    // ========== TEST: Lena is on both ==========

    #[test]
    fn test_shared_member_sees_both_teams() {
        // GIVEN the team world
        let mut world = World::teams();
        let storage = world.hypergraph();

        // WHEN traversing from Lena, sorted by project
        let path = Path::new()
            .node(Pattern::labeled(["Person"]).with_property("name", "Lena"), "n")
            .hyperedge(Pattern::labeled(["WorkTeam"]), "h");
        let table = storage
            .traverse_path(&[path], &["n.name", "h.project"], &["h.project"])
            .unwrap();

        // THEN Bronco sorts before Mustang
        assert_eq!(
            table.column("h.project").unwrap(),
            vec![&Value::from("Bronco"), &Value::from("Mustang")]
        );
    }
}

mod incidents {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: shared members survive ==========

    #[test]
    fn test_deleting_one_subgraph_keeps_the_other() {
        // GIVEN two subgraphs sharing Lena
        let mut world = World::people();
        let richard = world.node("Richard").clone();
        let lena = world.node("Lena").clone();
        let omar = world.node("Omar").clone();
        let mut storage = world.subgraphs();
        storage
            .add_subgraph(&Subgraph::new(
                vec![richard, lena.clone()],
                vec![],
                ["Incident"],
                props! { "name" => "first" },
            ))
            .unwrap();
        storage
            .add_subgraph(&Subgraph::new(
                vec![lena.clone(), omar.clone()],
                vec![],
                ["Incident"],
                props! { "name" => "second" },
            ))
            .unwrap();

        // WHEN the first is deleted
        storage
            .delete_subgraph(Pattern::labeled(["Incident"]).with_property("name", "first"))
            .unwrap();

        // THEN Lena exists and the second keeps both members
        assert!(storage.get_node(&lena).unwrap().is_some());
        let second = storage
            .get_subgraph(Pattern::labeled(["Incident"]).with_property("name", "second"))
            .unwrap()
            .unwrap();
        assert_eq!(second.nodes, vec![lena, omar]);
    }
}
