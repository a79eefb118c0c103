use phylotext::model::{BranchLength, Tree};

#[test]
fn test_building_tree() {
    let mut tree = Tree::new(3);
    let index_l1 = tree.add_leaf(Some(BranchLength::new(1.0)), "Anarhynchus frontalis");
    let index_l2 = tree.add_leaf(Some(BranchLength::new(1.0)), "Charadrius obscurus");
    let index_l3 = tree.add_leaf(Some(BranchLength::new(0.5)), "Thinornis novaeseelandiae");
    let index_i1 = tree.add_internal_vertex(vec![index_l1, index_l2], Some(BranchLength::new(1.5)));
    let index_root = tree.add_root(vec![index_l3, index_i1], None);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.children(), &[index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.name(), Some("Charadrius obscurus"));
    assert_eq!(l2.parent_index(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(inti.branch_length().unwrap(), BranchLength::new(1.5));

    // Ids default to creation order
    assert_eq!(tree[index_root].id(), 4);
    assert!(tree.is_valid());
}

#[test]
fn test_multifurcating_root() {
    let mut tree = Tree::new(4);
    let leaves: Vec<_> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|name| tree.add_leaf(Some(BranchLength::UNIT), name))
        .collect();
    tree.add_root(leaves.clone(), None);

    assert_eq!(tree.root().children(), leaves.as_slice());
    let names: Vec<_> = tree.leaves().filter_map(|l| l.name()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    assert!(tree.is_valid());
}

#[test]
fn test_traversal_orders() {
    let tree = phylotext::parse_newick_str("((A,B)x,C)r;").unwrap();
    let pre: Vec<_> = tree.pre_order_iter().map(|v| v.name().unwrap()).collect();
    let post: Vec<_> = tree.post_order_iter().map(|v| v.name().unwrap()).collect();
    assert_eq!(pre, vec!["r", "x", "A", "B", "C"]);
    assert_eq!(post, vec!["A", "B", "x", "C", "r"]);
}

#[test]
fn test_set_all_branch_lengths() {
    let mut tree = phylotext::parse_newick_str("((A:0.2,B)x:7,C:3):9;").unwrap();
    tree.set_all_branch_lengths(BranchLength::UNIT);
    assert!(tree.pre_order_iter().all(|v| v.length_or_zero() == 1.0));
    assert_eq!(tree.total_branch_length(), 5.0);
}

#[test]
fn test_custom_ids_and_names() {
    let mut tree = phylotext::parse_newick_str("(A:1,B:2);").unwrap();
    let root = tree.root_index();
    tree[root].set_id(42);
    tree[root].set_name("origin".to_string());
    assert_eq!(tree.root().id(), 42);
    assert_eq!(tree.root().name(), Some("origin"));
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = Tree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = Tree::new(2);
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_negative_branch_length_panics() {
    BranchLength::new(-0.5);
}
