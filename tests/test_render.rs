use phylotext::model::{BranchLength, Tree, VertexIndex};
use phylotext::render::{LayoutEngine, RenderError, TextView};
use phylotext::parse_newick_str;
use rstest::rstest;
use std::thread;
use std::time::{Duration, Instant};

fn find(tree: &Tree, name: &str) -> VertexIndex {
    tree.pre_order_iter()
        .find(|v| v.name() == Some(name))
        .map(|v| v.index())
        .unwrap()
}

// --- LEAF ROWS ---
#[rstest]
#[case("(A:1,B:2);", 10, 4)]
#[case("((A:1,B:1):1,(C:2,D:0.5):1);", 20, 9)]
#[case("((A,B,C)x:1,D:2,(E:1,F:1):3);", 30, 6)]
#[case("(A:1,B:1,C:1,D:1,E:1);", 5, 5)]
#[case("(((A:1,B:1):1,C:1):1,D:1);", 3, 40)]
fn test_one_distinct_row_per_leaf(
    #[case] newick: &str,
    #[case] width: usize,
    #[case] height: usize,
) {
    let mut tree = parse_newick_str(newick).unwrap();
    let num_leaves = tree.num_leaves();
    let render = TextView::new()
        .with_width(width)
        .with_height(height)
        .render(&mut tree)
        .unwrap();

    let leaf_rows = render.leaf_rows();
    assert_eq!(leaf_rows.len(), num_leaves);
    assert!(leaf_rows.keys().all(|&row| row < height));

    let mut names: Vec<_> = leaf_rows.values().cloned().collect();
    names.sort();
    let mut expected: Vec<_> = tree.leaves().filter_map(|l| l.name()).map(String::from).collect();
    expected.sort();
    assert_eq!(names, expected);
}

// --- COORDINATES ---
#[rstest]
#[case("((A:1,B:2.5):0.3,C:4);")]
#[case("((A:0.1,B:0.2,C:0.3):0.4,(D:1,E:1):0.25)R:0.5;")]
#[case("(A:7,(B:1,(C:1,D:2):1):1);")]
fn test_columns_follow_branch_lengths(#[case] newick: &str) {
    let mut tree = parse_newick_str(newick).unwrap();
    let layout = LayoutEngine.layout(&mut tree, 50, 20, false).unwrap();
    let scale = layout.scale();

    for vertex in tree.pre_order_iter() {
        let record = layout[vertex.index()];
        let drawn = record.x_self - record.x_parent;
        assert!((drawn - vertex.length_or_zero() * scale).abs() < 1e-9);
        assert_eq!(record.y_self, record.y_parent);

        if let Some(parent) = vertex.parent_index() {
            assert_eq!(record.x_parent, layout[parent].x_self);
        }
    }
}

#[test]
fn test_topology_only_ignores_original_lengths() {
    let mut short = parse_newick_str("((A:0.1,B:0.2):0.3,(C:0.4,D:0.5):0.6);").unwrap();
    let mut long = parse_newick_str("((A:10,B:200):30,(C:4,D:5000):6);").unwrap();
    let view = TextView::new().with_width(24).with_height(8).with_topology_only();

    let short_render = view.render(&mut short).unwrap();
    let long_render = view.render(&mut long).unwrap();

    assert_eq!(short_render.layout().records(), long_render.layout().records());
    assert_eq!(short_render.to_string(), long_render.to_string());
}

#[test]
fn test_two_leaf_example() {
    let mut tree = parse_newick_str("(A:1,B:2)R:0;").unwrap();
    let render = TextView::new().with_width(10).with_height(4).render(&mut tree).unwrap();
    let layout = render.layout();

    assert_eq!(layout.deepest().length, 2.0);
    assert_eq!(layout.deepest().leaf, find(&tree, "B"));
    assert_eq!(layout.scale(), 5.0);
    assert_eq!(layout.row_height(), 2);
    assert_eq!(layout[find(&tree, "A")].x_self, 5.0);
    assert_eq!(layout[find(&tree, "B")].x_self, 10.0);

    let rows: Vec<_> = render.leaf_rows().iter().map(|(r, n)| (*r, n.as_str())).collect();
    assert_eq!(rows, vec![(0, "A"), (2, "B")]);
}

#[test]
fn test_three_children_use_half_sum() {
    let mut tree = parse_newick_str("(A:1,B:1,C:1);").unwrap();
    let layout = LayoutEngine.layout(&mut tree, 9, 6, false).unwrap();

    let child_rows: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| layout[find(&tree, name)].y_self)
        .collect();
    assert_eq!(child_rows, vec![0.0, 2.0, 4.0]);
    // Half-sum, not the mean of 2
    assert_eq!(layout[tree.root_index()].y_self, 3.0);
}

// Root edge is outside the scale reference, so it can push the tree
// arbitrarily far past the right border
#[rstest]
#[case("(A:1e-10,B:1e-10):1;")]
#[case("(A:1,B:2)R:1e9;")]
#[case("(A:1,B:2)R:1e300;")]
fn test_long_root_edge_renders_quickly(#[case] newick: &str) {
    let mut tree = parse_newick_str(newick).unwrap();
    let view = TextView::new().with_width(10).with_height(4);

    let start = Instant::now();
    let render = view.render(&mut tree).unwrap();
    assert!(start.elapsed() < Duration::from_secs(1));

    let rows: Vec<_> = render.grid().rows().collect();
    assert_eq!(rows, vec!["          ", "----------", "          ", "          "]);
    let names: Vec<_> = render.leaf_rows().iter().map(|(r, n)| (*r, n.as_str())).collect();
    assert_eq!(names, vec![(0, "A"), (2, "B")]);
}

#[test]
fn test_huge_grid_is_rejected() {
    let mut tree = parse_newick_str("(A:1,B:2);").unwrap();
    let result = TextView::new()
        .with_width(usize::MAX / 2)
        .with_height(4)
        .render(&mut tree);
    assert!(matches!(result, Err(RenderError::GridTooLarge { .. })));
}

#[test]
fn test_zero_length_star_fails() {
    let mut tree = parse_newick_str("(A:0,B:0);").unwrap();
    let mut out = Vec::new();
    let result = TextView::new().write_to(&mut tree, &mut out);
    assert!(matches!(result, Err(RenderError::ZeroDepth)));
    assert!(out.is_empty());
}

#[rstest]
#[case(0, 10)]
#[case(10, 2)]
fn test_grid_too_small(#[case] width: usize, #[case] height: usize) {
    let mut tree = parse_newick_str("(A:1,B:1,C:1);").unwrap();
    let result = TextView::new().with_width(width).with_height(height).render(&mut tree);
    match result {
        Err(err @ RenderError::GridTooSmall { .. }) => {
            assert_eq!(
                err.to_string(),
                format!("Grid of {width}x{height} cannot hold a tree with 3 leaves")
            );
        }
        other => panic!("Expected GridTooSmall, got {other:?}"),
    }
}

#[test]
fn test_unrooted_tree_fails() {
    let mut tree = Tree::new(2);
    tree.add_leaf(Some(BranchLength::new(1.0)), "A");
    let result = TextView::new().render(&mut tree);
    assert!(matches!(result, Err(RenderError::RootNotSet)));
}

// --- OUTPUT ---
#[test]
fn test_output_starts_with_header_line() {
    let mut tree = parse_newick_str("((A:1,B:2):1,C:3);").unwrap();
    let text = TextView::new()
        .with_width(30)
        .with_height(6)
        .render_to_string(&mut tree)
        .unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "");
    assert!(lines[1].ends_with(" A"));
    assert!(lines[3].ends_with(" B"));
    assert!(lines[5].ends_with(" C"));
    assert_eq!(lines[2].chars().count(), 30);
}

#[test]
fn test_rendering_is_idempotent() {
    let mut tree = parse_newick_str("((A:1,B:2):1,(C:3,D:0.5,E:1)x:2);").unwrap();
    let view = TextView::new().with_width(40).with_height(10);

    let mut first = Vec::new();
    let mut second = Vec::new();
    view.write_to(&mut tree, &mut first).unwrap();
    view.write_to(&mut tree, &mut second).unwrap();
    assert_eq!(first, second);

    let topology = view.clone().with_topology_only();
    let once = topology.render_to_string(&mut tree).unwrap();
    let twice = topology.render_to_string(&mut tree).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_concurrent_renders_share_one_view() {
    let newicks = [
        "((A:1,B:2):1,C:3);",
        "(A:1,B:1,C:1,D:1);",
        "(((A:0.5,B:1):2,C:1):1,(D:2,E:2):0.5);",
        "(A:3,(B:1,C:2)y:1)R:0.5;",
    ];
    let view = TextView::new().with_width(32).with_height(12);

    let expected: Vec<String> = newicks
        .iter()
        .map(|n| view.render_to_string(&mut parse_newick_str(n).unwrap()).unwrap())
        .collect();

    let results: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = newicks
            .iter()
            .map(|n| {
                let view = &view;
                s.spawn(move || {
                    let mut tree = parse_newick_str(n).unwrap();
                    view.render_to_string(&mut tree).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}
