//! Behavioural properties shared by every deptree visitor.

use std::collections::HashMap;
use std::ops::ControlFlow;

use deptree_model::{Artifact, DependencyNode, DependencyTree, NodeId, NodeRef};
use deptree_traversal::{
    BuildingVisitor, CollectingVisitor, FilteringVisitor, NodeVisitor, SerializingVisitor,
    TreeTokens, VisitResult, render,
};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

fn labelled(name: &str) -> DependencyNode {
    DependencyNode::new(Artifact::new("org.example", name, "1.0"))
}

/// Reduces `org.example:NAME:jar:1.0` labels to `NAME`.
fn short(diagram: &str) -> String {
    diagram.replace("org.example:", "").replace(":jar:1.0", "")
}

/// Builds a tree from `(parent index, name)` pairs; index 0 is the root.
fn build(root: &str, edges: &[(usize, &str)]) -> DependencyTree {
    let mut tree = DependencyTree::new(labelled(root));
    let mut ids = vec![tree.root().id()];
    for &(parent, name) in edges {
        ids.push(tree.add_child(ids[parent], labelled(name)).unwrap());
    }
    tree
}

/// Deterministic pseudo-random tree of `size` nodes.
fn scattered(size: usize, seed: u64) -> DependencyTree {
    let mut state = seed;
    let mut tree = DependencyTree::new(labelled("n0"));
    let mut ids = vec![tree.root().id()];
    for i in 1..size {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let parent = ids[(state >> 33) as usize % ids.len()];
        ids.push(tree.add_child(parent, labelled(&format!("n{i}"))).unwrap());
    }
    tree
}

fn chain(size: usize) -> DependencyTree {
    let mut tree = DependencyTree::new(labelled("n0"));
    let mut parent = tree.root().id();
    for i in 1..size {
        parent = tree.add_child(parent, labelled(&format!("n{i}"))).unwrap();
    }
    tree
}

fn wide(size: usize) -> DependencyTree {
    let mut tree = DependencyTree::new(labelled("n0"));
    let root = tree.root().id();
    for i in 1..size {
        tree.add_child(root, labelled(&format!("n{i}"))).unwrap();
    }
    tree
}

#[fixture]
fn two_level() -> DependencyTree {
    // R -> A -> [A1, A2], R -> B
    build("R", &[(0, "A"), (1, "A1"), (1, "A2"), (0, "B")])
}

/// Counts callbacks per node and delegates to an inner visitor.
struct Instrumented<V> {
    inner: V,
    visits: HashMap<NodeId, usize>,
    end_visits: HashMap<NodeId, usize>,
}

impl<V> Instrumented<V> {
    fn new(inner: V) -> Self {
        Self {
            inner,
            visits: HashMap::new(),
            end_visits: HashMap::new(),
        }
    }
}

impl<V: NodeVisitor> NodeVisitor for Instrumented<V> {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        *self.visits.entry(node.id()).or_default() += 1;
        self.inner.visit(node)
    }

    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        *self.end_visits.entry(node.id()).or_default() += 1;
        self.inner.end_visit(node)
    }
}

/// Prunes by artifact id.
struct Pruning {
    skip_children_of: &'static str,
    skip_siblings_after: &'static str,
}

impl NodeVisitor for Pruning {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        Ok(if node.artifact.artifact_id == self.skip_children_of {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    }

    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        Ok(if node.artifact.artifact_id == self.skip_siblings_after {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    }
}

fn collect(tree: &DependencyTree) -> Vec<NodeRef<'_>> {
    let mut collector = CollectingVisitor::new();
    tree.root().accept(&mut collector).unwrap();
    collector.resolve(tree)
}

#[rstest]
#[case::single(chain(1))]
#[case::chain(chain(50))]
#[case::wide(wide(50))]
#[case::scattered_small(scattered(20, 7))]
#[case::scattered_large(scattered(500, 42))]
fn collecting_visitor_yields_every_node_in_preorder(#[case] tree: DependencyTree) {
    let collected = collect(&tree);

    assert_eq!(collected.len(), tree.root().node_count());
    assert_eq!(collected, tree.root().preorder().collect::<Vec<_>>());

    // Every node appears after its parent.
    let position: HashMap<NodeId, usize> =
        collected.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
    for node in &collected {
        if let Some(parent) = node.parent() {
            assert!(position[&parent.id()] < position[&node.id()]);
        }
    }
}

#[rstest]
#[case::chain(chain(30))]
#[case::wide(wide(30))]
#[case::scattered(scattered(200, 3))]
fn building_visitor_copies_isomorphic_tree(#[case] tree: DependencyTree) {
    let mut builder = BuildingVisitor::new();
    tree.root().accept(&mut builder).unwrap();
    let mut copy = builder.into_tree().unwrap();

    assert_eq!(copy, tree);
    assert_eq!(
        render(copy.root(), TreeTokens::ASCII).unwrap(),
        render(tree.root(), TreeTokens::ASCII).unwrap()
    );

    let root = copy.root().id();
    copy.payload_mut(root).unwrap().original_scope = Some("provided".to_string());
    assert_eq!(tree.root().original_scope, None);
    assert_ne!(copy, tree);
}

#[rstest]
#[case::chain(chain(25))]
#[case::scattered(scattered(100, 11))]
fn filtering_never_prunes_traversal(#[case] tree: DependencyTree) {
    let filtered = FilteringVisitor::new(CollectingVisitor::new(), |_node: NodeRef<'_>| false);
    let mut instrumented = Instrumented::new(filtered);
    tree.root().accept(&mut instrumented).unwrap();

    assert!(instrumented.inner.inner().is_empty());
    for node in tree.root().preorder() {
        assert_eq!(instrumented.visits.get(&node.id()), Some(&1));
        assert_eq!(instrumented.end_visits.get(&node.id()), Some(&1));
    }
}

#[rstest]
fn visit_break_skips_descendants_but_ends_node(two_level: DependencyTree) {
    let pruning = Pruning {
        skip_children_of: "A",
        skip_siblings_after: "",
    };
    let mut instrumented = Instrumented::new(pruning);
    two_level.root().accept(&mut instrumented).unwrap();

    let a = two_level.root().child(0).unwrap();
    assert_eq!(instrumented.end_visits.get(&a.id()), Some(&1));
    for child in a.children() {
        assert!(!instrumented.visits.contains_key(&child.id()));
    }
    let b = two_level.root().child(1).unwrap();
    assert_eq!(instrumented.visits.get(&b.id()), Some(&1));
}

#[rstest]
fn end_visit_break_skips_only_remaining_siblings(two_level: DependencyTree) {
    let pruning = Pruning {
        skip_children_of: "",
        skip_siblings_after: "A1",
    };
    let mut instrumented = Instrumented::new(pruning);
    two_level.root().accept(&mut instrumented).unwrap();

    let visited: Vec<String> = two_level
        .root()
        .preorder()
        .filter(|n| instrumented.visits.contains_key(&n.id()))
        .map(|n| n.artifact.artifact_id.clone())
        .collect();
    assert_eq!(visited, vec!["R", "A", "A1", "B"]);
}

#[rstest]
fn ascii_tokens_render_siblings() {
    let tree = build("R", &[(0, "A"), (0, "B")]);
    let mut visitor = SerializingVisitor::with_tokens(Vec::new(), TreeTokens::ASCII);
    tree.root().accept(&mut visitor).unwrap();

    let output = String::from_utf8(visitor.into_inner()).unwrap();
    assert_eq!(short(&output), "R\n+- A\n\\- B\n");
}

#[rstest]
fn ascii_tokens_render_nested_fill(two_level: DependencyTree) {
    let output = render(two_level.root(), TreeTokens::ASCII).unwrap();
    assert_eq!(short(&output), "R\n+- A\n|  +- A1\n|  \\- A2\n\\- B\n");
}

#[rstest]
#[case::plain(TreeTokens::PLAIN)]
#[case::ascii(TreeTokens::ASCII)]
#[case::extended(TreeTokens::EXTENDED)]
fn serializing_is_deterministic(#[case] tokens: TreeTokens) {
    let tree = scattered(300, 5);
    let first = render(tree.root(), tokens.clone()).unwrap();
    let second = render(tree.root(), tokens).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 300);
}

#[rstest]
fn building_then_serializing_downstream(two_level: DependencyTree) {
    let filter = |node: NodeRef<'_>| node.artifact.artifact_id != "A1";
    let serializer = SerializingVisitor::with_tokens(Vec::new(), TreeTokens::ASCII);
    let mut visitor = FilteringVisitor::new(BuildingVisitor::with_downstream(serializer), filter);
    two_level.root().accept(&mut visitor).unwrap();

    let (_, serializer) = visitor.into_inner().into_parts();
    let output = String::from_utf8(serializer.unwrap().into_inner()).unwrap();
    assert_eq!(short(&output), "R\n+- A\n|  \\- A2\n\\- B\n");
}

fn render_rejecting(tree: &DependencyTree, rejected: &'static str) -> String {
    let filter = move |node: NodeRef<'_>| node.artifact.artifact_id != rejected;
    let serializer = SerializingVisitor::with_tokens(Vec::new(), TreeTokens::ASCII);
    let mut visitor = FilteringVisitor::new(serializer, filter);
    tree.root().accept(&mut visitor).unwrap();
    String::from_utf8(visitor.into_inner().into_inner()).unwrap()
}

#[rstest]
#[case::only_child(
    build("R", &[(0, "X"), (1, "Y1"), (1, "Y2"), (1, "Y3")]),
    "R\n+- Y1\n+- Y2\n\\- Y3\n"
)]
#[case::nested_before_sibling(
    build("R", &[(0, "A"), (1, "X"), (2, "Y1"), (2, "Y2"), (0, "B")]),
    "R\n+- A\n|  +- Y1\n|  \\- Y2\n\\- B\n"
)]
#[case::leaf(
    build("R", &[(0, "A"), (0, "X")]),
    "R\n+- A\n"
)]
fn serializing_under_filter_skips_rejected_nodes(
    #[case] tree: DependencyTree,
    #[case] expected: &str,
) {
    assert_eq!(short(&render_rejecting(&tree, "X")), expected);
}
