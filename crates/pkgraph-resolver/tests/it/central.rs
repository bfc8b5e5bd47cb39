use test_log::test;

use pkgraph_resolver::{AnalyzeOptionsBuilder, Disposition, NodeKind};

use crate::common::{TestGraph, assert_decided, assert_one_selected_per_library, selected};

/// ```text
/// App
/// ├─ A 1.0.0
/// ├─ B 1.0.0
/// └─ C 2.0.0 (central, requested by A)
///    └─ E 1.0.0
/// ```
#[test]
fn central_dependency_of_accepted_parent_is_accepted() {
    let mut test = TestGraph::new();
    let root = test.root();
    let a = test.package(root, "A", "1.0.0", "1.0.0");
    test.package(root, "B", "1.0.0", "1.0.0");
    let c = test.central("C", "2.0.0", "2.0.0", &[a]);
    test.package(c, "E", "1.0.0", "1.0.0");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert_eq!(
        test.graph.node(c).kind(),
        &NodeKind::Uplifted {
            foster_parents: [a].into_iter().collect()
        }
    );
    assert_eq!(
        selected(&test.graph),
        ["App", "A 1.0.0", "B 1.0.0", "C 2.0.0", "E 1.0.0"]
    );
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

/// ```text
/// App
/// ├─ A 1.0.0
/// ├─ B 1.0.0
/// │  └─ A 2.0.0
/// └─ C 2.0.0 (central, requested by A 1.0.0)
///    └─ E 1.0.0
/// ```
#[test]
fn central_dependency_of_rejected_parent_is_rejected() {
    let mut test = TestGraph::new();
    let root = test.root();
    let a1 = test.package(root, "A", "1.0.0", "1.0.0");
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let a2 = test.package(b, "A", "2.0.0", "2.0.0");
    let c = test.central("C", "2.0.0", "2.0.0", &[a1]);
    let e = test.package(c, "E", "1.0.0", "1.0.0");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert_eq!(test.graph.node(a1).disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(a2).disposition(), Disposition::Accepted);
    assert!(test.graph.node(c).are_all_parents_rejected());
    assert_eq!(test.graph.node(c).disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(c).stored_disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(e).disposition(), Disposition::Rejected);
    assert_eq!(selected(&test.graph), ["App", "B 1.0.0", "A 2.0.0"]);
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

/// ```text
/// App
/// ├─ A 1.0.0
/// ├─ B 1.0.0
/// │  └─ A 2.0.0
/// └─ C 2.0.0 (central, requested by A 1.0.0 and B)
///    └─ E 1.0.0
/// ```
#[test]
fn central_dependency_lives_while_one_parent_does() {
    let mut test = TestGraph::new();
    let root = test.root();
    let a1 = test.package(root, "A", "1.0.0", "1.0.0");
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    test.package(b, "A", "2.0.0", "2.0.0");
    let c = test.central("C", "2.0.0", "2.0.0", &[a1]);
    test.graph.add_foster_parent(c, b).unwrap();
    let e = test.package(c, "E", "1.0.0", "1.0.0");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert_eq!(test.graph.node(a1).disposition(), Disposition::Rejected);
    assert!(!test.graph.node(c).are_all_parents_rejected());
    assert_eq!(test.graph.node(c).disposition(), Disposition::Accepted);
    assert_eq!(test.graph.node(e).disposition(), Disposition::Accepted);
    assert_eq!(
        selected(&test.graph),
        ["App", "B 1.0.0", "C 2.0.0", "A 2.0.0", "E 1.0.0"]
    );
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

/// ```text
/// App
/// ├─ A 1.0.0
/// └─ C 2.0.0 (central, no foster parents)
///    └─ E 1.0.0
/// ```
#[test]
fn central_dependency_without_parents_is_decided_directly() {
    let mut test = TestGraph::new();
    let root = test.root();
    test.package(root, "A", "1.0.0", "1.0.0");
    let c = test.central("C", "2.0.0", "2.0.0", &[]);
    let e = test.package(c, "E", "1.0.0", "1.0.0");

    let options = AnalyzeOptionsBuilder::new().max_rounds(1).build();
    let result = test.graph.analyze_with(&options);

    assert!(result.complete);
    assert!(!test.graph.node(c).are_all_parents_rejected());
    assert_eq!(test.graph.node(c).disposition(), Disposition::Accepted);
    assert_eq!(test.graph.node(e).disposition(), Disposition::Accepted);
    assert_decided(&test.graph);
}

/// ```text
/// App
/// ├─ A 1.0.0
/// ├─ B 1.0.0
/// │  └─ A 2.0.0
/// ├─ Q 1.0.0 (central, requested by P)
/// │  └─ E 1.0.0
/// └─ C 1.0.0 (central, requested by A 1.0.0)
///    └─ P 1.0.0
/// ```
///
/// `A` is disputed, so `C` is deferred along with `P`, which in turn defers `Q`.
#[test]
fn deferring_one_central_dependency_defers_another() {
    let mut test = TestGraph::new();
    let root = test.root();
    let a1 = test.package(root, "A", "1.0.0", "1.0.0");
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let a2 = test.package(b, "A", "2.0.0", "2.0.0");
    let q = test.central("Q", "1.0.0", "1.0.0", &[]);
    let e = test.package(q, "E", "1.0.0", "1.0.0");
    let c = test.central("C", "1.0.0", "1.0.0", &[a1]);
    let p = test.package(c, "P", "1.0.0", "1.0.0");
    test.graph.add_foster_parent(q, p).unwrap();

    let options = AnalyzeOptionsBuilder::new().max_rounds(1).build();
    let result = test.graph.analyze_with(&options);

    assert!(!result.complete);
    assert_eq!(test.graph.node(a1).disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(a2).disposition(), Disposition::Accepted);
    for deferred in [q, e, c, p] {
        assert_eq!(
            test.graph.node(deferred).disposition(),
            Disposition::Acceptable,
            "{}",
            test.graph.node(deferred).path()
        );
    }

    // Rejecting `C` rejects `P`, which leaves `Q` without a live parent.
    let result = test.graph.analyze();

    assert!(result.complete);
    for rejected in [q, e, c, p] {
        assert_eq!(
            test.graph.node(rejected).disposition(),
            Disposition::Rejected,
            "{}",
            test.graph.node(rejected).path()
        );
    }
    assert_eq!(selected(&test.graph), ["App", "B 1.0.0", "A 2.0.0"]);
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}
