use insta::assert_snapshot;
use test_log::test;

use std::str::FromStr;

use pkgraph_library::{LibraryDependencyTarget, LibraryIdentity, LibraryType};
use pkgraph_resolver::{
    AnalyzeOptions, AnalyzeOptionsBuilder, Disposition, DowngradeResult, GraphItem, NodeId,
    VersionConflictResult,
};
use pkgraph_version::LibraryVersion;

use crate::common::{
    TestGraph, assert_decided, assert_one_selected_per_library, name, package, request, selected,
};

/// ```text
/// App
/// ├─ X 1.0.0
/// └─ A 1.0.0
///    └─ X 2.0.0 (potentially downgraded)
/// ```
#[test]
fn nearest_request_wins() {
    let mut test = TestGraph::new();
    let root = test.root();
    let near = test.package(root, "X", "1.0.0", "1.0.0");
    let a = test.package(root, "A", "1.0.0", "1.0.0");
    let far = test.package(a, "X", "2.0.0", "2.0.0");
    test.flag(far, Disposition::PotentiallyDowngraded);

    let result = test.graph.analyze();

    assert!(result.complete);
    assert!(result.cycles.is_empty());
    assert!(result.version_conflicts.is_empty());
    assert_eq!(
        result.downgrades,
        [DowngradeResult {
            downgraded_from: far,
            downgraded_to: near,
        }]
    );
    assert_eq!(selected(&test.graph), ["App", "X 1.0.0", "A 1.0.0"]);

    // The farther request is pruned, but its path can still be rendered.
    assert!(test.graph.node(a).child_ids().is_empty());
    assert_eq!(
        test.graph.node(far).path_with_last_range(),
        "App -> A 1.0.0 -> X (>= 2.0.0)"
    );
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

/// ```text
/// App
/// ├─ X 1.0.0
/// ├─ A 1.0.0
/// │  └─ X 2.0.0 (potentially downgraded)
/// └─ B 1.0.0
///    └─ X 3.0.0
/// ```
#[test]
fn downgrade_to_rejected_node_is_not_reported() {
    let mut test = TestGraph::new();
    let root = test.root();
    let near = test.package(root, "X", "1.0.0", "1.0.0");
    let a = test.package(root, "A", "1.0.0", "1.0.0");
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let far = test.package(a, "X", "2.0.0", "2.0.0");
    let highest = test.package(b, "X", "3.0.0", "3.0.0");
    test.flag(far, Disposition::PotentiallyDowngraded);

    let result = test.graph.analyze();

    assert!(result.complete);
    assert!(result.downgrades.is_empty());
    assert!(result.version_conflicts.is_empty());
    assert_eq!(test.graph.node(near).disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(highest).disposition(), Disposition::Accepted);
    assert_eq!(selected(&test.graph), ["App", "A 1.0.0", "B 1.0.0", "X 3.0.0"]);
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

/// ```text
/// App
/// ├─ X 1.0.0
/// ├─ A 1.0.0
/// │  └─ X 2.0.0 (potentially downgraded)
/// └─ B 1.0.0
///    └─ A 2.0.0
/// ```
#[test]
fn downgrade_beneath_rejected_node_is_not_reported() {
    let mut test = TestGraph::new();
    let root = test.root();
    let near = test.package(root, "X", "1.0.0", "1.0.0");
    let a1 = test.package(root, "A", "1.0.0", "1.0.0");
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let far = test.package(a1, "X", "2.0.0", "2.0.0");
    let a2 = test.package(b, "A", "2.0.0", "2.0.0");
    test.flag(far, Disposition::PotentiallyDowngraded);

    let result = test.graph.analyze();

    assert!(result.complete);
    assert!(result.downgrades.is_empty());
    assert_eq!(test.graph.node(near).disposition(), Disposition::Accepted);
    assert_eq!(test.graph.node(a1).disposition(), Disposition::Rejected);
    assert_eq!(test.graph.node(a2).disposition(), Disposition::Accepted);
    assert_eq!(selected(&test.graph), ["App", "X 1.0.0", "B 1.0.0", "A 2.0.0"]);
    assert_decided(&test.graph);
    assert_one_selected_per_library(&test.graph);
}

struct Cousins {
    test: TestGraph,
    d1: NodeId,
    x: NodeId,
    d2: NodeId,
    z: NodeId,
}

/// ```text
/// App
/// ├─ B 1.0.0
/// │  └─ D {d1_range} => D 1.0.0
/// │     └─ X 1.0.0
/// └─ C 1.0.0
///    └─ D 2.0.0
///       └─ Z 1.0.0
/// ```
fn cousins(d1_range: &str) -> Cousins {
    let mut test = TestGraph::new();
    let root = test.root();
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let c = test.package(root, "C", "1.0.0", "1.0.0");
    let d1 = test.package(b, "D", d1_range, "1.0.0");
    let d2 = test.package(c, "D", "2.0.0", "2.0.0");
    let x = test.package(d1, "X", "1.0.0", "1.0.0");
    let z = test.package(d2, "Z", "1.0.0", "1.0.0");
    Cousins {
        test,
        d1,
        x,
        d2,
        z,
    }
}

#[test]
fn disputes_defer_their_subtrees() {
    let Cousins { mut test, .. } = cousins("1.0.0");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert!(result.version_conflicts.is_empty());
    assert_snapshot!(test.graph.dump().to_string(), @r"
    App (Accepted) => App 1.0.0
    ├─ B (>= 1.0.0) (Accepted) => B 1.0.0
    ├── D (>= 1.0.0) (Rejected) => D 1.0.0
    ├─── X (>= 1.0.0) (Rejected) => X 1.0.0
    ├─ C (>= 1.0.0) (Accepted) => C 1.0.0
    ├── D (>= 2.0.0) (Accepted) => D 2.0.0
    ├─── Z (>= 1.0.0) (Accepted) => Z 1.0.0
    ");
    assert_eq!(
        selected(&test.graph),
        ["App", "B 1.0.0", "C 1.0.0", "D 2.0.0", "Z 1.0.0"]
    );
    assert_one_selected_per_library(&test.graph);
}

#[test]
fn unsatisfied_range_is_a_version_conflict() {
    let Cousins {
        mut test, d1, d2, ..
    } = cousins("[1.0.0]");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert_eq!(
        result.version_conflicts,
        [VersionConflictResult {
            selected: d2,
            conflicting: d1,
        }]
    );
    assert_eq!(
        test.graph.node(d1).path_with_last_range(),
        "App -> B 1.0.0 -> D (= 1.0.0)"
    );
    assert_one_selected_per_library(&test.graph);
}

#[test]
fn conflicts_require_overlapping_types() {
    let mut test = TestGraph::new();
    let root = test.root();
    let b = test.package(root, "B", "1.0.0", "1.0.0");
    let c = test.package(root, "C", "1.0.0", "1.0.0");
    test.graph
        .add_child(
            b,
            request("D", "[1.0.0]").with_type_constraint(LibraryDependencyTarget::PROJECT),
            Some(package("D", "1.0.0")),
        )
        .unwrap();
    test.package(c, "D", "2.0.0", "2.0.0");

    let result = test.graph.analyze();

    assert!(result.complete);
    assert!(result.version_conflicts.is_empty());
}

/// ```text
/// App
/// ├─ B 1.0.0
/// │  └─ D [1.0.0] => D 1.0.0
/// └─ C 1.0.0
///    └─ D 2.0.0 => D 2.0.0 (project)
/// ```
#[test]
fn selected_projects_never_conflict() {
    for library_type in [LibraryType::Project, LibraryType::ExternalProject] {
        let mut test = TestGraph::new();
        let root = test.root();
        let b = test.package(root, "B", "1.0.0", "1.0.0");
        let c = test.package(root, "C", "1.0.0", "1.0.0");
        let d1 = test.package(b, "D", "[1.0.0]", "1.0.0");
        let project = GraphItem::new(
            LibraryIdentity::new(
                name("D"),
                LibraryVersion::from_str("2.0.0").unwrap(),
                library_type,
            ),
            (),
        );
        let d2 = test
            .graph
            .add_child(c, request("D", "2.0.0"), Some(project))
            .unwrap();

        let result = test.graph.analyze();

        assert!(result.complete);
        assert_eq!(test.graph.node(d1).disposition(), Disposition::Rejected);
        assert_eq!(test.graph.node(d2).disposition(), Disposition::Accepted);
        assert!(
            result.version_conflicts.is_empty(),
            "{library_type} conflicts: {:?}",
            result.version_conflicts
        );
    }
}

/// ```text
/// App
/// ├─ A 1.0.0
/// │  └─ App (cycle)
/// └─ B 1.0.0
/// ```
#[test]
fn cycles_are_pruned() {
    let mut test = TestGraph::new();
    let root = test.root();
    let a = test.package(root, "A", "1.0.0", "1.0.0");
    test.package(root, "B", "1.0.0", "1.0.0");
    let cycle = test.unresolved(a, "App", "1.0.0");
    test.flag(cycle, Disposition::Cycle);

    let result = test.graph.analyze();

    assert!(result.complete);
    assert_eq!(result.cycles, [cycle]);
    assert!(test.graph.node(a).child_ids().is_empty());
    assert_eq!(test.graph.node(cycle).disposition(), Disposition::Cycle);
    assert_eq!(
        test.graph.node(cycle).path(),
        "App -> A 1.0.0 -> App (>= 1.0.0)"
    );
    assert_eq!(selected(&test.graph), ["App", "A 1.0.0", "B 1.0.0"]);
    assert_decided(&test.graph);
}

#[test]
fn reanalysis_is_stable() {
    let Cousins { mut test, .. } = cousins("[1.0.0]");
    let root = test.root();
    let a = test.package(root, "A", "1.0.0", "1.0.0");
    let far = test.package(a, "C", "2.0.0", "2.0.0");
    test.flag(far, Disposition::PotentiallyDowngraded);

    let first = test.graph.analyze();
    let dump = test.graph.dump().to_string();
    assert_eq!(first.downgrades.len(), 1);
    assert_eq!(first.version_conflicts.len(), 1);

    let second = test.graph.analyze();
    assert_eq!(test.graph.dump().to_string(), dump);

    // Pruned nodes and the accepted libraries of the first run are gone, but nothing is
    // decided differently.
    let third = test.graph.analyze();
    assert_eq!(second, third);
    assert!(second.complete);
    assert_eq!(test.graph.dump().to_string(), dump);
}

#[test]
fn round_cap_leaves_nodes_undecided() {
    let Cousins {
        mut test,
        x,
        d2,
        z,
        ..
    } = cousins("1.0.0");

    let options = AnalyzeOptionsBuilder::new().max_rounds(1).build();
    let result = test.graph.analyze_with(&options);

    assert!(!result.complete);
    assert_eq!(test.graph.node(d2).disposition(), Disposition::Accepted);
    assert_eq!(test.graph.node(z).disposition(), Disposition::Acceptable);
    assert_eq!(test.graph.node(x).disposition(), Disposition::Acceptable);

    // Another analysis picks up where the first one stopped.
    let result = test.graph.analyze();
    assert!(result.complete);
    assert_eq!(test.graph.node(z).disposition(), Disposition::Accepted);
    assert_eq!(test.graph.node(x).disposition(), Disposition::Rejected);
    assert_decided(&test.graph);
}

#[test]
fn no_rounds_decides_nothing() {
    let Cousins { mut test, .. } = cousins("1.0.0");

    let options = AnalyzeOptionsBuilder::new().max_rounds(0).build();
    let result = test.graph.analyze_with(&options);

    assert!(!result.complete);
    assert!(result.version_conflicts.is_empty());
    test.graph
        .for_each(|node| assert_eq!(node.disposition(), Disposition::Acceptable));
}

#[test]
fn default_options() {
    assert_eq!(AnalyzeOptions::default().max_rounds, 1000);
    assert_eq!(AnalyzeOptionsBuilder::new().build(), AnalyzeOptions::default());
}
