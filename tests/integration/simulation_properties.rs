#![allow(missing_docs)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use graphsim::{
    admin::{verify, VerifyLevel},
    programs::{run_coloring, run_components, run_shortest_path, INFINITY},
    rerun_simulation, run_simulation, ConnectedComponents, EdgeList, EngineConfig, FixedLabels,
    Label, PatternStore, PatternVertexId, VertexId,
};
use proptest::prelude::*;

const LABELS: u32 = 3;

#[derive(Debug, Clone)]
struct Case {
    vertex_count: usize,
    edges: Vec<(u32, u32)>,
    labels: Vec<Label>,
}

impl Case {
    fn edge_list(&self) -> EdgeList {
        let mut list: EdgeList = self.edges.iter().copied().collect();
        list.reserve_vertices(self.vertex_count);
        list
    }

    fn label_source(&self) -> FixedLabels {
        FixedLabels::from_slice(&self.labels, Label(u32::MAX))
    }

    fn out_neighbors(&self, u: u32) -> impl Iterator<Item = u32> + '_ {
        self.edges
            .iter()
            .filter(move |&&(src, _)| src == u)
            .map(|&(_, dst)| dst)
    }
}

fn case_strategy(max_vertices: usize, max_edges: usize) -> impl Strategy<Value = Case> {
    (1..=max_vertices).prop_flat_map(move |n| {
        (
            prop::collection::vec((0..n as u32, 0..n as u32), 0..=max_edges),
            prop::collection::vec((0..LABELS).prop_map(Label), n),
        )
            .prop_map(move |(edges, labels)| Case {
                vertex_count: n,
                edges,
                labels,
            })
    })
}

fn pattern_strategy() -> impl Strategy<Value = PatternStore> {
    (1usize..=4).prop_flat_map(|m| {
        (
            prop::collection::vec((0..m as u32, 0..m as u32), 0..=6),
            prop::collection::vec((0..LABELS).prop_map(Label), m),
        )
            .prop_map(move |(edges, labels)| {
                PatternStore::build(m, &edges, &labels).expect("generated pattern is valid")
            })
    })
}

/// Greatest simulation computed by naive fixpoint iteration over a dense matrix.
fn naive_simulation(case: &Case, pattern: &PatternStore) -> BTreeMap<VertexId, Vec<PatternVertexId>> {
    let m = pattern.vertex_count();
    let mut rel: Vec<Vec<bool>> = case
        .labels
        .iter()
        .map(|&label| {
            pattern
                .vertices()
                .map(|p| pattern.label_of(p) == Some(label))
                .collect()
        })
        .collect();
    loop {
        let mut changed = false;
        for u in 0..case.vertex_count {
            for p in 0..m {
                if !rel[u][p] {
                    continue;
                }
                let covered = pattern
                    .neighbors_of(PatternVertexId(p as u32))
                    .iter()
                    .all(|q| case.out_neighbors(u as u32).any(|v| rel[v as usize][q.index()]));
                if !covered {
                    rel[u][p] = false;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    rel.iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&b| b))
        .map(|(u, row)| {
            let set = row
                .iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .map(|(p, _)| PatternVertexId(p as u32))
                .collect();
            (VertexId(u as u32), set)
        })
        .collect()
}

fn bfs_distances(case: &Case, source: u32) -> Vec<u32> {
    let mut dist = vec![INFINITY; case.vertex_count];
    dist[source as usize] = 1;
    let mut queue = VecDeque::from([source]);
    while let Some(u) = queue.pop_front() {
        for v in case.out_neighbors(u) {
            if dist[v as usize] == INFINITY {
                dist[v as usize] = dist[u as usize] + 1;
                queue.push_back(v);
            }
        }
    }
    dist
}

fn weak_component_minimum(case: &Case) -> Vec<u32> {
    let mut parent: Vec<u32> = (0..case.vertex_count as u32).collect();
    fn find(parent: &mut [u32], x: u32) -> u32 {
        let mut root = x;
        while parent[root as usize] != root {
            root = parent[root as usize];
        }
        parent[x as usize] = root;
        root
    }
    for &(a, b) in &case.edges {
        let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
    (0..case.vertex_count as u32)
        .map(|v| find(&mut parent, v))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn simulation_result_is_covered_and_maximal(
        case in case_strategy(12, 30),
        pattern in pattern_strategy(),
    ) {
        let pattern = Arc::new(pattern);
        let edges = case.edge_list();
        let run = run_simulation(&edges, pattern.clone(), case.label_source(), &EngineConfig::dense(500))
            .expect("simulation");
        prop_assert!(run.report.converged());

        let report = verify(&edges, &run.labels, &pattern, &run.table, VerifyLevel::Full)
            .expect("verify");
        prop_assert!(report.success, "{:?}", report.findings);
        prop_assert_eq!(run.table.matches(), naive_simulation(&case, &pattern));
        prop_assert_eq!(run.table.allocated_sets(), run.table.live_vertices().count());
    }

    #[test]
    fn candidate_sets_only_shrink_after_seeding(
        case in case_strategy(12, 30),
        pattern in pattern_strategy(),
    ) {
        let run = run_simulation(&case.edge_list(), Arc::new(pattern), case.label_source(), &EngineConfig::dense(500))
            .expect("simulation");
        let after_seeding = &run.candidate_history[1.min(run.candidate_history.len() - 1)..];
        prop_assert!(after_seeding.windows(2).all(|w| w[1] <= w[0]), "{:?}", run.candidate_history);
    }

    #[test]
    fn second_fixpoint_run_prunes_nothing(
        case in case_strategy(10, 25),
        pattern in pattern_strategy(),
    ) {
        let pattern = Arc::new(pattern);
        let edges = case.edge_list();
        let labels = case.label_source();
        let first = run_simulation(&edges, pattern.clone(), &labels, &EngineConfig::dense(500))
            .expect("simulation");
        let before = first.table.matches();
        let second = rerun_simulation(&edges, pattern, first.table, &labels, &EngineConfig::dense(500))
            .expect("rerun");
        prop_assert!(second.report.converged());
        prop_assert_eq!(second.pruned, 0);
        prop_assert_eq!(second.table.matches(), before);
    }

    #[test]
    fn selective_and_dense_simulation_agree(
        case in case_strategy(12, 30),
        pattern in pattern_strategy(),
        interval in 0usize..5,
    ) {
        let pattern = Arc::new(pattern);
        let edges = case.edge_list();
        let dense = run_simulation(&edges, pattern.clone(), case.label_source(), &EngineConfig::dense(500))
            .expect("dense");
        let selective = run_simulation(
            &edges,
            pattern,
            case.label_source(),
            &EngineConfig::selective(500).with_interval_size(interval),
        )
        .expect("selective");
        prop_assert!(selective.report.converged());
        prop_assert_eq!(dense.table.matches(), selective.table.matches());
    }

    #[test]
    fn shortest_paths_match_breadth_first_search(case in case_strategy(16, 40), source in 0u32..16) {
        let source = source % case.vertex_count as u32;
        let edges = case.edge_list();
        let dense = run_shortest_path(&edges, VertexId(source), &EngineConfig::dense(500)).expect("dense");
        let selective = run_shortest_path(&edges, VertexId(source), &EngineConfig::selective(500)).expect("selective");
        prop_assert!(dense.report.converged());
        prop_assert_eq!(&dense.values, &bfs_distances(&case, source));
        prop_assert_eq!(dense.values, selective.values);
    }

    #[test]
    fn components_match_union_find(case in case_strategy(16, 24)) {
        let edges = case.edge_list();
        let dense = run_components(&edges, ConnectedComponents::undirected(), &EngineConfig::dense(500))
            .expect("dense");
        let selective = run_components(&edges, ConnectedComponents::undirected(), &EngineConfig::selective(500))
            .expect("selective");
        prop_assert!(dense.report.converged());
        prop_assert_eq!(&dense.values, &weak_component_minimum(&case));
        prop_assert_eq!(dense.values, selective.values);
    }

    #[test]
    fn coloring_is_proper_and_schedule_independent(case in case_strategy(16, 40)) {
        let edges = case.edge_list();
        let dense = run_coloring(&edges, &EngineConfig::dense(500)).expect("dense");
        let selective = run_coloring(&edges, &EngineConfig::selective(500)).expect("selective");
        prop_assert!(dense.report.converged());
        for &(src, dst) in &case.edges {
            if src < dst {
                prop_assert_ne!(dense.values[src as usize], dense.values[dst as usize]);
            }
        }
        prop_assert_eq!(dense.values, selective.values);
    }
}
