use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use odsg::dag::PrefixDag;
use odsg::graph::Order;
use odsg::io::{dataset, mapping::NameMapping, overlap::overlap_score};
use odsg::mining::{AsClique, DeepestParentTraveler, MaxIntersection, Miner};

#[ctor::ctor]
fn init() {
    pretty_env_logger::init();
}

fn load(folder: &Path) -> (odsg::graph::WeightedGraph, NameMapping) {
    let mut mapping = NameMapping::new();
    let file = File::open(folder.join("dataset.txt")).unwrap();
    let mut graph = dataset::read(file, &mut mapping).unwrap();
    graph.make_mineable(Order::ById);
    (graph, mapping)
}

#[test]
fn triangle_fixture_mines_to_a_full_clique() {
    let (graph, mapping) = load(Path::new("./tests/fixtures/triangle"));

    let dag = PrefixDag::from_weighted_graph(&graph);
    let traveler = DeepestParentTraveler;
    let objective = AsClique;
    let miner = Miner::new(&dag, &traveler, &objective, false, 1).unwrap();
    let result = miner.mine();

    assert_eq!(result.len(), 1);
    let dsg = result.iter().next().unwrap();
    assert!(dsg.is_clique());
    assert_eq!(dsg.centers.len(), 3);

    let names: BTreeSet<&str> = dsg
        .centers
        .iter()
        .map(|&id| mapping.name_for(id).unwrap())
        .collect();
    assert_eq!(names, BTreeSet::from(["alpha", "beta", "gamma"]));
}

#[test]
fn biclique_fixture_mines_to_a_biclique() {
    let (graph, mapping) = load(Path::new("./tests/fixtures/biclique"));

    let dag = PrefixDag::from_weighted_graph(&graph);
    let traveler = DeepestParentTraveler;
    let objective = MaxIntersection;
    let miner = Miner::new(&dag, &traveler, &objective, false, 1).unwrap();
    let result = miner.mine();

    assert_eq!(result.len(), 1);
    let dsg = result.iter().next().unwrap();
    assert!(dsg.is_biclique());

    let source_names: BTreeSet<&str> = dsg
        .sources
        .iter()
        .map(|&id| mapping.name_for(id).unwrap())
        .collect();
    let center_names: BTreeSet<&str> = dsg
        .centers
        .iter()
        .map(|&id| mapping.name_for(id).unwrap())
        .collect();
    assert_eq!(source_names, BTreeSet::from(["alpha", "beta"]));
    assert_eq!(center_names, BTreeSet::from(["gamma", "delta"]));
}

#[test]
fn identical_complex_mined_twice_has_self_overlap_one() {
    let (graph, _mapping) = load(Path::new("./tests/fixtures/triangle"));
    let dag = PrefixDag::from_weighted_graph(&graph);
    let traveler = DeepestParentTraveler;
    let objective = AsClique;
    let miner = Miner::new(&dag, &traveler, &objective, false, 1).unwrap();
    let result = miner.mine();
    let dsg = result.iter().next().unwrap();

    assert_eq!(overlap_score(&dsg.centers, &dsg.centers), 1.0);
}
