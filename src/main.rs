use std::cmp::Reverse;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::*;
use ordered_float::OrderedFloat;

use odsg::dag::PrefixDag;
use odsg::graph::{EdgeMap, Order};
use odsg::io::{self, mapping::NameMapping, overlap::overlap_score};
use odsg::mining::{
    AnyParentTraveler, AsClique, DegreeAndEdge, DeepestParentTraveler, FullDegreeDensity,
    FullEdgeDensity, Legacy, MaxIntersection, Miner, Objective, SharingMostVertexesParentTraveler,
    SimpleDegreeDensity, SimpleEdgeDensity, Traveler,
};
use odsg::partition::{Partitioner, Strategy};

extern crate pretty_env_logger;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine overlapping dense subgraphs out of a weighted interaction dataset.
    Mine {
        /// The whitespace-separated `proteinA proteinB [weight]` dataset.
        dataset: PathBuf,

        /// Optional `proteinName id` mapping file, fixing some protein ids
        /// up front.
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// How to split the graph into independently-mined clusters.
        #[arg(long, value_enum, default_value_t = PartitionScheme::None)]
        partition: PartitionScheme,

        /// Number of shingles per signature component, only used by
        /// `--partition signature`.
        #[arg(long, default_value_t = 2)]
        shingle_k: usize,

        /// Seed for `--partition signature`'s MinHash permutations.
        /// Defaults to a fixed constant (`Shingles::DEFAULT_SEED`), so
        /// omitting this flag still partitions deterministically.
        #[arg(long)]
        shingle_seed: Option<u64>,

        /// Order in which each vertex's outlinks are sorted before the
        /// prefix-DAG is built.
        #[arg(long, value_enum, default_value_t = SortOrder::ById)]
        sort: SortOrder,

        /// How a candidate dense subgraph is judged while walking a
        /// traveling path.
        #[arg(long, value_enum, default_value_t = ObjectiveKind::AsClique)]
        objective: ObjectiveKind,

        /// Which parent a node's traveling path steps to next.
        #[arg(long, value_enum, default_value_t = TravelerKind::DeepestParent)]
        traveler: TravelerKind,

        /// Restrict mining to as-cliques only; forces `--objective as-clique`.
        #[arg(long)]
        cliques_only: bool,

        /// Minimum overlap score (`OS(A, B) = |A n B|^2 / (|A| * |B|)`) for
        /// two mined complexes to be considered duplicates when aggregating
        /// results across clusters.
        #[arg(long, default_value_t = 0.2)]
        os: f64,

        /// Minimum complex size (number of centers) to report.
        #[arg(long, default_value_t = 3)]
        min_size: usize,

        /// Minimum `sources.len() * centers.len()` for a candidate to survive
        /// mining, and the arc threshold used while merging micro-clusters.
        #[arg(long, default_value_t = 1)]
        min_arcs: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PartitionScheme {
    None,
    InitialOutlink,
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortOrder {
    ById,
    ByFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ObjectiveKind {
    AsClique,
    Legacy,
    MaxIntersection,
    Wedge,
    Wdegree,
    DegreeWedge,
    Fwedge,
    Fwdegree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TravelerKind {
    AnyParent,
    DeepestParent,
    SharingMostVertexes,
}

fn build_objective(kind: ObjectiveKind, edges: &EdgeMap) -> Box<dyn Objective> {
    match kind {
        ObjectiveKind::AsClique => Box::new(AsClique),
        ObjectiveKind::Legacy => Box::new(Legacy),
        ObjectiveKind::MaxIntersection => Box::new(MaxIntersection),
        ObjectiveKind::Wedge => Box::new(SimpleEdgeDensity(edges.clone())),
        ObjectiveKind::Fwedge => Box::new(FullEdgeDensity(edges.clone())),
        ObjectiveKind::Wdegree => Box::new(SimpleDegreeDensity(edges.clone())),
        ObjectiveKind::Fwdegree => Box::new(FullDegreeDensity(edges.clone())),
        ObjectiveKind::DegreeWedge => Box::new(DegreeAndEdge),
    }
}

fn build_traveler(kind: TravelerKind) -> Box<dyn Traveler> {
    match kind {
        TravelerKind::AnyParent => Box::new(AnyParentTraveler),
        TravelerKind::DeepestParent => Box::new(DeepestParentTraveler),
        TravelerKind::SharingMostVertexes => Box::new(SharingMostVertexesParentTraveler),
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let cli = Cli::parse();
    match cli.command {
        Commands::Mine {
            dataset,
            mapping,
            partition,
            shingle_k,
            shingle_seed,
            sort,
            objective,
            traveler,
            cliques_only,
            os,
            min_size,
            min_arcs,
        } => mine(
            dataset,
            mapping,
            partition,
            shingle_k,
            shingle_seed,
            sort,
            objective,
            traveler,
            cliques_only,
            os,
            min_size,
            min_arcs,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn mine(
    dataset: PathBuf,
    mapping: Option<PathBuf>,
    partition: PartitionScheme,
    shingle_k: usize,
    shingle_seed: Option<u64>,
    sort: SortOrder,
    objective_kind: ObjectiveKind,
    traveler_kind: TravelerKind,
    cliques_only: bool,
    os: f64,
    min_size: usize,
    min_arcs: u64,
) -> anyhow::Result<()> {
    let objective_kind = if cliques_only {
        if objective_kind != ObjectiveKind::AsClique {
            warn!("--cliques-only forces the as-clique objective, ignoring --objective");
        }
        ObjectiveKind::AsClique
    } else {
        objective_kind
    };

    info!("Loading protein name/id mapping...");
    let mut name_mapping = match mapping {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening mapping file {}", path.display()))?;
            NameMapping::load(file)?
        }
        None => NameMapping::new(),
    };

    info!("Reading dataset...");
    let dataset_file =
        File::open(&dataset).with_context(|| format!("opening dataset file {}", dataset.display()))?;
    let mut graph = io::dataset::read(dataset_file, &mut name_mapping)?;

    let order = match sort {
        SortOrder::ById => Order::ById,
        SortOrder::ByFrequency => Order::ByFrequencyThenId,
    };
    graph.make_mineable(order);

    let strategy = match partition {
        PartitionScheme::None => Strategy::None,
        PartitionScheme::InitialOutlink => Strategy::InitialOutlink,
        PartitionScheme::Signature => Strategy::Signature {
            k: shingle_k,
            seed: shingle_seed,
        },
    };

    let traveler = build_traveler(traveler_kind);
    let objective = build_objective(objective_kind, &graph.edges);

    info!("Mining clusters...");
    let mut results = Vec::new();
    let partitioner = Partitioner::new(&graph.graph, strategy, min_arcs);
    for cluster in partitioner {
        let dag = PrefixDag::from_cluster(&cluster);
        let miner = Miner::new(&dag, traveler.as_ref(), objective.as_ref(), cliques_only, min_arcs)?;
        for dsg in miner.mine().into_vec() {
            if dsg.centers.len() >= min_size {
                results.push(dsg);
            }
        }
    }

    info!("Deduplicating {} candidate complexes (OS >= {os})...", results.len());
    let mut kept: Vec<odsg::mining::DenseSubGraph> = Vec::new();
    'outer: for mut dsg in results {
        for existing in &kept {
            if overlap_score(&dsg.centers, &existing.centers) >= os {
                continue 'outer;
            }
        }
        dsg.density = Some(graph.edges.full_edge_density(&dsg.sources, &dsg.centers));
        kept.push(dsg);
    }

    // Densest complexes first; f64 has no Ord, so key on OrderedFloat.
    kept.sort_unstable_by_key(|dsg| Reverse(OrderedFloat(dsg.density.unwrap_or(0.0))));

    info!("Reporting {} complexes.", kept.len());
    for dsg in &kept {
        println!("{}", io::dsg_format::write(dsg));
    }

    Ok(())
}
