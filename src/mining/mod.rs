//! The mining core: `Miner` walks a `PrefixDag` guided by a `Traveler`
//! and an `Objective`, producing a `MaximalSet` of `DenseSubGraph`s.

pub mod dsg;
pub mod maximal_set;
pub mod miner;
pub mod objective;
pub mod traveler;

pub use dsg::{Classification, DenseSubGraph};
pub use maximal_set::{MaximalSet, SupersedeMode};
pub use miner::Miner;
pub use objective::{
    AsClique, DegreeAndEdge, FullDegreeDensity, FullEdgeDensity, Legacy, MaxIntersection,
    Objective, SimpleDegreeDensity, SimpleEdgeDensity,
};
pub use traveler::{AnyParentTraveler, DeepestParentTraveler, SharingMostVertexesParentTraveler, Traveler};
