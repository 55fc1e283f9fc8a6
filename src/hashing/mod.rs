pub mod shingles;
pub mod signature_index;

pub use shingles::{Shingles, Signature};
pub use signature_index::SignatureIndex;
