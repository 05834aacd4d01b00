pub mod analytics;
pub mod arbiter;
pub mod audit;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extraction;
pub mod factcheck;
pub mod knowledge;
pub mod nlp;
pub mod redflags;
pub mod scoring;
pub mod segments;
pub mod server;
pub mod types;
pub mod verification;

pub use types::{Verdict, VerificationResult};
pub use verification::Verifier;
