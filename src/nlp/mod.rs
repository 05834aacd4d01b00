//! Language-analysis seam: sentence splitting, part-of-speech tags, named
//! entities and sentiment polarity.
//!
//! Callers depend on the [`Annotator`] trait only. [`LexiconAnnotator`] is the
//! bundled rule-based implementation; heavier NLP backends plug in behind the
//! same trait.

mod annotator;
mod lexicon;
mod sentiment;

pub use annotator::LexiconAnnotator;
pub use sentiment::polarity;

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pos {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Part,
    Conj,
    Num,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

pub trait Annotator: Send + Sync {
    fn sentences(&self, text: &str) -> Vec<String>;
    fn tag(&self, sentence: &str) -> Vec<Token>;
    fn entities(&self, text: &str) -> Result<Vec<Entity>>;
    /// Polarity in [-1, 1]; 0 when nothing polar is found.
    fn polarity(&self, text: &str) -> f64;
}
