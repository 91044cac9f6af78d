//! Car dealership record layer built on [`AvlTree`](crate::tree::AvlTree)
//!
//! Tracks car types, their models, per-model sales and scores, and answers:
//! - best seller (per type, or global)
//! - the k worst-scored models, merged from several bounded traversals
//!
//! All indices are owned by [`Dealership`]; records change only through its
//! coordinated mutation path.

mod car_type;
mod config;
mod manager;
mod model;

pub use car_type::{ByTypeId, CarType};
pub use config::DealershipConfig;
pub use manager::Dealership;
pub use model::{BySales, ByScore, CarModel, ModelRef, Mutation, SalesKey, ScoreBand, ScoreKey};

use thiserror::Error;

use crate::tree::TreeError;

/// Car type identifier (positive)
pub type TypeId = u32;

/// Model index within a type
pub type ModelId = u32;

/// Errors raised by dealership operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DealershipError {
    /// Argument out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No type with this id
    #[error("unknown car type {0}")]
    UnknownType(TypeId),

    /// Type exists but has no such model
    #[error("car type {type_id} has no model {model_id}")]
    UnknownModel {
        /// Type searched
        type_id: TypeId,
        /// Model requested
        model_id: ModelId,
    },

    /// Type id already registered
    #[error("car type {0} already exists")]
    DuplicateType(TypeId),

    /// No types registered
    #[error("dealership has no car types")]
    Empty,

    /// Underlying index failure
    #[error("index error: {0}")]
    Tree(#[from] TreeError),
}
