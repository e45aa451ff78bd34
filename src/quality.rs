//! Iterative quality reduction under a byte budget.
//!
//! The reducer is a small state machine:
//!
//! ```text
//! Encoding -> CheckBudget -> Done(WithinBudget)
//!                         -> FloorReached -> Done(FloorReached)
//!                         -> ReduceQuality -> Encoding
//! ```
//!
//! Every `ReduceQuality` step multiplies the quality by less than
//! [`QUALITY_SAFETY_MARGIN`]. The floor is checked before each retry, so the
//! first encode at or below `min_quality` is the last one.

use crate::codec::{CodecError, ImageCodec};
use crate::config::CompressionConfig;
use crate::constants::QUALITY_SAFETY_MARGIN;
use tracing::{debug, warn};

/// How the reducer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetOutcome {
    WithinBudget,
    /// The floor was hit while still over budget. The output is kept anyway.
    FloorReached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub quality: f64,
    pub attempts: u32,
    pub outcome: BudgetOutcome,
}

impl EncodedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

enum ReducerState {
    Encoding { quality: f64 },
    CheckBudget { quality: f64, bytes: Vec<u8> },
    ReduceQuality { quality: f64, size: u64 },
    FloorReached { quality: f64, bytes: Vec<u8> },
    Done(EncodedImage),
}

/// Linear size correction with the safety margin applied.
pub fn next_quality(current_quality: f64, current_size: u64, max_size_bytes: u64) -> f64 {
    current_quality * (max_size_bytes as f64 / current_size as f64) * QUALITY_SAFETY_MARGIN
}

/// Encodes `bitmap`, lowering the quality until the output fits
/// `config.max_size_bytes` or the quality reaches `config.min_quality`.
///
/// The retry quality is not clamped: a correction that lands below the floor
/// is encoded once, and that output is returned even if still over budget.
///
/// An unreachable budget is not an error: the last encoding is returned with
/// [`BudgetOutcome::FloorReached`]. Encoder failures and an invalid `config`
/// are reported as [`CodecError::Encode`].
pub fn reduce_quality<C: ImageCodec>(
    codec: &C,
    bitmap: &C::Bitmap,
    config: &CompressionConfig,
) -> Result<EncodedImage, CodecError> {
    config
        .validate()
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    let mut attempts = 0u32;
    let mut state = ReducerState::Encoding {
        quality: config.initial_quality,
    };

    loop {
        state = match state {
            ReducerState::Encoding { quality } => {
                let bytes = codec.encode(bitmap, quality)?;
                attempts += 1;
                debug!(
                    attempt = attempts,
                    quality,
                    size = bytes.len(),
                    budget = config.max_size_bytes,
                    "encoded"
                );
                ReducerState::CheckBudget { quality, bytes }
            }
            ReducerState::CheckBudget { quality, bytes } => {
                let size = bytes.len() as u64;
                if size <= config.max_size_bytes {
                    ReducerState::Done(EncodedImage {
                        bytes,
                        quality,
                        attempts,
                        outcome: BudgetOutcome::WithinBudget,
                    })
                } else if quality <= config.min_quality {
                    ReducerState::FloorReached { quality, bytes }
                } else {
                    // Buffer is dropped here; the next encode replaces it
                    ReducerState::ReduceQuality { quality, size }
                }
            }
            ReducerState::ReduceQuality { quality, size } => {
                ReducerState::Encoding {
                    quality: next_quality(quality, size, config.max_size_bytes),
                }
            }
            ReducerState::FloorReached { quality, bytes } => {
                warn!(
                    quality,
                    size = bytes.len(),
                    budget = config.max_size_bytes,
                    "quality floor reached before fitting the size budget"
                );
                ReducerState::Done(EncodedImage {
                    bytes,
                    quality,
                    attempts,
                    outcome: BudgetOutcome::FloorReached,
                })
            }
            ReducerState::Done(encoded) => return Ok(encoded),
        };
    }
}
