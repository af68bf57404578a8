//! Deterministic vector encoding for attempts and learner profiles
//!
//! No embedding model is involved: vectors are derived from hashed
//! features so that identical inputs always produce identical vectors.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::pattern::{AttemptEvent, LearningPattern};

/// Dimension of every encoded vector
pub const VECTOR_DIM: usize = 384;

/// Encode a single attempt event
///
/// Feature layout: the topic is hashed across the vector body, slot 0
/// carries the difficulty weight and slot 1 the normalized score. The
/// result is L2-normalized.
pub fn attempt_vector(event: &AttemptEvent) -> Vec<f32> {
    let mut vector = hashed_base(&event.topic);
    vector[0] = event.difficulty.weight();
    vector[1] = event.score as f32 / 100.0;
    normalize(&mut vector);
    vector
}

/// Encode a learner profile from its aggregated pattern
///
/// Each covered topic contributes its hashed base weighted by the topic's
/// average score; slot 0 carries the overall average.
pub fn profile_vector(pattern: &LearningPattern) -> Vec<f32> {
    let mut vector = vec![0.0f32; VECTOR_DIM];
    for (topic, history) in &pattern.topics {
        let Some(avg) = history.average() else { continue };
        let base = hashed_base(topic);
        let weight = (avg / 100.0) as f32;
        for (slot, value) in vector.iter_mut().zip(base.iter()) {
            *slot += value * weight;
        }
    }
    vector[0] = pattern.overall_average().unwrap_or(0.0) as f32 / 100.0;
    normalize(&mut vector);
    vector
}

/// Cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

/// Spread a hashed token across the vector body (slots 2..)
fn hashed_base(token: &str) -> Vec<f32> {
    let mut hasher = DefaultHasher::new();
    token.to_lowercase().hash(&mut hasher);
    let seed = hasher.finish();

    let mut vector = vec![0.0f32; VECTOR_DIM];
    for (j, slot) in vector.iter_mut().enumerate().skip(2) {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        (j as u64).hash(&mut hasher);
        let val = hasher.finish();
        *slot = ((val as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32;
    }
    vector
}

fn normalize(vector: &mut [f32]) {
    let mag: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag > 0.0 {
        for val in vector.iter_mut() {
            *val /= mag;
        }
    }
}
