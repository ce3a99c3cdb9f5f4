// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::time::Duration;

use criterion::Criterion;
use platonia::model::{ConceptMap, DiagramEdge, DiagramNode, NodeId, NodeState};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Default,
    Ring64,
    Dense128,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ring64 => "ring_64",
            Self::Dense128 => "dense_128",
        }
    }
}

pub fn map(case: Case) -> ConceptMap {
    match case {
        Case::Default => platonia::model::fixtures::default_map().expect("default map"),
        Case::Ring64 => ring(64, 1),
        Case::Dense128 => ring(128, 6),
    }
}

/// `n` nodes on a circle, each joined to its next `fan` neighbours.
fn ring(n: usize, fan: usize) -> ConceptMap {
    let id = |i: usize| NodeId::new(format!("n{i}")).expect("node id");
    let states = [NodeState::Active, NodeState::Latent, NodeState::Saturated];

    let nodes = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            DiagramNode::new(
                id(i),
                format!("Concept {i}"),
                "bench",
                (400.0 + 250.0 * angle.cos(), 300.0 + 250.0 * angle.sin()),
                states[i % states.len()].clone(),
            )
        })
        .collect();
    let edges = (0..n)
        .flat_map(|i| (1..=fan).map(move |step| (i, (i + step) % n)))
        .map(|(a, b)| DiagramEdge::new(id(a), id(b), 1.0 + (a % 3) as f64 * 0.5))
        .collect();

    ConceptMap::new(nodes, edges).expect("ring map")
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let sample_size = env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}
