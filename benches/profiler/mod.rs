// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Criterion settings shared by every bench target.
//!
//! `MMDIAGRAM_PROFILE_FREQ`, `MMDIAGRAM_BENCH_SAMPLES`, `MMDIAGRAM_BENCH_WARMUP_SECS` and
//! `MMDIAGRAM_BENCH_MEASURE_SECS` override the defaults. Flamegraphs are written when
//! benches run with `--profile-time`.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr + Ord>(name: &str, default: T, min: T, max: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

pub fn criterion() -> Criterion {
    let frequency = env_or("MMDIAGRAM_PROFILE_FREQ", 100_i32, 1, 1000);
    let samples = env_or("MMDIAGRAM_BENCH_SAMPLES", 50_usize, 10, 200);
    let warmup = env_or("MMDIAGRAM_BENCH_WARMUP_SECS", 2_u64, 1, 60);
    let measure = env_or("MMDIAGRAM_BENCH_MEASURE_SECS", 5_u64, 1, 120);

    Criterion::default()
        .sample_size(samples)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measure))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
