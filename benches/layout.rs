// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mmdiagram::layout::{compose_diagram, layout_diagram};

mod fixtures;
mod profiler;

// Group names (`layout.diagram`, `layout.compose`) and case ids are kept stable so
// results stay comparable across refactors.
fn benches_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.diagram");
    for case in fixtures::Case::ALL {
        let diagram = fixtures::fixture(case);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let layout = layout_diagram(black_box(&diagram));
                black_box(layout.maps().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("layout.compose");
    for case in fixtures::Case::ALL {
        let layout = layout_diagram(&fixtures::fixture(case));
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let composition = compose_diagram(black_box(&layout));
                black_box(composition.height)
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
