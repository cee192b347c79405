// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kennel_responder::adapters::scene::hits_for_point;
use kennel_responder::router::Router;
use kennel_responder::types::WidgetLookup;
use kennel_scene::{LocalNode, NodeFlags, NodeId, QueryFilter, Tree};
use kurbo::{Point, Rect};

const CELL: f64 = 10.0;

/// A root with an `n`×`n` grid of cards, each holding one tabbable button.
fn build_grid(n: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let side = n as f64 * CELL;
    let root = tree.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, side, side)));
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * CELL;
            let y0 = y as f64 * CELL;
            let card = tree.insert(
                Some(root),
                LocalNode::with_bounds(Rect::new(x0, y0, x0 + CELL, y0 + CELL)),
            );
            tree.insert(
                Some(card),
                LocalNode {
                    local_bounds: Rect::new(x0 + 2.0, y0 + 2.0, x0 + 8.0, y0 + 8.0),
                    flags: NodeFlags::tabbable(),
                    ..LocalNode::default()
                },
            );
        }
    }
    tree.commit();
    (tree, root)
}

struct NoWidgets;

impl WidgetLookup<NodeId> for NoWidgets {
    type WidgetId = ();
    fn widget_of(&self, _: &NodeId) -> Option<()> {
        None
    }
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &n in &[16usize, 32, 64] {
        let (tree, _) = build_grid(n);
        let center = Point::new(n as f64 * CELL / 2.0 + 5.0, n as f64 * CELL / 2.0 + 5.0);
        group.throughput(Throughput::Elements((n * n * 2) as u64));
        group.bench_function(format!("topmost_n{n}"), |b| {
            b.iter(|| black_box(tree.hit_test_point(black_box(center), QueryFilter::POINTER)));
        });
        group.bench_function(format!("route_pointer_n{n}"), |b| {
            let router: Router<NodeId, NoWidgets, &Tree> = Router::with_parent(NoWidgets, &tree);
            b.iter(|| {
                let hits = hits_for_point(&tree, black_box(center), QueryFilter::POINTER);
                black_box(router.route_pointer(&hits).len())
            });
        });
    }
    group.finish();
}

fn bench_tab_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("tab_order");
    for &n in &[16usize, 32, 64] {
        let (tree, root) = build_grid(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("scoped_n{n}"), |b| {
            b.iter(|| black_box(tree.tab_order(Some(root)).len()));
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    for &n in &[16usize, 32, 64] {
        group.bench_function(format!("move_root_n{n}"), |b| {
            b.iter_batched(
                || build_grid(n),
                |(mut tree, root)| {
                    tree.set_local_bounds(root, Rect::new(1.0, 1.0, 2.0, 2.0));
                    black_box(tree.commit());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_tab_order, bench_commit);
criterion_main!(benches);
