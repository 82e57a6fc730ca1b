//! LoveTracker 性能基准测试

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lovemeter::services::{LoveTracker, VisitorContext};
use lovemeter::storage::StorageFactory;
use tempfile::TempDir;

/// 临时 SQLite 上的 tracker，TempDir 保活到基准结束
fn create_tracker(rt: &tokio::runtime::Runtime) -> (Arc<LoveTracker>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("bench.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = rt
        .block_on(StorageFactory::create_with_url(&db_url))
        .unwrap();

    (Arc::new(LoveTracker::new(storage)), temp_dir)
}

/// 单访客反复切换（稳定态下每次切换只有一条 UPDATE）
fn bench_toggle_single_visitor(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (tracker, _temp) = create_tracker(&rt);
    let ctx = VisitorContext::bare("1.2.3.4");

    // 预热：先建行，基准阶段只测翻转路径
    rt.block_on(tracker.toggle(&ctx));

    c.bench_function("toggle/single_visitor", |b| {
        b.to_async(&rt).iter(|| async {
            tracker.toggle(&ctx).await;
        });
    });
}

/// 轮换访客键切换，混合建行与翻转
fn bench_toggle_rotating_visitors(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (tracker, _temp) = create_tracker(&rt);
    let keys: Vec<String> = (0..256).map(|i| format!("10.0.0.{}", i)).collect();
    let idx = AtomicUsize::new(0);

    c.bench_function("toggle/rotating_visitors", |b| {
        b.to_async(&rt).iter(|| async {
            let i = idx.fetch_add(1, Ordering::Relaxed);
            let ctx = VisitorContext::bare(keys[i % keys.len()].as_str());
            tracker.toggle(&ctx).await;
        });
    });
}

/// 不同数据量下的活跃计数查询
fn bench_count_active(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("count_active");

    for num_visitors in [100usize, 1000] {
        let (tracker, _temp) = create_tracker(&rt);
        rt.block_on(async {
            for i in 0..num_visitors {
                let key = format!("10.0.{}.{}", i / 256, i % 256);
                tracker.toggle(&VisitorContext::bare(key)).await;
            }
        });

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("visitors", num_visitors),
            &num_visitors,
            |b, _| {
                b.to_async(&rt).iter(|| async {
                    tracker.count_active().await;
                });
            },
        );
    }
    group.finish();
}

/// 状态读取：单行查找 + 计数
fn bench_status_for(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (tracker, _temp) = create_tracker(&rt);

    rt.block_on(async {
        for i in 0..100 {
            let key = format!("10.0.0.{}", i);
            tracker.toggle(&VisitorContext::bare(key)).await;
        }
    });

    c.bench_function("status_for/warm", |b| {
        b.to_async(&rt).iter(|| async {
            tracker.status_for("10.0.0.50").await;
        });
    });
}

criterion_group!(
    benches,
    bench_toggle_single_visitor,
    bench_toggle_rotating_visitors,
    bench_count_active,
    bench_status_for
);
criterion_main!(benches);
