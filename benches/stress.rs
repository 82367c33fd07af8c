use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use slotkeeper::engine::{Engine, EngineError};
use slotkeeper::model::BookingRequest;

const HOUR: i64 = 3_600_000; // 1 hour in ms
const BASE: i64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z

fn rfc3339(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .expect("bench timestamps are in range")
        .to_rfc3339()
}

fn hour_slot(user: &str, hour: i64) -> BookingRequest {
    let s = BASE + hour * HOUR;
    BookingRequest::new(user, &rfc3339(s), &rfc3339(s + HOUR))
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        println!("  {label}: no samples");
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.3}ms, p50={:.3}ms, p95={:.3}ms, p99={:.3}ms, max={:.3}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies[latencies.len() - 1].as_secs_f64() * 1000.0,
    );
}

/// Disjoint hourly bookings, one at a time. Conflict scan grows with the set.
async fn phase1_sequential() {
    let engine = Engine::new();
    let n = 5000;
    let mut latencies = Vec::with_capacity(n);

    let start = Instant::now();
    for i in 0..n {
        let t = Instant::now();
        engine.create_booking(hour_slot("seq", i as i64)).await.unwrap();
        latencies.push(t.elapsed());
    }
    let elapsed = start.elapsed();

    let ops = n as f64 / elapsed.as_secs_f64();
    println!("  {n} bookings in {:.2}s = {ops:.0} ops/sec", elapsed.as_secs_f64());
    print_latency("create latency", &mut latencies);
}

/// Many tasks fighting over the same few slots. Exactly one winner per slot.
async fn phase2_contended() {
    let engine = Arc::new(Engine::new());
    let n_tasks = 32;
    let n_slots = 100;
    let wins = Arc::new(AtomicUsize::new(0));
    let conflicts = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();
    let mut handles = Vec::new();
    for t in 0..n_tasks {
        let engine = engine.clone();
        let wins = wins.clone();
        let conflicts = conflicts.clone();
        handles.push(tokio::spawn(async move {
            for slot in 0..n_slots {
                match engine.create_booking(hour_slot(&format!("t{t}"), slot)).await {
                    Ok(_) => wins.fetch_add(1, Ordering::Relaxed),
                    Err(EngineError::Conflict(_)) => conflicts.fetch_add(1, Ordering::Relaxed),
                    Err(e) => panic!("unexpected error: {e}"),
                };
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    let elapsed = start.elapsed();

    let total = n_tasks * n_slots as usize;
    let ok = wins.load(Ordering::Relaxed);
    println!(
        "  {n_tasks} tasks x {n_slots} slots = {total} attempts in {:.2}s: \
         {ok} created, {} conflicts",
        elapsed.as_secs_f64(),
        conflicts.load(Ordering::Relaxed)
    );
    assert_eq!(ok, n_slots as usize, "every slot must have exactly one winner");
}

/// Readers hammer list/get while writers keep creating.
async fn phase3_read_under_load() {
    let engine = Arc::new(Engine::new());
    let mut ids = Vec::new();
    for i in 0..500 {
        ids.push(engine.create_booking(hour_slot("pre", i)).await.unwrap().id);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let mut writer_handles = Vec::new();
    for w in 0..4i64 {
        let engine = engine.clone();
        let stop = stop.clone();
        writer_handles.push(tokio::spawn(async move {
            let mut i = 0i64;
            while !stop.load(Ordering::Relaxed) {
                let _ = engine.create_booking(hour_slot("w", 1_000 + w * 100_000 + i)).await;
                i += 1;
                tokio::task::yield_now().await;
            }
        }));
    }

    let n = 2000;
    let mut get_latencies = Vec::with_capacity(n);
    let mut list_latencies = Vec::with_capacity(n / 10);
    for i in 0..n {
        let t = Instant::now();
        engine.get_booking(ids[i % ids.len()]).await.unwrap();
        get_latencies.push(t.elapsed());
        if i % 10 == 0 {
            let t = Instant::now();
            let _ = engine.list_bookings().await;
            list_latencies.push(t.elapsed());
        }
    }

    stop.store(true, Ordering::Relaxed);
    for h in writer_handles {
        h.await.unwrap();
    }

    print_latency("get latency", &mut get_latencies);
    print_latency("list latency", &mut list_latencies);
    println!("  final size: {}", engine.booking_count().await);
}

/// Create, move, delete in a loop across tasks; delete bypasses the serializer.
async fn phase4_churn() {
    let engine = Arc::new(Engine::new());
    let n_tasks = 16i64;
    let rounds = 500i64;

    let start = Instant::now();
    let mut handles = Vec::new();
    for t in 0..n_tasks {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            for r in 0..rounds {
                let base = t * rounds * 2 + r * 2;
                if let Ok(b) = engine.create_booking(hour_slot("churn", base)).await {
                    let _ = engine.update_booking(b.id, hour_slot("churn", base + 1)).await;
                    let _ = engine.delete_booking(b.id).await;
                }
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    let elapsed = start.elapsed();

    let ops = (n_tasks * rounds * 3) as f64 / elapsed.as_secs_f64();
    println!(
        "  {n_tasks} tasks x {rounds} rounds in {:.2}s = {ops:.0} ops/sec",
        elapsed.as_secs_f64()
    );
    assert_eq!(engine.booking_count().await, 0);
}

#[tokio::main]
async fn main() {
    println!("=== slotkeeper stress benchmark ===\n");

    println!("[phase 1] sequential create throughput");
    phase1_sequential().await;

    println!("\n[phase 2] contended creates");
    phase2_contended().await;

    println!("\n[phase 3] read latency under write load");
    phase3_read_under_load().await;

    println!("\n[phase 4] create/update/delete churn");
    phase4_churn().await;

    println!("\n=== benchmark complete ===");
}
