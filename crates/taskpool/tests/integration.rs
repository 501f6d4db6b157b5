use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use taskpool::{Pool, PoolConfig, PoolError, TaskOutcome, EMPTY_TASK};

#[test]
fn priority_ordering_on_one_worker() {
    let pool = Pool::with_config(PoolConfig::new().workers(1));
    pool.pause();

    let log = Arc::new(Mutex::new(Vec::new()));
    let push = |priority: i32, tag: &'static str| {
        let log = log.clone();
        pool.submit_with_priority(priority, move || log.lock().unwrap().push(tag))
    };

    let a = push(5, "A");
    let b = push(1, "B");
    let c = push(3, "C");

    pool.resume();
    a.await_result().unwrap();
    b.await_result().unwrap();
    c.await_result().unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["B", "C", "A"]);
}

#[test]
fn parallel_speedup_under_250ms() {
    let pool = Pool::with_config(PoolConfig::new().workers(4));
    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|_| pool.submit(|| thread::sleep(Duration::from_millis(100))))
        .collect();
    for h in handles {
        h.await_result().unwrap();
    }
    assert!(start.elapsed() < Duration::from_millis(250));
}

#[test]
fn callback_submission_runs_work_before_callback() {
    let pool = Pool::with_config(PoolConfig::new().workers(2));
    let log = Arc::new(Mutex::new(Vec::new()));
    let (l1, l2) = (log.clone(), log.clone());

    pool.submit_with_callback(
        Some(move || l1.lock().unwrap().push("x")),
        move || l2.lock().unwrap().push("y"),
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(1);
    while log.lock().unwrap().len() < 2 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(*log.lock().unwrap(), vec!["x", "y"]);
}

#[test]
fn fault_isolation_across_one_hundred_tasks() {
    let pool = Pool::with_config(PoolConfig::new().workers(4));
    let handles: Vec<_> = (0..100)
        .map(|i| {
            pool.submit(move || -> i32 {
                if i % 10 == 0 {
                    panic!("every tenth task faults");
                }
                i
            })
        })
        .collect();

    let (mut faulted, mut ok) = (0, 0);
    for h in handles {
        match h.await_result() {
            Ok(_) => ok += 1,
            Err(TaskOutcome::Panicked(_)) => faulted += 1,
            Err(other) => panic!("unexpected outcome: {other}"),
        }
    }
    assert_eq!(faulted, 10);
    assert_eq!(ok, 90);
}

#[test]
fn shutdown_drain_executes_every_queued_task() {
    let pool = Pool::with_config(PoolConfig::new().workers(4));
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..1000)
        .map(|_| {
            let counter = counter.clone();
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    drop(pool);

    for h in handles {
        let _ = h.await_result();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1000);
}

#[test]
fn submit_after_stop_is_rejected() {
    let pool = Pool::with_config(PoolConfig::new().workers(1));
    pool.stop();
    let handle = pool.submit(|| 1);
    match handle.await_result() {
        Err(TaskOutcome::ShuttingDown) => {}
        other => panic!("expected ShuttingDown, got {other:?}"),
    }
}

#[test]
fn config_env_override_takes_precedence_over_default() {
    std::env::set_var("TASKPOOL_WORKERS", "3");
    let config = PoolConfig::from_env();
    assert_eq!(config.num_workers, 3);
    std::env::remove_var("TASKPOOL_WORKERS");

    let pool = Pool::with_config(config);
    assert_eq!(pool.worker_count(), 3);
}

#[test]
fn empty_callback_submission_rejected_with_documented_sentinel() {
    let pool = Pool::with_config(PoolConfig::new().workers(1));
    let result = pool.submit_with_callback(EMPTY_TASK, || ());
    assert_eq!(result, Err(PoolError::EmptyTask));
}

#[test]
fn pause_then_resume_releases_queued_work() {
    let pool = Pool::with_config(PoolConfig::new().workers(1));
    pool.pause();
    let handle = pool.submit(|| "done");
    thread::sleep(Duration::from_millis(30));
    assert!(!handle.is_finished());
    pool.resume();
    assert_eq!(handle.await_result().unwrap(), "done");
}
