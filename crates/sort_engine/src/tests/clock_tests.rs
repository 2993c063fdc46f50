use super::*;

#[tokio::test(start_paused = true)]
async fn wait_resolves_after_configured_interval() {
    let clock = StepClock::new(Duration::from_millis(100));
    let started = Instant::now();
    assert_eq!(clock.wait().await, Tick::Ready);
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn new_interval_applies_to_next_wait_only() {
    let clock = StepClock::new(Duration::from_millis(200));
    let waiter = {
        let clock = clock.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let tick = clock.wait().await;
            (tick, started.elapsed())
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    clock.set_interval(Duration::from_millis(20));

    let (tick, elapsed) = waiter.await.expect("waiter");
    assert_eq!(tick, Tick::Ready);
    assert!(elapsed >= Duration::from_millis(200));

    let started = Instant::now();
    assert_eq!(clock.wait().await, Tick::Ready);
    assert!(started.elapsed() < Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn cancel_abandons_remaining_delay() {
    let clock = StepClock::new(Duration::from_secs(10));
    let waiter = {
        let clock = clock.clone();
        tokio::spawn(async move { clock.wait().await })
    };
    let started = Instant::now();
    tokio::time::sleep(Duration::from_secs(1)).await;
    clock.cancel();

    assert_eq!(waiter.await.expect("waiter"), Tick::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn cancellation_is_sticky_until_rearmed() {
    let clock = StepClock::new(Duration::from_millis(5));
    clock.cancel();
    assert_eq!(clock.wait().await, Tick::Cancelled);
    assert_eq!(clock.wait().await, Tick::Cancelled);

    clock.rearm();
    assert_eq!(clock.wait().await, Tick::Ready);
}

#[tokio::test(start_paused = true)]
async fn pause_holds_next_wait_until_resume() {
    let clock = StepClock::new(Duration::from_millis(100));
    clock.pause();
    let waiter = {
        let clock = clock.clone();
        tokio::spawn(async move { clock.wait().await })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!waiter.is_finished());

    clock.resume();
    let resumed = Instant::now();
    assert_eq!(waiter.await.expect("waiter"), Tick::Ready);
    assert!(resumed.elapsed() >= Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn pause_mid_countdown_continues_remaining_portion() {
    let clock = StepClock::new(Duration::from_millis(100));
    let waiter = {
        let clock = clock.clone();
        tokio::spawn(async move { clock.wait().await })
    };

    tokio::time::sleep(Duration::from_millis(40)).await;
    clock.pause();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!waiter.is_finished(), "paused countdown must not complete");

    clock.resume();
    let resumed = Instant::now();
    assert_eq!(waiter.await.expect("waiter"), Tick::Ready);
    let tail = resumed.elapsed();
    assert!(tail >= Duration::from_millis(60), "tail was {tail:?}");
    assert!(tail < Duration::from_millis(100), "tail was {tail:?}");
}

#[tokio::test(start_paused = true)]
async fn cancel_releases_paused_wait() {
    let clock = StepClock::new(Duration::from_millis(100));
    clock.pause();
    let waiter = {
        let clock = clock.clone();
        tokio::spawn(async move { clock.wait().await })
    };
    tokio::time::sleep(Duration::from_secs(1)).await;
    clock.cancel();
    assert_eq!(waiter.await.expect("waiter"), Tick::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn rearm_clears_pause_and_cancel() {
    let clock = StepClock::new(Duration::from_millis(10));
    clock.pause();
    clock.cancel();
    assert_eq!(clock.wait().await, Tick::Cancelled);

    clock.rearm();
    let started = Instant::now();
    assert_eq!(clock.wait().await, Tick::Ready);
    assert!(started.elapsed() >= Duration::from_millis(10));
}
