use std::sync::{Arc, Mutex};

use controller::{AnimationController, Settings};
use shared::domain::{AlgorithmId, RunPhase, Snapshot, VisualState};
use sort_engine::Renderer;

#[derive(Default)]
struct LastFrame(Mutex<Option<Snapshot>>);

impl Renderer for LastFrame {
    fn render(&self, frame: &Snapshot) {
        *self.0.lock().expect("frame lock") = Some(frame.clone());
    }
}

#[tokio::test(start_paused = true)]
async fn every_algorithm_completes_as_sorted_permutation() {
    for algorithm in AlgorithmId::ALL {
        let renderer = Arc::new(LastFrame::default());
        let settings = Settings {
            array_size: 30,
            interval_ms: 0,
            algorithm,
            seed: Some(11),
            ..Settings::default()
        };
        let mut controller =
            AnimationController::new(settings, renderer.clone()).expect("controller");
        let mut original = controller.snapshot().expect("initial sequence").values();

        controller.start().expect("start");
        assert_eq!(controller.wait_for_run().await, RunPhase::Completed, "{algorithm}");

        let last = renderer
            .0
            .lock()
            .expect("frame lock")
            .clone()
            .expect("final frame");
        assert!(last.is_sorted(), "{algorithm}");
        assert!(last.iter().all(|element| element.state == VisualState::Sorted));
        original.sort_unstable();
        assert_eq!(last.values(), original, "{algorithm}");
    }
}

#[tokio::test(start_paused = true)]
async fn generate_after_reset_produces_independent_sequence() {
    let renderer = Arc::new(LastFrame::default());
    let settings = Settings {
        array_size: 40,
        interval_ms: 5,
        seed: Some(21),
        ..Settings::default()
    };
    let mut controller = AnimationController::new(settings, renderer).expect("controller");
    let first = controller.snapshot().expect("initial").values();

    controller.start().expect("start");
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    controller.reset().await.expect("reset");
    let after_reset = controller.snapshot().expect("after reset").values();
    controller.generate().expect("generate");
    let generated = controller.snapshot().expect("generated").values();

    assert_eq!(after_reset.len(), 40);
    assert_eq!(generated.len(), 40);
    assert_ne!(after_reset, first);
    assert_ne!(generated, after_reset);
}
