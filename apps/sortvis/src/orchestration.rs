//! Applies parsed control commands to the animation controller.

use controller::AnimationController;
use shared::{domain::RunPhase, protocol::RunEvent};

use crate::commands::{ControlCommand, HELP};

pub async fn dispatch_control_command(controller: &mut AnimationController, cmd: ControlCommand) {
    let cmd_name = cmd.name();
    let result = match cmd {
        ControlCommand::Algorithm(algorithm) => {
            controller.select_algorithm(algorithm);
            let info = controller.algorithm_info();
            eprintln!(
                "{}: {} time {} space {}",
                info.name, info.description, info.time_complexity, info.space_complexity
            );
            Ok(())
        }
        ControlCommand::Size(size) => controller.set_size(size),
        ControlCommand::Speed(raw) => controller.set_speed(raw).map(|_| ()),
        ControlCommand::Generate => controller.generate(),
        ControlCommand::Start => controller.start(),
        ControlCommand::Pause => controller.pause(),
        ControlCommand::Reset => controller.reset().await,
        ControlCommand::Status => {
            let state = controller.run_state();
            let settings = controller.settings();
            eprintln!(
                "{} | algorithm={} size={} values={}..={} interval={}ms running={} paused={}",
                controller.status_text(),
                state.algorithm,
                controller.size(),
                settings.value_low,
                settings.value_high,
                state.speed_ms,
                state.is_running,
                state.is_paused
            );
            Ok(())
        }
        ControlCommand::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        ControlCommand::Quit => Ok(()),
    };

    match result {
        Ok(()) => tracing::debug!(command = cmd_name, "applied control command"),
        Err(err) => eprintln!("{cmd_name} rejected: {err}"),
    }
}

/// Lets the controller pick up a finished run when its end event arrives.
///
/// Never waits: the event may belong to a run that has already been replaced
/// by a newer one.
pub fn observe_run_end(controller: &mut AnimationController, event: &RunEvent) -> Option<RunPhase> {
    event.ends_run().then(|| controller.poll())
}

/// One-line human description of a controller event.
pub fn describe_event(event: &RunEvent) -> String {
    match event {
        RunEvent::Status { text, .. } => format!("[{text}]"),
        RunEvent::AlgorithmSelected { algorithm } => format!("selected {algorithm}"),
        RunEvent::Regenerated { len } => format!("generated {len} elements"),
        RunEvent::SpeedChanged { interval_ms } => format!("step interval {interval_ms}ms"),
        RunEvent::Completed { algorithm, steps } => {
            format!("{algorithm} finished in {steps} steps")
        }
        RunEvent::Cancelled { algorithm, steps } => {
            format!("{algorithm} cancelled after {steps} steps")
        }
        RunEvent::Failed { algorithm, message } => format!("{algorithm} failed: {message}"),
        RunEvent::Rejected(rejection) => format!("rejected: {}", rejection.message),
    }
}
