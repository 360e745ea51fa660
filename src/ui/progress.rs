//! Spinner shown while waiting on the backend

use super::context::UiContext;
use console::style;

enum Finish {
    Done,
    Failed,
}

/// Waits on the backend with a live spinner, or a single status line when
/// output is plain
pub struct TaskSpinner {
    live: bool,
    active: Option<cliclack::ProgressBar>,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            live: ctx.use_fancy_output(),
            active: None,
        }
    }

    pub fn start(&mut self, message: &str) {
        if !self.live {
            return;
        }
        let bar = cliclack::spinner();
        bar.start(message);
        self.active = Some(bar);
    }

    pub fn stop(&mut self, message: &str) {
        self.finish(Finish::Done, message);
    }

    /// Failure lines go to stderr in plain mode
    pub fn stop_error(&mut self, message: &str) {
        self.finish(Finish::Failed, message);
    }

    /// Remove the spinner and print nothing
    pub fn clear(&mut self) {
        if let Some(bar) = self.active.take() {
            bar.clear();
        }
    }

    fn finish(&mut self, how: Finish, message: &str) {
        match (self.active.take(), how) {
            (Some(bar), Finish::Done) => bar.stop(message),
            (Some(bar), Finish::Failed) => bar.error(message),
            (None, Finish::Done) => println!("{} {}", style("[OK]").green(), message),
            (None, Finish::Failed) => eprintln!("{} {}", style("[FAIL]").red(), message),
        }
    }
}
