//! Linear three-step flows with per-step gating.

use std::fmt;

use tracing::debug;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;

/// Form state driven by a [`Wizard`].
pub trait WizardForm {
    /// Whether `step` has everything it needs to move on.
    fn step_complete(&self, step: u8) -> bool;

    fn step_title(&self, step: u8) -> &'static str;

    /// Label of the forward button on the last step.
    fn finish_label(&self) -> &'static str;

    /// Called after the wizard moves forward onto `step`.
    fn on_enter_step(&mut self, _step: u8) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(u8),
    Completed,
    /// Current step predicate is false.
    Blocked,
    /// Wizard already completed; input ignored.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    SteppedBack(u8),
    AtFirstStep,
    Terminated,
}

type CompletionHook<F> = Box<dyn FnOnce(&F)>;

pub struct Wizard<F: WizardForm> {
    step: u8,
    completed: bool,
    form: F,
    on_complete: Option<CompletionHook<F>>,
}

impl<F: WizardForm> Wizard<F> {
    pub fn new(form: F) -> Self {
        Self {
            step: FIRST_STEP,
            completed: false,
            form,
            on_complete: None,
        }
    }

    /// Runs `hook` once, when the last step is finished.
    pub fn with_completion(mut self, hook: impl FnOnce(&F) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// `None` once the wizard has completed.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        if self.completed {
            None
        } else {
            Some(&mut self.form)
        }
    }

    pub fn into_form(self) -> F {
        self.form
    }

    pub fn step_title(&self) -> &'static str {
        self.form.step_title(self.step)
    }

    pub fn can_go_back(&self) -> bool {
        !self.completed && self.step > FIRST_STEP
    }

    pub fn can_advance(&self) -> bool {
        !self.completed && self.form.step_complete(self.step)
    }

    pub fn next_label(&self) -> &'static str {
        if self.step == LAST_STEP {
            self.form.finish_label()
        } else {
            "Next"
        }
    }

    pub fn progress_percent(&self) -> u8 {
        self.step * 100 / LAST_STEP
    }

    pub fn next(&mut self) -> StepOutcome {
        if self.completed {
            return StepOutcome::Terminated;
        }
        if !self.form.step_complete(self.step) {
            debug!(step = self.step, "wizard step incomplete");
            return StepOutcome::Blocked;
        }
        if self.step < LAST_STEP {
            self.step += 1;
            self.form.on_enter_step(self.step);
            debug!(step = self.step, "wizard advanced");
            return StepOutcome::Advanced(self.step);
        }

        self.completed = true;
        if let Some(hook) = self.on_complete.take() {
            hook(&self.form);
        }
        debug!("wizard completed");
        StepOutcome::Completed
    }

    pub fn back(&mut self) -> BackOutcome {
        if self.completed {
            return BackOutcome::Terminated;
        }
        if self.step == FIRST_STEP {
            return BackOutcome::AtFirstStep;
        }
        self.step -= 1;
        debug!(step = self.step, "wizard stepped back");
        BackOutcome::SteppedBack(self.step)
    }
}

impl<F: WizardForm + fmt::Debug> fmt::Debug for Wizard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("step", &self.step)
            .field("completed", &self.completed)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[derive(Debug, Default)]
    struct Gates {
        open: [bool; 3],
        entered: Vec<u8>,
    }

    impl WizardForm for Gates {
        fn step_complete(&self, step: u8) -> bool {
            self.open[usize::from(step - 1)]
        }

        fn step_title(&self, _step: u8) -> &'static str {
            "gate"
        }

        fn finish_label(&self) -> &'static str {
            "Finish"
        }

        fn on_enter_step(&mut self, step: u8) {
            self.entered.push(step);
        }
    }

    #[test]
    fn never_advances_past_incomplete_step() {
        let mut wizard = Wizard::new(Gates::default());
        assert_eq!(wizard.next(), StepOutcome::Blocked);
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.back(), BackOutcome::AtFirstStep);

        wizard.form_mut().expect("open").open[0] = true;
        assert_eq!(wizard.next(), StepOutcome::Advanced(2));
        assert_eq!(wizard.next(), StepOutcome::Blocked);
        assert_eq!(wizard.step(), 2);
        assert_eq!(wizard.next_label(), "Next");
        assert_eq!(wizard.form().entered, vec![2]);
    }

    #[test]
    fn finishing_runs_hook_once_and_terminates() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut wizard = Wizard::new(Gates {
            open: [true; 3],
            entered: Vec::new(),
        })
        .with_completion(move |_| seen.set(seen.get() + 1));

        assert_eq!(wizard.next(), StepOutcome::Advanced(2));
        assert_eq!(wizard.next(), StepOutcome::Advanced(3));
        assert_eq!(wizard.next_label(), "Finish");
        assert_eq!(wizard.progress_percent(), 100);
        assert_eq!(wizard.next(), StepOutcome::Completed);
        assert_eq!(calls.get(), 1);

        assert_eq!(wizard.next(), StepOutcome::Terminated);
        assert_eq!(wizard.back(), BackOutcome::Terminated);
        assert!(wizard.form_mut().is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn back_steps_down_without_rechecking() {
        let mut wizard = Wizard::new(Gates {
            open: [true, true, false],
            entered: Vec::new(),
        });
        wizard.next();
        wizard.next();
        assert_eq!(wizard.step(), 3);
        assert_eq!(wizard.next(), StepOutcome::Blocked);
        assert_eq!(wizard.back(), BackOutcome::SteppedBack(2));
        assert_eq!(wizard.back(), BackOutcome::SteppedBack(1));
        assert_eq!(wizard.progress_percent(), 33);
    }
}
