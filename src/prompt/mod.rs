mod wizard;

pub use wizard::{needs_wizard, run_wizard, WizardAnswers, WizardDefaults};
