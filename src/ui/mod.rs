pub mod prompts;
pub mod report;

pub use prompts::prompt_confirmation;
pub use report::ConsoleReporter;
