use std::env::var;

/**
    Reports a failed run to GitHub Actions using an `::error::` workflow
    command, so that it shows up as an annotation on the workflow run.

    Does nothing when not running inside GitHub Actions.
*/
pub fn report_failure(message: &str) {
    if var("GITHUB_ACTIONS").is_ok_and(|value| value == "true") {
        println!("::error::{}", escape_data(message));
    }
}

// Workflow commands are line based, so newlines must be escaped
fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
