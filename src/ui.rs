/// User interface and status output utilities
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status message formatting
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print the "pokedex-report: " prefix for status messages
fn print_status_header() {
    print!("pokedex-report: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "pokedex-report: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        print_status_header();
        println!("{}", s);
    });
}

/// Print `head`, then `tail` in color, then a newline
fn print_colored_tail(head: &str, tail: &str, fg: term::color::Color, after: &str) {
    print!("{}", head);
    print_color(tail, fg);
    println!("{}", after);
}

fn outcome_color(ok: bool) -> term::color::Color {
    if ok { term::color::BRIGHT_GREEN } else { term::color::BRIGHT_YELLOW }
}

/// Print a status message whose tail is highlighted (green for ok, yellow otherwise)
pub fn status_outcome(s: &str, outcome: &str, ok: bool) {
    status_lock(|| {
        print_status_header();
        print_colored_tail(&format!("{} ", s), outcome, outcome_color(ok), "");
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        println!();
        print_colored_tail("", "error", term::color::BRIGHT_RED, &format!(": {}", msg));
        println!();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_color() {
        assert_eq!(outcome_color(true), term::color::BRIGHT_GREEN);
        assert_eq!(outcome_color(false), term::color::BRIGHT_YELLOW);
    }
}
