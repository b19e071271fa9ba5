use colored::Colorize;

/// Format a fatal error and its causes for the terminal.
pub fn format_error(err: &anyhow::Error, color: bool) -> String {
    let label = if color {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    let mut out = format!("{label}: {err}");
    for cause in err.chain().skip(1) {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
    }
    out
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
