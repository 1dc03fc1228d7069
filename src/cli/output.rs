//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the Satchel CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Satchel banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
   {}
"#,
                r" ____      _     _____   ____  _   _  _____  _     ".bright_cyan().bold(),
                r"/ ___|    / \   |_   _| / ___|| | | || ____|| |    ".bright_cyan().bold(),
                r"\___ \   / _ \    | |  | |    | |_| ||  _|  | |    ".cyan().bold(),
                r" ___) | / ___ \   | |  | |___ |  _  || |___ | |___ ".blue().bold(),
                r"|____/ /_/   \_\  |_|   \____||_| |_||_____||_____|".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Ferrous Labs MCP Tool Server".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 ____      _     _____   ____  _   _  _____  _
/ ___|    / \   |_   _| / ___|| | | || ____|| |
\___ \   / _ \    | |  | |    | |_| ||  _|  | |
 ___) | / ___ \   | |  | |___ |  _  || |___ | |___
|____/ /_/   \_\  |_|   \____||_| |_||_____||_____|

   Ferrous Labs MCP Tool Server v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[(&str, usize)]) {
        let header: String = columns
            .iter()
            .map(|&(name, width)| format!("{:<width$}", name))
            .collect::<Vec<_>>()
            .join("  ");
        let rule_len = header.len();
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(rule_len).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(rule_len));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[(&str, usize)]) {
        let row: String = values
            .iter()
            .map(|&(value, width)| format!("{:<width$}", value))
            .collect::<Vec<_>>()
            .join("  ");
        println!("    {}", row);
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_new() {
        let output = Output::new();
        assert!(output.colored);
    }

    #[test]
    fn test_output_no_color() {
        let output = Output::no_color();
        assert!(!output.colored);
    }

    #[test]
    fn test_output_default() {
        let output = Output::default();
        assert!(output.colored);
    }

    #[test]
    fn test_table_formatting_no_panic() {
        let output = Output::no_color();

        output.table_header(&[("Name", 20), ("Description", 40)]);
        output.table_row(&[("add", 20), ("Add two numbers.", 40)]);
        output.table_row(&[("a_rather_long_tool_name", 20), ("short", 40)]);
        output.table_row(&[]);
        output.table_header(&[]);
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::new(), Output::no_color()] {
            output.banner();
            output.header("Test Header");
            output.hint("hint message");
            output.command("some command");
            output.newline();
        }
    }
}
