mod styling;

pub use styling::{bright_green, bright_red, dim, magenta_bold};

/// Prints the `cigate` banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🚦 cigate"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Travis CI build gate")
    );
}
