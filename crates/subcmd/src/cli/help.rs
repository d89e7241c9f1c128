//! The global usage listing.
//!
//! Printed for an empty invocation, for `-h`/`--help`, and after an unknown
//! command. It starts with the help of a one-argument clap parser
//! (`<prog> [<namespace>.]<command> [<args>]`) and, when commands are
//! registered, follows with the command listing:
//!
//! ```text
//! available commands:
//!   greet                    Say hello
//!
//!   [math]
//!     add                    Add two numbers
//! ```
//!
//! Top-level commands come first, then namespaced ones grouped under a
//! styled `[namespace]` header.

use clap::{Arg, ArgAction, Command};
use subcmd_dispatch::Registry;
use subcmd_render::{min_width, Theme, NAMESPACE};

/// Name column width for top-level commands.
pub const TOP_LEVEL_WIDTH: usize = 25;
/// Name column width for namespaced commands (indented two more columns).
pub const NAMESPACED_WIDTH: usize = 23;

const INDENT: &str = "  ";

/// The clap parser describing the global invocation shape.
pub fn global_parser(prog: &str) -> Command {
    Command::new(prog.to_string())
        .override_usage(format!("{} [<namespace>.]<command> [<args>]", prog))
        .disable_version_flag(true)
        .arg(
            Arg::new("command")
                .help("the command to run")
                .required(true)
                .action(ArgAction::Set),
        )
}

/// Renders the full usage text for `registry`.
pub fn render_usage(registry: &Registry, prog: &str, theme: &Theme, styled: bool) -> String {
    let mut out = global_parser(prog).render_help().to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if !registry.is_empty() {
        out.push_str("\navailable commands:\n");
        out.push_str(&render_command_list(registry, theme, styled));
    }
    out
}

/// Renders the `available commands` body.
pub fn render_command_list(registry: &Registry, theme: &Theme, styled: bool) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for command in registry.list_sorted() {
        match command.namespace() {
            Some(ns) => {
                if current != Some(ns) {
                    let header = theme.paint(NAMESPACE, &format!("[{}]", ns), styled);
                    out.push_str(&format!("\n{}{}\n", INDENT, header));
                }
                out.push_str(&format!(
                    "{}{}{}{}\n",
                    INDENT,
                    INDENT,
                    min_width(command.name(), NAMESPACED_WIDTH),
                    command.description()
                ));
            }
            None => {
                out.push_str(&format!(
                    "{}{}{}\n",
                    INDENT,
                    min_width(command.name(), TOP_LEVEL_WIDTH),
                    command.description()
                ));
            }
        }
        current = command.namespace();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use subcmd_dispatch::{Arguments, Signature};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        for (ns, name, description) in [
            (None, "greet", "Say hello"),
            (Some("math"), "add", "Add two numbers"),
            (Some("math"), "div", ""),
            (None, "about", ""),
            (Some("db"), "migrate", "Run migrations"),
        ] {
            registry
                .command_with(name, Signature::new(), |_: &Arguments| Ok::<_, anyhow::Error>(()), |cfg| {
                    let cfg = cfg.description(description);
                    match ns {
                        Some(ns) => cfg.namespace(ns),
                        None => cfg,
                    }
                })
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_command_list_layout() {
        let out = render_command_list(&registry(), &Theme::default(), false);
        let expected = [
            format!("  {:<25}no description", "about"),
            format!("  {:<25}Say hello", "greet"),
            String::new(),
            "  [db]".to_string(),
            format!("    {:<23}Run migrations", "migrate"),
            String::new(),
            "  [math]".to_string(),
            format!("    {:<23}Add two numbers", "add"),
            format!("    {:<23}no description", "div"),
        ]
        .join("\n")
            + "\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_usage_header() {
        let out = render_usage(&registry(), "manage", &Theme::default(), false);
        assert!(out.contains("manage [<namespace>.]<command> [<args>]"));
        assert!(out.contains("the command to run"));
        assert!(out.contains("\navailable commands:\n"));
    }

    #[test]
    fn test_usage_without_commands_has_no_listing() {
        let out = render_usage(&Registry::new(), "manage", &Theme::default(), false);
        assert!(!out.contains("available commands"));
    }

    #[test]
    fn test_namespace_header_styled() {
        let out = render_command_list(&registry(), &Theme::default(), true);
        assert!(out.contains("\u{1b}["));
        assert_eq!(
            console::strip_ansi_codes(&out),
            render_command_list(&registry(), &Theme::default(), false)
        );
    }

    #[test]
    fn test_global_parser_debug_assert() {
        global_parser("manage").debug_assert();
    }
}
