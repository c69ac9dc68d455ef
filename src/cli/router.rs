use std::ffi::OsString;

/// Known subcommands that should NOT trigger new insertion.
/// These match the Commands enum variants in kebab-case.
const KNOWN_SUBCOMMANDS: &[&str] = &["new", "list", "info", "config", "version", "update"];

/// Route CLI arguments to the appropriate command.
///
/// Inserts "new" as the default subcommand when the user omits it, so
/// `init-agent web-app my-app` works as an alias for
/// `init-agent new web-app my-app`.
///
/// # Routing Logic
///
/// The router inspects only `args[1]` (the first argument after the
/// program name):
///
/// - No arguments at all: unchanged (clap prints the main help)
/// - If `args[1]` is `--help`, `-h`, `--version`, or `-V`: unchanged
/// - If `args[1]` is a known subcommand: unchanged
/// - Anything else (template name or flag): insert "new" after the
///   program name
pub fn route_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Bare invocation shows help rather than defaulting to a command
    if args.len() < 2 {
        return args;
    }

    let first_arg = args[1].to_string_lossy();

    // Preserve main --help and --version
    if first_arg == "--help" || first_arg == "-h" || first_arg == "--version" || first_arg == "-V" {
        return args;
    }

    if KNOWN_SUBCOMMANDS.contains(&first_arg.as_ref()) {
        return args;
    }

    let mut routed = Vec::with_capacity(args.len() + 1);
    routed.push(args[0].clone());
    routed.push("new".into());
    routed.extend_from_slice(&args[1..]);
    routed
}
