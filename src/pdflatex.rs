//! Registrar for the pdflatex typesetting front end.
//!
//! No discovery beyond a search-path probe: registration wires the
//! command template and the multipass action into the environment's
//! `PDF` builder, and the orchestrator's rerun helper takes it from
//! there (bibliographies and cross references need extra passes).

use crate::{Environment, Host, ToolAction, Value};

/// Builder the actions are registered under.
const BUILDER: &str = "PDF";

/// Source extensions handled by pdflatex.
const EXTENSIONS: [&str; 2] = [".ltx", ".latex"];

/// Upper bound on reruns while auxiliary files settle.
const DEFAULT_RETRIES: u32 = 3;

/// Register the pdflatex tool in `env`.
///
/// Idempotent: repeated calls leave exactly one action per extension
/// and reset the configuration entries to their defaults.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::{pdflatex, Environment};
///
/// let mut env = Environment::new();
/// pdflatex::register(&mut env);
///
/// assert_eq!(env.get_str("PDFLATEX"), Some("pdflatex"));
/// assert_eq!(
///     env.get_str("PDFLATEXCOM"),
///     Some("$PDFLATEX $PDFLATEXFLAGS $SOURCE")
/// );
/// ```
pub fn register(env: &mut Environment) {
    let builder = env.builder_mut(BUILDER);
    for extension in EXTENSIONS {
        builder.set_action(
            extension,
            ToolAction {
                command_var: "PDFLATEXCOM".to_string(),
                multipass: true,
            },
        );
    }

    env.set("PDFLATEX", "pdflatex");
    env.set("PDFLATEXFLAGS", Value::Flags(Vec::new()));
    env.set("PDFLATEXCOM", "$PDFLATEX $PDFLATEXFLAGS $SOURCE");
    env.set("LATEXRETRIES", DEFAULT_RETRIES);
}

/// True iff pdflatex is on the search path.
pub fn exists(host: &dyn Host) -> bool {
    host.find_executable("pdflatex").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    #[test]
    fn test_register_wires_builder_and_variables() {
        let mut env = Environment::new();
        register(&mut env);

        let builder = env.builder(BUILDER).unwrap();
        assert_eq!(builder.len(), 2);
        for extension in EXTENSIONS {
            let action = builder.action(extension).unwrap();
            assert_eq!(action.command_var, "PDFLATEXCOM");
            assert!(action.multipass);
        }

        assert_eq!(env.get_str("PDFLATEX"), Some("pdflatex"));
        assert_eq!(env.flags("PDFLATEXFLAGS"), Some(&[][..]));
        assert_eq!(
            env.get_str("PDFLATEXCOM"),
            Some("$PDFLATEX $PDFLATEXFLAGS $SOURCE")
        );
        assert_eq!(env.get_num_or("LATEXRETRIES", 0.0), 3.0);
    }

    #[test]
    fn test_register_twice_is_idempotent() {
        let mut env = Environment::new();
        register(&mut env);
        register(&mut env);

        let builder = env.builder(BUILDER).unwrap();
        assert_eq!(builder.len(), 2);
        assert_eq!(
            builder.extensions().collect::<Vec<_>>(),
            vec![".latex", ".ltx"]
        );
    }

    #[test]
    fn test_register_preserves_unrelated_builders() {
        let mut env = Environment::new();
        env.builder_mut("DVI").set_action(
            ".tex",
            ToolAction {
                command_var: "LATEXCOM".to_string(),
                multipass: true,
            },
        );
        register(&mut env);
        assert!(env.builder("DVI").is_some());
        assert!(env.builder(BUILDER).is_some());
    }

    #[test]
    fn test_exists_probes_search_path() {
        let host = MockHost::new().with_executable("pdflatex", "/usr/bin/pdflatex");
        assert!(exists(&host));
        assert!(!exists(&MockHost::new()));
    }
}
