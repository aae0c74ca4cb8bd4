use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// One call of the reconstruction tool: a subcommand plus its arguments.
///
/// The program itself is not part of the invocation; the [`CommandRunner`]
/// decides which executable receives it.
///
/// [`CommandRunner`]: crate::reconstruction::domain::command_runner::CommandRunner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    subcommand: &'static str,
    args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(subcommand: &'static str) -> Self {
        Self {
            subcommand,
            args: Vec::new(),
        }
    }

    /// Appends `--name value`.
    pub fn option(mut self, name: &str, value: impl AsRef<OsStr>) -> Self {
        self.args.push(OsString::from(format!("--{name}")));
        self.args.push(value.as_ref().to_os_string());
        self
    }

    pub fn path_option(self, name: &str, path: &Path) -> Self {
        self.option(name, path.as_os_str())
    }

    pub fn subcommand(&self) -> &'static str {
        self.subcommand
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Value following `--name`, if present.
    pub fn value_of(&self, name: &str) -> Option<&OsStr> {
        let flag = format!("--{name}");
        self.args
            .windows(2)
            .find(|pair| pair[0] == OsStr::new(&flag))
            .map(|pair| pair[1].as_os_str())
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_keep_order() {
        let inv = ToolInvocation::new("mapper")
            .path_option("database_path", Path::new("out/database.db"))
            .option("output_type", "PLY");

        assert_eq!(inv.subcommand(), "mapper");
        assert_eq!(
            inv.args(),
            &[
                OsString::from("--database_path"),
                OsString::from("out/database.db"),
                OsString::from("--output_type"),
                OsString::from("PLY"),
            ]
        );
    }

    #[test]
    fn test_value_of() {
        let inv = ToolInvocation::new("mapper").option("image_path", "frames");
        assert_eq!(inv.value_of("image_path"), Some(OsStr::new("frames")));
        assert_eq!(inv.value_of("database_path"), None);
    }

    #[test]
    fn test_display_renders_command_line() {
        let inv = ToolInvocation::new("exhaustive_matcher").option("database_path", "db");
        assert_eq!(inv.to_string(), "exhaustive_matcher --database_path db");
    }
}
