use crate::interpreter::DEFAULT_PROMPT;
use argh::FromArgs;

#[derive(FromArgs, Debug, PartialEq)]
/// A small interactive command interpreter with the builtins cd, help and exit.
pub struct Config {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text printed before every command line
    pub prompt: String,

    #[argh(switch, short = 'v')]
    /// log dispatch decisions and child exit statuses to standard error
    pub verbose: bool,

    #[argh(switch)]
    /// keep prompting after end of input instead of exiting
    pub eof_loops: bool,
}

impl Config {
    /// Log filter to use when `ASH_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "off" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&["ash"], &[]).unwrap();
        assert_eq!(config.prompt, "=> ");
        assert!(!config.verbose);
        assert!(!config.eof_loops);
        assert_eq!(config.default_log_filter(), "off");
    }

    #[test]
    fn test_flags() {
        let config =
            Config::from_args(&["ash"], &["--prompt", "$ ", "-v", "--eof-loops"]).unwrap();
        assert_eq!(config.prompt, "$ ");
        assert!(config.verbose);
        assert!(config.eof_loops);
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Config::from_args(&["ash"], &["script.sh"]).is_err());
    }
}
