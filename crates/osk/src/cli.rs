#![forbid(unsafe_code)]

//! Command-line argument parsing for the on-screen keyboard.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `OSK_*` prefix; flags win over the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use osk_core::{Config, InputMode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
osk: on-screen keyboard for handheld consoles

USAGE:
    osk [--help | --version | -dDv<num>s]

OPTIONS:
    -d              Use the D-pad only
    -D              Use both the D-pad and the analog stick
    -v<num>         Number of virtual terminals, 1 to 6 (default: 4)
    -s              Silent: only warnings and errors are logged
    --help, -h      Show this help message
    --version, -V   Show version

    Short flags may be combined, e.g. -Dv3s.

CONTROLS:
    R trigger       Plain keyboard
    L trigger       Numeric keyboard
    L + R           Shifted keyboard
    Mouse key       Mouse mode
    Volume +/-      Next/previous virtual terminal
    Screen key      Save a screenshot
    Home+O+X        Power off

ENVIRONMENT VARIABLES:
    OSK_INPUT_MODE      Input mode (dpad|analog|both)
    OSK_CONSOLES        Number of virtual terminals
    OSK_SILENT          Silent mode (1|true)
    OSK_LOG             Log filter, used when RUST_LOG is unset
    OSK_ASSET_DIR       Keyboard image directory (default: /usr/share/osk)
    OSK_SCREENSHOT_DIR  Screenshot directory (default: /usr/screenshots)
    OSK_FB_DEVICE       Framebuffer device (default: /dev/fb0)
    OSK_JOYPAD_DEVICE   Joypad device (default: /dev/joypad)
    OSK_VCS_DEVICE      Virtual console device (default: /dev/vcs)
    OSK_POWEROFF        Power-off command (default: /sbin/poweroff)";

pub const DEFAULT_ASSET_DIR: &str = "/usr/share/osk";

/// An argument the parser could not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A short flag character that means nothing.
    UnknownFlag(char),
    /// `-v` with no digits after it.
    MissingConsoleCount,
    /// A word that is not a flag.
    UnexpectedArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(c) => write!(f, "unknown flag: -{c}"),
            Self::MissingConsoleCount => write!(f, "-v needs a number of terminals"),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub config: Config,
    pub asset_dir: PathBuf,
    pub screenshot_dir: PathBuf,
    pub fb_device: PathBuf,
    pub joypad_device: PathBuf,
    pub vcs_device: PathBuf,
    pub poweroff: PathBuf,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            config: Config::default(),
            asset_dir: DEFAULT_ASSET_DIR.into(),
            screenshot_dir: osk_linux::DEFAULT_SCREENSHOT_DIR.into(),
            fb_device: osk_linux::DEFAULT_FB_DEVICE.into(),
            joypad_device: osk_linux::DEFAULT_JOYPAD_DEVICE.into(),
            vcs_device: osk_linux::DEFAULT_VCS_DEVICE.into(),
            poweroff: osk_linux::DEFAULT_POWEROFF.into(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

fn parse_input_mode(value: &str) -> Option<InputMode> {
    match value.to_ascii_lowercase().as_str() {
        "dpad" => Some(InputMode::DPAD),
        "analog" => Some(InputMode::ANALOG),
        "both" => Some(InputMode::DPAD | InputMode::ANALOG),
        _ => None,
    }
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits 0 when asked; exits 1 on a bad
    /// argument.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |name| env::var(name).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("osk {VERSION}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{e}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) over variables from `env`.
    ///
    /// Environment values that do not parse are ignored, as is a console
    /// count outside the accepted range.
    pub fn parse_from<I, S, E>(args: I, env: E) -> Result<Invocation, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        opts.apply_env(&env);

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Ok(Invocation::Help),
                "--version" | "-V" => return Ok(Invocation::Version),
                other => match other.strip_prefix('-') {
                    Some(flags) if !flags.is_empty() && !flags.starts_with('-') => {
                        opts.apply_flags(flags)?;
                    }
                    _ => return Err(CliError::UnexpectedArgument(other.to_string())),
                },
            }
        }

        Ok(Invocation::Run(opts))
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if let Some(val) = env("OSK_INPUT_MODE")
            && let Some(mode) = parse_input_mode(&val)
        {
            self.config.input = mode;
        }
        if let Some(val) = env("OSK_CONSOLES")
            && let Ok(n) = val.trim().parse::<u8>()
        {
            self.config.set_consoles(n);
        }
        if let Some(val) = env("OSK_SILENT") {
            self.config.silent = matches!(val.trim(), "1" | "true");
        }
        let paths = [
            ("OSK_ASSET_DIR", &mut self.asset_dir),
            ("OSK_SCREENSHOT_DIR", &mut self.screenshot_dir),
            ("OSK_FB_DEVICE", &mut self.fb_device),
            ("OSK_JOYPAD_DEVICE", &mut self.joypad_device),
            ("OSK_VCS_DEVICE", &mut self.vcs_device),
            ("OSK_POWEROFF", &mut self.poweroff),
        ];
        for (name, slot) in paths {
            if let Some(val) = env(name)
                && !val.is_empty()
            {
                *slot = val.into();
            }
        }
    }

    /// Apply one word of combined short flags, without its leading dash.
    fn apply_flags(&mut self, flags: &str) -> Result<(), CliError> {
        let mut chars = flags.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                'd' => self.config.input = InputMode::DPAD,
                'D' => self.config.input = InputMode::DPAD | InputMode::ANALOG,
                's' => self.config.silent = true,
                'v' => {
                    let mut digits = String::new();
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        digits.push(d);
                    }
                    if digits.is_empty() {
                        return Err(CliError::MissingConsoleCount);
                    }
                    if let Ok(n) = digits.parse::<u8>() {
                        self.config.set_consoles(n);
                    }
                }
                other => return Err(CliError::UnknownFlag(other)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(args: &[&str]) -> Opts {
        match Opts::parse_from(args, no_env).unwrap() {
            Invocation::Run(opts) => opts,
            other => panic!("expected a run, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let opts = run(&[]);
        assert_eq!(opts.config.input, InputMode::ANALOG);
        assert_eq!(opts.config.consoles(), 4);
        assert!(!opts.config.silent);
        assert_eq!(opts.fb_device, PathBuf::from("/dev/fb0"));
        assert_eq!(opts.asset_dir, PathBuf::from(DEFAULT_ASSET_DIR));
    }

    #[test]
    fn combined_flags() {
        let opts = run(&["-Dv3s"]);
        assert_eq!(opts.config.input, InputMode::DPAD | InputMode::ANALOG);
        assert_eq!(opts.config.consoles(), 3);
        assert!(opts.config.silent);
    }

    #[test]
    fn separate_flags_apply_in_order() {
        let opts = run(&["-D", "-d", "-v2"]);
        assert_eq!(opts.config.input, InputMode::DPAD);
        assert_eq!(opts.config.consoles(), 2);
    }

    #[test]
    fn out_of_range_console_count_is_ignored() {
        assert_eq!(run(&["-v9"]).config.consoles(), 4);
        assert_eq!(run(&["-v0"]).config.consoles(), 4);
        assert_eq!(run(&["-v6"]).config.consoles(), 6);
        assert_eq!(run(&["-v1s"]).config.consoles(), 1);
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            Opts::parse_from(["-x"], no_env),
            Err(CliError::UnknownFlag('x'))
        );
        assert_eq!(
            Opts::parse_from(["-vs"], no_env),
            Err(CliError::MissingConsoleCount)
        );
        assert_eq!(
            Opts::parse_from(["keyboard"], no_env),
            Err(CliError::UnexpectedArgument("keyboard".into()))
        );
        assert_eq!(
            Opts::parse_from(["--verbose"], no_env),
            Err(CliError::UnexpectedArgument("--verbose".into()))
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(
            Opts::parse_from(["-d", "--help", "-x"], no_env),
            Ok(Invocation::Help)
        );
        assert_eq!(Opts::parse_from(["-V"], no_env), Ok(Invocation::Version));
    }

    #[test]
    fn environment_is_overridden_by_flags() {
        let vars: HashMap<&str, &str> = [
            ("OSK_INPUT_MODE", "both"),
            ("OSK_CONSOLES", "5"),
            ("OSK_SILENT", "true"),
            ("OSK_FB_DEVICE", "/dev/fb1"),
            ("OSK_POWEROFF", "/bin/halt"),
        ]
        .into_iter()
        .collect();
        let env = |name: &str| vars.get(name).map(|v| v.to_string());

        let Ok(Invocation::Run(opts)) = Opts::parse_from(["-v2"], env) else {
            panic!("expected a run");
        };
        assert_eq!(opts.config.input, InputMode::DPAD | InputMode::ANALOG);
        assert_eq!(opts.config.consoles(), 2);
        assert!(opts.config.silent);
        assert_eq!(opts.fb_device, PathBuf::from("/dev/fb1"));
        assert_eq!(opts.poweroff, PathBuf::from("/bin/halt"));
    }

    #[test]
    fn unparsable_environment_is_ignored() {
        let env = |name: &str| match name {
            "OSK_INPUT_MODE" => Some("joystick".to_string()),
            "OSK_CONSOLES" => Some("12".to_string()),
            _ => None,
        };
        let Ok(Invocation::Run(opts)) = Opts::parse_from(Vec::<String>::new(), env) else {
            panic!("expected a run");
        };
        assert_eq!(opts.config, Config::default());
    }

    #[test]
    fn help_text_lists_every_environment_variable() {
        for name in [
            "OSK_INPUT_MODE",
            "OSK_CONSOLES",
            "OSK_SILENT",
            "OSK_LOG",
            "OSK_ASSET_DIR",
            "OSK_SCREENSHOT_DIR",
            "OSK_FB_DEVICE",
            "OSK_JOYPAD_DEVICE",
            "OSK_VCS_DEVICE",
            "OSK_POWEROFF",
        ] {
            assert!(HELP_TEXT.contains(name), "{name} missing from help");
        }
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
