//! App initialization functions.

use anstyle::Style;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use std::ffi::OsString;
use std::str::FromStr;
use crate::error::AppError;
use crate::toml_parser::parse_toml_config;
use dirs::home_dir;
use crate::util::parse_colors;

/// App options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Model provider.
    pub provider: Option<String>,
    /// Level of randomization when choosing tokens.
    pub temperature: Option<f64>,
    /// Maximum number of tokens that will be generated.
    pub max_tokens: Option<i64>,
    /// Only k tokens with the most probability will be considered.
    pub top_k: Option<i64>,
    /// Only the tokens comprising the top_p probability mass will be considered.
    pub top_p: Option<f64>,
    /// Prompt template name.
    pub template: Option<String>,
    /// Question to ask once.
    pub message: Option<String>,
    /// Ask every provider.
    pub all: bool,
    /// Print answers as JSON.
    pub json: bool,
    /// Require every credential before the first request.
    pub fail_fast: bool,
    /// Request timeout, seconds.
    pub timeout: Option<u64>,
    /// Debug logging.
    pub verbose: bool,
    /// User message color and prompt background.
    pub user_color: (Option<[u8;3]>, Option<[u8;3]>),
    /// Assistant message color and prompt background.
    pub assistant_color: (Option<[u8;3]>, Option<[u8;3]>),
}


macro_rules! check_and_set_float_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(val) = f64::from_str(x) {
                $option.replace(val);
            } else {
                return Err(AppError::InvalidArgError(concat!($arg, " must be floating point number")));
            }
        }
    }
}

macro_rules! check_and_set_int_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(val) = x.parse() {
                $option.replace(val);
            } else {
                return Err(AppError::InvalidArgError(concat!($arg, " must be integer")));
            }
        }
    }
}

macro_rules! check_and_set_color_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(colors) = parse_colors(&x) {
                $option = colors;
            } else {
                return Err(AppError::InvalidArgError(
                    concat!($arg, " must have valid format, e.g. 'fg(255,0,123);bg(0,123,255)'.")
                ));
            }
        }
    }
}

impl Options {

    /// Create new unfilled options.
    pub fn new() -> Self {
        Options::default()
    }

    fn argument_parser<T>(args: impl IntoIterator<Item = T>) -> ArgMatches where T: Into<OsString> + Clone {
        let bold_underline = Style::new().underline().bold();
        let bold = Style::new().bold();

        Command::new("llmswitch")
            .about("Ask a question to OpenAI, Anthropic, Hugging Face or Fireworks models through one interface.")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("provider")
                .long("provider")
                .help("Model provider, one of: openai, anthropic, huggingface, fireworks")
                .short('p')
                .env("LLMSWITCH_PROVIDER")
                .required(false)
            ).arg(
                Arg::new("config")
                .long("config")
                .help("Config file path")
                .short('c')
                .env("LLMSWITCH_CONFIG")
                .required(false)
            ).arg(
                Arg::new("message")
                .long("message")
                .help("Question to ask once, then exit")
                .short('e')
                .env("LLMSWITCH_MESSAGE")
                .required(false)
            ).arg(
                Arg::new("template")
                .long("template")
                .help("Prompt template, one of: instruction, qa")
                .short('t')
                .env("LLMSWITCH_TEMPLATE")
                .required(false)
            ).arg(
                Arg::new("max-tokens")
                .long("max-tokens")
                .help("Maximum number of tokens that will be generated")
                .env("LLMSWITCH_MAX_TOKENS")
                .required(false)
            ).arg(
                Arg::new("temperature")
                .long("temperature")
                .help("Level of randomization when LLM choose tokens, 0.0 to 1.0")
                .env("LLMSWITCH_TEMPERATURE")
                .required(false)
            ).arg(
                Arg::new("top-p")
                .long("top-p")
                .help("Only the tokens comprising the top_p probability mass will be considered (anthropic, huggingface)")
                .env("LLMSWITCH_TOP_P")
                .required(false)
            ).arg(
                Arg::new("top-k")
                .long("top-k")
                .help("Only k tokens with the most probability will be considered (anthropic, huggingface)")
                .env("LLMSWITCH_TOP_K")
                .required(false)
            ).arg(
                Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .env("LLMSWITCH_TIMEOUT")
                .required(false)
            ).arg(
                Arg::new("all")
                .long("all")
                .help("Ask every provider and print all responses")
                .short('a')
                .action(ArgAction::SetTrue)
                .env("LLMSWITCH_ALL")
            ).arg(
                Arg::new("json")
                .long("json")
                .help("Print responses as JSON (with --message)")
                .action(ArgAction::SetTrue)
                .env("LLMSWITCH_JSON")
            ).arg(
                Arg::new("fail-fast")
                .long("fail-fast")
                .help("Exit at startup unless API keys of all providers are set")
                .action(ArgAction::SetTrue)
                .env("LLMSWITCH_FAIL_FAST")
            ).arg(
                Arg::new("verbose")
                .long("verbose")
                .help("Debug logging")
                .short('v')
                .action(ArgAction::SetTrue)
            ).arg(
                Arg::new("assistant-color")
                .long("assistant-color")
                .help("Assistant messages and prompt background colors, rgb (e.g. 'fg(255,0,123);bg(0,123,255)').")
                .env("LLMSWITCH_ASSISTANT_COLOR")
                .required(false)
            ).arg(
                Arg::new("user-color")
                .long("user-color")
                .help("User messages and prompt background colors, rgb (e.g. 'fg(255,0,123);bg(0,123,255)').")
                .env("LLMSWITCH_USER_COLOR")
                .required(false)
            )
            .after_help(format!("{bold_underline}Example:{bold_underline:#} {bold}

    llmswitch --provider=anthropic --temperature=0.5 --message='What is an LLM?'{bold:#}

API keys are read from OPENAI_API_KEY, ANTHROPIC_API_KEY, HUGGINGFACE_API_KEY and FIREWORKS_API_KEY.
Llmswitch uses the configuration file .llmswitch.toml from user's home directory, or the one specified with -c option.
The configuration options can be overridden with the command line arguments or environment variables."))
            .get_matches_from(args)
    }

    fn load_config_file(path: Option<&str>) -> Result<Option<String>, std::io::Error> {
        Ok(if let Some(p) = path {
            Some(std::fs::read_to_string(p)?)
        } else if let Some(mut p) = home_dir() {
            p.push(".llmswitch.toml");
            if std::fs::exists(p.as_path())? {
                Some(std::fs::read_to_string(p.as_path())?)
            } else {
                None
            }
        } else {
            None
        })
    }

    fn validate_options(options: &Options) -> Result<(), AppError> {
        if options.json && options.message.is_none() {
            return Err(AppError::InvalidArgError("--json requires --message."));
        }
        if let Some(0) = options.timeout {
            return Err(AppError::InvalidArgError("timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Load and validate options from env, command line arguments, config file.
    pub fn load<T>(args: impl IntoIterator<Item = T>) -> Result<Self, AppError>
        where T: Into<OsString> + Clone
    {
        let m = Self::argument_parser(args);

        let mut options = Options::new();

        let config_path = m.get_one("config").map(|s: &String| s.as_ref());

        if let Some(content) = Self::load_config_file(config_path)
            .map_err(|err| AppError::Error(format!("Error loading config file: {}", err)))?
        {
            parse_toml_config(&content, &mut options)?;
        }

        if let Some(x) = m.get_one::<String>("provider") {
            options.provider.replace(x.clone());
        }
        if let Some(x) = m.get_one::<String>("template") {
            options.template.replace(x.clone());
        }

        check_and_set_float_arg!("temperature", m, options.temperature);
        check_and_set_float_arg!("top-p", m, options.top_p);
        check_and_set_int_arg!("max-tokens", m, options.max_tokens);
        check_and_set_int_arg!("top-k", m, options.top_k);
        check_and_set_int_arg!("timeout", m, options.timeout);

        options.all |= m.get_flag("all");
        options.json |= m.get_flag("json");
        options.fail_fast |= m.get_flag("fail-fast");
        options.verbose |= m.get_flag("verbose");

        check_and_set_color_arg!("assistant-color", m, options.assistant_color);
        check_and_set_color_arg!("user-color", m, options.user_color);

        if let Some(x) = m.get_one::<String>("message") {
            options.message.replace(x.clone());
        }

        Self::validate_options(&options)?;

        Ok(options)
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn config_file(name: &str, content: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("llmswitch-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, content).expect("write config file");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_options() {
        let path = config_file("empty", "");

        let args = vec![
            OsString::from("/bin/path"),
            OsString::from(format!("--config={path}")),
            OsString::from("--provider=anthropic"),
            OsString::from("--message=<message>"),
            OsString::from("--template=qa"),
            OsString::from("--max-tokens=250"),
            OsString::from("--temperature=0.456"),
            OsString::from("--top-p=0.123"),
            OsString::from("--top-k=40"),
            OsString::from("--timeout=30"),
            OsString::from("--all"),
            OsString::from("--json"),
            OsString::from("--fail-fast"),
            OsString::from("-v"),
            OsString::from("--assistant-color=fg(255,0,124);bg(0,124,255)"),
            OsString::from("--user-color='fg(255,0,125);bg(0,125,255)'"),
        ];

        let options = Options::load(args.clone()).expect("load options");

        assert_eq!(options.provider, Some("anthropic".into()));
        assert_eq!(options.message, Some("<message>".into()));
        assert_eq!(options.template, Some("qa".into()));
        assert_eq!(options.max_tokens, Some(250));
        assert_eq!(options.temperature, Some(0.456));
        assert_eq!(options.top_p, Some(0.123));
        assert_eq!(options.top_k, Some(40));
        assert_eq!(options.timeout, Some(30));
        assert!(options.all);
        assert!(options.json);
        assert!(options.fail_fast);
        assert!(options.verbose);
        assert_eq!(options.assistant_color, (Some([255,0,124]), Some([0,124,255])));
        assert_eq!(options.user_color, (Some([255,0,125]), Some([0,125,255])));

        let mut args2 = args.clone();
        args2[6] = "--temperature=warm".into();
        assert!(matches!(Options::load(args2), Err(AppError::InvalidArgError(_))));

        let mut args2 = args.clone();
        args2[8] = "--top-k=1.5".into();
        assert!(matches!(Options::load(args2), Err(AppError::InvalidArgError(_))));

        let mut args2 = args.clone();
        args2.remove(3);
        assert!(matches!(Options::load(args2), Err(AppError::InvalidArgError(_))));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_command_line_overrides_file() {
        let path = config_file("override", "
provider = \"huggingface\"
template = \"instruction\"

[parameters]
temperature = 0.2
top_k = 20
");

        let args = vec![
            OsString::from("/bin/path"),
            OsString::from(format!("--config={path}")),
            OsString::from("--provider=fireworks"),
            OsString::from("--top-k=44"),
        ];

        let options = Options::load(args).expect("load options");

        assert_eq!(options.provider, Some("fireworks".into()));
        assert_eq!(options.template, Some("instruction".into()));
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.top_k, Some(44));
        assert_eq!(options.message, None);
        assert!(!options.all);

        let _ = std::fs::remove_file(path);
    }
}
