use llmswitch_lib::llm::create_client;
use std::time::Duration;
use llmswitch_lib::request::{get_reqwest_client_with_timeout, Client};
use llmswitch_lib::{Comparison, CredentialPolicy, CredentialSet, Error, Pipeline, ProviderIdentity};
use rustyline::error::ReadlineError;
use serde_json::json;
use tracing::{debug, info, warn};
use crate::config::Config;
use crate::error::AppError;
use crate::term::Term;

/// A line typed in the interactive mode.
#[derive(Debug, PartialEq)]
pub enum Input {
    /// Nothing but whitespace.
    Empty,
    /// `?`
    Help,
    /// `/providers`
    Providers,
    /// `/params`
    Params,
    /// `/provider <name>`
    SwitchProvider(String),
    /// Unknown `/command`.
    Unknown(String),
    /// Anything else.
    Question(String),
}

impl From<&str> for Input {
    fn from(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        if line == "?" {
            return Input::Help;
        }
        if let Some(command) = line.strip_prefix('/') {
            let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
            return match (name, arg.trim()) {
                ("providers", _) => Input::Providers,
                ("params", _) => Input::Params,
                ("provider", arg) => Input::SwitchProvider(arg.to_owned()),
                _ => Input::Unknown(name.to_owned()),
            };
        }
        Input::Question(line.to_owned())
    }
}

/// Application.
pub struct App {
    config: Config,
    credentials: CredentialSet,
    pipeline: Pipeline,
    provider: ProviderIdentity,
    make_transport: fn(Duration) -> Result<Box<dyn Client>, Error>,
}

impl App {

    /// Create new app. Fails at once when the policy requires every credential.
    pub fn new(config: Config, credentials: CredentialSet) -> Result<Self, AppError> {
        for provider in ProviderIdentity::ALL {
            debug!(%provider, key = %credentials.masked(provider), "{} API key", provider);
        }

        if config.policy == CredentialPolicy::FailFast {
            credentials.require_all()?;
        }

        for name in config.params.outside_ui_ranges() {
            warn!(parameter = name, "value is outside the usual range");
        }

        Ok(App {
            pipeline: Pipeline::new(config.template),
            provider: config.provider,
            config,
            credentials,
            make_transport: get_reqwest_client_with_timeout,
        })
    }

    /// Run app.
    pub fn run(&mut self) -> Result<(), AppError> {
        match self.config.message.clone() {
            Some(question) if self.config.compare_all => self.compare_once(&question),
            Some(question) => self.ask_once(&question),
            None => self.interactive(),
        }
    }

    fn ask(&self, question: &str) -> Result<String, Error> {
        self.credentials.get(self.provider)?;
        let transport = (self.make_transport)(self.config.timeout)
            .map_err(|err| err.into_invocation(self.provider))?;
        let client = create_client(self.provider, &self.config.params, &self.credentials, transport)?;
        self.pipeline.ask(client, question)
    }

    fn compare(&self, question: &str) -> Result<Comparison, Error> {
        let timeout = self.config.timeout;
        let make_transport = self.make_transport;
        self.pipeline.ask_all(
            &self.config.params,
            &self.credentials,
            self.config.policy,
            |_| make_transport(timeout),
            question,
        )
    }

    fn ask_once(&self, question: &str) -> Result<(), AppError> {
        let answer = self.ask(question)?;

        if self.config.json {
            let out = json!({
                "provider": self.provider,
                "model": self.provider.model(),
                "answer": answer,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("Response from {}:\n{}", self.provider, answer);
        }
        Ok(())
    }

    fn compare_once(&self, question: &str) -> Result<(), AppError> {
        let comparison = self.compare(question)?;

        if self.config.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            for (provider, result) in comparison.iter() {
                match result {
                    Ok(answer) => println!("\n{} response:\n{}", provider, answer),
                    Err(err) => println!("\n{} error:\n{}", provider, err),
                }
            }
        }

        if comparison.successes().next().is_none() {
            return Err(AppError::Error("every provider failed".to_owned()));
        }
        Ok(())
    }

    fn interactive(&mut self) -> Result<(), AppError> {
        let mut term = Term::new(&self.config.settings)?;

        let selected = if self.config.compare_all { "all".to_owned() } else { self.provider.profile().caption.to_owned() };
        term.print_intro(&selected);

        loop {
            let line = match term.user_input() {
                Ok(line) => line,
                Err(AppError::Rustyline(ReadlineError::Interrupted | ReadlineError::Eof)) => break,
                Err(err) => return Err(err),
            };

            match Input::from(line.as_str()) {
                Input::Empty => term.print_warning("Please enter a question."),
                Input::Help => term.print_help(),
                Input::Providers => {
                    let list: Vec<String> = ProviderIdentity::ALL.iter()
                        .map(|p| {
                            let marker = if *p == self.provider { "*" } else { " " };
                            format!("{} {:<12} {:<40} {}", marker, p.name(), p.profile().caption, self.credentials.masked(*p))
                        })
                        .collect();
                    term.print_info(&list.join("\n"));
                },
                Input::Params => {
                    let mapped = self.config.params.for_provider(self.provider);
                    term.print_info(&format!("{} template, {:?}", self.pipeline.template(), mapped));
                },
                Input::SwitchProvider(name) => match ProviderIdentity::try_from(name.as_str()) {
                    Ok(provider) => {
                        info!(%provider, "provider selected");
                        self.provider = provider;
                        term.print_info(&format!("Provider: {}", provider.profile().caption));
                    },
                    Err(err) => term.print_error(&err.to_string()),
                },
                Input::Unknown(name) => term.print_error(&format!("unknown command /{name}, use ? for help")),
                Input::Question(question) => {
                    if self.config.compare_all {
                        match self.compare(&question) {
                            Ok(comparison) => {
                                for (provider, result) in comparison.iter() {
                                    match result {
                                        Ok(answer) => term.assistant_print(&provider.to_string(), answer),
                                        Err(err) => term.print_error(&err.to_string()),
                                    }
                                }
                            },
                            Err(err) => term.print_error(&err.to_string()),
                        }
                    } else {
                        match self.ask(&question) {
                            Ok(answer) => term.assistant_print(&format!("Response from {}", self.provider), &answer),
                            Err(err) => term.print_error(&err.to_string()),
                        }
                    }
                },
            }
        }

        Ok(())
    }
}
