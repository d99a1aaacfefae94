use std::borrow::Cow;

use crate::{config::Settings, style::Styles, error::AppError};
use rustyline::{config::BellStyle, highlight::{CmdKind, Highlighter}, history::MemHistory, Completer, CompletionType, EditMode, Editor, Helper, Hinter, Validator};

const LOGO: &str = r"
    __    __    __  ___ _____       __ ____ ______ ______ __  __
   / /   / /   /  |/  // ___/ _    / //  _//_  __// ____// / / /
  / /   / /   / /|_/ / \__ \ | |/|/ / / /   / /  / /    / /_/ / 
 /____//____//_/  /_/ /____/ |__/__/ /___/  /_/   \____//_/ /_/";

const INSTRUCTIONS: &str = "For help use ?, to exit use Ctrl+C";

const HELP: &str = "Type a question and press Enter, the answer comes from the selected provider.
Every question is sent on its own, earlier questions are not remembered.
Commands:
  /providers         list providers
  /provider <name>   switch provider (openai, anthropic, huggingface, fireworks)
  /params            show generation parameters
  ?                  this help";

/// Terminal stuff.
pub struct Term {
    user_prompt: String,
    styles: Styles,
    dumb: bool,
    editor: Editor<RlineHelper, MemHistory>,
}

impl Term {
    /// New instance.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let styles = Styles::new(settings);

        let rline_config = rustyline::Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .bell_style(BellStyle::None)
            .check_cursor_position(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();

        let dumb = Ok("dumb") == std::env::var("TERM").as_deref();

        let user_prompt = if dumb {
            "USER> ".to_owned()
        } else {
            format!("{} USER {:#}{} {:#}", styles.user_prompt, styles.user_prompt, styles.user_prompt_arrow, styles.user_prompt_arrow)
        };

        let mut editor: Editor<RlineHelper, MemHistory> = Editor::with_config(rline_config)?;
        let h = RlineHelper {
            colored_prompt: String::new()
        };
        editor.set_helper(Some(h));

        Ok(Term {
            user_prompt,
            styles,
            dumb,
            editor,
        })
    }

    /// Get input from user.
    pub fn user_input(&mut self) -> Result<String, AppError> {
        if self.dumb {
            self.editor.readline(&self.user_prompt).map_err(|e| e.into())
        } else {
            let colored_prompt = format!("{}{}", &self.user_prompt, self.styles.user_text);
            if let Some(helper) = self.editor.helper_mut() {
                helper.colored_prompt = colored_prompt;
            }
            let ret = self.editor.readline(" USER > ");
            print!("{:#}", self.styles.user_text);
            ret.map_err(|e| e.into())
        }
    }

    /// Print as the assistant labelled `label`.
    pub fn assistant_print(&self, label: &str, s: &str) {
        if self.dumb {
            println!("{}> {}", label, s);
        } else {
            println!("{} {} {:#}{} {:#}{}{}{:#}",
                self.styles.assistant_prompt,
                label,
                self.styles.assistant_prompt,
                self.styles.assistant_prompt_arrow,
                self.styles.assistant_prompt_arrow,
                self.styles.assistant_text,
                s,
                self.styles.assistant_text
            );
        }
    }

    /// Print error message.
    pub fn print_error(&self, s: &str) {
        if self.dumb {
            println!("ERROR: {}", s);
        } else {
            println!("{}ERROR: {}{:#}", self.styles.error_text, s, self.styles.error_text);
        }
    }

    /// Print warning message.
    pub fn print_warning(&self, s: &str) {
        if self.dumb {
            println!("{}", s);
        } else {
            println!("{}{}{:#}", self.styles.warning_text, s, self.styles.warning_text);
        }
    }

    /// Print plain informational text.
    pub fn print_info(&self, s: &str) {
        if !self.dumb { print!("{}", self.styles.assistant_text); }
        print!("{}", s);
        if !self.dumb { println!("{:#}", self.styles.assistant_text); } else { println!(); }
    }

    /// Print logo and instructions.
    pub fn print_intro(&self, provider: &str) {
        let text = format!("{}\n (ver. {})\n\nProvider: {}\n{}", LOGO, env!("CARGO_PKG_VERSION"), provider, INSTRUCTIONS);
        self.print_info(&text);
    }

    /// Print help information.
    pub fn print_help(&self) {
        self.print_info(HELP);
    }
}


#[derive(Helper, Validator, Hinter, Completer)]
struct RlineHelper {
    colored_prompt: String,
}

impl Highlighter for RlineHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        let _ = pos;
        Cow::Borrowed(line)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Borrowed(&self.colored_prompt)
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        let _ = completion;
        Cow::Borrowed(candidate)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        let _ = (line, pos, kind);
        false
    }
}
