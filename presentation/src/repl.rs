//! REPL (Read-Eval-Print Loop) for the interactive session driver

use crate::SessionPresenter;
use opdeck_application::{
    AgentLoop, RunTurnUseCase, SecretStore, TranscriptLogger, TurnSettings,
};
use opdeck_domain::{Message, Provider};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// One parsed line of REPL input.
///
/// Commands are `:`-prefixed and matched case-insensitively after trimming;
/// everything else non-empty is a prompt for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Configure,
    Settings,
    Clear,
    Quit,
    /// Unrecognized `:` command, carrying the lowercased command text.
    Unknown(String),
    /// Free-form input to send through the engine.
    Prompt(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }
        let Some(rest) = trimmed.strip_prefix(':') else {
            return ReplCommand::Prompt(trimmed.to_string());
        };
        match rest.to_lowercase().as_str() {
            "help" => ReplCommand::Help,
            "config" => ReplCommand::Configure,
            "settings" => ReplCommand::Settings,
            "clear" => ReplCommand::Clear,
            "quit" | "exit" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Whether the REPL keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive session REPL.
///
/// Owns the conversation history and the mutable session settings; each
/// non-command input runs one turn through the engine, with a
/// [`SessionPresenter`] rendering progress callbacks.
pub struct SessionRepl<L: AgentLoop> {
    use_case: RunTurnUseCase<L>,
    logger: Arc<dyn TranscriptLogger>,
    secrets: Arc<dyn SecretStore>,
    settings: TurnSettings,
    messages: Vec<Message>,
    history_file: PathBuf,
    transcript_path: PathBuf,
    quiet: bool,
}

impl<L: AgentLoop> SessionRepl<L> {
    pub fn new(
        engine: Arc<L>,
        logger: Arc<dyn TranscriptLogger>,
        secrets: Arc<dyn SecretStore>,
        settings: TurnSettings,
        history_file: PathBuf,
        transcript_path: PathBuf,
    ) -> Self {
        Self {
            use_case: RunTurnUseCase::new(engine, logger.clone()),
            logger,
            secrets,
            settings,
            messages: Vec::new(),
            history_file,
            transcript_path,
            quiet: false,
        }
    }

    /// Suppress the welcome banner.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive loop until `:quit` or end of input.
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(parent) = self.history_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.load_history(&self.history_file);

        if !self.quiet {
            self.print_welcome();
        }

        loop {
            // The blank line stays out of the prompt string so rustyline
            // can redraw the prompt as a single line
            println!();
            match rl.readline("Enter your request (or command): ") {
                Ok(line) => match ReplCommand::parse(&line) {
                    ReplCommand::Empty => continue,
                    ReplCommand::Configure => self.configure(&mut rl),
                    ReplCommand::Prompt(text) => {
                        let _ = rl.add_history_entry(&text);
                        self.process_input(&text).await;
                    }
                    command => {
                        if self.apply_command(command) == CommandOutcome::Exit {
                            break;
                        }
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("\nUse :quit to exit");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        let _ = rl.save_history(&self.history_file);
        Ok(())
    }

    /// Apply one non-interactive command to the session state.
    fn apply_command(&mut self, command: ReplCommand) -> CommandOutcome {
        match command {
            ReplCommand::Quit => return CommandOutcome::Exit,
            ReplCommand::Help => self.print_help(),
            ReplCommand::Settings => self.show_settings(),
            ReplCommand::Clear => {
                self.messages.clear();
                println!("Conversation history cleared");
            }
            ReplCommand::Unknown(command) => println!("Unknown command: {command}"),
            // Dispatched by the run loop
            ReplCommand::Configure | ReplCommand::Prompt(_) | ReplCommand::Empty => {}
        }
        CommandOutcome::Continue
    }

    async fn process_input(&mut self, text: &str) {
        let presenter = SessionPresenter::new(self.logger.clone(), self.settings.hide_images);
        if let Err(e) = self
            .use_case
            .execute(text, &mut self.messages, &self.settings, &presenter)
            .await
        {
            println!("\nError: {e}");
        }
    }

    fn print_welcome(&self) {
        println!("opdeck - Computer Use Session Driver");
        println!("Type ':help' for available commands");
    }

    fn print_help(&self) {
        println!("\nAvailable commands:");
        println!(":help    - Show this help message");
        println!(":config  - Configure settings");
        println!(":settings - Show current settings");
        println!(":clear   - Clear conversation history");
        println!(":quit    - Exit the program");
    }

    fn show_settings(&self) {
        println!("\nCurrent Settings:");
        println!("API Provider: {}", self.settings.provider);
        println!("Model: {}", self.settings.model);
        println!(
            "Only N Most Recent Images: {}",
            self.settings.max_recent_images
        );
        println!("Hide Images: {}", self.settings.hide_images);
        if !self.settings.system_prompt_suffix.is_empty() {
            println!(
                "Custom System Prompt: {}",
                self.settings.system_prompt_suffix
            );
        }
        println!("History Length: {} messages", self.messages.len());
        println!("Transcript: {}", self.transcript_path.display());
    }

    /// Interactive `:config` flow, one prompt per setting.
    ///
    /// Enter keeps the current value everywhere. Provider and model changes
    /// stay in memory; the API key and system prompt are also persisted via
    /// the secret store, with save failures reported and the flow continuing.
    fn configure(&mut self, rl: &mut DefaultEditor) {
        println!("\nConfigure Settings:");

        println!("\nAvailable API Providers:");
        let providers = Provider::all();
        for (i, provider) in providers.iter().enumerate() {
            println!("{}. {}", i + 1, provider);
        }
        let Some(choice) =
            prompt_line(rl, "Select API provider (or press Enter to keep current): ")
        else {
            return;
        };
        if let Ok(index) = choice.parse::<usize>()
            && (1..=providers.len()).contains(&index)
        {
            self.settings.provider = providers[index - 1];
            self.settings.model = self.settings.provider.default_model().to_string();
        }

        println!();
        let model_prompt = format!(
            "Enter model name (current: {}, press Enter to keep): ",
            self.settings.model
        );
        let Some(model) = prompt_line(rl, &model_prompt) else {
            return;
        };
        if !model.is_empty() {
            self.settings.model = model;
        }

        if self.settings.provider == Provider::Anthropic {
            println!();
            let Some(api_key) =
                prompt_line(rl, "Enter Anthropic API key (press Enter to keep current): ")
            else {
                return;
            };
            if !api_key.is_empty() {
                self.settings.api_key = api_key.clone();
                if let Err(e) = self.secrets.save_api_key(&api_key) {
                    println!("{e}");
                }
            }
        }

        println!();
        let Some(images) = prompt_line(
            rl,
            "Enter number of most recent images to keep (press Enter to keep current): ",
        ) else {
            return;
        };
        if !images.is_empty() {
            match images.parse::<usize>() {
                Ok(n) => self.settings.max_recent_images = n,
                Err(_) => println!("Invalid input, keeping current value"),
            }
        }

        println!();
        let Some(hide) = prompt_line(rl, "Hide images? (y/n, press Enter to keep current): ")
        else {
            return;
        };
        match hide.to_lowercase().as_str() {
            "y" => self.settings.hide_images = true,
            "n" => self.settings.hide_images = false,
            _ => {}
        }

        println!("\nEnter custom system prompt (press Enter to keep current, or 'clear' to remove):");
        let Some(prompt) = prompt_line(rl, "") else {
            return;
        };
        if prompt.eq_ignore_ascii_case("clear") {
            self.settings.system_prompt_suffix = String::new();
            if let Err(e) = self.secrets.save_system_prompt("") {
                println!("{e}");
            }
        } else if !prompt.is_empty() {
            self.settings.system_prompt_suffix = prompt.clone();
            if let Err(e) = self.secrets.save_system_prompt(&prompt) {
                println!("{e}");
            }
        }
    }
}

/// Read one trimmed line, or `None` to abort the configure flow.
fn prompt_line(rl: &mut DefaultEditor, prompt: &str) -> Option<String> {
    match rl.readline(prompt) {
        Ok(line) => Some(line.trim().to_string()),
        Err(ReadlineError::Interrupted) => {
            println!("\nUse :quit to exit");
            None
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use opdeck_application::{
        EngineError, NoSecretStore, NoTranscriptLogger, TurnObserver, TurnRequest,
    };

    // ==== Test Mocks ====

    struct StubEngine;

    #[async_trait]
    impl AgentLoop for StubEngine {
        async fn run_turn(
            &self,
            request: TurnRequest,
            _observer: &dyn TurnObserver,
        ) -> Result<Vec<Message>, EngineError> {
            let mut messages = request.messages;
            messages.push(Message::assistant_text("stub reply"));
            Ok(messages)
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl AgentLoop for FailingEngine {
        async fn run_turn(
            &self,
            _request: TurnRequest,
            _observer: &dyn TurnObserver,
        ) -> Result<Vec<Message>, EngineError> {
            Err(EngineError::TurnFailed("model overloaded".to_string()))
        }
    }

    fn test_repl<L: AgentLoop>(engine: L) -> SessionRepl<L> {
        SessionRepl::new(
            Arc::new(engine),
            Arc::new(NoTranscriptLogger),
            Arc::new(NoSecretStore),
            TurnSettings::default(),
            PathBuf::from("history.txt"),
            PathBuf::from("transcript.jsonl"),
        )
    }

    // ==== Tests ====

    #[test]
    fn test_command_parsing() {
        assert_eq!(ReplCommand::parse(":help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse(":config"), ReplCommand::Configure);
        assert_eq!(ReplCommand::parse(":settings"), ReplCommand::Settings);
        assert_eq!(ReplCommand::parse(":clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse(":quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(":exit"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse(":foo bar"),
            ReplCommand::Unknown("foo bar".to_string())
        );
        assert_eq!(
            ReplCommand::parse("take a screenshot"),
            ReplCommand::Prompt("take a screenshot".to_string())
        );
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_commands_match_case_insensitively() {
        assert_eq!(ReplCommand::parse(":QUIT"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(":Help"), ReplCommand::Help);
        assert_eq!(
            ReplCommand::parse(":Foo Bar"),
            ReplCommand::Unknown("foo bar".to_string())
        );
    }

    #[test]
    fn test_command_parse_trims_surrounding_whitespace() {
        assert_eq!(ReplCommand::parse("  :quit  "), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("  hello  "),
            ReplCommand::Prompt("hello".to_string())
        );
    }

    #[test]
    fn test_clear_empties_history_but_keeps_settings() {
        let mut repl = test_repl(StubEngine);
        repl.settings.model = "custom-model".to_string();
        repl.settings.max_recent_images = 3;
        repl.messages.push(Message::user_text("hi"));
        repl.messages.push(Message::assistant_text("hello"));

        let outcome = repl.apply_command(ReplCommand::Clear);

        assert_eq!(outcome, CommandOutcome::Continue);
        assert!(repl.messages.is_empty());
        assert_eq!(repl.settings.model, "custom-model");
        assert_eq!(repl.settings.max_recent_images, 3);
    }

    #[test]
    fn test_unknown_command_changes_nothing() {
        let mut repl = test_repl(StubEngine);
        repl.messages.push(Message::user_text("hi"));

        let outcome = repl.apply_command(ReplCommand::Unknown("foo".to_string()));

        assert_eq!(outcome, CommandOutcome::Continue);
        assert_eq!(repl.messages.len(), 1);
    }

    #[test]
    fn test_quit_exits() {
        let mut repl = test_repl(StubEngine);
        assert_eq!(repl.apply_command(ReplCommand::Quit), CommandOutcome::Exit);
    }

    #[tokio::test]
    async fn test_process_input_adopts_engine_history() {
        let mut repl = test_repl(StubEngine);

        repl.process_input("take a screenshot").await;

        assert_eq!(repl.messages.len(), 2);
        assert_eq!(repl.messages[0].text_content(), "take a screenshot");
        assert_eq!(repl.messages[1].text_content(), "stub reply");
    }

    #[tokio::test]
    async fn test_engine_failure_keeps_user_turn() {
        let mut repl = test_repl(FailingEngine);

        repl.process_input("take a screenshot").await;

        // The unanswered user turn stays; the session keeps running
        assert_eq!(repl.messages.len(), 1);
        assert_eq!(repl.messages[0].text_content(), "take a screenshot");
    }
}
