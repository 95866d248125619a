//! Sampling engine child process adapter.

use super::protocol::{self, EngineEvent};
use async_trait::async_trait;
use opdeck_application::{AgentLoop, EngineError, TurnObserver, TurnRequest};
use opdeck_domain::Message;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// [`AgentLoop`] implementation that drives an external engine process.
///
/// The child is spawned once at startup and lives for the whole session.
/// Each turn writes one request line to its stdin and reads event lines
/// from its stdout until a terminal `done` or `fail` event arrives. Lines
/// that do not parse as events are logged and skipped: the terminal event
/// alone frames a turn, so a corrupt line cannot shift the reply of a
/// later turn. The child is killed when this adapter is dropped.
#[derive(Debug)]
pub struct ProcessAgentLoop {
    stdin: Mutex<ChildStdin>,
    stdout: Mutex<BufReader<ChildStdout>>,
    _child: Child,
}

impl ProcessAgentLoop {
    /// Spawn the engine command and wire up its stdio.
    pub fn spawn(command: &str, args: &[String]) -> Result<Self, EngineError> {
        debug!("Spawning sampling engine: {} {}", command, args.join(" "));

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| EngineError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Spawn {
            command: command.to_string(),
            source: std::io::Error::other("failed to capture engine stdin"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Spawn {
            command: command.to_string(),
            source: std::io::Error::other("failed to capture engine stdout"),
        })?;

        Ok(Self {
            stdin: Mutex::new(stdin),
            stdout: Mutex::new(BufReader::new(stdout)),
            _child: child,
        })
    }
}

#[async_trait]
impl AgentLoop for ProcessAgentLoop {
    async fn run_turn(
        &self,
        request: TurnRequest,
        observer: &dyn TurnObserver,
    ) -> Result<Vec<Message>, EngineError> {
        let line = protocol::encode_turn(&request)?;

        {
            let mut stdin = self.stdin.lock().await;
            stdin.write_all(line.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await?;
        }

        let mut stdout = self.stdout.lock().await;
        let mut buf = String::new();
        loop {
            buf.clear();
            let bytes_read = stdout.read_line(&mut buf).await?;
            if bytes_read == 0 {
                return Err(EngineError::Disconnected);
            }

            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let event = match protocol::parse_event(trimmed) {
                Ok(event) => event,
                Err(err) => {
                    warn!("Skipping unparseable engine line: {}", err);
                    continue;
                }
            };

            match event {
                EngineEvent::Assistant { block } => observer.on_assistant_block(&block),
                EngineEvent::ToolResult { tool_id, result } => {
                    observer.on_tool_output(&result, &tool_id)
                }
                EngineEvent::Api {
                    request,
                    response,
                    error,
                } => observer.on_api_exchange(&request, response.as_ref(), error.as_ref()),
                EngineEvent::Done { messages } => {
                    debug!("Engine turn complete ({} messages)", messages.len());
                    return Ok(messages);
                }
                EngineEvent::Fail { message } => return Err(EngineError::TurnFailed(message)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opdeck_domain::{ContentBlock, Provider};
    use std::sync::Mutex as StdMutex;

    fn request() -> TurnRequest {
        TurnRequest {
            system_prompt_suffix: String::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            provider: Provider::Anthropic,
            messages: vec![Message::user_text("hello")],
            api_key: "sk-ant-test".to_string(),
            max_recent_images: 10,
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        blocks: StdMutex<Vec<ContentBlock>>,
        tool_ids: StdMutex<Vec<String>>,
    }

    impl TurnObserver for RecordingObserver {
        fn on_assistant_block(&self, block: &ContentBlock) {
            self.blocks.lock().unwrap().push(block.clone());
        }

        fn on_tool_output(&self, _result: &opdeck_domain::ToolResult, tool_id: &str) {
            self.tool_ids.lock().unwrap().push(tool_id.to_string());
        }
    }

    #[cfg(unix)]
    fn spawn_script(script: &str) -> ProcessAgentLoop {
        ProcessAgentLoop::spawn("sh", &["-c".to_string(), script.to_string()]).unwrap()
    }

    #[test]
    fn test_spawn_missing_command() {
        let err = ProcessAgentLoop::spawn("/nonexistent/opdeck-engine", &[]).unwrap_err();
        match err {
            EngineError::Spawn { command, .. } => {
                assert_eq!(command, "/nonexistent/opdeck-engine");
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_turn_reads_events_until_done() {
        let engine = spawn_script(concat!(
            "read line; ",
            r#"echo '{"type":"assistant","block":{"type":"text","text":"hi"}}'; "#,
            r#"echo '{"type":"tool_result","tool_id":"toolu_01","result":{"output":"ok"}}'; "#,
            r#"echo '{"type":"done","messages":[{"role":"assistant","content":[{"type":"text","text":"hi"}]}]}'"#,
        ));

        let observer = RecordingObserver::default();
        let messages = engine.run_turn(request(), &observer).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text_content(), "hi");
        assert_eq!(observer.blocks.lock().unwrap().len(), 1);
        assert_eq!(
            observer.tool_ids.lock().unwrap().as_slice(),
            ["toolu_01".to_string()]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_turn_fail_event() {
        let engine = spawn_script(concat!(
            "read line; ",
            r#"echo '{"type":"fail","message":"rate limited"}'"#,
        ));

        let err = engine
            .run_turn(request(), &RecordingObserver::default())
            .await
            .unwrap_err();
        match err {
            EngineError::TurnFailed(message) => assert_eq!(message, "rate limited"),
            other => panic!("expected turn failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_engine_eof_is_disconnected() {
        let engine = spawn_script("read line; exit 0");

        let err = engine
            .run_turn(request(), &RecordingObserver::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Disconnected));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unparseable_lines_are_skipped() {
        let engine = spawn_script(concat!(
            "read line; ",
            "echo 'not json'; ",
            r#"echo '{"type":"assistant","block":{"type":"text","text":"hi"}}'; "#,
            r#"echo '{"type":"done","messages":[{"role":"assistant","content":[{"type":"text","text":"hi"}]}]}'"#,
        ));

        let observer = RecordingObserver::default();
        let messages = engine.run_turn(request(), &observer).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(observer.blocks.lock().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_corrupt_line_does_not_offset_later_turns() {
        let engine = spawn_script(concat!(
            "read line; ",
            "echo 'garbage'; ",
            r#"echo '{"type":"done","messages":[{"role":"assistant","content":[{"type":"text","text":"first reply"}]}]}'; "#,
            "read line; ",
            r#"echo '{"type":"done","messages":[{"role":"assistant","content":[{"type":"text","text":"second reply"}]}]}'"#,
        ));

        let observer = RecordingObserver::default();
        let first = engine.run_turn(request(), &observer).await.unwrap();
        assert_eq!(first[0].text_content(), "first reply");

        // Each turn must read its own reply, not leftovers from the last one
        let second = engine.run_turn(request(), &observer).await.unwrap();
        assert_eq!(second[0].text_content(), "second reply");
    }
}
