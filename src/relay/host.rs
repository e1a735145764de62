use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};
use tracing::{error, info, warn};

use super::protocol::{CommandEvent, InboundEvent, OutboundEvent};
use crate::control::Controller;
use crate::services::Services;

/// Runs the relay until `input` is exhausted.
///
/// Each message is handled on its own task so a slow translation never
/// holds up the next event. Commands run one at a time, in arrival order.
/// Output lines are written as results become ready. Returns the writer
/// once every in-flight message has been answered.
pub async fn run<R, W>(mut input: R, output: W, services: &Services) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_events(output, rx));
    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await.context("Failed to read event")? == 0 {
            break;
        }
        while let Some(result) = in_flight.try_join_next() {
            log_task_result(result);
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(bytes = buf.len(), "Ignoring event that is not valid UTF-8");
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<InboundEvent>(line) {
            Ok(InboundEvent::Message(msg)) => {
                let pipeline = Arc::clone(&services.pipeline);
                let tx = tx.clone();
                in_flight.spawn(async move {
                    if let Some(event) = OutboundEvent::from_outcome(pipeline.handle(&msg).await) {
                        let _ = tx.send(event);
                    }
                });
            }
            Ok(InboundEvent::Command(command)) => {
                let event = run_command(Arc::clone(&services.controller), command).await;
                let _ = tx.send(event);
            }
            Err(e) => warn!("Ignoring malformed event: {e}"),
        }
    }

    info!(pending = in_flight.len(), "Input closed, draining");
    while let Some(result) = in_flight.join_next().await {
        log_task_result(result);
    }
    drop(tx);

    writer
        .await
        .context("Writer task failed")?
        .context("Failed to write event")
}

async fn run_command(controller: Arc<Controller>, event: CommandEvent) -> OutboundEvent {
    let Some(gid) = event.guild_id else {
        return OutboundEvent::command_result(
            event.id,
            false,
            "Commands can only be used in a server.".to_string(),
        );
    };

    let CommandEvent {
        id,
        channel_id,
        command,
        ..
    } = event;
    let result = task::spawn_blocking(move || controller.execute(gid, channel_id, command)).await;

    match result {
        Ok(Ok(reply)) => OutboundEvent::command_result(id, true, reply.to_string()),
        Ok(Err(e)) => {
            warn!(guild = gid, channel = channel_id, "Command failed: {e}");
            OutboundEvent::command_result(id, false, format!("Command failed: {e}"))
        }
        Err(e) => {
            error!("Command task failed: {e}");
            OutboundEvent::command_result(id, false, "Command failed.".to_string())
        }
    }
}

async fn write_events<W>(
    mut output: W,
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
) -> std::io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = rx.recv().await {
        let mut line = serde_json::to_string(&event)?;
        line.push('\n');
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(output)
}

fn log_task_result(result: Result<(), task::JoinError>) {
    if let Err(e) = result {
        error!("Message task failed: {e}");
    }
}
