use crate::domain::events::Event;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{info, instrument, warn};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ConsoleCommand {
    StoreLocation,
    CalculateDistance,
    ResetOrigin,
    Quit,
}

impl ConsoleCommand {
    fn event(self) -> Option<Event> {
        match self {
            ConsoleCommand::StoreLocation => Some(Event::StoreCurrentLocation),
            ConsoleCommand::CalculateDistance => Some(Event::CalculateDistance),
            ConsoleCommand::ResetOrigin => Some(Event::ResetOrigin),
            ConsoleCommand::Quit => None,
        }
    }
}

impl FromStr for ConsoleCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "store" | "s" => Ok(ConsoleCommand::StoreLocation),
            "distance" | "d" => Ok(ConsoleCommand::CalculateDistance),
            "reset" | "r" => Ok(ConsoleCommand::ResetOrigin),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Why the console stopped reading.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ConsoleExit {
    Quit,
    EndOfInput,
    StoreClosed,
}

#[derive(Error, PartialEq, Debug)]
#[error("unknown command '{0}', expected one of: store, distance, reset, quit")]
pub struct UnknownCommand(String);

/// Turns input lines into store events. Returns when the input ends, `quit` is read or the store goes away.
#[instrument(skip_all)]
pub async fn console<R>(input: R, tx: Sender<Event>) -> ConsoleExit
where
    R: AsyncBufRead + Unpin,
{
    info!("⌨️ Commands: store, distance, reset, quit");
    let mut lines = LinesStream::new(input.lines());

    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("⚠️ Unable to read input: {}", e);
                return ConsoleExit::EndOfInput;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!("⚠️ {}", e);
                continue;
            }
        };

        let Some(event) = command.event() else {
            info!("⌨️ Quit requested");
            return ConsoleExit::Quit;
        };

        if tx.send(event).await.is_err() {
            return ConsoleExit::StoreClosed;
        }
    }

    ConsoleExit::EndOfInput
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tokio::sync::mpsc;

    #[rstest]
    #[case("store", ConsoleCommand::StoreLocation)]
    #[case("  Distance ", ConsoleCommand::CalculateDistance)]
    #[case("r", ConsoleCommand::ResetOrigin)]
    #[case("QUIT", ConsoleCommand::Quit)]
    fn parses_commands(#[case] input: &str, #[case] expected: ConsoleCommand) {
        assert_eq!(input.parse::<ConsoleCommand>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!("jump".parse::<ConsoleCommand>(), Err(UnknownCommand("jump".to_string())));
    }

    #[test_log::test(tokio::test)]
    async fn forwards_events_until_quit() {
        let (tx, mut rx) = mpsc::channel(8);

        let exit = console("store\n\nbogus\ndistance\nquit\nreset\n".as_bytes(), tx).await;

        assert_eq!(exit, ConsoleExit::Quit);
        assert!(matches!(rx.recv().await, Some(Event::StoreCurrentLocation)));
        assert!(matches!(rx.recv().await, Some(Event::CalculateDistance)));
        assert!(rx.recv().await.is_none());
    }

    #[test_log::test(tokio::test)]
    async fn end_of_input_is_not_a_quit() {
        let (tx, mut rx) = mpsc::channel(8);

        let exit = console("store\n".as_bytes(), tx).await;

        assert_eq!(exit, ConsoleExit::EndOfInput);
        assert!(matches!(rx.recv().await, Some(Event::StoreCurrentLocation)));
    }

    #[test_log::test(tokio::test)]
    async fn stops_when_the_store_is_gone() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        assert_eq!(console("distance\nstore\n".as_bytes(), tx).await, ConsoleExit::StoreClosed);
    }
}
