//! Line-based player screen
//!
//! Reads transport commands from an async reader while applying engine status
//! reports as they arrive, and renders session events as text.

use crate::error::{ConsoleError, Result};
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use tapedeck_playback::{NowPlaying, PlaybackSession, SessionEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// A command typed at the player prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Toggle,
    Next,
    Previous,
    Seek(Duration),
    Status,
    Quit,
}

impl FromStr for PlayerCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let command = match parts.next().unwrap_or_default() {
            "toggle" | "t" | "p" | "play" | "pause" => Self::Toggle,
            "next" | "n" => Self::Next,
            "prev" | "previous" | "b" => Self::Previous,
            "status" | "s" => Self::Status,
            "quit" | "q" | "exit" => Self::Quit,
            "seek" => {
                let target = parts
                    .next()
                    .and_then(parse_position)
                    .ok_or_else(|| ConsoleError::InvalidCommand(line.to_string()))?;
                Self::Seek(target)
            }
            _ => return Err(ConsoleError::InvalidCommand(line.to_string())),
        };

        if parts.next().is_some() {
            return Err(ConsoleError::InvalidCommand(line.to_string()));
        }

        Ok(command)
    }
}

/// Parse `m:ss` or a plain millisecond count
pub fn parse_position(text: &str) -> Option<Duration> {
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            Some(Duration::from_secs(minutes * 60 + seconds))
        }
        None => text.parse().ok().map(Duration::from_millis),
    }
}

/// One-line summary of the player screen
pub fn render_status(now_playing: &NowPlaying, playlist_len: usize) -> String {
    format!(
        "[{}/{}] {}  {} / {}  {}",
        now_playing.index + 1,
        playlist_len,
        now_playing.title,
        now_playing.elapsed_label(),
        now_playing.total_label(),
        if now_playing.is_playing {
            "playing"
        } else {
            "paused"
        }
    )
}

/// Drive `session` from `input` until EOF or `quit`
///
/// The session should already be mounted. It is closed before returning.
pub async fn run_player<R, W>(session: &mut PlaybackSession, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    render_events(session, out)?;

    loop {
        tokio::select! {
            biased;

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.parse::<PlayerCommand>() {
                    Ok(PlayerCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(err) = execute(session, command, out).await {
                            warn!("{:?} failed: {}", command, err);
                            writeln!(out, "error: {}", err)?;
                        }
                    }
                    Err(err) => writeln!(out, "{}", err)?,
                }
            }
            _ = session.next_status() => {}
        }

        render_events(session, out)?;
    }

    session.close().await;
    Ok(())
}

async fn execute<W: Write>(
    session: &mut PlaybackSession,
    command: PlayerCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        PlayerCommand::Toggle => session.toggle_play_pause().await?,
        PlayerCommand::Next => {
            if !session.next().await? {
                writeln!(out, "already at the last track")?;
            }
        }
        PlayerCommand::Previous => {
            if !session.previous().await? {
                writeln!(out, "already at the first track")?;
            }
        }
        PlayerCommand::Seek(target) => session.seek(target).await?,
        PlayerCommand::Status => {
            session.pump_status();
            writeln!(
                out,
                "{}",
                render_status(&session.now_playing(), session.playlist().len())
            )?;
        }
        PlayerCommand::Quit => {}
    }
    Ok(())
}

fn render_events<W: Write>(session: &mut PlaybackSession, out: &mut W) -> Result<()> {
    for event in session.drain_events() {
        debug!("{:?}", event);
        match event {
            SessionEvent::TrackChanged { index, title } => {
                writeln!(out, "track {}: {}", index + 1, title)?;
            }
            SessionEvent::StateChanged { playing } => {
                writeln!(out, "{}", if playing { "playing" } else { "paused" })?;
            }
            SessionEvent::Error { message } => writeln!(out, "error: {}", message)?,
            SessionEvent::PositionUpdate { .. } => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("n".parse::<PlayerCommand>().unwrap(), PlayerCommand::Next);
        assert_eq!("prev".parse::<PlayerCommand>().unwrap(), PlayerCommand::Previous);
        assert_eq!("p".parse::<PlayerCommand>().unwrap(), PlayerCommand::Toggle);
        assert_eq!(
            "seek 2:30".parse::<PlayerCommand>().unwrap(),
            PlayerCommand::Seek(Duration::from_secs(150))
        );
        assert_eq!(
            "seek 1500".parse::<PlayerCommand>().unwrap(),
            PlayerCommand::Seek(Duration::from_millis(1500))
        );
    }

    #[test]
    fn rejects_bad_commands() {
        assert!("dance".parse::<PlayerCommand>().is_err());
        assert!("seek".parse::<PlayerCommand>().is_err());
        assert!("seek 1:75".parse::<PlayerCommand>().is_err());
        assert!("next now".parse::<PlayerCommand>().is_err());
    }

    #[test]
    fn status_line() {
        let now_playing = NowPlaying {
            index: 0,
            title: "Track 1".to_string(),
            artwork_uri: "img://1".to_string(),
            is_playing: true,
            is_loaded: true,
            position: Duration::from_secs(5),
            duration: Some(Duration::from_secs(200)),
        };

        assert_eq!(
            render_status(&now_playing, 3),
            "[1/3] Track 1  0:05 / 3:20  playing"
        );
    }
}
