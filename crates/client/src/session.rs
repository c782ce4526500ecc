//! Session: the client's event loop.
//!
//! Between turns the loop multiplexes the server and the keyboard: a line that
//! has already arrived is interpreted first, otherwise the keyboard gets a
//! short readiness wait and any key is offered to the camera. An `action?`
//! prompt switches to the turn loop, which only listens to the keyboard until
//! a movement or quit key ends the turn.

use std::io::Write;

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::core::{TileTable, ViewState, WorldError};
use crate::error::ClientError;
use crate::input::{map_key, KeySource, TurnController, TurnEffect, TurnState};
use crate::protocol::{
    handshake, interpret, ActionPrompt, HandshakeError, LineTransport, ProtocolError, Step,
};
use crate::term::TerminalRenderer;
use crate::types::CameraCommand;

/// Why a session finished without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The server sent `end`.
    ServerEnded,
    /// The player pressed the quit key.
    Quit,
}

impl EndReason {
    pub fn message(&self) -> &'static str {
        "game finished"
    }
}

pub struct Session<T, K, W: Write> {
    transport: T,
    keys: K,
    renderer: TerminalRenderer<W>,
    tiles: TileTable,
    view: ViewState,
    turn: TurnController,
    config: ClientConfig,
}

impl<T: LineTransport, K: KeySource, W: Write> Session<T, K, W> {
    /// Read the handshake from `transport` and size the world accordingly.
    pub fn connect(
        mut transport: T,
        keys: K,
        renderer: TerminalRenderer<W>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let size = handshake(&mut transport)?;
        info!(width = size.width, height = size.height, "handshake complete");
        let view = ViewState::new(
            size.width,
            size.height,
            config.camera_width,
            config.camera_height,
        )
        .map_err(|WorldError::TooLarge { width, height }| {
            HandshakeError::WorldTooLarge { width, height }
        })?;

        Ok(Self {
            transport,
            keys,
            renderer,
            tiles: TileTable::builtin(),
            view,
            turn: TurnController::new(),
            config,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn.state()
    }

    /// Clear the screen and run until the game ends.
    pub fn run(&mut self) -> Result<EndReason, ClientError> {
        self.renderer.enter()?;
        loop {
            if let Some(reason) = self.tick()? {
                info!(?reason, "session ended");
                return Ok(reason);
            }
        }
    }

    /// Put colors and cursor back. Call on every exit path.
    pub fn restore(&mut self) -> Result<(), ClientError> {
        self.renderer.exit(&self.view)?;
        Ok(())
    }

    /// One iteration of the idle loop.
    pub fn tick(&mut self) -> Result<Option<EndReason>, ClientError> {
        match self.transport.try_recv_line()? {
            Some(line) => self.handle_line(&line),
            None => {
                let key = self.keys.poll_key(self.config.poll_interval)?;
                if let TurnEffect::Camera(command) = self.turn.handle(key.and_then(map_key)) {
                    self.move_camera(command)?;
                }
                Ok(None)
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<Option<EndReason>, ClientError> {
        debug!(line = %line, "recv");
        match interpret(&mut self.view, &self.tiles, line)? {
            Step::Continue(redraw) => {
                self.renderer.draw(redraw, &self.view, &self.tiles)?;
                Ok(None)
            }
            Step::Prompt(prompt) => self.play_turn(&prompt),
            Step::End => Ok(Some(EndReason::ServerEnded)),
        }
    }

    /// Poll keys until the prompt is answered.
    fn play_turn(&mut self, prompt: &ActionPrompt) -> Result<Option<EndReason>, ClientError> {
        if !self.turn.begin() {
            return Err(ProtocolError::UnexpectedPrompt.into());
        }
        self.renderer.draw_status(&self.view, &prompt_line(prompt))?;

        loop {
            let key = self.keys.poll_key(self.config.poll_interval)?;
            match self.turn.handle(key.and_then(map_key)) {
                TurnEffect::Camera(command) => self.move_camera(command)?,
                TurnEffect::Ignored => {}
                TurnEffect::Send(command) => {
                    debug!(command = command.as_str(), "send");
                    self.transport.send_line(command.as_str())?;
                    break;
                }
            }
        }

        self.renderer.clear_status(&self.view)?;
        Ok(self.turn.is_terminated().then_some(EndReason::Quit))
    }

    fn move_camera(&mut self, command: CameraCommand) -> Result<(), ClientError> {
        let redraw = self.view.apply_camera(command);
        self.renderer.draw(redraw, &self.view, &self.tiles)?;
        Ok(())
    }
}

fn prompt_line(prompt: &ActionPrompt) -> String {
    format!(
        "> action? position:({:2},{:2}) character:{} hit_point:{} symbol:{}",
        prompt.x, prompt.y, prompt.character_index, prompt.hit_point, prompt.symbol
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedKeys;
    use crate::protocol::MemoryTransport;

    #[test]
    fn prompt_without_a_free_turn_fails() {
        let transport = MemoryTransport::with_lines(["parameters width=4 height=4"]);
        let mut session = Session::connect(
            transport,
            ScriptedKeys::from_chars("s"),
            TerminalRenderer::new(Vec::new()),
            ClientConfig::default(),
        )
        .unwrap();
        assert!(session.turn.begin());

        let prompt = ActionPrompt {
            x: 0,
            y: 0,
            character_index: 0,
            hit_point: 1,
            symbol: 'h',
        };
        assert!(matches!(
            session.play_turn(&prompt),
            Err(ClientError::Protocol(ProtocolError::UnexpectedPrompt))
        ));
        assert!(session.transport().sent().is_empty());
    }

    #[test]
    fn prompt_line_pads_coordinates() {
        let prompt = ActionPrompt {
            x: 3,
            y: 12,
            character_index: 1,
            hit_point: 10,
            symbol: 'h',
        };
        assert_eq!(
            prompt_line(&prompt),
            "> action? position:( 3,12) character:1 hit_point:10 symbol:h"
        );
    }
}
