//! Blocking HTTP session against the arena server.
//!
//! One [`GameClient`] owns one configured account session. Per game:
//! POST the start endpoint, then loop fetch→decide→send until the
//! server flags the game finished. Everything is strictly sequential;
//! the only blocking points are the network call and the bounded
//! searches inside `decide`.

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::client::recorder::Recorder;
use crate::client::{BotConfig, ClientError, ClientResult, GameMode};
use crate::game::{GameSnapshot, StateDto};
use crate::policy::{AgentMemory, Policy};

/// Per-request timeout; generous next to the server's own move budget.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One finished game from the playing bot's perspective.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// Server-assigned game identifier.
    pub game_id: String,
    /// Turns played.
    pub turns: u32,
    /// Final gold of the playing bot.
    pub gold: u32,
    /// Final mine count of the playing bot.
    pub mines: u32,
    /// Name of the hero with the most gold.
    pub winner: String,
    /// Whether the playing bot won (most gold).
    pub victory: bool,
}

/// HTTP turn driver owning one account session.
#[derive(Debug)]
pub struct GameClient {
    /// Shared blocking HTTP client with the request timeout applied.
    http: reqwest::blocking::Client,
    /// Account and pacing configuration.
    config: BotConfig,
}

impl GameClient {
    /// Build a client for the configured account.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: BotConfig) -> ClientResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Play one full game with the given policy.
    ///
    /// Memory is threaded through every turn; callers reset it between
    /// games. When `save_dir` is set, each raw state payload is appended
    /// to `<save_dir>/<game_id>.jsonl` as it arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be started, a request
    /// fails, or a payload fails to parse (the game is abandoned with a
    /// logged error — no move is guessed from a garbled state).
    pub fn play_game(
        &self,
        policy: &dyn Policy,
        memory: &mut AgentMemory,
        save_dir: Option<&Path>,
    ) -> ClientResult<GameOutcome> {
        let mut raw = self.start_game()?;
        let mut recorder: Option<Recorder> = None;
        let mut announced = false;

        loop {
            let dto = match StateDto::parse(&raw) {
                Ok(dto) => dto,
                Err(e) => {
                    log::error!("abandoning game, unreadable payload: {e}");
                    return Err(e.into());
                }
            };
            if let Some(dir) = save_dir {
                if recorder.is_none() {
                    recorder = Some(Recorder::create(dir, &dto.game.id)?);
                }
                if let Some(rec) = recorder.as_mut() {
                    rec.record(&raw)?;
                }
            }
            if !announced && let Some(url) = dto.view_url.as_deref() {
                log::info!("playing at {url}");
                announced = true;
            }

            let snapshot = match GameSnapshot::from_state(&dto) {
                Ok(snap) => snap,
                Err(e) => {
                    log::error!("abandoning game, bad snapshot: {e}");
                    return Err(e.into());
                }
            };
            if snapshot.finished {
                let outcome = outcome_of(&snapshot);
                log::info!(
                    "game {} over after {} turns: winner {}, gold {}",
                    outcome.game_id,
                    outcome.turns,
                    outcome.winner,
                    outcome.gold
                );
                return Ok(outcome);
            }

            let decision = policy.decide(&snapshot, memory);
            log::debug!(
                "turn {}/{}: {} {} via {:?}",
                snapshot.turn,
                snapshot.max_turns,
                decision.action,
                decision.direction,
                decision.path.last()
            );

            if self.config.delay_ms > 0 {
                thread::sleep(Duration::from_millis(self.config.delay_ms));
            }

            let play_url = dto.play_url.as_deref().ok_or(ClientError::MissingPlayUrl)?;
            raw = self.post(play_url, &[("dir", decision.direction.as_str().to_string())])?;
        }
    }

    /// Start a game and return the first raw state payload.
    fn start_game(&self) -> ClientResult<String> {
        let url = format!(
            "{}/api/{}",
            self.config.server_url.trim_end_matches('/'),
            self.config.mode.endpoint()
        );
        let mut form: Vec<(&str, String)> = vec![("key", self.config.key.clone())];
        if self.config.mode == GameMode::Training {
            form.push(("turns", self.config.turns.to_string()));
            if let Some(map) = &self.config.map {
                form.push(("map", map.clone()));
            }
        }
        log::info!("connecting to {url}");
        self.post(&url, &form)
    }

    /// POST a form and return the response body, mapping non-success
    /// statuses to errors.
    fn post(&self, url: &str, form: &[(&str, String)]) -> ClientResult<String> {
        let response = self.http.post(url).form(form).send()?;
        let status = response.status();
        let body = response.text()?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::Server {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Judge a finished snapshot: most gold wins.
fn outcome_of(snapshot: &GameSnapshot) -> GameOutcome {
    let me = &snapshot.hero;
    let mut winner = me;
    for enemy in snapshot.enemies() {
        if enemy.gold > winner.gold {
            winner = enemy;
        }
    }
    GameOutcome {
        game_id: snapshot.game_id.clone(),
        turns: snapshot.turn,
        gold: me.gold,
        mines: me.mine_count,
        winner: winner.name.clone(),
        victory: winner.id == me.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Coord, Hero};

    fn finished_snapshot(my_gold: u32, enemy_gold: u32) -> GameSnapshot {
        let tiles = "@1    @2".to_string() + &"  ".repeat(12);
        let board = Board::parse(&tiles, 4).unwrap();
        let mut hero = Hero::at(1, Coord::new(0, 0));
        hero.gold = my_gold;
        let mut enemy = Hero::at(2, Coord::new(0, 3));
        enemy.gold = enemy_gold;
        enemy.name = "rival".to_string();
        GameSnapshot {
            game_id: "g".to_string(),
            turn: 300,
            max_turns: 300,
            finished: true,
            board,
            hero,
            enemies: vec![enemy],
        }
    }

    #[test]
    fn test_outcome_victory_by_gold() {
        let outcome = outcome_of(&finished_snapshot(50, 20));
        assert!(outcome.victory);
        assert_eq!(outcome.gold, 50);

        let outcome = outcome_of(&finished_snapshot(10, 20));
        assert!(!outcome.victory);
        assert_eq!(outcome.winner, "rival");
    }

    #[test]
    fn test_outcome_tie_keeps_self() {
        // Strict greater-than: the self hero keeps a tie.
        let outcome = outcome_of(&finished_snapshot(20, 20));
        assert!(outcome.victory);
    }
}
