//! Inferno Climb entry point
//!
//! Headless demo runner: the autopilot plays one run at a fixed timestep and
//! the result goes on the high score board.
//!
//! Usage: `inferno-climb [config.json] [--seed N] [--ticks N] [--name NAME] [--scores PATH] [--scoring MODE]`

use std::path::PathBuf;

use inferno_climb::consts::MAX_SUBSTEPS;
use inferno_climb::sim::{Autopilot, Session, TickInput, TickOutcome, tick};
use inferno_climb::{Config, HighScores, ScoringMode};

const DEFAULT_SCORES_FILE: &str = "highscores.json";
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

/// Command line options
#[derive(Debug)]
struct Options {
    config: Option<PathBuf>,
    seed: u64,
    max_ticks: u64,
    name: String,
    scores: PathBuf,
    scoring: Option<ScoringMode>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options {
            config: None,
            seed: 0x1A7A,
            max_ticks: DEFAULT_MAX_TICKS,
            name: "AUTO".to_string(),
            scores: PathBuf::from(DEFAULT_SCORES_FILE),
            scoring: None,
        };

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| args.next().ok_or(format!("{} needs a value", flag));
            match arg.as_str() {
                "--seed" => {
                    options.seed = value("--seed")?
                        .parse()
                        .map_err(|e| format!("bad seed: {}", e))?
                }
                "--ticks" => {
                    options.max_ticks = value("--ticks")?
                        .parse()
                        .map_err(|e| format!("bad tick limit: {}", e))?
                }
                "--name" => options.name = value("--name")?,
                "--scores" => options.scores = PathBuf::from(value("--scores")?),
                "--scoring" => {
                    options.scoring =
                        Some(value("--scoring")?.parse::<ScoringMode>().map_err(|e| e.to_string())?)
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
                path => options.config = Some(PathBuf::from(path)),
            }
        }
        Ok(options)
    }
}

/// One demo run driven at a fixed timestep
struct Game {
    session: Session,
    pilot: Autopilot,
    accumulator: f32,
    sim_dt: f32,
    input: TickInput,
    max_ticks: u64,
}

impl Game {
    fn new(config: Config, seed: u64, max_ticks: u64) -> Self {
        let sim_dt = config.tick_seconds();
        Self {
            session: Session::new(config, seed),
            pilot: Autopilot::new(),
            accumulator: 0.0,
            sim_dt,
            input: TickInput::default(),
            max_ticks,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) -> TickOutcome {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        let mut outcome = TickOutcome::Running;
        while self.accumulator >= self.sim_dt && substeps < MAX_SUBSTEPS {
            let pilot = self.pilot.input(&self.session);
            self.input.move_left = pilot.move_left;
            self.input.move_right = pilot.move_right;
            self.input.jump |= pilot.jump;
            self.input.quit = self.session.time_ticks >= self.max_ticks;

            outcome = tick(&mut self.session, &self.input);
            self.accumulator -= self.sim_dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;

            if outcome != TickOutcome::Running {
                break;
            }
        }
        outcome
    }
}

fn main() {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            eprintln!(
                "usage: inferno-climb [config.json] [--seed N] [--ticks N] [--name NAME] [--scores PATH] [--scoring MODE]"
            );
            std::process::exit(2);
        }
    };

    let mut config = match &options.config {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    if let Some(scoring) = options.scoring {
        config.scoring = scoring;
    }
    let frame_dt = config.tick_seconds();

    log::info!("Inferno Climb (headless) starting, scoring by {}", config.scoring);
    let mut game = Game::new(config, options.seed, options.max_ticks);

    let outcome = loop {
        match game.update(frame_dt) {
            TickOutcome::Running => continue,
            outcome => break outcome,
        }
    };

    let session = &game.session;
    log::info!(
        "Run finished after {} ticks: {:?}, score {}, climbed {:.0} px",
        session.time_ticks,
        outcome,
        session.score,
        session.scrolled
    );

    let mut scores = HighScores::load(&options.scores);
    match scores.add_score(&options.name, session.score) {
        Some(rank) => {
            log::info!("New high score! Rank #{}", rank);
            if let Err(e) = scores.save(&options.scores) {
                log::error!("Failed to save high scores: {}", e);
            }
        }
        None => log::info!("Score did not make the board"),
    }

    for (i, entry) in scores.entries.iter().enumerate() {
        println!("{}. {:<8} {}", i + 1, entry.name, entry.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_options() {
        let options =
            Options::parse(args(&["tuning.json", "--seed", "42", "--name", "ACE"])).unwrap();
        assert_eq!(options.config, Some(PathBuf::from("tuning.json")));
        assert_eq!(options.seed, 42);
        assert_eq!(options.name, "ACE");
        assert_eq!(options.max_ticks, DEFAULT_MAX_TICKS);
        assert_eq!(options.scoring, None);
    }

    #[test]
    fn test_parse_scoring_mode() {
        let options = Options::parse(args(&["--scoring", "distance"])).unwrap();
        assert!(matches!(options.scoring, Some(ScoringMode::Distance { .. })));

        let err = Options::parse(args(&["--scoring", "speed"])).unwrap_err();
        assert!(err.contains("speed"));
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(Options::parse(args(&["--fast"])).is_err());
        assert!(Options::parse(args(&["--seed"])).is_err());
    }

    #[test]
    fn test_tick_limit_aborts_run() {
        let config = Config {
            lava_rise_speed: 0.0,
            ..Config::default()
        };
        let dt = config.tick_seconds();
        let mut game = Game::new(config, 9, 30);
        let mut outcome = TickOutcome::Running;
        for _ in 0..1000 {
            outcome = game.update(dt);
            if outcome != TickOutcome::Running {
                break;
            }
        }
        assert_ne!(outcome, TickOutcome::Running);
        assert!(game.session.time_ticks <= 30);
    }
}
