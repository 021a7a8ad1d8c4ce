use crate::io::FileOrStdin;
use anyhow::{Context, Result, anyhow, bail};
use clap::{self, Parser};
use nim::{game::Game, position::Move};
use std::{
    io::{self, BufRead, BufReader, Write},
    str::FromStr,
};

/// Play a game of Nim in the console, optionally against the computer.
#[derive(Parser, Debug)]
pub struct Args {
    /// Comma separated starting pile sizes. If missing, start with `new` command
    #[arg(long, num_args=1.., value_delimiter=',')]
    piles: Vec<u32>,

    /// Commands to read, one per line
    #[arg(long, default_value = "-")]
    input: FileOrStdin,
}

const HELP: &str = "\
Commands:
  move <pile> <count>  remove <count> objects from pile number <pile>
  computer             let the computer make a move
  hint                 show the optimal move without making it
  undo                 undo the last move
  restart              restart current game with the original piles
  new <n1,n2,...>      start a new game with given piles
  piles                show current piles
  help                 show this message
  quit                 quit the program";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    /// Move with the pile already converted to a 0-based index
    Move(Move),
    Computer,
    Hint,
    Undo,
    Restart,
    New(Vec<u32>),
    Piles,
    Help,
    Quit,
}

fn parse_number<T: FromStr>(word: Option<&str>, what: &str) -> Result<T> {
    let word = word.ok_or_else(|| anyhow!("Missing {what}"))?;
    word.parse()
        .map_err(|_| anyhow!("Invalid {what} '{word}', expected a non-negative integer"))
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            bail!("Empty command, type 'help' to list commands");
        };
        let action = match command {
            "move" | "m" => {
                let pile: usize = parse_number(words.next(), "pile number")?;
                let remove = parse_number(words.next(), "number of objects")?;
                let pile = pile
                    .checked_sub(1)
                    .ok_or_else(|| anyhow!("Pile numbers start at 1"))?;
                Action::Move(Move::new(pile, remove))
            }
            "computer" | "c" => Action::Computer,
            "hint" => Action::Hint,
            "undo" | "u" => Action::Undo,
            "restart" => Action::Restart,
            "new" => {
                let piles = words
                    .flat_map(|word| word.split(','))
                    .filter(|size| !size.is_empty())
                    .map(|size| parse_number(Some(size), "pile size"))
                    .collect::<Result<Vec<u32>>>()?;
                return Ok(Action::New(piles));
            }
            "piles" | "p" => Action::Piles,
            "help" | "h" | "?" => Action::Help,
            "quit" | "q" | "exit" => Action::Quit,
            unknown => bail!("Unknown command '{unknown}', type 'help' to list commands"),
        };
        if let Some(extra) = words.next() {
            bail!("Unexpected argument '{extra}'");
        }
        Ok(action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session<W> {
    game: Game,
    started: bool,
    out: W,
}

impl<W> Session<W>
where
    W: Write,
{
    fn new(out: W) -> Self {
        Self {
            game: Game::new(),
            started: false,
            out,
        }
    }

    fn start(&mut self, piles: &[u32]) -> io::Result<()> {
        match self.game.start(piles) {
            Ok(()) => {
                self.started = true;
                self.show_piles()
            }
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    fn show_piles(&mut self) -> io::Result<()> {
        if self.game.is_game_over() {
            return writeln!(self.out, "No piles left.");
        }
        writeln!(self.out, "--- Current Piles ---")?;
        for (idx, size) in self.game.piles().iter().enumerate() {
            writeln!(self.out, "Pile {}: {} objects", idx + 1, size)?;
        }
        writeln!(self.out, "Nim-sum: {}", self.game.nim_sum().value())?;
        writeln!(self.out, "{}'s turn", self.game.current_player())
    }

    fn after_move(&mut self) -> io::Result<()> {
        match self.game.winner() {
            Some(winner) => writeln!(self.out, "Game over! {winner} wins!"),
            None => self.show_piles(),
        }
    }

    fn handle(&mut self, action: Action) -> io::Result<Flow> {
        let needs_game = matches!(
            action,
            Action::Move(_) | Action::Computer | Action::Hint | Action::Undo | Action::Restart
        );
        if needs_game && !self.started {
            writeln!(self.out, "No game in progress, use 'new <n1,n2,...>'")?;
            return Ok(Flow::Continue);
        }

        match action {
            Action::Move(mv) => {
                let mover = self.game.current_player();
                match self.game.play(mv) {
                    Ok(()) => {
                        writeln!(
                            self.out,
                            "{mover} removed {} from Pile {}.",
                            mv.remove,
                            mv.pile + 1
                        )?;
                        self.after_move()?;
                    }
                    Err(err) => writeln!(self.out, "Invalid move: {err}")?,
                }
            }
            Action::Computer => match self.game.play_optimal_move() {
                Some(mv) => {
                    writeln!(
                        self.out,
                        "Computer removed {} from Pile {}.",
                        mv.remove,
                        mv.pile + 1
                    )?;
                    self.after_move()?;
                }
                None => writeln!(self.out, "Game is already over.")?,
            },
            Action::Hint => match self.game.optimal_move() {
                Some(mv) if self.game.nim_sum().is_zero() => writeln!(
                    self.out,
                    "No winning move, try removing {} from Pile {}.",
                    mv.remove,
                    mv.pile + 1
                )?,
                Some(mv) => writeln!(
                    self.out,
                    "Winning move: remove {} from Pile {}.",
                    mv.remove,
                    mv.pile + 1
                )?,
                None => writeln!(self.out, "Game is already over.")?,
            },
            Action::Undo => {
                if self.game.undo_move() {
                    writeln!(self.out, "Last move undone.")?;
                    self.show_piles()?;
                } else {
                    writeln!(self.out, "No moves to undo.")?;
                }
            }
            Action::Restart => match self.game.restart() {
                Ok(()) => {
                    writeln!(self.out, "Restarting current game with original piles...")?;
                    self.show_piles()?;
                }
                Err(err) => writeln!(self.out, "Error: {err}")?,
            },
            Action::New(piles) => self.start(&piles)?,
            Action::Piles => {
                if self.started {
                    self.show_piles()?;
                } else {
                    writeln!(self.out, "No game in progress, use 'new <n1,n2,...>'")?;
                }
            }
            Action::Help => writeln!(self.out, "{HELP}")?,
            Action::Quit => {
                writeln!(self.out, "Thanks for playing! Goodbye.")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let interactive = args.input.is_interactive();
    let input = args
        .input
        .open()
        .with_context(|| format!("Could not open input file '{}'", args.input))?;

    let mut session = Session::new(io::stdout().lock());
    writeln!(session.out, "Welcome to Nim! Type 'help' to list commands.")?;
    if !args.piles.is_empty() {
        session.start(&args.piles)?;
    }

    for line in BufReader::new(input).lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }
        if !interactive {
            writeln!(session.out, "> {}", line.trim())?;
        }

        let flow = match line.parse::<Action>() {
            Ok(action) => session.handle(action)?,
            Err(err) => {
                writeln!(session.out, "{err}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        session.out.flush()?;
    }

    Ok(())
}
