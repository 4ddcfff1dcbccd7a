//! Interactive viewing session
//!
//! Both stereograms are computed once up front; commands then switch
//! between the four buffers and save the one currently selected.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stereogram_core::{DepthMap, Pix};
use stereogram_synth::{shift_synthesize, tiw_synthesize};
use tracing::{debug, info};

use crate::config::StereogramConfig;

/// Default file written by `save`.
pub const DEFAULT_SAVE_PATH: &str = "output.png";

/// Buffer currently selected for display and saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Background,
    Depth,
    Shifted,
    Tiw,
}

impl View {
    /// View selected by `toggle`: TIW unless TIW is already shown.
    pub fn toggled(self) -> Self {
        match self {
            View::Tiw => View::Shifted,
            _ => View::Tiw,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Background => "background",
            View::Depth => "depth map",
            View::Shifted => "shifted stereogram",
            View::Tiw => "TIW stereogram",
        }
    }
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(View),
    Toggle,
    Save(Option<PathBuf>),
    Info,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    /// Parse a command; the single-letter forms follow the original key
    /// bindings (`q` background, `w` depth, `a` shifted, `s` TIW).
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            bail!("empty command");
        };
        let arg = words.next();
        if words.next().is_some() {
            bail!("too many arguments to '{word}'");
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "background" | "bg" | "q" => Command::Show(View::Background),
            "depth" | "w" => Command::Show(View::Depth),
            "shifted" | "shift" | "a" => Command::Show(View::Shifted),
            "tiw" | "s" => Command::Show(View::Tiw),
            "toggle" | "t" => Command::Toggle,
            "save" => return Ok(Command::Save(arg.map(PathBuf::from))),
            "info" => Command::Info,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        if let Some(arg) = arg {
            bail!("'{word}' takes no argument, got '{arg}'");
        }
        Ok(command)
    }
}

const HELP: &str = "\
commands:
  background (q)   show the background image
  depth (w)        show the depth map
  shifted (a)      show the shifted stereogram
  tiw (s)          show the TIW stereogram
  toggle (t)       switch between the two stereograms
  save [path]      save the current view (default output.png)
  info             describe the current view
  quit             leave the session";

/// Loaded inputs, both results and the current selection.
pub struct Session {
    background: Pix,
    depth: DepthMap,
    shifted: Pix,
    tiw: Pix,
    view: View,
}

impl Session {
    /// Run both engines and start on the background view.
    pub fn new(background: Pix, depth: DepthMap, config: &StereogramConfig) -> Result<Self> {
        let shifted = shift_synthesize(&background, &depth, &config.shift)
            .context("Shift synthesis failed")?;
        let tiw = tiw_synthesize(&background, &depth, &config.tiw)
            .context("TIW synthesis failed")?;
        Ok(Session {
            background,
            depth,
            shifted,
            tiw,
            view: View::default(),
        })
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Buffer for the current view.
    pub fn current(&self) -> &Pix {
        match self.view {
            View::Background => &self.background,
            View::Depth => self.depth.as_pix(),
            View::Shifted => &self.shifted,
            View::Tiw => &self.tiw,
        }
    }

    /// Write the current view as 8-bit RGB PNG.
    pub fn save(&self, path: &Path) -> Result<()> {
        stereogram_io::write_image(self.current(), path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!(path = %path.display(), view = self.view.name(), "saved view");
        Ok(())
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        debug!(?command, "session command");
        match command {
            Command::Show(view) => {
                self.view = view;
                writeln!(out, "showing {}", view.name())?;
            }
            Command::Toggle => {
                self.view = self.view.toggled();
                writeln!(out, "showing {}", self.view.name())?;
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
                self.save(&path)?;
                writeln!(out, "saved {} to {}", self.view.name(), path.display())?;
            }
            Command::Info => {
                let pix = self.current();
                writeln!(
                    out,
                    "{}: {}x{}, {} channels",
                    self.view.name(),
                    pix.width(),
                    pix.height(),
                    pix.channels().count()
                )?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// Unparseable lines and failed saves are reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "showing {} ('help' lists commands)", self.view.name())?;
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    continue;
                }
            };
            match self.apply(command, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(out, "error: {e:#}")?,
            }
        }
        Ok(())
    }
}
