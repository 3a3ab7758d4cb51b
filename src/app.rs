use crate::config::Settings;
use crate::input::Tokens;
use crate::providers::geo::GeoClient;
use crate::results::{self, Theme};
use anyhow::{Context, Result};
use console::StyledObject;
use indicatif::ProgressBar;
use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::time::Duration;
use tracing::{debug, info};

const BANNER: &str = r"
.####.####.####.########................########.########.....###.....######..##....##.########.########..####.####
.####.####..##..##.....##..................##....##.....##...##.##...##....##.##...##..##.......##.....##.####.####
..##...##...##..##.....##..................##....##.....##..##...##..##.......##..##...##.......##.....##..##...##.
...##...##..##..########.....#######.......##....########..##.....##.##.......#####....######...########..##...##..
............##..##.........................##....##...##...#########.##.......##..##...##.......##...##............
............##..##.........................##....##....##..##.....##.##....##.##...##..##.......##....##...........
...........####.##.........................##....##.....##.##.....##..######..##....##.########.##.....##..........
";

/// What the user asked for at the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Lookup(String),
  Help,
  Exit,
}

/// The interactive shell: menu, lookups and report printing.
pub struct App<R, W> {
  client: GeoClient,
  settings: Settings,
  theme: Theme,
  input: Tokens<R>,
  out: W,
}

impl App<StdinLock<'static>, Stdout> {
  /// Builds a shell bound to the process's stdin and stdout.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn new(settings: Settings) -> Result<Self> {
    let client = GeoClient::from_settings(&settings)
      .context("Failed to build HTTP client")?;

    Ok(Self::with_io(
      client,
      settings,
      Theme::default(),
      io::stdin().lock(),
      io::stdout(),
    ))
  }
}

impl<R: BufRead, W: Write> App<R, W> {
  pub fn with_io(
    client: GeoClient,
    settings: Settings,
    theme: Theme,
    input: R,
    out: W,
  ) -> Self {
    Self {
      client,
      settings,
      theme,
      input: Tokens::new(input),
      out,
    }
  }

  /// Consumes the shell and hands back its output sink.
  pub fn into_output(self) -> W {
    self.out
  }

  /// Runs the menu loop until the user exits or input runs out.
  ///
  /// A `target` given on the command line is looked up once before the
  /// first menu is shown.
  ///
  /// # Errors
  /// Only failures to read the terminal or write to it are returned;
  /// lookup failures are reported to the user and the loop continues.
  pub async fn run(&mut self, target: Option<String>) -> Result<()> {
    self.print_banner()?;

    let mut pending = target;
    loop {
      let command = if let Some(target) = pending.take() {
        let line = self
          .theme
          .prompt
          .apply_to(format!("🚀 Using command-line argument: {target}"));
        self.type_out(&line).await?;
        Command::Lookup(target)
      } else {
        self.show_menu()?
      };
      debug!(?command, "dispatching");

      match command {
        Command::Exit => {
          let line = self
            .theme
            .menu
            .apply_to("Shutting down the IP Tracker. Goodbye!");
          self.type_out(&line).await?;
          break;
        }
        Command::Help => {
          self.show_help()?;
          continue;
        }
        Command::Lookup(target) => self.lookup(&target).await?,
      }
      write!(self.out, "\n\n")?;
    }

    self.out.flush()?;
    Ok(())
  }

  /// Prints the menu and reads one selection.
  ///
  /// Anything other than `1`, `2` or `3` is taken as the identifier itself.
  fn show_menu(&mut self) -> Result<Command> {
    let t = &self.theme;
    writeln!(self.out, "\n{}", t.menu.apply_to("--- Main Menu ---"))?;
    writeln!(
      self.out,
      "{}{} (Enter IP/Domain)",
      t.menu.apply_to("1. "),
      t.highlight.apply_to("➤ LOOKUP IP/DOMAIN")
    )?;
    writeln!(self.out, "{}", t.menu.apply_to("2.   Show Help"))?;
    writeln!(self.out, "{}", t.menu.apply_to("3.   Exit Program"))?;
    writeln!(self.out, "-----------------")?;
    write!(
      self.out,
      "{}",
      t.prompt
        .apply_to("Enter selection (1-3) or an IP/Domain directly: ")
    )?;
    self.out.flush()?;

    let Some(choice) = self.next_token()? else {
      return Ok(Command::Exit);
    };

    match choice.as_str() {
      "1" => {
        write!(
          self.out,
          "{}",
          self.theme.prompt.apply_to("Enter IP or domain to lookup: ")
        )?;
        self.out.flush()?;
        Ok(self.next_token()?.map_or(Command::Exit, Command::Lookup))
      }
      "2" => Ok(Command::Help),
      "3" => Ok(Command::Exit),
      _ => Ok(Command::Lookup(choice)),
    }
  }

  async fn lookup(&mut self, target: &str) -> Result<()> {
    let line = self
      .theme
      .prompt
      .apply_to(format!("🔍 Attempting to fetch data for {target}..."));
    self.type_out(&line).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Querying {target}"));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let outcome = self.client.lookup(target).await;
    spinner.finish_and_clear();

    match outcome {
      Ok(record) => {
        info!(ip = target, "lookup succeeded");
        let line = self
          .theme
          .highlight
          .apply_to("🎯 Data fetched and parsed successfully!");
        self.type_out(&line).await?;
        let report =
          results::render(&record, &self.theme, &self.settings.maps_base);
        write!(self.out, "{report}")?;
      }
      Err(e) => {
        writeln!(
          self.out,
          "{}",
          self.theme.highlight.apply_to(format!("❌ {e}"))
        )?;
        let line = self
          .theme
          .highlight
          .apply_to("❌ IP lookup failed. Review error messages above.");
        self.type_out(&line).await?;
      }
    }
    Ok(())
  }

  fn show_help(&mut self) -> Result<()> {
    let t = &self.theme;
    writeln!(self.out, "\n{}", t.highlight.apply_to("--- HELP ---"))?;
    for line in [
      "The IP Tracker can resolve IP addresses or domains to geolocation data.",
      "Lookup: Enter an IP address (e.g., 8.8.8.8) or a domain (e.g., google.com).",
      "Commands: Enter '2' for this help screen, or '3' to exit.",
      "----------------",
    ] {
      writeln!(self.out, "{}", t.menu.apply_to(line))?;
    }
    Ok(())
  }

  fn print_banner(&mut self) -> Result<()> {
    writeln!(self.out, "{}", self.theme.banner.apply_to(BANNER))?;
    writeln!(
      self.out,
      "{}\n",
      self
        .theme
        .menu
        .apply_to("  >> ENTERPRISE GEOLOCATION UTILITY <<")
    )?;
    Ok(())
  }

  /// Writes a status line one character at a time when pacing is enabled.
  async fn type_out<D: Display>(
    &mut self,
    line: &StyledObject<D>,
  ) -> Result<()> {
    let text = line.to_string();
    let delay = self.settings.typing_delay;
    if delay.is_zero() {
      writeln!(self.out, "{text}")?;
      return Ok(());
    }
    for c in text.chars() {
      write!(self.out, "{c}")?;
      self.out.flush()?;
      tokio::time::sleep(delay).await;
    }
    writeln!(self.out)?;
    Ok(())
  }

  fn next_token(&mut self) -> Result<Option<String>> {
    self
      .input
      .next_token()
      .context("Failed to read from standard input")
  }
}
