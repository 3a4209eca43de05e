//! Line-oriented interactive front end over a [`Session`].
//!
//! Each input line is one form event: typing a city, picking a suggestion,
//! setting the date, switching language, submitting or resetting.

use crate::api::{Backend, GeocodeClient, MuhuratClient};
use crate::i18n::{Language, Localizer};
use crate::render::{render_result, render_suggestions};
use crate::session::Session;
use crate::timefmt::TimeStyle;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
  city <text>        type a city name (2+ characters fetches suggestions)
  pick <n>           select suggestion n
  date <YYYY-MM-DD>  set the date
  lang <en|gu>       switch label language
  submit             fetch the muhurat for the selected city and date
  show               print the current result again
  reset              clear the form
  help               this text
  quit               leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    City(String),
    Pick(usize),
    Date(NaiveDate),
    Lang(Language),
    Submit,
    Show,
    Reset,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line.trim_end(), ""),
        };

        match word.to_lowercase().as_str() {
            "city" => Ok(Command::City(rest.to_string())),
            "pick" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .map(Command::Pick)
                .ok_or_else(|| format!("Invalid suggestion number '{}'", rest)),
            "date" => NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|e| format!("Invalid date '{}': {}", rest, e)),
            "lang" => Language::parse(rest)
                .map(Command::Lang)
                .ok_or_else(|| format!("Unknown language '{}'. Use 'en' or 'gu'.", rest)),
            "submit" => Ok(Command::Submit),
            "show" => Ok(Command::Show),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

/// Drives a session from `input` until EOF or `quit`.
pub struct Repl<'a, B> {
    pub session: Session,
    geocoder: &'a GeocodeClient<B>,
    client: &'a MuhuratClient<B>,
    style: TimeStyle,
}

impl<'a, B: Backend> Repl<'a, B> {
    pub fn new(
        session: Session,
        geocoder: &'a GeocodeClient<B>,
        client: &'a MuhuratClient<B>,
        style: TimeStyle,
    ) -> Self {
        Self { session, geocoder, client, style }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        let loc = Localizer::builtin(self.session.language());
        writeln!(out, "  {}", loc.t("title"))?;
        writeln!(out, "  city <{}>  \u{00b7}  submit: {}", loc.t("cityPlaceholder"), loc.t("getMuhurat"))?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => self.execute(cmd, out)?,
                    Err(msg) => writeln!(out, "  {}", msg)?,
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<()> {
        let loc = Localizer::builtin(self.session.language());

        match cmd {
            Command::City(text) => {
                let list = self.session.refresh_suggestions(self.geocoder, &text);
                if !text.is_empty() {
                    write!(out, "{}", render_suggestions(list, &loc))?;
                }
            }
            Command::Pick(n) => match n.checked_sub(1).map(|i| self.session.select_suggestion(i)) {
                Some(Ok(city)) => writeln!(out, "  \u{2192} {}", city)?,
                Some(Err(e)) => writeln!(out, "  {}", loc.t(e.message_key()))?,
                None => writeln!(out, "  {}", loc.t("noSuchSuggestion"))?,
            },
            Command::Date(date) => {
                self.session.set_date(date);
                writeln!(out, "  {}: {}", loc.t("date"), date.format("%Y-%m-%d"))?;
            }
            Command::Lang(lang) => {
                self.session.set_language(lang);
                writeln!(out, "  {}", lang.native_name())?;
                if let Some(result) = self.session.result() {
                    write!(out, "{}", render_result(result, &Localizer::builtin(lang), &self.style))?;
                }
            }
            Command::Submit => {
                writeln!(out, "  {}", loc.t("loading"))?;
                match self.session.submit(self.client) {
                    Ok(result) => write!(out, "{}", render_result(result, &loc, &self.style))?,
                    Err(e) => writeln!(out, "  {}", loc.t(e.message_key()))?,
                }
            }
            Command::Show => match self.session.result() {
                Some(result) => write!(out, "{}", render_result(result, &loc, &self.style))?,
                None => writeln!(out, "  [{}]", self.session.state())?,
            },
            Command::Reset => {
                self.session.reset();
                writeln!(out, "  {}", loc.t("reset"))?;
            }
            Command::Help => write!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }
}
