//! Interactive questions for the `explore` command.
//!
//! [`Prompter`] works over any buffered reader and writer so the whole
//! dialogue can be driven from in-memory buffers. End of input counts as
//! "no" (or "quit" for the filter questions) rather than an error.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::Result;
use crate::config::City;
use crate::filter::{DayFilter, FilterSpec, MonthFilter};
use crate::output::RULE;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `question` and reads one trimmed, lowercased line.
    /// `None` at end of input.
    fn answer(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Repeats `question` until the answer parses as `T`.
    fn ask_until<T: FromStr>(&mut self, question: &str, invalid: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.answer(question)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(invalid)?,
            }
        }
    }

    pub fn ask_city(&mut self) -> Result<Option<City>> {
        self.ask_until(
            "Enter city (Chicago, New York City, Washington): ",
            "Invalid city. Please try again.",
        )
    }

    pub fn ask_month(&mut self) -> Result<Option<MonthFilter>> {
        self.ask_until(
            "Enter month (January to June) or 'all': ",
            "Invalid month. Please try again.",
        )
    }

    pub fn ask_day(&mut self) -> Result<Option<DayFilter>> {
        self.ask_until(
            "Enter day of week or 'all': ",
            "Invalid day. Please try again.",
        )
    }

    /// Greets the user and collects a city and filter selection.
    pub fn ask_filters(&mut self) -> Result<Option<(City, FilterSpec)>> {
        self.say("Hello! Let's explore some US bikeshare data!")?;

        let Some(city) = self.ask_city()? else {
            return Ok(None);
        };
        let Some(month) = self.ask_month()? else {
            return Ok(None);
        };
        let Some(day) = self.ask_day()? else {
            return Ok(None);
        };

        self.say(RULE)?;
        Ok(Some((city, FilterSpec::new(month, day))))
    }

    /// Repeats `question` until the answer is `yes` or `no`.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.answer(question)?.as_deref() {
                Some("yes") => return Ok(true),
                Some("no") | None => return Ok(false),
                Some(_) => self.say("Invalid input. Please enter 'yes' or 'no'.")?,
            }
        }
    }

    /// Asks once whether to export; anything but yes/no skips the export.
    pub fn ask_save(&mut self) -> Result<bool> {
        let answer = self.answer(
            "Do you want to save the filtered data to a CSV file for external analysis (e.g., Tableau)? (yes/no): ",
        )?;
        match answer.as_deref() {
            Some("yes") => Ok(true),
            Some("no") | None => Ok(false),
            Some(_) => {
                self.say("Invalid input. Skipping saving data.")?;
                self.say(RULE)?;
                Ok(false)
            }
        }
    }

    /// Asks once whether to run another round; only `yes` restarts.
    pub fn ask_restart(&mut self) -> Result<bool> {
        let answer = self.answer("\nWould you like to restart the analysis? Enter yes or no.\n")?;
        Ok(answer.as_deref() == Some("yes"))
    }

    pub fn ask_more_rows(&mut self) -> Result<bool> {
        self.ask_yes_no("Would you like to see 5 lines of raw data? Enter yes or no: ")
    }

    /// Writes pre-rendered text verbatim.
    pub fn show(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
