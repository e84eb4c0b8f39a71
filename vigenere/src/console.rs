use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tools::{
    analyze::{
        coincidence::ioc_report,
        friedman::{bracket, estimate},
    },
    encode::{alphabet::Symbol, keyword::Keyword, text::Text},
    encrypt::vigenere::VigenereEnc,
    refine::{AnalysisSession, Input, Output, State},
};

use crate::{
    display::{banner, group, keyword_with_index, preview},
    files::{read_text, write_text},
};

/// Where a finished text goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Screen,
    File(PathBuf),
}

/// Which text is shown, ciphertext is printed in blocks of five letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Plaintext,
    Ciphertext,
}

/// Prompts and reports over any pair of input and output streams.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn banner(&mut self) -> Result<()> {
        writeln!(self.output, "{}", banner())?;
        Ok(())
    }

    /// Prints the message and reads one trimmed line.
    fn ask(&mut self, message: &str) -> Result<String> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading from the terminal")? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }

    /// Asks until a non negative number is entered.
    fn ask_number(&mut self, message: &str) -> Result<usize> {
        loop {
            match self.ask(message)?.parse() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    /// Everything but an answer starting with y counts as no.
    fn ask_yes_no(&mut self, message: &str) -> Result<bool> {
        let answer = self.ask(message)?;
        Ok(answer.chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&'y')))
    }

    fn ask_symbol(&mut self, message: &str) -> Result<Symbol> {
        loop {
            let answer = self.ask(message)?;
            match answer.chars().next().map(Symbol::from_char) {
                Some(Ok(symbol)) => return Ok(symbol),
                Some(Err(e)) => writeln!(self.output, "{e}")?,
                None => writeln!(self.output, "Please enter a letter.")?,
            }
        }
    }

    fn ask_keyword(&mut self) -> Result<Keyword> {
        loop {
            match self.ask("\nEnter keyword:")?.parse() {
                Ok(keyword) => return Ok(keyword),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn ask_destination(&mut self, kind: Kind) -> Result<Destination> {
        let name = match kind {
            Kind::Plaintext => "plaintext",
            Kind::Ciphertext => "ciphertext",
        };
        let message = format!(
            "Do you want to print out the {name} to screen or output to a file?\nEnter 1 to print to screen\nEnter 2 to output to file"
        );
        loop {
            match self.ask_number(&message)? {
                1 => return Ok(Destination::Screen),
                2 => {
                    let file = self.ask("\nEnter filename for export:")?;
                    return Ok(Destination::File(file.into()));
                }
                _ => continue,
            }
        }
    }

    /// Prints a text or dumps it into a file.
    pub fn emit(&mut self, text: &Text, kind: Kind, destination: &Destination) -> Result<()> {
        match destination {
            Destination::Screen => match kind {
                Kind::Plaintext => writeln!(self.output, "\n=== YOUR PLAINTEXT ===\n{text}")?,
                Kind::Ciphertext => {
                    writeln!(self.output, "\n=== YOUR CIPHERTEXT ===\n{}", group(text, 5))?
                }
            },
            Destination::File(path) => {
                writeln!(self.output, "\n=== Dumping to file ===")?;
                let path = write_text(path, text)?;
                writeln!(
                    self.output,
                    "=== File writing successful ({}) ===\n",
                    path.display()
                )?;
            }
        }
        Ok(())
    }

    /// Friedman bracket followed by the average IoC of every key length.
    pub fn show_diagnostics(&mut self, ciphertext: &Text, max_key_length: usize) -> Result<()> {
        writeln!(self.output, "=============================")?;
        match estimate(ciphertext).map(bracket) {
            Ok(Some((low, high))) => writeln!(
                self.output,
                "The Friedman Test estimates the key length is: {low} or {high}"
            )?,
            Ok(None) => writeln!(self.output, "The Friedman Test is inconclusive for this text.")?,
            Err(e) => writeln!(self.output, "The Friedman Test failed: {e}")?,
        }

        writeln!(
            self.output,
            "==============================\n\
             Below is the average index of coincidence for key lengths 1 - {max_key_length}.\n\
             The likely keylength is the highest average observed near the friedman estimate.\n\
             Values marked with an * are very near the IoC of english text (higher than 0.06).\n\
             =============================="
        )?;
        match ioc_report(ciphertext, max_key_length) {
            Ok(report) => report
                .iter()
                .try_for_each(|entry| writeln!(self.output, "{entry}"))?,
            Err(e) => writeln!(self.output, "No index of coincidence available: {e}")?,
        }
        Ok(())
    }

    /// Builds the session for a key length, asking for one until the recovery accepts it.
    fn start_session(&mut self, ciphertext: &Text, key_length: Option<usize>) -> Result<AnalysisSession> {
        loop {
            let length = match key_length {
                Some(length) => length,
                None => self.ask_number("\nEnter the keylength based on the information above:")?,
            };
            match AnalysisSession::new(ciphertext.clone(), length) {
                Ok(session) => return Ok(session),
                Err(e) if key_length.is_some() => return Err(e.into()),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Lets the operator correct the recovered keyword until it is accepted.
    pub fn refine(&mut self, mut session: AnalysisSession) -> Result<(Keyword, Text)> {
        loop {
            let input = match session.state() {
                State::PresentKeyword => Input::Continue,
                State::AwaitConfirmation => Input::Answer(self.ask_yes_no(&format!(
                    "\nI estimated the keyword to be: {}. Is this keyword correct?\nEnter Y for yes.  Enter N for no.",
                    session.keyword()
                ))?),
                State::AwaitIndexSelection => Input::Index(self.ask_number(
                    "\nEnter the index of the position (zero indexed) of the keyword that is incorrect:",
                )?),
                State::AwaitReplacementChar { index } => Input::Replacement(
                    self.ask_symbol(&format!("Enter the replacement character for index: {index}."))?,
                ),
                State::Accepted => break,
            };

            match session.advance(input) {
                Ok(output) => self.show(output)?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
        session
            .finish()
            .context("refinement ended without an accepted keyword")
    }

    fn show(&mut self, output: Output) -> Result<()> {
        match output {
            Output::Preview { keyword, plaintext } => writeln!(
                self.output,
                "\nUsing the keyword ({keyword}), the first 1/4 characters of your plaintext are:\n{}\n",
                preview(&plaintext)
            )?,
            Output::SelectIndex { keyword } => {
                writeln!(self.output, "\n{}\n", keyword_with_index(&keyword))?
            }
            Output::Candidates { index, ranked } => {
                writeln!(
                    self.output,
                    "The most likely characters (listed from most likely to least likely) for index {index} are as follows:\n\
                     (The numbers are the sum of the products of the letter frequencies in the text and in english)"
                )?;
                ranked
                    .iter()
                    .try_for_each(|candidate| writeln!(self.output, "{candidate}"))?;
            }
            Output::Replaced { .. } | Output::Accepted { .. } => {}
        }
        Ok(())
    }

    /// Diagnostics, key length choice, recovery and refinement of one ciphertext.
    pub fn decrypt(
        &mut self,
        ciphertext: &Text,
        key_length: Option<usize>,
        max_key_length: usize,
    ) -> Result<(Keyword, Text)> {
        self.show_diagnostics(ciphertext, max_key_length)?;
        let session = self.start_session(ciphertext, key_length)?;
        for (i, shift) in session.recovery().keyword.iter().enumerate() {
            writeln!(
                self.output,
                "Number of shifts for keyword index {i} is: {}",
                shift.index()
            )?;
        }
        self.refine(session)
    }

    pub fn encrypt(&mut self, plaintext: &Text, keyword: &Keyword) -> Result<Text> {
        Ok(VigenereEnc::encrypt(plaintext, keyword)?)
    }

    /// The interactive menu: 1 encrypts a file, 2 breaks a ciphertext file, 3 quits.
    pub fn menu(&mut self, max_key_length: usize) -> Result<()> {
        loop {
            let choice = self.ask_number(
                "\nEnter 1 to encrypt a plaintext file:\nEnter 2 to decrypt a ciphertext file\nEnter 3 to terminate program",
            )?;
            let result = match choice {
                1 => self.menu_encrypt(),
                2 => self.menu_decrypt(max_key_length),
                3 => return Ok(()),
                _ => continue,
            };
            if let Err(e) = result {
                writeln!(self.output, "{e:#}")?;
            }
        }
    }

    fn ask_file(&mut self) -> Result<Text> {
        let file = self.ask("\nEnter filename:")?;
        read_text(Path::new(&file))
    }

    fn menu_encrypt(&mut self) -> Result<()> {
        let plaintext = self.ask_file()?;
        let keyword = self.ask_keyword()?;
        let ciphertext = self.encrypt(&plaintext, &keyword)?;
        let destination = self.ask_destination(Kind::Ciphertext)?;
        self.emit(&ciphertext, Kind::Ciphertext, &destination)
    }

    fn menu_decrypt(&mut self, max_key_length: usize) -> Result<()> {
        let ciphertext = self.ask_file()?;
        let (keyword, plaintext) = self.decrypt(&ciphertext, None, max_key_length)?;
        self.say(format_args!("\nFinal keyword: {keyword}"))?;
        let destination = self.ask_destination(Kind::Plaintext)?;
        self.emit(&plaintext, Kind::Plaintext, &destination)
    }
}
