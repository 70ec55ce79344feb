//! Interactive menu session.
//!
//! One session owns the booking service, the credential store and the login flag for the
//! lifetime of the program. Each menu action runs to completion, including its file I/O,
//! before the menu is shown again. File errors are reported on the error stream and the
//! session carries on.

use crate::prompt::Prompter;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use triage_core::{
    BookingRequest, BookingService, CoreConfig, CredentialStore, Credentials, TriageError,
};

const MENU: &str = "\nMenu:\n\
1. Register patient\n\
2. Login\n\
3. Book appointment\n\
4. Display patient queue\n\
5. Exit";

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Login,
    Book,
    Display,
    Exit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Register),
            2 => Ok(Self::Login),
            3 => Ok(Self::Book),
            4 => Ok(Self::Display),
            5 => Ok(Self::Exit),
            other => Err(other),
        }
    }
}

type Step = io::Result<ControlFlow<()>>;

/// Stops the current action when the input has been closed.
macro_rules! or_closed {
    ($read:expr) => {
        match $read? {
            Some(value) => value,
            None => return Ok(ControlFlow::Break(())),
        }
    };
}

pub struct Session<R, W, E> {
    prompter: Prompter<R, W>,
    errors: E,
    bookings: BookingService,
    credentials: CredentialStore,
    logged_in: bool,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    pub fn new(cfg: &CoreConfig, input: R, output: W, errors: E) -> Self {
        Self::with_services(
            BookingService::new(cfg),
            CredentialStore::from_config(cfg),
            input,
            output,
            errors,
        )
    }

    pub fn with_services(
        bookings: BookingService,
        credentials: CredentialStore,
        input: R,
        output: W,
        errors: E,
    ) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            errors,
            bookings,
            credentials,
            logged_in: false,
        }
    }

    /// Runs the menu loop until the user exits or the input is closed.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.step()?.is_break() {
                return Ok(());
            }
        }
    }

    /// Shows the menu once and performs the chosen action.
    pub fn step(&mut self) -> Step {
        self.prompter.say(MENU)?;
        self.prompter.prompt("Enter your choice: ")?;
        let choice = match self.prompter.read_integer()? {
            Some(choice) => choice,
            None => {
                tracing::debug!("input closed at menu");
                return Ok(ControlFlow::Break(()));
            }
        };

        match MenuChoice::try_from(choice) {
            Ok(MenuChoice::Register) => self.register(),
            Ok(MenuChoice::Login) => self.login(),
            Ok(MenuChoice::Book) => self.book(),
            Ok(MenuChoice::Display) => self.display(),
            Ok(MenuChoice::Exit) => {
                self.prompter.say("Exiting program.")?;
                Ok(ControlFlow::Break(()))
            }
            Err(_) => {
                self.prompter
                    .say("Invalid choice. Please enter a number between 1 and 5.")?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    fn read_credentials(&mut self) -> io::Result<Option<Credentials>> {
        self.prompter.prompt("Enter username: ")?;
        let Some(username) = self.prompter.read_field()? else {
            return Ok(None);
        };
        self.prompter.prompt("Enter password: ")?;
        let Some(password) = self.prompter.read_field()? else {
            return Ok(None);
        };
        self.prompter.prompt("Enter date of birth (DD/MM/YYYY): ")?;
        let Some(date_of_birth) = self.prompter.read_field()? else {
            return Ok(None);
        };
        Ok(Some(Credentials {
            username,
            password,
            date_of_birth,
        }))
    }

    fn register(&mut self) -> Step {
        let credentials = or_closed!(self.read_credentials());
        match self.credentials.register(&credentials) {
            Ok(()) => self.prompter.say("Registration successful!")?,
            Err(e) => self.report(&e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn login(&mut self) -> Step {
        let credentials = or_closed!(self.read_credentials());
        match self.credentials.verify(&credentials) {
            Ok(true) => {
                self.logged_in = true;
                self.prompter.say("Login successful!")?;
            }
            Ok(false) => {
                self.logged_in = false;
                self.prompter.say("Invalid username or password.")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn book(&mut self) -> Step {
        if !self.logged_in {
            self.prompter.say("Please login first.")?;
            return Ok(ControlFlow::Continue(()));
        }

        self.prompter.prompt("Enter patient name: ")?;
        let name = or_closed!(self.prompter.read_field());

        self.prompter.prompt("Enter disease: ")?;
        let table = self.bookings.severity_table();
        let disease = or_closed!(self.prompter.read_until(
            "Invalid disease name. Please enter a valid disease: ",
            |line| table.contains(line).then(|| line.to_string()),
        ));

        self.prompter
            .prompt("Enter approximate time to reach hospital (in minutes): ")?;
        let minutes = or_closed!(self.prompter.read_minutes());

        let request = BookingRequest {
            name,
            disease,
            time_to_reach: i64::from(minutes),
        };
        match self.bookings.book(request) {
            Ok(_) => self.prompter.say("Appointment booked successfully!")?,
            Err(e) => self.report(&e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn display(&mut self) -> Step {
        self.prompter.say("Priority Queue:")?;
        for record in self.bookings.queue() {
            writeln!(self.prompter.output(), "{record}")?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn report(&mut self, error: &TriageError) -> io::Result<()> {
        tracing::debug!("menu action failed: {error}");
        writeln!(self.errors, "Error: {error}")
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn bookings(&self) -> &BookingService {
        &self.bookings
    }

    pub fn into_parts(self) -> (R, W, E) {
        let (input, output) = self.prompter.into_parts();
        (input, output, self.errors)
    }
}
