//! Interactive numbered menu
//!
//! Each completed menu path builds the same `Command` the script decoder
//! produces and hands it to `apply_command`. Invalid selections and
//! non-integer answers re-prompt until valid. End of input ends the session.

use crate::render;
use agency_core::errors::Result;
use agency_core::model::{
    parse_non_negative, EntityId, EntityKind, Field, FieldValue, JoinKind, NewAgent, NewAuthor,
    NewBook, NewCustomer, NewSalary, StatKind,
};
use agency_core::Command;
use agency_engine::apply_command;
use agency_store::errors::io_error;
use rusqlite::Connection;
use std::io::{BufRead, Write};

const MAIN_MENU: &[&str] = &[
    "Publishing system menu:",
    "1 - Register",
    "2 - Update",
    "3 - Purge",
    "4 - Display",
    "5 - Compute",
    "6 - Joins",
    "0 - Exit",
];

const ENTITY_KINDS: [EntityKind; 5] = [
    EntityKind::Agent,
    EntityKind::Book,
    EntityKind::Author,
    EntityKind::Customer,
    EntityKind::Salary,
];

pub struct Menu<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Run until `0` is chosen or input ends
    pub fn run(&mut self, conn: &Connection) -> Result<()> {
        loop {
            self.say("")?;
            for line in MAIN_MENU {
                self.say(line)?;
            }
            let Some(choice) = self.select(6, true)? else {
                break;
            };
            if choice == 0 {
                break;
            }
            let Some(command) = self.build(choice)? else {
                break;
            };
            self.apply(conn, command)?;
        }
        self.say("Goodbye.")
    }

    fn apply(&mut self, conn: &Connection, command: Command) -> Result<()> {
        match apply_command(conn, command) {
            Ok(outcome) => {
                let text = render::outcome(&outcome);
                self.write(&text)
            }
            // The session continues after a store failure
            Err(err) => self.say(&format!("Error: {}", err)),
        }
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| io_error("write_menu", e))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        self.write(&format!("{}\n", line))
    }

    /// Next input line without its line ending; `None` at end of input
    fn read(&mut self) -> Result<Option<String>> {
        let mut line = Vec::new();
        let n = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(|e| io_error("read_menu", e))?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    /// A choice in `1..=max`, or `0..=max` when `allow_zero`
    fn select(&mut self, max: u32, allow_zero: bool) -> Result<Option<u32>> {
        let low = u32::from(!allow_zero);
        loop {
            let Some(answer) = self.read()? else {
                return Ok(None);
            };
            match answer.trim().parse::<u32>() {
                Ok(n) if (low..=max).contains(&n) => return Ok(Some(n)),
                _ => self.say(&format!("Enter {}-{}:", low, max))?,
            }
        }
    }

    fn text(&mut self, prompt: &str) -> Result<Option<String>> {
        self.say(prompt)?;
        self.read()
    }

    fn integer(&mut self, prompt: &str) -> Result<Option<i64>> {
        self.say(prompt)?;
        loop {
            let Some(answer) = self.read()? else {
                return Ok(None);
            };
            match parse_non_negative(prompt, answer.trim()) {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.say("Enter integer:")?,
            }
        }
    }

    fn reference(&mut self, prompt: &str) -> Result<Option<Option<EntityId>>> {
        Ok(self.integer(prompt)?.map(EntityId::new))
    }

    fn row_id(&mut self, prompt: &str) -> Result<Option<EntityId>> {
        self.say(prompt)?;
        loop {
            let Some(answer) = self.read()? else {
                return Ok(None);
            };
            match parse_non_negative("id", answer.trim()).ok().and_then(EntityId::new) {
                Some(id) => return Ok(Some(id)),
                None => self.say("Enter a positive integer:")?,
            }
        }
    }

    fn entity_kind(&mut self, verb: &str) -> Result<Option<EntityKind>> {
        for (i, kind) in ENTITY_KINDS.iter().enumerate() {
            self.say(&format!("{} - {} {}", i + 1, verb, kind.to_string().to_lowercase()))?;
        }
        Ok(self
            .select(5, false)?
            .map(|n| ENTITY_KINDS[(n - 1) as usize]))
    }

    fn build(&mut self, choice: u32) -> Result<Option<Command>> {
        match choice {
            1 => self.register(),
            2 => self.update(),
            3 => self.purge(),
            4 => self.display(),
            5 => self.compute(),
            _ => self.joins(),
        }
    }

    fn register(&mut self) -> Result<Option<Command>> {
        let Some(kind) = self.entity_kind("Register")? else {
            return Ok(None);
        };
        let command = match kind {
            EntityKind::Agent => {
                let Some(name) = self.text("Enter agent name:")? else {
                    return Ok(None);
                };
                let Some(phone) = self.text("Enter phone:")? else {
                    return Ok(None);
                };
                let Some(experience) = self.integer("Enter experience (years):")? else {
                    return Ok(None);
                };
                Command::RegisterAgent(NewAgent {
                    name,
                    phone,
                    experience,
                })
            }
            EntityKind::Book => {
                let Some(name) = self.text("Enter book name:")? else {
                    return Ok(None);
                };
                let Some(author) = self.reference("Enter author id (0 if unknown):")? else {
                    return Ok(None);
                };
                let Some(cost) = self.integer("Enter cost:")? else {
                    return Ok(None);
                };
                Command::RegisterBook(NewBook { name, author, cost })
            }
            EntityKind::Author => {
                let Some(name) = self.text("Enter author name:")? else {
                    return Ok(None);
                };
                let Some(phone) = self.text("Enter phone:")? else {
                    return Ok(None);
                };
                let Some(hourly_charge) = self.integer("Enter hourly charge:")? else {
                    return Ok(None);
                };
                Command::RegisterAuthor(NewAuthor {
                    name,
                    phone,
                    hourly_charge,
                })
            }
            EntityKind::Customer => {
                let Some(agent) = self.reference("Enter agent id (0 if none):")? else {
                    return Ok(None);
                };
                let Some(book) = self.reference("Enter book id (0 if none):")? else {
                    return Ok(None);
                };
                let Some(name) = self.text("Enter customer name:")? else {
                    return Ok(None);
                };
                let Some(phone) = self.text("Enter phone:")? else {
                    return Ok(None);
                };
                Command::RegisterCustomer(NewCustomer {
                    agent,
                    book,
                    name,
                    phone,
                })
            }
            EntityKind::Salary | EntityKind::WorkBenefit => {
                let Some(amount) = self.integer("Enter salary amount:")? else {
                    return Ok(None);
                };
                let Some(experience) = self.integer("Enter experience (years) for this salary:")?
                else {
                    return Ok(None);
                };
                let Some(link_agent) = self.reference("Link this salary to agent id (0 if none):")?
                else {
                    return Ok(None);
                };
                Command::RegisterSalary {
                    salary: NewSalary { amount, experience },
                    link_agent,
                }
            }
        };
        Ok(Some(command))
    }

    fn update(&mut self) -> Result<Option<Command>> {
        let Some(kind) = self.entity_kind("Edit")? else {
            return Ok(None);
        };
        let Some(id) = self.row_id("Enter the ID:")? else {
            return Ok(None);
        };

        let fields = kind.fields();
        let picker: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}-{}", i + 1, f))
            .collect();
        self.say(&format!("Which field? {}", picker.join(" ")))?;
        let Some(n) = self.select(fields.len() as u32, false)? else {
            return Ok(None);
        };
        let field: Field = fields[(n - 1) as usize];

        let value = if field.is_numeric() {
            self.integer("Enter new value:")?.map(FieldValue::Int)
        } else {
            self.text("Enter new value:")?.map(FieldValue::Text)
        };
        Ok(value.map(|value| Command::Update {
            kind,
            id,
            field,
            value,
        }))
    }

    fn purge(&mut self) -> Result<Option<Command>> {
        let Some(kind) = self.entity_kind("Purge")? else {
            return Ok(None);
        };
        Ok(self
            .row_id("Enter the ID to delete:")?
            .map(|id| Command::Purge { kind, id }))
    }

    fn display(&mut self) -> Result<Option<Command>> {
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            self.say(&format!("{} - {}", i + 1, kind.table()))?;
        }
        Ok(self
            .select(6, false)?
            .and_then(|n| EntityKind::from_display_code(&n.to_string()))
            .map(Command::Display))
    }

    fn compute(&mut self) -> Result<Option<Command>> {
        self.say("1 - Agents stats")?;
        self.say("2 - Books stats")?;
        self.say("3 - Salaries stats")?;
        Ok(self
            .select(3, false)?
            .and_then(|n| StatKind::from_code(&n.to_string()))
            .map(Command::Compute))
    }

    fn joins(&mut self) -> Result<Option<Command>> {
        self.say("1 - Customers -> Agents")?;
        self.say("2 - Agents -> WorkBenefits")?;
        self.say("3 - Agents -> Salaries")?;
        Ok(self
            .select(3, false)?
            .and_then(|n| JoinKind::from_code(&n.to_string()))
            .map(Command::Joins))
    }
}
