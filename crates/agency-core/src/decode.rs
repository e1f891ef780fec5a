//! Command decoder for the pipe-delimited script language
//!
//! Field 0 selects the family, field 1 (where present) the entity or
//! sub-kind. The total field count must match the family's arity exactly;
//! anything else is a malformed line and nothing is applied.

use crate::commands::Command;
use crate::errors::AgencyError;
use crate::model::{
    parse_non_negative, EntityId, EntityKind, JoinKind, NewAgent, NewAuthor, NewBook, NewCustomer,
    NewSalary, StatKind,
};
use crate::tokenizer::{tokenize, Tokenized};

/// Prefix of a raw statement line handed straight to the store
pub const RAW_SQL_PREFIX: &str = "SQL|";

/// Decode one source line
///
/// Returns `Ok(None)` for blank and comment lines. A line starting with
/// `SQL|` followed by a non-empty statement decodes to [`Command::RawSql`]
/// without going through the tokenizer.
///
/// # Errors
///
/// Returns the decode error for lines that are not a valid command.
pub fn parse_line(line: &str) -> Result<Option<Command>, AgencyError> {
    let trimmed = line.trim();
    if let Some(statement) = trimmed.strip_prefix(RAW_SQL_PREFIX) {
        if !statement.is_empty() {
            return Ok(Some(Command::RawSql(statement.to_string())));
        }
    }

    match tokenize(line) {
        Tokenized::Noop => Ok(None),
        Tokenized::Fields(fields) => decode(&fields).map(Some),
    }
}

/// Decode a tokenized field vector into a typed command
///
/// # Errors
///
/// - `MalformedCommand` for unknown codes, wrong field counts, unknown
///   update field names and zero/absent row ids
/// - `InvalidNumeric` when an integer argument is not a non-negative integer
pub fn decode(fields: &[String]) -> Result<Command, AgencyError> {
    let f: Vec<&str> = fields.iter().map(String::as_str).collect();
    match f.as_slice() {
        ["0"] => Ok(Command::Stop),
        ["1", sub, args @ ..] => decode_register(sub, args),
        ["2", table, id, field, value] => decode_update(table, id, field, value),
        ["3", table, id] => {
            let kind = table_kind(table)?;
            let id = row_id(kind.id_column(), id)?;
            Ok(Command::Purge { kind, id })
        }
        ["4", table] => EntityKind::from_display_code(table)
            .map(Command::Display)
            .ok_or_else(|| AgencyError::malformed(format!("unknown display table '{}'", table))),
        ["5", code] => StatKind::from_code(code)
            .map(Command::Compute)
            .ok_or_else(|| AgencyError::malformed(format!("unknown statistic '{}'", code))),
        ["6", code] => JoinKind::from_code(code)
            .map(Command::Joins)
            .ok_or_else(|| AgencyError::malformed(format!("unknown join '{}'", code))),
        [code, ..] if matches!(*code, "0" | "1" | "2" | "3" | "4" | "5" | "6") => Err(
            AgencyError::malformed(format!("wrong field count {} for command '{}'", f.len(), code)),
        ),
        [code, ..] => Err(AgencyError::malformed(format!(
            "unknown command code '{}'",
            code
        ))),
        [] => Err(AgencyError::malformed("empty command")),
    }
}

fn decode_register(sub: &str, args: &[&str]) -> Result<Command, AgencyError> {
    let kind = table_kind(sub)?;
    match (kind, args) {
        (EntityKind::Agent, [name, phone, experience]) => Ok(Command::RegisterAgent(NewAgent {
            name: name.to_string(),
            phone: phone.to_string(),
            experience: parse_non_negative("Experience", experience)?,
        })),
        (EntityKind::Book, [name, author, cost]) => Ok(Command::RegisterBook(NewBook {
            name: name.to_string(),
            author: optional_ref("AuthorID", author)?,
            cost: parse_non_negative("Cost", cost)?,
        })),
        (EntityKind::Author, [name, phone, hourly_charge]) => {
            Ok(Command::RegisterAuthor(NewAuthor {
                name: name.to_string(),
                phone: phone.to_string(),
                hourly_charge: parse_non_negative("HourlyCharge", hourly_charge)?,
            }))
        }
        (EntityKind::Customer, [agent, book, name, phone]) => {
            Ok(Command::RegisterCustomer(NewCustomer {
                agent: optional_ref("AgentID", agent)?,
                book: optional_ref("BookID", book)?,
                name: name.to_string(),
                phone: phone.to_string(),
            }))
        }
        (EntityKind::Salary, [amount, experience, rest @ ..]) if rest.len() <= 1 => {
            let salary = NewSalary {
                amount: parse_non_negative("Salary", amount)?,
                experience: parse_non_negative("Experience", experience)?,
            };
            let link_agent = match rest {
                [agent] => optional_ref("AgentID", agent)?,
                _ => None,
            };
            Ok(Command::RegisterSalary { salary, link_agent })
        }
        (kind, args) => Err(AgencyError::malformed(format!(
            "wrong field count {} for register {}",
            args.len() + 2,
            kind
        ))),
    }
}

fn decode_update(table: &str, id: &str, field: &str, value: &str) -> Result<Command, AgencyError> {
    let kind = table_kind(table)?;
    let id = row_id(kind.id_column(), id)?;
    let field = kind
        .field_by_column(field)
        .ok_or_else(|| AgencyError::UnknownField {
            entity: kind,
            field: field.to_string(),
        })?;
    let value = field.parse_value(value)?;
    Ok(Command::Update {
        kind,
        id,
        field,
        value,
    })
}

/// Table codes 1..=5 for register, update and purge
fn table_kind(code: &str) -> Result<EntityKind, AgencyError> {
    EntityKind::from_table_code(code)
        .ok_or_else(|| AgencyError::malformed(format!("unknown table code '{}'", code)))
}

/// A row id argument; must be a positive integer
fn row_id(column: &str, raw: &str) -> Result<EntityId, AgencyError> {
    let value = parse_non_negative(column, raw)?;
    EntityId::new(value)
        .ok_or_else(|| AgencyError::malformed(format!("{} must be a positive row id", column)))
}

/// A foreign-key argument; `0` means unset
fn optional_ref(column: &str, raw: &str) -> Result<Option<EntityId>, AgencyError> {
    parse_non_negative(column, raw).map(EntityId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldValue};

    fn line(input: &str) -> Result<Option<Command>, AgencyError> {
        parse_line(input)
    }

    fn cmd(input: &str) -> Command {
        match line(input) {
            Ok(Some(c)) => c,
            other => panic!("expected command for {:?}, got {:?}", input, other),
        }
    }

    fn is_malformed(input: &str) -> bool {
        matches!(line(input), Err(AgencyError::MalformedCommand { .. }))
    }

    #[test]
    fn test_stop() {
        assert_eq!(cmd("0"), Command::Stop);
        assert!(is_malformed("0|1"));
    }

    #[test]
    fn test_register_agent() {
        assert_eq!(
            cmd("1|1|Ann|555-1234|12"),
            Command::RegisterAgent(NewAgent {
                name: "Ann".into(),
                phone: "555-1234".into(),
                experience: 12,
            })
        );
    }

    #[test]
    fn test_register_book_with_and_without_author() {
        match cmd("1|2|Dune|3|25") {
            Command::RegisterBook(book) => {
                assert_eq!(book.author, EntityId::new(3));
                assert_eq!(book.cost, 25);
            }
            other => panic!("unexpected {:?}", other),
        }
        match cmd("1|2|Anonymous|0|5") {
            Command::RegisterBook(book) => assert_eq!(book.author, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_register_customer_keeps_unset_refs() {
        assert_eq!(
            cmd("1|4|0|9|Bob|555"),
            Command::RegisterCustomer(NewCustomer {
                agent: None,
                book: EntityId::new(9),
                name: "Bob".into(),
                phone: "555".into(),
            })
        );
    }

    #[test]
    fn test_register_salary_optional_agent() {
        assert_eq!(
            cmd("1|5|5000|3"),
            Command::RegisterSalary {
                salary: NewSalary {
                    amount: 5000,
                    experience: 3
                },
                link_agent: None,
            }
        );
        assert_eq!(
            cmd("1|5|5000|3|7"),
            Command::RegisterSalary {
                salary: NewSalary {
                    amount: 5000,
                    experience: 3
                },
                link_agent: EntityId::new(7),
            }
        );
        match cmd("1|5|5000|3|0") {
            Command::RegisterSalary { link_agent, .. } => assert_eq!(link_agent, None),
            other => panic!("unexpected {:?}", other),
        }
        assert!(is_malformed("1|5|5000"));
        assert!(is_malformed("1|5|5000|3|7|8"));
    }

    #[test]
    fn test_register_arity_is_exact() {
        assert!(is_malformed("1|1|Ann|555"));
        assert!(is_malformed("1|1|Ann|555|12|extra"));
        assert!(is_malformed("1|4|0|0|Bob"));
        assert!(is_malformed("1"));
        assert!(is_malformed("1|6|x|y|z"));
    }

    #[test]
    fn test_numeric_validation() {
        assert!(matches!(
            line("1|1|Ann|555|twelve"),
            Err(AgencyError::InvalidNumeric { .. })
        ));
        assert!(matches!(
            line("1|2|Book|-1|5"),
            Err(AgencyError::InvalidNumeric { .. })
        ));
        assert!(matches!(
            line("1|5|5000|3|x"),
            Err(AgencyError::InvalidNumeric { .. })
        ));
    }

    #[test]
    fn test_update() {
        assert_eq!(
            cmd("2|4|4|BookID|9"),
            Command::Update {
                kind: EntityKind::Customer,
                id: EntityId::from_raw(4),
                field: Field::BookId,
                value: FieldValue::Int(9),
            }
        );
        assert_eq!(
            cmd("2|1|2|name|New Name"),
            Command::Update {
                kind: EntityKind::Agent,
                id: EntityId::from_raw(2),
                field: Field::Name,
                value: FieldValue::Text("New Name".into()),
            }
        );
    }

    #[test]
    fn test_update_rejections() {
        assert!(matches!(
            line("2|1|2|Cost|5"),
            Err(AgencyError::UnknownField {
                entity: EntityKind::Agent,
                ..
            })
        ));
        assert!(is_malformed("2|6|1|AgentID|1"));
        assert!(is_malformed("2|1|0|Name|x"));
        assert!(is_malformed("2|1|2|Name"));
        assert!(matches!(
            line("2|1|2|Experience|ten"),
            Err(AgencyError::InvalidNumeric { .. })
        ));
    }

    #[test]
    fn test_purge_display_compute_joins() {
        assert_eq!(
            cmd("3|5|2"),
            Command::Purge {
                kind: EntityKind::Salary,
                id: EntityId::from_raw(2)
            }
        );
        assert_eq!(cmd("4|6"), Command::Display(EntityKind::WorkBenefit));
        assert_eq!(cmd("5|3"), Command::Compute(StatKind::SalaryAmount));
        assert_eq!(cmd("6|2"), Command::Joins(JoinKind::AgentBenefit));
        assert!(is_malformed("3|6|1"));
        assert!(is_malformed("4|7"));
        assert!(is_malformed("5|4"));
        assert!(is_malformed("6|1|2"));
    }

    #[test]
    fn test_unknown_code() {
        assert!(is_malformed("9|1"));
        assert!(is_malformed("register|1"));
    }

    #[test]
    fn test_noop_and_raw_sql() {
        assert_eq!(line("").unwrap(), None);
        assert_eq!(line("  # note").unwrap(), None);
        assert_eq!(
            cmd("  SQL|DELETE FROM Books  "),
            Command::RawSql("DELETE FROM Books".into())
        );
        assert!(is_malformed("SQL|"));
    }
}
